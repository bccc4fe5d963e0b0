//! Session state and the per-tick rules engine.
//!
//! A tick runs in a fixed order:
//!
//! 1. apply the player's decoded commands,
//! 2. update the player's energy,
//! 3. move every enemy (seek in Escape, flee in Hunter),
//! 4. resolve enemies stepping on traps,
//! 5. score and check the mode's win/loss conditions.
//!
//! Once the session reaches a terminal state further ticks are no-ops.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{Difficulty, GameConfig, Mode};
use crate::error::ConfigError;
use crate::game::{
    Behavior, Coord, Direction, Enemy, FrameClock, Grid, Player, TrapManager, mazegen,
};

/// Points for catching an enemy in a trap.
pub const TRAP_BONUS: i64 = 50;

/// Hunter: points for catching an enemy by hand.
pub const CAPTURE_BONUS: i64 = 100;

/// Hunter: penalty when an enemy reaches the exit.
pub const EXIT_PENALTY: i64 = 100;

/// Hunter: captures needed to win.
pub const CAPTURES_TO_WIN: u32 = 5;

/// Hunter: per-tick chance of score decay.
pub const DECAY_PROBABILITY: f64 = 0.02;

/// Hunter: points lost on a decay tick.
pub const DECAY_PENALTY: i64 = 2;

/// Hunter: points per tick for an enemy within one step.
pub const ADJACENT_POINTS: i64 = 3;

/// Hunter: points per tick for an enemy within two steps.
pub const NEAR_POINTS: i64 = 1;

/// Random samples tried before a respawn falls back to the origin.
pub const RESPAWN_ATTEMPTS: u32 = 100;

/// Time bonus `(base, points lost per second)` for winning each mode.
const fn time_bonus_params(mode: Mode) -> (i64, f64) {
    match mode {
        Mode::Escape => (1000, 10.0),
        Mode::Hunter => (500, 5.0),
    }
}

/// A decoded player input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    /// Step one row up.
    MoveUp,
    /// Step one row down.
    MoveDown,
    /// Step one column left.
    MoveLeft,
    /// Step one column right.
    MoveRight,
    /// Begin running.
    StartRun,
    /// Stop running.
    StopRun,
    /// Drop a trap on the player's tile.
    PlaceTrap,
    /// Abandon the session.
    Quit,
}

impl Command {
    /// Movement command for a direction.
    #[must_use]
    pub const fn step(direction: Direction) -> Self {
        match direction {
            Direction::Up => Command::MoveUp,
            Direction::Down => Command::MoveDown,
            Direction::Left => Command::MoveLeft,
            Direction::Right => Command::MoveRight,
        }
    }

    /// Direction of a movement command.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            Command::StartRun | Command::StopRun | Command::PlaceTrap | Command::Quit => None,
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Still being played.
    Active,
    /// The mode's win condition fired.
    Won,
    /// The mode's loss condition fired.
    Lost,
    /// The player quit.
    Abandoned,
}

impl SessionState {
    /// Check if no further ticks will change the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Active)
    }
}

/// Read-only view of a session for renderers and bots.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    /// The maze.
    pub grid: &'a Grid,
    /// Exit position.
    pub exit: Coord,
    /// Player position.
    pub player: Coord,
    /// Player energy.
    pub energy: f64,
    /// Whether the player is running.
    pub running: bool,
    /// Enemy positions.
    pub enemies: Vec<Coord>,
    /// Active traps, oldest first.
    pub traps: &'a [Coord],
    /// Traps that can still be placed.
    pub traps_remaining: usize,
    /// Whether a trap could be placed right now.
    pub trap_ready: bool,
    /// Current score.
    pub score: i64,
    /// Session state.
    pub state: SessionState,
    /// Game mode.
    pub mode: Mode,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// Enemies captured (Hunter).
    pub captures: u32,
    /// Simulated seconds since the start.
    pub elapsed: f64,
}

/// Final figures of a session, as reported to the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Seed the session was generated from.
    pub seed: u64,
    /// Game mode.
    pub mode: Mode,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// State when the summary was taken.
    pub state: SessionState,
    /// Score.
    pub score: i64,
    /// Enemies captured (Hunter).
    pub captures: u32,
    /// Ticks played.
    pub frames: u64,
    /// Simulated seconds played.
    pub elapsed: f64,
}

/// Complete session state, owned by the rules engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// The maze.
    pub grid: Grid,
    /// The player.
    pub player: Player,
    /// All enemies.
    pub enemies: Vec<Enemy>,
    /// Trap bookkeeping.
    pub traps: TrapManager,
    /// Configuration the session was built from.
    config: GameConfig,
    /// Exit position (bottom-right corner).
    exit: Coord,
    /// Running score.
    score: i64,
    /// Enemies captured by hand (Hunter).
    captures: u32,
    /// Lifecycle state.
    state: SessionState,
    /// Simulated time.
    clock: FrameClock,
    /// Random source for AI, decay and respawns.
    rng: StdRng,
    /// Seed the session was generated from.
    seed: u64,
}

impl GameSession {
    /// Generate a fresh maze and set up a session on it.
    ///
    /// The same `config` and `seed` always produce the same session.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = mazegen::generate(config.rows, config.cols, &mut rng)?;
        Ok(Self::build(grid, config, rng, seed))
    }

    /// Set up a session on an existing grid.
    ///
    /// The grid's dimensions override `config.rows` and `config.cols`.
    #[must_use]
    pub fn with_grid(grid: Grid, config: GameConfig, seed: u64) -> Self {
        Self::build(grid, config, StdRng::seed_from_u64(seed), seed)
    }

    fn build(grid: Grid, mut config: GameConfig, mut rng: StdRng, seed: u64) -> Self {
        config.rows = grid.rows();
        config.cols = grid.cols();

        let start = Coord::new(0, 0);
        let preset = config.preset();
        let enemies = (0..preset.enemy_count)
            .map(|_| {
                let spot = spawn_point(&grid, &mut rng, Some(start));
                Enemy::new(spot, preset.frames_per_move)
            })
            .collect();

        info!(
            "session start: seed={seed} mode={} difficulty={} grid={}x{}",
            config.mode, config.difficulty, config.rows, config.cols
        );

        Self {
            exit: grid.last_cell(),
            grid,
            player: Player::new(start),
            enemies,
            traps: TrapManager::new(),
            config,
            score: config.mode.starting_score(),
            captures: 0,
            state: SessionState::Active,
            clock: FrameClock::new(config.frame_rate),
            rng,
            seed,
        }
    }

    /// Configuration of this session.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Game mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Difficulty.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Exit position.
    #[must_use]
    pub const fn exit(&self) -> Coord {
        self.exit
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// Enemies captured by hand.
    #[must_use]
    pub const fn captures(&self) -> u32 {
        self.captures
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Check if the session has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Ticks played.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// The session's frame clock.
    #[must_use]
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Simulated seconds since the start.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.clock.seconds()
    }

    /// Seed the session was generated from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// How enemies move in this mode.
    #[must_use]
    pub const fn enemy_behavior(&self) -> Behavior {
        match self.config.mode {
            Mode::Escape => Behavior::Seek,
            Mode::Hunter => Behavior::Flee,
        }
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            exit: self.exit,
            player: self.player.position(),
            energy: self.player.energy(),
            running: self.player.is_running(),
            enemies: self.enemies.iter().map(Enemy::position).collect(),
            traps: self.traps.traps(),
            traps_remaining: self.traps.remaining(),
            trap_ready: self.traps.can_place(&self.clock),
            score: self.score,
            state: self.state,
            mode: self.config.mode,
            difficulty: self.config.difficulty,
            captures: self.captures,
            elapsed: self.clock.seconds(),
        }
    }

    /// Figures to report at the end of the session.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            mode: self.config.mode,
            difficulty: self.config.difficulty,
            state: self.state,
            score: self.score,
            captures: self.captures,
            frames: self.clock.frames(),
            elapsed: self.clock.seconds(),
        }
    }

    /// Run one tick with the commands decoded for this frame.
    ///
    /// Commands apply in order. `Quit` ends the session immediately and
    /// skips everything after it. Ticking a finished session does nothing.
    pub fn tick(&mut self, commands: &[Command]) -> SessionState {
        if self.state.is_terminal() {
            return self.state;
        }

        self.clock.advance();

        for &command in commands {
            if command == Command::Quit {
                self.finish(SessionState::Abandoned);
                return self.state;
            }
            self.apply(command);
        }

        self.player.tick();
        self.move_enemies();

        let trap_points = self.resolve_traps();
        self.score += trap_points;

        match self.config.mode {
            Mode::Escape => self.evaluate_escape(),
            Mode::Hunter => self.evaluate_hunter(),
        }

        self.state
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::StartRun => self.player.start_running(),
            Command::StopRun => self.player.stop_running(),
            Command::PlaceTrap => {
                let at = self.player.position();
                if self.traps.place(at, &self.clock) {
                    debug!("trap placed at {at:?} (frame {})", self.clock.frames());
                }
            }
            Command::Quit => {}
            Command::MoveUp | Command::MoveDown | Command::MoveLeft | Command::MoveRight => {
                if let Some(direction) = command.direction() {
                    let (d_row, d_col) = direction.delta();
                    self.player.step(d_row, d_col, &self.grid);
                }
            }
        }
    }

    fn move_enemies(&mut self) {
        let behavior = self.enemy_behavior();
        let target = self.player.position();
        for enemy in &mut self.enemies {
            enemy.advance(behavior, target, &self.grid, &mut self.rng);
        }
    }

    /// Consume at most one trap per enemy standing on one, and respawn the
    /// enemies that were caught. Returns the points earned.
    fn resolve_traps(&mut self) -> i64 {
        let mut points = 0;
        let mut caught = Vec::new();

        for (idx, enemy) in self.enemies.iter().enumerate() {
            if self.traps.remove(enemy.position()) {
                debug!("enemy {idx} trapped at {:?}", enemy.position());
                points += TRAP_BONUS;
                caught.push(idx);
            }
        }

        for idx in caught {
            self.respawn(idx);
        }

        points
    }

    fn evaluate_escape(&mut self) {
        let player = self.player.position();

        if player == self.exit {
            self.score += self.time_bonus();
            self.finish(SessionState::Won);
            return;
        }

        if self.enemies.iter().any(|e| e.position() == player) {
            self.finish(SessionState::Lost);
        }
    }

    fn evaluate_hunter(&mut self) {
        self.score += self.proximity_points();

        if self.rng.random_bool(DECAY_PROBABILITY) {
            self.score -= DECAY_PENALTY;
        }

        self.score -= self.resolve_exit_escapes();
        self.score += self.resolve_captures();

        if self.captures >= CAPTURES_TO_WIN {
            self.score += self.time_bonus();
            self.finish(SessionState::Won);
            return;
        }

        if self.score <= 0 {
            self.finish(SessionState::Lost);
        }
    }

    /// Hunter pressure points: every enemy within reach scores independently.
    fn proximity_points(&self) -> i64 {
        let player = self.player.position();
        self.enemies
            .iter()
            .map(|enemy| match enemy.position().manhattan(player) {
                0..=1 => ADJACENT_POINTS,
                2 => NEAR_POINTS,
                _ => 0,
            })
            .sum()
    }

    /// Respawn enemies that reached the exit; returns the penalty incurred.
    fn resolve_exit_escapes(&mut self) -> i64 {
        let mut penalty = 0;
        for idx in 0..self.enemies.len() {
            if self.enemies[idx].position() == self.exit {
                debug!("enemy {idx} reached the exit");
                penalty += EXIT_PENALTY;
                self.respawn(idx);
            }
        }
        penalty
    }

    /// Capture enemies sharing the player's tile; returns the points earned.
    fn resolve_captures(&mut self) -> i64 {
        let player = self.player.position();
        let mut points = 0;
        for idx in 0..self.enemies.len() {
            if self.enemies[idx].position() == player {
                self.captures += 1;
                debug!("enemy {idx} captured ({} total)", self.captures);
                points += CAPTURE_BONUS;
                self.respawn(idx);
            }
        }
        points
    }

    fn respawn(&mut self, idx: usize) {
        let spot = spawn_point(&self.grid, &mut self.rng, None);
        if let Some(enemy) = self.enemies.get_mut(idx) {
            debug!("enemy {idx} respawned at {spot:?}");
            enemy.place(spot);
        }
    }

    /// Win bonus for the current mode at the current time, never negative.
    #[allow(clippy::cast_possible_truncation)]
    fn time_bonus(&self) -> i64 {
        let (base, per_second) = time_bonus_params(self.config.mode);
        let lost = (per_second * self.clock.seconds()).floor() as i64;
        (base - lost).max(0)
    }

    fn finish(&mut self, state: SessionState) {
        self.state = state;
        info!(
            "session over: {state:?} score={} captures={} after {:.1}s",
            self.score,
            self.captures,
            self.clock.seconds()
        );
    }
}

/// Pick a random cell an enemy may stand on.
///
/// Samples uniformly up to [`RESPAWN_ATTEMPTS`] times, skipping `avoid`,
/// and falls back to `(0, 0)` when nothing suitable turns up. The fallback
/// is not re-checked.
pub fn spawn_point<R: Rng + ?Sized>(grid: &Grid, rng: &mut R, avoid: Option<Coord>) -> Coord {
    for _ in 0..RESPAWN_ATTEMPTS {
        let coord = Coord::new(
            rng.random_range(0..grid.rows()),
            rng.random_range(0..grid.cols()),
        );
        if grid.enemy_can_enter(coord) && Some(coord) != avoid {
            return coord;
        }
    }
    debug!("no enemy tile found in {RESPAWN_ATTEMPTS} samples, using origin");
    Coord::new(0, 0)
}
