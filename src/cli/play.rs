//! Play command implementation - interactive terminal game.

use super::{CliError, resolve_seed};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use labyrinth::game::session::CAPTURES_TO_WIN;
use labyrinth::game::{MAX_ENERGY, MAX_TRAPS};
use labyrinth::scores::{self, Leaderboard};
use labyrinth::{Command, Coord, GameConfig, GameSession, Mode, SessionState, Snapshot, TileType};
use log::warn;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::io::{Stdout, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the terminal fails.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    name: String,
    config: GameConfig,
    seed: Option<u64>,
    scores_dir: PathBuf,
) -> Result<(), CliError> {
    config.validate()?;
    let name = scores::sanitize_name(&name);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = play_rounds(&mut terminal, &name, config, resolve_seed(seed), &scores_dir);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

/// One fresh session per round until the player leaves.
fn play_rounds(
    terminal: &mut Term,
    name: &str,
    config: GameConfig,
    mut seed: u64,
    scores_dir: &Path,
) -> Result<(), CliError> {
    loop {
        let mut app = App::new(GameSession::new(config, seed)?, name);
        run_session(terminal, &mut app)?;

        if app.session.state() == SessionState::Abandoned {
            return Ok(());
        }

        let results = Results::record(&app, scores_dir);
        if !show_results(terminal, &app, &results)? {
            return Ok(());
        }
        seed = seed.wrapping_add(1);
    }
}

/// App state for one round.
struct App<'a> {
    session: GameSession,
    name: &'a str,
    /// Commands decoded since the last tick.
    pending: Vec<Command>,
}

impl<'a> App<'a> {
    fn new(session: GameSession, name: &'a str) -> Self {
        Self {
            session,
            name,
            pending: Vec::new(),
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let command = match code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Command::MoveUp,
            KeyCode::Down | KeyCode::Char('s' | 'S') => Command::MoveDown,
            KeyCode::Left | KeyCode::Char('a' | 'A') => Command::MoveLeft,
            KeyCode::Right | KeyCode::Char('d' | 'D') => Command::MoveRight,
            KeyCode::Char('r' | 'R') => {
                if self.will_be_running() {
                    Command::StopRun
                } else {
                    Command::StartRun
                }
            }
            KeyCode::Char('t' | 'T') => Command::PlaceTrap,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
            _ => return,
        };
        self.pending.push(command);
    }

    /// Running state once the queued commands apply.
    fn will_be_running(&self) -> bool {
        self.pending
            .iter()
            .rev()
            .find_map(|command| match command {
                Command::StartRun => Some(true),
                Command::StopRun => Some(false),
                _ => None,
            })
            .unwrap_or_else(|| self.session.player.is_running())
    }
}

/// Tick the session at its frame rate until it ends.
fn run_session(terminal: &mut Term, app: &mut App<'_>) -> Result<(), CliError> {
    let rate = app.session.config().frame_rate.max(1);
    let frame = Duration::from_secs(1) / rate;
    let mut next_tick = Instant::now() + frame;

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }

        if Instant::now() >= next_tick {
            next_tick += frame;
            let commands = std::mem::take(&mut app.pending);
            if app.session.tick(&commands).is_terminal() {
                return Ok(());
            }
        }
    }
}

/// End-of-round leaderboard.
struct Results {
    board: Leaderboard,
    saved: bool,
}

impl Results {
    fn record(app: &App<'_>, dir: &Path) -> Self {
        let mode = app.session.mode();
        match scores::record(dir, mode, app.name, app.session.score()) {
            Ok(board) => Self { board, saved: true },
            Err(e) => {
                warn!("could not save score: {e}");
                Self {
                    board: scores::load_or_empty(dir, mode),
                    saved: false,
                }
            }
        }
    }
}

/// Show the outcome and top 5. Returns `true` to play again.
fn show_results(terminal: &mut Term, app: &App<'_>, results: &Results) -> Result<bool, CliError> {
    loop {
        terminal.draw(|f| render_results(f, app, results))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Enter | KeyCode::Char('y' | 'Y' | 'p' | 'P') => return Ok(true),
                KeyCode::Char('q' | 'Q' | 'n' | 'N') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App<'_>) {
    let snapshot = app.session.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], &snapshot, app.name);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(28)])
        .split(chunks[1]);

    render_maze(f, main_chunks[0], &snapshot);
    render_sidebar(f, main_chunks[1], &snapshot);

    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, snapshot: &Snapshot<'_>, name: &str) {
    let goal = match snapshot.mode {
        Mode::Escape => "reach the exit",
        Mode::Hunter => "catch the runners",
    };
    let title = format!(
        " Labyrinth | {} ({}) | {name}: {goal} | {:.1}s ",
        snapshot.mode, snapshot.difficulty, snapshot.elapsed
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_maze(f: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
    let grid = snapshot.grid;
    let mut lines: Vec<Line> = Vec::with_capacity(usize::from(grid.rows()));

    for row in 0..grid.rows() {
        let spans: Vec<Span> = (0..grid.cols())
            .map(|col| cell_span(snapshot, Coord::new(row, col)))
            .collect();
        lines.push(Line::from(spans));
    }

    let maze = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Maze "));

    f.render_widget(maze, area);
}

/// Two-column glyph for a cell; actors draw over traps, traps over terrain.
fn cell_span(snapshot: &Snapshot<'_>, coord: Coord) -> Span<'static> {
    let (glyph, style) = if coord == snapshot.player {
        ("@@", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    } else if snapshot.enemies.contains(&coord) {
        let color = match snapshot.mode {
            Mode::Escape => Color::Red,
            Mode::Hunter => Color::Magenta,
        };
        ("&&", Style::default().fg(color).add_modifier(Modifier::BOLD))
    } else if snapshot.traps.contains(&coord) {
        ("^^", Style::default().fg(Color::LightRed))
    } else if coord == snapshot.exit {
        ("[]", Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD))
    } else {
        match snapshot.grid.get(coord) {
            Some(TileType::Wall) => ("██", Style::default().fg(Color::Gray)),
            Some(TileType::VineOnly) => ("♣♣", Style::default().fg(Color::Green)),
            Some(TileType::TunnelOnly) => ("▒▒", Style::default().fg(Color::Yellow)),
            Some(TileType::Open) | None => ("  ", Style::default()),
        }
    };
    Span::styled(glyph, style)
}

fn render_sidebar(f: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let label = if snapshot.running { "running" } else { "walking" };
    let energy = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Energy "))
        .gauge_style(Style::default().fg(Color::Green))
        .label(format!("{:.0}% {label}", snapshot.energy))
        .ratio((snapshot.energy / MAX_ENERGY).clamp(0.0, 1.0));
    f.render_widget(energy, chunks[0]);

    let trap_status = if snapshot.trap_ready { "ready" } else { "cooling down" };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Score: {}", snapshot.score),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "  Traps: {}/{MAX_TRAPS} ({trap_status})",
            snapshot.traps_remaining
        )),
    ];
    if snapshot.mode == Mode::Hunter {
        lines.push(Line::from(format!(
            "  Captures: {}/{CAPTURES_TO_WIN}",
            snapshot.captures
        )));
    }
    lines.push(Line::from(format!("  Enemies: {}", snapshot.enemies.len())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  ♣ vines: enemies only", Style::default().fg(Color::Green))));
    lines.push(Line::from(Span::styled("  ▒ tunnels: you only", Style::default().fg(Color::Yellow))));

    let stats = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Status "));
    f.render_widget(stats, chunks[1]);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let controls = " [←↑↓→/WASD] Move  [r] Run on/off  [t] Trap  [q] Quit ";

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn render_results(f: &mut Frame, app: &App<'_>, results: &Results) {
    let session = &app.session;
    let (headline, color) = match session.state() {
        SessionState::Won => ("YOU WIN", Color::LightGreen),
        SessionState::Lost => ("GAME OVER", Color::LightRed),
        SessionState::Active | SessionState::Abandoned => ("GAME ENDED", Color::Gray),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{}: {} points in {:.1}s",
            app.name,
            session.score(),
            session.elapsed_seconds()
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Top 5 - {}", session.mode()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let mut highlighted = false;
    for (rank, entry) in results.board.entries().iter().enumerate() {
        let text = format!("{}. {:<12} {:>6}", rank + 1, entry.name, entry.score);
        let mine = !highlighted && entry.name == app.name && entry.score == session.score();
        highlighted |= mine;
        let style = if mine {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    if results.board.is_empty() {
        lines.push(Line::from("(no scores yet)"));
    }
    if !results.saved {
        lines.push(Line::from(Span::styled(
            "(score could not be saved)",
            Style::default().fg(Color::LightRed),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("[Enter] Play again   [q] Leave"));

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Results "));

    f.render_widget(panel, f.area());
}
