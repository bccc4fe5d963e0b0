//! Terrain types and who may walk on them.

use serde::{Deserialize, Serialize};

/// Type of terrain on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    /// Open path - passable by everyone.
    Open = 0,
    /// Wall - impassable.
    Wall = 1,
    /// Vines - only enemies can climb through.
    VineOnly = 2,
    /// Tunnel - only the player fits.
    TunnelOnly = 3,
}

/// Traversal permissions, indexed by `TileType as usize`.
///
/// Each entry is `(player_passable, enemy_passable)`.
const PASSABILITY: [(bool, bool); 4] = [
    (true, true),   // Open
    (false, false), // Wall
    (false, true),  // VineOnly
    (true, false),  // TunnelOnly
];

impl TileType {
    /// Every tile type.
    pub const ALL: [TileType; 4] = [
        TileType::Open,
        TileType::Wall,
        TileType::VineOnly,
        TileType::TunnelOnly,
    ];

    /// Terrain the maze generator may scatter off the guaranteed path.
    ///
    /// `Open` is deliberately absent: open tiles only ever appear on the
    /// carved path.
    pub const FILL: [TileType; 3] = [TileType::Wall, TileType::VineOnly, TileType::TunnelOnly];

    /// Check if the player may enter this tile.
    #[must_use]
    #[inline]
    pub const fn permits_player(self) -> bool {
        PASSABILITY[self as usize].0
    }

    /// Check if an enemy may enter this tile.
    #[must_use]
    #[inline]
    pub const fn permits_enemy(self) -> bool {
        PASSABILITY[self as usize].1
    }
}
