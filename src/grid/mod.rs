//! Hex grid - geometry, terrain, occupancy and pathfinding

pub mod hex;
pub mod occupancy;
pub mod pathfinding;
pub mod terrain;

pub use hex::{area, disk, hex_distance, neighbors, ring, HexCoord};
pub use occupancy::Occupancy;
pub use pathfinding::{find_path, path_cost, Mover, PathFinder};
pub use terrain::{TerrainKind, TerrainView, Tile};
