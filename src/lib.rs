//! Hex Colony - Turn-Based Colony Bot for a Hex-Grid Strategy Game

pub mod colony;
pub mod core;
pub mod grid;
pub mod memory;
pub mod protocol;
pub mod strategy;
pub mod turn;
