//! Budget-bounded best-first pathfinding for colony units
//!
//! The search is limited by the mover's movement budget for the turn. When
//! the target cannot be reached within budget the best partial progress is
//! returned instead, so callers always get a usable first leg.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;

use crate::colony::unit_class::UnitClass;
use crate::grid::hex::HexCoord;
use crate::grid::occupancy::Occupancy;
use crate::grid::terrain::{TerrainKind, TerrainView};

/// Extra heuristic weight for landing on acid
pub const DEFAULT_ACID_PENALTY: f32 = 3.2;

/// Who is moving, for passability and collision checks
#[derive(Debug, Clone, Copy)]
pub struct Mover<'a> {
    pub class: UnitClass,
    /// Anthill tiles this mover may walk through
    pub own_structures: &'a BTreeSet<HexCoord>,
}

impl<'a> Mover<'a> {
    pub fn new(class: UnitClass, own_structures: &'a BTreeSet<HexCoord>) -> Self {
        Self {
            class,
            own_structures,
        }
    }
}

/// Searched hex with its back-pointer into the node arena
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    coord: HexCoord,
    residual: u32,
    priority: OrderedFloat<f32>,
    parent: Option<usize>,
}

/// Open set entry; ordered so the max-heap pops the best candidate
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    priority: OrderedFloat<f32>,
    residual: u32,
    coord: HexCoord,
    seq: usize,
}

impl OpenEntry {
    /// Smaller key is better
    fn key(&self) -> (OrderedFloat<f32>, std::cmp::Reverse<u32>, HexCoord, usize) {
        (
            self.priority,
            std::cmp::Reverse(self.residual),
            self.coord,
            self.seq,
        )
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pathfinder with a tunable hazard penalty
#[derive(Debug, Clone, Copy)]
pub struct PathFinder {
    pub acid_penalty: f32,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self {
            acid_penalty: DEFAULT_ACID_PENALTY,
        }
    }
}

impl PathFinder {
    pub fn new(acid_penalty: f32) -> Self {
        Self { acid_penalty }
    }

    /// Distance to target plus the hazard penalty of the hex itself
    pub fn heuristic(&self, coord: HexCoord, kind: TerrainKind, target: HexCoord) -> f32 {
        let penalty = if kind.is_hazardous() {
            self.acid_penalty
        } else {
            0.0
        };
        coord.distance(&target) as f32 + penalty
    }

    fn priority(&self, coord: HexCoord, kind: TerrainKind, target: HexCoord) -> OrderedFloat<f32> {
        OrderedFloat(coord.distance(&target) as f32 + self.heuristic(coord, kind, target))
    }

    /// Path from `start` toward `target` spending at most `budget`.
    ///
    /// The path excludes `start`. An empty path means hold position.
    pub fn find_path(
        &self,
        start: HexCoord,
        target: HexCoord,
        budget: u32,
        world: &impl TerrainView,
        occupancy: &Occupancy,
        mover: &Mover<'_>,
    ) -> Vec<HexCoord> {
        if start == target {
            return Vec::new();
        }

        let start_kind = world
            .tile(start)
            .map(|t| t.kind)
            .unwrap_or(TerrainKind::Empty);
        let mut nodes = vec![SearchNode {
            coord: start,
            residual: budget,
            priority: self.priority(start, start_kind, target),
            parent: None,
        }];
        let mut open = BinaryHeap::new();
        open.push(OpenEntry {
            priority: nodes[0].priority,
            residual: budget,
            coord: start,
            seq: 0,
        });

        let mut closed: AHashSet<HexCoord> = AHashSet::new();
        // Best residual seen per hex; a weaker re-push can never win
        let mut best_residual: AHashMap<HexCoord, u32> = AHashMap::new();
        best_residual.insert(start, budget);

        while let Some(entry) = open.pop() {
            if !closed.insert(entry.coord) {
                continue;
            }

            if entry.coord == target {
                return reconstruct_path(&nodes, entry.seq);
            }

            // Budget horizon reached on this branch
            if entry.residual == 0 {
                continue;
            }

            for neighbor in entry.coord.neighbors() {
                if closed.contains(&neighbor) {
                    continue;
                }
                let Some(tile) = world.tile(neighbor) else {
                    continue;
                };
                if tile.kind.is_impassable() {
                    continue;
                }
                if tile.kind.is_structure() && !mover.own_structures.contains(&neighbor) {
                    continue;
                }
                if occupancy.collides(neighbor, mover.class) {
                    continue;
                }

                let Some(residual) = entry.residual.checked_sub(tile.cost) else {
                    continue;
                };
                if best_residual
                    .get(&neighbor)
                    .is_some_and(|&seen| seen >= residual)
                {
                    continue;
                }
                best_residual.insert(neighbor, residual);

                let seq = nodes.len();
                let priority = self.priority(neighbor, tile.kind, target);
                nodes.push(SearchNode {
                    coord: neighbor,
                    residual,
                    priority,
                    parent: Some(entry.seq),
                });
                open.push(OpenEntry {
                    priority,
                    residual,
                    coord: neighbor,
                    seq,
                });
            }
        }

        // Target not reached: best hex ever placed on the frontier
        let best = nodes
            .iter()
            .enumerate()
            .skip(1)
            .min_by_key(|(_, n)| (n.priority, std::cmp::Reverse(n.residual), n.coord))
            .map(|(idx, _)| idx);

        match best {
            Some(idx) => reconstruct_path(&nodes, idx),
            None => Vec::new(),
        }
    }
}

/// Search with the default acid penalty
pub fn find_path(
    start: HexCoord,
    target: HexCoord,
    budget: u32,
    world: &impl TerrainView,
    occupancy: &Occupancy,
    mover: &Mover<'_>,
) -> Vec<HexCoord> {
    PathFinder::default().find_path(start, target, budget, world, occupancy, mover)
}

/// Walk back-pointers to build the path, excluding the start hex
fn reconstruct_path(nodes: &[SearchNode], mut idx: usize) -> Vec<HexCoord> {
    let mut path = Vec::new();
    while let Some(parent) = nodes[idx].parent {
        path.push(nodes[idx].coord);
        idx = parent;
    }
    path.reverse();
    path
}

/// Total terrain cost of walking `path`, or None if it crosses unknown hexes
pub fn path_cost(world: &impl TerrainView, path: &[HexCoord]) -> Option<u32> {
    path.iter()
        .map(|coord| world.tile(*coord).map(|t| t.cost))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::terrain::Tile;

    fn open_field(radius: i32) -> AHashMap<HexCoord, Tile> {
        let mut map = AHashMap::new();
        for q in -radius..=radius {
            for r in -radius..=radius {
                let c = HexCoord::new(q, r);
                map.insert(c, Tile::new(c, TerrainKind::Empty, 1));
            }
        }
        map
    }

    fn set(map: &mut AHashMap<HexCoord, Tile>, q: i32, r: i32, kind: TerrainKind, cost: u32) {
        let c = HexCoord::new(q, r);
        map.insert(c, Tile::new(c, kind, cost));
    }

    fn no_structures() -> BTreeSet<HexCoord> {
        BTreeSet::new()
    }

    #[test]
    fn test_start_equals_target_is_empty() {
        let map = open_field(3);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Worker, &own);
        let path = find_path(
            HexCoord::new(1, 1),
            HexCoord::new(1, 1),
            5,
            &map,
            &Occupancy::new(),
            &mover,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_straight_path_excludes_start() {
        let map = open_field(5);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Worker, &own);
        let path = find_path(
            HexCoord::new(0, 0),
            HexCoord::new(3, 0),
            5,
            &map,
            &Occupancy::new(),
            &mover,
        );
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(&HexCoord::new(3, 0)));
        assert!(!path.contains(&HexCoord::new(0, 0)));
    }

    #[test]
    fn test_path_steps_are_adjacent_and_within_budget() {
        let mut map = open_field(6);
        set(&mut map, 1, 0, TerrainKind::Dirt, 2);
        set(&mut map, 2, -1, TerrainKind::Stone, 1);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Soldier, &own);
        let start = HexCoord::new(0, 0);
        let path = find_path(start, HexCoord::new(4, 0), 4, &map, &Occupancy::new(), &mover);

        assert!(!path.is_empty());
        let mut prev = start;
        for step in &path {
            assert!(prev.is_adjacent(step));
            prev = *step;
        }
        assert!(path_cost(&map, &path).unwrap() <= 4);
    }

    #[test]
    fn test_budget_limits_progress() {
        let map = open_field(10);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Worker, &own);
        let path = find_path(
            HexCoord::new(0, 0),
            HexCoord::new(9, 0),
            3,
            &map,
            &Occupancy::new(),
            &mover,
        );
        assert_eq!(path.len(), 3);
        assert_eq!(path.last().unwrap().distance(&HexCoord::new(9, 0)), 6);
    }

    #[test]
    fn test_stone_wall_is_routed_around() {
        let mut map = open_field(4);
        set(&mut map, 1, 0, TerrainKind::Stone, 1);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Worker, &own);
        let path = find_path(
            HexCoord::new(0, 0),
            HexCoord::new(2, 0),
            5,
            &map,
            &Occupancy::new(),
            &mover,
        );
        assert_eq!(path.last(), Some(&HexCoord::new(2, 0)));
        assert!(!path.contains(&HexCoord::new(1, 0)));
    }

    #[test]
    fn test_walled_target_returns_best_partial() {
        let mut map = open_field(5);
        let target = HexCoord::new(3, 0);
        for n in target.neighbors() {
            set(&mut map, n.q, n.r, TerrainKind::Stone, 1);
        }
        let own = no_structures();
        let mover = Mover::new(UnitClass::Worker, &own);
        let path = find_path(HexCoord::new(0, 0), target, 5, &map, &Occupancy::new(), &mover);

        assert!(!path.contains(&target));
        let end = *path.last().unwrap();
        assert_eq!(end.distance(&target), 2);
    }

    #[test]
    fn test_unknown_tiles_block() {
        let mut map = AHashMap::new();
        set(&mut map, 0, 0, TerrainKind::Empty, 1);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Scout, &own);
        let path = find_path(
            HexCoord::new(0, 0),
            HexCoord::new(4, 0),
            7,
            &map,
            &Occupancy::new(),
            &mover,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_foreign_anthill_blocks_own_passes() {
        let mut map = open_field(3);
        set(&mut map, 1, 0, TerrainKind::Anthill, 1);
        let target = HexCoord::new(1, 0);

        let none = no_structures();
        let stranger = Mover::new(UnitClass::Worker, &none);
        let path = find_path(HexCoord::new(0, 0), target, 5, &map, &Occupancy::new(), &stranger);
        assert!(!path.contains(&target));

        let own: BTreeSet<HexCoord> = [target].into_iter().collect();
        let owner = Mover::new(UnitClass::Worker, &own);
        let path = find_path(HexCoord::new(0, 0), target, 5, &map, &Occupancy::new(), &owner);
        assert_eq!(path, vec![target]);
    }

    #[test]
    fn test_same_class_friendly_blocks() {
        let map = open_field(3);
        let mut occ = Occupancy::new();
        occ.add_friendly(HexCoord::new(1, 0), UnitClass::Worker);
        let own = no_structures();

        let worker = Mover::new(UnitClass::Worker, &own);
        let path = find_path(HexCoord::new(0, 0), HexCoord::new(2, 0), 5, &map, &occ, &worker);
        assert!(!path.contains(&HexCoord::new(1, 0)));
        assert_eq!(path.last(), Some(&HexCoord::new(2, 0)));

        let soldier = Mover::new(UnitClass::Soldier, &own);
        let path = find_path(HexCoord::new(0, 0), HexCoord::new(2, 0), 5, &map, &occ, &soldier);
        assert_eq!(path, vec![HexCoord::new(1, 0), HexCoord::new(2, 0)]);
    }

    #[test]
    fn test_acid_is_avoided_when_detour_is_cheap() {
        let mut map = open_field(4);
        set(&mut map, 1, 0, TerrainKind::Acid, 1);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Worker, &own);
        let path = find_path(
            HexCoord::new(0, 0),
            HexCoord::new(2, 0),
            5,
            &map,
            &Occupancy::new(),
            &mover,
        );
        assert_eq!(path.last(), Some(&HexCoord::new(2, 0)));
        assert!(!path.contains(&HexCoord::new(1, 0)));
    }

    #[test]
    fn test_expensive_tile_exceeding_budget_is_rejected() {
        let mut map = AHashMap::new();
        set(&mut map, 0, 0, TerrainKind::Empty, 1);
        set(&mut map, 1, 0, TerrainKind::Dirt, 6);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Worker, &own);
        let path = find_path(
            HexCoord::new(0, 0),
            HexCoord::new(1, 0),
            5,
            &map,
            &Occupancy::new(),
            &mover,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut map = open_field(8);
        set(&mut map, 2, 1, TerrainKind::Stone, 1);
        set(&mut map, 3, -1, TerrainKind::Acid, 1);
        set(&mut map, 1, 2, TerrainKind::Dirt, 2);
        let own = no_structures();
        let mover = Mover::new(UnitClass::Scout, &own);
        let run = || {
            find_path(
                HexCoord::new(-2, 0),
                HexCoord::new(6, -1),
                7,
                &map,
                &Occupancy::new(),
                &mover,
            )
        };
        let first = run();
        for _ in 0..10 {
            assert_eq!(run(), first);
        }
    }

    #[test]
    fn test_path_cost_unknown_hex_is_none() {
        let map = open_field(1);
        assert_eq!(path_cost(&map, &[HexCoord::new(1, 0)]), Some(1));
        assert_eq!(path_cost(&map, &[HexCoord::new(5, 5)]), None);
    }
}
