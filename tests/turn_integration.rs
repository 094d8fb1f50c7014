//! End-to-end turn tests: snapshot in, command batch out

use std::time::Duration;

use hex_colony::colony::{EnemyUnit, ResourceKind, ResourceNode, Unit, UnitClass};
use hex_colony::core::config::ColonyConfig;
use hex_colony::core::types::UnitId;
use hex_colony::core::types::Timestamp;
use hex_colony::grid::pathfinding::path_cost;
use hex_colony::grid::{disk, HexCoord, Occupancy, TerrainKind, TerrainView, Tile};
use hex_colony::memory::{AttackWindow, ManualClock, Role, WorldMemory};
use hex_colony::protocol::Snapshot;
use hex_colony::strategy::{DecisionContext, Intent, StrategyEngine, TurnPlan};
use hex_colony::turn::TurnOrchestrator;

/// Open field of radius `radius` around the origin with home at (0, 0)
fn field(turn: u64, radius: i32) -> Snapshot {
    let mut s = Snapshot::new(turn, HexCoord::new(0, 0));
    s.home = vec![HexCoord::new(0, 0)];
    for q in -radius..=radius {
        for r in -radius..=radius {
            let c = HexCoord::new(q, r);
            let kind = if c == HexCoord::new(0, 0) {
                TerrainKind::Anthill
            } else {
                TerrainKind::Empty
            };
            s.tiles.push(Tile::new(c, kind, 1));
        }
    }
    s
}

fn orchestrator() -> TurnOrchestrator<ManualClock> {
    TurnOrchestrator::new(ColonyConfig::default(), ManualClock::new()).unwrap()
}

#[test]
fn test_worker_unloading_at_home_holds() {
    let mut s = field(1, 3);
    s.units = vec![Unit::new("w", UnitClass::Worker, HexCoord::new(0, 0))
        .with_cargo(ResourceKind::Apple, 5)];

    let batch = orchestrator().play_turn(&s);
    assert!(batch.get(&UnitId::new("w")).is_none());
    assert!(batch.is_empty());
}

#[test]
fn test_loaded_worker_returns_home_within_budget() {
    let mut s = field(1, 8);
    let worker = Unit::new("w", UnitClass::Worker, HexCoord::new(5, 5))
        .with_cargo(ResourceKind::Bread, 6);
    let budget = worker.speed();
    s.units = vec![worker];

    let mut orch = orchestrator();
    let batch = orch.play_turn(&s);
    let command = batch.get(&UnitId::new("w")).unwrap();

    // Ten hexes out with a budget of five: five steps straight toward home
    let end = command.destination().unwrap();
    assert_eq!(command.path.len(), budget as usize);
    assert_eq!(end.distance(&HexCoord::new(0, 0)), 5);
    assert!(path_cost(orch.memory(), &command.path).unwrap() <= budget);
}

#[test]
fn test_loaded_worker_in_range_reaches_home() {
    let mut s = field(1, 8);
    s.units = vec![Unit::new("w", UnitClass::Worker, HexCoord::new(2, 2))
        .with_cargo(ResourceKind::Bread, 6)];

    let batch = orchestrator().play_turn(&s);
    let command = batch.get(&UnitId::new("w")).unwrap();
    assert_eq!(command.destination(), Some(HexCoord::new(0, 0)));
    assert_eq!(command.path.len(), 4);
}

#[test]
fn test_soldier_moves_toward_close_enemy() {
    let mut s = field(1, 6);
    let start = HexCoord::new(1, 0);
    let enemy = HexCoord::new(4, 0);
    s.units = vec![Unit::new("s", UnitClass::Soldier, start)];
    s.enemies = vec![EnemyUnit::new(UnitClass::Worker, enemy)];

    let batch = orchestrator().play_turn(&s);
    let command = batch.get(&UnitId::new("s")).unwrap();
    let end = command.destination().unwrap();
    assert!(end.distance(&enemy) < start.distance(&enemy));
    // The enemy hex itself is occupied
    assert!(!command.path.contains(&enemy));
}

#[test]
fn test_idle_scout_holds_or_takes_one_step() {
    // Nothing to gather or fight; only the home tile is known
    let mut s = Snapshot::new(1, HexCoord::new(0, 0));
    s.home = vec![HexCoord::new(0, 0)];
    s.tiles = vec![Tile::new(HexCoord::new(0, 0), TerrainKind::Anthill, 1)];
    s.units = vec![Unit::new("c", UnitClass::Scout, HexCoord::new(0, 0))];

    let mut orch = orchestrator();
    let batch = orch.play_turn(&s);
    if let Some(command) = batch.get(&UnitId::new("c")) {
        assert!(command.path.len() <= 1);
    }
}

#[test]
fn test_roles_are_sticky_across_turns() {
    let mut orch = orchestrator();
    let ids = ["a", "b", "c", "d"];
    let mut s = field(1, 4);
    s.units = ids
        .iter()
        .enumerate()
        .map(|(i, id)| Unit::new(*id, UnitClass::Soldier, HexCoord::new(i as i32, -1)))
        .collect();

    orch.play_turn(&s);
    let first: Vec<Option<Role>> = ids.iter().map(|id| orch.memory().roles.get(&UnitId::new(*id))).collect();

    for turn in 2..6 {
        s.turn = turn;
        orch.clock().advance(Duration::from_secs(1));
        orch.play_turn(&s);
        let now: Vec<Option<Role>> = ids.iter().map(|id| orch.memory().roles.get(&UnitId::new(*id))).collect();
        assert_eq!(now, first);
    }
}

#[test]
fn test_two_workers_split_resources() {
    let mut s = field(1, 6);
    s.units = vec![
        Unit::new("w1", UnitClass::Worker, HexCoord::new(0, 0)),
        Unit::new("w2", UnitClass::Worker, HexCoord::new(0, 0)),
    ];
    s.resources = vec![
        ResourceNode::new(HexCoord::new(3, 0), ResourceKind::Apple, 5),
        ResourceNode::new(HexCoord::new(-3, 0), ResourceKind::Apple, 5),
    ];

    let batch = orchestrator().play_turn(&s);
    let a = batch.get(&UnitId::new("w1")).and_then(|c| c.destination());
    let b = batch.get(&UnitId::new("w2")).and_then(|c| c.destination());
    assert!(a.is_some() && b.is_some());
    assert_ne!(a, b);
}

#[test]
fn test_same_seed_replays_identically() {
    let run = |seed: u64| {
        let mut config = ColonyConfig::default();
        config.seed = seed;
        let mut orch = TurnOrchestrator::new(config, ManualClock::new()).unwrap();
        let mut s = field(1, 10);
        s.units = (0..6)
            .map(|i| Unit::new(format!("u{i}"), UnitClass::all()[i % 3], HexCoord::new(i as i32 - 3, 2)))
            .collect();
        s.enemies = vec![EnemyUnit::new(UnitClass::Soldier, HexCoord::new(6, -6))];
        (1..4)
            .map(|turn| {
                s.turn = turn;
                orch.play_turn(&s).to_json().unwrap()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn test_json_snapshot_round_trip_through_turn() {
    let json = r#"{
        "ants": [
            {"id": "w-1", "type": 0, "q": 3, "r": 0, "health": 130,
             "food": {"amount": 6, "type": 1}, "lastMove": [], "move": []}
        ],
        "enemies": [],
        "food": [],
        "home": [{"q": 0, "r": 0}],
        "map": [
            {"q": 0, "r": 0, "type": 1, "cost": 1},
            {"q": 1, "r": 0, "type": 2, "cost": 1},
            {"q": 2, "r": 0, "type": 3, "cost": 2},
            {"q": 3, "r": 0, "type": 2, "cost": 1}
        ],
        "spot": {"q": 0, "r": 0},
        "nextTurnIn": 1.5,
        "score": 0,
        "turnNo": 1
    }"#;
    let snapshot = Snapshot::from_json(json).unwrap();
    let batch = orchestrator().play_turn(&snapshot);
    assert_eq!(
        batch.to_json().unwrap(),
        r#"{"moves":[{"ant":"w-1","path":[{"q":2,"r":0},{"q":1,"r":0},{"q":0,"r":0}]}]}"#
    );
}

#[test]
fn test_recorded_snapshots_replay() {
    let mut orch = orchestrator();
    for name in ["data/snapshots/turn_001.json", "data/snapshots/turn_002.json"] {
        let json = std::fs::read_to_string(name).unwrap();
        let snapshot = Snapshot::from_json(&json).unwrap();
        let batch = orch.play_turn(&snapshot);

        for command in &batch.moves {
            let unit = snapshot.unit(&command.unit_id).unwrap();
            let cost = path_cost(orch.memory(), &command.path).unwrap();
            assert!(cost <= unit.speed(), "{} overspent: {}", unit.id, cost);
        }
        orch.clock().advance(Duration::from_secs_f64(snapshot.next_turn_in));
    }
    assert_eq!(orch.memory().last_turn(), Some(2));
    assert_eq!(orch.memory().home().len(), 3);
}

#[test]
fn test_declared_attack_sends_helpers_to_enemy_ring() {
    let structure = HexCoord::new(6, 0);
    let mut s = field(1, 8);
    for tile in s.tiles.iter_mut().filter(|t| t.coord == structure) {
        tile.kind = TerrainKind::Anthill;
    }
    s.units = vec![
        Unit::new("w1", UnitClass::Worker, HexCoord::new(0, 1)),
        Unit::new("w2", UnitClass::Worker, HexCoord::new(1, -1)),
    ];

    let mut config = ColonyConfig::default();
    config.roles.helper_probability = 1.0;
    let band = config.patrol.helper;
    let mut orch = TurnOrchestrator::new(config, ManualClock::new()).unwrap();
    orch.play_turn(&s);
    assert_eq!(orch.memory().designated_enemy_structure(), Some(structure));
    assert!(orch.declare_attack());

    s.turn = 2;
    let batch = orch.play_turn(&s);
    let mut slots = Vec::new();
    for id in ["w1", "w2"] {
        assert_eq!(orch.memory().roles.get(&UnitId::new(id)), Some(Role::Helper));
        let end = batch.get(&UnitId::new(id)).and_then(|c| c.destination()).unwrap();
        assert!((band.inner..=band.outer).contains(&end.distance(&structure)));
        slots.push(end);
    }
    assert_ne!(slots[0], slots[1]);
}

/// Tiles of the q in [0, 30], r in [-15, 15] arena a unit at `at` can see
fn arena_view(turn: u64, at: HexCoord) -> Snapshot {
    let home = HexCoord::new(15, 0);
    let mut s = Snapshot::new(turn, home);
    s.home = vec![home];
    s.tiles = disk(at, UnitClass::Scout.stats().view_range)
        .into_iter()
        .filter(|c| (0..=30).contains(&c.q) && (-15..=15).contains(&c.r))
        .map(|c| {
            let kind = if c == home { TerrainKind::Anthill } else { TerrainKind::Empty };
            Tile::new(c, kind, 1)
        })
        .collect();
    s.units = vec![Unit::new("c", UnitClass::Scout, at)];
    s
}

#[test]
fn test_scout_at_map_border_keeps_full_stride() {
    let config = ColonyConfig::default();
    let mut memory = WorldMemory::new(AttackWindow::new(config.attack.duration()));
    let mut engine = StrategyEngine::new(&config);
    let view = UnitClass::Scout.stats().view_range;
    let mut at = HexCoord::new(1, 0);
    let mut first_view = None;

    for turn in 1..=12 {
        let s = arena_view(turn, at);
        memory.merge(&s, Timestamp::default());
        first_view.get_or_insert(memory.known_tile_count());
        // Everything within sight is either known or off the map
        assert!(memory.frontier().iter().all(|h| h.distance(&at) > view));

        let occupancy = Occupancy::from_snapshot(&s);
        let ctx = DecisionContext::new(&s, &memory, &occupancy, &config, false);
        let order = engine.decide(&s.units[0], Role::Scout, &ctx, &mut TurnPlan::new());
        if order.decision.intent != Intent::Explore {
            break;
        }
        assert!(order.path.len() >= 2, "turn {turn}: stalled at {at}");
        assert!(order.path.iter().all(|h| memory.is_known(*h)));
        at = *order.path.last().unwrap();
    }
    assert!(Some(memory.known_tile_count()) > first_view);
}
