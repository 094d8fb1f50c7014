//! Validated per-turn world snapshot
//!
//! Conversion from the wire shape is all-or-nothing: one unknown enum code
//! anywhere rejects the whole snapshot, so ambiguous input never reaches
//! the world memory.

use std::collections::HashSet;

use crate::colony::resources::{ResourceKind, ResourceNode};
use crate::colony::unit_class::UnitClass;
use crate::colony::units::{EnemyUnit, Unit};
use crate::core::error::{ColonyError, Result};
use crate::core::types::{TurnNumber, UnitId};
use crate::grid::hex::HexCoord;
use crate::grid::terrain::{TerrainKind, Tile};
use crate::protocol::wire::{WireAnt, WireCargo, WireEnemy, WireSnapshot};

/// Everything the server told us this turn
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub units: Vec<Unit>,
    pub enemies: Vec<EnemyUnit>,
    pub resources: Vec<ResourceNode>,
    pub home: Vec<HexCoord>,
    pub tiles: Vec<Tile>,
    /// Main home hex (where new units appear)
    pub spot: HexCoord,
    /// Seconds until the next turn starts
    pub next_turn_in: f64,
    pub score: i64,
    pub turn: TurnNumber,
}

impl Snapshot {
    /// Empty snapshot centered on `spot`
    pub fn new(turn: TurnNumber, spot: HexCoord) -> Self {
        Self {
            units: Vec::new(),
            enemies: Vec::new(),
            resources: Vec::new(),
            home: Vec::new(),
            tiles: Vec::new(),
            spot,
            next_turn_in: 0.0,
            score: 0,
            turn,
        }
    }

    /// Parse and validate a snapshot from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let wire: WireSnapshot = serde_json::from_str(json)?;
        Snapshot::try_from(wire)
    }

    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| &u.id == id)
    }

    pub fn units_of(&self, class: UnitClass) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.class == class)
    }

    pub fn is_home(&self, coord: HexCoord) -> bool {
        self.home.contains(&coord)
    }
}

impl TryFrom<WireSnapshot> for Snapshot {
    type Error = ColonyError;

    fn try_from(wire: WireSnapshot) -> Result<Self> {
        let mut seen_ids = HashSet::new();
        let mut units = Vec::with_capacity(wire.ants.len());
        for ant in wire.ants {
            let unit = convert_ant(ant)?;
            if !seen_ids.insert(unit.id.clone()) {
                return Err(ColonyError::MalformedSnapshot(format!(
                    "duplicate unit id {}",
                    unit.id
                )));
            }
            units.push(unit);
        }

        let enemies = wire
            .enemies
            .into_iter()
            .map(convert_enemy)
            .collect::<Result<Vec<_>>>()?;

        let resources = wire
            .food
            .into_iter()
            .map(|f| {
                Ok(ResourceNode::new(
                    HexCoord::new(f.q, f.r),
                    ResourceKind::try_from(f.kind)?,
                    f.amount,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let tiles = wire
            .map
            .into_iter()
            .map(|t| {
                Ok(Tile::new(
                    HexCoord::new(t.q, t.r),
                    TerrainKind::try_from(t.kind)?,
                    t.cost,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let spot = match wire.spot.or_else(|| wire.home.first().copied()) {
            Some(spot) => spot,
            None => {
                return Err(ColonyError::MalformedSnapshot(
                    "snapshot has neither a spot nor home tiles".into(),
                ))
            }
        };

        Ok(Self {
            units,
            enemies,
            resources,
            home: wire.home,
            tiles,
            spot,
            next_turn_in: wire.next_turn_in,
            score: wire.score,
            turn: wire.turn_no,
        })
    }
}

fn convert_ant(ant: WireAnt) -> Result<Unit> {
    let class = UnitClass::try_from(ant.class)?;
    let (carried, carried_kind) = convert_cargo(ant.food)?;

    Ok(Unit {
        id: UnitId::new(ant.id),
        class,
        position: HexCoord::new(ant.q, ant.r),
        health: ant.health,
        carried,
        carried_kind,
        last_move: ant.last_move.unwrap_or_default(),
        pending_move: ant.pending_move.unwrap_or_default(),
        last_attack: ant.last_attack.and_then(|p| p.coord()),
        last_enemy: ant.last_enemy_ant,
    })
}

fn convert_enemy(enemy: WireEnemy) -> Result<EnemyUnit> {
    let class = UnitClass::try_from(enemy.class)?;
    let carried = match enemy.food {
        Some(cargo) => Some(convert_cargo(Some(cargo))?.0),
        None => None,
    };

    Ok(EnemyUnit {
        class,
        position: HexCoord::new(enemy.q, enemy.r),
        health: enemy.health,
        carried,
        attack: enemy.attack,
    })
}

/// Empty cargo may carry kind code 0; any non-empty cargo must name a real kind
fn convert_cargo(cargo: Option<WireCargo>) -> Result<(u32, Option<ResourceKind>)> {
    match cargo {
        Some(c) if c.amount > 0 => Ok((c.amount, Some(ResourceKind::try_from(c.kind)?))),
        _ => Ok((0, None)),
    }
}
