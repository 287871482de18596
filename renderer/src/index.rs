//! Per-tick derived lookup tables over the snapshot.
//!
//! The index is rebuilt wholesale whenever the snapshot's tick counter
//! changes and reused across frames otherwise; it is never incrementally
//! updated.

use std::collections::HashMap;

use starweave_core::{EntityKind, EntityLocation, EntitySnapshot, PlanetId, Snapshot, SystemId};

/// Derived lookup tables built once per simulation tick.
#[derive(Clone, Debug, Default)]
pub struct EntityIndex {
    built_for_tick: Option<u64>,
    entities_by_planet: HashMap<PlanetId, Vec<EntitySnapshot>>,
    crisis_by_system: HashMap<SystemId, u32>,
}

impl EntityIndex {
    /// Creates an empty index that has observed no snapshot yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the tables when the snapshot tick advanced; otherwise a no-op.
    ///
    /// Returns `true` when a rebuild happened.
    pub fn refresh(&mut self, snapshot: &Snapshot) -> bool {
        if self.built_for_tick == Some(snapshot.tick) {
            return false;
        }

        self.entities_by_planet.clear();
        self.crisis_by_system.clear();

        for entity in &snapshot.entities {
            match entity.location {
                EntityLocation::Planet(planet) => {
                    self.entities_by_planet.entry(planet).or_default().push(*entity);
                }
                EntityLocation::System(system) => {
                    if matches!(entity.kind, EntityKind::Crisis) {
                        *self.crisis_by_system.entry(system).or_insert(0) += 1;
                    }
                }
            }
        }

        self.built_for_tick = Some(snapshot.tick);
        true
    }

    /// Tick the tables were last built for, if any.
    #[must_use]
    pub const fn built_for_tick(&self) -> Option<u64> {
        self.built_for_tick
    }

    /// Entities stationed on the provided planet, in snapshot order.
    #[must_use]
    pub fn entities_on(&self, planet: PlanetId) -> &[EntitySnapshot] {
        self.entities_by_planet
            .get(&planet)
            .map_or(&[], Vec::as_slice)
    }

    /// Whether any hostile crisis unit is present in the provided system.
    #[must_use]
    pub fn crisis_present(&self, system: SystemId) -> bool {
        self.crisis_by_system.contains_key(&system)
    }

    /// Number of hostile crisis units present in the provided system.
    #[must_use]
    pub fn crisis_count(&self, system: SystemId) -> u32 {
        self.crisis_by_system.get(&system).copied().unwrap_or(0)
    }
}
