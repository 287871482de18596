//! Focus resolution: which concrete entity does the active view render?
//!
//! Galaxy and system resolution share the same three-step fallback:
//! a selection of the matching kind wins, then a selection carrying a
//! parent reference of that kind resolves through it, then the first
//! entity of the kind in the snapshot. The last resort is intentionally
//! arbitrary but deterministic: snapshot vector order. Planet resolution
//! prefers the sticky planet over the generic selection.
//!
//! Every function returns `None` when the snapshot holds no entity of the
//! requested kind; callers skip drawing for that frame without erroring.

use starweave_core::{
    GalaxySnapshot, ObjectRef, PlanetSnapshot, Snapshot, SystemSnapshot,
};

use crate::view::ViewState;

/// Resolves the galaxy in focus for universe/galaxy rendering.
#[must_use]
pub fn resolve_galaxy<'a>(snapshot: &'a Snapshot, view: &ViewState) -> Option<&'a GalaxySnapshot> {
    if let Some(selected) = view.selected {
        match selected {
            ObjectRef::Galaxy(id) => {
                if let Some(galaxy) = snapshot.galaxy(id) {
                    return Some(galaxy);
                }
            }
            ObjectRef::System(id) => {
                if let Some(galaxy) = snapshot.galaxy_of_system(id) {
                    return Some(galaxy);
                }
            }
            ObjectRef::Planet(id) => {
                if let Some(galaxy) = snapshot
                    .system_of_planet(id)
                    .and_then(|system| snapshot.galaxy(system.galaxy))
                {
                    return Some(galaxy);
                }
            }
            ObjectRef::Portal(id) => {
                if let Some(galaxy) = snapshot
                    .system_of_portal(id)
                    .and_then(|system| snapshot.galaxy(system.galaxy))
                {
                    return Some(galaxy);
                }
            }
            ObjectRef::Fleet(id) => {
                if let Some(galaxy) = snapshot
                    .fleets
                    .iter()
                    .find(|fleet| fleet.id == id)
                    .and_then(|fleet| snapshot.galaxy_of_system(fleet.origin))
                {
                    return Some(galaxy);
                }
            }
        }
    }
    snapshot.first_galaxy()
}

/// Resolves the system in focus for system rendering.
#[must_use]
pub fn resolve_system<'a>(snapshot: &'a Snapshot, view: &ViewState) -> Option<&'a SystemSnapshot> {
    if let Some(selected) = view.selected {
        match selected {
            ObjectRef::System(id) => {
                if let Some(system) = snapshot.system(id) {
                    return Some(system);
                }
            }
            ObjectRef::Planet(id) => {
                if let Some(system) = snapshot.system_of_planet(id) {
                    return Some(system);
                }
            }
            ObjectRef::Portal(id) => {
                if let Some(system) = snapshot.system_of_portal(id) {
                    return Some(system);
                }
            }
            ObjectRef::Fleet(id) => {
                if let Some(system) = snapshot
                    .fleets
                    .iter()
                    .find(|fleet| fleet.id == id)
                    .and_then(|fleet| snapshot.system(fleet.origin))
                {
                    return Some(system);
                }
            }
            ObjectRef::Galaxy(id) => {
                // A galaxy selection focuses the first system it contains.
                if let Some(system) = snapshot.systems_in_galaxy(id).next() {
                    return Some(system);
                }
            }
        }
    }
    snapshot.first_system()
}

/// Resolves the planet in focus for planet rendering.
///
/// The sticky planet wins over the generic selection so returning to planet
/// view re-shows the last inspected planet.
#[must_use]
pub fn resolve_planet<'a>(snapshot: &'a Snapshot, view: &ViewState) -> Option<&'a PlanetSnapshot> {
    if let Some(sticky) = view.current_planet {
        if let Some(planet) = snapshot.planet(sticky) {
            return Some(planet);
        }
    }
    if let Some(id) = view.selected.and_then(|selected| selected.as_planet()) {
        if let Some(planet) = snapshot.planet(id) {
            return Some(planet);
        }
    }
    snapshot.first_planet()
}

#[cfg(test)]
mod tests {
    use super::*;
    use starweave_core::{
        EmpireId, GalaxyId, PlanetId, PlanetKind, StarColor, SystemId, WorldPoint,
    };

    fn galaxy(id: u32) -> GalaxySnapshot {
        GalaxySnapshot {
            id: GalaxyId::new(id),
            name: format!("galaxy-{id}"),
            position: WorldPoint::new(0.0, 0.0),
            radius: 50.0,
        }
    }

    fn system(id: u32, galaxy: u32) -> SystemSnapshot {
        SystemSnapshot {
            id: SystemId::new(id),
            galaxy: GalaxyId::new(galaxy),
            name: format!("system-{id}"),
            position: WorldPoint::new(0.0, 0.0),
            star: StarColor::Yellow,
            owner: None::<EmpireId>,
        }
    }

    fn planet(id: u32, system: u32) -> PlanetSnapshot {
        PlanetSnapshot {
            id: PlanetId::new(id),
            system: SystemId::new(system),
            name: format!("planet-{id}"),
            orbit: 0,
            kind: PlanetKind::Terran,
            owner: None,
        }
    }

    #[test]
    fn empty_snapshot_resolves_to_none() {
        let snapshot = Snapshot::default();
        let view = ViewState::new();
        assert!(resolve_galaxy(&snapshot, &view).is_none());
        assert!(resolve_system(&snapshot, &view).is_none());
        assert!(resolve_planet(&snapshot, &view).is_none());
    }

    #[test]
    fn system_selection_resolves_its_parent_galaxy() {
        let snapshot = Snapshot {
            galaxies: vec![galaxy(1)],
            systems: vec![system(10, 1)],
            ..Snapshot::default()
        };
        let mut view = ViewState::new();
        view.select(ObjectRef::System(SystemId::new(10)));

        let resolved = resolve_galaxy(&snapshot, &view).expect("galaxy resolves");
        assert_eq!(resolved.id, GalaxyId::new(1));
    }

    #[test]
    fn matching_kind_selection_wins_over_snapshot_order() {
        let snapshot = Snapshot {
            galaxies: vec![galaxy(1), galaxy(2)],
            ..Snapshot::default()
        };
        let mut view = ViewState::new();
        view.select(ObjectRef::Galaxy(GalaxyId::new(2)));

        let resolved = resolve_galaxy(&snapshot, &view).expect("galaxy resolves");
        assert_eq!(resolved.id, GalaxyId::new(2));
    }

    #[test]
    fn unresolvable_selection_falls_back_to_first_in_snapshot() {
        let snapshot = Snapshot {
            galaxies: vec![galaxy(1), galaxy(2)],
            ..Snapshot::default()
        };
        let mut view = ViewState::new();
        view.select(ObjectRef::System(SystemId::new(999)));

        let resolved = resolve_galaxy(&snapshot, &view).expect("fallback applies");
        assert_eq!(resolved.id, GalaxyId::new(1), "first in snapshot order");
    }

    #[test]
    fn planet_selection_resolves_its_parent_system() {
        let snapshot = Snapshot {
            galaxies: vec![galaxy(1)],
            systems: vec![system(10, 1), system(11, 1)],
            planets: vec![planet(100, 11)],
            ..Snapshot::default()
        };
        let mut view = ViewState::new();
        view.select(ObjectRef::Planet(PlanetId::new(100)));

        let resolved = resolve_system(&snapshot, &view).expect("system resolves");
        assert_eq!(resolved.id, SystemId::new(11));
    }

    #[test]
    fn sticky_planet_wins_over_generic_selection() {
        let snapshot = Snapshot {
            systems: vec![system(10, 1)],
            planets: vec![planet(100, 10), planet(101, 10)],
            ..Snapshot::default()
        };
        let mut view = ViewState::new();
        view.select(ObjectRef::Planet(PlanetId::new(101)));
        view.select(ObjectRef::System(SystemId::new(10)));

        let resolved = resolve_planet(&snapshot, &view).expect("planet resolves");
        assert_eq!(resolved.id, PlanetId::new(101), "sticky planet preserved");
    }

    #[test]
    fn stale_sticky_planet_falls_back_to_selection_then_first() {
        let snapshot = Snapshot {
            systems: vec![system(10, 1)],
            planets: vec![planet(100, 10)],
            ..Snapshot::default()
        };
        let mut view = ViewState::new();
        view.current_planet = Some(PlanetId::new(999));

        let resolved = resolve_planet(&snapshot, &view).expect("fallback applies");
        assert_eq!(resolved.id, PlanetId::new(100));
    }
}
