//! Deterministic demo host standing in for a real game client.
//!
//! Generates a small procedural universe from a seed, advances the tick on
//! a wall-clock cadence, and answers surface requests after a simulated
//! network delay so the loading placeholder actually shows up.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starweave_core::{
    BuildingKind, BuildingRef, EmpireColor, EmpireId, EmpireSnapshot, EntityId, EntityKind,
    EntityLocation, EntitySnapshot, FleetId, FleetSnapshot, GalaxyId, GalaxySnapshot, GameEvent,
    Intent, PlanetId, PlanetKind, PlanetSnapshot, PortalId, PortalSnapshot, Snapshot, StarColor,
    SurfaceGrid, SurfaceTile, SystemId, SystemSnapshot, TerrainKind, WorldPoint,
};
use starweave_renderer::RendererHost;

/// Simulated round-trip before a requested surface grid arrives.
const SURFACE_DELAY: Duration = Duration::from_millis(600);
const SURFACE_COLUMNS: u32 = 12;
const SURFACE_ROWS: u32 = 8;
const EVENT_BACKLOG: usize = 8;

const GALAXY_NAMES: [&str; 3] = ["Heliotrope", "Cinder Veil", "Lattice"];
const EMPIRES: [(&str, EmpireColor); 3] = [
    ("Meridian Combine", EmpireColor::from_rgb(64, 160, 224)),
    ("Veldt Ascendancy", EmpireColor::from_rgb(224, 144, 48)),
    ("Korrin Accord", EmpireColor::from_rgb(96, 200, 112)),
];

const STAR_COLORS: [StarColor; 5] = StarColor::ALL;
const PLANET_KINDS: [PlanetKind; 6] = [
    PlanetKind::Terran,
    PlanetKind::Ocean,
    PlanetKind::Desert,
    PlanetKind::Ice,
    PlanetKind::Gas,
    PlanetKind::Barren,
];
const BUILDING_KINDS: [BuildingKind; 5] = [
    BuildingKind::Mine,
    BuildingKind::Habitat,
    BuildingKind::SpacePort,
    BuildingKind::ShieldGenerator,
    BuildingKind::Laboratory,
];

/// Seeded stand-in for the simulation side of the host contract.
pub(crate) struct DemoHost {
    rng: ChaCha8Rng,
    seed: u64,
    snapshot: Snapshot,
    tick_interval: Duration,
    last_tick: Instant,
    fresh: bool,
    pending_surfaces: VecDeque<(Instant, PlanetId)>,
}

impl DemoHost {
    pub(crate) fn new(seed: u64, tick_interval: Duration) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let snapshot = generate_universe(&mut rng);
        Self {
            rng,
            seed,
            snapshot,
            tick_interval,
            last_tick: Instant::now(),
            fresh: true,
            pending_surfaces: VecDeque::new(),
        }
    }

    fn advance(&mut self) {
        self.snapshot.tick += 1;
        for fleet in &mut self.snapshot.fleets {
            fleet.progress += self.rng.gen_range(0.02..0.06);
            if fleet.progress >= 1.0 {
                // Arrived: turn around and head back.
                std::mem::swap(&mut fleet.origin, &mut fleet.destination);
                fleet.progress = 0.0;
                self.snapshot.events.push(GameEvent {
                    tick: self.snapshot.tick,
                    message: "Fleet reached its destination".to_owned(),
                    subject: Some(starweave_core::ObjectRef::Fleet(fleet.id)),
                });
            }
        }
        let overflow = self.snapshot.events.len().saturating_sub(EVENT_BACKLOG);
        if overflow > 0 {
            let _ = self.snapshot.events.drain(..overflow);
        }
    }
}

impl RendererHost for DemoHost {
    fn poll_snapshot(&mut self) -> Option<Snapshot> {
        if self.fresh {
            self.fresh = false;
            return Some(self.snapshot.clone());
        }
        if self.last_tick.elapsed() >= self.tick_interval {
            self.last_tick = Instant::now();
            self.advance();
            return Some(self.snapshot.clone());
        }
        None
    }

    fn on_intent(&mut self, intent: Intent) {
        match intent {
            Intent::SurfaceDataNeeded { planet } => {
                log::info!("surface requested for planet {}", planet.get());
                self.pending_surfaces
                    .push_back((Instant::now() + SURFACE_DELAY, planet));
            }
            other => log::info!("user intent: {other:?}"),
        }
    }

    fn take_surface_grid(&mut self) -> Option<SurfaceGrid> {
        let (due, _) = self.pending_surfaces.front()?;
        if Instant::now() < *due {
            return None;
        }
        let (_, planet) = self.pending_surfaces.pop_front()?;
        Some(generate_surface(&self.snapshot, planet, self.seed))
    }
}

fn generate_universe(rng: &mut ChaCha8Rng) -> Snapshot {
    let mut snapshot = Snapshot {
        tick: 1,
        ..Snapshot::default()
    };

    for (index, (name, color)) in EMPIRES.iter().enumerate() {
        snapshot.empires.push(EmpireSnapshot {
            id: EmpireId::new(index as u32 + 1),
            name: (*name).to_owned(),
            color: *color,
        });
    }

    let mut next_system = 1u32;
    let mut next_planet = 1u32;
    for (index, name) in GALAXY_NAMES.iter().enumerate() {
        let angle = index as f32 * std::f32::consts::TAU / GALAXY_NAMES.len() as f32
            + rng.gen_range(-0.3..0.3);
        let distance = rng.gen_range(1_200.0..1_800.0);
        let galaxy = GalaxySnapshot {
            id: GalaxyId::new(index as u32 + 1),
            name: (*name).to_owned(),
            position: WorldPoint::new(angle.cos() * distance, angle.sin() * distance),
            radius: rng.gen_range(320.0..460.0),
        };

        let systems = rng.gen_range(5..=8);
        for _ in 0..systems {
            let theta = rng.gen_range(0.0..std::f32::consts::TAU);
            let reach = rng.gen_range(0.15..0.85) * galaxy.radius;
            let owner = if rng.gen_bool(0.5) {
                Some(EmpireId::new(rng.gen_range(1..=EMPIRES.len() as u32)))
            } else {
                None
            };
            let system = SystemSnapshot {
                id: SystemId::new(next_system),
                galaxy: galaxy.id,
                name: format!("{} {}", name, next_system),
                position: WorldPoint::new(
                    galaxy.position.x + theta.cos() * reach,
                    galaxy.position.y + theta.sin() * reach,
                ),
                star: STAR_COLORS[rng.gen_range(0..STAR_COLORS.len())],
                owner,
            };
            next_system += 1;

            let planets = rng.gen_range(1..=4);
            for orbit in 0..planets {
                let planet_owner = match system.owner {
                    Some(owner) if rng.gen_bool(0.7) => Some(owner),
                    _ => None,
                };
                snapshot.planets.push(PlanetSnapshot {
                    id: PlanetId::new(next_planet),
                    system: system.id,
                    name: format!("{} {}", system.name, ["I", "II", "III", "IV"][orbit as usize]),
                    orbit: orbit as u8,
                    kind: PLANET_KINDS[rng.gen_range(0..PLANET_KINDS.len())],
                    owner: planet_owner,
                });
                next_planet += 1;
            }
            snapshot.systems.push(system);
        }
        snapshot.galaxies.push(galaxy);
    }

    link_portals(&mut snapshot, rng);
    seed_entities(&mut snapshot, rng);
    seed_fleets(&mut snapshot, rng);

    snapshot.events.push(GameEvent {
        tick: 1,
        message: "Contact reestablished with the frontier".to_owned(),
        subject: None,
    });
    snapshot
}

/// One portal pair between each neighboring pair of galaxies.
fn link_portals(snapshot: &mut Snapshot, rng: &mut ChaCha8Rng) {
    let mut next_portal = 1u32;
    for pair in snapshot.galaxies.windows(2) {
        let near: Vec<SystemId> = snapshot
            .systems_in_galaxy(pair[0].id)
            .map(|system| system.id)
            .collect();
        let far: Vec<SystemId> = snapshot
            .systems_in_galaxy(pair[1].id)
            .map(|system| system.id)
            .collect();
        let (Some(&near_system), Some(&far_system)) = (
            pick(rng, &near),
            pick(rng, &far),
        ) else {
            continue;
        };
        let a = PortalId::new(next_portal);
        let b = PortalId::new(next_portal + 1);
        next_portal += 2;
        snapshot.portals.push(PortalSnapshot {
            id: a,
            system: near_system,
            paired: b,
        });
        snapshot.portals.push(PortalSnapshot {
            id: b,
            system: far_system,
            paired: a,
        });
    }
}

fn pick<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.gen_range(0..items.len()))
    }
}

/// Crisis units on a couple of systems plus structures on owned planets.
fn seed_entities(snapshot: &mut Snapshot, rng: &mut ChaCha8Rng) {
    let mut next_entity = 1u32;
    let system_ids: Vec<SystemId> = snapshot.systems.iter().map(|system| system.id).collect();
    for _ in 0..2 {
        if let Some(&system) = pick(rng, &system_ids) {
            snapshot.entities.push(EntitySnapshot {
                id: EntityId::new(next_entity),
                kind: EntityKind::Crisis,
                owner: None,
                location: EntityLocation::System(system),
            });
            next_entity += 1;
        }
    }
    let owned: Vec<(PlanetId, EmpireId)> = snapshot
        .planets
        .iter()
        .filter_map(|planet| planet.owner.map(|owner| (planet.id, owner)))
        .collect();
    for (planet, owner) in owned {
        if !rng.gen_bool(0.6) {
            continue;
        }
        snapshot.entities.push(EntitySnapshot {
            id: EntityId::new(next_entity),
            kind: EntityKind::Structure(BUILDING_KINDS[rng.gen_range(0..BUILDING_KINDS.len())]),
            owner: Some(owner),
            location: EntityLocation::Planet(planet),
        });
        next_entity += 1;
    }
}

fn seed_fleets(snapshot: &mut Snapshot, rng: &mut ChaCha8Rng) {
    for index in 0..3u32 {
        let systems: Vec<SystemId> = snapshot.systems.iter().map(|system| system.id).collect();
        let (Some(&origin), Some(&destination)) = (pick(rng, &systems), pick(rng, &systems))
        else {
            continue;
        };
        if origin == destination {
            continue;
        }
        let owner = EmpireId::new(rng.gen_range(1..=EMPIRES.len() as u32));
        snapshot.fleets.push(FleetSnapshot {
            id: FleetId::new(index + 1),
            owner,
            origin,
            destination,
            progress: rng.gen_range(0.0..0.8),
        });
    }
}

/// Deterministic per-planet surface: the same planet always charts the
/// same grid, independent of request order.
fn generate_surface(snapshot: &Snapshot, planet: PlanetId, seed: u64) -> SurfaceGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ (u64::from(planet.get()) << 17));
    let owner = snapshot.planet(planet).and_then(|p| p.owner);
    let mut tiles = Vec::with_capacity((SURFACE_COLUMNS * SURFACE_ROWS) as usize);
    let mut next_entity = planet.get().wrapping_mul(1_000).wrapping_add(10_000);
    for _ in 0..SURFACE_COLUMNS * SURFACE_ROWS {
        let terrain = match rng.gen_range(0..10) {
            0..=3 => TerrainKind::Plains,
            4..=5 => TerrainKind::Hills,
            6 => TerrainKind::Mountain,
            7 => TerrainKind::Water,
            8 => TerrainKind::Crystal,
            _ => TerrainKind::Wasteland,
        };
        let buildable = matches!(terrain, TerrainKind::Plains | TerrainKind::Hills);
        let building = if buildable && owner.is_some() && rng.gen_bool(0.15) {
            let building = BuildingRef {
                entity: EntityId::new(next_entity),
                kind: BUILDING_KINDS[rng.gen_range(0..BUILDING_KINDS.len())],
            };
            next_entity = next_entity.wrapping_add(1);
            Some(building)
        } else {
            None
        };
        tiles.push(SurfaceTile { terrain, building });
    }
    SurfaceGrid {
        planet,
        columns: SURFACE_COLUMNS,
        rows: SURFACE_ROWS,
        tiles,
    }
}
