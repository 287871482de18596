//! Declarative per-frame scene descriptors consumed by rendering backends.
//!
//! The pipeline never draws; it describes. Each frame the renderer culls
//! the snapshot against the viewport and emits plain marker structs for the
//! backend to rasterize. Everything here is data so scene construction can
//! be asserted on in tests without a display surface.
//!
//! Game-object markers carry no hover state: the game layer is cached
//! between redraws while hover must track the pointer with zero latency,
//! so every hover visual belongs to the overlay, which redraws each frame.

use glam::Vec2;
use starweave_core::{
    BuildingKind, EmpireColor, FleetId, GalaxyId, PlanetId, PlanetKind, PortalId, Snapshot,
    StarColor, SurfaceGrid, SystemId, TerrainKind, ViewMode,
};

use crate::camera::Camera;
use crate::culling::ViewportCuller;
use crate::index::EntityIndex;
use crate::layers::FramePlan;
use crate::layout::PlanetProjection;

/// Fallback color for unowned objects in ownership overlays.
pub const NEUTRAL_COLOR: EmpireColor = EmpireColor::from_rgb(120, 120, 130);

/// Galaxy marker drawn in universe view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalaxyMarker {
    /// Galaxy the marker represents.
    pub id: GalaxyId,
    /// Center in world space.
    pub position: Vec2,
    /// Visual (and hit) radius in world units.
    pub radius: f32,
    /// Marker is the current selection.
    pub selected: bool,
}

/// Star system marker drawn in universe and galaxy views.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SystemMarker {
    /// System the marker represents.
    pub id: SystemId,
    /// Center in world space.
    pub position: Vec2,
    /// Color of the system's star; selects the glow sprite.
    pub star: StarColor,
    /// Ownership ring color, when the system is owned.
    pub owner_color: Option<EmpireColor>,
    /// Hostile crisis units are present; draws the threat ring.
    pub crisis: bool,
    /// Marker is the current selection.
    pub selected: bool,
}

/// Portal endpoint marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalMarker {
    /// Portal endpoint the marker represents.
    pub id: PortalId,
    /// Center in world space (the host system's position).
    pub position: Vec2,
}

/// Line connecting the two endpoints of a portal pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalLink {
    /// One endpoint in world space.
    pub from: Vec2,
    /// The paired endpoint in world space.
    pub to: Vec2,
}

/// In-transit fleet marker plus its travel lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FleetMarker {
    /// Fleet the marker represents.
    pub id: FleetId,
    /// Interpolated position along the lane in world space.
    pub position: Vec2,
    /// Lane start in world space.
    pub lane_from: Vec2,
    /// Lane end in world space.
    pub lane_to: Vec2,
    /// Owning empire's color.
    pub owner_color: EmpireColor,
}

/// Planet marker drawn in system view at its orbit projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetMarker {
    /// Projection shared with the hit tester.
    pub projection: PlanetProjection,
    /// Environment classification; selects the marker palette.
    pub kind: PlanetKind,
    /// Ownership ring color, when the planet is owned.
    pub owner_color: Option<EmpireColor>,
    /// Marker is the current selection.
    pub selected: bool,
}

/// Universe-view content: every visible galaxy plus system pins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniverseScene {
    /// Visible galaxies.
    pub galaxies: Vec<GalaxyMarker>,
    /// Visible systems, drawn as small pins inside their galaxies.
    pub systems: Vec<SystemMarker>,
    /// Visible portal endpoints.
    pub portals: Vec<PortalMarker>,
    /// Portal pair connections.
    pub links: Vec<PortalLink>,
}

/// Galaxy-view content: the focused galaxy's systems and traffic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalaxyScene {
    /// Galaxy in focus.
    pub galaxy: Option<GalaxyId>,
    /// Visible systems of the focused galaxy.
    pub systems: Vec<SystemMarker>,
    /// Visible portal endpoints within the galaxy.
    pub portals: Vec<PortalMarker>,
    /// Portal pair connections.
    pub links: Vec<PortalLink>,
    /// Fleets in transit, with their lanes.
    pub fleets: Vec<FleetMarker>,
}

/// System-view content: the star and its orbiting planet markers.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemScene {
    /// System in focus.
    pub system: SystemId,
    /// Star center in screen space.
    pub star_screen: Vec2,
    /// Color of the star; selects the glow sprite.
    pub star: StarColor,
    /// Orbit ring radii in world units.
    pub rings: Vec<f32>,
    /// Planet markers at their screen projections.
    pub planets: Vec<PlanetMarker>,
}

/// Single tile descriptor for planet-surface drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceTileMarker {
    /// Zero-based tile column.
    pub column: u32,
    /// Zero-based tile row.
    pub row: u32,
    /// Terrain occupying the tile.
    pub terrain: TerrainKind,
    /// Building occupying the tile, if any.
    pub building: Option<BuildingKind>,
}

/// Planet-view content, degrading gracefully while data is missing.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanetScene {
    /// Surface grid is loaded and drawable.
    Surface {
        /// Planet being shown.
        planet: PlanetId,
        /// Grid dimensions in tiles.
        columns: u32,
        /// Grid dimensions in tiles.
        rows: u32,
        /// Tile descriptors in row-major order.
        tiles: Vec<SurfaceTileMarker>,
    },
    /// Grid was requested and has not arrived; draw the placeholder.
    Loading {
        /// Planet whose grid is pending.
        planet: PlanetId,
    },
    /// No planet resolves; the game layer stays empty.
    Empty,
}

/// Game-object layer content for the active view mode.
#[derive(Clone, Debug, PartialEq)]
pub enum GameScene {
    /// Universe-view markers.
    Universe(UniverseScene),
    /// Galaxy-view markers.
    Galaxy(GalaxyScene),
    /// System-view markers.
    System(SystemScene),
    /// Planet-view surface description.
    Planet(PlanetScene),
    /// Nothing resolves for the active mode.
    Empty,
}

/// Visual accent drawn by the overlay under the hover ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverAccent {
    /// Hovered star system: the brightened glow sprite for its star color.
    SystemGlow(StarColor),
    /// Hovered portal endpoint: the brightened portal sprite.
    PortalGlow,
    /// Plain hover ring only.
    Ring,
}

/// Hover badge drawn by the overlay layer.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverBadge {
    /// Badge anchor in screen space.
    pub screen: Vec2,
    /// Short label (object name).
    pub label: String,
    /// Accent drawn under the ring at the anchor.
    pub accent: HoverAccent,
}

/// Overlay layer content, recomputed every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayScene {
    /// Hover highlight and tooltip, when an object is hovered.
    pub hover: Option<HoverBadge>,
}

/// Complete per-frame output of the pipeline.
#[derive(Clone, Debug)]
pub struct FrameScene {
    /// Which layers the backend must regenerate this frame.
    pub plan: FramePlan,
    /// Active view mode.
    pub mode: ViewMode,
    /// Camera transform at frame time.
    pub camera: Camera,
    /// Visible surface size in pixels.
    pub surface: Vec2,
    /// Game-object layer content.
    pub game: GameScene,
    /// Overlay layer content.
    pub overlay: OverlayScene,
    /// Whether decorative sprite assets have finished loading; when false
    /// backends use their direct-drawing fallback path.
    pub sprites_ready: bool,
}

fn owner_color(snapshot: &Snapshot, owner: Option<starweave_core::EmpireId>) -> Option<EmpireColor> {
    owner.map(|id| {
        snapshot
            .empire(id)
            .map_or(NEUTRAL_COLOR, |empire| empire.color)
    })
}

fn point(p: starweave_core::WorldPoint) -> Vec2 {
    Vec2::new(p.x, p.y)
}

/// System markers for every system in `systems`, culled to the viewport.
fn system_markers<'a>(
    snapshot: &Snapshot,
    systems: impl Iterator<Item = &'a starweave_core::SystemSnapshot>,
    index: &EntityIndex,
    culler: &mut ViewportCuller,
    selected: Option<SystemId>,
    hit_radius: f32,
) -> Vec<SystemMarker> {
    systems
        .filter_map(|system| {
            let position = point(system.position);
            if !culler.is_visible(position.x, position.y, hit_radius) {
                return None;
            }
            Some(SystemMarker {
                id: system.id,
                position,
                star: system.star,
                owner_color: owner_color(snapshot, system.owner),
                crisis: index.crisis_present(system.id),
                selected: selected == Some(system.id),
            })
        })
        .collect()
}

/// Portal markers and pair links for the portals in `portals`.
fn portal_markers<'a>(
    snapshot: &Snapshot,
    portals: impl Iterator<Item = &'a starweave_core::PortalSnapshot>,
    culler: &mut ViewportCuller,
    hit_radius: f32,
) -> (Vec<PortalMarker>, Vec<PortalLink>) {
    let mut markers = Vec::new();
    let mut links = Vec::new();
    for portal in portals {
        let Some(host) = snapshot.system(portal.system) else {
            continue;
        };
        let position = point(host.position);
        if culler.is_visible(position.x, position.y, hit_radius) {
            markers.push(PortalMarker {
                id: portal.id,
                position,
            });
        }
        // Emit each pair link once, from the lower-numbered endpoint.
        if portal.id < portal.paired {
            if let Some(far) = snapshot.system_of_portal(portal.paired) {
                links.push(PortalLink {
                    from: position,
                    to: point(far.position),
                });
            }
        }
    }
    (markers, links)
}

fn fleet_markers(
    snapshot: &Snapshot,
    galaxy: GalaxyId,
    culler: &mut ViewportCuller,
) -> Vec<FleetMarker> {
    snapshot
        .fleets
        .iter()
        .filter_map(|fleet| {
            let origin = snapshot.system(fleet.origin)?;
            if origin.galaxy != galaxy {
                return None;
            }
            let destination = snapshot.system(fleet.destination)?;
            let from = point(origin.position);
            let to = point(destination.position);
            let position = from.lerp(to, fleet.progress.clamp(0.0, 1.0));
            if !culler.is_visible(position.x, position.y, 8.0) {
                return None;
            }
            let color = snapshot
                .empire(fleet.owner)
                .map_or(NEUTRAL_COLOR, |empire| empire.color);
            Some(FleetMarker {
                id: fleet.id,
                position,
                lane_from: from,
                lane_to: to,
                owner_color: color,
            })
        })
        .collect()
}

/// Builds the universe-view scene, culled to the viewport.
pub fn build_universe_scene(
    snapshot: &Snapshot,
    index: &EntityIndex,
    culler: &mut ViewportCuller,
    selected: Option<starweave_core::ObjectRef>,
    portal_hit_radius: f32,
    system_hit_radius: f32,
) -> UniverseScene {
    let selected_galaxy = selected.and_then(|s| s.as_galaxy());
    let galaxies = snapshot
        .galaxies
        .iter()
        .filter_map(|galaxy| {
            let position = point(galaxy.position);
            if !culler.is_visible(position.x, position.y, galaxy.radius) {
                return None;
            }
            Some(GalaxyMarker {
                id: galaxy.id,
                position,
                radius: galaxy.radius,
                selected: selected_galaxy == Some(galaxy.id),
            })
        })
        .collect();

    let systems = system_markers(
        snapshot,
        snapshot.systems.iter(),
        index,
        culler,
        selected.and_then(|s| s.as_system()),
        system_hit_radius,
    );
    let (portals, links) = portal_markers(
        snapshot,
        snapshot.portals.iter(),
        culler,
        portal_hit_radius,
    );

    UniverseScene {
        galaxies,
        systems,
        portals,
        links,
    }
}

/// Builds the galaxy-view scene for the focused galaxy.
pub fn build_galaxy_scene(
    snapshot: &Snapshot,
    galaxy: GalaxyId,
    index: &EntityIndex,
    culler: &mut ViewportCuller,
    selected: Option<starweave_core::ObjectRef>,
    portal_hit_radius: f32,
    system_hit_radius: f32,
) -> GalaxyScene {
    let systems = system_markers(
        snapshot,
        snapshot.systems_in_galaxy(galaxy),
        index,
        culler,
        selected.and_then(|s| s.as_system()),
        system_hit_radius,
    );
    let galaxy_portals: Vec<_> = snapshot
        .portals
        .iter()
        .filter(|portal| {
            snapshot
                .system(portal.system)
                .is_some_and(|system| system.galaxy == galaxy)
        })
        .collect();
    let (portals, links) = portal_markers(
        snapshot,
        galaxy_portals.into_iter(),
        culler,
        portal_hit_radius,
    );
    let fleets = fleet_markers(snapshot, galaxy, culler);

    GalaxyScene {
        galaxy: Some(galaxy),
        systems,
        portals,
        links,
        fleets,
    }
}

/// Builds the system-view scene around precomputed planet projections.
pub fn build_system_scene(
    snapshot: &Snapshot,
    system: &starweave_core::SystemSnapshot,
    projections: &[PlanetProjection],
    camera: &Camera,
    surface: Vec2,
    selected: Option<starweave_core::ObjectRef>,
) -> SystemScene {
    let selected_planet = selected.and_then(|s| s.as_planet());

    let planets = projections
        .iter()
        .filter_map(|projection| {
            let planet = snapshot.planet(projection.planet)?;
            Some(PlanetMarker {
                projection: *projection,
                kind: planet.kind,
                owner_color: owner_color(snapshot, planet.owner),
                selected: selected_planet == Some(planet.id),
            })
        })
        .collect();

    let mut rings: Vec<f32> = projections.iter().map(|p| p.orbit_radius).collect();
    rings.sort_by(f32::total_cmp);
    rings.dedup();

    SystemScene {
        system: system.id,
        star_screen: camera.world_to_screen(point(system.position), surface),
        star: system.star,
        rings,
        planets,
    }
}

/// Builds the planet-surface scene from a loaded grid.
#[must_use]
pub fn build_surface_scene(grid: &SurfaceGrid) -> PlanetScene {
    let mut tiles = Vec::with_capacity(grid.tiles.len());
    for row in 0..grid.rows {
        for column in 0..grid.columns {
            if let Some(tile) = grid.tile(column, row) {
                tiles.push(SurfaceTileMarker {
                    column,
                    row,
                    terrain: tile.terrain,
                    building: tile.building.map(|building| building.kind),
                });
            }
        }
    }
    PlanetScene::Surface {
        planet: grid.planet,
        columns: grid.columns,
        rows: grid.rows,
        tiles,
    }
}
