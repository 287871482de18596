//! Pointer hit testing and click classification.
//!
//! Hover resolution is throttled: only every
//! [`RendererConfig::hover_throttle_divisor`]-th pointer-move event pays
//! for a full hit test, the rest reuse the cached result. Hit priority is
//! fixed per view mode so overlapping markers resolve deterministically.
//!
//! [`RendererConfig::hover_throttle_divisor`]: crate::config::RendererConfig

use glam::Vec2;
use starweave_core::{GalaxyId, ObjectRef, PlanetId, PortalId, Snapshot, SystemId, ViewMode};

use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::layout::PlanetProjection;

/// What a single click should do, decided before any state mutates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// System view claimed the click: drill into the planet and mark it
    /// as the current planet.
    DrillToPlanet(PlanetId),
    /// The hit object becomes the selection; galaxy and system hits also
    /// transition the view mode.
    Select(ObjectRef),
    /// Nothing under the pointer.
    Ignore,
}

/// Everything hit testing needs about the current frame.
#[derive(Clone, Copy)]
pub struct HitContext<'a> {
    /// Snapshot the markers were built from.
    pub snapshot: &'a Snapshot,
    /// Active view mode; decides the candidate set and priority order.
    pub mode: ViewMode,
    /// Galaxy in focus; restricts candidates in galaxy view.
    pub focus_galaxy: Option<GalaxyId>,
    /// Camera used to project candidate world positions.
    pub camera: &'a Camera,
    /// Visible surface size in pixels.
    pub surface: Vec2,
    /// Planet projections from the current scene build; system view tests
    /// against exactly these, never a recomputed layout.
    pub projections: &'a [PlanetProjection],
}

/// Resolves the topmost object under a pointer position.
///
/// Portal and system markers use fixed screen-pixel radii from the config
/// (deliberately larger than the drawn marker); galaxies use their own
/// world-space radius. Universe view tests portals, then systems, then
/// galaxies; galaxy view stops after systems; system view tests the
/// orbiting planet projections only.
#[must_use]
pub fn hit_test(
    ctx: &HitContext<'_>,
    pointer_screen: Vec2,
    pointer_world: Vec2,
    config: &RendererConfig,
) -> Option<ObjectRef> {
    match ctx.mode {
        ViewMode::Universe => hit_portal(ctx, pointer_screen, config)
            .or_else(|| hit_system(ctx, pointer_screen, config))
            .or_else(|| hit_galaxy(ctx, pointer_world)),
        ViewMode::Galaxy => hit_portal(ctx, pointer_screen, config)
            .or_else(|| hit_system(ctx, pointer_screen, config)),
        ViewMode::System => hit_planet(ctx, pointer_screen, config),
        ViewMode::Planet => None,
    }
}

fn in_focus(ctx: &HitContext<'_>, galaxy: GalaxyId) -> bool {
    match ctx.mode {
        ViewMode::Galaxy => ctx.focus_galaxy == Some(galaxy),
        _ => true,
    }
}

fn hit_portal(
    ctx: &HitContext<'_>,
    pointer_screen: Vec2,
    config: &RendererConfig,
) -> Option<ObjectRef> {
    ctx.snapshot
        .portals
        .iter()
        .filter_map(|portal| {
            let host = ctx.snapshot.system(portal.system)?;
            if !in_focus(ctx, host.galaxy) {
                return None;
            }
            let screen = ctx
                .camera
                .world_to_screen(Vec2::new(host.position.x, host.position.y), ctx.surface);
            (screen.distance(pointer_screen) <= config.portal_hit_radius)
                .then_some(ObjectRef::Portal(portal.id))
        })
        .next()
}

fn hit_system(
    ctx: &HitContext<'_>,
    pointer_screen: Vec2,
    config: &RendererConfig,
) -> Option<ObjectRef> {
    ctx.snapshot
        .systems
        .iter()
        .filter_map(|system| {
            if !in_focus(ctx, system.galaxy) {
                return None;
            }
            let screen = ctx
                .camera
                .world_to_screen(Vec2::new(system.position.x, system.position.y), ctx.surface);
            (screen.distance(pointer_screen) <= config.system_hit_radius)
                .then_some(ObjectRef::System(system.id))
        })
        .next()
}

fn hit_galaxy(ctx: &HitContext<'_>, pointer_world: Vec2) -> Option<ObjectRef> {
    ctx.snapshot
        .galaxies
        .iter()
        .filter_map(|galaxy| {
            let center = Vec2::new(galaxy.position.x, galaxy.position.y);
            (center.distance(pointer_world) <= galaxy.radius)
                .then_some(ObjectRef::Galaxy(galaxy.id))
        })
        .next()
}

fn hit_planet(
    ctx: &HitContext<'_>,
    pointer_screen: Vec2,
    config: &RendererConfig,
) -> Option<ObjectRef> {
    ctx.projections
        .iter()
        .filter_map(|projection| {
            (projection.screen.distance(pointer_screen) <= config.planet_hit_radius)
                .then_some(ObjectRef::Planet(projection.planet))
        })
        .next()
}

/// Classifies a click against the hit result, before any state changes.
///
/// System view drills into planet markers instead of selecting them; all
/// other hits select.
#[must_use]
pub fn classify_click(mode: ViewMode, hit: Option<ObjectRef>) -> ClickAction {
    match (mode, hit) {
        (ViewMode::System, Some(ObjectRef::Planet(planet))) => ClickAction::DrillToPlanet(planet),
        (_, Some(object)) => ClickAction::Select(object),
        (_, None) => ClickAction::Ignore,
    }
}

/// System that owns the paired endpoint of `portal`, for the double-click
/// jump. `None` if the portal or its pair is missing from the snapshot.
#[must_use]
pub fn portal_jump_target(snapshot: &Snapshot, portal: PortalId) -> Option<SystemId> {
    let endpoint = snapshot.portal(portal)?;
    snapshot.system_of_portal(endpoint.paired).map(|s| s.id)
}

/// Cached hover state plus the pointer-move throttle counter.
#[derive(Debug, Default)]
pub struct HoverTracker {
    move_events: u64,
    hovered: Option<ObjectRef>,
}

impl HoverTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered object, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<ObjectRef> {
        self.hovered
    }

    /// Records a pointer-move event, re-running the hit test only on
    /// every `hover_throttle_divisor`-th call. Returns the hover result
    /// in effect after this event (cached on throttled events).
    pub fn pointer_moved(
        &mut self,
        ctx: &HitContext<'_>,
        pointer_screen: Vec2,
        pointer_world: Vec2,
        config: &RendererConfig,
    ) -> Option<ObjectRef> {
        self.move_events = self.move_events.wrapping_add(1);
        if self.move_events % u64::from(config.hover_throttle_divisor) == 0 {
            self.hovered = hit_test(ctx, pointer_screen, pointer_world, config);
        }
        self.hovered
    }

    /// Drops the cached hover, e.g. when the view mode changes and the
    /// previous result no longer describes anything on screen.
    pub fn clear(&mut self) {
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starweave_core::{
        GalaxySnapshot, PortalSnapshot, StarColor, SystemSnapshot, WorldPoint,
    };

    fn snapshot() -> Snapshot {
        Snapshot {
            tick: 1,
            galaxies: vec![GalaxySnapshot {
                id: GalaxyId::new(1),
                name: "g".to_owned(),
                position: WorldPoint::new(0.0, 0.0),
                radius: 300.0,
            }],
            systems: vec![
                SystemSnapshot {
                    id: SystemId::new(1),
                    galaxy: GalaxyId::new(1),
                    name: "a".to_owned(),
                    position: WorldPoint::new(0.0, 0.0),
                    star: StarColor::Yellow,
                    owner: None,
                },
                SystemSnapshot {
                    id: SystemId::new(2),
                    galaxy: GalaxyId::new(1),
                    name: "b".to_owned(),
                    position: WorldPoint::new(200.0, 0.0),
                    star: StarColor::Red,
                    owner: None,
                },
            ],
            portals: vec![
                PortalSnapshot {
                    id: PortalId::new(1),
                    system: SystemId::new(1),
                    paired: PortalId::new(2),
                },
                PortalSnapshot {
                    id: PortalId::new(2),
                    system: SystemId::new(2),
                    paired: PortalId::new(1),
                },
            ],
            ..Snapshot::default()
        }
    }

    fn context<'a>(
        snapshot: &'a Snapshot,
        mode: ViewMode,
        camera: &'a Camera,
        projections: &'a [PlanetProjection],
    ) -> HitContext<'a> {
        HitContext {
            snapshot,
            mode,
            focus_galaxy: Some(GalaxyId::new(1)),
            camera,
            surface: Vec2::new(800.0, 600.0),
            projections,
        }
    }

    #[test]
    fn portal_wins_over_system_at_the_same_position() {
        let snapshot = snapshot();
        let camera = Camera::new(1.0);
        let config = RendererConfig::default();
        let ctx = context(&snapshot, ViewMode::Galaxy, &camera, &[]);

        // System 1 hosts portal 1; the pointer sits on both.
        let screen = camera.world_to_screen(Vec2::ZERO, ctx.surface);
        let world = Vec2::ZERO;
        assert_eq!(
            hit_test(&ctx, screen, world, &config),
            Some(ObjectRef::Portal(PortalId::new(1)))
        );
    }

    #[test]
    fn galaxies_are_hit_only_in_universe_mode() {
        let snapshot = snapshot();
        let camera = Camera::new(1.0);
        let config = RendererConfig::default();

        // A point inside the galaxy radius but away from any marker.
        let world = Vec2::new(100.0, 100.0);
        let screen = camera.world_to_screen(world, Vec2::new(800.0, 600.0));

        let universe = context(&snapshot, ViewMode::Universe, &camera, &[]);
        assert_eq!(
            hit_test(&universe, screen, world, &config),
            Some(ObjectRef::Galaxy(GalaxyId::new(1)))
        );

        let galaxy = context(&snapshot, ViewMode::Galaxy, &camera, &[]);
        assert_eq!(hit_test(&galaxy, screen, world, &config), None);
    }

    #[test]
    fn system_mode_tests_only_planet_projections() {
        let snapshot = snapshot();
        let camera = Camera::new(1.0);
        let config = RendererConfig::default();
        let projections = [PlanetProjection {
            planet: PlanetId::new(7),
            screen: Vec2::new(300.0, 300.0),
            orbit_radius: 60.0,
        }];
        let ctx = context(&snapshot, ViewMode::System, &camera, &projections);

        assert_eq!(
            hit_test(&ctx, Vec2::new(305.0, 300.0), Vec2::ZERO, &config),
            Some(ObjectRef::Planet(PlanetId::new(7)))
        );
        // The system marker itself is not a candidate in system view.
        let on_star = camera.world_to_screen(Vec2::ZERO, ctx.surface);
        assert_eq!(hit_test(&ctx, on_star, Vec2::ZERO, &config), None);
    }

    #[test]
    fn clicks_drill_planets_in_system_view_and_select_elsewhere() {
        assert_eq!(
            classify_click(ViewMode::System, Some(ObjectRef::Planet(PlanetId::new(3)))),
            ClickAction::DrillToPlanet(PlanetId::new(3))
        );
        assert_eq!(
            classify_click(ViewMode::Galaxy, Some(ObjectRef::Planet(PlanetId::new(3)))),
            ClickAction::Select(ObjectRef::Planet(PlanetId::new(3)))
        );
        assert_eq!(classify_click(ViewMode::Universe, None), ClickAction::Ignore);
    }

    #[test]
    fn portal_jump_resolves_the_paired_endpoints_system() {
        let snapshot = snapshot();
        assert_eq!(
            portal_jump_target(&snapshot, PortalId::new(1)),
            Some(SystemId::new(2))
        );
        assert_eq!(portal_jump_target(&snapshot, PortalId::new(9)), None);
    }

    #[test]
    fn hover_recomputes_only_on_the_throttle_boundary() {
        let snapshot = snapshot();
        let camera = Camera::new(1.0);
        let config = RendererConfig::default();
        let ctx = context(&snapshot, ViewMode::Galaxy, &camera, &[]);
        let mut tracker = HoverTracker::new();

        let on_marker = camera.world_to_screen(Vec2::ZERO, ctx.surface);
        // First event is throttled (divisor 2): cache stays empty.
        assert_eq!(
            tracker.pointer_moved(&ctx, on_marker, Vec2::ZERO, &config),
            None
        );
        // Second event recomputes and finds the portal.
        assert_eq!(
            tracker.pointer_moved(&ctx, on_marker, Vec2::ZERO, &config),
            Some(ObjectRef::Portal(PortalId::new(1)))
        );
        // Third event moves off the marker but reuses the cache.
        assert_eq!(
            tracker.pointer_moved(&ctx, Vec2::new(9_999.0, 0.0), Vec2::ZERO, &config),
            Some(ObjectRef::Portal(PortalId::new(1)))
        );
    }
}
