#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Layered scene renderer for the Starweave client.
//!
//! The renderer turns periodic read-only [`Snapshot`]s into declarative
//! [`FrameScene`]s, one per frame, without touching a graphics API. It owns
//! the camera, the viewport culler, the per-tick entity index, the layer
//! compositor with its dirty tracking, hover and click resolution, and the
//! on-demand planet surface store. Backends (see the macroquad adapter)
//! rasterize the scene and feed pointer input back through the handler
//! methods; hosts drain [`Intent`]s via [`Renderer::take_intents`].

pub mod assets;
pub mod camera;
pub mod config;
pub mod culling;
pub mod hit;
pub mod index;
pub mod layers;
pub mod layout;
pub mod resolver;
pub mod scene;
pub mod sprites;
pub mod surface;
pub mod view;

use glam::Vec2;
use starweave_core::{Intent, ObjectRef, Snapshot, SurfaceGrid, ViewMode};

use crate::assets::AssetBarrier;
use crate::camera::{Camera, CameraTarget};
use crate::config::{ConfigError, RendererConfig};
use crate::culling::{CullingStats, ViewportCuller};
use crate::hit::{ClickAction, HitContext, HoverTracker};
use crate::index::EntityIndex;
use crate::layers::{DirtyStamp, LayerCompositor};
use crate::layout::PlanetProjection;
use crate::scene::{FrameScene, GameScene, HoverAccent, HoverBadge, OverlayScene, PlanetScene};
use crate::surface::{SurfaceLookup, SurfaceStore};
use crate::view::ViewState;

/// Source of per-frame elapsed time, injected so tests can step frames
/// deterministically.
pub trait FrameClock {
    /// Seconds elapsed since the previous frame.
    fn frame_delta(&mut self) -> f32;
}

/// Fixed-delta clock for tests and headless runs.
#[derive(Clone, Copy, Debug)]
pub struct ManualClock {
    delta: f32,
}

impl ManualClock {
    /// Creates a clock that reports `delta` seconds every frame.
    #[must_use]
    pub const fn new(delta: f32) -> Self {
        Self { delta }
    }

    /// Changes the reported per-frame delta.
    pub fn set_delta(&mut self, delta: f32) {
        self.delta = delta;
    }
}

impl FrameClock for ManualClock {
    fn frame_delta(&mut self) -> f32 {
        self.delta
    }
}

/// Simulation-side collaborator the frame loop talks to.
///
/// This is the renderer's only coupling to whatever produces snapshots: a
/// game client, a replay reader, or the demo host in the CLI.
pub trait RendererHost {
    /// Latest snapshot, if a new one is available since the last poll.
    fn poll_snapshot(&mut self) -> Option<Snapshot>;
    /// Receives a user intent emitted by the renderer.
    fn on_intent(&mut self, intent: Intent);
    /// Surface grid answering an earlier `SurfaceDataNeeded`, if ready.
    fn take_surface_grid(&mut self) -> Option<SurfaceGrid>;
}

/// Camera damping advances in fixed steps so its feel does not depend on
/// the frame rate.
const CAMERA_STEP_SECONDS: f32 = 1.0 / 60.0;
const MAX_CAMERA_STEPS: f32 = 8.0;
/// Fraction of the surface left as margin by [`Renderer::request_fit`].
const FIT_MARGIN: f32 = 0.9;

/// The scene pipeline: snapshot in, [`FrameScene`] out, intents queued.
#[derive(Debug)]
pub struct Renderer {
    config: RendererConfig,
    camera: Camera,
    view: ViewState,
    culler: ViewportCuller,
    index: EntityIndex,
    compositor: LayerCompositor,
    hover: HoverTracker,
    surfaces: SurfaceStore,
    assets: AssetBarrier,
    intents: Vec<Intent>,
    /// Planet projections from the most recent system-view scene build;
    /// the hit tester queries exactly these.
    projections: Vec<PlanetProjection>,
    surface_size: Vec2,
}

impl Renderer {
    /// Creates a renderer in universe mode.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration fails validation.
    pub fn new(config: RendererConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = Camera::new(config.default_zoom(ViewMode::Universe));
        Ok(Self {
            config,
            camera,
            view: ViewState::new(),
            culler: ViewportCuller::new(),
            index: EntityIndex::new(),
            compositor: LayerCompositor::new(),
            hover: HoverTracker::new(),
            surfaces: SurfaceStore::new(),
            assets: AssetBarrier::new(0),
            intents: Vec::new(),
            projections: Vec::new(),
            surface_size: Vec2::new(1.0, 1.0),
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Current navigation state.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current camera transform.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Accumulated culling counters.
    #[must_use]
    pub const fn culling_stats(&self) -> CullingStats {
        self.culler.stats()
    }

    /// Total game-layer redraws, for idempotence assertions.
    #[must_use]
    pub const fn game_redraws(&self) -> u64 {
        self.compositor.game_redraws()
    }

    /// Asset barrier for the backend's sprite bootstrap.
    pub fn assets_mut(&mut self) -> &mut AssetBarrier {
        &mut self.assets
    }

    /// Declares how many decorative assets the backend will load.
    pub fn expect_assets(&mut self, expected: usize) {
        self.assets = AssetBarrier::new(expected);
    }

    /// Runs the frame pipeline and describes what to draw.
    ///
    /// Order matters: the camera advances first, the entity index refreshes
    /// only when the tick moved, the compositor plans layer redraws from
    /// the resulting dirty stamp, and the scene for the active mode is
    /// culled against the updated viewport.
    pub fn begin_frame(&mut self, snapshot: &Snapshot, surface: Vec2, dt: f32) -> FrameScene {
        self.surface_size = surface;
        self.advance_camera(dt);
        if self.index.refresh(snapshot) {
            log::trace!("entity index rebuilt for tick {}", snapshot.tick);
        }
        self.view.hovered = self.hover.hovered();

        let stamp = DirtyStamp {
            tick: snapshot.tick,
            camera_position: self.camera.position(),
            zoom: self.camera.zoom(),
            mode: self.view.mode,
            selection: self.view.selected,
        };
        let plan = self.compositor.plan(&stamp, &self.config);
        self.culler.update_bounds(&self.camera, surface, &self.config);

        let game = self.build_game_scene(snapshot, surface);
        let overlay = self.build_overlay(snapshot, surface);

        if plan.redraw_background {
            self.compositor.note_background_redrawn();
        }
        if plan.redraw_game {
            self.compositor.note_game_redrawn(stamp);
        }

        FrameScene {
            plan,
            mode: self.view.mode,
            camera: self.camera,
            surface,
            game,
            overlay,
            sprites_ready: self.assets.is_ready(),
        }
    }

    fn advance_camera(&mut self, dt: f32) {
        let steps = if dt.is_finite() && dt > 0.0 {
            (dt / CAMERA_STEP_SECONDS).ceil().min(MAX_CAMERA_STEPS) as u32
        } else {
            1
        };
        for _ in 0..steps {
            self.camera.tick(&self.config);
        }
    }

    fn build_game_scene(&mut self, snapshot: &Snapshot, surface: Vec2) -> GameScene {
        self.projections.clear();
        match self.view.mode {
            ViewMode::Universe => GameScene::Universe(scene::build_universe_scene(
                snapshot,
                &self.index,
                &mut self.culler,
                self.view.selected,
                self.config.portal_hit_radius,
                self.config.system_hit_radius,
            )),
            ViewMode::Galaxy => match resolver::resolve_galaxy(snapshot, &self.view) {
                Some(galaxy) => GameScene::Galaxy(scene::build_galaxy_scene(
                    snapshot,
                    galaxy.id,
                    &self.index,
                    &mut self.culler,
                    self.view.selected,
                    self.config.portal_hit_radius,
                    self.config.system_hit_radius,
                )),
                None => GameScene::Empty,
            },
            ViewMode::System => match resolver::resolve_system(snapshot, &self.view) {
                Some(system) => {
                    self.projections = layout::project_system_planets(
                        system,
                        snapshot.planets_in_system(system.id),
                        &self.camera,
                        surface,
                        self.compositor.animation_frame(),
                    );
                    GameScene::System(scene::build_system_scene(
                        snapshot,
                        system,
                        &self.projections,
                        &self.camera,
                        surface,
                        self.view.selected,
                    ))
                }
                None => GameScene::Empty,
            },
            ViewMode::Planet => GameScene::Planet(self.build_planet_scene(snapshot)),
        }
    }

    fn build_planet_scene(&mut self, snapshot: &Snapshot) -> PlanetScene {
        let Some(planet) = resolver::resolve_planet(snapshot, &self.view) else {
            return PlanetScene::Empty;
        };
        match self.surfaces.lookup(planet.id) {
            SurfaceLookup::Loaded(grid) => scene::build_surface_scene(grid),
            SurfaceLookup::RequestNeeded => {
                log::debug!("requesting surface grid for planet {}", planet.id.get());
                self.intents.push(Intent::SurfaceDataNeeded { planet: planet.id });
                PlanetScene::Loading { planet: planet.id }
            }
            SurfaceLookup::Pending => PlanetScene::Loading { planet: planet.id },
        }
    }

    fn build_overlay(&self, snapshot: &Snapshot, surface: Vec2) -> OverlayScene {
        let Some(hovered) = self.view.hovered else {
            return OverlayScene::default();
        };
        let hover = match hovered {
            ObjectRef::Galaxy(id) => snapshot.galaxy(id).map(|galaxy| HoverBadge {
                screen: self.camera.world_to_screen(
                    Vec2::new(galaxy.position.x, galaxy.position.y),
                    surface,
                ),
                label: galaxy.name.clone(),
                accent: HoverAccent::Ring,
            }),
            ObjectRef::System(id) => snapshot.system(id).map(|system| HoverBadge {
                screen: self.camera.world_to_screen(
                    Vec2::new(system.position.x, system.position.y),
                    surface,
                ),
                label: system.name.clone(),
                accent: HoverAccent::SystemGlow(system.star),
            }),
            ObjectRef::Planet(id) => self
                .projections
                .iter()
                .find(|projection| projection.planet == id)
                .and_then(|projection| {
                    let planet = snapshot.planet(id)?;
                    let stationed = self.index.entities_on(id).len();
                    let label = if stationed > 0 {
                        format!("{} ({stationed} stationed)", planet.name)
                    } else {
                        planet.name.clone()
                    };
                    Some(HoverBadge {
                        screen: projection.screen,
                        label,
                        accent: HoverAccent::Ring,
                    })
                }),
            ObjectRef::Portal(id) => snapshot.portal(id).and_then(|portal| {
                let host = snapshot.system_of_portal(id)?;
                let far = snapshot.system_of_portal(portal.paired)?;
                Some(HoverBadge {
                    screen: self.camera.world_to_screen(
                        Vec2::new(host.position.x, host.position.y),
                        surface,
                    ),
                    label: format!("Portal to {}", far.name),
                    accent: HoverAccent::PortalGlow,
                })
            }),
            ObjectRef::Fleet(_) => None,
        };
        OverlayScene { hover }
    }

    /// Records a pointer move and refreshes the (throttled) hover state.
    pub fn pointer_moved(&mut self, snapshot: &Snapshot, screen: Vec2) {
        let world = self.camera.screen_to_world(screen, self.surface_size);
        let focus_galaxy = resolver::resolve_galaxy(snapshot, &self.view).map(|galaxy| galaxy.id);
        let ctx = HitContext {
            snapshot,
            mode: self.view.mode,
            focus_galaxy,
            camera: &self.camera,
            surface: self.surface_size,
            projections: &self.projections,
        };
        self.view.hovered = self.hover.pointer_moved(&ctx, screen, world, &self.config);
    }

    fn hit_at(&self, snapshot: &Snapshot, screen: Vec2) -> Option<ObjectRef> {
        let world = self.camera.screen_to_world(screen, self.surface_size);
        let focus_galaxy = resolver::resolve_galaxy(snapshot, &self.view).map(|galaxy| galaxy.id);
        let ctx = HitContext {
            snapshot,
            mode: self.view.mode,
            focus_galaxy,
            camera: &self.camera,
            surface: self.surface_size,
            projections: &self.projections,
        };
        hit::hit_test(&ctx, screen, world, &self.config)
    }

    /// Dispatches a single click.
    ///
    /// System view drills into planet markers; elsewhere the hit object
    /// becomes the selection, and galaxy or system hits also transition the
    /// view mode toward them. In planet view clicks land on surface tiles.
    pub fn pointer_clicked(&mut self, snapshot: &Snapshot, screen: Vec2) {
        if self.view.mode == ViewMode::Planet {
            self.click_surface_tile(snapshot, screen);
            return;
        }
        let hit = self.hit_at(snapshot, screen);
        match hit::classify_click(self.view.mode, hit) {
            ClickAction::DrillToPlanet(planet) => {
                let object = ObjectRef::Planet(planet);
                self.view.select(object);
                self.intents.push(Intent::SelectionChanged { object });
                self.set_mode(snapshot, ViewMode::Planet, None);
            }
            ClickAction::Select(object) => {
                self.view.select(object);
                self.intents.push(Intent::SelectionChanged { object });
                match object {
                    ObjectRef::Galaxy(id) => {
                        let target = snapshot.galaxy(id).map(|galaxy| {
                            CameraTarget::World(Vec2::new(galaxy.position.x, galaxy.position.y))
                        });
                        self.set_mode(snapshot, ViewMode::Galaxy, target);
                    }
                    ObjectRef::System(id) => {
                        let target = snapshot.system(id).map(|system| {
                            CameraTarget::World(Vec2::new(system.position.x, system.position.y))
                        });
                        self.set_mode(snapshot, ViewMode::System, target);
                    }
                    ObjectRef::Planet(_) | ObjectRef::Portal(_) | ObjectRef::Fleet(_) => {}
                }
            }
            ClickAction::Ignore => {}
        }
    }

    fn click_surface_tile(&mut self, snapshot: &Snapshot, screen: Vec2) {
        let Some(planet) = resolver::resolve_planet(snapshot, &self.view) else {
            return;
        };
        let Some(grid) = self.surfaces.get(planet.id) else {
            return;
        };
        let Some((column, row)) =
            layout::surface_tile_at(grid.columns, grid.rows, self.surface_size, screen)
        else {
            return;
        };
        let Some(tile) = grid.tile(column, row) else {
            return;
        };
        self.intents.push(Intent::TileClicked {
            planet: planet.id,
            column,
            row,
            terrain: tile.terrain,
            building: tile.building,
        });
    }

    /// Dispatches a double click.
    ///
    /// On a portal this jumps selection and camera to the paired
    /// endpoint's system, bypassing single-click semantics; anywhere else
    /// it behaves like a single click.
    pub fn double_clicked(&mut self, snapshot: &Snapshot, screen: Vec2) {
        if let Some(ObjectRef::Portal(portal)) = self.hit_at(snapshot, screen) {
            if let Some(system) = hit::portal_jump_target(snapshot, portal) {
                let object = ObjectRef::System(system);
                self.view.select(object);
                self.intents.push(Intent::SelectionChanged { object });
                let target = snapshot.system(system).map(|far| {
                    CameraTarget::World(Vec2::new(far.position.x, far.position.y))
                });
                self.set_mode(snapshot, ViewMode::System, target);
                return;
            }
        }
        self.pointer_clicked(snapshot, screen);
    }

    /// Records a host-driven selection, e.g. from an out-of-band UI list.
    ///
    /// Planet selections also update the sticky current planet, exactly as
    /// pointer-driven selections do.
    pub fn select(&mut self, object: ObjectRef) {
        self.view.select(object);
        self.intents.push(Intent::SelectionChanged { object });
    }

    /// Pans the camera by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.camera.pan(dx, dy);
    }

    /// Applies a multiplicative zoom adjustment toward the pointer-neutral
    /// center and reports it to the host.
    pub fn wheel_zoom(&mut self, factor: f32) {
        self.camera.zoom_by(factor, &self.config);
        self.intents.push(Intent::ZoomAdjustRequested { factor });
    }

    /// Switches the view mode, recentering the camera on the mode's anchor
    /// and default zoom unless a more specific target is supplied.
    ///
    /// Entering planet mode without a resolvable planet is valid; the game
    /// layer simply renders empty.
    pub fn set_mode(&mut self, snapshot: &Snapshot, mode: ViewMode, target: Option<CameraTarget>) {
        self.view.mode = mode;
        self.hover.clear();
        self.view.hovered = None;
        let anchor =
            target.unwrap_or_else(|| CameraTarget::World(self.mode_anchor(snapshot, mode)));
        self.camera.center_on(anchor, self.surface_size);
        self.camera
            .snap_zoom(self.config.default_zoom(mode), &self.config);
        self.intents.push(Intent::ViewModeChangeRequested { mode });
        log::debug!("view mode set to {mode:?}");
    }

    fn mode_anchor(&self, snapshot: &Snapshot, mode: ViewMode) -> Vec2 {
        match mode {
            ViewMode::Universe => universe_center(snapshot),
            ViewMode::Galaxy => resolver::resolve_galaxy(snapshot, &self.view)
                .map_or(Vec2::ZERO, |galaxy| {
                    Vec2::new(galaxy.position.x, galaxy.position.y)
                }),
            ViewMode::System | ViewMode::Planet => {
                resolver::resolve_system(snapshot, &self.view).map_or(Vec2::ZERO, |system| {
                    Vec2::new(system.position.x, system.position.y)
                })
            }
        }
    }

    /// Fits the camera to the focused content and reports it to the host.
    pub fn request_fit(&mut self, snapshot: &Snapshot) {
        if let Some((center, extent)) = self.focus_bounds(snapshot) {
            self.camera.center_on(CameraTarget::World(center), self.surface_size);
            let zoom = if extent.x <= f32::EPSILON || extent.y <= f32::EPSILON {
                self.config.default_zoom(self.view.mode)
            } else {
                (self.surface_size.x / extent.x).min(self.surface_size.y / extent.y) * FIT_MARGIN
            };
            self.camera.snap_zoom(zoom, &self.config);
        }
        self.intents.push(Intent::FitViewRequested);
    }

    fn focus_bounds(&self, snapshot: &Snapshot) -> Option<(Vec2, Vec2)> {
        match self.view.mode {
            ViewMode::Universe => bounds_of(snapshot.galaxies.iter().map(|galaxy| {
                (
                    Vec2::new(galaxy.position.x, galaxy.position.y),
                    galaxy.radius,
                )
            })),
            ViewMode::Galaxy => {
                let galaxy = resolver::resolve_galaxy(snapshot, &self.view)?;
                bounds_of(snapshot.systems_in_galaxy(galaxy.id).map(|system| {
                    (
                        Vec2::new(system.position.x, system.position.y),
                        self.config.system_hit_radius,
                    )
                }))
            }
            ViewMode::System => {
                let system = resolver::resolve_system(snapshot, &self.view)?;
                let outermost = snapshot
                    .planets_in_system(system.id)
                    .map(|planet| layout::orbit_radius(planet.orbit))
                    .fold(layout::ORBIT_BASE_RADIUS, f32::max);
                let center = Vec2::new(system.position.x, system.position.y);
                let extent = Vec2::splat(2.0 * (outermost + layout::ORBIT_RING_SPACING));
                Some((center, extent))
            }
            ViewMode::Planet => None,
        }
    }

    /// Notifies the pipeline that the drawable surface changed size.
    pub fn resize(&mut self, surface: Vec2) {
        if surface != self.surface_size {
            self.surface_size = surface;
            self.compositor.invalidate_background();
            self.compositor.invalidate_game();
        }
    }

    /// Stores a surface grid answering an earlier `SurfaceDataNeeded`.
    pub fn provide_surface(&mut self, grid: SurfaceGrid) {
        self.surfaces.provide(grid);
        self.compositor.invalidate_game();
    }

    /// Drains the queued user intents for delivery to the host.
    #[must_use]
    pub fn take_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }
}

fn universe_center(snapshot: &Snapshot) -> Vec2 {
    bounds_of(snapshot.galaxies.iter().map(|galaxy| {
        (
            Vec2::new(galaxy.position.x, galaxy.position.y),
            galaxy.radius,
        )
    }))
    .map_or(Vec2::ZERO, |(center, _)| center)
}

/// Center and extent of the bounding box around `(center, radius)` circles.
fn bounds_of(circles: impl Iterator<Item = (Vec2, f32)>) -> Option<(Vec2, Vec2)> {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut any = false;
    for (center, radius) in circles {
        any = true;
        min = min.min(center - Vec2::splat(radius));
        max = max.max(center + Vec2::splat(radius));
    }
    any.then(|| ((min + max) * 0.5, max - min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_reports_its_fixed_delta() {
        let mut clock = ManualClock::new(1.0 / 60.0);
        assert!((clock.frame_delta() - 1.0 / 60.0).abs() < f32::EPSILON);
        clock.set_delta(0.5);
        assert!((clock.frame_delta() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn bounds_of_circles_cover_their_extents() {
        let circles = [
            (Vec2::new(-10.0, 0.0), 5.0),
            (Vec2::new(10.0, 0.0), 5.0),
        ];
        let (center, extent) = bounds_of(circles.into_iter()).unwrap();
        assert_eq!(center, Vec2::ZERO);
        assert_eq!(extent, Vec2::new(30.0, 10.0));
    }

    #[test]
    fn empty_bounds_are_none() {
        assert!(bounds_of(std::iter::empty()).is_none());
    }
}
