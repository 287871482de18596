//! Camera state and the world↔screen affine transform.
//!
//! The camera owns a position in world space and a damped zoom. Zoom never
//! jumps: [`Camera::set_target_zoom`] records an intent and [`Camera::tick`]
//! converges toward it every frame, snapping exactly once the remaining
//! delta drops below the configured epsilon so the value cannot drift at
//! sub-pixel magnitudes forever.

use glam::Vec2;

use crate::config::RendererConfig;

/// Point the camera can be asked to center on.
///
/// Galaxy and system objects expose world-space positions; planet markers in
/// system view only exist as screen projections of the orbit layout. The
/// caller supplies whichever the selected object exposes and the camera
/// never re-derives one representation from the other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraTarget {
    /// A position in world space.
    World(Vec2),
    /// A position already projected to screen space.
    Projected(Vec2),
}

/// Camera position, zoom, and zoom target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    position: Vec2,
    zoom: f32,
    target_zoom: f32,
}

impl Camera {
    /// Creates a camera at the origin with the provided initial zoom.
    #[must_use]
    pub fn new(initial_zoom: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: initial_zoom,
            target_zoom: initial_zoom,
        }
    }

    /// World-space position at the center of the view.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current interpolated zoom level.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Zoom level the camera is converging toward.
    #[must_use]
    pub const fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    /// Pans the camera by a screen-space delta.
    ///
    /// The delta is divided by the current zoom so a drag tracks the pointer
    /// one-to-one regardless of magnification.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if self.zoom <= f32::EPSILON {
            return;
        }
        self.position += Vec2::new(dx, dy) / self.zoom;
    }

    /// Sets the zoom target, clamped to the configured range.
    pub fn set_target_zoom(&mut self, zoom: f32, config: &RendererConfig) {
        self.target_zoom = zoom.clamp(config.min_zoom, config.max_zoom);
    }

    /// Applies a multiplicative factor to the zoom target, clamped.
    pub fn zoom_by(&mut self, factor: f32, config: &RendererConfig) {
        let factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            1.0
        };
        self.set_target_zoom(self.target_zoom * factor, config);
    }

    /// Immediately adopts the provided zoom for both value and target.
    pub fn snap_zoom(&mut self, zoom: f32, config: &RendererConfig) {
        let zoom = zoom.clamp(config.min_zoom, config.max_zoom);
        self.zoom = zoom;
        self.target_zoom = zoom;
    }

    /// Advances the zoom interpolation one frame.
    ///
    /// Once the remaining delta falls below `zoom_snap_epsilon` the zoom is
    /// set exactly to the target.
    pub fn tick(&mut self, config: &RendererConfig) {
        let delta = self.target_zoom - self.zoom;
        if delta.abs() < config.zoom_snap_epsilon {
            self.zoom = self.target_zoom;
            return;
        }
        self.zoom += delta * config.zoom_damping;
    }

    /// Centers the view on the provided target.
    ///
    /// `surface` is the visible surface size in pixels; it anchors the
    /// screen→world mapping for projected targets.
    pub fn center_on(&mut self, target: CameraTarget, surface: Vec2) {
        match target {
            CameraTarget::World(point) => self.position = point,
            CameraTarget::Projected(point) => {
                self.position = self.screen_to_world(point, surface);
            }
        }
    }

    /// Maps a world-space point to screen space under the current transform.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2, surface: Vec2) -> Vec2 {
        (world - self.position) * self.zoom + surface * 0.5
    }

    /// Maps a screen-space point to world space under the current transform.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2, surface: Vec2) -> Vec2 {
        if self.zoom <= f32::EPSILON {
            return self.position;
        }
        (screen - surface * 0.5) / self.zoom + self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RendererConfig {
        RendererConfig::default()
    }

    #[test]
    fn zoom_converges_exactly_to_target_within_bounded_steps() {
        let config = config();
        let mut camera = Camera::new(0.5);
        camera.set_target_zoom(2.0, &config);

        let mut steps = 0;
        while (camera.zoom() - 2.0).abs() > 0.0 {
            camera.tick(&config);
            steps += 1;
            assert!(steps < 200, "zoom must converge in a bounded step count");
        }

        assert_eq!(camera.zoom(), 2.0, "zoom must snap exactly to the target");
        camera.tick(&config);
        assert_eq!(camera.zoom(), 2.0, "no residual drift after convergence");
    }

    #[test]
    fn target_zoom_is_clamped_not_rejected() {
        let config = config();
        let mut camera = Camera::new(1.0);
        camera.set_target_zoom(1000.0, &config);
        assert_eq!(camera.target_zoom(), config.max_zoom);
        camera.set_target_zoom(0.0, &config);
        assert_eq!(camera.target_zoom(), config.min_zoom);
    }

    #[test]
    fn zoom_by_applies_multiplicative_factor() {
        let config = config();
        let mut camera = Camera::new(1.0);
        camera.zoom_by(2.0, &config);
        assert!((camera.target_zoom() - 2.0).abs() < f32::EPSILON);
        camera.zoom_by(f32::NAN, &config);
        assert!((camera.target_zoom() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn pan_scales_screen_delta_by_zoom() {
        let config = config();
        let mut camera = Camera::new(2.0);
        camera.snap_zoom(2.0, &config);
        camera.pan(10.0, -4.0);
        assert_eq!(camera.position(), Vec2::new(5.0, -2.0));
    }

    #[test]
    fn world_and_screen_transforms_are_inverse() {
        let config = config();
        let surface = Vec2::new(800.0, 600.0);
        let mut camera = Camera::new(1.5);
        camera.snap_zoom(1.5, &config);
        camera.center_on(CameraTarget::World(Vec2::new(120.0, -60.0)), surface);

        let world = Vec2::new(200.0, 40.0);
        let screen = camera.world_to_screen(world, surface);
        let restored = camera.screen_to_world(screen, surface);
        assert!((restored - world).length() < 1e-4);
    }

    #[test]
    fn center_on_world_point_places_it_mid_screen() {
        let surface = Vec2::new(800.0, 600.0);
        let mut camera = Camera::new(1.0);
        camera.center_on(CameraTarget::World(Vec2::new(55.0, 77.0)), surface);
        let screen = camera.world_to_screen(Vec2::new(55.0, 77.0), surface);
        assert!((screen - surface * 0.5).length() < 1e-5);
    }

    #[test]
    fn center_on_projected_point_uses_current_transform() {
        let surface = Vec2::new(800.0, 600.0);
        let mut camera = Camera::new(1.0);
        // A marker drawn at the screen center must leave the camera in place.
        camera.center_on(CameraTarget::Projected(surface * 0.5), surface);
        assert_eq!(camera.position(), Vec2::ZERO);

        // A marker drawn 100 px right of center sits 100 world units away
        // at zoom 1, so centering on it moves the camera there.
        camera.center_on(
            CameraTarget::Projected(surface * 0.5 + Vec2::new(100.0, 0.0)),
            surface,
        );
        assert!((camera.position() - Vec2::new(100.0, 0.0)).length() < 1e-4);
    }
}
