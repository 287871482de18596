//! Viewport bounds derivation and per-object visibility queries.
//!
//! Bounds must be refreshed once per frame, before any visibility query in
//! that frame; querying stale bounds across a camera change is a bug in the
//! caller. The padding margin tolerates large-radius objects (galaxies,
//! ownership rings) that would otherwise pop at the viewport edge.

use glam::Vec2;

use crate::camera::Camera;
use crate::config::RendererConfig;

/// Visible world-space rectangle, already expanded by the padding margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBounds {
    /// Smallest visible x coordinate.
    pub min_x: f32,
    /// Smallest visible y coordinate.
    pub min_y: f32,
    /// Largest visible x coordinate.
    pub max_x: f32,
    /// Largest visible y coordinate.
    pub max_y: f32,
}

impl ViewportBounds {
    /// Constructs bounds from explicit corners plus a padding margin.
    #[must_use]
    pub fn padded(min_x: f32, min_y: f32, max_x: f32, max_y: f32, padding: f32) -> Self {
        Self {
            min_x: min_x - padding,
            min_y: min_y - padding,
            max_x: max_x + padding,
            max_y: max_y + padding,
        }
    }

    /// Pure AABB test for a circle at `(x, y)` with the provided radius.
    #[must_use]
    pub fn intersects_circle(&self, x: f32, y: f32, radius: f32) -> bool {
        x + radius >= self.min_x
            && x - radius <= self.max_x
            && y + radius >= self.min_y
            && y - radius <= self.max_y
    }
}

/// Diagnostic counters accumulated across visibility queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CullingStats {
    /// Total visibility queries answered.
    pub queried: u64,
    /// Queries answered "not visible".
    pub culled: u64,
}

/// Computes the visible world rectangle each frame and answers queries.
#[derive(Clone, Copy, Debug)]
pub struct ViewportCuller {
    bounds: ViewportBounds,
    stats: CullingStats,
}

impl ViewportCuller {
    /// Creates a culler with degenerate empty bounds.
    ///
    /// [`ViewportCuller::update_bounds`] must run before the first query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bounds: ViewportBounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            },
            stats: CullingStats::default(),
        }
    }

    /// Recomputes the visible world rectangle from the camera transform.
    pub fn update_bounds(&mut self, camera: &Camera, surface: Vec2, config: &RendererConfig) {
        let top_left = camera.screen_to_world(Vec2::ZERO, surface);
        let bottom_right = camera.screen_to_world(surface, surface);
        self.bounds = ViewportBounds::padded(
            top_left.x.min(bottom_right.x),
            top_left.y.min(bottom_right.y),
            top_left.x.max(bottom_right.x),
            top_left.y.max(bottom_right.y),
            config.viewport_padding,
        );
    }

    /// Answers whether a circle at `(x, y)` intersects the padded bounds.
    pub fn is_visible(&mut self, x: f32, y: f32, radius: f32) -> bool {
        self.stats.queried += 1;
        let visible = self.bounds.intersects_circle(x, y, radius);
        if !visible {
            self.stats.culled += 1;
        }
        visible
    }

    /// Last computed bounds.
    #[must_use]
    pub const fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    /// Accumulated diagnostic counters.
    #[must_use]
    pub const fn stats(&self) -> CullingStats {
        self.stats
    }
}

impl Default for ViewportCuller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraTarget;

    fn padded_unit_bounds() -> ViewportBounds {
        ViewportBounds::padded(0.0, 0.0, 1000.0, 1000.0, 50.0)
    }

    #[test]
    fn object_fully_outside_padded_bounds_is_not_visible() {
        let bounds = padded_unit_bounds();
        assert!(!bounds.intersects_circle(2000.0, 2000.0, 10.0));
    }

    #[test]
    fn object_intersecting_padded_bounds_is_visible() {
        let bounds = padded_unit_bounds();
        assert!(bounds.intersects_circle(1040.0, 500.0, 10.0));
    }

    #[test]
    fn padding_extends_raw_bounds_symmetrically() {
        let bounds = padded_unit_bounds();
        assert_eq!(bounds.min_x, -50.0);
        assert_eq!(bounds.max_y, 1050.0);
    }

    #[test]
    fn culler_counts_queried_and_culled() {
        let config = RendererConfig::default();
        let surface = Vec2::new(1000.0, 1000.0);
        let mut camera = Camera::new(1.0);
        camera.center_on(CameraTarget::World(Vec2::new(500.0, 500.0)), surface);

        let mut culler = ViewportCuller::new();
        culler.update_bounds(&camera, surface, &config);

        assert!(culler.is_visible(500.0, 500.0, 10.0));
        assert!(!culler.is_visible(5000.0, 5000.0, 10.0));
        assert_eq!(culler.stats(), CullingStats { queried: 2, culled: 1 });
    }

    #[test]
    fn update_bounds_tracks_the_camera_transform() {
        let config = RendererConfig::default();
        let surface = Vec2::new(1000.0, 1000.0);
        let mut camera = Camera::new(1.0);
        camera.center_on(CameraTarget::World(Vec2::new(500.0, 500.0)), surface);

        let mut culler = ViewportCuller::new();
        culler.update_bounds(&camera, surface, &config);
        let bounds = culler.bounds();
        assert!((bounds.min_x - -50.0).abs() < 1e-3);
        assert!((bounds.max_x - 1050.0).abs() < 1e-3);

        // Zooming in halves the visible world rectangle.
        camera.snap_zoom(2.0, &config);
        culler.update_bounds(&camera, surface, &config);
        let zoomed = culler.bounds();
        assert!((zoomed.min_x - 200.0).abs() < 1e-3);
        assert!((zoomed.max_x - 800.0).abs() < 1e-3);
    }
}
