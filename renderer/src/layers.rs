//! Layer dirtiness planning for the compositor.
//!
//! Three conceptual layers with distinct invalidation semantics:
//! the background starfield is invalidated only by a resize; the game
//! layer is redrawn only when its dependency stamp changed (or on the
//! periodic animation tick); the UI overlay is always drawn fresh because
//! it must track the pointer with zero latency. The actual offscreen
//! surfaces live in the backend adapter; this module only decides what to
//! redraw and keeps the counters the redraw-idempotence tests rely on.

use glam::Vec2;
use starweave_core::{ObjectRef, ViewMode};

use crate::config::RendererConfig;

/// Dependency snapshot used to decide game-layer dirtiness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirtyStamp {
    /// Simulation tick the frame renders.
    pub tick: u64,
    /// Camera position at frame time.
    pub camera_position: Vec2,
    /// Interpolated camera zoom at frame time.
    pub zoom: f32,
    /// Active view mode.
    pub mode: ViewMode,
    /// Current selection identity.
    pub selection: Option<ObjectRef>,
}

/// Per-frame redraw plan consumed by backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePlan {
    /// The starfield layer must be regenerated before compositing.
    pub redraw_background: bool,
    /// The game-object layer must be redrawn; otherwise its cached
    /// surface is stamped as-is.
    pub redraw_game: bool,
}

/// Decides which layers are dirty each frame.
#[derive(Clone, Copy, Debug)]
pub struct LayerCompositor {
    background_invalid: bool,
    baseline: Option<DirtyStamp>,
    frame_counter: u64,
    animation_frame: u64,
    game_redraws: u64,
}

impl LayerCompositor {
    /// Creates a compositor with every layer initially invalid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            background_invalid: true,
            baseline: None,
            frame_counter: 0,
            animation_frame: 0,
            game_redraws: 0,
        }
    }

    /// Marks the background stale; called on resize.
    pub fn invalidate_background(&mut self) {
        self.background_invalid = true;
    }

    /// Forces the next frame to redraw the game layer regardless of stamp.
    pub fn invalidate_game(&mut self) {
        self.baseline = None;
    }

    /// Computes the redraw plan for the frame described by `stamp`.
    ///
    /// Call exactly once per displayed frame; the periodic animation tick
    /// is derived from the internal frame counter.
    pub fn plan(&mut self, stamp: &DirtyStamp, config: &RendererConfig) -> FramePlan {
        self.frame_counter += 1;

        let animation_tick = self.frame_counter % config.animation_tick_interval == 0;
        let redraw_game = animation_tick || self.game_layer_dirty(stamp, config);
        if redraw_game {
            // The orbit phase only moves on frames whose pixels move with
            // it; between redraws the cached layer and the projections the
            // hit tester queries must describe the same geometry.
            self.animation_frame = self.frame_counter;
        }

        FramePlan {
            redraw_background: self.background_invalid,
            redraw_game,
        }
    }

    /// Records that the background was regenerated.
    pub fn note_background_redrawn(&mut self) {
        self.background_invalid = false;
    }

    /// Records that the game layer was redrawn for the stamped dependencies.
    pub fn note_game_redrawn(&mut self, stamp: DirtyStamp) {
        self.baseline = Some(stamp);
        self.game_redraws += 1;
    }

    /// Number of game-layer redraws since creation.
    #[must_use]
    pub const fn game_redraws(&self) -> u64 {
        self.game_redraws
    }

    /// Frames planned since creation.
    #[must_use]
    pub const fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    /// Orbit animation phase, latched to the frame counter on frames that
    /// redraw the game layer and held between them.
    #[must_use]
    pub const fn animation_frame(&self) -> u64 {
        self.animation_frame
    }

    fn game_layer_dirty(&self, stamp: &DirtyStamp, config: &RendererConfig) -> bool {
        let Some(baseline) = self.baseline else {
            return true;
        };

        if stamp.tick != baseline.tick
            || stamp.mode != baseline.mode
            || stamp.selection != baseline.selection
        {
            return true;
        }

        // Camera movement below the thresholds is treated as unchanged so
        // the interpolation tail does not force redraws every frame.
        let pan_pixels = (stamp.camera_position - baseline.camera_position).length() * stamp.zoom;
        if pan_pixels > config.dirty_pan_threshold {
            return true;
        }

        let zoom_base = baseline.zoom.abs().max(f32::EPSILON);
        (stamp.zoom - baseline.zoom).abs() / zoom_base > config.dirty_zoom_threshold
    }
}

impl Default for LayerCompositor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(tick: u64) -> DirtyStamp {
        DirtyStamp {
            tick,
            camera_position: Vec2::new(100.0, 100.0),
            zoom: 1.0,
            mode: ViewMode::Galaxy,
            selection: None,
        }
    }

    fn config() -> RendererConfig {
        RendererConfig {
            // Large interval keeps the animation tick out of these tests.
            animation_tick_interval: 1_000_000,
            ..RendererConfig::default()
        }
    }

    #[test]
    fn unchanged_frames_redraw_the_game_layer_exactly_once() {
        let config = config();
        let mut compositor = LayerCompositor::new();

        for _ in 0..10 {
            let plan = compositor.plan(&stamp(41), &config);
            if plan.redraw_game {
                compositor.note_game_redrawn(stamp(41));
            }
        }

        assert_eq!(compositor.game_redraws(), 1);
    }

    #[test]
    fn tick_advance_marks_dirty_for_exactly_one_frame() {
        let config = config();
        let mut compositor = LayerCompositor::new();

        let plan = compositor.plan(&stamp(41), &config);
        assert!(plan.redraw_game, "first frame always draws");
        compositor.note_game_redrawn(stamp(41));

        assert!(!compositor.plan(&stamp(41), &config).redraw_game);

        let plan = compositor.plan(&stamp(42), &config);
        assert!(plan.redraw_game, "tick advance dirties the layer");
        compositor.note_game_redrawn(stamp(42));

        assert!(
            !compositor.plan(&stamp(42), &config).redraw_game,
            "clean again on the following unchanged frame"
        );
    }

    #[test]
    fn camera_movement_below_threshold_stays_clean() {
        let config = config();
        let mut compositor = LayerCompositor::new();
        let _ = compositor.plan(&stamp(1), &config);
        compositor.note_game_redrawn(stamp(1));

        let mut nudged = stamp(1);
        nudged.camera_position += Vec2::new(0.5, 0.0);
        assert!(!compositor.plan(&nudged, &config).redraw_game);

        let mut moved = stamp(1);
        moved.camera_position += Vec2::new(10.0, 0.0);
        assert!(compositor.plan(&moved, &config).redraw_game);
    }

    #[test]
    fn zoom_change_beyond_fraction_marks_dirty() {
        let config = config();
        let mut compositor = LayerCompositor::new();
        let _ = compositor.plan(&stamp(1), &config);
        compositor.note_game_redrawn(stamp(1));

        let mut slight = stamp(1);
        slight.zoom = 1.005;
        assert!(!compositor.plan(&slight, &config).redraw_game);

        let mut zoomed = stamp(1);
        zoomed.zoom = 1.05;
        assert!(compositor.plan(&zoomed, &config).redraw_game);
    }

    #[test]
    fn selection_and_mode_changes_mark_dirty() {
        let config = config();
        let mut compositor = LayerCompositor::new();
        let _ = compositor.plan(&stamp(1), &config);
        compositor.note_game_redrawn(stamp(1));

        let mut selected = stamp(1);
        selected.selection = Some(ObjectRef::Galaxy(starweave_core::GalaxyId::new(1)));
        assert!(compositor.plan(&selected, &config).redraw_game);

        let mut moded = stamp(1);
        moded.mode = ViewMode::System;
        assert!(compositor.plan(&moded, &config).redraw_game);
    }

    #[test]
    fn animation_tick_forces_periodic_redraw_without_state_change() {
        let config = RendererConfig {
            animation_tick_interval: 4,
            ..RendererConfig::default()
        };
        let mut compositor = LayerCompositor::new();
        let _ = compositor.plan(&stamp(1), &config);
        compositor.note_game_redrawn(stamp(1));

        let mut forced = 0;
        for _ in 0..8 {
            if compositor.plan(&stamp(1), &config).redraw_game {
                forced += 1;
                compositor.note_game_redrawn(stamp(1));
            }
        }
        assert_eq!(forced, 2, "every fourth frame forces a redraw");
    }

    #[test]
    fn animation_phase_is_latched_between_game_redraws() {
        let config = RendererConfig {
            animation_tick_interval: 4,
            ..RendererConfig::default()
        };
        let mut compositor = LayerCompositor::new();

        assert!(compositor.plan(&stamp(1), &config).redraw_game);
        compositor.note_game_redrawn(stamp(1));
        let latched = compositor.animation_frame();
        assert_eq!(latched, 1);

        // Clean frames must not advance the phase.
        assert!(!compositor.plan(&stamp(1), &config).redraw_game);
        assert_eq!(compositor.animation_frame(), latched);
        assert!(!compositor.plan(&stamp(1), &config).redraw_game);
        assert_eq!(compositor.animation_frame(), latched);

        // The animation tick redraws and advances the phase with it.
        assert!(compositor.plan(&stamp(1), &config).redraw_game);
        assert_eq!(compositor.animation_frame(), 4);
    }

    #[test]
    fn background_is_invalidated_only_by_resize() {
        let config = config();
        let mut compositor = LayerCompositor::new();

        let plan = compositor.plan(&stamp(1), &config);
        assert!(plan.redraw_background, "initially invalid");
        compositor.note_background_redrawn();
        compositor.note_game_redrawn(stamp(1));

        let plan = compositor.plan(&stamp(2), &config);
        assert!(!plan.redraw_background, "tick changes leave it cached");

        compositor.invalidate_background();
        assert!(compositor.plan(&stamp(2), &config).redraw_background);
    }
}
