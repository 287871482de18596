//! Orbit layout for planet markers in system view.
//!
//! Planet markers do not exist in world space: they are laid out on orbit
//! rings around the focused system's star and projected straight to screen
//! coordinates. The projections are computed once per scene build and the
//! hit tester queries the same cached geometry, so drawing and picking can
//! never disagree.

use std::f32::consts::TAU;

use glam::Vec2;
use starweave_core::{PlanetId, PlanetSnapshot, SystemSnapshot};

use crate::camera::Camera;

/// Innermost orbit ring radius in world units.
pub const ORBIT_BASE_RADIUS: f32 = 60.0;
/// Spacing between successive orbit rings in world units.
pub const ORBIT_RING_SPACING: f32 = 45.0;
/// Revolutions per animation frame; keeps markers drifting slowly.
const ORBIT_PHASE_STEP: f32 = 0.0015;

/// Screen-projected planet marker shared by the scene and the hit tester.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetProjection {
    /// Planet the marker represents.
    pub planet: PlanetId,
    /// Marker center in screen space.
    pub screen: Vec2,
    /// Orbit ring radius in world units, for drawing the ring.
    pub orbit_radius: f32,
}

/// Radius of the orbit ring for the provided zero-based orbit index.
#[must_use]
pub fn orbit_radius(orbit: u8) -> f32 {
    ORBIT_BASE_RADIUS + f32::from(orbit) * ORBIT_RING_SPACING
}

/// Angular position of a planet on its ring for the provided animation frame.
///
/// The base angle derives from the planet id so layouts are stable across
/// frames and renderer instances; the frame counter adds a slow drift that
/// only advances when the game layer actually redraws.
#[must_use]
pub fn orbit_angle(planet: PlanetId, animation_frame: u64) -> f32 {
    let base = (planet.get() % 360) as f32 / 360.0;
    let drift = (animation_frame as f32) * ORBIT_PHASE_STEP;
    (base + drift).fract() * TAU
}

/// Projects every planet of the focused system onto the screen.
pub fn project_system_planets<'a>(
    system: &SystemSnapshot,
    planets: impl Iterator<Item = &'a PlanetSnapshot>,
    camera: &Camera,
    surface: Vec2,
    animation_frame: u64,
) -> Vec<PlanetProjection> {
    let star = Vec2::new(system.position.x, system.position.y);
    planets
        .map(|planet| {
            let radius = orbit_radius(planet.orbit);
            let angle = orbit_angle(planet.id, animation_frame);
            let world = star + Vec2::new(angle.cos(), angle.sin()) * radius;
            PlanetProjection {
                planet: planet.id,
                screen: camera.world_to_screen(world, surface),
                orbit_radius: radius,
            }
        })
        .collect()
}

/// Edge length of one surface tile in screen pixels.
pub const SURFACE_TILE_SIZE: f32 = 48.0;

/// Top-left corner of a surface grid centered on the screen.
#[must_use]
pub fn surface_grid_origin(columns: u32, rows: u32, surface: Vec2) -> Vec2 {
    let extent = Vec2::new(columns as f32, rows as f32) * SURFACE_TILE_SIZE;
    (surface - extent) * 0.5
}

/// Tile under a screen position, `None` when the pointer is off the grid.
#[must_use]
pub fn surface_tile_at(columns: u32, rows: u32, surface: Vec2, screen: Vec2) -> Option<(u32, u32)> {
    let local = (screen - surface_grid_origin(columns, rows, surface)) / SURFACE_TILE_SIZE;
    if local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let (column, row) = (local.x as u32, local.y as u32);
    (column < columns && row < rows).then_some((column, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use starweave_core::{EmpireId, GalaxyId, PlanetKind, StarColor, SystemId, WorldPoint};

    fn system() -> SystemSnapshot {
        SystemSnapshot {
            id: SystemId::new(1),
            galaxy: GalaxyId::new(1),
            name: "test".to_owned(),
            position: WorldPoint::new(0.0, 0.0),
            star: StarColor::White,
            owner: None::<EmpireId>,
        }
    }

    fn planet(id: u32, orbit: u8) -> PlanetSnapshot {
        PlanetSnapshot {
            id: PlanetId::new(id),
            system: SystemId::new(1),
            name: format!("p{id}"),
            orbit,
            kind: PlanetKind::Terran,
            owner: None,
        }
    }

    #[test]
    fn orbit_rings_are_spaced_outward() {
        assert!(orbit_radius(0) < orbit_radius(1));
        assert!((orbit_radius(2) - orbit_radius(1) - ORBIT_RING_SPACING).abs() < f32::EPSILON);
    }

    #[test]
    fn projection_is_deterministic_for_a_fixed_frame() {
        let camera = Camera::new(1.0);
        let surface = Vec2::new(800.0, 600.0);
        let planets = [planet(5, 0), planet(6, 1)];

        let first =
            project_system_planets(&system(), planets.iter(), &camera, surface, 10);
        let second =
            project_system_planets(&system(), planets.iter(), &camera, surface, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn animation_frame_advances_the_phase() {
        let camera = Camera::new(1.0);
        let surface = Vec2::new(800.0, 600.0);
        let planets = [planet(5, 0)];

        let before = project_system_planets(&system(), planets.iter(), &camera, surface, 0);
        let after = project_system_planets(&system(), planets.iter(), &camera, surface, 100);
        assert_ne!(before[0].screen, after[0].screen);
    }

    #[test]
    fn markers_stay_on_their_ring() {
        let camera = Camera::new(1.0);
        let surface = Vec2::new(800.0, 600.0);
        let planets = [planet(9, 2)];

        let projected = project_system_planets(&system(), planets.iter(), &camera, surface, 3);
        let center = camera.world_to_screen(Vec2::ZERO, surface);
        let distance = (projected[0].screen - center).length();
        assert!((distance - orbit_radius(2)).abs() < 1e-3);
    }

    #[test]
    fn tile_picking_matches_the_centered_grid() {
        let surface = Vec2::new(800.0, 600.0);
        // A 4x2 grid centered on an 800x600 surface spans x 304..496.
        let origin = surface_grid_origin(4, 2, surface);
        assert_eq!(origin, Vec2::new(304.0, 252.0));

        assert_eq!(
            surface_tile_at(4, 2, surface, origin + Vec2::splat(1.0)),
            Some((0, 0))
        );
        assert_eq!(
            surface_tile_at(4, 2, surface, Vec2::new(495.0, 299.0)),
            Some((3, 0))
        );
        assert_eq!(surface_tile_at(4, 2, surface, Vec2::new(10.0, 10.0)), None);
        assert_eq!(surface_tile_at(4, 2, surface, Vec2::new(497.0, 260.0)), None);
    }
}
