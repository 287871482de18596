#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed presentation adapter for the Starweave renderer.
//!
//! Macroquad is pulled in without default features: the optional audio
//! stack needs native ALSA headers that containerised builders rarely
//! have, and this adapter never plays sound. Enable `macroquad/audio`
//! downstream if a consumer wants it back.
//!
//! The adapter owns the window and the frame loop. Each frame it polls the
//! host for a fresh snapshot, feeds pointer and keyboard input into the
//! renderer, asks for a [`FrameScene`], and rasterizes it across three
//! layers: a starfield background and the game objects each live in an
//! offscreen render target redrawn only when the frame plan says so, while
//! the overlay draws straight to the visible surface every frame.

mod sprites;

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use macroquad::camera::{set_camera, set_default_camera, Camera2D};
use macroquad::color::{Color, BLACK, WHITE};
use macroquad::input::{
    is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position, mouse_wheel,
    KeyCode, MouseButton,
};
use macroquad::math::{Rect, Vec2 as MqVec2};
use macroquad::shapes::{draw_circle, draw_circle_lines, draw_line, draw_rectangle};
use macroquad::text::{draw_text, measure_text};
use macroquad::texture::{draw_texture_ex, render_target, DrawTextureParams, RenderTarget, Texture2D};
use starweave_core::{Snapshot, StarColor, ViewMode};
use starweave_renderer::scene::{
    FrameScene, GalaxyScene, GameScene, HoverAccent, PlanetScene, PlanetMarker, PortalLink,
    PortalMarker, SystemMarker, SystemScene, UniverseScene,
};
use starweave_renderer::sprites::{glow_key, panel_key, portal_key, SpriteCache};
use starweave_renderer::{layout, FrameClock, Renderer, RendererHost};

use crate::sprites::{
    empire_color, glow_texture, panel_texture, planet_color, portal_texture, star_color,
    terrain_color, StarfieldSequence, PORTAL_COLOR, SYNTHESIZED_SPRITE_COUNT,
};

const NEUTRAL_RING: Color = Color::new(0.55, 0.55, 0.6, 0.8);
const GALAXY_RING: Color = Color::new(0.5, 0.6, 0.9, 0.6);
const LANE_COLOR: Color = Color::new(0.8, 0.8, 0.9, 0.25);
const CRISIS_COLOR: Color = Color::new(1.0, 0.25, 0.2, 0.9);
const SELECTION_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.9);
const ORBIT_RING_COLOR: Color = Color::new(0.6, 0.6, 0.7, 0.25);

/// Multiplicative zoom applied per mouse-wheel notch.
const WHEEL_ZOOM_STEP: f32 = 1.15;
/// Two clicks within this interval and distance count as a double click.
const DOUBLE_CLICK_SECONDS: f64 = 0.35;
const DOUBLE_CLICK_SLOP: f32 = 8.0;
const STARFIELD_SEED: u64 = 0x5741_5256;
const STARS_PER_MEGAPIXEL: f32 = 450.0;

/// [`FrameClock`] driven by macroquad's real frame timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealtimeClock;

impl FrameClock for RealtimeClock {
    fn frame_delta(&mut self) -> f32 {
        macroquad::time::get_frame_time()
    }
}

/// Edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` ends the frame loop.
    quit_requested: bool,
    /// `U`, `G`, `S`, `P` jump between view modes.
    mode: Option<ViewMode>,
    /// `F` fits the camera to the focused content.
    fit: bool,
    /// `R` drops synthesized gradients so they rebuild next use.
    regenerate_sprites: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let mode = if is_key_pressed(KeyCode::U) {
            Some(ViewMode::Universe)
        } else if is_key_pressed(KeyCode::G) {
            Some(ViewMode::Galaxy)
        } else if is_key_pressed(KeyCode::S) {
            Some(ViewMode::System)
        } else if is_key_pressed(KeyCode::P) {
            Some(ViewMode::Planet)
        } else {
            None
        };
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            mode,
            fit: is_key_pressed(KeyCode::F),
            regenerate_sprites: is_key_pressed(KeyCode::R),
        }
    }
}

/// Tracks rendered frames and reports per-second plus trailing-window rates.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

impl FpsCounter {
    /// Records a frame; returns `(per_second, trailing_ten_seconds)` once a
    /// full second has accumulated.
    fn record_frame(&mut self, frame: Duration) -> Option<(f32, f32)> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }
        let seconds = self.elapsed.as_secs_f32();
        if seconds <= f32::EPSILON {
            self.elapsed = Duration::ZERO;
            self.frames = 0;
            return None;
        }
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some((per_second, trailing))
    }
}

/// Window and frame-loop configuration for the macroquad presentation.
#[derive(Clone, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    synthesize_sprites: bool,
    window_title: String,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            synthesize_sprites: true,
            window_title: "Starweave".to_owned(),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend with the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronises presentation with the display refresh rate, or renders
    /// as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(if enabled { 1 } else { 0 });
        self
    }

    /// Prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Disables procedural sprite synthesis; every marker then uses the
    /// direct-drawing fallback path.
    #[must_use]
    pub fn with_sprite_synthesis(mut self, enabled: bool) -> Self {
        self.synthesize_sprites = enabled;
        self
    }

    /// Overrides the window title.
    #[must_use]
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Opens the window and runs the frame loop until quit is requested.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; the `Result` keeps the signature
    /// stable for backends with fallible setup.
    pub fn run<H>(self, renderer: Renderer, host: H) -> Result<()>
    where
        H: RendererHost + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            synthesize_sprites,
            window_title,
        } = self;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 1280,
            window_height: 800,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut renderer = renderer;
            let mut host = host;
            let mut clock = RealtimeClock;
            let mut snapshot = Snapshot::default();
            let mut sprite_cache: SpriteCache<Texture2D> = SpriteCache::new();
            let mut fps_counter = FpsCounter::default();

            if synthesize_sprites {
                renderer.expect_assets(SYNTHESIZED_SPRITE_COUNT);
                prewarm_sprites(&mut renderer, &mut sprite_cache);
            } else {
                renderer.expect_assets(0);
            }

            let mut layer_size = Vec2::new(
                macroquad::window::screen_width(),
                macroquad::window::screen_height(),
            );
            let mut background_target = render_target(layer_size.x as u32, layer_size.y as u32);
            let mut game_target = render_target(layer_size.x as u32, layer_size.y as u32);

            let mut last_pointer = Vec2::ZERO;
            let mut last_click_time = f64::NEG_INFINITY;
            let mut last_click_pos = Vec2::ZERO;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                if let Some(next) = host.poll_snapshot() {
                    snapshot = next;
                }
                while let Some(grid) = host.take_surface_grid() {
                    renderer.provide_surface(grid);
                }

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                if screen != layer_size {
                    log::debug!(
                        "recreating render targets at {}x{}",
                        screen.x as u32,
                        screen.y as u32
                    );
                    layer_size = screen;
                    background_target = render_target(screen.x as u32, screen.y as u32);
                    game_target = render_target(screen.x as u32, screen.y as u32);
                }
                renderer.resize(screen);

                if let Some(mode) = keyboard.mode {
                    renderer.set_mode(&snapshot, mode, None);
                }
                if keyboard.fit {
                    renderer.request_fit(&snapshot);
                }
                if keyboard.regenerate_sprites {
                    sprite_cache.regenerate();
                }

                let (_, wheel_y) = mouse_wheel();
                if wheel_y.abs() > f32::EPSILON {
                    let factor = if wheel_y > 0.0 {
                        WHEEL_ZOOM_STEP
                    } else {
                        1.0 / WHEEL_ZOOM_STEP
                    };
                    renderer.wheel_zoom(factor);
                }

                let (mx, my) = mouse_position();
                let pointer = Vec2::new(mx, my);
                if pointer != last_pointer {
                    if is_mouse_button_down(MouseButton::Right) {
                        let delta = pointer - last_pointer;
                        renderer.pan(-delta.x, -delta.y);
                    } else {
                        renderer.pointer_moved(&snapshot, pointer);
                    }
                    last_pointer = pointer;
                }

                if is_mouse_button_pressed(MouseButton::Left) {
                    let now = macroquad::time::get_time();
                    let close = (pointer - last_click_pos).length() <= DOUBLE_CLICK_SLOP;
                    if close && now - last_click_time <= DOUBLE_CLICK_SECONDS {
                        renderer.double_clicked(&snapshot, pointer);
                        last_click_time = f64::NEG_INFINITY;
                    } else {
                        renderer.pointer_clicked(&snapshot, pointer);
                        last_click_time = now;
                        last_click_pos = pointer;
                    }
                }

                let dt = clock.frame_delta();
                let scene = renderer.begin_frame(&snapshot, screen, dt);
                for intent in renderer.take_intents() {
                    host.on_intent(intent);
                }

                if scene.plan.redraw_background {
                    set_camera(&layer_camera(background_target, screen));
                    draw_starfield(screen);
                }
                if scene.plan.redraw_game {
                    set_camera(&layer_camera(game_target, screen));
                    macroquad::window::clear_background(Color::new(0.0, 0.0, 0.0, 0.0));
                    draw_game_layer(&scene, &mut sprite_cache);
                }

                set_default_camera();
                macroquad::window::clear_background(BLACK);
                blit_layer(background_target, screen);
                blit_layer(game_target, screen);
                draw_overlay(&scene, &mut sprite_cache);

                if show_fps {
                    if let Some((per_second, trailing)) =
                        fps_counter.record_frame(Duration::from_secs_f32(dt.max(0.0)))
                    {
                        println!("FPS: {per_second:.2} (10s avg: {trailing:.2})");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Builds every synthesized texture up front and releases the asset barrier.
fn prewarm_sprites(renderer: &mut Renderer, cache: &mut SpriteCache<Texture2D>) {
    for color in StarColor::ALL {
        for hovered in [false, true] {
            let _ = cache.sprite(&glow_key(color, hovered), || glow_texture(color, hovered));
            renderer.assets_mut().complete_success();
        }
    }
    for hovered in [false, true] {
        let _ = cache.sprite(&portal_key(hovered), || portal_texture(hovered));
        renderer.assets_mut().complete_success();
    }
    let _ = cache.sprite(&panel_key("tooltip"), panel_texture);
    renderer.assets_mut().complete_success();
}

/// Pixel-coordinate camera drawing into an offscreen layer.
fn layer_camera(target: RenderTarget, size: Vec2) -> Camera2D {
    let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, size.x, size.y));
    camera.render_target = Some(target);
    camera
}

fn blit_layer(target: RenderTarget, size: Vec2) {
    draw_texture_ex(
        target.texture,
        0.0,
        0.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(MqVec2::new(size.x, size.y)),
            // Offscreen targets come out y-flipped under the display-rect
            // camera.
            flip_y: true,
            ..DrawTextureParams::default()
        },
    );
}

fn draw_starfield(size: Vec2) {
    macroquad::window::clear_background(Color::new(0.01, 0.01, 0.03, 1.0));
    let stars =
        (size.x * size.y / 1_000_000.0 * STARS_PER_MEGAPIXEL).max(64.0) as u32;
    let mut sequence = StarfieldSequence::new(STARFIELD_SEED);
    for _ in 0..stars {
        let x = sequence.next_unit() * size.x;
        let y = sequence.next_unit() * size.y;
        let brightness = 0.3 + sequence.next_unit() * 0.7;
        let radius = 0.5 + sequence.next_unit() * 1.2;
        draw_circle(
            x,
            y,
            radius,
            Color::new(brightness, brightness, brightness * 1.05, 1.0),
        );
    }
}

fn draw_sprite_centered(texture: Texture2D, center: Vec2, size: f32) {
    draw_texture_ex(
        texture,
        center.x - size * 0.5,
        center.y - size * 0.5,
        WHITE,
        DrawTextureParams {
            dest_size: Some(MqVec2::splat(size)),
            ..DrawTextureParams::default()
        },
    );
}

fn draw_game_layer(scene: &FrameScene, cache: &mut SpriteCache<Texture2D>) {
    match &scene.game {
        GameScene::Universe(universe) => draw_universe(scene, universe, cache),
        GameScene::Galaxy(galaxy) => draw_galaxy(scene, galaxy, cache),
        GameScene::System(system) => draw_system(scene, system, cache),
        GameScene::Planet(planet) => draw_planet(scene, planet),
        GameScene::Empty => {}
    }
}

fn draw_universe(scene: &FrameScene, universe: &UniverseScene, cache: &mut SpriteCache<Texture2D>) {
    let zoom = scene.camera.zoom();
    for marker in &universe.galaxies {
        let center = scene.camera.world_to_screen(marker.position, scene.surface);
        let radius = marker.radius * zoom;
        let ring = if marker.selected {
            SELECTION_COLOR
        } else {
            GALAXY_RING
        };
        draw_circle(center.x, center.y, radius, Color::new(0.3, 0.35, 0.6, 0.08));
        draw_circle_lines(center.x, center.y, radius, 1.5, ring);
    }
    draw_links(scene, &universe.links);
    for marker in &universe.systems {
        draw_system_marker(scene, marker, 14.0, cache);
    }
    for marker in &universe.portals {
        draw_portal_marker(scene, marker, cache);
    }
}

fn draw_galaxy(scene: &FrameScene, galaxy: &GalaxyScene, cache: &mut SpriteCache<Texture2D>) {
    draw_links(scene, &galaxy.links);
    for fleet in &galaxy.fleets {
        let from = scene.camera.world_to_screen(fleet.lane_from, scene.surface);
        let to = scene.camera.world_to_screen(fleet.lane_to, scene.surface);
        draw_line(from.x, from.y, to.x, to.y, 1.0, LANE_COLOR);
        let position = scene.camera.world_to_screen(fleet.position, scene.surface);
        draw_circle(position.x, position.y, 4.0, empire_color(fleet.owner_color));
    }
    for marker in &galaxy.systems {
        draw_system_marker(scene, marker, 22.0, cache);
    }
    for marker in &galaxy.portals {
        draw_portal_marker(scene, marker, cache);
    }
}

fn draw_links(scene: &FrameScene, links: &[PortalLink]) {
    for link in links {
        let from = scene.camera.world_to_screen(link.from, scene.surface);
        let to = scene.camera.world_to_screen(link.to, scene.surface);
        draw_line(
            from.x,
            from.y,
            to.x,
            to.y,
            1.0,
            Color::new(PORTAL_COLOR.r, PORTAL_COLOR.g, PORTAL_COLOR.b, 0.3),
        );
    }
}

fn draw_system_marker(
    scene: &FrameScene,
    marker: &SystemMarker,
    glow_size: f32,
    cache: &mut SpriteCache<Texture2D>,
) {
    let center = scene.camera.world_to_screen(marker.position, scene.surface);
    if scene.sprites_ready {
        // Always the normal variant: this layer is cached between redraws,
        // so the hovered glow is drawn by the overlay pass instead.
        let color = marker.star;
        let texture = *cache.sprite(&glow_key(color, false), || glow_texture(color, false));
        draw_sprite_centered(texture, center, glow_size * 2.0);
    } else {
        // Direct-drawing fallback: layered circles approximate the glow.
        let base = star_color(marker.star);
        draw_circle(center.x, center.y, glow_size * 0.5, Color::new(base.r, base.g, base.b, 0.25));
        draw_circle(center.x, center.y, glow_size * 0.25, base);
    }
    if let Some(owner) = marker.owner_color {
        draw_circle_lines(center.x, center.y, glow_size * 0.55, 1.5, empire_color(owner));
    }
    if marker.crisis {
        draw_circle_lines(center.x, center.y, glow_size * 0.75, 1.5, CRISIS_COLOR);
    }
    if marker.selected {
        draw_circle_lines(center.x, center.y, glow_size * 0.9, 1.5, SELECTION_COLOR);
    }
}

fn draw_portal_marker(scene: &FrameScene, marker: &PortalMarker, cache: &mut SpriteCache<Texture2D>) {
    let center = scene.camera.world_to_screen(marker.position, scene.surface);
    if scene.sprites_ready {
        let texture = *cache.sprite(&portal_key(false), || portal_texture(false));
        draw_sprite_centered(texture, center, 28.0);
    } else {
        draw_circle_lines(center.x, center.y, 10.0, 2.0, PORTAL_COLOR);
    }
}

fn draw_system(scene: &FrameScene, system: &SystemScene, cache: &mut SpriteCache<Texture2D>) {
    let zoom = scene.camera.zoom();
    for ring in &system.rings {
        draw_circle_lines(
            system.star_screen.x,
            system.star_screen.y,
            ring * zoom,
            1.0,
            ORBIT_RING_COLOR,
        );
    }
    if scene.sprites_ready {
        let star = system.star;
        let texture = *cache.sprite(&glow_key(star, false), || glow_texture(star, false));
        draw_sprite_centered(texture, system.star_screen, 96.0);
    } else {
        draw_circle(
            system.star_screen.x,
            system.star_screen.y,
            24.0,
            star_color(system.star),
        );
    }
    for marker in &system.planets {
        draw_planet_marker(marker);
    }
}

fn draw_planet_marker(marker: &PlanetMarker) {
    let center = marker.projection.screen;
    draw_circle(center.x, center.y, 8.0, planet_color(marker.kind));
    let ring_color = if marker.selected {
        SELECTION_COLOR
    } else if let Some(owner) = marker.owner_color {
        empire_color(owner)
    } else {
        NEUTRAL_RING
    };
    if marker.selected || marker.owner_color.is_some() {
        draw_circle_lines(center.x, center.y, 11.0, 1.5, ring_color);
    }
}

fn draw_planet(scene: &FrameScene, planet: &PlanetScene) {
    match planet {
        PlanetScene::Surface {
            columns,
            rows,
            tiles,
            ..
        } => {
            let origin = layout::surface_grid_origin(*columns, *rows, scene.surface);
            let tile_size = layout::SURFACE_TILE_SIZE;
            for tile in tiles {
                let x = origin.x + tile.column as f32 * tile_size;
                let y = origin.y + tile.row as f32 * tile_size;
                draw_rectangle(x, y, tile_size - 1.0, tile_size - 1.0, terrain_color(tile.terrain));
                if let Some(building) = tile.building {
                    let glyph = building_glyph(building);
                    draw_rectangle(
                        x + tile_size * 0.25,
                        y + tile_size * 0.25,
                        tile_size * 0.5,
                        tile_size * 0.5,
                        Color::new(0.1, 0.1, 0.14, 0.8),
                    );
                    draw_text(glyph, x + tile_size * 0.38, y + tile_size * 0.62, 18.0, WHITE);
                }
            }
        }
        PlanetScene::Loading { .. } => {
            let message = "CHARTING SURFACE...";
            let dimensions = measure_text(message, None, 28, 1.0);
            draw_text(
                message,
                (scene.surface.x - dimensions.width) * 0.5,
                scene.surface.y * 0.5,
                28.0,
                Color::new(0.7, 0.7, 0.8, 1.0),
            );
        }
        PlanetScene::Empty => {}
    }
}

fn building_glyph(kind: starweave_core::BuildingKind) -> &'static str {
    match kind {
        starweave_core::BuildingKind::Mine => "M",
        starweave_core::BuildingKind::Habitat => "H",
        starweave_core::BuildingKind::SpacePort => "P",
        starweave_core::BuildingKind::ShieldGenerator => "G",
        starweave_core::BuildingKind::Laboratory => "L",
    }
}

fn draw_overlay(scene: &FrameScene, cache: &mut SpriteCache<Texture2D>) {
    let Some(hover) = &scene.overlay.hover else {
        return;
    };
    draw_hover_accent(scene, hover.screen, hover.accent, cache);
    let dimensions = measure_text(&hover.label, None, 20, 1.0);
    let padding = 6.0;
    let x = (hover.screen.x + 14.0).min(scene.surface.x - dimensions.width - 2.0 * padding);
    let y = (hover.screen.y - 30.0).max(padding);
    if scene.sprites_ready {
        let panel = *cache.sprite(&panel_key("tooltip"), panel_texture);
        draw_texture_ex(
            panel,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(MqVec2::new(
                    dimensions.width + 2.0 * padding,
                    dimensions.height + 2.0 * padding,
                )),
                ..DrawTextureParams::default()
            },
        );
    } else {
        draw_rectangle(
            x,
            y,
            dimensions.width + 2.0 * padding,
            dimensions.height + 2.0 * padding,
            Color::new(0.05, 0.06, 0.12, 0.85),
        );
    }
    draw_text(
        &hover.label,
        x + padding,
        y + padding + dimensions.offset_y,
        20.0,
        WHITE,
    );
    draw_circle_lines(hover.screen.x, hover.screen.y, 14.0, 1.5, SELECTION_COLOR);
}

/// Brightened hover sprite, drawn over the cached game layer so it tracks
/// the pointer with zero latency.
fn draw_hover_accent(
    scene: &FrameScene,
    center: Vec2,
    accent: HoverAccent,
    cache: &mut SpriteCache<Texture2D>,
) {
    match accent {
        HoverAccent::SystemGlow(star) => {
            let size = match scene.mode {
                ViewMode::Universe => 28.0,
                _ => 44.0,
            };
            if scene.sprites_ready {
                let texture = *cache.sprite(&glow_key(star, true), || glow_texture(star, true));
                draw_sprite_centered(texture, center, size);
            } else {
                let base = star_color(star);
                draw_circle(
                    center.x,
                    center.y,
                    size * 0.4,
                    Color::new(base.r, base.g, base.b, 0.35),
                );
            }
        }
        HoverAccent::PortalGlow => {
            if scene.sprites_ready {
                let texture = *cache.sprite(&portal_key(true), || portal_texture(true));
                draw_sprite_centered(texture, center, 28.0);
            } else {
                draw_circle_lines(center.x, center.y, 12.0, 2.0, PORTAL_COLOR);
            }
        }
        HoverAccent::Ring => {}
    }
}
