//! Procedural sprite synthesis and palette mapping.
//!
//! No textures ship with the client; glows, portal swirls, and panel
//! backgrounds are generated pixel-by-pixel on first use and live in the
//! renderer's sprite cache for the rest of the session.

use macroquad::color::Color;
use macroquad::texture::{FilterMode, Image, Texture2D};
use starweave_core::{EmpireColor, PlanetKind, StarColor, TerrainKind};

/// Edge length of synthesized glow textures in pixels.
pub(crate) const GLOW_TEXTURE_SIZE: u16 = 64;
/// Edge length of synthesized portal textures in pixels.
pub(crate) const PORTAL_TEXTURE_SIZE: u16 = 48;

/// Number of textures synthesized during bootstrap: one glow per star
/// color and hover state, both portal states, and the tooltip panel.
pub(crate) const SYNTHESIZED_SPRITE_COUNT: usize = StarColor::ALL.len() * 2 + 2 + 1;

pub(crate) fn star_color(color: StarColor) -> Color {
    match color {
        StarColor::Red => Color::new(1.0, 0.45, 0.35, 1.0),
        StarColor::Orange => Color::new(1.0, 0.65, 0.3, 1.0),
        StarColor::Yellow => Color::new(1.0, 0.9, 0.55, 1.0),
        StarColor::White => Color::new(0.95, 0.95, 1.0, 1.0),
        StarColor::Blue => Color::new(0.55, 0.7, 1.0, 1.0),
    }
}

pub(crate) fn planet_color(kind: PlanetKind) -> Color {
    match kind {
        PlanetKind::Terran => Color::new(0.35, 0.75, 0.4, 1.0),
        PlanetKind::Ocean => Color::new(0.25, 0.5, 0.9, 1.0),
        PlanetKind::Desert => Color::new(0.85, 0.7, 0.4, 1.0),
        PlanetKind::Ice => Color::new(0.75, 0.85, 0.95, 1.0),
        PlanetKind::Gas => Color::new(0.7, 0.55, 0.85, 1.0),
        PlanetKind::Barren => Color::new(0.55, 0.52, 0.5, 1.0),
    }
}

pub(crate) fn terrain_color(kind: TerrainKind) -> Color {
    match kind {
        TerrainKind::Plains => Color::new(0.4, 0.65, 0.35, 1.0),
        TerrainKind::Hills => Color::new(0.55, 0.6, 0.35, 1.0),
        TerrainKind::Mountain => Color::new(0.5, 0.48, 0.5, 1.0),
        TerrainKind::Water => Color::new(0.2, 0.45, 0.8, 1.0),
        TerrainKind::Crystal => Color::new(0.65, 0.45, 0.9, 1.0),
        TerrainKind::Wasteland => Color::new(0.45, 0.38, 0.32, 1.0),
    }
}

pub(crate) fn empire_color(color: EmpireColor) -> Color {
    Color::new(
        f32::from(color.red()) / 255.0,
        f32::from(color.green()) / 255.0,
        f32::from(color.blue()) / 255.0,
        1.0,
    )
}

/// Portal markers use a fixed violet that no empire palette collides with.
pub(crate) const PORTAL_COLOR: Color = Color::new(0.75, 0.4, 1.0, 1.0);

fn brighten(color: Color, amount: f32) -> Color {
    Color::new(
        (color.r + amount).min(1.0),
        (color.g + amount).min(1.0),
        (color.b + amount).min(1.0),
        color.a,
    )
}

/// Renders a radial falloff from `center` at full alpha to transparent at
/// the texture edge.
fn radial_texture(size: u16, center: Color) -> Texture2D {
    let mut image = Image::gen_image_color(size, size, Color::new(0.0, 0.0, 0.0, 0.0));
    let half = f32::from(size) * 0.5;
    for y in 0..u32::from(size) {
        for x in 0..u32::from(size) {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let falloff = 1.0 - (dx * dx + dy * dy).sqrt() / half;
            if falloff > 0.0 {
                let alpha = falloff * falloff * center.a;
                image.set_pixel(x, y, Color::new(center.r, center.g, center.b, alpha));
            }
        }
    }
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Linear);
    texture
}

pub(crate) fn glow_texture(color: StarColor, hovered: bool) -> Texture2D {
    let mut base = star_color(color);
    if hovered {
        base = brighten(base, 0.2);
    }
    radial_texture(GLOW_TEXTURE_SIZE, base)
}

/// A hollow ring; the swirl reads well enough at marker scale.
pub(crate) fn portal_texture(hovered: bool) -> Texture2D {
    let size = PORTAL_TEXTURE_SIZE;
    let color = if hovered {
        brighten(PORTAL_COLOR, 0.2)
    } else {
        PORTAL_COLOR
    };
    let mut image = Image::gen_image_color(size, size, Color::new(0.0, 0.0, 0.0, 0.0));
    let half = f32::from(size) * 0.5;
    let ring = half * 0.7;
    let thickness = half * 0.22;
    for y in 0..u32::from(size) {
        for x in 0..u32::from(size) {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let distance = (dx * dx + dy * dy).sqrt();
            let band = 1.0 - ((distance - ring).abs() / thickness);
            if band > 0.0 {
                image.set_pixel(x, y, Color::new(color.r, color.g, color.b, band));
            }
        }
    }
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Linear);
    texture
}

/// Translucent dark backdrop stretched behind tooltip text.
pub(crate) fn panel_texture() -> Texture2D {
    let image = Image::gen_image_color(4, 4, Color::new(0.05, 0.06, 0.12, 0.85));
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);
    texture
}

/// Deterministic multiplicative-congruential sequence for the starfield.
///
/// The background layer is regenerated only on resize, so star positions
/// must not depend on wall time or a global RNG.
pub(crate) struct StarfieldSequence {
    state: u64,
}

impl StarfieldSequence {
    pub(crate) const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9e37_79b9 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        // Classic LCG constants (Numerical Recipes).
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform float in `0.0..1.0`.
    pub(crate) fn next_unit(&mut self) -> f32 {
        (self.next() >> 40) as f32 / (1u64 << 24) as f32
    }
}
