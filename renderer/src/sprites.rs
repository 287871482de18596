//! Associative caches of pre-rendered visual primitives.
//!
//! Re-synthesizing a radial gradient every frame for every star is the
//! dominant cost at high object counts, so glow and portal sprites are
//! built once per (color, interaction-state) combination and reused. The
//! cache is generic over the backend surface type; the pure pipeline and
//! its tests never touch real textures.
//!
//! Contract: entries are immutable once created. Callers must never mutate
//! a returned surface. Gradients are cheap to rebuild and may be cleared
//! alone; sprites are durable and only dropped on a full regeneration
//! (theme change).

use std::collections::HashMap;

use starweave_core::StarColor;

/// Cache of pre-rendered sprites and gradients keyed by deterministic strings.
#[derive(Debug)]
pub struct SpriteCache<S> {
    sprites: HashMap<String, S>,
    gradients: HashMap<String, S>,
    sprite_builds: u64,
    gradient_builds: u64,
}

impl<S> SpriteCache<S> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sprites: HashMap::new(),
            gradients: HashMap::new(),
            sprite_builds: 0,
            gradient_builds: 0,
        }
    }

    /// Returns the sprite for `key`, invoking `factory` on first miss.
    pub fn sprite(&mut self, key: &str, factory: impl FnOnce() -> S) -> &S {
        if !self.sprites.contains_key(key) {
            self.sprite_builds += 1;
            let _ = self.sprites.insert(key.to_owned(), factory());
        }
        &self.sprites[key]
    }

    /// Returns the gradient for `key`, invoking `factory` on first miss.
    pub fn gradient(&mut self, key: &str, factory: impl FnOnce() -> S) -> &S {
        if !self.gradients.contains_key(key) {
            self.gradient_builds += 1;
            let _ = self.gradients.insert(key.to_owned(), factory());
        }
        &self.gradients[key]
    }

    /// Drops gradient entries only; sprites are durable.
    pub fn clear(&mut self) {
        self.gradients.clear();
    }

    /// Drops every entry so sprites rebuild from scratch (theme change).
    pub fn regenerate(&mut self) {
        log::debug!(
            "sprite cache regenerating: dropping {} sprites, {} gradients",
            self.sprites.len(),
            self.gradients.len()
        );
        self.sprites.clear();
        self.gradients.clear();
    }

    /// Number of sprite factory invocations so far.
    #[must_use]
    pub const fn sprite_builds(&self) -> u64 {
        self.sprite_builds
    }

    /// Number of gradient factory invocations so far.
    #[must_use]
    pub const fn gradient_builds(&self) -> u64 {
        self.gradient_builds
    }

    /// Number of cached sprite entries.
    #[must_use]
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

impl<S> Default for SpriteCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache key for a star glow sprite.
#[must_use]
pub fn glow_key(color: StarColor, hovered: bool) -> String {
    let state = if hovered { "hover" } else { "normal" };
    format!("glow:{}:{state}", color.name())
}

/// Cache key for a portal sprite.
#[must_use]
pub fn portal_key(hovered: bool) -> String {
    let state = if hovered { "hover" } else { "normal" };
    format!("portal:{state}")
}

/// Cache key for a named panel background.
#[must_use]
pub fn panel_key(name: &str) -> String {
    format!("panel:{name}")
}

/// Cache key for a radial gradient described by its inner/outer colors.
#[must_use]
pub fn radial_gradient_key(inner: &str, outer: &str, radius: u32) -> String {
    format!("radial:{inner}:{outer}:{radius}")
}
