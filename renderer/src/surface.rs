//! On-demand planet surface grids.
//!
//! Surface layouts are not part of the periodic snapshot; the first time
//! planet view needs one, the store reports a miss and the renderer emits
//! a single `SurfaceDataNeeded` intent. Until the host answers, the frame
//! renders the deterministic loading placeholder instead of blocking.

use std::collections::{HashMap, HashSet};

use starweave_core::{PlanetId, SurfaceGrid};

/// Outcome of asking the store for a planet's surface grid.
#[derive(Debug, PartialEq)]
pub enum SurfaceLookup<'a> {
    /// The grid is available for drawing.
    Loaded(&'a SurfaceGrid),
    /// The grid was requested this call; emit the intent.
    RequestNeeded,
    /// The grid was requested earlier and has not arrived yet.
    Pending,
}

/// Cache of fetched surface grids plus single-shot request tracking.
#[derive(Debug, Default)]
pub struct SurfaceStore {
    grids: HashMap<PlanetId, SurfaceGrid>,
    pending: HashSet<PlanetId>,
}

impl SurfaceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the grid for `planet`, latching a request on first miss.
    pub fn lookup(&mut self, planet: PlanetId) -> SurfaceLookup<'_> {
        if self.grids.contains_key(&planet) {
            return SurfaceLookup::Loaded(&self.grids[&planet]);
        }
        if self.pending.insert(planet) {
            SurfaceLookup::RequestNeeded
        } else {
            SurfaceLookup::Pending
        }
    }

    /// Stores a grid delivered by the host and clears its pending mark.
    pub fn provide(&mut self, grid: SurfaceGrid) {
        let _ = self.pending.remove(&grid.planet);
        let _ = self.grids.insert(grid.planet, grid);
    }

    /// Returns the cached grid without touching request state.
    #[must_use]
    pub fn get(&self, planet: PlanetId) -> Option<&SurfaceGrid> {
        self.grids.get(&planet)
    }
}
