//! Navigation state shared across the pipeline.

use starweave_core::{ObjectRef, PlanetId, ViewMode};

/// Current navigation mode, selection, hover, and sticky planet.
///
/// `current_planet` survives mode switches so returning to planet view
/// re-shows the last inspected planet even if the generic selection changed
/// elsewhere in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Active navigation mode.
    pub mode: ViewMode,
    /// Currently selected object, if any.
    pub selected: Option<ObjectRef>,
    /// Currently hovered object, if any.
    pub hovered: Option<ObjectRef>,
    /// Sticky pointer to the last inspected planet.
    pub current_planet: Option<PlanetId>,
}

impl ViewState {
    /// Creates a view state starting in universe mode with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: ViewMode::Universe,
            selected: None,
            hovered: None,
            current_planet: None,
        }
    }

    /// Records a new selection, updating the sticky planet when the
    /// selection is planet-typed.
    pub fn select(&mut self, object: ObjectRef) {
        self.selected = Some(object);
        if let ObjectRef::Planet(planet) = object {
            self.current_planet = Some(planet);
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starweave_core::{GalaxyId, SystemId};

    #[test]
    fn selecting_a_planet_marks_it_sticky() {
        let mut view = ViewState::new();
        view.select(ObjectRef::Planet(PlanetId::new(5)));
        assert_eq!(view.current_planet, Some(PlanetId::new(5)));
    }

    #[test]
    fn sticky_planet_survives_other_selections() {
        let mut view = ViewState::new();
        view.select(ObjectRef::Planet(PlanetId::new(5)));
        view.select(ObjectRef::Galaxy(GalaxyId::new(1)));
        view.select(ObjectRef::System(SystemId::new(2)));
        assert_eq!(view.current_planet, Some(PlanetId::new(5)));
        assert_eq!(view.selected, Some(ObjectRef::System(SystemId::new(2))));
    }
}
