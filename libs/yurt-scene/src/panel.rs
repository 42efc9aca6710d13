//! # Control Panel
//!
//! Per-part visibility toggles and per-material-group colour pickers.
//!
//! The panel only holds state. [`ControlPanel::apply`] pushes it into a
//! [`SceneGraph`]; names the graph does not know are skipped, so one panel
//! works for every scene strategy.
//!
//! ```rust
//! use yurt_scene::ControlPanel;
//!
//! let mut panel = ControlPanel::new();
//! panel.toggle("lattice");
//! assert_eq!(panel.visibility().get("lattice"), Some(false));
//! assert_eq!(panel.visibility().get("roof"), Some(true));
//! ```

use crate::error::SceneError;
use crate::graph::SceneGraph;
use config::constants::{COLOR_PICKERS, PART_NAMES};
use tracing::debug;
use yurt_csg::Color;

// =============================================================================
// VISIBILITY
// =============================================================================

/// Ordered `part name → visible` flags over [`PART_NAMES`].
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityState {
    entries: Vec<(&'static str, bool)>,
}

impl VisibilityState {
    /// Every part visible.
    pub fn new() -> Self {
        Self {
            entries: PART_NAMES.iter().map(|&name| (name, true)).collect(),
        }
    }

    /// Flag for `name`, or `None` outside the fixed part list.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(part, _)| *part == name)
            .map(|&(_, visible)| visible)
    }

    /// Flips one entry. Returns false for unknown names.
    pub fn toggle(&mut self, name: &str) -> bool {
        match self.entry_mut(name) {
            Some(visible) => {
                *visible = !*visible;
                true
            }
            None => false,
        }
    }

    /// Sets one entry. Returns false for unknown names.
    pub fn set(&mut self, name: &str, visible: bool) -> bool {
        match self.entry_mut(name) {
            Some(flag) => {
                *flag = visible;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.entries.iter().copied()
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut bool> {
        self.entries
            .iter_mut()
            .find(|(part, _)| *part == name)
            .map(|(_, visible)| visible)
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// COLOURS
// =============================================================================

/// One colour input bound to a material group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPicker {
    pub id: &'static str,
    pub group: &'static str,
    pub color: Color,
}

/// Current value of every picker in [`COLOR_PICKERS`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorState {
    pickers: Vec<ColorPicker>,
}

impl ColorState {
    /// Pickers at their default colours.
    pub fn new() -> Self {
        Self {
            pickers: COLOR_PICKERS
                .iter()
                .map(|&(id, group, hex)| ColorPicker {
                    id,
                    group,
                    color: Color::from_u32(hex),
                })
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<Color> {
        self.pickers.iter().find(|p| p.id == id).map(|p| p.color)
    }

    /// Parses `hex` and stores it. Returns `Ok(false)` for unknown pickers.
    ///
    /// # Errors
    ///
    /// `InvalidColor` if `hex` is not a `#rrggbb` / `#rgb` colour, checked
    /// before the picker id.
    pub fn set(&mut self, id: &str, hex: &str) -> Result<bool, SceneError> {
        let color = Color::from_hex(hex)?;
        match self.pickers.iter_mut().find(|p| p.id == id) {
            Some(picker) => {
                picker.color = color;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorPicker> {
        self.pickers.iter()
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// PANEL
// =============================================================================

/// Visibility and colour state with a change flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    visibility: VisibilityState,
    colors: ColorState,
    dirty: bool,
}

impl ControlPanel {
    /// Defaults; starts dirty so the first apply pushes everything.
    pub fn new() -> Self {
        Self {
            visibility: VisibilityState::new(),
            colors: ColorState::new(),
            dirty: true,
        }
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn colors(&self) -> &ColorState {
        &self.colors
    }

    /// Flips one part. Unknown names are ignored.
    pub fn toggle(&mut self, name: &str) {
        if self.visibility.toggle(name) {
            self.dirty = true;
        } else {
            debug!(name, "Toggle for unknown part ignored");
        }
    }

    /// Shows or hides one part. Unknown names are ignored.
    pub fn set_visible(&mut self, name: &str, visible: bool) {
        if self.visibility.set(name, visible) {
            self.dirty = true;
        } else {
            debug!(name, "Visibility for unknown part ignored");
        }
    }

    /// Sets a picker from a hex string. Unknown picker ids are ignored.
    ///
    /// # Errors
    ///
    /// `InvalidColor` for malformed hex; the panel is left unchanged.
    pub fn set_color(&mut self, picker: &str, hex: &str) -> Result<(), SceneError> {
        if self.colors.set(picker, hex)? {
            self.dirty = true;
        } else {
            debug!(picker, "Colour for unknown picker ignored");
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the panel for re-application, e.g. after the graph was
    /// replaced.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Pushes every entry into `graph` and clears the change flag.
    ///
    /// Parts and groups missing from the graph are logged and skipped.
    pub fn apply(&mut self, graph: &mut SceneGraph) {
        for (name, visible) in self.visibility.iter() {
            if let Err(err) = graph.set_visible(name, visible) {
                debug!(%err, "Visibility toggle skipped");
            }
        }
        for picker in self.colors.iter() {
            if let Err(err) = graph.set_group_color(picker.group, picker.color) {
                debug!(picker = picker.id, %err, "Colour picker skipped");
            }
        }
        self.dirty = false;
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yurt_csg::CsgError;

    #[test]
    fn test_toggle_flips_only_that_entry() {
        let mut panel = ControlPanel::new();
        panel.toggle("poles");

        for (name, visible) in panel.visibility().iter() {
            assert_eq!(visible, name != "poles", "{name}");
        }
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut state = VisibilityState::new();
        state.toggle("roof");
        state.toggle("roof");
        assert_eq!(state.get("roof"), Some(true));
    }

    #[test]
    fn test_unknown_part_is_noop() {
        let mut panel = ControlPanel::new();
        let mut graph = SceneGraph::new();
        panel.apply(&mut graph);

        let before = panel.clone();
        panel.toggle("chimney");
        panel.set_visible("chimney", false);
        assert_eq!(panel, before);
        assert!(!panel.is_dirty());
    }

    #[test]
    fn test_picker_defaults() {
        let colors = ColorState::new();
        assert_eq!(colors.get("roofColor").map(|c| c.to_u32()), Some(0xcc9933));
        assert_eq!(colors.get("windowColor").map(|c| c.to_u32()), Some(0x99ccff));
    }

    #[test]
    fn test_invalid_hex_is_error() {
        let mut panel = ControlPanel::new();
        let err = panel.set_color("wallColor", "#12345g").unwrap_err();
        assert!(matches!(err, SceneError::Csg(CsgError::InvalidColor { .. })));
        assert_eq!(panel.colors().get("wallColor"), Some(Color::WHITE));
    }

    #[test]
    fn test_unknown_picker_is_noop() {
        let mut panel = ControlPanel::new();
        assert!(panel.set_color("floorColor", "#000000").is_ok());
        assert_eq!(panel.colors(), &ColorState::new());
    }

    #[test]
    fn test_apply_swallows_missing_names() {
        let mut panel = ControlPanel::new();
        panel.toggle("walls");
        panel.apply(&mut SceneGraph::new());
        assert!(!panel.is_dirty());
    }
}
