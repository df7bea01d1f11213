//! Tab strip render state: one button per tab plus the drop indicator.
//!
//! A host UI paints this; it may replace the uniform layout rects with
//! measured ones via [`TabStrip::set_rect`] so drop-index math matches what
//! the user sees.

use super::TabRecord;

/// Horizontal extent of a tab button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabRect {
    pub left: f32,
    pub width: f32,
}

impl TabRect {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Render model of one tab button
#[derive(Debug, Clone, PartialEq)]
pub struct TabButton {
    pub name: String,
    pub active: bool,
    pub pinned: bool,
    /// Source of the drag currently in flight
    pub dragging: bool,
    pub rect: TabRect,
}

/// Buttons of one container's strip, left to right.
#[derive(Debug, Clone)]
pub struct TabStrip {
    buttons: Vec<TabButton>,
    /// Slot the drop indicator is shown at (at most one)
    drop_indicator: Option<usize>,
    tab_width: f32,
    tab_spacing: f32,
}

impl TabStrip {
    pub fn new(tab_width: f32, tab_spacing: f32) -> Self {
        Self {
            buttons: Vec::new(),
            drop_indicator: None,
            tab_width,
            tab_spacing,
        }
    }

    /// Rebuild every button from the tab list.
    ///
    /// Like clearing and re-populating the strip element: the drop indicator
    /// and any dragging mark are dropped too.
    pub fn render(&mut self, tabs: &[TabRecord], active: Option<&str>) {
        let stride = self.tab_width + self.tab_spacing;
        self.buttons = tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| TabButton {
                name: tab.name.clone(),
                active: active == Some(tab.name.as_str()),
                pinned: tab.pinned,
                dragging: false,
                rect: TabRect::new(i as f32 * stride, self.tab_width),
            })
            .collect();
        self.drop_indicator = None;
    }

    /// Give exactly the named button the active state
    pub fn set_active(&mut self, name: &str) {
        for button in &mut self.buttons {
            button.active = button.name == name;
        }
    }

    pub fn buttons(&self) -> &[TabButton] {
        &self.buttons
    }

    pub fn button(&self, name: &str) -> Option<&TabButton> {
        self.buttons.iter().find(|b| b.name == name)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.buttons
            .iter()
            .find(|b| b.active)
            .map(|b| b.name.as_str())
    }

    pub fn rects(&self) -> Vec<TabRect> {
        self.buttons.iter().map(|b| b.rect).collect()
    }

    /// Record a measured rect for a button. Returns false for unknown names.
    pub fn set_rect(&mut self, name: &str, rect: TabRect) -> bool {
        match self.buttons.iter_mut().find(|b| b.name == name) {
            Some(button) => {
                button.rect = rect;
                true
            }
            None => false,
        }
    }

    pub fn set_dragging(&mut self, name: &str, dragging: bool) -> bool {
        match self.buttons.iter_mut().find(|b| b.name == name) {
            Some(button) => {
                button.dragging = dragging;
                true
            }
            None => false,
        }
    }

    pub fn clear_dragging(&mut self) {
        for button in &mut self.buttons {
            button.dragging = false;
        }
    }

    pub fn dragging_name(&self) -> Option<&str> {
        self.buttons
            .iter()
            .find(|b| b.dragging)
            .map(|b| b.name.as_str())
    }

    /// Show the indicator at `slot`, replacing any previous one
    pub fn show_drop_indicator(&mut self, slot: usize) {
        self.drop_indicator = Some(slot.min(self.buttons.len()));
    }

    pub fn clear_drop_indicator(&mut self) {
        self.drop_indicator = None;
    }

    pub fn drop_indicator(&self) -> Option<usize> {
        self.drop_indicator
    }

    /// X coordinate the indicator is painted at
    pub fn indicator_x(&self) -> Option<f32> {
        let slot = self.drop_indicator?;
        Some(match self.buttons.get(slot) {
            Some(button) => button.rect.left - self.tab_spacing / 2.0,
            None => self
                .buttons
                .last()
                .map(|b| b.rect.right() + self.tab_spacing / 2.0)
                .unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<TabRecord> {
        names.iter().map(|n| TabRecord::new(*n, "")).collect()
    }

    #[test]
    fn render_lays_out_buttons_uniformly() {
        let mut strip = TabStrip::new(100.0, 4.0);
        strip.render(&records(&["A", "B", "C"]), Some("B"));

        assert_eq!(strip.names(), vec!["A", "B", "C"]);
        assert_eq!(strip.active_name(), Some("B"));
        assert_eq!(strip.buttons()[2].rect, TabRect::new(208.0, 100.0));
        assert_eq!(strip.buttons()[0].rect.center(), 50.0);
    }

    #[test]
    fn render_clears_indicator_and_drag_marks() {
        let mut strip = TabStrip::new(100.0, 0.0);
        strip.render(&records(&["A", "B"]), None);
        strip.set_dragging("A", true);
        strip.show_drop_indicator(2);
        assert_eq!(strip.indicator_x(), Some(200.0));

        strip.render(&records(&["A", "B"]), None);
        assert_eq!(strip.drop_indicator(), None);
        assert_eq!(strip.dragging_name(), None);
    }

    #[test]
    fn set_active_marks_exactly_one_button() {
        let mut strip = TabStrip::new(100.0, 0.0);
        strip.render(&records(&["A", "B", "C"]), Some("A"));
        strip.set_active("C");
        assert_eq!(strip.buttons().iter().filter(|b| b.active).count(), 1);
        assert_eq!(strip.active_name(), Some("C"));
    }
}
