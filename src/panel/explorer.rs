//! Static file listing panel.

use crate::canvas::{Canvas, GLYPH_HEIGHT};
use crate::dock::DockArea;
use crate::geometry::Rect;
use crate::theme::Theme;

use super::{Panel, PanelContext, PanelState};

pub struct ExplorerPanel {
    state: PanelState,
    entries: Vec<String>,
}

impl ExplorerPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::default(),
            entries: Vec::new(),
        }
    }

    pub fn set_entries(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }

    /// Populate from a directory listing, sorted by name. Unreadable
    /// directories leave the listing empty rather than failing.
    pub fn read_dir(&mut self, path: &std::path::Path) {
        let mut entries: Vec<String> = match std::fs::read_dir(path) {
            Ok(iter) => iter
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        entries.sort();
        self.entries = entries;
    }
}

impl Default for ExplorerPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ExplorerPanel {
    fn name(&self) -> &str {
        "Explorer"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn preferred_area(&self) -> DockArea {
        DockArea::Left
    }

    fn draw(&mut self, canvas: &mut Canvas, rect: Rect, theme: &Theme, _ctx: &PanelContext) {
        let line_height = GLYPH_HEIGHT as i32 + 4;
        let mut y = rect.y + 4;
        if self.entries.is_empty() {
            canvas.text(rect.x + 6, y, "(empty)", theme.text_dim);
            return;
        }
        for entry in &self.entries {
            if y + line_height > rect.y + rect.height as i32 {
                break;
            }
            canvas.text(rect.x + 6, y, entry, theme.text);
            y += line_height;
        }
    }
}
