//! Minimal text buffer panel. Content editing is not the interesting part of
//! the shell; this keeps just enough state to exercise focus and scrolling.

use crate::backend::PlatformEvent;
use crate::canvas::{Canvas, GLYPH_HEIGHT};
use crate::dock::DockArea;
use crate::geometry::Rect;
use crate::theme::Theme;

use super::{Panel, PanelContext, PanelState};

pub struct EditorPanel {
    state: PanelState,
    lines: Vec<String>,
    scroll: usize,
}

impl EditorPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::default(),
            lines: vec![String::new()],
            scroll: 0,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.scroll = 0;
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }
}

impl Default for EditorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for EditorPanel {
    fn name(&self) -> &str {
        "Editor"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn preferred_area(&self) -> DockArea {
        DockArea::Center
    }

    fn draw(&mut self, canvas: &mut Canvas, rect: Rect, theme: &Theme, ctx: &PanelContext) {
        let line_height = GLYPH_HEIGHT as i32 + 4;
        let gutter = 40;
        let mut y = rect.y + 4;
        for (idx, line) in self.lines.iter().enumerate().skip(self.scroll) {
            if y + line_height > rect.y + rect.height as i32 {
                break;
            }
            canvas.text(rect.x + 4, y, &format!("{:>3}", idx + 1), theme.text_dim);
            canvas.text(rect.x + gutter, y, line, theme.text);
            y += line_height;
        }
        if ctx.focused {
            canvas.stroke_rect(rect.x, rect.y, rect.width, rect.height, theme.accent);
        }
    }

    fn handle_event(&mut self, event: &PlatformEvent) -> bool {
        match event {
            PlatformEvent::MouseWheel { delta } => {
                if *delta < 0.0 {
                    self.scroll = (self.scroll + 1).min(self.lines.len().saturating_sub(1));
                } else {
                    self.scroll = self.scroll.saturating_sub(1);
                }
                true
            }
            _ => false,
        }
    }
}
