//! Inspector panel: mirrors window state gathered from bus events.

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::{Canvas, GLYPH_HEIGHT};
use crate::dock::DockArea;
use crate::events::{EventBus, EventKind, ShellEvent};
use crate::geometry::Rect;
use crate::theme::Theme;

use super::{Panel, PanelContext, PanelState};

#[derive(Debug, Default, Clone)]
struct Observed {
    window_size: (u32, u32),
    maximized: bool,
    focused: bool,
    theme: String,
    frames: u64,
}

pub struct InspectorPanel {
    state: PanelState,
    observed: Rc<RefCell<Observed>>,
}

impl InspectorPanel {
    /// Build the panel and wire its bus subscriptions.
    pub fn new(bus: &EventBus) -> Self {
        let observed = Rc::new(RefCell::new(Observed::default()));

        let cell = Rc::clone(&observed);
        bus.subscribe(EventKind::WindowResize, move |event| {
            if let ShellEvent::WindowResize { width, height } = event {
                cell.borrow_mut().window_size = (*width, *height);
            }
        });
        let cell = Rc::clone(&observed);
        bus.subscribe(EventKind::WindowMaximize, move |event| {
            if let ShellEvent::WindowMaximize { maximized } = event {
                cell.borrow_mut().maximized = *maximized;
            }
        });
        let cell = Rc::clone(&observed);
        bus.subscribe(EventKind::WindowFocus, move |event| {
            if let ShellEvent::WindowFocus { focused } = event {
                cell.borrow_mut().focused = *focused;
            }
        });
        let cell = Rc::clone(&observed);
        bus.subscribe(EventKind::ThemeChanged, move |event| {
            if let ShellEvent::ThemeChanged { name } = event {
                cell.borrow_mut().theme = name.clone();
            }
        });
        let cell = Rc::clone(&observed);
        bus.subscribe(EventKind::FrameEnd, move |_| {
            cell.borrow_mut().frames += 1;
        });

        Self {
            state: PanelState::default(),
            observed,
        }
    }
}

impl Panel for InspectorPanel {
    fn name(&self) -> &str {
        "Inspector"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn preferred_area(&self) -> DockArea {
        DockArea::Right
    }

    fn draw(&mut self, canvas: &mut Canvas, rect: Rect, theme: &Theme, _ctx: &PanelContext) {
        let observed = self.observed.borrow().clone();
        let line_height = GLYPH_HEIGHT as i32 + 4;
        let rows = [
            format!("size  {}x{}", observed.window_size.0, observed.window_size.1),
            format!("max   {}", observed.maximized),
            format!("focus {}", observed.focused),
            format!("theme {}", observed.theme),
            format!("frame {}", observed.frames),
        ];
        let mut y = rect.y + 4;
        for row in &rows {
            if y + line_height > rect.y + rect.height as i32 {
                break;
            }
            canvas.text(rect.x + 6, y, row, theme.text);
            y += line_height;
        }
    }
}
