//! Panel registry and per-frame draw pass.
//!
//! Panels are registered once and kept in insertion order; lookup by name is
//! an index map. Open/close transitions are edge-detected against the
//! previous frame and each edge posts exactly one `ViewOpened`/`ViewClosed`.
//! A panicking panel draw is caught and skipped for that frame; the rest of
//! the frame proceeds.

pub mod console;
pub mod editor;
pub mod explorer;
pub mod inspector;

pub use console::ConsolePanel;
pub use editor::EditorPanel;
pub use explorer::ExplorerPanel;
pub use inspector::InspectorPanel;

use std::collections::{BTreeMap, BTreeSet};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::backend::PlatformEvent;
use crate::canvas::Canvas;
use crate::dock::{DockArea, DockLayout};
use crate::events::{EventBus, ShellEvent};
use crate::geometry::Rect;
use crate::theme::Theme;

pub const TAB_HEIGHT: u32 = 22;

/// Lifecycle flags tracked by the host for every panel.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub open: bool,
    /// Open state at the end of the previous frame; the edge detector
    /// compares against this and the host updates it at frame end.
    pub previous_open: bool,
    /// True only during the first frame after an open edge.
    pub just_opened: bool,
    pub focused: bool,
    /// Whether the host includes this panel in the frame pass at all.
    /// Independent of `open`; a non-processed panel is neither drawn nor
    /// edge-detected until processing resumes.
    pub should_process: bool,
    /// Whether the panel is offered in a window menu.
    pub has_menu_entry: bool,
    /// Content rect from the last draw pass, for pointer routing.
    pub rect: Option<Rect>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            open: false,
            previous_open: false,
            just_opened: false,
            focused: false,
            should_process: true,
            has_menu_entry: true,
            rect: None,
        }
    }
}

/// Per-draw context handed to a panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelContext {
    pub focused: bool,
    pub just_opened: bool,
}

pub trait Panel {
    fn name(&self) -> &str;
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    /// Dock area the panel wants on first open.
    fn preferred_area(&self) -> DockArea {
        DockArea::Center
    }

    fn draw(&mut self, canvas: &mut Canvas, rect: Rect, theme: &Theme, ctx: &PanelContext);

    /// Invoked once per frame for every processed panel, open or not.
    /// Overlays and notification badges live here.
    fn draw_always_visible(&mut self, canvas: &mut Canvas, content: Rect, theme: &Theme) {
        let _ = (canvas, content, theme);
    }

    /// Non-pointer input routed to the focused panel. Return true when
    /// consumed.
    fn handle_event(&mut self, event: &PlatformEvent) -> bool {
        let _ = event;
        false
    }
}

pub struct PanelHost {
    panels: Vec<Box<dyn Panel>>,
    index: BTreeMap<String, usize>,
    layout: DockLayout,
    bus: Rc<EventBus>,
    focus: Option<usize>,
    /// Tab hit-boxes from the last draw, checked before panel rects.
    tab_hits: Vec<(Rect, usize)>,
}

impl PanelHost {
    pub fn new(bus: Rc<EventBus>, layout: DockLayout) -> Self {
        Self {
            panels: Vec::new(),
            index: BTreeMap::new(),
            layout,
            bus,
            focus: None,
            tab_hits: Vec::new(),
        }
    }

    pub fn register(&mut self, panel: Box<dyn Panel>) {
        let name = panel.name().to_string();
        if self.index.contains_key(&name) {
            warn!(name = %name, "panel already registered, ignoring");
            return;
        }
        let area = panel.preferred_area();
        self.layout.assign(&name, area);
        self.index.insert(name, self.panels.len());
        self.panels.push(panel);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Panel> {
        self.index.get(name).map(|&i| self.panels[i].as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Panel>> {
        self.index.get(name).map(|&i| &mut self.panels[i])
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.get(name).is_some_and(|p| p.state().open)
    }

    pub fn set_open(&mut self, name: &str, open: bool) {
        let Some(&i) = self.index.get(name) else {
            warn!(name, "set_open on unknown panel");
            return;
        };
        let state = self.panels[i].state_mut();
        if state.open == open {
            return;
        }
        state.open = open;
        if open {
            state.just_opened = true;
            self.focus_index(Some(i));
        } else if self.focus == Some(i) {
            self.focus_index(None);
        }
    }

    pub fn toggle(&mut self, name: &str) {
        let open = self.is_open(name);
        self.set_open(name, !open);
    }

    /// Exclude or re-include a panel in the frame pass. While excluded the
    /// panel keeps its open flag but is neither drawn nor edge-detected; a
    /// pending open edge fires on the first frame after processing resumes.
    pub fn set_process(&mut self, name: &str, process: bool) {
        let Some(&i) = self.index.get(name) else {
            warn!(name, "set_process on unknown panel");
            return;
        };
        let state = self.panels[i].state_mut();
        state.should_process = process;
        if !process {
            state.rect = None;
            if self.focus == Some(i) {
                self.focus_index(None);
            }
        }
    }

    pub fn set_menu_entry(&mut self, name: &str, visible: bool) {
        match self.index.get(name) {
            Some(&i) => self.panels[i].state_mut().has_menu_entry = visible,
            None => warn!(name, "set_menu_entry on unknown panel"),
        }
    }

    /// Panels offered in a window menu: those with a menu entry that are
    /// part of the frame pass.
    pub fn menu_panel_names(&self) -> Vec<&str> {
        self.panels
            .iter()
            .filter(|p| p.state().has_menu_entry && p.state().should_process)
            .map(|p| p.name())
            .collect()
    }

    pub fn focus_panel(&mut self, name: &str) {
        if let Some(&i) = self.index.get(name) {
            self.focus_index(Some(i));
        }
    }

    fn focus_index(&mut self, index: Option<usize>) {
        if self.focus == index {
            return;
        }
        if let Some(old) = self.focus {
            self.panels[old].state_mut().focused = false;
        }
        if let Some(new) = index {
            self.panels[new].state_mut().focused = true;
        }
        self.focus = index;
    }

    pub fn focused_panel(&self) -> Option<&str> {
        self.focus.map(|i| self.panels[i].name())
    }

    pub fn open_count(&self) -> usize {
        self.panels.iter().filter(|p| p.state().open).count()
    }

    /// Draw all open panels into `content`, area by area.
    ///
    /// Within an area the active panel (the focused one, else the first open)
    /// is drawn last so it covers the others; a tab strip appears only when
    /// the area holds more than one open panel.
    pub fn draw_panels(&mut self, canvas: &mut Canvas, content: Rect, theme: &Theme) {
        self.tab_hits.clear();

        let occupied: BTreeSet<DockArea> = self
            .panels
            .iter()
            .filter(|p| p.state().open && p.state().should_process)
            .map(|p| self.layout.area_of(p.name()))
            .collect();
        let area_rects = self.layout.split(content, &occupied);

        for (&area, &area_rect) in &area_rects {
            let members: Vec<usize> = (0..self.panels.len())
                .filter(|&i| {
                    let state = self.panels[i].state();
                    state.open
                        && state.should_process
                        && self.layout.area_of(self.panels[i].name()) == area
                })
                .collect();
            if members.is_empty() {
                continue;
            }

            let show_tabs = members.len() > 1;
            let active = members
                .iter()
                .copied()
                .find(|&i| self.panels[i].state().focused)
                .unwrap_or(members[0]);

            let panel_rect = if show_tabs {
                self.draw_tab_strip(canvas, area_rect, &members, active, theme);
                Rect::new(
                    area_rect.x,
                    area_rect.y + TAB_HEIGHT as i32,
                    area_rect.width,
                    area_rect.height.saturating_sub(TAB_HEIGHT),
                )
            } else {
                area_rect
            };

            // Inactive first, active last on top.
            for &i in members.iter().filter(|&&i| i != active).chain([&active]) {
                self.draw_one(i, canvas, panel_rect, theme);
            }
        }

        // Always-visible pass runs for every processed panel, open or not.
        for i in 0..self.panels.len() {
            if !self.panels[i].state().should_process {
                continue;
            }
            let panel = &mut self.panels[i];
            let result = catch_unwind(AssertUnwindSafe(|| {
                panel.draw_always_visible(canvas, content, theme);
            }));
            if result.is_err() {
                warn!(
                    name = self.panels[i].name(),
                    "always-visible draw panicked, skipped this frame"
                );
            }
        }
    }

    fn draw_tab_strip(
        &mut self,
        canvas: &mut Canvas,
        area_rect: Rect,
        members: &[usize],
        active: usize,
        theme: &Theme,
    ) {
        canvas.fill_rect(
            area_rect.x,
            area_rect.y,
            area_rect.width,
            TAB_HEIGHT,
            theme.tab_bg,
        );
        let mut x = area_rect.x;
        for &i in members {
            let label = self.panels[i].name();
            let tab_w = Canvas::text_width(label) + 16;
            let bg = if i == active {
                theme.tab_active_bg
            } else {
                theme.tab_bg
            };
            canvas.fill_rect(x, area_rect.y, tab_w, TAB_HEIGHT, bg);
            canvas.text(
                x + 8,
                area_rect.y + (TAB_HEIGHT as i32 - 8) / 2,
                label,
                if i == active { theme.text } else { theme.text_dim },
            );
            if i == active {
                canvas.hline(
                    x,
                    x + tab_w as i32 - 1,
                    area_rect.y + TAB_HEIGHT as i32 - 1,
                    theme.accent,
                );
            }
            self.tab_hits
                .push((Rect::new(x, area_rect.y, tab_w, TAB_HEIGHT), i));
            x += tab_w as i32;
        }
    }

    fn draw_one(&mut self, i: usize, canvas: &mut Canvas, rect: Rect, theme: &Theme) {
        let ctx = PanelContext {
            focused: self.panels[i].state().focused,
            just_opened: self.panels[i].state().just_opened,
        };
        self.panels[i].state_mut().rect = Some(rect);
        canvas.fill_rect(rect.x, rect.y, rect.width, rect.height, theme.panel_bg);
        canvas.stroke_rect(rect.x, rect.y, rect.width, rect.height, theme.panel_border);

        let panel = &mut self.panels[i];
        let result = catch_unwind(AssertUnwindSafe(|| {
            panel.draw(canvas, rect, theme, &ctx);
        }));
        if result.is_err() {
            warn!(name = self.panels[i].name(), "panel draw panicked, skipped this frame");
        }
    }

    /// Detect open/close edges, post the matching events, and roll the
    /// previous-open state forward. Call once per frame after drawing.
    pub fn end_frame(&mut self) {
        for i in 0..self.panels.len() {
            if !self.panels[i].state().should_process {
                continue;
            }
            let name = self.panels[i].name().to_string();
            let state = self.panels[i].state_mut();
            match (state.previous_open, state.open) {
                (false, true) => {
                    state.previous_open = true;
                    state.just_opened = false;
                    debug!(name = %name, "panel opened");
                    self.bus.post(&ShellEvent::ViewOpened { name });
                }
                (true, false) => {
                    state.previous_open = false;
                    state.rect = None;
                    debug!(name = %name, "panel closed");
                    self.bus.post(&ShellEvent::ViewClosed { name });
                }
                _ => {
                    state.just_opened = false;
                }
            }
        }
    }

    /// Route a left press in the client region. Tabs are checked first, then
    /// panel rects topmost-first. The hit panel takes exclusive focus.
    pub fn pointer_pressed(&mut self, x: f64, y: f64) -> bool {
        let tab_hit = self
            .tab_hits
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|&(_, i)| i);
        if let Some(i) = tab_hit {
            self.focus_index(Some(i));
            return true;
        }
        // Focused panel sits on top of its area; check it before the rest.
        let ordered = self
            .focus
            .into_iter()
            .chain((0..self.panels.len()).rev().filter(|&i| Some(i) != self.focus));
        let mut hit = None;
        for i in ordered {
            let state = self.panels[i].state();
            if state.open && state.rect.is_some_and(|r| r.contains(x, y)) {
                hit = Some(i);
                break;
            }
        }
        match hit {
            Some(i) => {
                self.focus_index(Some(i));
                true
            }
            None => false,
        }
    }

    /// Forward an event to the focused panel.
    pub fn dispatch_event(&mut self, event: &PlatformEvent) -> bool {
        match self.focus {
            Some(i) => self.panels[i].handle_event(event),
            None => false,
        }
    }

    pub fn panel_names(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.name()).collect()
    }

    /// Invariant check used by tests: at most one panel carries focus.
    pub fn focused_count(&self) -> usize {
        self.panels.iter().filter(|p| p.state().focused).count()
    }
}
