//! Window chrome controller.
//!
//! Owns the backend window through its lifecycle, applies and persists
//! geometry, re-raises OS state changes as bus events, and routes caption
//! and border presses into the platform's interactive move/resize loops.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::backend::{PlatformEvent, WindowBackend, WindowDesc};
use crate::canvas::Canvas;
use crate::error::ShellError;
use crate::events::{EventBus, ShellEvent};
use crate::geometry::{GeometryStore, Point, Rect, Size};
use crate::hit_test::{ChromeMetrics, HitRegion, ResizeEdge, classify};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initializing,
    Shown,
    Closing,
    Destroyed,
}

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);
const DOUBLE_CLICK_SLOP: f64 = 4.0;

pub struct WindowChrome<B: WindowBackend> {
    backend: B,
    bus: Rc<EventBus>,
    metrics: ChromeMetrics,
    lifecycle: Lifecycle,
    title: String,
    geometry: GeometryStore,
    was_maximized: bool,
    focused: bool,
    cursor: (f64, f64),
    last_caption_click: Option<(Instant, (f64, f64))>,
}

impl<B: WindowBackend> WindowChrome<B> {
    pub fn new(backend: B, bus: Rc<EventBus>) -> Self {
        Self {
            backend,
            bus,
            metrics: ChromeMetrics::default(),
            lifecycle: Lifecycle::Uninitialized,
            title: String::new(),
            geometry: GeometryStore::new(),
            was_maximized: false,
            focused: false,
            cursor: (0.0, 0.0),
            last_caption_click: None,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn metrics(&self) -> &ChromeMetrics {
        &self.metrics
    }

    /// Create and show the window with persisted geometry applied.
    ///
    /// Creation failure is fatal: there is no shell without a window.
    pub fn initialize(&mut self, settings: &Settings, title: &str) -> Result<(), ShellError> {
        if self.lifecycle != Lifecycle::Uninitialized {
            warn!(lifecycle = ?self.lifecycle, "initialize called twice, ignoring");
            return Ok(());
        }
        self.lifecycle = Lifecycle::Initializing;
        self.title = title.to_string();

        let initial = GeometryStore::load_initial(settings);
        self.backend.create_window(&WindowDesc {
            title: title.to_string(),
            size: initial.size,
            position: initial.position,
        })?;

        if initial.position.is_none() {
            self.center();
        }
        if initial.maximized {
            self.maximize();
            self.was_maximized = true;
        }
        self.focused = self.backend.is_focused();
        self.backend.show();
        self.lifecycle = Lifecycle::Shown;
        info!(title, ?initial, "window chrome initialized");
        Ok(())
    }

    /// Persist geometry into `settings` and tear the window down.
    pub fn shutdown(&mut self, settings: &mut Settings) {
        if self.lifecycle != Lifecycle::Shown {
            return;
        }
        self.lifecycle = Lifecycle::Closing;

        let maximized = self.backend.is_maximized();
        // While maximized the OS reports the work-area rect, which must not
        // clobber the persisted normal geometry. Only the flag is written.
        let rect = if maximized { None } else { self.current_rect() };
        GeometryStore::persist(settings, rect, maximized);

        self.backend.destroy_window();
        self.lifecycle = Lifecycle::Destroyed;
        debug!("window chrome destroyed");
    }

    fn current_rect(&self) -> Option<Rect> {
        let pos = self.backend.outer_position()?;
        let size = self.backend.inner_size();
        Some(Rect::new(pos.x, pos.y, size.width, size.height))
    }

    /// Maximize, capturing the rect to return to. Idempotent.
    pub fn maximize(&mut self) {
        if self.backend.is_maximized() {
            return;
        }
        if let Some(rect) = self.current_rect() {
            self.geometry.capture_restore(rect);
        }
        self.backend.set_maximized(true);
    }

    /// Leave the maximized state and re-apply the captured restore rect.
    pub fn restore(&mut self) {
        if !self.backend.is_maximized() {
            return;
        }
        self.backend.set_maximized(false);
        if let Some(rect) = self.geometry.take_restore() {
            self.backend.set_position(rect.position());
            self.backend.set_size(rect.size());
        }
    }

    pub fn toggle_maximize(&mut self) {
        if self.backend.is_maximized() {
            self.restore();
        } else {
            self.maximize();
        }
    }

    pub fn minimize(&mut self) {
        self.backend.set_minimized(true);
    }

    /// Center the window on the primary monitor's work area.
    pub fn center(&mut self) {
        let Some(work_area) = self.backend.work_area() else {
            return;
        };
        let size = self.backend.inner_size();
        let x = work_area.x + (work_area.width.saturating_sub(size.width) / 2) as i32;
        let y = work_area.y + (work_area.height.saturating_sub(size.height) / 2) as i32;
        self.backend.set_position(Point { x, y });
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.backend.set_title(title);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_position(&mut self, position: Point) {
        self.backend.set_position(position);
    }

    pub fn set_size(&mut self, size: Size) {
        self.backend.set_size(size);
    }

    pub fn is_maximized(&self) -> bool {
        self.backend.is_maximized()
    }

    pub fn is_minimized(&self) -> bool {
        self.backend.is_minimized()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn scale_factor(&self) -> f64 {
        self.backend.scale_factor()
    }

    pub fn client_size(&self) -> Size {
        self.backend.inner_size()
    }

    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// Drain backend events, re-raising state changes on the bus. The raw
    /// events come back so the caller can route pointer input.
    pub fn pump(&mut self) -> Vec<PlatformEvent> {
        let events = self.backend.poll_events();
        for event in &events {
            match event {
                PlatformEvent::Resized { width, height } => {
                    self.bus.post(&ShellEvent::WindowResize {
                        width: *width,
                        height: *height,
                    });
                }
                PlatformEvent::CloseRequested => {
                    self.bus.post(&ShellEvent::WindowClose { should_close: true });
                }
                PlatformEvent::FocusChanged(focused) => {
                    self.focused = *focused;
                    self.bus.post(&ShellEvent::WindowFocus { focused: *focused });
                }
                PlatformEvent::CursorMoved { x, y } => {
                    self.cursor = (*x, *y);
                }
                _ => {}
            }
        }
        // The platform has no maximize event; poll for the transition.
        let maximized = self.backend.is_maximized();
        if maximized != self.was_maximized {
            self.was_maximized = maximized;
            self.bus.post(&ShellEvent::WindowMaximize { maximized });
        }
        events
    }

    /// Classify the current cursor position against the chrome layout.
    pub fn hit_test(&self) -> HitRegion {
        let size = self.backend.inner_size();
        classify(
            self.cursor.0,
            self.cursor.1,
            size.width,
            size.height,
            &self.metrics,
            !self.backend.is_maximized(),
        )
    }

    /// Left press landed on the caption: either the second click of a
    /// double-click (toggle maximize) or the start of a window drag.
    pub fn caption_pressed(&mut self) {
        let now = Instant::now();
        let is_double = self
            .last_caption_click
            .is_some_and(|(at, (x, y))| {
                now.duration_since(at) <= DOUBLE_CLICK_WINDOW
                    && (self.cursor.0 - x).abs() <= DOUBLE_CLICK_SLOP
                    && (self.cursor.1 - y).abs() <= DOUBLE_CLICK_SLOP
            });
        if is_double {
            self.last_caption_click = None;
            self.toggle_maximize();
        } else {
            self.last_caption_click = Some((now, self.cursor));
            self.backend.begin_interactive_move();
        }
    }

    /// Left press landed on a resize border.
    pub fn resize_pressed(&mut self, edge: ResizeEdge) {
        if self.backend.is_maximized() {
            return;
        }
        self.backend.begin_interactive_resize(edge);
    }

    pub fn flush_compositor(&mut self) {
        self.backend.flush_compositor();
    }

    pub fn present(&mut self, canvas: &Canvas) -> Result<(), ShellError> {
        self.backend.present(canvas)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{HeadlessBackend, RecordedOp};
    use crate::backend::MouseButton;
    use crate::events::EventKind;
    use crate::settings::{Settings, keys};
    use std::cell::RefCell;

    fn shown_chrome() -> WindowChrome<HeadlessBackend> {
        let mut chrome = WindowChrome::new(HeadlessBackend::new(), Rc::new(EventBus::new()));
        let mut settings = Settings::new();
        settings.set_int(keys::WINDOW_POS_X, 100);
        settings.set_int(keys::WINDOW_POS_Y, 80);
        settings.set_int(keys::WINDOW_WIDTH, 800);
        settings.set_int(keys::WINDOW_HEIGHT, 600);
        chrome.initialize(&settings, "test").unwrap();
        chrome
    }

    #[test]
    fn creation_failure_is_fatal() {
        let mut backend = HeadlessBackend::new();
        backend.fail_create = true;
        let mut chrome = WindowChrome::new(backend, Rc::new(EventBus::new()));
        let err = chrome.initialize(&Settings::new(), "test");
        assert!(matches!(err, Err(ShellError::Init(_))));
    }

    #[test]
    fn maximize_then_restore_returns_prior_geometry() {
        let mut chrome = shown_chrome();
        let before = chrome.backend().rect();
        chrome.maximize();
        assert!(chrome.is_maximized());
        assert_ne!(chrome.backend().rect(), before);
        chrome.restore();
        assert!(!chrome.is_maximized());
        assert_eq!(chrome.backend().rect(), before);
    }

    #[test]
    fn maximize_is_idempotent_and_keeps_first_restore_rect() {
        let mut chrome = shown_chrome();
        let before = chrome.backend().rect();
        chrome.maximize();
        chrome.maximize();
        chrome.restore();
        assert_eq!(chrome.backend().rect(), before);
    }

    #[test]
    fn pump_raises_maximize_transition_once() {
        let bus = Rc::new(EventBus::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        bus.subscribe(EventKind::WindowMaximize, move |e| {
            log.borrow_mut().push(e.clone());
        });
        let mut chrome = WindowChrome::new(HeadlessBackend::new(), Rc::clone(&bus));
        chrome.initialize(&Settings::new(), "test").unwrap();

        chrome.pump();
        assert!(seen.borrow().is_empty());
        chrome.maximize();
        chrome.pump();
        chrome.pump();
        assert_eq!(
            *seen.borrow(),
            vec![ShellEvent::WindowMaximize { maximized: true }]
        );
    }

    #[test]
    fn shutdown_skips_rect_while_maximized_but_writes_flag() {
        let mut chrome = shown_chrome();
        chrome.maximize();
        let mut settings = Settings::new();
        settings.set_int(keys::WINDOW_WIDTH, 800);
        settings.set_int(keys::WINDOW_POS_X, 100);
        chrome.shutdown(&mut settings);
        assert_eq!(chrome.lifecycle(), Lifecycle::Destroyed);
        assert!(settings.get_bool(keys::WINDOW_MAXIMIZED, false));
        // The maximized work-area rect never clobbers the saved geometry.
        assert_eq!(settings.get_int(keys::WINDOW_WIDTH, 0), 800);
        assert_eq!(settings.get_int(keys::WINDOW_POS_X, 0), 100);
    }

    #[test]
    fn shutdown_persists_current_rect_when_normal() {
        let mut chrome = shown_chrome();
        let mut settings = Settings::new();
        chrome.shutdown(&mut settings);
        assert_eq!(settings.get_int(keys::WINDOW_WIDTH, 0), 800);
        assert_eq!(settings.get_int(keys::WINDOW_HEIGHT, 0), 600);
        assert_eq!(settings.get_int(keys::WINDOW_POS_X, -1), 100);
        assert_eq!(settings.get_int(keys::WINDOW_POS_Y, -1), 80);
        assert!(!settings.get_bool(keys::WINDOW_MAXIMIZED, true));
    }

    #[test]
    fn initialize_restores_persisted_maximized_state() {
        let mut settings = Settings::new();
        settings.set_int(keys::WINDOW_POS_X, 10);
        settings.set_int(keys::WINDOW_POS_Y, 10);
        settings.set_bool(keys::WINDOW_MAXIMIZED, true);
        let mut chrome = WindowChrome::new(HeadlessBackend::new(), Rc::new(EventBus::new()));
        chrome.initialize(&settings, "test").unwrap();
        assert!(chrome.is_maximized());
        // The maximize transition was applied before the first pump, so it is
        // not re-raised as a change.
        chrome.pump();
        assert!(chrome.is_maximized());
    }

    #[test]
    fn resize_press_is_suppressed_while_maximized() {
        let mut chrome = shown_chrome();
        chrome.maximize();
        chrome.resize_pressed(ResizeEdge::Left);
        assert!(chrome.backend().ops.iter().all(|op| !matches!(
            op,
            RecordedOp::InteractiveResize(_)
        )));
        chrome.restore();
        chrome.resize_pressed(ResizeEdge::Left);
        assert!(chrome
            .backend()
            .ops
            .contains(&RecordedOp::InteractiveResize(ResizeEdge::Left)));
    }

    #[test]
    fn caption_double_click_toggles_maximize() {
        let mut chrome = shown_chrome();
        chrome.caption_pressed();
        assert!(chrome.backend().ops.contains(&RecordedOp::InteractiveMove));
        chrome.caption_pressed();
        assert!(chrome.is_maximized());
        // The pair is consumed; a third press starts a fresh drag.
        chrome.caption_pressed();
        assert!(chrome.is_maximized());
    }

    #[test]
    fn pump_routes_cursor_and_focus() {
        let bus = Rc::new(EventBus::new());
        let mut chrome = WindowChrome::new(HeadlessBackend::new(), Rc::clone(&bus));
        chrome.initialize(&Settings::new(), "test").unwrap();
        // Drain the Moved event echoed by the initial centering.
        chrome.pump();
        chrome
            .backend_mut()
            .queue_event(PlatformEvent::CursorMoved { x: 12.0, y: 7.0 });
        chrome
            .backend_mut()
            .queue_event(PlatformEvent::FocusChanged(false));
        chrome
            .backend_mut()
            .queue_event(PlatformEvent::MouseInput {
                pressed: true,
                button: MouseButton::Left,
            });
        let events = chrome.pump();
        assert_eq!(events.len(), 3);
        assert_eq!(chrome.cursor(), (12.0, 7.0));
        assert!(!chrome.is_focused());
    }
}
