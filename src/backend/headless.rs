//! Scripted backend for tests.
//!
//! Emulates just enough window-manager behavior to exercise the chrome:
//! geometry setters update an in-memory rect and echo the matching platform
//! event, maximize snaps to the configured work area, and interactive
//! move/resize gestures are recorded instead of performed.

use std::collections::VecDeque;

use crate::canvas::Canvas;
use crate::error::ShellError;
use crate::geometry::{Point, Rect, Size};
use crate::hit_test::ResizeEdge;

use super::{PlatformEvent, WindowBackend, WindowDesc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedOp {
    InteractiveMove,
    InteractiveResize(ResizeEdge),
    FlushCompositor,
    Present,
    Show,
}

pub struct HeadlessBackend {
    created: bool,
    rect: Rect,
    title: String,
    maximized: bool,
    minimized: bool,
    focused: bool,
    scale: f64,
    work_area: Rect,
    queued: VecDeque<PlatformEvent>,
    /// Everything the chrome asked of the platform, in order.
    pub ops: Vec<RecordedOp>,
    /// Set to make the next `create_window` fail.
    pub fail_create: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            created: false,
            rect: Rect::new(0, 0, 0, 0),
            title: String::new(),
            maximized: false,
            minimized: false,
            focused: true,
            scale: 1.0,
            work_area: Rect::new(0, 0, 1920, 1080),
            queued: VecDeque::new(),
            ops: Vec::new(),
            fail_create: false,
        }
    }

    pub fn with_work_area(mut self, work_area: Rect) -> Self {
        self.work_area = work_area;
        self
    }

    /// Script a platform event for the next `poll_events`.
    pub fn queue_event(&mut self, event: PlatformEvent) {
        self.queued.push_back(event);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowBackend for HeadlessBackend {
    fn create_window(&mut self, desc: &WindowDesc) -> Result<(), ShellError> {
        if self.fail_create {
            return Err(ShellError::Init("scripted creation failure".into()));
        }
        self.created = true;
        self.title = desc.title.clone();
        let pos = desc.position.unwrap_or(Point { x: 100, y: 100 });
        self.rect = Rect::new(pos.x, pos.y, desc.size.width, desc.size.height);
        Ok(())
    }

    fn destroy_window(&mut self) {
        self.created = false;
    }

    fn is_created(&self) -> bool {
        self.created
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.queued.drain(..).collect()
    }

    fn inner_size(&self) -> Size {
        self.rect.size()
    }

    fn outer_position(&self) -> Option<Point> {
        Some(self.rect.position())
    }

    fn set_position(&mut self, position: Point) {
        self.rect.x = position.x;
        self.rect.y = position.y;
        self.queued.push_back(PlatformEvent::Moved {
            x: position.x,
            y: position.y,
        });
    }

    fn set_size(&mut self, size: Size) {
        self.rect.width = size.width;
        self.rect.height = size.height;
        self.queued.push_back(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
        });
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_maximized(&mut self, maximized: bool) {
        if maximized == self.maximized {
            return;
        }
        self.maximized = maximized;
        if maximized {
            // Snap to the work area like a real window manager would. The
            // previous rect is intentionally not restored on unmaximize; the
            // chrome re-applies its captured restore geometry.
            self.rect = self.work_area;
            self.queued.push_back(PlatformEvent::Resized {
                width: self.rect.width,
                height: self.rect.height,
            });
        }
    }

    fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    fn is_maximized(&self) -> bool {
        self.maximized
    }

    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn scale_factor(&self) -> f64 {
        self.scale
    }

    fn work_area(&self) -> Option<Rect> {
        Some(self.work_area)
    }

    fn begin_interactive_move(&mut self) {
        self.ops.push(RecordedOp::InteractiveMove);
    }

    fn begin_interactive_resize(&mut self, edge: ResizeEdge) {
        self.ops.push(RecordedOp::InteractiveResize(edge));
    }

    fn flush_compositor(&mut self) {
        self.ops.push(RecordedOp::FlushCompositor);
    }

    fn present(&mut self, _canvas: &Canvas) -> Result<(), ShellError> {
        self.ops.push(RecordedOp::Present);
        Ok(())
    }

    fn show(&mut self) {
        self.ops.push(RecordedOp::Show);
    }
}
