//! Narrow platform boundary.
//!
//! The chrome talks to the OS exclusively through [`WindowBackend`]: window
//! creation, translated input events, geometry get/set, and presenting the
//! software canvas. `native` implements it with winit + softbuffer;
//! `headless` is a scripted stand-in for tests.

pub mod headless;
pub mod native;

pub use headless::HeadlessBackend;
pub use native::NativeBackend;

use crate::canvas::Canvas;
use crate::error::ShellError;
use crate::geometry::{Point, Rect, Size};
use crate::hit_test::ResizeEdge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

/// Platform events after translation, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    CloseRequested,
    Resized { width: u32, height: u32 },
    Moved { x: i32, y: i32 },
    FocusChanged(bool),
    CursorMoved { x: f64, y: f64 },
    MouseInput { pressed: bool, button: MouseButton },
    MouseWheel { delta: f64 },
    ScaleFactorChanged(f64),
}

/// Parameters for creating the undecorated window.
#[derive(Debug, Clone)]
pub struct WindowDesc {
    pub title: String,
    pub size: Size,
    pub position: Option<Point>,
}

/// Everything the chrome needs from the OS, and nothing more.
///
/// `begin_interactive_move` / `begin_interactive_resize` hand the gesture to
/// the platform's own interactive loop; subsequent pointer events belong to
/// the OS until the drag ends.
pub trait WindowBackend {
    fn create_window(&mut self, desc: &WindowDesc) -> Result<(), ShellError>;
    fn destroy_window(&mut self);
    fn is_created(&self) -> bool;

    /// Drain pending platform events without blocking.
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    fn inner_size(&self) -> Size;
    fn outer_position(&self) -> Option<Point>;
    fn set_position(&mut self, position: Point);
    fn set_size(&mut self, size: Size);
    fn set_title(&mut self, title: &str);

    fn set_maximized(&mut self, maximized: bool);
    fn set_minimized(&mut self, minimized: bool);
    fn is_maximized(&self) -> bool;
    fn is_minimized(&self) -> bool;
    fn is_focused(&self) -> bool;
    fn scale_factor(&self) -> f64;

    /// Usable area of the primary monitor, if the platform can report one.
    fn work_area(&self) -> Option<Rect>;

    fn begin_interactive_move(&mut self);
    fn begin_interactive_resize(&mut self, edge: ResizeEdge);

    /// Hint that the next present is imminent.
    fn flush_compositor(&mut self);
    fn present(&mut self, canvas: &Canvas) -> Result<(), ShellError>;

    /// Make the window visible (created hidden to avoid a white flash before
    /// geometry is applied).
    fn show(&mut self);
}
