//! A frameless desktop tool shell.
//!
//! The crate owns an undecorated native window, draws its own title bar and
//! resize borders, and hosts a dockable set of panels rendered through a
//! software immediate-mode canvas. The interesting machinery lives in:
//!
//! - [`chrome`]: the window lifecycle state machine and pointer routing that
//!   fakes native chrome on top of an undecorated window.
//! - [`hit_test`]: classification of cursor positions into caption, control
//!   buttons, resize borders, or client pass-through.
//! - [`panel`]: the panel registry with open/close/focus lifecycle tracking.
//! - [`events`]: the synchronous typed event bus decoupling the pieces.
//! - [`backend`]: the narrow platform boundary (winit/softbuffer in
//!   production, a scripted headless backend in tests).

pub mod app;
pub mod backend;
pub mod canvas;
pub mod chrome;
pub mod dock;
pub mod error;
pub mod events;
pub mod geometry;
pub mod hit_test;
pub mod pacer;
pub mod panel;
pub mod settings;
pub mod theme;
pub mod title_bar;
pub mod tracing_sub;
