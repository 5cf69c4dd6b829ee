//! winit + softbuffer backend.
//!
//! winit 0.30 requires windows to be created inside `resumed()`, so creation
//! pumps the event loop once with a throwaway handler and extracts the window
//! and surface from it. Per-frame polling pumps with a zero timeout and a
//! collector handler that translates events; everything not translated stays
//! on winit's default path.
//!
//! Field declaration order is load-bearing: fields drop LIFO, so `surface`
//! drops before `_context`, which drops before `window`, which drops before
//! `event_loop`.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use softbuffer::{Context, Surface};
use tracing::{debug, warn};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, OwnedDisplayHandle};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{ResizeDirection, Window as WinitWindow, WindowAttributes, WindowId};

use crate::canvas::Canvas;
use crate::error::ShellError;
use crate::geometry::{Point, Rect, Size};
use crate::hit_test::ResizeEdge;

use super::{MouseButton, PlatformEvent, WindowBackend, WindowDesc};

type SurfaceHandle = Surface<OwnedDisplayHandle, Arc<WinitWindow>>;

pub struct NativeBackend {
    // Drops last.
    event_loop: Option<EventLoop<()>>,
    window: Option<Arc<WinitWindow>>,
    // Must outlive surface.
    _context: Option<Context<OwnedDisplayHandle>>,
    // Drops first.
    surface: Option<SurfaceHandle>,
}

impl NativeBackend {
    pub fn new() -> Result<Self, ShellError> {
        let event_loop = EventLoop::builder()
            .build()
            .map_err(|e| ShellError::Init(format!("event loop creation failed: {e}")))?;
        Ok(Self {
            event_loop: Some(event_loop),
            window: None,
            _context: None,
            surface: None,
        })
    }
}

/// One-shot handler that creates the window inside `resumed()`.
struct Creator {
    attrs: Option<WindowAttributes>,
    result: Option<(Arc<WinitWindow>, Context<OwnedDisplayHandle>, SurfaceHandle)>,
    error: Option<String>,
}

impl ApplicationHandler for Creator {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.result.is_some() || self.error.is_some() {
            return;
        }
        let Some(attrs) = self.attrs.take() else {
            return;
        };
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.error = Some(format!("create_window failed: {e}"));
                return;
            }
        };
        let context = match Context::new(event_loop.owned_display_handle()) {
            Ok(c) => c,
            Err(e) => {
                self.error = Some(format!("softbuffer context failed: {e}"));
                return;
            }
        };
        let surface = match Surface::new(&context, window.clone()) {
            Ok(s) => s,
            Err(e) => {
                self.error = Some(format!("softbuffer surface failed: {e}"));
                return;
            }
        };
        self.result = Some((window, context, surface));
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

/// Per-frame handler that translates window events into [`PlatformEvent`]s.
struct Collector {
    events: Vec<PlatformEvent>,
}

impl ApplicationHandler for Collector {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if let Some(translated) = translate(event) {
            self.events.push(translated);
        }
    }
}

fn translate(event: WindowEvent) -> Option<PlatformEvent> {
    match event {
        WindowEvent::CloseRequested => Some(PlatformEvent::CloseRequested),
        WindowEvent::Resized(size) => Some(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::Moved(pos) => Some(PlatformEvent::Moved { x: pos.x, y: pos.y }),
        WindowEvent::Focused(focused) => Some(PlatformEvent::FocusChanged(focused)),
        WindowEvent::CursorMoved { position, .. } => Some(PlatformEvent::CursorMoved {
            x: position.x,
            y: position.y,
        }),
        WindowEvent::MouseInput { state, button, .. } => Some(PlatformEvent::MouseInput {
            pressed: state == ElementState::Pressed,
            button: match button {
                winit::event::MouseButton::Left => MouseButton::Left,
                winit::event::MouseButton::Right => MouseButton::Right,
                winit::event::MouseButton::Middle => MouseButton::Middle,
                _ => MouseButton::Other,
            },
        }),
        WindowEvent::MouseWheel { delta, .. } => Some(PlatformEvent::MouseWheel {
            delta: match delta {
                MouseScrollDelta::LineDelta(_, y) => f64::from(y),
                MouseScrollDelta::PixelDelta(p) => p.y / 40.0,
            },
        }),
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            Some(PlatformEvent::ScaleFactorChanged(scale_factor))
        }
        _ => None,
    }
}

fn edge_to_direction(edge: ResizeEdge) -> ResizeDirection {
    match edge {
        ResizeEdge::Top => ResizeDirection::North,
        ResizeEdge::Bottom => ResizeDirection::South,
        ResizeEdge::Left => ResizeDirection::West,
        ResizeEdge::Right => ResizeDirection::East,
        ResizeEdge::TopLeft => ResizeDirection::NorthWest,
        ResizeEdge::TopRight => ResizeDirection::NorthEast,
        ResizeEdge::BottomLeft => ResizeDirection::SouthWest,
        ResizeEdge::BottomRight => ResizeDirection::SouthEast,
    }
}

impl WindowBackend for NativeBackend {
    fn create_window(&mut self, desc: &WindowDesc) -> Result<(), ShellError> {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return Err(ShellError::Init("event loop already consumed".into()));
        };

        let mut attrs = WindowAttributes::default()
            .with_title(&desc.title)
            .with_inner_size(PhysicalSize::new(desc.size.width, desc.size.height))
            .with_min_inner_size(PhysicalSize::new(
                crate::geometry::MIN_WIDTH,
                crate::geometry::MIN_HEIGHT,
            ))
            .with_decorations(false)
            .with_visible(false);
        if let Some(pos) = desc.position {
            attrs = attrs.with_position(PhysicalPosition::new(pos.x, pos.y));
        }

        let mut creator = Creator {
            attrs: Some(attrs),
            result: None,
            error: None,
        };
        // resumed() fires synchronously on all desktop platforms; one pump is
        // enough.
        let _ = event_loop.pump_app_events(Some(Duration::from_millis(100)), &mut creator);

        if let Some(error) = creator.error {
            return Err(ShellError::Init(error));
        }
        let (window, context, mut surface) = creator
            .result
            .ok_or_else(|| ShellError::Init("window creation never resumed".into()))?;

        if let (Some(w), Some(h)) = (
            NonZeroU32::new(desc.size.width),
            NonZeroU32::new(desc.size.height),
        ) {
            if let Err(e) = surface.resize(w, h) {
                warn!(error = %e, "initial surface resize failed");
            }
        }

        debug!(title = %desc.title, size = ?desc.size, "native window created");
        self.window = Some(window);
        self._context = Some(context);
        self.surface = Some(surface);
        Ok(())
    }

    fn destroy_window(&mut self) {
        self.surface = None;
        self._context = None;
        self.window = None;
    }

    fn is_created(&self) -> bool {
        self.window.is_some()
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let mut collector = Collector { events: Vec::new() };
        if let Some(event_loop) = self.event_loop.as_mut() {
            let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut collector);
            if matches!(status, PumpStatus::Exit(_)) {
                collector.events.push(PlatformEvent::CloseRequested);
            }
        }
        // Keep the surface in step with the window before anything draws.
        for event in &collector.events {
            if let PlatformEvent::Resized { width, height } = event {
                if let (Some(surface), Some(w), Some(h)) = (
                    self.surface.as_mut(),
                    NonZeroU32::new(*width),
                    NonZeroU32::new(*height),
                ) {
                    if let Err(e) = surface.resize(w, h) {
                        warn!(error = %e, "surface resize failed");
                    }
                }
            }
        }
        collector.events
    }

    fn inner_size(&self) -> Size {
        match self.window.as_ref() {
            Some(window) => {
                let size = window.inner_size();
                Size {
                    width: size.width,
                    height: size.height,
                }
            }
            None => Size {
                width: 0,
                height: 0,
            },
        }
    }

    fn outer_position(&self) -> Option<Point> {
        let window = self.window.as_ref()?;
        let pos = window.outer_position().ok()?;
        Some(Point { x: pos.x, y: pos.y })
    }

    fn set_position(&mut self, position: Point) {
        if let Some(window) = self.window.as_ref() {
            window.set_outer_position(PhysicalPosition::new(position.x, position.y));
        }
    }

    fn set_size(&mut self, size: Size) {
        if let Some(window) = self.window.as_ref() {
            let _ = window.request_inner_size(PhysicalSize::new(size.width, size.height));
        }
    }

    fn set_title(&mut self, title: &str) {
        if let Some(window) = self.window.as_ref() {
            window.set_title(title);
        }
    }

    fn set_maximized(&mut self, maximized: bool) {
        if let Some(window) = self.window.as_ref() {
            window.set_maximized(maximized);
        }
    }

    fn set_minimized(&mut self, minimized: bool) {
        if let Some(window) = self.window.as_ref() {
            window.set_minimized(minimized);
        }
    }

    fn is_maximized(&self) -> bool {
        self.window
            .as_ref()
            .map(|w| w.is_maximized())
            .unwrap_or(false)
    }

    fn is_minimized(&self) -> bool {
        self.window
            .as_ref()
            .and_then(|w| w.is_minimized())
            .unwrap_or(false)
    }

    fn is_focused(&self) -> bool {
        self.window
            .as_ref()
            .map(|w| w.has_focus())
            .unwrap_or(false)
    }

    fn scale_factor(&self) -> f64 {
        self.window
            .as_ref()
            .map(|w| w.scale_factor())
            .unwrap_or(1.0)
    }

    // winit exposes no work-area query, so this is the full monitor rect;
    // a window centered against it can sit under a taskbar or dock.
    fn work_area(&self) -> Option<Rect> {
        let window = self.window.as_ref()?;
        let monitor = window.primary_monitor()?;
        let pos = monitor.position();
        let size = monitor.size();
        Some(Rect::new(pos.x, pos.y, size.width, size.height))
    }

    fn begin_interactive_move(&mut self) {
        if let Some(window) = self.window.as_ref() {
            if let Err(e) = window.drag_window() {
                warn!(error = %e, "drag_window unsupported");
            }
        }
    }

    fn begin_interactive_resize(&mut self, edge: ResizeEdge) {
        if let Some(window) = self.window.as_ref() {
            if let Err(e) = window.drag_resize_window(edge_to_direction(edge)) {
                warn!(error = %e, "drag_resize_window unsupported");
            }
        }
    }

    fn flush_compositor(&mut self) {
        if let Some(window) = self.window.as_ref() {
            window.pre_present_notify();
        }
    }

    fn present(&mut self, canvas: &Canvas) -> Result<(), ShellError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| ShellError::Backend(format!("surface buffer unavailable: {e}")))?;
        if buffer.len() != canvas.pixels().len() {
            // Mid-resize mismatch; the next frame redraws at the right size.
            return Ok(());
        }
        // softbuffer expects 0RGB; drop the alpha channel.
        for (dst, src) in buffer.iter_mut().zip(canvas.pixels()) {
            *dst = src & 0x00FF_FFFF;
        }
        buffer
            .present()
            .map_err(|e| ShellError::Backend(format!("present failed: {e}")))?;
        Ok(())
    }

    fn show(&mut self) {
        if let Some(window) = self.window.as_ref() {
            window.set_visible(true);
        }
    }
}
