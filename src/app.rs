//! Application wiring and the frame loop.
//!
//! Everything is an explicit owned instance: settings feed the chrome,
//! the chrome feeds events to the bus, the bus feeds the panels. One frame is
//! `run_frame`; `run` loops it until a close is requested.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::backend::{MouseButton, PlatformEvent, WindowBackend};
use crate::canvas::Canvas;
use crate::chrome::{Lifecycle, WindowChrome};
use crate::dock::DockLayout;
use crate::error::ShellError;
use crate::events::{EventBus, EventKind, ShellEvent};
use crate::geometry::Rect;
use crate::hit_test::HitRegion;
use crate::pacer::FramePacer;
use crate::panel::{
    ConsolePanel, EditorPanel, ExplorerPanel, InspectorPanel, PanelHost, console,
};
use crate::settings::{Settings, keys};
use crate::theme::Theme;
use crate::title_bar::{TitleBar, TitleBarAction};

pub struct Application<B: WindowBackend> {
    settings: Settings,
    bus: Rc<EventBus>,
    chrome: WindowChrome<B>,
    host: PanelHost,
    title_bar: TitleBar,
    theme: Theme,
    canvas: Canvas,
    pacer: FramePacer,
    running: Rc<Cell<bool>>,
}

impl<B: WindowBackend> Application<B> {
    pub fn new(backend: B, settings: Settings) -> Self {
        let bus = Rc::new(EventBus::new());
        let chrome = WindowChrome::new(backend, Rc::clone(&bus));
        let title_bar = TitleBar::new(*chrome.metrics());

        let mut host = PanelHost::new(Rc::clone(&bus), DockLayout::default());
        host.register(Box::new(ExplorerPanel::new()));
        host.register(Box::new(EditorPanel::new()));
        host.register(Box::new(InspectorPanel::new(&bus)));
        let buffer = console::global().cloned().unwrap_or_default();
        host.register(Box::new(ConsolePanel::new(buffer)));

        host.set_open("Explorer", true);
        host.set_open("Editor", true);
        host.set_open("Console", true);

        let theme = Theme::resolve(settings.get_str(keys::THEME, "dark"));
        let pacer = FramePacer::new(
            settings.get_float(keys::TARGET_FPS, crate::pacer::DEFAULT_TARGET_FPS),
            settings.get_bool(keys::FRAME_RATE_LOCKED, true),
        );

        let running = Rc::new(Cell::new(false));
        let flag = Rc::clone(&running);
        bus.subscribe(EventKind::WindowClose, move |event| {
            if let ShellEvent::WindowClose { should_close: true } = event {
                flag.set(false);
            }
        });
        bus.subscribe(EventKind::ViewOpened, |event| {
            if let ShellEvent::ViewOpened { name } = event {
                debug!(name = %name, "view opened");
            }
        });
        bus.subscribe(EventKind::ViewClosed, |event| {
            if let ShellEvent::ViewClosed { name } = event {
                debug!(name = %name, "view closed");
            }
        });

        Self {
            settings,
            bus,
            chrome,
            host,
            title_bar,
            theme,
            canvas: Canvas::new(1, 1),
            pacer,
            running,
        }
    }

    pub fn set_theme(&mut self, name: &str) {
        self.theme = Theme::resolve(name);
        self.settings.set_str(keys::THEME, self.theme.name);
        self.bus.post(&ShellEvent::ThemeChanged {
            name: self.theme.name.to_string(),
        });
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn chrome(&self) -> &WindowChrome<B> {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut WindowChrome<B> {
        &mut self.chrome
    }

    pub fn host(&self) -> &PanelHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut PanelHost {
        &mut self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Create and show the window with the application's settings applied.
    pub fn initialize(&mut self, title: &str) -> Result<(), ShellError> {
        self.chrome.initialize(&self.settings, title)?;
        self.bus.post(&ShellEvent::ThemeChanged {
            name: self.theme.name.to_string(),
        });
        self.running.set(true);
        Ok(())
    }

    /// Initialize, run frames until close, persist, tear down.
    pub fn run(&mut self, title: &str) -> Result<(), ShellError> {
        self.initialize(title)?;
        info!(title, "shell running");

        while self.running.get() && self.chrome.lifecycle() == Lifecycle::Shown {
            self.run_frame()?;
        }

        self.shutdown()
    }

    pub fn shutdown(&mut self) -> Result<(), ShellError> {
        self.running.set(false);
        self.chrome.shutdown(&mut self.settings);
        self.settings.save()?;
        info!("shell stopped");
        Ok(())
    }

    /// One full frame: input routing, draw pass, pacing, present.
    pub fn run_frame(&mut self) -> Result<(), ShellError> {
        let events = self.chrome.pump();
        for event in &events {
            self.route_event(event);
        }

        self.bus.post(&ShellEvent::FrameBegin);

        if !self.chrome.is_minimized() {
            let size = self.chrome.client_size();
            if size.width > 0 && size.height > 0 {
                self.canvas.resize(size.width, size.height);
                self.canvas.clear(self.theme.background);

                self.title_bar.draw(
                    &mut self.canvas,
                    size.width,
                    &self.theme,
                    self.chrome.title(),
                    self.chrome.is_maximized(),
                    self.chrome.is_focused(),
                );

                let caption = self.chrome.metrics().caption_height;
                let content = Rect::new(
                    0,
                    caption as i32,
                    size.width,
                    size.height.saturating_sub(caption),
                );
                self.host.draw_panels(&mut self.canvas, content, &self.theme);

                self.pacer.pace();
                self.chrome.flush_compositor();
                self.chrome.present(&self.canvas)?;
            }
        }

        self.host.end_frame();
        self.bus.post(&ShellEvent::FrameEnd);
        Ok(())
    }

    fn route_event(&mut self, event: &PlatformEvent) {
        match event {
            PlatformEvent::MouseInput {
                pressed: true,
                button: MouseButton::Left,
            } => {
                let (x, y) = self.chrome.cursor();
                match self.chrome.hit_test() {
                    HitRegion::ControlButtonArea => {
                        let width = self.chrome.client_size().width;
                        match self.title_bar.hit_button(x, y, width) {
                            Some(TitleBarAction::Minimize) => self.chrome.minimize(),
                            Some(TitleBarAction::ToggleMaximize) => self.chrome.toggle_maximize(),
                            Some(TitleBarAction::Close) => {
                                self.bus.post(&ShellEvent::WindowClose { should_close: true });
                            }
                            None => {}
                        }
                    }
                    HitRegion::Caption => self.chrome.caption_pressed(),
                    HitRegion::ResizeEdge(edge) => self.chrome.resize_pressed(edge),
                    HitRegion::ClientPassthrough => {
                        self.host.pointer_pressed(x, y);
                    }
                }
            }
            PlatformEvent::MouseWheel { .. } => {
                self.host.dispatch_event(event);
            }
            _ => {}
        }
    }
}
