//! Console panel and the shared log buffer behind it.
//!
//! The buffer is the one process-wide shared value in the crate: the tracing
//! writer is installed before any panel exists, so it needs somewhere global
//! to write. The panel reads a snapshot on the main thread each frame.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, OnceLock};

use crate::canvas::{Canvas, GLYPH_HEIGHT};
use crate::dock::DockArea;
use crate::geometry::Rect;
use crate::theme::Theme;

use super::{Panel, PanelContext, PanelState};

const MAX_LINES: usize = 500;

/// Bounded line buffer shared between the tracing layer and the panel.
#[derive(Clone, Default)]
pub struct ConsoleBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl ConsoleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&self, line: &str) {
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        if lines.len() == MAX_LINES {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }

    pub fn tail(&self, count: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().rev().take(count).rev().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Line-splitting `io::Write` adapter for the tracing layer.
    pub fn writer(&self) -> ConsoleWriter {
        ConsoleWriter {
            buffer: self.clone(),
            pending: String::new(),
        }
    }
}

pub struct ConsoleWriter {
    buffer: ConsoleBuffer,
    pending: String,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=pos).collect();
            self.buffer.push_line(line.trim_end_matches('\n'));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.buffer.push_line(&line);
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

static GLOBAL: OnceLock<ConsoleBuffer> = OnceLock::new();

/// Install the buffer the tracing layer writes to. First call wins.
pub fn install_global(buffer: ConsoleBuffer) -> ConsoleBuffer {
    GLOBAL.get_or_init(|| buffer).clone()
}

pub fn global() -> Option<&'static ConsoleBuffer> {
    GLOBAL.get()
}

pub struct ConsolePanel {
    state: PanelState,
    buffer: ConsoleBuffer,
}

impl ConsolePanel {
    pub fn new(buffer: ConsoleBuffer) -> Self {
        Self {
            state: PanelState::default(),
            buffer,
        }
    }
}

impl Panel for ConsolePanel {
    fn name(&self) -> &str {
        "Console"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn preferred_area(&self) -> DockArea {
        DockArea::Bottom
    }

    fn draw(&mut self, canvas: &mut Canvas, rect: Rect, theme: &Theme, _ctx: &PanelContext) {
        let line_height = GLYPH_HEIGHT as i32 + 2;
        let visible = (rect.height.saturating_sub(8) / (line_height as u32)).max(1) as usize;
        let lines = self.buffer.tail(visible);
        let mut y = rect.y + 4;
        for line in &lines {
            canvas.text(rect.x + 6, y, line, theme.text);
            y += line_height;
        }
    }
}
