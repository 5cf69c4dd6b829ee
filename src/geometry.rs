//! Window geometry types and settings-backed persistence.

use crate::settings::{Settings, keys};

pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WIDTH: u32 = 320;
pub const MIN_HEIGHT: u32 = 240;

/// Sentinel stored when no position has ever been persisted.
const UNPLACED: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn position(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64
            && y >= self.y as f64
            && x < (self.x as f64 + self.width as f64)
            && y < (self.y as f64 + self.height as f64)
    }
}

/// Geometry read from settings at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialGeometry {
    pub size: Size,
    pub position: Option<Point>,
    pub maximized: bool,
}

/// Loads startup geometry and writes it back at shutdown.
///
/// While the window is maximized the OS reports the maximized rectangle, so
/// position and size are not persisted then; the maximized flag itself always
/// is, and the pre-maximize rectangle is what `restore` returns to.
#[derive(Debug, Default)]
pub struct GeometryStore {
    restore_geometry: Option<Rect>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_initial(settings: &Settings) -> InitialGeometry {
        let width = settings
            .get_int(keys::WINDOW_WIDTH, DEFAULT_WIDTH as i64)
            .clamp(MIN_WIDTH as i64, i64::from(u32::MAX)) as u32;
        let height = settings
            .get_int(keys::WINDOW_HEIGHT, DEFAULT_HEIGHT as i64)
            .clamp(MIN_HEIGHT as i64, i64::from(u32::MAX)) as u32;
        let x = settings.get_int(keys::WINDOW_POS_X, UNPLACED);
        let y = settings.get_int(keys::WINDOW_POS_Y, UNPLACED);
        let position = if x == UNPLACED || y == UNPLACED {
            None
        } else {
            Some(Point {
                x: x as i32,
                y: y as i32,
            })
        };
        InitialGeometry {
            size: Size { width, height },
            position,
            maximized: settings.get_bool(keys::WINDOW_MAXIMIZED, false),
        }
    }

    pub fn persist(settings: &mut Settings, rect: Option<Rect>, maximized: bool) {
        if !maximized {
            if let Some(rect) = rect {
                settings.set_int(keys::WINDOW_WIDTH, i64::from(rect.width));
                settings.set_int(keys::WINDOW_HEIGHT, i64::from(rect.height));
                settings.set_int(keys::WINDOW_POS_X, i64::from(rect.x));
                settings.set_int(keys::WINDOW_POS_Y, i64::from(rect.y));
            }
        }
        settings.set_bool(keys::WINDOW_MAXIMIZED, maximized);
    }

    pub fn capture_restore(&mut self, rect: Rect) {
        self.restore_geometry = Some(rect);
    }

    pub fn take_restore(&mut self) -> Option<Rect> {
        self.restore_geometry.take()
    }
}
