//! Pure hit-testing of cursor positions against the custom chrome layout.
//!
//! The window is undecorated, so every pointer position must be classified
//! before anything else sees it: the control buttons claim their zone, the
//! outer border strips become resize handles (corners before single edges),
//! the rest of the caption strip is the drag area, and everything below falls
//! through to the client content.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// Minimize / maximize / close cluster in the caption's right end.
    ControlButtonArea,
    /// Draggable caption strip; double-click toggles maximize.
    Caption,
    /// Border strip mapped to an OS interactive resize.
    ResizeEdge(ResizeEdge),
    /// Not chrome; input flows to the panels.
    ClientPassthrough,
}

/// Pixel metrics of the chrome layout, in logical client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeMetrics {
    pub caption_height: u32,
    pub border_width: u32,
    /// Width of the control-button cluster (right-aligned in the caption).
    pub control_zone_width: u32,
}

pub const BUTTON_WIDTH: u32 = 40;

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            caption_height: 30,
            border_width: 6,
            control_zone_width: 3 * BUTTON_WIDTH,
        }
    }
}

/// Classify a client-coordinate point.
///
/// `resizable` is false while the window is maximized; the border zones are
/// suppressed then and fold into caption or client.
pub fn classify(
    x: f64,
    y: f64,
    width: u32,
    height: u32,
    metrics: &ChromeMetrics,
    resizable: bool,
) -> HitRegion {
    let w = width as f64;
    let h = height as f64;
    if x < 0.0 || y < 0.0 || x >= w || y >= h {
        return HitRegion::ClientPassthrough;
    }

    let border = metrics.border_width as f64;
    let caption = metrics.caption_height as f64;

    // Control buttons win over everything, including the top-right corner:
    // losing the close button to a resize handle is worse than losing a few
    // pixels of resize grip.
    if y < caption && x >= w - metrics.control_zone_width as f64 {
        return HitRegion::ControlButtonArea;
    }

    if resizable {
        let near_left = x < border;
        let near_right = x >= w - border;
        let near_top = y < border;
        let near_bottom = y >= h - border;
        let edge = match (near_left, near_right, near_top, near_bottom) {
            (true, _, true, _) => Some(ResizeEdge::TopLeft),
            (_, true, true, _) => Some(ResizeEdge::TopRight),
            (true, _, _, true) => Some(ResizeEdge::BottomLeft),
            (_, true, _, true) => Some(ResizeEdge::BottomRight),
            (true, _, _, _) => Some(ResizeEdge::Left),
            (_, true, _, _) => Some(ResizeEdge::Right),
            (_, _, true, _) => Some(ResizeEdge::Top),
            (_, _, _, true) => Some(ResizeEdge::Bottom),
            _ => None,
        };
        if let Some(edge) = edge {
            return HitRegion::ResizeEdge(edge);
        }
    }

    if y < caption {
        HitRegion::Caption
    } else {
        HitRegion::ClientPassthrough
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 1280;
    const H: u32 = 720;

    fn hit(x: f64, y: f64) -> HitRegion {
        classify(x, y, W, H, &ChromeMetrics::default(), true)
    }

    #[test]
    fn control_zone_beats_caption_and_corner() {
        let m = ChromeMetrics::default();
        let mid_caption = m.caption_height as f64 / 2.0;
        assert_eq!(hit(W as f64 - 5.0, mid_caption), HitRegion::ControlButtonArea);
        // Top-right border pixel still belongs to the buttons.
        assert_eq!(hit(W as f64 - 1.0, 1.0), HitRegion::ControlButtonArea);
    }

    #[test]
    fn caption_center_is_draggable() {
        let m = ChromeMetrics::default();
        assert_eq!(
            hit(W as f64 / 2.0, m.caption_height as f64 / 2.0),
            HitRegion::Caption
        );
    }

    #[test]
    fn corners_beat_single_edges() {
        assert_eq!(hit(1.0, 1.0), HitRegion::ResizeEdge(ResizeEdge::TopLeft));
        assert_eq!(
            hit(1.0, H as f64 - 1.0),
            HitRegion::ResizeEdge(ResizeEdge::BottomLeft)
        );
        assert_eq!(
            hit(W as f64 - 130.0, 1.0),
            HitRegion::ResizeEdge(ResizeEdge::Top)
        );
        assert_eq!(hit(1.0, 300.0), HitRegion::ResizeEdge(ResizeEdge::Left));
        assert_eq!(
            hit(W as f64 - 1.0, 300.0),
            HitRegion::ResizeEdge(ResizeEdge::Right)
        );
        assert_eq!(
            hit(600.0, H as f64 - 1.0),
            HitRegion::ResizeEdge(ResizeEdge::Bottom)
        );
    }

    #[test]
    fn below_caption_is_client() {
        let m = ChromeMetrics::default();
        assert_eq!(
            hit(W as f64 / 2.0, m.caption_height as f64 + 10.0),
            HitRegion::ClientPassthrough
        );
    }

    #[test]
    fn maximized_suppresses_resize_zones() {
        let m = ChromeMetrics::default();
        let top_left = classify(1.0, 1.0, W, H, &m, false);
        assert_eq!(top_left, HitRegion::Caption);
        let left_mid = classify(1.0, 300.0, W, H, &m, false);
        assert_eq!(left_mid, HitRegion::ClientPassthrough);
    }

    #[test]
    fn outside_window_is_client() {
        assert_eq!(hit(-1.0, 10.0), HitRegion::ClientPassthrough);
        assert_eq!(hit(10.0, H as f64 + 1.0), HitRegion::ClientPassthrough);
    }
}
