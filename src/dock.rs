//! Dock areas and the content-region split.
//!
//! The client area below the caption is carved into up to four dock areas:
//! the bottom strip first, then the left and right columns, with the center
//! taking the remainder. An area with no open panel collapses and its space
//! flows back to the center.

use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DockArea {
    Left,
    Center,
    Right,
    Bottom,
}

/// Fractions of the content region granted to each side area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockConfig {
    pub left_fraction: f32,
    pub right_fraction: f32,
    pub bottom_fraction: f32,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            left_fraction: 0.2,
            right_fraction: 0.22,
            bottom_fraction: 0.28,
        }
    }
}

/// Where a panel lives and whether its area shows a tab strip this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockAffinity {
    pub area: DockArea,
    pub show_tab_bar: bool,
}

#[derive(Debug, Clone)]
pub struct DockLayout {
    config: DockConfig,
    assignments: BTreeMap<String, DockArea>,
}

impl DockLayout {
    pub fn new(config: DockConfig) -> Self {
        Self {
            config,
            assignments: BTreeMap::new(),
        }
    }

    pub fn assign(&mut self, panel: &str, area: DockArea) {
        self.assignments.insert(panel.to_string(), area);
    }

    /// Area for a panel; unassigned panels land in the center.
    pub fn area_of(&self, panel: &str) -> DockArea {
        self.assignments
            .get(panel)
            .copied()
            .unwrap_or(DockArea::Center)
    }

    /// Split the content region among the occupied areas.
    ///
    /// Bottom is carved off first (full width), then left and right columns
    /// from what remains; center takes the rest. The center rect is always
    /// produced so a just-opened panel has somewhere to land.
    pub fn split(&self, content: Rect, occupied: &BTreeSet<DockArea>) -> BTreeMap<DockArea, Rect> {
        let mut rects = BTreeMap::new();

        let bottom_h = if occupied.contains(&DockArea::Bottom) {
            (content.height as f32 * self.config.bottom_fraction) as u32
        } else {
            0
        };
        let top_h = content.height.saturating_sub(bottom_h);
        if bottom_h > 0 {
            rects.insert(
                DockArea::Bottom,
                Rect::new(content.x, content.y + top_h as i32, content.width, bottom_h),
            );
        }

        let left_w = if occupied.contains(&DockArea::Left) {
            (content.width as f32 * self.config.left_fraction) as u32
        } else {
            0
        };
        let right_w = if occupied.contains(&DockArea::Right) {
            (content.width as f32 * self.config.right_fraction) as u32
        } else {
            0
        };
        if left_w > 0 {
            rects.insert(
                DockArea::Left,
                Rect::new(content.x, content.y, left_w, top_h),
            );
        }
        if right_w > 0 {
            rects.insert(
                DockArea::Right,
                Rect::new(
                    content.x + (content.width - right_w) as i32,
                    content.y,
                    right_w,
                    top_h,
                ),
            );
        }

        let center_w = content.width.saturating_sub(left_w + right_w);
        rects.insert(
            DockArea::Center,
            Rect::new(content.x + left_w as i32, content.y, center_w, top_h),
        );
        rects
    }
}

impl Default for DockLayout {
    fn default() -> Self {
        Self::new(DockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(areas: &[DockArea]) -> BTreeSet<DockArea> {
        areas.iter().copied().collect()
    }

    #[test]
    fn all_areas_tile_the_content_region() {
        let layout = DockLayout::default();
        let content = Rect::new(0, 30, 1000, 700);
        let rects = layout.split(
            content,
            &occupied(&[
                DockArea::Left,
                DockArea::Center,
                DockArea::Right,
                DockArea::Bottom,
            ]),
        );

        let bottom = rects[&DockArea::Bottom];
        assert_eq!(bottom.width, 1000);
        assert_eq!(bottom.height, 196);
        assert_eq!(bottom.y, 30 + 504);

        let left = rects[&DockArea::Left];
        let center = rects[&DockArea::Center];
        let right = rects[&DockArea::Right];
        assert_eq!(left.height, 504);
        assert_eq!(left.width + center.width + right.width, 1000);
        assert_eq!(center.x, left.x + left.width as i32);
        assert_eq!(right.x, center.x + center.width as i32);
    }

    #[test]
    fn unoccupied_areas_collapse_into_center() {
        let layout = DockLayout::default();
        let content = Rect::new(0, 30, 1000, 700);
        let rects = layout.split(content, &occupied(&[DockArea::Center]));
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[&DockArea::Center], content);
    }

    #[test]
    fn center_rect_exists_even_when_not_occupied() {
        let layout = DockLayout::default();
        let content = Rect::new(0, 0, 800, 600);
        let rects = layout.split(content, &occupied(&[DockArea::Bottom]));
        assert!(rects.contains_key(&DockArea::Center));
        assert_eq!(rects[&DockArea::Center].width, 800);
    }

    #[test]
    fn unassigned_panel_defaults_to_center() {
        let mut layout = DockLayout::default();
        layout.assign("Explorer", DockArea::Left);
        assert_eq!(layout.area_of("Explorer"), DockArea::Left);
        assert_eq!(layout.area_of("Scratch"), DockArea::Center);
    }
}
