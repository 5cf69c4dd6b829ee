//! Custom-drawn caption strip: centered title and the minimize /
//! maximize-restore / close button cluster, right-aligned.

use crate::canvas::{Canvas, GLYPH_HEIGHT};
use crate::hit_test::{BUTTON_WIDTH, ChromeMetrics};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleBarAction {
    Minimize,
    ToggleMaximize,
    Close,
}

pub struct TitleBar {
    metrics: ChromeMetrics,
}

impl TitleBar {
    pub fn new(metrics: ChromeMetrics) -> Self {
        Self { metrics }
    }

    pub fn draw(
        &self,
        canvas: &mut Canvas,
        width: u32,
        theme: &Theme,
        title: &str,
        maximized: bool,
        focused: bool,
    ) {
        let h = self.metrics.caption_height;
        let bg = if focused {
            theme.caption_bg
        } else {
            theme.caption_bg_unfocused
        };
        canvas.fill_rect(0, 0, width, h, bg);

        let title_w = Canvas::text_width(title);
        let title_x = ((width.saturating_sub(title_w)) / 2) as i32;
        let title_y = (h.saturating_sub(GLYPH_HEIGHT) / 2) as i32;
        canvas.text(title_x, title_y, title, theme.caption_fg);

        let buttons_x = (width.saturating_sub(self.metrics.control_zone_width)) as i32;
        self.draw_minimize(canvas, buttons_x, h, theme);
        self.draw_maximize(canvas, buttons_x + BUTTON_WIDTH as i32, h, maximized, theme);
        self.draw_close(canvas, buttons_x + 2 * BUTTON_WIDTH as i32, h, theme);
    }

    fn glyph_origin(x: i32, h: u32) -> (i32, i32) {
        // 10x10 glyph box centered in the button.
        (
            x + (BUTTON_WIDTH as i32 - 10) / 2,
            (h as i32 - 10) / 2,
        )
    }

    fn draw_minimize(&self, canvas: &mut Canvas, x: i32, h: u32, theme: &Theme) {
        let (gx, gy) = Self::glyph_origin(x, h);
        canvas.hline(gx, gx + 9, gy + 5, theme.caption_fg);
    }

    fn draw_maximize(&self, canvas: &mut Canvas, x: i32, h: u32, maximized: bool, theme: &Theme) {
        let (gx, gy) = Self::glyph_origin(x, h);
        if maximized {
            // Two offset squares for "restore".
            canvas.stroke_rect(gx + 2, gy, 8, 8, theme.caption_fg);
            canvas.stroke_rect(gx, gy + 2, 8, 8, theme.caption_fg);
        } else {
            canvas.stroke_rect(gx, gy, 10, 10, theme.caption_fg);
        }
    }

    fn draw_close(&self, canvas: &mut Canvas, x: i32, h: u32, theme: &Theme) {
        let (gx, gy) = Self::glyph_origin(x, h);
        for i in 0..10 {
            canvas.set_pixel(gx + i, gy + i, theme.caption_fg);
            canvas.set_pixel(gx + 9 - i, gy + i, theme.caption_fg);
        }
    }

    /// Which button a point in the control zone lands on, if any.
    pub fn hit_button(&self, x: f64, y: f64, width: u32) -> Option<TitleBarAction> {
        if y < 0.0 || y >= self.metrics.caption_height as f64 {
            return None;
        }
        let zone_start = width.saturating_sub(self.metrics.control_zone_width) as f64;
        if x < zone_start || x >= width as f64 {
            return None;
        }
        let offset = ((x - zone_start) / BUTTON_WIDTH as f64) as u32;
        match offset {
            0 => Some(TitleBarAction::Minimize),
            1 => Some(TitleBarAction::ToggleMaximize),
            _ => Some(TitleBarAction::Close),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> TitleBar {
        TitleBar::new(ChromeMetrics::default())
    }

    #[test]
    fn buttons_resolve_right_to_left() {
        let bar = bar();
        let width = 1000;
        let zone = width as f64 - ChromeMetrics::default().control_zone_width as f64;
        assert_eq!(
            bar.hit_button(zone + 5.0, 10.0, width),
            Some(TitleBarAction::Minimize)
        );
        assert_eq!(
            bar.hit_button(zone + BUTTON_WIDTH as f64 + 5.0, 10.0, width),
            Some(TitleBarAction::ToggleMaximize)
        );
        assert_eq!(
            bar.hit_button(width as f64 - 5.0, 10.0, width),
            Some(TitleBarAction::Close)
        );
    }

    #[test]
    fn outside_the_zone_is_no_button() {
        let bar = bar();
        assert_eq!(bar.hit_button(10.0, 10.0, 1000), None);
        assert_eq!(bar.hit_button(995.0, 50.0, 1000), None);
        assert_eq!(bar.hit_button(1005.0, 10.0, 1000), None);
    }

    #[test]
    fn draw_fills_the_caption_strip() {
        let bar = bar();
        let theme = Theme::dark();
        let mut canvas = Canvas::new(300, 100);
        canvas.clear(0);
        bar.draw(&mut canvas, 300, &theme, "shell", false, true);
        assert_eq!(canvas.pixels()[0], theme.caption_bg);
        let below = (ChromeMetrics::default().caption_height as usize + 5) * 300;
        assert_eq!(canvas.pixels()[below], 0);
    }
}
