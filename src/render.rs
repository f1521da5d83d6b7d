//! Headless collaborators for the driver binary.
//!
//! Nothing is drawn; every renderer call is logged, and text is measured with
//! an average glyph width so layout behaves plausibly.

use crate::constants::{
    AVERAGE_GLYPH_WIDTH, DURATION_BAR_HEIGHT, HOST_WINDOW_HEIGHT, HOST_WINDOW_WIDTH,
    LINE_HEIGHT_FACTOR, POINTS_TO_PIXELS, SCREEN_HEIGHT, SCREEN_WIDTH, TITLE_SPACING,
    TOAST_MAX_WIDTH, TOAST_MIN_WIDTH, TOAST_PADDING,
};
use toast_stack_core::{Font, Host, Point, Rect, Renderer, Size, TextFonts, ToastId};
use tracing::{debug, trace};

fn pixel_size(font: &Font) -> f64 {
    f64::from(font.point_size) * POINTS_TO_PIXELS
}

fn line_height(font: &Font) -> i32 {
    (pixel_size(font) * LINE_HEIGHT_FACTOR).ceil() as i32
}

/// Single-line width of `content`
fn text_width(content: &str, font: &Font) -> i32 {
    let glyph = pixel_size(font) * AVERAGE_GLYPH_WIDTH;
    let glyph = if font.bold { glyph * 1.1 } else { glyph };
    (content.chars().count() as f64 * glyph).ceil() as i32
}

/// Lines needed to wrap `content` into `available` pixels
fn line_count(content: &str, font: &Font, available: i32) -> i32 {
    if content.is_empty() {
        return 0;
    }
    let width = text_width(content, font);
    ((width + available - 1) / available.max(1)).max(1)
}

#[derive(Debug, Default)]
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn measure(&self, title: &str, text: &str, fonts: &TextFonts) -> Size {
        if title.is_empty() && text.is_empty() {
            return Size::default();
        }

        let widest = text_width(title, &fonts.title).max(text_width(text, &fonts.text));
        let width = (widest + 2 * TOAST_PADDING).clamp(TOAST_MIN_WIDTH, TOAST_MAX_WIDTH);
        let available = width - 2 * TOAST_PADDING;

        let title_lines = line_count(title, &fonts.title, available);
        let text_lines = line_count(text, &fonts.text, available);
        let gap = if title_lines > 0 && text_lines > 0 { TITLE_SPACING } else { 0 };

        let height = 2 * TOAST_PADDING
            + title_lines * line_height(&fonts.title)
            + gap
            + text_lines * line_height(&fonts.text)
            + DURATION_BAR_HEIGHT;
        Size::new(width, height)
    }

    fn resize(&mut self, id: ToastId, size: Size) {
        debug!("Toast {} resized to {}x{}", id, size.width, size.height);
    }

    fn set_position(&mut self, id: ToastId, position: Point) {
        trace!("Toast {} moved to ({}, {})", id, position.x, position.y);
    }

    fn set_opacity(&mut self, id: ToastId, opacity: f32) {
        trace!("Toast {} opacity {:.2}", id, opacity);
    }

    fn set_duration_bar_width(&mut self, id: ToastId, width: i32) {
        trace!("Toast {} duration bar {}px", id, width);
    }

    fn show(&mut self, id: ToastId) {
        debug!("Toast {} window shown", id);
    }

    fn close(&mut self, id: ToastId) {
        debug!("Toast {} window closed", id);
    }
}

/// A fixed single-screen layout with the host window centered on it
#[derive(Debug, Clone)]
pub struct StaticHost {
    screen: Rect,
    window: Rect,
}

impl StaticHost {
    pub fn new(screen: Rect) -> Self {
        let window = Rect::new(
            screen.x + (screen.width - HOST_WINDOW_WIDTH) / 2,
            screen.y + (screen.height - HOST_WINDOW_HEIGHT) / 2,
            HOST_WINDOW_WIDTH,
            HOST_WINDOW_HEIGHT,
        );
        Self { screen, window }
    }
}

impl Default for StaticHost {
    fn default() -> Self {
        Self::new(Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT))
    }
}

impl Host for StaticHost {
    fn host_window_geometry(&self) -> Rect {
        self.window
    }

    fn screens(&self) -> Vec<Rect> {
        vec![self.screen]
    }

    fn primary_screen(&self) -> Rect {
        self.screen
    }
}
