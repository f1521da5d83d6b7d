//! Screen placement of stacked toasts.
//!
//! Everything here is a pure function of the placement settings, the sizes of
//! the shown toasts (in display order) and the chosen screen.

use crate::constants::DROP_SHADOW_SIZE;
use crate::geometry::{Point, Rect, Size};
use toast_stack_config::{ToastPosition, ToastsConfig};

/// Vertical space taken by the toasts stacked before the target.
pub fn stacking_offset(heights: impl IntoIterator<Item = i32>, spacing: i32) -> i32 {
    heights.into_iter().map(|height| height + spacing).sum()
}

/// Pick the screen hosting the stack.
///
/// With `always_on_main_screen` the primary screen wins outright. Otherwise
/// the stack follows the screen under the host window; when the window spans
/// several screens, or none at all, the primary screen is used.
pub fn select_screen(
    always_on_main_screen: bool,
    host_geometry: Rect,
    screens: &[Rect],
    primary: Rect,
) -> Rect {
    if always_on_main_screen {
        return primary;
    }

    let mut hits = screens.iter().filter(|screen| screen.intersects(&host_geometry));
    match (hits.next(), hits.next()) {
        (Some(screen), None) => *screen,
        _ => primary,
    }
}

/// Top-left corner of the toast at `index` within `stack`.
///
/// `stack` holds the body sizes of the shown toasts in display order. An
/// out-of-range `index` is placed as if it were appended after the last one.
pub fn calculate_position(
    config: &ToastsConfig,
    stack: &[Size],
    index: usize,
    screen: Rect,
) -> Point {
    let target = stack.get(index).copied().unwrap_or_default();
    let first_height = stack.first().map_or(target.height, |first| first.height);
    let accumulated = stacking_offset(stack.iter().take(index).map(|s| s.height), config.spacing);

    let (x, y) = anchor(config, screen, target, first_height, accumulated);

    Point::new(
        (x - f64::from(DROP_SHADOW_SIZE)) as i32,
        (y - f64::from(DROP_SHADOW_SIZE)) as i32,
    )
}

fn anchor(
    config: &ToastsConfig,
    screen: Rect,
    target: Size,
    first_height: i32,
    accumulated: i32,
) -> (f64, f64) {
    let screen_x = f64::from(screen.x);
    let screen_y = f64::from(screen.y);
    let screen_width = f64::from(screen.width);
    let screen_height = f64::from(screen.height);
    let width = f64::from(target.width);
    let offset_x = f64::from(config.offset_x);
    let offset_y = f64::from(config.offset_y);
    let accumulated = f64::from(accumulated);
    let first_height = f64::from(first_height);

    // Bottom stacks grow upward from the first toast; top stacks grow downward.
    match config.position {
        ToastPosition::BottomRight => (
            screen_x + screen_width - width - offset_x,
            screen_y + screen_height - first_height - offset_y - accumulated,
        ),
        ToastPosition::BottomLeft => (
            screen_x + offset_x,
            screen_y + screen_height - first_height - offset_y - accumulated,
        ),
        ToastPosition::BottomMiddle => (
            screen_x + screen_width / 2.0 - width / 2.0,
            screen_y + screen_height - first_height - offset_y - accumulated,
        ),
        ToastPosition::TopRight => (
            screen_x + screen_width - width - offset_x,
            screen_y + offset_y + accumulated,
        ),
        ToastPosition::TopLeft => (screen_x + offset_x, screen_y + offset_y + accumulated),
        ToastPosition::TopMiddle => (
            screen_x + screen_width / 2.0 - width / 2.0,
            screen_y + offset_y + accumulated,
        ),
    }
}
