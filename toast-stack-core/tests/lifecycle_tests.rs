//! End-to-end lifecycle tests for the stack manager
//!
//! Every test drives the virtual clock by hand, so timings are exact.

use std::collections::HashMap;
use toast_stack_core::{
    Event, Host, Point, QueueDiscipline, Rect, Renderer, Size, StackManager, TextFonts, Toast,
    ToastId, ToastPosition, ToastState, ToastsConfig,
};

const PRIMARY: Rect = Rect::new(0, 0, 1920, 1080);

#[derive(Debug, Default, Clone)]
struct Window {
    position: Point,
    opacity: f32,
    bar_width: i32,
    shown: usize,
    closed: usize,
}

/// Renderer that remembers the last value pushed for every toast
#[derive(Debug, Default)]
struct RecordingRenderer {
    windows: HashMap<ToastId, Window>,
}

impl RecordingRenderer {
    fn window(&self, id: ToastId) -> Window {
        self.windows.get(&id).cloned().unwrap_or_default()
    }
}

impl Renderer for RecordingRenderer {
    fn measure(&self, title: &str, text: &str, _fonts: &TextFonts) -> Size {
        if title.is_empty() && text.is_empty() {
            Size::new(0, 0)
        } else {
            Size::new(300, 80)
        }
    }

    fn resize(&mut self, id: ToastId, _size: Size) {
        self.windows.entry(id).or_default();
    }

    fn set_position(&mut self, id: ToastId, position: Point) {
        self.windows.entry(id).or_default().position = position;
    }

    fn set_opacity(&mut self, id: ToastId, opacity: f32) {
        self.windows.entry(id).or_default().opacity = opacity;
    }

    fn set_duration_bar_width(&mut self, id: ToastId, width: i32) {
        self.windows.entry(id).or_default().bar_width = width;
    }

    fn show(&mut self, id: ToastId) {
        self.windows.entry(id).or_default().shown += 1;
    }

    fn close(&mut self, id: ToastId) {
        self.windows.entry(id).or_default().closed += 1;
    }
}

struct StaticHost {
    window: Rect,
    screens: Vec<Rect>,
}

impl Default for StaticHost {
    fn default() -> Self {
        Self {
            window: Rect::new(200, 200, 800, 600),
            screens: vec![PRIMARY],
        }
    }
}

impl Host for StaticHost {
    fn host_window_geometry(&self) -> Rect {
        self.window
    }

    fn screens(&self) -> Vec<Rect> {
        self.screens.clone()
    }

    fn primary_screen(&self) -> Rect {
        PRIMARY
    }
}

type Manager = StackManager<RecordingRenderer, StaticHost>;

fn manager() -> Manager {
    StackManager::new(ToastsConfig::default(), RecordingRenderer::default(), StaticHost::default())
}

fn manager_with(config: ToastsConfig) -> Manager {
    StackManager::new(config, RecordingRenderer::default(), StaticHost::default())
}

fn closed_count(events: &[Event], id: ToastId) -> usize {
    events.iter().filter(|e| **e == Event::Closed(id)).count()
}

#[test]
fn test_fourth_toast_is_queued_then_promoted() {
    let mut manager = manager();
    let ids: Vec<ToastId> = (0..4)
        .map(|i| manager.submit(Toast::new(format!("Toast {i}"), "body")))
        .collect();

    assert_eq!(manager.visible_count(), 3);
    assert_eq!(manager.queued_count(), 1);
    assert_eq!(
        manager.drain_events(),
        vec![
            Event::Shown(ids[0]),
            Event::Shown(ids[1]),
            Event::Shown(ids[2]),
            Event::Queued(ids[3]),
        ]
    );

    assert!(manager.dismiss(ids[0]));
    // Exit finishes at 250ms, promotion waits one more fade-in
    manager.advance(250);
    assert_eq!(manager.visible_count(), 2);
    assert_eq!(manager.queued_count(), 1);

    manager.advance(250);
    assert_eq!(manager.visible_count(), 3);
    assert_eq!(manager.queued_count(), 0);
    assert_eq!(manager.state(ids[3]), Some(ToastState::Showing));
    assert_eq!(
        manager.drain_events(),
        vec![Event::Closed(ids[0]), Event::Shown(ids[3])]
    );
}

#[test]
fn test_lifo_promotes_newest_queued_toast() {
    let mut manager = manager_with(ToastsConfig {
        maximum_on_screen: 1,
        ..ToastsConfig::default()
    });
    let first = manager.submit(Toast::new("first", ""));
    let older = manager.submit(Toast::new("older", ""));
    let newer = manager.submit(Toast::new("newer", ""));

    manager.dismiss(first);
    manager.advance(500);

    assert_eq!(manager.state(newer), Some(ToastState::Showing));
    assert_eq!(manager.state(older), Some(ToastState::Created));
}

#[test]
fn test_fifo_promotes_oldest_queued_toast() {
    let mut manager = manager_with(ToastsConfig {
        maximum_on_screen: 1,
        queue_discipline: QueueDiscipline::Fifo,
        ..ToastsConfig::default()
    });
    let first = manager.submit(Toast::new("first", ""));
    let older = manager.submit(Toast::new("older", ""));
    let newer = manager.submit(Toast::new("newer", ""));

    manager.dismiss(first);
    manager.advance(500);

    assert_eq!(manager.state(older), Some(ToastState::Showing));
    assert_eq!(manager.state(newer), Some(ToastState::Created));
}

#[test]
fn test_promotion_waits_for_closing_toast_fade_in() {
    let mut manager = manager_with(ToastsConfig {
        maximum_on_screen: 1,
        ..ToastsConfig::default()
    });
    let first = manager.submit(Toast::new("first", "").with_fade_in_duration(400));
    let queued = manager.submit(Toast::new("queued", ""));

    manager.dismiss(first);
    manager.advance(250 + 399);
    assert_eq!(manager.state(queued), Some(ToastState::Created));

    manager.advance(1);
    assert_eq!(manager.state(queued), Some(ToastState::Showing));
}

#[test]
fn test_capacity_holds_under_mixed_operations() {
    let mut manager = manager_with(ToastsConfig {
        maximum_on_screen: 2,
        ..ToastsConfig::default()
    });
    let mut submitted = Vec::new();

    for round in 0..12u64 {
        let toast = Toast::new(format!("round {round}"), "body").with_duration(300 + round * 70);
        submitted.push(manager.submit(toast));
        if round % 3 == 0 {
            manager.dismiss(submitted[submitted.len() / 2]);
        }
        manager.advance(120);

        assert!(manager.visible_count() <= 2);
        for id in &submitted {
            let shown = manager.visible().iter().any(|t| t.id() == *id);
            let queued = manager.queued().any(|t| t.id() == *id);
            let closed = manager.state(*id) == Some(ToastState::Closed);
            assert_eq!(
                [shown, queued, closed].iter().filter(|b| **b).count(),
                1,
                "toast {id} must live in exactly one place"
            );
        }
    }

    manager.advance(60_000);
    assert_eq!(manager.count(), 0);
    assert_eq!(manager.next_deadline(), None);
    let events = manager.drain_events();
    for id in &submitted {
        assert_eq!(closed_count(&events, *id), 1);
    }
}

#[test]
fn test_single_toast_bottom_right_position() {
    let mut manager = manager();
    let id = manager.submit(Toast::new("Hello", "World"));

    let expected = Point::new(1920 - 300 - 20 - 5, 1080 - 80 - 45 - 5);
    assert_eq!(manager.renderer().window(id).position, expected);
    assert_eq!(manager.toast(id).map(Toast::position), Some(expected));
}

#[test]
fn test_second_toast_slides_into_place() {
    let mut manager = manager();
    let first = manager.submit(Toast::new("first", ""));
    let second = manager.submit(Toast::new("second", ""));

    // Outer height 90, slide distance 60, starting above the final spot
    assert_eq!(manager.renderer().window(second).position, Point::new(1595, 860 - 60));

    manager.advance(250);
    assert_eq!(manager.renderer().window(second).position, Point::new(1595, 860));
    assert_eq!(manager.renderer().window(first).position, Point::new(1595, 950));
    assert_eq!(manager.renderer().window(second).opacity, 1.0);
}

#[test]
fn test_admission_moves_siblings_to_new_slots() {
    let mut manager = manager();
    let first = manager.submit(Toast::new("first", "").with_fade_out_duration(400));
    manager.advance(250);
    assert_eq!(manager.renderer().window(first).position, Point::new(1595, 950));

    manager.set_position(ToastPosition::TopLeft);
    manager.submit(Toast::new("second", ""));
    let target = Point::new(20 - 5, 45 - 5);

    // Moving, but slower than the 250ms entrance of the new toast
    manager.advance(250);
    let halfway = manager.renderer().window(first).position;
    assert!(halfway.x < 1595 && halfway.x > target.x);
    assert!(halfway.y < 950 && halfway.y > target.y);

    manager.advance(149);
    assert_ne!(manager.renderer().window(first).position, target);

    manager.advance(1);
    assert_eq!(manager.renderer().window(first).position, target);
    assert_eq!(manager.toast(first).map(Toast::position), Some(target));
}

#[test]
fn test_top_preset_slides_up_from_below() {
    let mut manager = manager_with(ToastsConfig {
        position: ToastPosition::TopLeft,
        ..ToastsConfig::default()
    });
    manager.submit(Toast::new("first", ""));
    let second = manager.submit(Toast::new("second", ""));

    let target_y = 45 + 90 - 5;
    assert_eq!(manager.renderer().window(second).position, Point::new(15, target_y + 60));

    manager.advance(250);
    assert_eq!(manager.renderer().window(second).position, Point::new(15, target_y));
}

#[test]
fn test_remaining_toasts_close_the_gap() {
    let mut manager = manager();
    let first = manager.submit(Toast::new("first", ""));
    let second = manager.submit(Toast::new("second", ""));
    manager.advance(250);

    manager.dismiss(first);
    manager.advance(250);
    assert_eq!(manager.state(first), Some(ToastState::Closed));

    manager.advance(250);
    assert_eq!(manager.renderer().window(second).position, Point::new(1595, 950));
}

#[test]
fn test_stack_follows_host_screen() {
    let secondary = Rect::new(1920, 0, 2560, 1440);
    let host = StaticHost {
        window: Rect::new(2200, 100, 800, 600),
        screens: vec![PRIMARY, secondary],
    };
    let mut manager =
        StackManager::new(ToastsConfig::default(), RecordingRenderer::default(), host);

    let id = manager.submit(Toast::new("t", "x"));
    assert_eq!(
        manager.renderer().window(id).position,
        Point::new(1920 + 2560 - 300 - 20 - 5, 1440 - 80 - 45 - 5)
    );

    manager.set_always_on_main_screen(true);
    let other = manager.submit(Toast::new("t", "x"));
    manager.advance(250);
    assert_eq!(manager.renderer().window(other).position.x, 1595);
}

#[test]
fn test_hover_resets_countdown() {
    let mut manager = manager();
    let id = manager.submit(Toast::new("t", "x").with_duration(5000));

    manager.advance(2000);
    assert_eq!(manager.elapsed(id), Some(2000));
    assert!(manager.renderer().window(id).bar_width < 300);

    assert!(manager.on_hover_enter(id));
    assert_eq!(manager.elapsed(id), Some(0));
    assert_eq!(manager.renderer().window(id).bar_width, 300);

    // Stays while hovered
    manager.advance(20_000);
    assert_eq!(manager.state(id), Some(ToastState::Showing));

    assert!(manager.on_hover_leave(id));
    manager.advance(4999);
    assert_eq!(manager.state(id), Some(ToastState::Showing));
    manager.advance(1);
    assert_eq!(manager.state(id), Some(ToastState::FadingOut));
}

#[test]
fn test_hover_without_reset_keeps_counting() {
    let mut manager = manager();
    let id = manager.submit(Toast::new("t", "x").with_reset_on_hover(false));

    manager.advance(1000);
    assert!(!manager.on_hover_enter(id));
    assert_eq!(manager.elapsed(id), Some(1000));

    manager.advance(4000);
    assert_eq!(manager.state(id), Some(ToastState::FadingOut));
}

#[test]
fn test_hover_on_fading_toast_is_ignored() {
    let mut manager = manager();
    let id = manager.submit(Toast::new("t", "x"));
    manager.dismiss(id);

    assert!(!manager.on_hover_enter(id));
    assert!(!manager.on_hover_leave(id));
    manager.advance(250);
    assert_eq!(manager.state(id), Some(ToastState::Closed));
}

#[test]
fn test_zero_duration_stays_until_dismissed() {
    let mut manager = manager();
    let id = manager.submit(Toast::new("sticky", "").with_duration(0));

    manager.advance(250);
    assert_eq!(manager.next_deadline(), None);

    manager.advance(120_000);
    assert_eq!(manager.state(id), Some(ToastState::Showing));
    assert_eq!(manager.elapsed(id), Some(0));

    assert!(manager.dismiss(id));
    manager.advance(250);
    assert_eq!(manager.state(id), Some(ToastState::Closed));
}

#[test]
fn test_double_dismiss_closes_once() {
    let mut manager = manager();
    let id = manager.submit(Toast::new("t", "x"));

    assert!(manager.dismiss(id));
    assert!(!manager.dismiss(id));
    manager.advance(1000);
    assert!(!manager.dismiss(id));

    let events = manager.drain_events();
    assert_eq!(closed_count(&events, id), 1);
    assert_eq!(manager.renderer().window(id).closed, 1);
    assert_eq!(manager.state(id), Some(ToastState::Closed));
}

#[test]
fn test_expiry_runs_full_exit() {
    let mut manager = manager();
    let id = manager.submit(Toast::new("t", "x").with_fade_out_duration(100));

    manager.advance(5000);
    assert_eq!(manager.state(id), Some(ToastState::FadingOut));

    manager.advance(100);
    assert_eq!(manager.state(id), Some(ToastState::Closed));
    assert_eq!(manager.renderer().window(id).opacity, 0.0);
    assert_eq!(manager.visible_count(), 0);
}

#[test]
fn test_dismissing_queued_toast_closes_it() {
    let mut manager = manager_with(ToastsConfig {
        maximum_on_screen: 1,
        ..ToastsConfig::default()
    });
    let shown = manager.submit(Toast::new("shown", ""));
    let queued = manager.submit(Toast::new("queued", ""));
    manager.drain_events();

    assert!(manager.dismiss(queued));
    assert_eq!(manager.queued_count(), 0);
    assert_eq!(manager.state(queued), Some(ToastState::Closed));
    assert_eq!(manager.drain_events(), vec![Event::Closed(queued)]);
    assert_eq!(manager.renderer().window(queued).shown, 0);

    manager.dismiss(shown);
    manager.advance(1000);
    assert_eq!(manager.count(), 0);
}

#[test]
fn test_repeated_submission_is_ignored() {
    let mut manager = manager();
    let toast = Toast::new("t", "x");
    let id = manager.submit(toast.clone());
    manager.submit(toast.clone());
    assert_eq!(manager.count(), 1);

    manager.dismiss(id);
    manager.advance(1000);
    manager.submit(toast);
    assert_eq!(manager.count(), 0);
}

#[test]
fn test_lowering_maximum_only_gates_admission() {
    let mut manager = manager();
    for i in 0..3 {
        manager.submit(Toast::new(format!("{i}"), ""));
    }

    manager.set_maximum_on_screen(1);
    assert_eq!(manager.visible_count(), 3);

    manager.submit(Toast::new("late", ""));
    assert_eq!(manager.visible_count(), 3);
    assert_eq!(manager.queued_count(), 1);
}

#[test]
fn test_unknown_position_name_is_ignored() {
    let mut manager = manager();
    assert!(!manager.set_position_name("diagonal"));
    assert_eq!(manager.config().position, ToastPosition::BottomRight);

    assert!(manager.set_position_name("top_left"));
    assert_eq!(manager.config().position, ToastPosition::TopLeft);
}

#[test]
fn test_empty_toast_measures_zero() {
    let mut manager = manager();
    let id = manager.submit(Toast::new("", ""));

    assert_eq!(manager.toast(id).map(Toast::measured_size), Some(Size::new(0, 0)));
    assert_eq!(manager.renderer().window(id).position, Point::new(1920 - 20 - 5, 1080 - 45 - 5));
}

#[test]
fn test_close_all_tears_everything_down() {
    let mut manager = manager_with(ToastsConfig {
        maximum_on_screen: 1,
        ..ToastsConfig::default()
    });
    let shown = manager.submit(Toast::new("a", ""));
    let queued = manager.submit(Toast::new("b", ""));
    manager.drain_events();

    manager.close_all();

    assert_eq!(manager.count(), 0);
    assert_eq!(manager.next_deadline(), None);
    assert_eq!(
        manager.drain_events(),
        vec![Event::Closed(shown), Event::Closed(queued)]
    );
    assert_eq!(manager.renderer().window(shown).closed, 1);
}
