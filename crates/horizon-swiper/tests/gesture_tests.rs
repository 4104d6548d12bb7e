//! Integration tests for drag gestures driving the controller.

use std::sync::Arc;
use std::time::Duration;

use horizon_swiper::animation::{Easing, TransitionKind, TransitionState};
use horizon_swiper::gesture::DragSample;
use horizon_swiper::{SwiperConfig, SwiperController, SwiperHandle};
use parking_lot::Mutex;

const EXTENT: f32 = 300.0;

fn swiper(count: usize, config: SwiperConfig) -> SwiperController {
    let mut swiper = SwiperController::new(config.with_easing(Easing::Linear)).unwrap();
    swiper.set_viewport(EXTENT, 600.0);
    swiper.set_item_count(count);
    swiper
}

fn drag(swiper: &mut SwiperController, moved: f32, velocity: f32) {
    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, moved, 0.0));
    swiper.handle_drag(&DragSample::ended(1, moved, 0.0, velocity, 0.0));
}

fn offsets(swiper: &SwiperController) -> Vec<f32> {
    swiper.item_transforms().iter().map(|t| t.translate_x).collect()
}

#[test]
fn test_long_drag_commits_forward() {
    let mut swiper = swiper(3, SwiperConfig::default());
    drag(&mut swiper, -80.0, 0.0);
    assert_eq!(swiper.current_index(), 1);
    assert_eq!(swiper.active_transition(), Some(TransitionKind::Forward));
}

#[test]
fn test_fast_flick_commits_forward() {
    let mut swiper = swiper(3, SwiperConfig::default());
    drag(&mut swiper, -50.0, -600.0);
    assert_eq!(swiper.current_index(), 1);
}

#[test]
fn test_short_slow_drag_rejects_and_returns_to_idle() {
    let mut swiper = swiper(3, SwiperConfig::default());
    let pages = Arc::new(Mutex::new(Vec::new()));
    let sink = pages.clone();
    swiper.on_page_change(move |page| sink.lock().push(*page));

    drag(&mut swiper, -50.0, -100.0);
    assert_eq!(swiper.current_index(), 0);
    assert_eq!(swiper.active_transition(), Some(TransitionKind::SnapBack));

    swiper.tick(Duration::from_millis(100));
    let mid = offsets(&swiper);
    assert!((mid[0] + 25.0).abs() < 0.5);

    swiper.tick(Duration::from_millis(100));
    assert_eq!(swiper.state(), TransitionState::Idle);
    assert_eq!(offsets(&swiper), vec![0.0, EXTENT, EXTENT]);
    assert!(pages.lock().is_empty());
}

#[test]
fn test_backward_drag_commits() {
    let mut swiper = swiper(3, SwiperConfig::default().with_current(2));
    drag(&mut swiper, 120.0, 0.0);
    assert_eq!(swiper.current_index(), 1);
    swiper.tick(Duration::from_millis(200));
    assert_eq!(offsets(&swiper), vec![-EXTENT, 0.0, EXTENT]);
}

#[test]
fn test_vertical_drag() {
    let mut swiper = swiper(3, SwiperConfig::default().with_vertical(true));
    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, 0.0, -200.0));
    assert_eq!(swiper.item_transform(1).unwrap().translate_y, 400.0);
    swiper.handle_drag(&DragSample::ended(1, 0.0, -200.0, 0.0, 0.0));
    assert_eq!(swiper.current_index(), 1);
}

#[test]
fn test_drag_past_boundary_is_clamped() {
    let mut swiper = swiper(3, SwiperConfig::default());
    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, 150.0, 0.0));
    assert_eq!(swiper.state(), TransitionState::Dragging);
    assert_eq!(offsets(&swiper), vec![0.0, EXTENT, EXTENT]);

    swiper.handle_drag(&DragSample::ended(1, 150.0, 0.0, 2000.0, 0.0));
    assert_eq!(swiper.current_index(), 0);
}

#[test]
fn test_single_page_drag_is_clamped() {
    let mut swiper = swiper(1, SwiperConfig::default().with_circular(true));
    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, -150.0, 0.0));
    assert_eq!(offsets(&swiper), vec![0.0]);
    swiper.handle_drag(&DragSample::ended(1, -150.0, 0.0, -2000.0, 0.0));
    assert_eq!(swiper.current_index(), 0);
}

#[test]
fn test_drag_follows_finger() {
    let mut swiper = swiper(3, SwiperConfig::default().with_current(1));
    swiper.handle_drag(&DragSample::started(1));
    for moved in [-30.0, -60.0, 40.0] {
        swiper.handle_drag(&DragSample::moved(1, moved, 0.0));
        assert_eq!(offsets(&swiper), vec![moved - EXTENT, moved, moved + EXTENT]);
    }
}

#[test]
fn test_drag_interrupts_running_transition() {
    let mut swiper = swiper(4, SwiperConfig::default());
    swiper.next_page();
    swiper.tick(Duration::from_millis(100));

    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, -30.0, 0.0));
    assert_eq!(swiper.state(), TransitionState::Dragging);
    assert_eq!(swiper.active_transition(), None);

    // Ticks no longer move the dragged pages.
    swiper.tick(Duration::from_millis(300));
    assert_eq!(offsets(&swiper)[1], -30.0);

    swiper.handle_drag(&DragSample::cancelled(1));
    swiper.tick(Duration::from_millis(200));
    assert_eq!(swiper.current_index(), 1);
    assert_eq!(offsets(&swiper), vec![-EXTENT, 0.0, EXTENT, EXTENT]);
}

#[test]
fn test_programmatic_call_ends_drag() {
    let mut swiper = swiper(3, SwiperConfig::default());
    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, -40.0, 0.0));

    assert!(swiper.next_page());
    // Samples of the superseded drag are ignored.
    swiper.handle_drag(&DragSample::moved(1, 200.0, 0.0));
    swiper.handle_drag(&DragSample::ended(1, 200.0, 0.0, 900.0, 0.0));
    assert_eq!(swiper.current_index(), 1);

    swiper.tick(Duration::from_millis(200));
    assert_eq!(offsets(&swiper), vec![-EXTENT, 0.0, EXTENT]);
}

#[test]
fn test_switch_page_none_corrects_partial_drag() {
    let mut swiper = swiper(3, SwiperConfig::default());
    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, -100.0, 0.0));

    swiper.switch_page(None).unwrap();
    swiper.tick(Duration::from_millis(200));
    assert_eq!(swiper.current_index(), 0);
    assert_eq!(offsets(&swiper), vec![0.0, EXTENT, EXTENT]);
}

#[test]
fn test_disabling_touch_mid_drag_snaps_back() {
    let mut swiper = swiper(3, SwiperConfig::default());
    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, -100.0, 0.0));

    swiper
        .set_config(
            SwiperConfig::default()
                .with_disable_touch(true)
                .with_easing(Easing::Linear),
        )
        .unwrap();
    swiper.handle_drag(&DragSample::ended(1, -200.0, 0.0, -900.0, 0.0));
    swiper.tick(Duration::from_millis(200));

    assert_eq!(swiper.current_index(), 0);
    assert_eq!(offsets(&swiper), vec![0.0, EXTENT, EXTENT]);
}

#[test]
fn test_second_finger_is_ignored() {
    let mut swiper = swiper(3, SwiperConfig::default());
    swiper.handle_drag(&DragSample::started(1));
    swiper.handle_drag(&DragSample::moved(1, -30.0, 0.0));
    swiper.handle_drag(&DragSample::started(2));
    swiper.handle_drag(&DragSample::ended(2, -250.0, 0.0, -3000.0, 0.0));

    assert_eq!(swiper.current_index(), 0);
    assert_eq!(swiper.state(), TransitionState::Dragging);
}
