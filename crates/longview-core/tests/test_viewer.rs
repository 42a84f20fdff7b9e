mod common;

use std::io::{BufReader, Cursor};

use image::Rgba;

use longview_core::geometry::{ImageMetadata, SourceRect};
use longview_core::gesture::{Invalidation, PointerEvent};
use longview_core::render::{FrameOutcome, RasterCanvas};
use longview_core::viewer::LongView;

use common::{rgba_config, row_color, row_gradient, write_temp, MockDecoder};

fn down(x: f32, y: f32, time_ms: u64) -> PointerEvent {
    PointerEvent::Down { x, y, time_ms }
}

fn mv(x: f32, y: f32, time_ms: u64) -> PointerEvent {
    PointerEvent::Move { x, y, time_ms }
}

fn up(x: f32, y: f32, time_ms: u64) -> PointerEvent {
    PointerEvent::Up { x, y, time_ms }
}

fn mock_viewer() -> LongView {
    let mut view = LongView::new(rgba_config());
    let (decoder, _) = MockDecoder::new(1000, 5000);
    view.set_decoder(Box::new(decoder));
    view.on_measure(500, 800);
    view
}

#[test]
fn test_set_image_from_stream() {
    let mut view = LongView::new(rgba_config());
    let meta = view
        .set_image(BufReader::new(Cursor::new(row_gradient(40, 400))))
        .unwrap();
    assert_eq!(meta, ImageMetadata::new(40, 400));
    assert!(view.has_image());

    view.on_measure(20, 50);
    assert_eq!(view.viewport().current_source_rect(), SourceRect::new(0, 0, 40, 100));

    let mut canvas = RasterCanvas::new(20, 50);
    assert_eq!(view.on_draw(&mut canvas), FrameOutcome::Painted);
    // Canvas row 10 samples native row 21.
    assert_eq!(canvas.image().get_pixel(5, 10), &Rgba([21, 21, 21, 255]));
}

#[test]
fn test_open_path_maps_file() {
    let file = write_temp(&row_gradient(8, 600), ".pgm");
    let mut view = LongView::new(rgba_config());
    let meta = view.open_path(file.path()).unwrap();
    assert_eq!(meta, ImageMetadata::new(8, 600));

    view.on_measure(8, 100);
    view.scroll_by(300.0);
    let mut canvas = RasterCanvas::new(8, 100);
    assert_eq!(view.on_draw(&mut canvas), FrameOutcome::Painted);
    assert_eq!(canvas.image().get_pixel(0, 0), &Rgba([44, 44, 44, 255]));
}

#[test]
fn test_open_missing_path_fails() {
    let mut view = LongView::default();
    assert!(view.open_path(std::path::Path::new("/nonexistent/strip.pgm")).is_err());
    assert!(!view.has_image());
}

#[test]
fn test_failed_set_image_leaves_viewer_empty() {
    let mut view = mock_viewer();
    view.scroll_by(500.0);
    assert!(view.set_image(Cursor::new(b"not an image at all".to_vec())).is_err());
    assert!(!view.has_image());
    assert!(view.viewport().metadata().is_none());

    let mut canvas = RasterCanvas::new(500, 800);
    assert_eq!(view.on_draw(&mut canvas), FrameOutcome::Idle);
    assert_eq!(view.on_pointer(down(0.0, 0.0, 0)), Invalidation::None);
    assert_eq!(view.on_pointer(mv(0.0, 300.0, 10)), Invalidation::None);
}

#[test]
fn test_drag_scrolls_and_clamps() {
    let mut view = mock_viewer();

    assert_eq!(view.on_pointer(down(250.0, 2100.0, 0)), Invalidation::None);
    assert_eq!(view.on_pointer(mv(250.0, 100.0, 16)), Invalidation::Redraw);
    assert_eq!(view.on_pointer(up(250.0, 100.0, 500)), Invalidation::None);
    assert_eq!(
        view.viewport().current_source_rect(),
        SourceRect::new(0, 2000, 1000, 3600)
    );

    view.on_pointer(down(250.0, 2100.0, 1000));
    view.on_pointer(mv(250.0, 100.0, 1016));
    view.on_pointer(up(250.0, 100.0, 1500));
    assert_eq!(
        view.viewport().current_source_rect(),
        SourceRect::new(0, 3400, 1000, 5000)
    );
    assert!(!view.is_animating());

    let mut canvas = RasterCanvas::new(500, 800);
    assert_eq!(view.on_draw(&mut canvas), FrameOutcome::Painted);
    assert_eq!(canvas.image().get_pixel(0, 0), &Rgba(row_color(3401)));
}

#[test]
fn test_fling_session_settles_at_bottom() {
    let mut view = mock_viewer();

    view.on_pointer(down(0.0, 800.0, 0));
    for (i, y) in [760.0, 720.0, 680.0].into_iter().enumerate() {
        assert_eq!(view.on_pointer(mv(0.0, y, (i as u64 + 1) * 10)), Invalidation::Redraw);
    }
    assert_eq!(view.on_pointer(up(0.0, 640.0, 40)), Invalidation::Animate);
    assert_eq!(view.viewport().current_source_rect().top, 120);
    assert!(view.is_animating());

    let mut canvas = RasterCanvas::new(50, 80);
    let mut ticks = 0;
    let mut last_top = 120;
    loop {
        let inv = view.on_animation_tick();
        view.on_draw(&mut canvas);
        let top = view.viewport().current_source_rect().top;
        assert!(top >= last_top, "fling reversed from {last_top} to {top}");
        last_top = top;
        ticks += 1;
        assert!(ticks < 1000, "fling never settled");
        if inv != Invalidation::Animate {
            assert_eq!(inv, Invalidation::Redraw);
            break;
        }
    }
    assert_eq!(
        view.viewport().current_source_rect(),
        SourceRect::new(0, 3400, 1000, 5000)
    );
    assert!(!view.is_animating());
    assert_eq!(view.on_animation_tick(), Invalidation::None);
}

#[test]
fn test_touch_down_stops_fling() {
    let mut view = mock_viewer();
    view.on_pointer(down(0.0, 800.0, 0));
    view.on_pointer(mv(0.0, 700.0, 10));
    view.on_pointer(mv(0.0, 600.0, 20));
    view.on_pointer(up(0.0, 500.0, 30));
    assert!(view.is_animating());

    view.on_animation_tick();
    let top = view.viewport().current_source_rect().top;

    view.on_pointer(down(0.0, 500.0, 100));
    assert!(!view.is_animating());
    assert_eq!(view.on_animation_tick(), Invalidation::None);
    assert_eq!(view.viewport().current_source_rect().top, top);
}

#[test]
fn test_wheel_scroll_cancels_fling() {
    let mut view = mock_viewer();
    view.on_pointer(down(0.0, 800.0, 0));
    view.on_pointer(mv(0.0, 700.0, 10));
    view.on_pointer(up(0.0, 600.0, 20));
    assert!(view.is_animating());

    assert_eq!(view.scroll_by(-50.0), Invalidation::Redraw);
    assert!(!view.is_animating());
    assert_eq!(view.viewport().current_source_rect().top, 50);
}

#[test]
fn test_host_scroll_out_of_range_clamps() {
    let mut view = mock_viewer();
    assert_eq!(view.scroll_by(3.0e9), Invalidation::Redraw);
    assert_eq!(view.viewport().current_source_rect().top, 3400);
    view.scroll_by(-3.0e9);
    assert_eq!(view.viewport().current_source_rect().top, 0);
}

#[test]
fn test_programmatic_fling() {
    let mut view = mock_viewer();
    view.scroll_by(1000.0);

    // Pointer moving down the screen flings the window towards the top.
    assert_eq!(view.fling(2000.0), Invalidation::Animate);
    let state = view.physics().state().unwrap();
    assert_eq!((state.start_y(), state.final_y()), (1000, 0));

    while view.on_animation_tick() == Invalidation::Animate {}
    assert_eq!(view.viewport().current_source_rect().top, 0);
}

#[test]
fn test_held_press_is_not_a_scroll() {
    let mut view = mock_viewer();
    view.on_pointer(down(100.0, 100.0, 0));
    assert_eq!(view.poll_gestures(700), Invalidation::None);
    assert_eq!(view.on_pointer(mv(100.0, 400.0, 710)), Invalidation::None);
    assert_eq!(view.on_pointer(up(100.0, 400.0, 720)), Invalidation::None);
    assert_eq!(view.viewport().current_source_rect().top, 0);
}

#[test]
fn test_detach_then_reattach_resets_window() {
    let mut view = mock_viewer();
    view.scroll_by(900.0);
    view.detach();
    assert!(!view.has_image());

    let (decoder, stats) = MockDecoder::new(1000, 2000);
    view.set_decoder(Box::new(decoder));
    assert_eq!(
        view.viewport().current_source_rect(),
        SourceRect::new(0, 0, 1000, 1600)
    );
    let mut canvas = RasterCanvas::new(500, 800);
    assert_eq!(view.on_draw(&mut canvas), FrameOutcome::Painted);
    assert_eq!(stats.borrow().reused, 0);
}
