mod common;

use image::Rgba;

use longview_core::buffer::{PixelBuffer, PixelFormat};
use longview_core::decoder::RegionDecoder;
use longview_core::geometry::{ImageMetadata, SourceRect};
use longview_core::gesture::Invalidation;
use longview_core::physics::ScrollPhysics;
use longview_core::render::{Canvas, FrameOutcome, FrameRenderer, RasterCanvas, ScaleTransform};
use longview_core::viewport::ViewportModel;

use common::{row_color, MockDecoder};

fn ready_viewport(view_w: u32, view_h: u32) -> ViewportModel {
    let mut vp = ViewportModel::new();
    vp.attach_image(ImageMetadata::new(1000, 5000));
    vp.set_viewport_size(view_w, view_h);
    vp
}

/// Records the transforms and buffer sizes it was asked to draw.
#[derive(Default)]
struct RecordingCanvas {
    draws: Vec<(u32, u32, ScaleTransform)>,
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (500, 800)
    }

    fn draw_buffer(&mut self, buffer: &PixelBuffer, transform: ScaleTransform) {
        self.draws.push((buffer.width(), buffer.height(), transform));
    }
}

#[test]
fn test_idle_without_decoder_or_layout() {
    let mut renderer = FrameRenderer::default();
    let mut canvas = RecordingCanvas::default();

    let vp = ready_viewport(500, 800);
    assert_eq!(
        renderer.render_frame::<MockDecoder, _>(None, &vp, &mut canvas),
        FrameOutcome::Idle
    );

    let (mut decoder, stats) = MockDecoder::new(1000, 5000);
    let mut unmeasured = ViewportModel::new();
    unmeasured.attach_image(decoder.metadata());
    assert_eq!(
        renderer.render_frame(Some(&mut decoder), &unmeasured, &mut canvas),
        FrameOutcome::Idle
    );

    assert!(canvas.draws.is_empty());
    assert_eq!(stats.borrow().calls, 0);
    assert_eq!(renderer.frames_painted(), 0);
}

#[test]
fn test_paints_window_scaled_to_viewport() {
    let mut renderer = FrameRenderer::new(PixelFormat::Rgba8888);
    let (mut decoder, stats) = MockDecoder::new(1000, 5000);
    let mut vp = ready_viewport(500, 800);
    let mut canvas = RasterCanvas::new(500, 800);

    assert_eq!(
        renderer.render_frame(Some(&mut decoder), &vp, &mut canvas),
        FrameOutcome::Painted
    );
    assert_eq!(stats.borrow().rects, vec![SourceRect::new(0, 0, 1000, 1600)]);

    // Canvas row dy samples native row floor((dy + 0.5) / 0.5).
    assert_eq!(canvas.image().get_pixel(0, 0), &Rgba(row_color(1)));
    assert_eq!(canvas.image().get_pixel(499, 799), &Rgba(row_color(1599)));

    vp.scroll_by(2000.0);
    renderer.render_frame(Some(&mut decoder), &vp, &mut canvas);
    assert_eq!(canvas.image().get_pixel(0, 0), &Rgba(row_color(2001)));
    assert_eq!(renderer.frames_painted(), 2);
}

#[test]
fn test_buffer_is_reused_across_frames() {
    let mut renderer = FrameRenderer::new(PixelFormat::Rgb565);
    let (mut decoder, stats) = MockDecoder::new(1000, 5000);
    let mut vp = ready_viewport(500, 800);
    let mut canvas = RecordingCanvas::default();

    renderer.render_frame(Some(&mut decoder), &vp, &mut canvas);
    let ptr = renderer.buffer().unwrap().data().as_ptr();

    for _ in 0..5 {
        vp.scroll_by(300.0);
        renderer.render_frame(Some(&mut decoder), &vp, &mut canvas);
    }
    assert_eq!(stats.borrow().calls, 6);
    assert_eq!(stats.borrow().reused, 5);
    assert_eq!(renderer.buffer().unwrap().data().as_ptr(), ptr);

    let buf = renderer.buffer().unwrap();
    assert_eq!((buf.width(), buf.height(), buf.format()), (1000, 1600, PixelFormat::Rgb565));
    for (_, _, transform) in &canvas.draws {
        assert_eq!(*transform, ScaleTransform::uniform(0.5));
    }
}

#[test]
fn test_resize_reallocates_buffer() {
    let mut renderer = FrameRenderer::new(PixelFormat::Rgba8888);
    let (mut decoder, stats) = MockDecoder::new(1000, 5000);
    let mut vp = ready_viewport(500, 800);
    let mut canvas = RecordingCanvas::default();

    renderer.render_frame(Some(&mut decoder), &vp, &mut canvas);
    vp.set_viewport_size(500, 400);
    renderer.render_frame(Some(&mut decoder), &vp, &mut canvas);

    assert_eq!(stats.borrow().reused, 0);
    assert_eq!(canvas.draws[1].1, 800);
    assert_eq!(renderer.buffer().unwrap().height(), 800);
}

#[test]
fn test_decode_failure_skips_frame() {
    let mut renderer = FrameRenderer::new(PixelFormat::Rgba8888);
    let (mut decoder, stats) = MockDecoder::failing(1000, 5000);
    let vp = ready_viewport(50, 80);
    let mut canvas = RasterCanvas::with_background(50, 80, Rgba([9, 9, 9, 255]));

    assert_eq!(
        renderer.render_frame(Some(&mut decoder), &vp, &mut canvas),
        FrameOutcome::Skipped
    );
    assert_eq!(stats.borrow().calls, 1);
    assert_eq!(renderer.frames_skipped(), 1);
    assert!(renderer.buffer().is_none());
    assert!(canvas.image().pixels().all(|p| *p == Rgba([9, 9, 9, 255])));
}

#[test]
fn test_canvas_background_outside_buffer() {
    // 1000 x 1000 image in a 500 x 800 view: the window runs past the last
    // row, which the decoder fills with transparent black.
    let mut vp = ViewportModel::new();
    vp.attach_image(ImageMetadata::new(1000, 1000));
    vp.set_viewport_size(500, 800);

    let buffer = PixelBuffer::new(1000, 100, PixelFormat::Rgba8888).unwrap();
    let mut canvas = RasterCanvas::with_background(500, 800, Rgba([1, 2, 3, 255]));
    assert_eq!(canvas.size(), (500, 800));
    canvas.draw_buffer(&buffer, ScaleTransform::uniform(vp.current_scale().unwrap()));
    // Buffer covers canvas rows [0, 50); everything below is background.
    assert_eq!(canvas.image().get_pixel(10, 10), &Rgba([0, 0, 0, 0]));
    assert_eq!(canvas.image().get_pixel(10, 60), &Rgba([1, 2, 3, 255]));

    canvas.clear();
    assert_eq!(canvas.image().get_pixel(10, 10), &Rgba([1, 2, 3, 255]));
}

#[test]
fn test_animate_drives_window() {
    let renderer = FrameRenderer::default();
    let mut vp = ready_viewport(500, 800);
    let mut physics = ScrollPhysics::default();

    assert_eq!(renderer.animate(&mut physics, &mut vp), Invalidation::None);

    physics.start(0, 1000.0, 0, vp.max_top());
    let mut last = Invalidation::Animate;
    let mut ticks = 0;
    while last == Invalidation::Animate {
        last = renderer.animate(&mut physics, &mut vp);
        ticks += 1;
        assert!(ticks < 1000);
    }
    assert_eq!(last, Invalidation::Redraw);
    assert_eq!(vp.current_source_rect(), SourceRect::new(0, 250, 1000, 1850));
    assert_eq!(renderer.animate(&mut physics, &mut vp), Invalidation::None);
}
