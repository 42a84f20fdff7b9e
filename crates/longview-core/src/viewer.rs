//! Host-facing controller for one large-image viewport.
//!
//! [`LongView`] owns all mutable viewer state. Hosts drive it through five
//! hooks: attach an image, measure, draw, pointer input, and animation ticks.

use std::fs::File;
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use memmap2::Mmap;
use tracing::info;

use crate::config::ViewerConfig;
use crate::decoder::{open_region_decoder, read_bounds, RegionDecoder};
use crate::error::Result;
use crate::geometry::ImageMetadata;
use crate::gesture::{GestureDetector, GestureEvent, GestureRouter, Invalidation, PointerEvent};
use crate::physics::ScrollPhysics;
use crate::render::{Canvas, FrameOutcome, FrameRenderer};
use crate::viewport::ViewportModel;

pub struct LongView {
    config: ViewerConfig,
    viewport: ViewportModel,
    physics: ScrollPhysics,
    detector: GestureDetector,
    router: GestureRouter,
    renderer: FrameRenderer,
    decoder: Option<Box<dyn RegionDecoder>>,
}

impl Default for LongView {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl LongView {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            viewport: ViewportModel::new(),
            physics: ScrollPhysics::new(config.physics.clone()),
            detector: GestureDetector::new(config.gestures.clone()),
            router: GestureRouter::new(),
            renderer: FrameRenderer::new(config.pixel_format),
            decoder: None,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Attach an encoded image stream.
    ///
    /// The header is read first to learn the dimensions, then the stream is
    /// rewound and a region decoder is opened on it. Any previously attached
    /// image is detached up front, so a failure leaves the viewer empty and
    /// draws become no-ops.
    pub fn set_image<R>(&mut self, mut reader: R) -> Result<ImageMetadata>
    where
        R: BufRead + Seek + 'static,
    {
        self.detach();
        let metadata = read_bounds(&mut reader)?;
        let decoder = open_region_decoder(reader)?;
        self.attach_decoder(metadata, decoder);
        Ok(metadata)
    }

    /// Memory-map `path` and attach it with [`LongView::set_image`].
    pub fn open_path(&mut self, path: &Path) -> Result<ImageMetadata> {
        self.detach();
        let file = File::open(path)?;
        // The map is read-only; the file must not be truncated while attached.
        let mmap = unsafe { Mmap::map(&file)? };
        let metadata = self.set_image(Cursor::new(mmap))?;
        info!(path = %path.display(), "Image file opened");
        Ok(metadata)
    }

    /// Attach an already-open decoder, e.g. a host-provided codec.
    pub fn set_decoder(&mut self, decoder: Box<dyn RegionDecoder>) {
        self.detach();
        let metadata = decoder.metadata();
        self.attach_decoder(metadata, decoder);
    }

    fn attach_decoder(&mut self, metadata: ImageMetadata, decoder: Box<dyn RegionDecoder>) {
        self.viewport.attach_image(metadata);
        self.decoder = Some(decoder);
        info!(
            width = metadata.native_width,
            height = metadata.native_height,
            "Image attached"
        );
    }

    pub fn detach(&mut self) {
        self.physics.stop();
        self.viewport.detach();
        self.renderer.reset();
        self.decoder = None;
    }

    pub fn has_image(&self) -> bool {
        self.decoder.is_some()
    }

    /// Layout hook.
    pub fn on_measure(&mut self, width: u32, height: u32) {
        self.viewport.set_viewport_size(width, height);
    }

    /// Paint hook.
    pub fn on_draw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> FrameOutcome {
        self.renderer
            .render_frame(self.decoder.as_deref_mut(), &self.viewport, canvas)
    }

    /// Pointer hook: classify the event and apply every resulting gesture.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Invalidation {
        let gestures = self.detector.on_event(event);
        self.route_all(gestures)
    }

    /// Report time-based gestures for a press that is being held still.
    pub fn poll_gestures(&mut self, now_ms: u64) -> Invalidation {
        let gestures = self.detector.poll(now_ms);
        self.route_all(gestures)
    }

    /// Animation hook, once per display refresh while [`LongView::is_animating`].
    pub fn on_animation_tick(&mut self) -> Invalidation {
        self.renderer.animate(&mut self.physics, &mut self.viewport)
    }

    /// Scroll by a distance in screen pixels outside the gesture stream
    /// (mouse wheel, keyboard). Cancels a running fling.
    pub fn scroll_by(&mut self, distance_y: f32) -> Invalidation {
        self.router.on_down(&mut self.physics);
        self.router.on_scroll(distance_y, &mut self.viewport)
    }

    /// Start a fling as if released with pointer velocity `velocity_y`
    /// (pixels/second, negative when the pointer moves up the screen).
    pub fn fling(&mut self, velocity_y: f32) -> Invalidation {
        self.router.route(
            GestureEvent::Fling {
                velocity_x: 0.0,
                velocity_y,
            },
            &mut self.viewport,
            &mut self.physics,
        )
    }

    pub fn is_animating(&self) -> bool {
        self.physics.is_active()
    }

    pub fn viewport(&self) -> &ViewportModel {
        &self.viewport
    }

    pub fn physics(&self) -> &ScrollPhysics {
        &self.physics
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    fn route_all(&mut self, gestures: Vec<GestureEvent>) -> Invalidation {
        gestures.into_iter().fold(Invalidation::None, |acc, gesture| {
            acc.merge(self.router.route(gesture, &mut self.viewport, &mut self.physics))
        })
    }
}
