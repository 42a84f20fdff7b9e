use longview_core::buffer::PixelBuffer;

/// Convert a decoded region (RGB565 or RGBA8888) to an egui ColorImage.
pub fn buffer_to_color_image(buffer: &PixelBuffer) -> egui::ColorImage {
    let w = buffer.width() as usize;
    let h = buffer.height() as usize;
    let mut pixels = Vec::with_capacity(w * h);

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let [r, g, b, a] = buffer.pixel_rgba(x, y);
            pixels.push(egui::Color32::from_rgba_unmultiplied(r, g, b, a));
        }
    }

    egui::ColorImage {
        size: [w, h],
        pixels,
        source_size: Default::default(),
    }
}
