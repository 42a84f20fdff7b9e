use std::path::Path;

use console::Style;
use longview_core::config::ViewerConfig;
use longview_core::viewport::ViewportModel;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn mebibytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

pub fn print_viewport_summary(file: &Path, viewport: &ViewportModel, config: &ViewerConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Longview"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(file.display())
    );

    let bpp = config.pixel_format.bytes_per_pixel() as u64;
    if let Some(meta) = viewport.metadata() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Dimensions"),
            s.value
                .apply_to(format!("{}x{}", meta.native_width, meta.native_height))
        );
        let full = meta.native_width as u64 * meta.native_height as u64 * bpp;
        println!(
            "  {:<14}{}",
            s.label.apply_to("Full decode"),
            s.value.apply_to(mebibytes(full))
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pixel format"),
        s.value.apply_to(config.pixel_format)
    );
    println!();

    println!("  {}", s.header.apply_to("Viewport"));
    match (viewport.viewport_size(), viewport.current_scale()) {
        (Some(size), Some(scale)) => {
            let rect = viewport.current_source_rect();
            println!(
                "    {:<12}{}",
                s.label.apply_to("Size"),
                s.value.apply_to(format!("{}x{}", size.width, size.height))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Scale"),
                s.value.apply_to(format!("{scale:.4}"))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Window"),
                s.value.apply_to(format!(
                    "{} px (top {} of {})",
                    viewport.window_height(),
                    rect.top,
                    viewport.max_top()
                ))
            );
            let buffer = rect.width() as u64 * rect.height() as u64 * bpp;
            println!(
                "    {:<12}{}",
                s.label.apply_to("Buffer"),
                s.value.apply_to(mebibytes(buffer))
            );
        }
        _ => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Layout"),
                s.disabled.apply_to("not measured")
            );
        }
    }
    println!();
}
