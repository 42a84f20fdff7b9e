mod app;
mod convert;
mod messages;
mod panels;
mod state;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 960.0])
            .with_min_inner_size([320.0, 400.0])
            .with_title("Longview"),
        ..Default::default()
    };

    eframe::run_native(
        "Longview",
        options,
        Box::new(|_cc| Ok(Box::new(app::LongviewApp::new()))),
    )
}
