use std::path::PathBuf;

use longview_core::config::ViewerConfig;

/// Results sent back to the UI thread from file dialogs.
pub enum DialogResult {
    /// An image was picked with the Open dialog.
    OpenImage { path: PathBuf },

    /// A viewer config was picked and parsed.
    ConfigImported { path: PathBuf, config: ViewerConfig },

    Error { message: String },
}
