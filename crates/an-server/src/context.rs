//! Application context shared across all route handlers via Axum state.

use std::sync::Arc;

use an_core::config::Config;
use an_core::{RecordStore, UploadDir, UploadKind};

/// Central state handed to every handler.
///
/// Stores are built once from the configuration; handlers never derive
/// filesystem paths on their own.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Per-image prediction labels.
    pub predictions: Arc<RecordStore>,
    /// Destination for `/save_binary` uploads.
    pub binary_uploads: Arc<UploadDir>,
    /// Destination for `/save_masked_image` uploads.
    pub masked_uploads: Arc<UploadDir>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let storage = &config.storage;
        let predictions = Arc::new(RecordStore::new(storage.predictions_file.clone()));
        let binary_uploads = Arc::new(UploadDir::new(UploadKind::Binary, storage.binary_dir.clone()));
        let masked_uploads = Arc::new(UploadDir::new(
            UploadKind::MaskedImage,
            storage.masked_dir.clone(),
        ));

        Self {
            config: Arc::new(config),
            predictions,
            binary_uploads,
            masked_uploads,
        }
    }

    /// The upload directory for `kind`.
    pub fn uploads(&self, kind: UploadKind) -> &Arc<UploadDir> {
        match kind {
            UploadKind::Binary => &self.binary_uploads,
            UploadKind::MaskedImage => &self.masked_uploads,
        }
    }
}
