//! an-core: errors, configuration, and the on-disk stores behind the
//! annotation backend.
//!
//! The HTTP layer in `an-server` is a thin wrapper over the pieces here:
//! the indexed prediction [`RecordStore`], the [`UploadDir`] sinks for mask
//! and masked-image uploads, and the input image listing.

pub mod config;
pub mod error;
pub mod fs;
pub mod images;
pub mod record_store;
pub mod uploads;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use record_store::RecordStore;
pub use uploads::{UploadDir, UploadKind};
