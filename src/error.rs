//! Errors surfaced by export operations.
//!
//! Editing itself never fails; only the paths that leave the process
//! (raster encoding, files, browser downloads) can.

use thiserror::Error;

/// Why an export could not be produced or delivered.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested image has no pixels.
    #[error("cannot export an empty {width}x{height} image")]
    EmptyCanvas {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
    /// The raster could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(String),
    /// Writing the exported file failed.
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    /// The browser refused to start a download.
    #[error("failed to start download: {0}")]
    Download(String),
}
