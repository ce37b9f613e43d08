//! Typed errors for palette generation and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for huefit operations.
pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Error, Debug)]
pub enum PaletteError {
    /// Extraction produced no colors (empty or fully transparent image).
    /// The extractor itself returns an empty list; this error surfaces when
    /// a caller needs a base color and there is none to pick.
    #[error("no dominant colors could be extracted from the image")]
    NoColors,

    /// The requested base color index exceeds what extraction produced.
    #[error("base color index {index} out of range: only {available} dominant color(s) extracted")]
    BaseOutOfRange { index: usize, available: usize },

    /// Reading or writing the palette store failed.
    #[error("palette store I/O failed at {path}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The palette store contains data that no longer parses.
    #[error("palette store at {path} is corrupt")]
    StoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No usable data directory could be resolved for the store.
    #[error("could not determine a data directory for the palette store")]
    NoDataDir,
}
