//! Error types for the `genparams` crate.
//!
//! This module defines [`GenParamsError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry enough context to
//! diagnose the problem at the call site, including file paths and a preview
//! of undecodable metadata.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type for all `genparams` operations.
///
/// Note that the *absence* of generation metadata is not an error —
/// [`MetadataProbe::fetch`](crate::MetadataProbe::fetch) reports it as
/// `Ok(None)` so callers can distinguish "file has no metadata" from "file
/// could not be read".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenParamsError {
    /// The media file could not be opened.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::MetadataProbe::fetch`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The embedded metadata could not be decoded into a node graph.
    ///
    /// Raised when every parsing strategy fails or when the decoded root is
    /// not a node mapping. `preview` holds the first ~200 characters of the
    /// raw metadata text for debugging.
    #[error("Unable to decode workflow metadata: {reason}")]
    Decode {
        /// Description of the failed parse attempt.
        reason: String,
        /// Leading slice of the raw metadata text.
        preview: String,
    },
}
