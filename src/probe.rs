//! Container-level metadata probing.
//!
//! [`MetadataProbe`] opens a media file with FFmpeg and pulls the raw
//! generation-metadata blob out of the container's general metadata
//! dictionary. ComfyUI has written this blob under two different tag names
//! over time — `prompt` in newer releases, the generic `Comment` before
//! that — so both are tried in order and the first non-empty value wins.
//!
//! The blob comes back as opaque text; turning it into a node graph is the
//! job of [`NodeGraph::decode`](crate::NodeGraph::decode).
//!
//! # Example
//!
//! ```no_run
//! use genparams::MetadataProbe;
//!
//! match MetadataProbe::fetch("clip.mp4")? {
//!     Some(raw) => println!("found {} bytes under `{}`", raw.text.len(), raw.field),
//!     None => println!("no generation metadata in this file"),
//! }
//! # Ok::<(), genparams::GenParamsError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use ffmpeg_next::util::log::Level;

use crate::error::GenParamsError;

/// Container tags probed for generation metadata, in precedence order.
const METADATA_TAGS: [(&str, MetadataField); 2] = [
    ("prompt", MetadataField::Prompt),
    ("Comment", MetadataField::Comment),
];

/// Which container tag a metadata blob was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    /// The `prompt` tag.
    Prompt,
    /// The `Comment` tag.
    Comment,
}

impl Display for MetadataField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MetadataField::Prompt => write!(f, "prompt"),
            MetadataField::Comment => write!(f, "Comment"),
        }
    }
}

/// Raw, undecoded generation metadata read from a container tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct RawMetadata {
    /// Tag the text was found under.
    pub field: MetadataField,
    /// The metadata text exactly as stored in the container.
    pub text: String,
}

/// Lightweight generation-metadata probe.
///
/// Opens the file, reads the container-level tag dictionary, and immediately
/// closes the demuxer. No stream is decoded.
pub struct MetadataProbe;

impl MetadataProbe {
    /// Read the raw generation metadata embedded in a media file.
    ///
    /// Tries the `prompt` tag first, then `Comment` (FFmpeg tag lookup is
    /// case-insensitive). Returns `Ok(None)` when neither tag holds a
    /// non-empty value — an expected outcome for files whose pipeline did
    /// not save metadata, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`GenParamsError::FileOpen`] if the file does not exist or
    /// cannot be opened as a media container.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use genparams::MetadataProbe;
    ///
    /// let raw = MetadataProbe::fetch("clip.mp4")?;
    /// println!("{raw:?}");
    /// # Ok::<(), genparams::GenParamsError>(())
    /// ```
    pub fn fetch<P: AsRef<Path>>(path: P) -> Result<Option<RawMetadata>, GenParamsError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(GenParamsError::FileOpen {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        // Initialise FFmpeg (safe to call multiple times) and clamp its own
        // stderr output to errors so probe results stay clean.
        ffmpeg_next::init().map_err(|error| GenParamsError::FileOpen {
            path: path.to_path_buf(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;
        ffmpeg_next::util::log::set_level(Level::Error);

        log::debug!("Probing {} for generation metadata", path.display());

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| GenParamsError::FileOpen {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;

        let tags = input_context.metadata();
        for (tag, field) in METADATA_TAGS {
            match tags.get(tag) {
                Some(text) if !text.is_empty() => {
                    log::debug!("Found metadata under tag `{tag}` ({} bytes)", text.len());
                    return Ok(Some(RawMetadata {
                        field,
                        text: text.to_string(),
                    }));
                }
                _ => {}
            }
        }

        log::debug!("No generation metadata tags in {}", path.display());
        Ok(None)
    }
}
