//! # genparams
//!
//! Inspect generation metadata embedded in AI-generated videos — prompts,
//! LoRA weights, and model names.
//!
//! Generative video pipelines (ComfyUI in particular) can save the execution
//! graph that produced a clip into the output container's comment field.
//! `genparams` reads that blob back out with FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate, decodes it
//! despite the several encodings it has shipped with over time, and
//! summarizes the parts humans ask about.
//!
//! ## Quick Start
//!
//! ### Summarize a video's workflow
//!
//! ```no_run
//! use genparams::{MetadataProbe, NodeGraph, WorkflowSummary};
//!
//! let raw = MetadataProbe::fetch("clip.mp4").unwrap().expect("no metadata");
//! let graph = NodeGraph::decode(&raw.text).unwrap();
//! let summary = WorkflowSummary::classify(&graph);
//!
//! for prompt in &summary.positive_prompts {
//!     println!("{prompt}");
//! }
//! for lora in &summary.loras {
//!     println!("{lora}");
//! }
//! ```
//!
//! ### Render for a terminal
//!
//! ```
//! use genparams::{NodeGraph, Theme, WorkflowSummary, render};
//!
//! let graph = NodeGraph::decode(
//!     r#"{"6": {"class_type": "CLIPTextEncode", "inputs": {"text": "a cat"}}}"#,
//! )
//! .unwrap();
//! let summary = WorkflowSummary::classify(&graph);
//! print!("{}", render(&summary, &Theme::default()));
//! ```
//!
//! ## Pipeline
//!
//! - **Probe** — [`MetadataProbe`] opens the container and reads the raw
//!   blob from the `prompt` or `Comment` tag; absence is `Ok(None)`, not an
//!   error.
//! - **Decode** — [`NodeGraph::decode`] recovers the flat node mapping from
//!   plain JSON, JSON-encoded-as-string, or escaped-string blobs, unwrapping
//!   `{"prompt": ...}` envelopes along the way.
//! - **Classify** — [`WorkflowSummary::classify`] walks the graph once and
//!   routes node inputs into positive/negative prompts, LoRA usages, and
//!   model names by key presence.
//! - **Render** — [`render`] formats the summary for a terminal, styled by a
//!   [`Theme`].
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system; see the
//! README for platform-specific instructions.

pub mod display;
pub mod error;
pub mod graph;
pub mod probe;
pub mod summary;

pub use display::{Theme, render};
pub use error::GenParamsError;
pub use graph::NodeGraph;
pub use probe::{MetadataField, MetadataProbe, RawMetadata};
pub use summary::WorkflowSummary;
