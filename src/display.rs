//! Terminal presentation of a workflow summary.
//!
//! [`render`] turns a [`WorkflowSummary`] into colorized text with one
//! labeled section per non-empty category. Styling is driven by a [`Theme`]
//! value passed in by the caller rather than process-wide constants, so a
//! call site can restyle or strip colour without touching global state.
//! Content is written verbatim; rendering never transforms it.
//!
//! # Example
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

use colored::{Color, Colorize};

use crate::summary::WorkflowSummary;

/// Width of the rule separating consecutive prompt entries.
const PROMPT_RULE_WIDTH: usize = 40;

/// Colours used for each summary section.
///
/// The default palette is the classic generation-summary look: green for
/// positive prompts, red for negative, yellow for LoRAs, blue for models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Heading colour for the positive-prompt section.
    pub positive: Color,
    /// Heading colour for the negative-prompt section.
    pub negative: Color,
    /// Heading colour for the LoRA section.
    pub lora: Color,
    /// Heading colour for the model/checkpoint section.
    pub model: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            positive: Color::Green,
            negative: Color::Red,
            lora: Color::Yellow,
            model: Color::Blue,
        }
    }
}

/// Render the non-empty sections of a summary as colorized text.
///
/// Empty categories are omitted entirely; an entirely empty summary renders
/// as an empty string. Colour output honours the `colored` crate's global
/// controls (tty detection, `NO_COLOR`, explicit overrides).
pub fn render(summary: &WorkflowSummary, theme: &Theme) -> String {
    let mut out = String::new();

    let positive = &summary.positive_prompts;
    let negative = &summary.negative_prompts;
    push_prompts(&mut out, ">>> POSITIVE PROMPT:", theme.positive, positive, false);
    push_prompts(&mut out, ">>> NEGATIVE PROMPT:", theme.negative, negative, true);
    push_list(&mut out, ">>> LORAS USED:", theme.lora, &summary.loras);
    push_list(&mut out, ">>> MODELS / CHECKPOINTS:", theme.model, &summary.models);

    out
}

/// Append a prompt section: heading, then each entry followed by a rule.
fn push_prompts(
    out: &mut String,
    heading: &str,
    color: Color,
    entries: &[String],
    leading_blank: bool,
) {
    if entries.is_empty() {
        return;
    }
    if leading_blank {
        out.push('\n');
    }
    out.push_str(&format!("{}\n", heading.color(color).bold()));
    for entry in entries {
        out.push_str(entry);
        out.push('\n');
        out.push_str(&"-".repeat(PROMPT_RULE_WIDTH));
        out.push('\n');
    }
}

/// Append a bulleted list section.
fn push_list(out: &mut String, heading: &str, color: Color, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}\n", heading.color(color).bold()));
    for entry in entries {
        out.push_str(&format!("  • {entry}\n"));
    }
}
