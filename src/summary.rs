//! Workflow classification.
//!
//! One pass over a decoded [`NodeGraph`] sorts node inputs into the four
//! categories a generation summary cares about: positive prompts, negative
//! prompts, LoRA usages, and base model/checkpoint names.
//!
//! Nodes are inspected by key presence rather than a fixed schema, because
//! node shapes vary across pipeline versions. The category checks are
//! independent of each other, so a single node may contribute to several
//! categories at once.
//!
//! # Example
//!
//! ```
//! use genparams::{NodeGraph, WorkflowSummary};
//!
//! let graph = NodeGraph::decode(
//!     r#"{"6": {"class_type": "CLIPTextEncode", "inputs": {"text": "a cat"}}}"#,
//! )
//! .unwrap();
//! let summary = WorkflowSummary::classify(&graph);
//! assert_eq!(summary.positive_prompts, vec!["a cat"]);
//! ```

use serde_json::{Map, Value};

use crate::graph::NodeGraph;

/// Node class whose `text` input carries an encoded prompt.
const TEXT_ENCODE_CLASS: &str = "CLIPTextEncode";

/// Substring of a node title or id that marks its prompt as negative.
const NEGATIVE_MARKER: &str = "negative";

/// Weight reported when a LoRA node carries no strength input at all.
const DEFAULT_LORA_WEIGHT: &str = "1.0";

/// The classified contents of a workflow graph.
///
/// Prompt sequences keep node-iteration order and preserve duplicates.
/// `loras` and `models` are deduplicated and sorted lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct WorkflowSummary {
    /// Positive prompt texts, in node-iteration order.
    pub positive_prompts: Vec<String>,
    /// Negative prompt texts, in node-iteration order.
    pub negative_prompts: Vec<String>,
    /// `"<name> (Weight: <weight>)"` entries, deduplicated and sorted.
    pub loras: Vec<String>,
    /// Base model / checkpoint file names, deduplicated and sorted.
    pub models: Vec<String>,
}

impl WorkflowSummary {
    /// Classify every node of a graph.
    ///
    /// Entries that are not node records (not JSON objects) are skipped
    /// silently. The result is a pure function of the graph: classifying
    /// the same graph twice yields identical summaries.
    pub fn classify(graph: &NodeGraph) -> Self {
        let mut summary = Self::default();
        let no_inputs = Map::new();

        for (node_id, node) in graph.iter() {
            let Some(node) = node.as_object() else {
                continue;
            };
            let inputs = node
                .get("inputs")
                .and_then(Value::as_object)
                .unwrap_or(&no_inputs);

            summary.collect_prompt(node_id, node, inputs);
            summary.collect_lora(inputs);
            summary.collect_model(inputs);
        }

        summary.loras.sort();
        summary.loras.dedup();
        summary.models.sort();
        summary.models.dedup();

        log::debug!(
            "Classified {} nodes: {} positive, {} negative, {} loras, {} models",
            graph.len(),
            summary.positive_prompts.len(),
            summary.negative_prompts.len(),
            summary.loras.len(),
            summary.models.len(),
        );
        summary
    }

    /// Returns `true` if no category has any entries.
    pub fn is_empty(&self) -> bool {
        self.positive_prompts.is_empty()
            && self.negative_prompts.is_empty()
            && self.loras.is_empty()
            && self.models.is_empty()
    }

    fn collect_prompt(
        &mut self,
        node_id: &str,
        node: &Map<String, Value>,
        inputs: &Map<String, Value>,
    ) {
        let class_type = node.get("class_type").and_then(Value::as_str).unwrap_or("");
        if class_type != TEXT_ENCODE_CLASS {
            return;
        }
        let Some(text) = inputs.get("text").and_then(Value::as_str) else {
            return;
        };
        if text.is_empty() {
            return;
        }

        let title = node
            .get("_meta")
            .and_then(|meta| meta.get("title"))
            .and_then(Value::as_str)
            .unwrap_or("");

        if title.to_ascii_lowercase().contains(NEGATIVE_MARKER)
            || node_id.to_ascii_lowercase().contains(NEGATIVE_MARKER)
        {
            self.negative_prompts.push(text.to_string());
        } else {
            self.positive_prompts.push(text.to_string());
        }
    }

    fn collect_lora(&mut self, inputs: &Map<String, Value>) {
        let Some(name) = inputs.get("lora_name").and_then(scalar_text) else {
            return;
        };
        let weight = lora_weight(inputs);
        self.loras.push(format!("{name} (Weight: {weight})"));
    }

    fn collect_model(&mut self, inputs: &Map<String, Value>) {
        // `unet_name` wins by presence alone; a null value under the chosen
        // key emits nothing rather than falling through to `ckpt_name`.
        let Some(value) = inputs.get("unet_name").or_else(|| inputs.get("ckpt_name")) else {
            return;
        };
        if let Some(name) = scalar_text(value) {
            self.models.push(name);
        }
    }
}

/// Resolve the strength for a LoRA node: `strength_model` wins when present
/// and non-null (zero included), then `strength`, then the default `1.0`.
fn lora_weight(inputs: &Map<String, Value>) -> String {
    for key in ["strength_model", "strength"] {
        if let Some(value) = inputs.get(key) {
            if let Some(text) = scalar_text(value) {
                return text;
            }
        }
    }
    DEFAULT_LORA_WEIGHT.to_string()
}

/// Render a scalar input value as display text.
///
/// Strings pass through without quotes, numbers keep their canonical JSON
/// form (`0`, `0.8`, `1.0`), null yields nothing, and anything else falls
/// back to its JSON rendering.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
