//! Node-graph decoding.
//!
//! ComfyUI has embedded its execution graph using at least three encodings
//! over time: a plain JSON object, a JSON object serialized *again* as a JSON
//! string, and an escaped-string variant where quote characters are stored as
//! literal `\"` sequences. On top of that, the graph may sit inside a
//! `{"prompt": ...}` envelope at any of those layers.
//!
//! [`NodeGraph::decode`] recovers the flat node mapping from all of these by
//! trying each strategy in fixed precedence order and stopping at the first
//! success. Every attempt boundary is an explicit `Result`/`Option` — no
//! failure is allowed to escape the decoder.
//!
//! # Example
//!
//! ```
//! use genparams::NodeGraph;
//!
//! let graph = NodeGraph::decode(
//!     r#"{"prompt": {"3": {"class_type": "KSampler", "inputs": {"seed": 7}}}}"#,
//! )
//! .unwrap();
//! assert_eq!(graph.len(), 1);
//! assert!(graph.get("3").is_some());
//! ```

use serde_json::{Map, Value};

use crate::error::GenParamsError;

/// Maximum number of characters of raw metadata echoed back in decode errors.
const ERROR_PREVIEW_CHARS: usize = 200;

/// A flat mapping of node id to node record, decoded from raw metadata text.
///
/// Node ids are unique and their order carries no meaning. Records are kept
/// as dynamic [`Value`]s: node shapes vary across pipeline versions, so
/// interpretation happens by key presence at classification time rather than
/// through a fixed schema. The graph is immutable once decoded.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct NodeGraph {
    nodes: Map<String, Value>,
}

impl NodeGraph {
    /// Decode raw metadata text into a node graph.
    ///
    /// Parsing strategies, in precedence order:
    ///
    /// 1. the text as plain JSON;
    /// 2. the text after a literal de-escaping pass (`\"` → `"`, one layer
    ///    of surrounding quotes stripped);
    /// 3. on the parsed value: unwrap `{"prompt": ...}` envelopes, re-enter
    ///    step 1 for string values, and accept the first mapping reached.
    ///
    /// # Errors
    ///
    /// Returns [`GenParamsError::Decode`] when no strategy yields a mapping.
    /// The error carries the first parse attempt's description and a preview
    /// of the raw text, capped at 200 characters.
    pub fn decode(raw: &str) -> Result<Self, GenParamsError> {
        log::debug!("Decoding metadata blob ({} bytes)", raw.len());

        let root = parse_layer(raw).map_err(|error| decode_error(error.to_string(), raw))?;

        match unwrap_nodes(root) {
            Some(nodes) => {
                log::debug!("Decoded node graph with {} entries", nodes.len());
                Ok(Self { nodes })
            }
            None => Err(decode_error(
                "decoded metadata is not a node mapping".to_string(),
                raw,
            )),
        }
    }

    /// Number of node entries in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no node entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node record by id.
    pub fn get(&self, node_id: &str) -> Option<&Value> {
        self.nodes.get(node_id)
    }

    /// Iterate over `(node_id, record)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.nodes.iter()
    }
}

fn decode_error(reason: String, raw: &str) -> GenParamsError {
    GenParamsError::Decode {
        reason,
        preview: raw.chars().take(ERROR_PREVIEW_CHARS).collect(),
    }
}

/// Parse one textual layer as JSON, retrying once after a de-escaping pass.
///
/// The retry covers blobs where a writer serialized the graph and then
/// escaped the result again, leaving literal `\"` sequences (and sometimes a
/// stray pair of surrounding quotes) in the stored text. On failure the
/// error from the *first* attempt is returned — that attempt saw the text as
/// stored.
fn parse_layer(text: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(primary) => {
            let unescaped = unescape_literal(text);
            match serde_json::from_str(unescaped.trim_matches('"')) {
                Ok(value) => Ok(value),
                Err(_) => Err(primary),
            }
        }
    }
}

/// Descend through nested envelopes until a node mapping is reached.
fn unwrap_nodes(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(mut map) => match map.remove("prompt") {
            // An outer `{"prompt": ...}` envelope wraps the actual graph.
            Some(inner) => unwrap_nodes(inner),
            None => Some(map),
        },
        // A string holds JSON (or escaped JSON) one layer down.
        Value::String(text) => parse_layer(&text).ok().and_then(unwrap_nodes),
        _ => None,
    }
}

/// Interpret backslash escape sequences literally: `\"` becomes `"`, `\n` a
/// newline, `\uXXXX` the corresponding character. Unknown sequences and
/// truncated `\u` escapes are kept verbatim.
fn unescape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let code: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&code, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&code);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
