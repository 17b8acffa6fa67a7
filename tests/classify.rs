//! Workflow classification integration tests.

use genparams::{NodeGraph, WorkflowSummary};

fn summarize(raw: &str) -> WorkflowSummary {
    WorkflowSummary::classify(&NodeGraph::decode(raw).unwrap())
}

#[test]
fn titled_negative_prompt_is_routed() {
    let summary = summarize(
        r#"{
            "1": {"class_type": "CLIPTextEncode", "inputs": {"text": "a cat"}},
            "2": {"class_type": "CLIPTextEncode", "inputs": {"text": "blurry"},
                  "_meta": {"title": "Negative Prompt"}}
        }"#,
    );
    assert_eq!(summary.positive_prompts, vec!["a cat"]);
    assert_eq!(summary.negative_prompts, vec!["blurry"]);
}

#[test]
fn node_id_can_mark_a_prompt_negative() {
    let summary = summarize(
        r#"{"negative_2": {"class_type": "CLIPTextEncode", "inputs": {"text": "low quality"}}}"#,
    );
    assert!(summary.positive_prompts.is_empty());
    assert_eq!(summary.negative_prompts, vec!["low quality"]);
}

#[test]
fn title_matching_is_case_insensitive() {
    let summary = summarize(
        r#"{"5": {"class_type": "CLIPTextEncode", "inputs": {"text": "bad hands"},
                 "_meta": {"title": "NEGATIVE conditioning"}}}"#,
    );
    assert_eq!(summary.negative_prompts, vec!["bad hands"]);
}

#[test]
fn empty_or_missing_text_is_skipped() {
    let summary = summarize(
        r#"{
            "1": {"class_type": "CLIPTextEncode", "inputs": {"text": ""}},
            "2": {"class_type": "CLIPTextEncode", "inputs": {}}
        }"#,
    );
    assert!(summary.positive_prompts.is_empty());
    assert!(summary.negative_prompts.is_empty());
}

#[test]
fn text_on_other_node_classes_is_ignored() {
    let summary = summarize(
        r#"{"1": {"class_type": "ShowText", "inputs": {"text": "not a prompt"}}}"#,
    );
    assert!(summary.positive_prompts.is_empty());
}

#[test]
fn prompt_order_and_duplicates_are_preserved() {
    let summary = summarize(
        r#"{
            "1": {"class_type": "CLIPTextEncode", "inputs": {"text": "a cat"}},
            "2": {"class_type": "CLIPTextEncode", "inputs": {"text": "a dog"}},
            "3": {"class_type": "CLIPTextEncode", "inputs": {"text": "a cat"}}
        }"#,
    );
    assert_eq!(summary.positive_prompts, vec!["a cat", "a dog", "a cat"]);
}

#[test]
fn lora_strength_model_zero_is_not_defaulted() {
    let summary = summarize(
        r#"{"1": {"class_type": "LoraLoader", "inputs": {"lora_name": "x", "strength_model": 0}}}"#,
    );
    assert_eq!(summary.loras, vec!["x (Weight: 0)"]);
}

#[test]
fn lora_strength_is_the_fallback() {
    let summary = summarize(
        r#"{"1": {"class_type": "LoraLoader", "inputs": {"lora_name": "x", "strength": 0.8}}}"#,
    );
    assert_eq!(summary.loras, vec!["x (Weight: 0.8)"]);
}

#[test]
fn lora_without_strength_defaults_to_one() {
    let summary = summarize(r#"{"1": {"inputs": {"lora_name": "x"}}}"#);
    assert_eq!(summary.loras, vec!["x (Weight: 1.0)"]);
}

#[test]
fn null_strength_model_falls_through_to_strength() {
    let summary = summarize(
        r#"{"1": {"inputs": {"lora_name": "x", "strength_model": null, "strength": 0.5}}}"#,
    );
    assert_eq!(summary.loras, vec!["x (Weight: 0.5)"]);
}

#[test]
fn strength_model_beats_strength() {
    let summary = summarize(
        r#"{"1": {"inputs": {"lora_name": "x", "strength_model": 0.7, "strength": 0.2}}}"#,
    );
    assert_eq!(summary.loras, vec!["x (Weight: 0.7)"]);
}

#[test]
fn lora_extraction_ignores_class_type() {
    let summary = summarize(
        r#"{"1": {"class_type": "PowerLoraLoader", "inputs": {"lora_name": "style.safetensors"}}}"#,
    );
    assert_eq!(summary.loras, vec!["style.safetensors (Weight: 1.0)"]);
}

#[test]
fn duplicate_loras_collapse_and_sort() {
    let summary = summarize(
        r#"{
            "1": {"inputs": {"lora_name": "zeta", "strength_model": 1.0}},
            "2": {"inputs": {"lora_name": "zeta", "strength_model": 1.0}},
            "3": {"inputs": {"lora_name": "alpha", "strength_model": 1.0}}
        }"#,
    );
    assert_eq!(
        summary.loras,
        vec!["alpha (Weight: 1.0)", "zeta (Weight: 1.0)"]
    );
}

#[test]
fn unet_name_beats_ckpt_name() {
    let summary = summarize(
        r#"{"1": {"inputs": {"unet_name": "A", "ckpt_name": "B"}}}"#,
    );
    assert_eq!(summary.models, vec!["A"]);
}

#[test]
fn ckpt_name_is_used_without_unet_name() {
    let summary = summarize(r#"{"1": {"inputs": {"ckpt_name": "sd15.ckpt"}}}"#);
    assert_eq!(summary.models, vec!["sd15.ckpt"]);
}

#[test]
fn duplicate_models_collapse_and_sort() {
    let summary = summarize(
        r#"{
            "1": {"inputs": {"ckpt_name": "zeta.ckpt"}},
            "2": {"inputs": {"unet_name": "alpha.gguf"}},
            "3": {"inputs": {"ckpt_name": "zeta.ckpt"}}
        }"#,
    );
    assert_eq!(summary.models, vec!["alpha.gguf", "zeta.ckpt"]);
}

#[test]
fn one_node_may_match_several_categories() {
    let summary = summarize(
        r#"{"1": {"class_type": "CLIPTextEncode",
                 "inputs": {"text": "a cat", "lora_name": "x", "ckpt_name": "base.ckpt"}}}"#,
    );
    assert_eq!(summary.positive_prompts, vec!["a cat"]);
    assert_eq!(summary.loras, vec!["x (Weight: 1.0)"]);
    assert_eq!(summary.models, vec!["base.ckpt"]);
}

#[test]
fn malformed_entries_are_skipped() {
    let summary = summarize(
        r#"{
            "1": 42,
            "2": "just a string",
            "3": [1, 2],
            "4": {"class_type": "CLIPTextEncode", "inputs": {"text": "survivor"}}
        }"#,
    );
    assert_eq!(summary.positive_prompts, vec!["survivor"]);
}

#[test]
fn classification_is_idempotent() {
    let graph = NodeGraph::decode(
        r#"{
            "1": {"class_type": "CLIPTextEncode", "inputs": {"text": "a cat"}},
            "2": {"inputs": {"lora_name": "x", "strength": 0.8}},
            "3": {"inputs": {"unet_name": "flux.gguf"}}
        }"#,
    )
    .unwrap();
    assert_eq!(
        WorkflowSummary::classify(&graph),
        WorkflowSummary::classify(&graph)
    );
}

#[test]
fn envelope_yields_positive_prompt() {
    let summary = summarize(
        r#"{"prompt": {"1": {"class_type": "CLIPTextEncode", "inputs": {"text": "cat"}}}}"#,
    );
    assert_eq!(summary.positive_prompts, vec!["cat"]);
}

#[test]
fn empty_graph_yields_empty_summary() {
    let summary = summarize("{}");
    assert!(summary.is_empty());
}
