use gatemark_wasm::{
    escape_html, load_post, normalize_class_name, preprocess_gate_blocks, rewrite_gate_blocks,
    sanitize_html, validate_allowed_classes,
};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
struct RewriteResult {
    content: String,
    gate_count: usize,
    error: Option<String>,
    error_line: Option<usize>,
}

#[derive(Deserialize, Debug)]
struct LoadPostResult {
    frontmatter_json: String,
    body: String,
    gate_count: usize,
}

#[wasm_bindgen_test]
fn preprocess_basic_gate() {
    let out = preprocess_gate_blocks(":::decision-gate\n### Test\n- Item\n:::");
    assert!(out.starts_with(r#"<div class="glass-card p-6 border-l-4 border-orange-500 mb-8">"#));
    assert!(out.contains(">Test</h3>"));
    assert!(!out.contains(":::"));
}

#[wasm_bindgen_test]
fn rewrite_reports_rejection() {
    let source = ":::decision-gate\n- never closed";
    let result = rewrite_gate_blocks(source).expect("rewrite should succeed");
    let result: RewriteResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert_eq!(result.content, source);
    assert_eq!(result.gate_count, 0);
    assert_eq!(result.error_line, Some(1));
    assert!(result.error.unwrap().contains("never closed"));
}

#[wasm_bindgen_test]
fn rewrite_counts_gates() {
    let source = ":::decision-gate\n### A\n- one\n:::\n\ntext\n\n:::decision-gate\n### B\n- two\n:::";
    let result = rewrite_gate_blocks(source).expect("rewrite should succeed");
    let result: RewriteResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert_eq!(result.gate_count, 2);
    assert!(result.error.is_none());
}

#[wasm_bindgen_test]
fn class_and_escape_helpers() {
    let allowed = js_sys::Array::of2(&JsValue::from_str("mb-4"), &JsValue::from_str("italic"));
    assert!(validate_allowed_classes(allowed));

    let mixed = js_sys::Array::of2(&JsValue::from_str("mb-4"), &JsValue::from_f64(4.0));
    assert!(!validate_allowed_classes(mixed));

    assert!(validate_allowed_classes(js_sys::Array::new()));
    assert_eq!(normalize_class_name("mb-4  mb-4 mt-6"), "mb-4 mt-6");
    assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#39;x&#39;&gt;");
}

#[wasm_bindgen_test]
fn sanitize_with_default_schema() {
    let out = sanitize_html("<p class=\"mb-4 evil\">x</p><script>1</script>", JsValue::UNDEFINED)
        .expect("sanitize should succeed");
    assert!(out.contains(r#"class="mb-4""#));
    assert!(!out.contains("script"));
}

#[wasm_bindgen_test]
fn load_post_with_frontmatter() {
    let source = "---\ntitle: Guide\ntags: [OpenClaw]\n---\n:::decision-gate\n### Q\n- a\n:::\n";
    let result = load_post(source).expect("load should succeed");
    let result: LoadPostResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert!(result.frontmatter_json.contains("\"title\":\"Guide\""));
    assert!(result.frontmatter_json.contains("\"tags\":[\"OpenClaw\"]"));
    assert_eq!(result.gate_count, 1);
    assert!(result.body.starts_with("<div class=\"glass-card"));
}
