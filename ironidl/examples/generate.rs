//! Example generation run over a small DOM subset.
//!
//! Run with: `RUST_LOG=debug cargo run --example generate [OUT_DIR]`
//!
//! Without an output directory the files are written to a temporary
//! directory and printed.

use ironidl::prelude::*;
use std::path::PathBuf;

const NODE: &str = r#"{"filename": "node", "objects": [
    {"kind": "interface", "name": "Node", "members": [
        {"member": "attribute", "name": "nodeName", "type": {"kind": "dom_string"}, "readonly": true},
        {"member": "attribute", "name": "textContent", "type": {"kind": "dom_string"}},
        {"member": "operation", "name": "appendChild", "return_type": {"kind": "pointer", "class": "Node"},
         "arguments": [{"name": "node", "type": {"kind": "pointer", "class": "Node"}}]}
    ]}
]}"#;

const ELEMENT: &str = r#"{"filename": "element", "objects": [
    {"kind": "interface", "name": "Element", "parent": "Node", "members": [
        {"member": "attribute", "name": "id", "type": {"kind": "dom_string"}},
        {"member": "attribute", "name": "shadowRoot", "type": {"kind": "pointer", "class": "ShadowRoot"}, "readonly": true},
        {"member": "operation", "name": "toggleAttribute", "return_type": {"kind": "boolean"},
         "arguments": [
            {"name": "qualifiedName", "type": {"kind": "dom_string"}},
            {"name": "force", "type": {"kind": "boolean"}, "optional": true}
         ]},
        {"member": "operation", "name": "scroll", "return_type": {"kind": "void"}},
        {"member": "operation", "name": "scroll", "return_type": {"kind": "void"},
         "arguments": [
            {"name": "x", "type": {"kind": "double"}},
            {"name": "y", "type": {"kind": "double"}}
         ]}
    ]},
    {"kind": "dictionary", "name": "ScrollToOptions", "members": [
        {"member": "attribute", "name": "left", "type": {"kind": "double"}},
        {"member": "attribute", "name": "top", "type": {"kind": "double"}},
        {"member": "attribute", "name": "behavior", "type": {"kind": "dom_string"}}
    ]}
]}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let temp = tempfile::tempdir()?;
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| temp.path().to_path_buf());

    let units = vec![parse_unit(NODE)?, parse_unit(ELEMENT)?];
    let config = GeneratorConfig::default();
    let templates = load_templates(&config)?;
    let generated = generate_all(&units, &templates, &config)?;
    let written = write_units(&generated, &out_dir, &config.extension)?;

    for (unit, path) in generated.iter().zip(&written) {
        println!("=== {} -> {} ===", unit.class_name, path.display());
        for diagnostic in &unit.diagnostics {
            println!("warning: {diagnostic}");
        }
        println!("{}", unit.source);
    }

    Ok(())
}
