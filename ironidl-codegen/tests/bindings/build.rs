//! Generates bindings for the codegen fixtures into `OUT_DIR`.

use ironidl_codegen::{GeneratorConfig, generate_from_files};
use std::path::PathBuf;

const FIXTURES: &[&str] = &[
    "node.json",
    "element.json",
    "domPoint.json",
    "event_init.json",
    "mouse_event_init.json",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let fixtures = manifest_dir.join("..").join("fixtures");
    let inputs: Vec<PathBuf> = FIXTURES.iter().map(|name| fixtures.join(name)).collect();
    for input in &inputs {
        println!("cargo:rerun-if-changed={}", input.display());
    }

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    generate_from_files(&inputs, &out_dir, &GeneratorConfig::default())?;
    Ok(())
}
