//! Snapshot coverage for whole documents under `tests/fixtures/`.

use tagline_engine::{RenderOptions, render};

fn assert_fixture(name: &str) {
    let path = format!("{}/tests/fixtures/{name}.mds", env!("CARGO_MANIFEST_DIR"));
    let source = std::fs::read_to_string(&path).unwrap();
    let rendered = render(&source, RenderOptions::default()).unwrap();
    assert!(
        rendered.diagnostics.is_empty(),
        "unexpected diagnostics for {name}: {:?}",
        rendered.diagnostics
    );
    insta::assert_snapshot!(name, rendered.html);
}

#[test]
fn container_fixture() {
    assert_fixture("container");
}

#[test]
fn table_fixture() {
    assert_fixture("table");
}

#[test]
fn form_fixture() {
    assert_fixture("form");
}
