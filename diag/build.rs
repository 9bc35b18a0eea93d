/*++

Licensed under the Apache-2.0 license.

File Name:

    build.rs

Abstract:

    Build script that turns the shared test vector file into a static table.

--*/

use std::fmt::Write;
use std::path::PathBuf;

use serde::Deserialize;

const VECTOR_FILE: &str = "data/test_cases.json";

#[derive(Deserialize)]
struct TestCases {
    epsilon: f32,
    pairs: Vec<[f32; 2]>,
}

fn literal(val: f32) -> String {
    format!("{val:?}_f32")
}

fn main() {
    println!("cargo:rerun-if-changed={VECTOR_FILE}");

    let json = std::fs::read_to_string(VECTOR_FILE)
        .unwrap_or_else(|e| panic!("Unable to read {VECTOR_FILE}: {e}"));
    let cases: TestCases = serde_json::from_str(&json)
        .unwrap_or_else(|e| panic!("Malformed {VECTOR_FILE}: {e}"));

    assert!(
        cases.epsilon.is_finite() && cases.epsilon > 0.0,
        "{VECTOR_FILE}: epsilon must be a positive number"
    );
    for (i, [a, b]) in cases.pairs.iter().enumerate() {
        assert!(
            a.is_finite() && b.is_finite(),
            "{VECTOR_FILE}: pair {i} is not representable as f32"
        );
    }

    let mut out = String::new();
    writeln!(out, "// Generated from {VECTOR_FILE}").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "pub const VECTOR_EPSILON: f32 = {};",
        literal(cases.epsilon)
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "pub static TEST_VECTORS: [TestVector; {}] = [",
        cases.pairs.len()
    )
    .unwrap();
    for [a, b] in &cases.pairs {
        writeln!(out, "    TestVector::new({}, {}),", literal(*a), literal(*b)).unwrap();
    }
    writeln!(out, "];").unwrap();

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    std::fs::write(out_dir.join("test_vectors.rs"), out).unwrap();

    if std::env::var_os("CARGO_FEATURE_RISCV").is_some() {
        println!("cargo:rerun-if-changed=memory.x");
        std::fs::copy("memory.x", out_dir.join("memory.x")).unwrap();
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
    }
}
