// crates/proof-chain-cli/src/tests.rs
// ============================================================================
// Module: CLI Catalog Unit Tests
// Description: Checks the message catalog for duplicate keys and bad templates.
// Dependencies: proof-chain-cli i18n module
// ============================================================================

//! ## Overview
//! Catalog keys must be unique and placeholders must be well formed so that
//! every `t!` call renders its arguments.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::collections::BTreeSet;

use crate::i18n::CATALOG_ITEMS;
use crate::i18n::catalog;

fn placeholders(template: &str) -> Result<BTreeSet<String>, String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1 ..];
        let end = after.find('}').ok_or_else(|| format!("unclosed placeholder in {template}"))?;
        let name = &after[.. end];
        if name.is_empty()
            || !name.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        {
            return Err(format!("bad placeholder '{name}' in {template}"));
        }
        names.insert(name.to_string());
        rest = &after[end + 1 ..];
    }
    if rest.contains('}') {
        return Err(format!("unmatched '}}' in {template}"));
    }
    Ok(names)
}

#[test]
fn catalog_keys_are_unique() {
    let mut seen = BTreeSet::new();
    for (key, _) in CATALOG_ITEMS {
        assert!(seen.insert(*key), "duplicate catalog key {key}");
    }
    assert_eq!(catalog().len(), CATALOG_ITEMS.len());
}

#[test]
fn catalog_placeholders_are_well_formed() {
    for (key, template) in CATALOG_ITEMS {
        if let Err(err) = placeholders(template) {
            panic!("{key}: {err}");
        }
    }
}

#[test]
fn failure_messages_carry_the_error() {
    for (key, template) in CATALOG_ITEMS {
        if key.ends_with(".failed") && *key != "output.write_failed" {
            let names = placeholders(template).unwrap();
            assert!(names.contains("error"), "{key} drops the underlying error");
        }
    }
}
