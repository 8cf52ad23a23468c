// crates/proof-chain-config/src/lib.rs
// ============================================================================
// Module: Proof Chain Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for proof-chain.toml semantics.
// Dependencies: proof-chain-core, serde, toml, url
// ============================================================================

//! ## Overview
//! `proof-chain-config` defines the configuration model for the proof-chain
//! tools. Validation is strict and fails closed; secrets never live in the
//! file and are resolved from the environment at use.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
