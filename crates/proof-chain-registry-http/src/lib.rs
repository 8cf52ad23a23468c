// crates/proof-chain-registry-http/src/lib.rs
// ============================================================================
// Module: Proof Chain Registry HTTP
// Description: REST-backed implementation of the proof registry.
// Purpose: Serve parity lookups and uploads from a row-oriented REST endpoint.
// Dependencies: proof-chain-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! `proof-chain-registry-http` implements [`proof_chain_core::ProofRegistry`]
//! over a REST table addressed by `tenant_id` and `filename` filters. Lookups
//! select the newest row; uploads merge on `(tenant_id, filename, meta_hash)`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod rest;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use rest::RestProofRegistry;
pub use rest::RestRegistryConfig;
pub use rest::row_meta_hash;
