// crates/proof-chain-core/src/lib.rs
// ============================================================================
// Module: Proof Chain Core Library
// Description: Public API surface for proof-chain integrity and certification.
// Purpose: Expose core types, collaborator interfaces, and runtime components.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Proof-chain core bundles proof artifacts, verifies their digests, certifies
//! bundles within a bounded time window, rotates meta-seals, keeps a change
//! receipt ledger, and checks parity against a remote proof registry. It is
//! backend-agnostic: storage and registry access go through explicit
//! interfaces, and the wall clock is never read.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ArtifactError;
pub use interfaces::ArtifactStore;
pub use interfaces::ProofRegistry;
pub use interfaces::RegistryError;
pub use interfaces::RegistryKey;
pub use interfaces::RegistryRecord;
pub use interfaces::RegistryUpload;
pub use runtime::BundleBuilder;
pub use runtime::ChainVerifier;
pub use runtime::Certifier;
pub use runtime::CertifierConfig;
pub use runtime::InMemoryArtifactStore;
pub use runtime::InMemoryProofRegistry;
pub use runtime::LedgerValidation;
pub use runtime::ParityChecker;
pub use runtime::ProofError;
pub use runtime::PublishReport;
pub use runtime::ReceiptLedger;
pub use runtime::ReceiptRequest;
pub use runtime::RotationConfig;
pub use runtime::RotationInputs;
pub use runtime::SealRotator;
pub use runtime::VerifiedBundle;
pub use runtime::write_json_document;
