// crates/proof-chain-core/src/runtime/mod.rs
// ============================================================================
// Module: Proof Chain Runtime
// Description: Verification, certification, rotation, ledger, and parity.
// Purpose: Execute every proof-chain stage against injected collaborators.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! Runtime components take their collaborators and the current time as
//! arguments. Every component shares the chain verifier's digest rules, so a
//! bundle accepted by one stage is accepted by all.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod builder;
pub mod certifier;
pub mod documents;
pub mod error;
pub mod ledger;
pub mod parity;
pub mod rotator;
pub mod store;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::BundleBuilder;
pub use certifier::Certifier;
pub use certifier::CertifierConfig;
pub use certifier::DEFAULT_CERT_GATE;
pub use certifier::DEFAULT_CERT_VERSION;
pub use certifier::DEFAULT_WINDOW_SECONDS;
pub use documents::artifact_filename;
pub use documents::normalize_artifact_path;
pub use documents::write_json_document;
pub use error::ProofError;
pub use ledger::LedgerValidation;
pub use ledger::ReceiptLedger;
pub use ledger::ReceiptRequest;
pub use parity::ParityChecker;
pub use parity::PublishReport;
pub use rotator::DEFAULT_SEAL_GATE;
pub use rotator::RotationConfig;
pub use rotator::RotationInputs;
pub use rotator::SealRotator;
pub use store::InMemoryArtifactStore;
pub use store::InMemoryProofRegistry;
pub use verifier::ChainVerifier;
pub use verifier::TimedProof;
pub use verifier::VerifiedBundle;
