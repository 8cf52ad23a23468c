// crates/proof-chain-core/src/core/mod.rs
// ============================================================================
// Module: Proof Chain Core Types
// Description: Canonical proof-chain documents, identifiers, and digest rules.
// Purpose: Provide stable, serializable types for every certification stage.
// Dependencies: serde, serde_json, sha2, time, ulid
// ============================================================================

//! ## Overview
//! Core types define the bundle manifest, certification documents, meta-seals,
//! change receipts, and parity reports. They are the single source of truth
//! for every document the runtime reads or emits.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod bundle;
pub mod certificate;
pub mod hashing;
pub mod identifiers;
pub mod parity;
pub mod receipts;
pub mod seal;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bundle::ArtifactHeader;
pub use bundle::ProofBundle;
pub use bundle::ProofEntry;
pub use bundle::bundle_digest;
pub use bundle::normalize_entries;
pub use certificate::BundleRef;
pub use certificate::META_CERT_PHASE;
pub use certificate::MetaCertBundleInput;
pub use certificate::MetaCertInputs;
pub use certificate::MetaCertLineage;
pub use certificate::MetaCertPreCertInput;
pub use certificate::MetaCertification;
pub use certificate::PRE_CERT_PHASE;
pub use certificate::PreCertification;
pub use certificate::meta_hash;
pub use certificate::seal_for;
pub use hashing::HashError;
pub use hashing::canonical_json_bytes;
pub use hashing::hash_bytes;
pub use hashing::hash_canonical_json;
pub use hashing::self_digest;
pub use identifiers::ReceiptId;
pub use identifiers::TenantId;
pub use parity::CloudParityReport;
pub use parity::PARITY_DIGEST_FIELD;
pub use parity::PARITY_PHASE;
pub use parity::ParityCounters;
pub use parity::ParityEntry;
pub use parity::ParityStatus;
pub use receipts::ChangeReceipt;
pub use receipts::ChangeReceiptIndex;
pub use receipts::RECEIPT_INDEX_DIGEST_FIELD;
pub use seal::IntegrityGate;
pub use seal::META_SEAL_DIGEST_FIELD;
pub use seal::META_SEAL_PHASE;
pub use seal::MetaSeal;
pub use seal::SealedBundle;
pub use seal::SealedFile;
pub use seal::SealedIntegrityReport;
pub use time::TimeError;
pub use time::Timestamp;
pub use time::parse_field;
