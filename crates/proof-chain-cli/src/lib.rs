// crates/proof-chain-cli/src/lib.rs
// ============================================================================
// Module: Proof Chain CLI Library
// Description: Shared helpers for the proof-chain binary.
// Purpose: Expose the message catalog and the filesystem artifact store.
// Dependencies: proof-chain-core, tempfile
// ============================================================================

//! ## Overview
//! Library half of the `proof-chain` CLI. The binary routes every user-facing
//! string through [`t!`] and reads and writes artifacts through
//! [`FileArtifactStore`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fs_store;
pub mod i18n;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use fs_store::FileArtifactStore;
pub use fs_store::MAX_ARTIFACT_BYTES;
