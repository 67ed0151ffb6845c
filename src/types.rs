//! Core types shared across the registry variants and the harness.

use core::fmt;
use core::str::FromStr;

use serde::{Serialize, Serializer};
use sha3::{Digest, Sha3_256};

use crate::error::RegistryError;

/// Opaque unique identifier of a subject/caller; the sole key into all
/// per-user state.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Derive a deterministic address from a label: the first 20 bytes of
    /// SHA3-256 over the label's bytes.
    pub fn derive(label: &str) -> Self {
        let digest = Sha3_256::digest(label.as_bytes());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[..20]);
        Self(bytes)
    }

    /// Get the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Selector for the three registry state/event designs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    /// Independent consent flag plus two counter slots per address.
    Basic,
    /// One packed record per address, batched multi-address operations.
    Optimized,
    /// Consent flag only; access/deletion are pure event emissions.
    #[serde(rename = "minimal")]
    MinimalEvent,
}

impl VariantKind {
    /// Returns the selector string used in CLI flags and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Optimized => "optimized",
            Self::MinimalEvent => "minimal",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "optimized" => Ok(Self::Optimized),
            "minimal" | "minimal-event" => Ok(Self::MinimalEvent),
            other => Err(RegistryError::InvalidInput {
                reason: format!("unknown variant '{other}' (expected basic|optimized|minimal)"),
            }),
        }
    }
}

/// Per-address composite record used by the optimized variant.
///
/// Bundling the consent flag and both counters into one storage word reduces
/// the number of distinct slot writes charged per touch. Counter width is
/// fixed at 32 bits with no overflow guard; the fields wrap silently at
/// `u32::MAX`. This is an accepted operational ceiling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PackedUserRecord {
    pub consent: bool,
    pub access_count: u32,
    pub deletion_count: u32,
}

// Word layout: bit 0 = consent, bits 32..64 = access, bits 64..96 = deletion.
const CONSENT_BIT: u128 = 1;
const ACCESS_SHIFT: u32 = 32;
const DELETION_SHIFT: u32 = 64;

impl PackedUserRecord {
    /// Pack the record into a single storage word.
    pub fn to_word(self) -> u128 {
        let mut word = 0u128;
        if self.consent {
            word |= CONSENT_BIT;
        }
        word |= u128::from(self.access_count) << ACCESS_SHIFT;
        word |= u128::from(self.deletion_count) << DELETION_SHIFT;
        word
    }

    /// Unpack a storage word into its logical fields.
    pub fn from_word(word: u128) -> Self {
        Self {
            consent: word & CONSENT_BIT != 0,
            access_count: (word >> ACCESS_SHIFT) as u32,
            deletion_count: (word >> DELETION_SHIFT) as u32,
        }
    }
}

/// Outcome of a committed mutating call: the resource cost the executor
/// charged for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub gas_used: u64,
}
