//! BLS signatures, rogue-key-resistant aggregation, and accountable-subgroup
//! multisignatures over BN254 (alt-bn128).
//!
//! Three protocols live side by side and must not be confused: plain BLS
//! (`PrivateKey::sign` / `PublicKey::verify`), anti-rogue aggregated BLS
//! (`aggregate` + the same `PublicKey::verify`), and accountable
//! subgroup multisignatures (`multisig`), where a fixed committee's aggregate
//! public key verifies a signature from any named subset of its members.

pub mod aggregate;
pub mod bitmask;
pub mod consts;
pub mod error;
pub mod g1;
pub mod g2;
pub mod hash;
pub mod multisig;
pub mod pairing;
pub mod privkey;
pub mod pubkey;
pub mod serialize;
pub mod signature;

pub use crate::aggregate::{
    aggregate_membership_keys, aggregate_public_keys, aggregate_signatures,
    anti_rogue_coefficients,
};
pub use crate::bitmask::Bitmask;
pub use crate::error::BlsError;
pub use crate::g1::G1Point;
pub use crate::g2::G2Point;
pub use crate::multisig::Multisig;
pub use crate::privkey::PrivateKey;
pub use crate::pubkey::PublicKey;
pub use crate::serialize::{read_private_key, read_public_key, read_signature};
pub use crate::signature::Signature;
