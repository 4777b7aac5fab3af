//! Hash-to-curve: deterministic try-and-increment mapping of byte strings
//! onto G1, plus the two domain-separated variants used by signing.

use dashu::integer::UBig;
use solana_bn254::compression::prelude::alt_bn128_g1_decompress;

use crate::consts::{MODULUS_BE, NORMALIZE_MODULUS_BE};
use crate::error::BlsError;
use crate::g1::G1Point;
use crate::pubkey::PublicKey;

/// Map an arbitrary byte string onto a point in G1.
///
/// For each counter `n` in `0..=254`, hash `"BLS-BN254-RO" || message || n`
/// with SHA-256 (the literal domain-separation tag the cited construction
/// hashes in ahead of the message), reject samples at or above
/// `NORMALIZE_MODULUS` (to avoid modulo bias), reduce modulo the base field,
/// tag as the even-Y compressed encoding, and attempt decompression. The
/// first counter that decompresses to a valid curve point is the answer.
pub fn hash_to_curve<T: AsRef<[u8]>>(message: T) -> Result<G1Point, BlsError> {
    let modulus = UBig::from_be_bytes(&MODULUS_BE);
    let normalize_modulus = UBig::from_be_bytes(&NORMALIZE_MODULUS_BE);

    for n in 0u8..=254 {
        let digest = solana_nostd_sha256::hashv(&[b"BLS-BN254-RO", message.as_ref(), &[n]]);
        let candidate = UBig::from_be_bytes(&digest);
        if candidate >= normalize_modulus {
            continue;
        }
        let x = (candidate % &modulus).to_be_bytes();
        let mut compressed = [0u8; 32];
        let ofs = 32 - x.len();
        compressed[ofs..].copy_from_slice(&x);

        if let Ok(point) = alt_bn128_g1_decompress(&compressed) {
            return Ok(G1Point(point));
        }
    }
    Err(BlsError::HashToCurveError)
}

/// Message-augmented hash: `HashToCurve(serialize(pk) || message)`. Binding
/// the (aggregated) public key into the hash input defeats rogue-key attacks
/// at the hashing layer without a separate proof-of-possession.
pub fn hash_msg<T: AsRef<[u8]>>(pk: &PublicKey, message: T) -> Result<G1Point, BlsError> {
    let mut data = Vec::with_capacity(128 + message.as_ref().len());
    data.extend_from_slice(&pk.to_bytes());
    data.extend_from_slice(message.as_ref());
    hash_to_curve(data)
}

/// Index-augmented hash: `HashMsg(pk, Z)` where `Z` is 31 zero bytes followed
/// by `index`. Used to derive per-signer membership keys.
pub fn hash_index(pk: &PublicKey, index: u8) -> Result<G1Point, BlsError> {
    let mut z = [0u8; 32];
    z[31] = index;
    hash_msg(pk, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_to_curve_is_deterministic() {
        let m = b"hash-determinism";
        let h1 = hash_to_curve(m).unwrap();
        let h2 = hash_to_curve(m).unwrap();
        assert_eq!(h1.to_bytes(), h2.to_bytes());
    }

    #[test]
    fn hash_to_curve_differs_across_messages() {
        let h1 = hash_to_curve(b"alpha").unwrap();
        let h2 = hash_to_curve(b"beta").unwrap();
        assert_ne!(h1.to_bytes(), h2.to_bytes());
    }

    #[test]
    fn hash_to_curve_never_produces_identity() {
        for m in ["", "a", "bb", "multi-byte-message"] {
            let h = hash_to_curve(m).unwrap();
            assert!(!h.is_identity());
        }
    }

    #[test]
    fn hash_index_matches_hash_msg_with_zero_padded_index() {
        let pk = PublicKey::identity();
        let mut z = [0u8; 32];
        z[31] = 7;
        assert_eq!(
            hash_index(&pk, 7).unwrap().to_bytes(),
            hash_msg(&pk, z).unwrap().to_bytes()
        );
    }
}
