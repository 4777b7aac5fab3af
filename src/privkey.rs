//! Private keys: scalars in `[0, r)`, zeroized on drop.

use dashu::integer::UBig;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::GROUP_ORDER_BE;
use crate::error::BlsError;
use crate::g1::G1Point;
use crate::g2::G2Point;
use crate::pubkey::PublicKey;
use crate::signature::Signature;

/// A BLS private key: a scalar reduced modulo the group order `r`, stored as
/// 32 big-endian bytes and wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Sample a private key uniformly from `[1, r)` and derive its public key.
    ///
    /// Samples are drawn from a CSPRNG and rejected (rather than reduced) if
    /// they land at or above the group order `r`, so the resulting
    /// distribution is exactly uniform rather than biased toward small
    /// values.
    pub fn generate() -> (PrivateKey, PublicKey) {
        let order = UBig::from_be_bytes(&GROUP_ORDER_BE);
        let mut rng = rand::thread_rng();
        loop {
            let mut candidate = [0u8; 32];
            rng.fill_bytes(&mut candidate);
            let value = UBig::from_be_bytes(&candidate);
            if value == UBig::from(0u8) || value >= order {
                continue;
            }
            let sk = PrivateKey(candidate);
            let pk = sk.public_key().expect("freshly sampled scalar is valid");
            return (sk, pk);
        }
    }

    /// Reconstruct a private key from its 32-byte big-endian encoding. The
    /// all-zero encoding is accepted (it round-trips through the JSON `"0"`
    /// envelope quirk) but cannot sign or derive a non-identity public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| BlsError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(PrivateKey(arr))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Minimal-length big-endian wire encoding: no leading zero bytes, and
    /// the zero key encodes to the empty slice (matching a `big.Int.Bytes()`
    /// convention rather than a fixed 32-byte width).
    pub fn to_be_bytes_minimal(&self) -> Vec<u8> {
        let first_nonzero = self.0.iter().position(|&b| b != 0);
        match first_nonzero {
            Some(i) => self.0[i..].to_vec(),
            None => Vec::new(),
        }
    }

    /// Inverse of [`Self::to_be_bytes_minimal`]. An empty slice decodes to
    /// the zero key; any slice longer than 32 bytes is rejected.
    pub fn from_be_bytes_minimal(bytes: &[u8]) -> Result<Self, BlsError> {
        if bytes.len() > 32 {
            return Err(BlsError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(PrivateKey(arr))
    }

    /// Derive the public key `sk * G2`.
    pub fn public_key(&self) -> Result<PublicKey, BlsError> {
        if self.is_zero() {
            return Ok(PublicKey::identity());
        }
        let point = G2Point(crate::consts::G2_GENERATOR).mul(&self.0)?;
        Ok(PublicKey::from(point))
    }

    /// Plain BLS signature: `sk * H(message)`.
    pub fn sign<T: AsRef<[u8]>>(&self, message: T) -> Result<Signature, BlsError> {
        let h = crate::hash::hash_to_curve(message)?;
        let sig = h.mul(&self.0)?;
        Ok(Signature::from(sig))
    }

    /// Augmented signature over `hash_msg(pk, message)`, used by fast
    /// aggregation so every signer hashes with the group's aggregate public
    /// key bound into the input.
    pub fn sign_augmented<T: AsRef<[u8]>>(
        &self,
        pk: &PublicKey,
        message: T,
    ) -> Result<Signature, BlsError> {
        let h = crate::hash::hash_msg(pk, message)?;
        let sig = h.mul(&self.0)?;
        Ok(Signature::from(sig))
    }

    /// This signer's contribution to committee index `index`'s membership
    /// key, during the one-time accountable-subgroup setup ceremony:
    /// `anticoef * (sk * hash_index(agg_pub, index))`.
    ///
    /// The scalar multiplication is split into two sequential 32-byte
    /// multiplications -- by `sk` first, then by `anticoef` -- rather than
    /// one multiplication by their (up to 512-bit) product, since `anticoef`
    /// is not reduced modulo the group order (see [`crate::aggregate`]).
    /// A combiner sums every signer's contribution for a given `index` across
    /// the whole committee to obtain that index's membership key.
    pub fn generate_membership_key_part(
        &self,
        index: u8,
        agg_pub: &PublicKey,
        anticoef: &[u8; 32],
    ) -> Result<Signature, BlsError> {
        let h = crate::hash::hash_index(agg_pub, index)?;
        let own = h.mul(&self.0)?;
        let scaled = own.mul(anticoef)?;
        Ok(Signature::from(scaled))
    }

    /// Partial signature for a multisig: `sk * hash_msg(agg_pub, message) +
    /// membership_key`, where `membership_key` is this signer's precomputed
    /// (ceremony) membership key for its committee index. Combining these
    /// across participating signers, together with the plain (unweighted)
    /// sum of their public keys, yields a [`crate::multisig::Multisig`] that
    /// verifies against `agg_pub` without the verifier ever needing the
    /// individual public keys.
    pub fn multisign<T: AsRef<[u8]>>(
        &self,
        message: T,
        agg_pub: &PublicKey,
        membership_key: &Signature,
    ) -> Result<Signature, BlsError> {
        self.sign_augmented(agg_pub, message)?.aggregate(membership_key)
    }

    /// The raw G1 generator scaled by this key; exposed for callers that need
    /// the key-derived point rather than a full public key (G2), e.g. tests
    /// exercising the underlying scalar multiplication directly.
    #[cfg(test)]
    fn g1_point(&self) -> Result<G1Point, BlsError> {
        G1Point(crate::consts::G1_GENERATOR).mul(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_nonzero_and_derives_public_key() {
        let (sk, pk) = PrivateKey::generate();
        assert!(!sk.is_zero());
        assert!(!pk.is_identity());
        assert_eq!(sk.public_key().unwrap().to_bytes(), pk.to_bytes());
    }

    #[test]
    fn zero_key_has_identity_public_key() {
        let sk = PrivateKey::from_bytes(&[0u8; 32]).unwrap();
        assert!(sk.public_key().unwrap().is_identity());
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let (sk, pk) = PrivateKey::generate();
        let sig = sk.sign(b"hello world").unwrap();
        assert!(pk.verify(b"hello world", &sig).unwrap());
        assert!(!pk.verify(b"goodbye world", &sig).unwrap());
    }

    #[test]
    fn distinct_keys_derive_distinct_g1_points() {
        let (sk1, _) = PrivateKey::generate();
        let (sk2, _) = PrivateKey::generate();
        assert_ne!(sk1.g1_point().unwrap().to_bytes(), sk2.g1_point().unwrap().to_bytes());
    }

    #[test]
    fn zero_key_encodes_to_empty_minimal_bytes() {
        let sk = PrivateKey::from_bytes(&[0u8; 32]).unwrap();
        assert!(sk.to_be_bytes_minimal().is_empty());
        let back = PrivateKey::from_be_bytes_minimal(&[]).unwrap();
        assert!(back.is_zero());
    }

    #[test]
    fn minimal_bytes_round_trip_and_drop_leading_zeros() {
        let (sk, _) = PrivateKey::generate();
        let minimal = sk.to_be_bytes_minimal();
        assert!(minimal.is_empty() || minimal[0] != 0);
        let back = PrivateKey::from_be_bytes_minimal(&minimal).unwrap();
        assert_eq!(back.to_bytes(), sk.to_bytes());
    }
}
