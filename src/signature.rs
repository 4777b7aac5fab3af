//! Signatures: G1 points.

use crate::error::BlsError;
use crate::g1::G1Point;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub(crate) G1Point);

impl Signature {
    pub fn identity() -> Self {
        Signature(G1Point::identity())
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_identity()
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        Ok(Signature(G1Point::from_bytes(bytes)?))
    }

    pub(crate) fn point(&self) -> &G1Point {
        &self.0
    }

    /// Value-returning aggregation: `self + other`.
    pub fn aggregate(&self, other: &Signature) -> Result<Signature, BlsError> {
        Ok(Signature(self.0.add(&other.0)?))
    }

    /// Scalar-multiply this signature (or membership-key part) by a 32-byte
    /// big-endian coefficient.
    pub fn scaled_by(&self, coefficient: &[u8; 32]) -> Result<Signature, BlsError> {
        Ok(Signature(self.0.mul(coefficient)?))
    }

    /// Verify one signer's ceremony contribution to index `index`'s
    /// membership key, before it is combined with the rest of the
    /// committee's contributions: checks `self == anticoef * sk *
    /// hash_index(agg_pub, index)` given that signer's own public key and
    /// anti-rogue coefficient.
    pub fn verify_membership_key_part(
        &self,
        agg_pub: &crate::pubkey::PublicKey,
        index: u8,
        signer_pub: &crate::pubkey::PublicKey,
        anticoef: &[u8; 32],
    ) -> Result<bool, BlsError> {
        let h = crate::hash::hash_index(agg_pub, index)?;
        let scaled_pub = signer_pub.scaled_by(anticoef)?;
        let neg_self = self.0.neg()?;
        crate::pairing::pairing_check(&[
            (neg_self, crate::g2::G2Point(crate::consts::G2_GENERATOR)),
            (h, *scaled_pub.point()),
        ])
    }

    /// Verify a fully-combined membership key for committee index `index`:
    /// checks `self == agg_pub`'s implicit aggregate secret times
    /// `hash_index(agg_pub, index)`, i.e. that `self` is `agg_pub`'s
    /// signature over that index.
    pub fn verify_membership_key(
        &self,
        agg_pub: &crate::pubkey::PublicKey,
        index: u8,
    ) -> Result<bool, BlsError> {
        let h = crate::hash::hash_index(agg_pub, index)?;
        let neg_self = self.0.neg()?;
        crate::pairing::pairing_check(&[
            (neg_self, crate::g2::G2Point(crate::consts::G2_GENERATOR)),
            (h, *agg_pub.point()),
        ])
    }
}

impl From<G1Point> for Signature {
    fn from(point: G1Point) -> Self {
        Signature(point)
    }
}
