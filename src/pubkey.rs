//! Public keys: G2 points.

use crate::error::BlsError;
use crate::g2::G2Point;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub(crate) G2Point);

impl PublicKey {
    pub fn identity() -> Self {
        PublicKey(G2Point::identity())
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_identity()
    }

    pub fn to_bytes(&self) -> [u8; 128] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        Ok(PublicKey(G2Point::from_bytes(bytes)?))
    }

    pub(crate) fn point(&self) -> &G2Point {
        &self.0
    }

    /// Value-returning aggregation: `self + other`. The zero public key is
    /// the neutral element. Aggregation is commutative and associative.
    pub fn aggregate(&self, other: &PublicKey) -> Result<PublicKey, BlsError> {
        Ok(PublicKey(self.0.add(&other.0)?))
    }

    /// Scalar-multiply this public key by a 32-byte big-endian coefficient.
    /// Used by the anti-rogue aggregation protocol and by membership-key
    /// verification (`a_j * P_j`).
    pub fn scaled_by(&self, coefficient: &[u8; 32]) -> Result<PublicKey, BlsError> {
        Ok(PublicKey(self.0.mul(coefficient)?))
    }

    /// Verify a plain BLS signature: `pairing_check([-sig, H(m)], [G2, self])`.
    pub fn verify<T: AsRef<[u8]>>(
        &self,
        message: T,
        signature: &crate::signature::Signature,
    ) -> Result<bool, BlsError> {
        let h = crate::hash::hash_to_curve(message)?;
        self.verify_against_hash(h, signature)
    }

    fn verify_against_hash(
        &self,
        h: crate::g1::G1Point,
        signature: &crate::signature::Signature,
    ) -> Result<bool, BlsError> {
        let neg_sig = signature.point().neg()?;
        crate::pairing::pairing_check(&[
            (neg_sig, G2Point(crate::consts::G2_GENERATOR)),
            (h, *self.point()),
        ])
    }
}

impl From<G2Point> for PublicKey {
    fn from(point: G2Point) -> Self {
        PublicKey(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_with_identity_is_neutral() {
        let pk = PublicKey(G2Point(crate::consts::G2_GENERATOR));
        let agg = pk.aggregate(&PublicKey::identity()).unwrap();
        assert_eq!(agg.to_bytes(), pk.to_bytes());
    }

    #[test]
    fn aggregate_is_commutative() {
        let (_, pk1) = crate::privkey::PrivateKey::generate();
        let (_, pk2) = crate::privkey::PrivateKey::generate();
        let a = pk1.aggregate(&pk2).unwrap();
        let b = pk2.aggregate(&pk1).unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
    }
}
