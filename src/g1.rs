//! G1 points: 64-byte uncompressed alt-bn128 encodings (X, Y, each 32-byte
//! big-endian). Used for hash-to-curve outputs and BLS signatures.

use solana_bn254::compression::prelude::{alt_bn128_g1_compress, alt_bn128_g1_decompress};
use solana_bn254::prelude::{alt_bn128_addition, alt_bn128_multiplication};

use crate::consts::G1_GENERATOR_NEG;
use crate::error::BlsError;

/// An uncompressed G1 point, or the identity (point at infinity).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct G1Point(pub [u8; 64]);

impl G1Point {
    pub const IDENTITY: G1Point = G1Point([0u8; 64]);

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn is_identity(&self) -> bool {
        self.0 == [0u8; 64]
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        self.0
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| BlsError::InvalidLength {
            expected: 64,
            actual: bytes.len(),
        })?;
        if arr == [0u8; 64] {
            return Ok(Self::IDENTITY);
        }
        // Round-trip through compress/decompress to reject off-curve points.
        let compressed =
            alt_bn128_g1_compress(&arr).map_err(|_| BlsError::DecodingError("invalid G1 point"))?;
        let roundtrip = alt_bn128_g1_decompress(&compressed)
            .map_err(|_| BlsError::DecodingError("invalid G1 point"))?;
        if roundtrip != arr {
            return Err(BlsError::DecodingError("invalid G1 point"));
        }
        Ok(G1Point(arr))
    }

    /// Curve addition: `self + rhs`.
    pub fn add(&self, rhs: &G1Point) -> Result<G1Point, BlsError> {
        if self.is_identity() {
            return Ok(*rhs);
        }
        if rhs.is_identity() {
            return Ok(*self);
        }
        let mut input = [0u8; 128];
        input[..64].copy_from_slice(&self.0);
        input[64..].copy_from_slice(&rhs.0);
        let out = alt_bn128_addition(&input)
            .map_err(|_| BlsError::PrecompileError("G1 addition failed"))?;
        let mut sum = [0u8; 64];
        sum.copy_from_slice(&out[..64]);
        Ok(G1Point(sum))
    }

    /// Scalar multiplication by a 32-byte big-endian scalar. The scalar is
    /// not required to be reduced modulo the group order; the underlying
    /// arithmetic reduces implicitly because every point has order `r`.
    pub fn mul(&self, scalar_be: &[u8; 32]) -> Result<G1Point, BlsError> {
        if self.is_identity() {
            return Ok(Self::IDENTITY);
        }
        let mut input = [0u8; 96];
        input[..64].copy_from_slice(&self.0);
        input[64..].copy_from_slice(scalar_be);
        let out = alt_bn128_multiplication(&input)
            .map_err(|_| BlsError::PrecompileError("G1 scalar multiplication failed"))?;
        let mut product = [0u8; 64];
        product.copy_from_slice(&out[..64]);
        Ok(G1Point(product))
    }

    /// Negation: `-self`.
    pub fn neg(&self) -> Result<G1Point, BlsError> {
        if self.is_identity() {
            return Ok(Self::IDENTITY);
        }
        // -P = P scalar-multiplied by (r - 1); equivalently, negate Y in Fq.
        // We negate via the field modulus rather than r, since Y lives in Fq.
        let mut y = [0u8; 32];
        y.copy_from_slice(&self.0[32..]);
        let neg_y = negate_fq(&y);
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.0[..32]);
        out[32..].copy_from_slice(&neg_y);
        Ok(G1Point(out))
    }
}

/// Negate a big-endian Fq element modulo the base field modulus.
fn negate_fq(y_be: &[u8; 32]) -> [u8; 32] {
    use dashu::integer::UBig;
    let modulus = UBig::from_be_bytes(&crate::consts::MODULUS_BE);
    let y = UBig::from_be_bytes(y_be);
    if y == UBig::from(0u8) {
        return [0u8; 32];
    }
    let neg = modulus - y;
    let bytes = neg.to_be_bytes();
    let mut out = [0u8; 32];
    let ofs = 32 - bytes.len();
    out[ofs..].copy_from_slice(&bytes);
    out
}

/// The negated G1 generator, as a pairing-input constant.
pub fn g1_generator_neg() -> G1Point {
    G1Point(G1_GENERATOR_NEG)
}
