//! G2 points: 128-byte uncompressed alt-bn128 encodings (Xc1, Xc0, Yc1, Yc0,
//! each 32-byte big-endian). Used for public keys. Unlike G1, BN254's
//! group-operation precompiles (EIP-196/197) only cover G1, so G2 addition,
//! negation and scalar multiplication go through `ark-bn254`/`ark-ec`
//! instead, round-tripping through the compressed alt-bn128 encoding at the
//! boundary (with the big-endian/little-endian byte reversal that crosses
//! alt-bn128's and arkworks' differing serialization conventions).

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::BigInt;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use solana_bn254::compression::prelude::{alt_bn128_g2_compress, alt_bn128_g2_decompress};

use crate::consts::G2_GENERATOR_NEG;
use crate::error::BlsError;

/// An uncompressed G2 point, or the identity (point at infinity).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct G2Point(pub [u8; 128]);

impl G2Point {
    pub const IDENTITY: G2Point = G2Point([0u8; 128]);

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn is_identity(&self) -> bool {
        self.0 == [0u8; 128]
    }

    pub fn to_bytes(&self) -> [u8; 128] {
        self.0
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        let arr: [u8; 128] = bytes.try_into().map_err(|_| BlsError::InvalidLength {
            expected: 128,
            actual: bytes.len(),
        })?;
        if arr == [0u8; 128] {
            return Ok(Self::IDENTITY);
        }
        let compressed = alt_bn128_g2_compress(&arr)
            .map_err(|_| BlsError::DecodingError("invalid G2 point"))?;
        let roundtrip = alt_bn128_g2_decompress(&compressed)
            .map_err(|_| BlsError::DecodingError("invalid G2 point"))?;
        if roundtrip != arr {
            return Err(BlsError::DecodingError("invalid G2 point"));
        }
        Ok(G2Point(arr))
    }

    fn to_ark_affine(&self) -> Result<ark_bn254::G2Affine, BlsError> {
        let mut compressed = alt_bn128_g2_compress(&self.0)
            .map_err(|_| BlsError::DecodingError("invalid G2 point"))?;
        compressed.reverse();
        ark_bn254::G2Affine::deserialize_compressed(&compressed[..])
            .map_err(|_| BlsError::DecodingError("invalid G2 point"))
    }

    fn from_ark_affine(point: ark_bn254::G2Affine) -> Result<Self, BlsError> {
        if point.is_zero() {
            return Ok(Self::IDENTITY);
        }
        let mut bytes = [0u8; 64];
        point
            .serialize_compressed(&mut &mut bytes[..])
            .map_err(|_| BlsError::PrecompileError("G2 serialization failed"))?;
        bytes.reverse();
        let uncompressed = alt_bn128_g2_decompress(&bytes)
            .map_err(|_| BlsError::DecodingError("invalid G2 point"))?;
        Ok(G2Point(uncompressed))
    }

    /// Curve addition: `self + rhs`.
    pub fn add(&self, rhs: &G2Point) -> Result<G2Point, BlsError> {
        if self.is_identity() {
            return Ok(*rhs);
        }
        if rhs.is_identity() {
            return Ok(*self);
        }
        let sum = self.to_ark_affine()? + rhs.to_ark_affine()?;
        Self::from_ark_affine(sum.into_affine())
    }

    /// Scalar multiplication by a 32-byte big-endian scalar. Not required to
    /// be reduced modulo the group order: multiplication is performed as a
    /// plain double-and-add over the integer, which automatically wraps
    /// modulo `r` because every point in G2 has order `r`.
    pub fn mul(&self, scalar_be: &[u8; 32]) -> Result<G2Point, BlsError> {
        if self.is_identity() {
            return Ok(Self::IDENTITY);
        }
        let affine = self.to_ark_affine()?;
        let scalar = be_bytes_to_bigint(scalar_be);
        let product = affine.mul_bigint(scalar);
        Self::from_ark_affine(product.into_affine())
    }

    /// Negation: `-self`.
    pub fn neg(&self) -> Result<G2Point, BlsError> {
        if self.is_identity() {
            return Ok(Self::IDENTITY);
        }
        let affine = self.to_ark_affine()?;
        Self::from_ark_affine(-affine)
    }
}

/// Interpret 32 big-endian bytes as an arbitrary-precision (not necessarily
/// canonical) scalar for double-and-add scalar multiplication.
fn be_bytes_to_bigint(be: &[u8; 32]) -> BigInt<4> {
    let mut le = *be;
    le.reverse();
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&le[i * 8..i * 8 + 8]);
        *limb = u64::from_le_bytes(buf);
    }
    BigInt::<4>(limbs)
}

/// The negated G2 generator, as a pairing-input constant.
pub fn g2_generator_neg() -> G2Point {
    G2Point(G2_GENERATOR_NEG)
}
