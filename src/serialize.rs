//! JSON envelope and hex reader helpers.
//!
//! These wrap the fixed-width binary codecs owned by each entity
//! (`PrivateKey::to_bytes`/`from_bytes`, etc.) without altering their
//! semantics: `PrivateKey` round-trips through a decimal string (matching a
//! `big.Int` JSON convention, including the `"0"` quirk for the zero key --
//! not JSON `null`, though `null` is accepted on read for leniency),
//! `PublicKey`/`Signature` round-trip through lowercase hex, and the
//! identity element of each serializes to JSON `null`.

use dashu::integer::UBig;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::BlsError;
use crate::privkey::PrivateKey;
use crate::pubkey::PublicKey;
use crate::signature::Signature;

fn decimal_to_private_key(s: &str) -> Result<PrivateKey, BlsError> {
    if s.is_empty() {
        return PrivateKey::from_be_bytes_minimal(&[]);
    }
    let n = s
        .parse::<UBig>()
        .map_err(|_| BlsError::DecodingError("invalid private key decimal string"))?;
    let be = n.to_be_bytes();
    PrivateKey::from_be_bytes_minimal(be.as_ref())
}

impl Serialize for PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_zero() {
            return serializer.serialize_str("0");
        }
        let n = UBig::from_be_bytes(&self.to_be_bytes_minimal());
        serializer.serialize_str(&n.to_string())
    }
}

struct PrivateKeyVisitor;

impl<'de> Visitor<'de> for PrivateKeyVisitor {
    type Value = PrivateKey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a decimal string, \"0\", or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PrivateKey, E> {
        decimal_to_private_key(v).map_err(E::custom)
    }

    fn visit_none<E: de::Error>(self) -> Result<PrivateKey, E> {
        Ok(PrivateKey::from_be_bytes_minimal(&[]).expect("empty slice always decodes"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<PrivateKey, E> {
        self.visit_none()
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PrivateKeyVisitor)
    }
}

macro_rules! hex_envelope {
    ($ty:ty, $len:expr, $visitor:ident, $empty_label:literal) => {
        struct $visitor;

        impl<'de> Visitor<'de> for $visitor {
            type Value = $ty;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a lowercase hex string of {} bytes, or null", $len)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<$ty, E> {
                let bytes = hex::decode(v)
                    .map_err(|_| E::custom(concat!("invalid hex ", $empty_label)))?;
                <$ty>::from_bytes(&bytes).map_err(E::custom)
            }

            fn visit_none<E: de::Error>(self) -> Result<$ty, E> {
                Ok(<$ty>::identity())
            }

            fn visit_unit<E: de::Error>(self) -> Result<$ty, E> {
                self.visit_none()
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if self.is_identity() {
                    return serializer.serialize_none();
                }
                serializer.serialize_str(&hex::encode(self.to_bytes()))
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any($visitor)
            }
        }
    };
}

hex_envelope!(PublicKey, 128, PublicKeyVisitor, "public key");
hex_envelope!(Signature, 64, SignatureVisitor, "signature");

/// Parse a hex-encoded private key (its minimal-length big-endian integer
/// bytes, no `0x` prefix). An empty string decodes to the zero key.
pub fn read_private_key(hex_str: &str) -> Result<PrivateKey, BlsError> {
    let bytes =
        hex::decode(hex_str).map_err(|_| BlsError::DecodingError("invalid private key hex"))?;
    PrivateKey::from_be_bytes_minimal(&bytes)
}

/// Parse a hex-encoded public key (128 bytes, no `0x` prefix).
pub fn read_public_key(hex_str: &str) -> Result<PublicKey, BlsError> {
    let bytes =
        hex::decode(hex_str).map_err(|_| BlsError::DecodingError("invalid public key hex"))?;
    PublicKey::from_bytes(&bytes)
}

/// Parse a hex-encoded signature (64 bytes, no `0x` prefix).
pub fn read_signature(hex_str: &str) -> Result<Signature, BlsError> {
    let bytes =
        hex::decode(hex_str).map_err(|_| BlsError::DecodingError("invalid signature hex"))?;
    Signature::from_bytes(&bytes)
}
