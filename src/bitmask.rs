//! A bitmask over signer indices, backed by an arbitrary-precision integer so
//! it can address subgroups larger than 64 signers while still round-tripping
//! through a single decimal (JSON) or hex-like integer value, the way the
//! original multisig envelope encodes participation.

use dashu::integer::UBig;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BlsError;

/// Which of up to `256` indexed signers contributed to a multisig. Bit `i`
/// (from the least-significant bit) set means signer `i` participated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmask(UBig);

impl Bitmask {
    pub fn empty() -> Self {
        Bitmask(UBig::from(0u8))
    }

    pub fn from_indices(indices: &[u8]) -> Self {
        let mut mask = UBig::from(0u8);
        for &i in indices {
            mask |= UBig::from(1u8) << (i as usize);
        }
        Bitmask(mask)
    }

    pub fn contains(&self, index: u8) -> bool {
        let bytes = self.0.to_be_bytes();
        let byte_idx_from_end = (index as usize) / 8;
        if byte_idx_from_end >= bytes.len() {
            return false;
        }
        let byte = bytes[bytes.len() - 1 - byte_idx_from_end];
        (byte >> (index % 8)) & 1 == 1
    }

    /// The ascending list of signer indices this mask covers.
    pub fn indices(&self, max_index: u8) -> Vec<u8> {
        (0..=max_index).filter(|&i| self.contains(i)).collect()
    }

    pub fn count(&self, max_index: u8) -> usize {
        self.indices(max_index).len()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == UBig::from(0u8)
    }

    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_decimal_string(s: &str) -> Result<Self, BlsError> {
        let mask = s
            .parse::<UBig>()
            .map_err(|_| BlsError::DecodingError("invalid bitmask decimal string"))?;
        Ok(Bitmask(mask))
    }

    /// Big-endian minimal-length byte representation; the zero mask encodes
    /// to the empty slice.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        if self.is_empty() {
            Vec::new()
        } else {
            self.0.to_be_bytes().as_ref().to_vec()
        }
    }

    /// Inverse of [`Self::to_be_bytes`]; the empty slice decodes to the zero
    /// mask.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Bitmask(UBig::from_be_bytes(bytes))
    }
}

/// JSON representation: the decimal string of the underlying integer (the
/// convention the `PartMask` field of the [`crate::multisig::Multisig`]
/// envelope uses).
impl Serialize for Bitmask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Bitmask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Bitmask::from_decimal_string(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_indices_round_trips_through_contains() {
        let mask = Bitmask::from_indices(&[0, 3, 9]);
        assert!(mask.contains(0));
        assert!(mask.contains(3));
        assert!(mask.contains(9));
        assert!(!mask.contains(1));
        assert!(!mask.contains(8));
    }

    #[test]
    fn indices_lists_all_set_bits_in_order() {
        let mask = Bitmask::from_indices(&[1, 2, 63]);
        assert_eq!(mask.indices(63), vec![1, 2, 63]);
    }

    #[test]
    fn empty_mask_has_no_indices() {
        let mask = Bitmask::empty();
        assert!(mask.is_empty());
        assert_eq!(mask.count(255), 0);
    }

    #[test]
    fn decimal_string_round_trips() {
        let mask = Bitmask::from_indices(&[0, 5, 200]);
        let s = mask.to_decimal_string();
        let back = Bitmask::from_decimal_string(&s).unwrap();
        assert_eq!(mask, back);
    }

    #[test]
    fn empty_mask_encodes_to_empty_bytes() {
        let mask = Bitmask::empty();
        assert!(mask.to_be_bytes().is_empty());
        assert_eq!(Bitmask::from_be_bytes(&[]), mask);
    }

    #[test]
    fn be_bytes_round_trip() {
        let mask = Bitmask::from_indices(&[0, 5, 63, 130]);
        let bytes = mask.to_be_bytes();
        assert_eq!(Bitmask::from_be_bytes(&bytes), mask);
    }

    #[test]
    fn json_round_trips_via_decimal_string() {
        let mask = Bitmask::from_indices(&[1, 9, 17]);
        let json = serde_json::to_string(&mask).unwrap();
        let back: Bitmask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mask);
    }
}
