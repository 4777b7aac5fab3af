//! Accountable-subgroup multisignatures (ASM): a proof, verifiable against a
//! single fixed committee aggregate public key, that a specific named subset
//! of the committee's signers produced a signature over a message -- without
//! the verifier needing the individual public keys of the committee at all.

use serde::{Deserialize, Serialize};

use crate::error::BlsError;
use crate::g1::G1Point;
use crate::pubkey::PublicKey;
use crate::signature::Signature;

use crate::bitmask::Bitmask;

/// A multisignature: the combined signature and combined (unweighted) public
/// key of the participating subset, plus the bitmask naming that subset.
///
/// The JSON field names (`PartSignature`/`PartPublicKey`/`PartMask`) match
/// the upstream envelope this crate interoperates with.
#[derive(Clone, Serialize, Deserialize)]
pub struct Multisig {
    #[serde(rename = "PartSignature")]
    pub signature: Signature,
    #[serde(rename = "PartPublicKey")]
    pub public_key: PublicKey,
    #[serde(rename = "PartMask")]
    pub mask: Bitmask,
}

impl Multisig {
    pub fn zero() -> Self {
        Multisig {
            signature: Signature::identity(),
            public_key: PublicKey::identity(),
            mask: Bitmask::empty(),
        }
    }

    pub fn new(signature: Signature, public_key: PublicKey, mask: Bitmask) -> Self {
        Multisig {
            signature,
            public_key,
            mask,
        }
    }

    /// Combine each participating signer's `(index, public_key, partial_signature)`
    /// -- the latter produced by [`crate::privkey::PrivateKey::multisign`] --
    /// into a single multisig.
    pub fn aggregate_parts(parts: &[(u8, PublicKey, Signature)]) -> Result<Multisig, BlsError> {
        let mut signature = Signature::identity();
        let mut public_key = PublicKey::identity();
        let mut indices = Vec::with_capacity(parts.len());
        for (index, pk, sig) in parts {
            signature = signature.aggregate(sig)?;
            public_key = public_key.aggregate(pk)?;
            indices.push(*index);
        }
        Ok(Multisig {
            signature,
            public_key,
            mask: Bitmask::from_indices(&indices),
        })
    }

    /// Verify this multisig against the committee's fixed aggregate public
    /// key, checking:
    ///
    /// `e(sig, G2) == e(hash_msg(agg_pub, message), public_key)
    ///              * e(sum_{i in mask} hash_index(agg_pub, i), agg_pub)`
    ///
    /// An empty mask with an identity signature and identity public key
    /// verifies trivially (every factor above is the target-group identity).
    pub fn verify<T: AsRef<[u8]>>(
        &self,
        agg_pub: &PublicKey,
        message: T,
    ) -> Result<bool, BlsError> {
        let mut indices_sum = G1Point::identity();
        for index in self.mask.indices(u8::MAX) {
            let h = crate::hash::hash_index(agg_pub, index)?;
            indices_sum = indices_sum.add(&h)?;
        }

        let hash_msg_point = crate::hash::hash_msg(agg_pub, message)?;
        let neg_sig = self.signature.point().neg()?;

        crate::pairing::pairing_check(&[
            (
                neg_sig,
                crate::g2::G2Point(crate::consts::G2_GENERATOR),
            ),
            (hash_msg_point, *self.public_key.point()),
            (indices_sum, *agg_pub.point()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_membership_keys, aggregate_public_keys, anti_rogue_coefficients};
    use crate::privkey::PrivateKey;

    fn setup_committee(n: usize) -> (Vec<PrivateKey>, Vec<PublicKey>, PublicKey, Vec<Signature>) {
        let mut privs = Vec::with_capacity(n);
        let mut pubs = Vec::with_capacity(n);
        for _ in 0..n {
            let (sk, pk) = PrivateKey::generate();
            privs.push(sk);
            pubs.push(pk);
        }
        let agg_pub = aggregate_public_keys(&pubs).unwrap();
        let coefficients = anti_rogue_coefficients(&pubs);
        let membership_keys = aggregate_membership_keys(&privs, &agg_pub, &coefficients).unwrap();
        (privs, pubs, agg_pub, membership_keys)
    }

    #[test]
    fn three_of_three_demo_verifies() {
        let (privs, pubs, agg_pub, mks) = setup_committee(3);
        let msg = b"3-of-3 demo";

        let parts: Vec<_> = (0..3)
            .map(|i| {
                let sig = privs[i].multisign(msg, &agg_pub, &mks[i]).unwrap();
                (i as u8, pubs[i], sig)
            })
            .collect();

        let multisig = Multisig::aggregate_parts(&parts).unwrap();
        assert!(multisig.verify(&agg_pub, msg).unwrap());
    }

    #[test]
    fn k_of_n_subset_verifies_and_wrong_message_fails() {
        let (privs, pubs, agg_pub, mks) = setup_committee(8);
        let msg = b"k-of-n demo";
        let subset = [0usize, 2, 5, 7];

        let parts: Vec<_> = subset
            .iter()
            .map(|&i| {
                let sig = privs[i].multisign(msg, &agg_pub, &mks[i]).unwrap();
                (i as u8, pubs[i], sig)
            })
            .collect();

        let multisig = Multisig::aggregate_parts(&parts).unwrap();
        assert!(multisig.verify(&agg_pub, msg).unwrap());
        assert!(!multisig.verify(&agg_pub, b"tampered message").unwrap());
    }

    #[test]
    fn empty_multisig_verifies_trivially() {
        let multisig = Multisig::zero();
        let (_, _, agg_pub, _) = setup_committee(2);
        assert!(multisig.verify(&agg_pub, b"anything").unwrap());
    }

    #[test]
    fn single_signer_subset_verifies() {
        let (privs, pubs, agg_pub, mks) = setup_committee(4);
        let msg = b"single signer";
        let sig = privs[1].multisign(msg, &agg_pub, &mks[1]).unwrap();
        let multisig = Multisig::aggregate_parts(&[(1u8, pubs[1], sig)]).unwrap();
        assert!(multisig.verify(&agg_pub, msg).unwrap());
    }

    #[test]
    fn json_envelope_uses_documented_field_names_and_round_trips() {
        let (privs, pubs, agg_pub, mks) = setup_committee(3);
        let msg = b"envelope demo";
        let sig = privs[0].multisign(msg, &agg_pub, &mks[0]).unwrap();
        let multisig = Multisig::aggregate_parts(&[(0u8, pubs[0], sig)]).unwrap();

        let json = serde_json::to_string(&multisig).unwrap();
        assert!(json.contains("\"PartSignature\""));
        assert!(json.contains("\"PartPublicKey\""));
        assert!(json.contains("\"PartMask\""));

        let back: Multisig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.signature.to_bytes(), multisig.signature.to_bytes());
        assert_eq!(back.public_key.to_bytes(), multisig.public_key.to_bytes());
        assert_eq!(back.mask, multisig.mask);
    }

    #[test]
    fn k_of_64_multisigs_verify_for_a_range_of_bitmasks() {
        let (privs, pubs, agg_pub, mks) = setup_committee(64);
        let msg = b"k-of-64 demo";

        let masks: [u64; 8] = [
            0x1,
            0x80000001,
            0x10101010,
            0x11111111,
            0x0F0F0F0F,
            0xF0F0F0F1,
            0xFFFFFFFF,
            0x7FFFFFFFFFFFFFFF,
        ];

        for mask in masks {
            let indices: Vec<usize> = (0..64).filter(|i| (mask >> i) & 1 == 1).collect();
            let parts: Vec<_> = indices
                .iter()
                .map(|&i| {
                    let sig = privs[i].multisign(msg, &agg_pub, &mks[i]).unwrap();
                    (i as u8, pubs[i], sig)
                })
                .collect();

            let multisig = Multisig::aggregate_parts(&parts).unwrap();
            assert!(multisig.verify(&agg_pub, msg).unwrap(), "mask {mask:#x} failed to verify");
        }
    }

    #[test]
    fn flipping_a_bit_in_the_mask_breaks_verification() {
        let (privs, pubs, agg_pub, mks) = setup_committee(8);
        let msg = b"bit flip demo";
        let subset = [0usize, 3, 5];

        let parts: Vec<_> = subset
            .iter()
            .map(|&i| {
                let sig = privs[i].multisign(msg, &agg_pub, &mks[i]).unwrap();
                (i as u8, pubs[i], sig)
            })
            .collect();

        let mut multisig = Multisig::aggregate_parts(&parts).unwrap();
        // Flip a bit that was not part of the signing subset; signature and
        // public key are unchanged, only the claimed mask is tampered with.
        multisig.mask = Bitmask::from_indices(&[0, 1, 3, 5]);
        assert!(!multisig.verify(&agg_pub, msg).unwrap());
    }

    #[test]
    fn zero_multisig_json_round_trips() {
        let multisig = Multisig::zero();
        let json = serde_json::to_string(&multisig).unwrap();
        let back: Multisig = serde_json::from_str(&json).unwrap();
        assert!(back.signature.is_identity());
        assert!(back.public_key.is_identity());
        assert!(back.mask.is_empty());
    }
}
