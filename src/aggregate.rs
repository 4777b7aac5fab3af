//! Rogue-key-resistant aggregation: anti-rogue coefficients and the
//! coefficient-weighted combination of public keys and signatures.
//!
//! Each signer `i` is weighted by `a_i = SHA-256(P_i || P_1 || ... || P_n)`,
//! binding every signer's coefficient to the whole set of participating
//! public keys (in the order supplied). The coefficient is used exactly as
//! produced by SHA-256 -- it is *not* reduced modulo the group order `r` --
//! because the Solidity-side verifier this crate interoperates with performs
//! the same unreduced scalar multiplication, and reducing here would produce
//! a different (and incompatible) aggregate.

use crate::error::BlsError;
use crate::privkey::PrivateKey;
use crate::pubkey::PublicKey;
use crate::signature::Signature;

/// Compute the anti-rogue coefficient for each public key in `pubkeys`:
/// `a_i = SHA-256(P_i || P_1 || ... || P_n)`.
pub fn anti_rogue_coefficients(pubkeys: &[PublicKey]) -> Vec<[u8; 32]> {
    let concatenated: Vec<u8> = pubkeys.iter().flat_map(|pk| pk.to_bytes()).collect();
    pubkeys
        .iter()
        .map(|pk| solana_nostd_sha256::hashv(&[&pk.to_bytes(), &concatenated]))
        .collect()
}

/// Aggregate public keys with anti-rogue weighting: `sum(a_i * P_i)`.
pub fn aggregate_public_keys(pubkeys: &[PublicKey]) -> Result<PublicKey, BlsError> {
    tracing::debug!(n = pubkeys.len(), "aggregate_public_keys");
    let coefficients = anti_rogue_coefficients(pubkeys);
    let mut acc = PublicKey::identity();
    for (pk, a) in pubkeys.iter().zip(coefficients.iter()) {
        acc = acc.aggregate(&pk.scaled_by(a)?)?;
    }
    Ok(acc)
}

/// Aggregate partial signatures with the same anti-rogue weighting used for
/// the corresponding public keys: `sum(a_i * sig_i)`.
///
/// `pubkeys` and `sigs` must be the same length and in corresponding order;
/// the coefficients are derived from `pubkeys` exactly as in
/// [`aggregate_public_keys`], so the result is consistent with the public key
/// aggregate under the same ordering.
pub fn aggregate_signatures(
    pubkeys: &[PublicKey],
    sigs: &[Signature],
) -> Result<Signature, BlsError> {
    tracing::debug!(n = sigs.len(), "aggregate_signatures");
    if pubkeys.len() != sigs.len() {
        return Err(BlsError::AggregationError(
            "public key and signature counts differ",
        ));
    }
    let coefficients = anti_rogue_coefficients(pubkeys);
    let mut acc = Signature::identity();
    for (sig, a) in sigs.iter().zip(coefficients.iter()) {
        acc = acc.aggregate(&sig.scaled_by(a)?)?;
    }
    Ok(acc)
}

/// Run the one-time accountable-subgroup setup ceremony for a committee:
/// for every committee index `i`, every signer `j` contributes
/// `coefficients[j] * sk_j * hash_index(agg_pub, i)`, and the contributions
/// are summed into that index's membership key.
///
/// This requires every signer's private key in one place and is therefore a
/// trusted-setup convenience, not something a verifier or a single signer
/// would run in production; a real deployment has each signer compute and
/// transmit only its own contribution per index, with a combiner performing
/// the summation.
pub fn aggregate_membership_keys(
    privs: &[PrivateKey],
    agg_pub: &PublicKey,
    coefficients: &[[u8; 32]],
) -> Result<Vec<Signature>, BlsError> {
    tracing::debug!(n = privs.len(), "aggregate_membership_keys");
    if privs.len() != coefficients.len() {
        return Err(BlsError::AggregationError(
            "private key and coefficient counts differ",
        ));
    }
    let n = privs.len();
    let mut keys = Vec::with_capacity(n);
    for i in 0..n {
        let mut acc = Signature::identity();
        for (priv_j, coef_j) in privs.iter().zip(coefficients.iter()) {
            let part = priv_j.generate_membership_key_part(i as u8, agg_pub, coef_j)?;
            acc = acc.aggregate(&part)?;
        }
        keys.push(acc);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privkey::PrivateKey;

    #[test]
    fn coefficients_depend_on_full_set_and_order() {
        let (_, pk1) = PrivateKey::generate();
        let (_, pk2) = PrivateKey::generate();
        let ab = anti_rogue_coefficients(&[pk1, pk2]);
        let ba = anti_rogue_coefficients(&[pk2, pk1]);
        // Same keys, different order: same per-key input set but different
        // concatenation order, so coefficients differ.
        assert_ne!(ab[0], ba[1]);
    }

    #[test]
    fn aggregate_signatures_verifies_with_aggregate_public_key_under_plain_bls() {
        let (sk1, pk1) = PrivateKey::generate();
        let (sk2, pk2) = PrivateKey::generate();
        let (sk3, pk3) = PrivateKey::generate();
        let pubkeys = [pk1, pk2, pk3];

        let msg = b"rogue-resistant aggregate";
        let sigs = [
            sk1.sign(msg).unwrap(),
            sk2.sign(msg).unwrap(),
            sk3.sign(msg).unwrap(),
        ];

        let agg_pub = aggregate_public_keys(&pubkeys).unwrap();
        let agg_sig = aggregate_signatures(&pubkeys, &sigs).unwrap();

        assert!(agg_pub.verify(msg, &agg_sig).unwrap());
        assert!(!agg_pub.verify(b"wrong message", &agg_sig).unwrap());
    }

    #[test]
    fn aggregation_is_commutative_in_signature_order() {
        let (sk1, pk1) = PrivateKey::generate();
        let (sk2, pk2) = PrivateKey::generate();
        let msg = b"commute";
        let sig1 = sk1.sign(msg).unwrap();
        let sig2 = sk2.sign(msg).unwrap();

        let forward = aggregate_signatures(&[pk1, pk2], &[sig1, sig2]).unwrap();
        let via_swap = sig2.aggregate(&sig1).unwrap();
        let direct = sig1.aggregate(&sig2).unwrap();
        assert_eq!(via_swap.to_bytes(), direct.to_bytes());

        // Sanity check the helper actually computed the weighted sum, not
        // the unweighted one.
        assert_ne!(forward.to_bytes(), direct.to_bytes());
    }
}
