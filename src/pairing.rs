//! The bilinear pairing check: `prod(e(a_i, b_i)) == 1`.

use solana_bn254::prelude::alt_bn128_pairing;

use crate::consts::PAIRING_ONE;
use crate::error::BlsError;
use crate::g1::G1Point;
use crate::g2::G2Point;

/// Evaluate `e(a_1, b_1) * e(a_2, b_2) * ... == 1` in the target group.
///
/// Returns `Ok(true)`/`Ok(false)` for any well-formed input; `Err` only when
/// the underlying precompile-compatible arithmetic itself rejects the input
/// (which should not happen for points that passed `G1Point`/`G2Point`
/// deserialization).
pub fn pairing_check(pairs: &[(G1Point, G2Point)]) -> Result<bool, BlsError> {
    if pairs.is_empty() {
        return Err(BlsError::AggregationError(
            "pairing check requires at least one pair",
        ));
    }

    let mut input = vec![0u8; 192 * pairs.len()];
    for (i, (a, b)) in pairs.iter().enumerate() {
        let off = 192 * i;
        input[off..off + 64].copy_from_slice(&a.to_bytes());
        input[off + 64..off + 192].copy_from_slice(&b.to_bytes());
    }

    let result = alt_bn128_pairing(&input)
        .map_err(|_| BlsError::PrecompileError("pairing check failed"))?;

    let ok = result.as_ref() == PAIRING_ONE.as_slice();
    tracing::trace!(num_pairs = pairs.len(), accepted = ok, "pairing_check");
    Ok(ok)
}
