// UTXO coin selection and fee estimation.

pub mod config;

pub use config::Config;

use crate::error::{Error, Result};

/// Virtual-byte estimate for a transaction with the given input/output
/// counts, under a rough fixed-weight model.
pub fn size(inputs: usize, outputs: usize) -> u64 {
    11 + 90 * inputs as u64 + 30 * outputs as u64
}

/// Fee in satoshis for `vbytes` at `fee_rate` satoshis per kilo-vbyte,
/// rounded up.
pub fn fee(vbytes: u64, fee_rate: u64) -> u64 {
    (vbytes * fee_rate + 999) / 1000
}

/// Fixed overhead (signature + control block) for a taproot inscription
/// reveal input, in vbytes.
pub const REVEAL_INPUT_OVERHEAD_VBYTES: u64 = 61;

pub fn reveal_input_vbytes(witness_vbytes: u64) -> u64 {
    REVEAL_INPUT_OVERHEAD_VBYTES + witness_vbytes
}

/// Fee for an etch/reveal transaction: the taproot input plus a fixed
/// 5-output skeleton shape.
pub fn etch_fee(witness_vbytes: u64, fee_rate: u64) -> u64 {
    let vbytes = reveal_input_vbytes(witness_vbytes) + size(0, 3 + 2);
    fee(vbytes, fee_rate)
}

/// Greedy coin selection over a list of items already sorted descending by
/// `amount_fn`. Seeds from the smallest item still `>= min_amount` (or the
/// largest item if none qualifies), then alternates extending forward from
/// the seed (while still short of `min_amount`) or backward from the tail
/// (once the target is met, to mop up dust) until `required` items are
/// chosen.
pub fn select<T, F, E>(
    utxos: &[T],
    amount_fn: F,
    min_amount: u128,
    required: usize,
    insufficient_err: E,
) -> Result<(Vec<T>, u128)>
where
    T: Clone,
    F: Fn(&T) -> u128,
    E: Fn(u128, u128) -> Error,
{
    if utxos.len() < required {
        return Err(Error::InvalidUtxoSelection(
            "fewer utxos available than the required cardinality",
        ));
    }
    if required == 0 {
        return Ok((Vec::new(), 0));
    }

    let mut start = 0usize;
    for (i, utxo) in utxos.iter().enumerate() {
        if amount_fn(utxo) >= min_amount {
            start = i;
        } else {
            break;
        }
    }

    let mut used = vec![false; utxos.len()];
    used[start] = true;
    let mut chosen = vec![utxos[start].clone()];
    let mut sum = amount_fn(&utxos[start]);

    let mut forward_from = start + 1;
    let mut backward_before = utxos.len();

    for _ in 0..required - 1 {
        let index = if sum < min_amount {
            let idx = select_unused(&used, forward_from, utxos.len(), false).ok_or_else(|| {
                Error::InvalidUtxoSelection("no unused utxo left to extend forward")
            })?;
            forward_from = idx + 1;
            idx
        } else {
            let idx = select_unused(&used, 0, backward_before, true).ok_or_else(|| {
                Error::InvalidUtxoSelection("no unused utxo left to extend backward")
            })?;
            backward_before = idx;
            idx
        };
        used[index] = true;
        chosen.push(utxos[index].clone());
        sum += amount_fn(&utxos[index]);
    }

    if sum < min_amount {
        return Err(insufficient_err(min_amount, sum));
    }

    Ok((chosen, sum))
}

/// Find the next unused index in `[start, end)`: scanning forward normally,
/// or from `end` backward toward `start` when `reversed`.
fn select_unused(used: &[bool], start: usize, end: usize, reversed: bool) -> Option<usize> {
    if reversed {
        (start..end).rev().find(|&i| !used[i])
    } else {
        (start..end).find(|&i| !used[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BalanceKind;

    const INVENTORY: [u128; 6] = [150000, 75000, 25000, 10000, 5000, 546];

    fn insufficient(kind: BalanceKind) -> impl Fn(u128, u128) -> Error {
        move |need, have| Error::InsufficientBalance { kind, need, have }
    }

    #[test]
    fn selects_single_exact_match() {
        let (chosen, sum) = select(
            &INVENTORY,
            |x: &u128| *x,
            150000,
            1,
            insufficient(BalanceKind::Native),
        )
        .unwrap();
        assert_eq!(chosen, vec![150000]);
        assert_eq!(sum, 150000);
    }

    #[test]
    fn extends_backward_to_mop_up_dust() {
        let (chosen, sum) = select(
            &INVENTORY,
            |x: &u128| *x,
            150000,
            2,
            insufficient(BalanceKind::Native),
        )
        .unwrap();
        assert_eq!(chosen, vec![150000, 546]);
        assert_eq!(sum, 150546);
    }

    #[test]
    fn three_way_selection_matches_reference_scenario() {
        let (chosen, sum) = select(
            &INVENTORY,
            |x: &u128| *x,
            11000,
            3,
            insufficient(BalanceKind::Native),
        )
        .unwrap();
        assert_eq!(chosen, vec![25000, 546, 5000]);
        assert_eq!(sum, 30546);
    }

    #[test]
    fn reports_insufficient_balance() {
        let err = select(
            &INVENTORY,
            |x: &u128| *x,
            200000,
            1,
            insufficient(BalanceKind::Native),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientBalance {
                kind: BalanceKind::Native,
                need: 200000,
                have: 150000,
            }
        );
    }

    #[test]
    fn rejects_cardinality_larger_than_inventory() {
        let err = select(
            &INVENTORY,
            |x: &u128| *x,
            1,
            10,
            insufficient(BalanceKind::Native),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidUtxoSelection(_)));
    }

    #[test]
    fn fee_rounds_up() {
        assert_eq!(fee(1, 1000), 1);
        assert_eq!(fee(1, 1), 1);
        assert_eq!(size(2, 3), 11 + 180 + 90);
    }
}
