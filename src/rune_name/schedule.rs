// Height-indexed minimum-name-length unlock schedule.
//
// Rune names get shorter (and therefore more of them become available) as
// the chain advances past PROTOCOL_START: one fewer required letter every
// PERIOD blocks, until the minimum hits zero.

use super::Rune;

pub const PROTOCOL_START: u64 = 840000;
pub const PERIOD: u64 = 17500;
pub const START_LEN: u64 = 13;
pub const HALVING_INTERVAL: u64 = 210000;

/// Minimum permitted name length (in letters) for a rune etched at `height`.
pub fn min_name_length(height: u64) -> u64 {
    if height < PROTOCOL_START {
        return START_LEN;
    }
    for i in 1..START_LEN {
        let lower = PROTOCOL_START + PERIOD * (i - 1);
        let upper = PROTOCOL_START + PERIOD * i;
        if height >= lower && height < upper {
            return START_LEN - i;
        }
    }
    0
}

/// Value of a name consisting of `n` repeated `A`s - the minimal numeric
/// value among names of length `n`. `steps[0]` is the degenerate
/// zero-length case (value 0, used only as the lower bound for interpolating
/// into the all-zero regime).
fn steps() -> [u128; 28] {
    let mut steps = [0u128; 28];
    let mut value: u128 = 0;
    for slot in steps.iter_mut().skip(1) {
        *slot = value;
        value = (value + 1) * 26;
    }
    steps
}

/// The minimum rune value allowed to be etched at `height`, interpolated
/// smoothly within each unlock period rather than stepping discretely.
pub fn min_at_height(height: u64) -> Rune {
    let steps = steps();
    let offset = height.saturating_add(1);

    if offset < PROTOCOL_START {
        return Rune::from_value_unchecked(steps[12]);
    }

    let end_of_schedule = PROTOCOL_START + HALVING_INTERVAL;
    if offset >= end_of_schedule {
        return Rune::from_value_unchecked(0);
    }

    let progress = offset - PROTOCOL_START;
    let length = 12 - progress / PERIOD;
    let remainder = progress % PERIOD;

    let start_val = steps[length as usize];
    let end_val = steps[(length - 1) as usize];

    let value = start_val - (start_val - end_val) * (remainder as u128) / (PERIOD as u128);
    Rune::from_value_unchecked(value)
}
