// A single edict: a rune transfer instruction attached to the runestone
// output's edict tail.

use crate::id::RuneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edict {
    pub rune_id: RuneId,
    pub amount: u128,
    pub output: u32,
}

impl Edict {
    pub fn new(rune_id: RuneId, amount: u128, output: u32) -> Self {
        Self {
            rune_id,
            amount,
            output,
        }
    }
}
