// Protocol/network constants an embedding caller may want to override:
// dust floor, fee rate, and the rune-name unlock schedule's start height.
// Plain data with a `Default` impl, in the teacher's style of configuration
// (`TxMetadata`, `Packet`) rather than a builder or env-loader.

use crate::rune_name::schedule::PROTOCOL_START;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum value (sats) for any rune-carrying output.
    pub dust_limit: u64,
    /// Fee rate in satoshis per kilo-vbyte.
    pub fee_rate: u64,
    /// Height at which the rune-name unlock schedule begins.
    pub protocol_start: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dust_limit: 546,
            fee_rate: 1000,
            protocol_start: PROTOCOL_START,
        }
    }
}
