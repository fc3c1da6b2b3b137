// ID types: the Rune `RuneId` (block:tx, delta-codeable on the wire) and
// the Inscription `Id` (txid:index, trailing-zero-trimmed on the wire).

use crate::error::{Error, Result};
use crate::num::bytes::{le_trim, le_untrim};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RuneId {
    pub block: u64,
    pub tx: u32,
}

impl RuneId {
    pub fn new(block: u64, tx: u32) -> Self {
        Self { block, tx }
    }

    /// Fold a delta-encoded `(delta_block, delta_or_abs_tx)` pair onto the
    /// previously-decoded `RuneId`, per the wire delta rule: if
    /// `delta_block == 0`, the second field is `delta_tx` within the same
    /// block; otherwise it is the absolute `tx` of the new block.
    pub fn next(previous: Self, delta_block: u128, field: u128) -> Result<Self> {
        let block = previous
            .block
            .checked_add(u64::try_from(delta_block).map_err(|_| Error::Overflow)?)
            .ok_or(Error::Overflow)?;

        let tx = if delta_block == 0 {
            previous
                .tx
                .checked_add(u32::try_from(field).map_err(|_| Error::Overflow)?)
                .ok_or(Error::Overflow)?
        } else {
            u32::try_from(field).map_err(|_| Error::Overflow)?
        };

        Ok(Self { block, tx })
    }

    /// Delta-encode `self` relative to `previous`: inverse of [`RuneId::next`].
    pub fn delta(self, previous: Self) -> (u128, u128) {
        let delta_block = u128::from(self.block - previous.block);
        let field = if delta_block == 0 {
            u128::from(self.tx - previous.tx)
        } else {
            u128::from(self.tx)
        };
        (delta_block, field)
    }
}

impl fmt::Display for RuneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.block, self.tx)
    }
}

impl FromStr for RuneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (block, tx) = s
            .split_once(':')
            .ok_or(Error::InvalidName("rune id must be BLOCK:TX"))?;
        Ok(Self {
            block: block.parse().map_err(|_| Error::InvalidName("bad block"))?,
            tx: tx.parse().map_err(|_| Error::InvalidName("bad tx"))?,
        })
    }
}

/// Inscription identifier: the txid of the reveal transaction plus the
/// index of the inscription within it (for multi-inscription reveals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InscriptionId {
    pub txid: [u8; 32],
    pub index: u32,
}

impl InscriptionId {
    pub fn new(txid: [u8; 32], index: u32) -> Self {
        Self { txid, index }
    }

    /// Binary form used inside scripts: 32-byte txid followed by the
    /// little-endian index with trailing zero bytes stripped.
    pub fn to_bytes(self) -> Vec<u8> {
        let mut bytes = self.txid.to_vec();
        bytes.extend(le_trim(u128::from(self.index)));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !(32..=36).contains(&bytes.len()) {
            return Err(Error::MalformedEnvelope("inscription id wrong length"));
        }
        let mut txid = [0u8; 32];
        txid.copy_from_slice(&bytes[..32]);
        let index = le_untrim(&bytes[32..])
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(Error::Overflow)?;
        Ok(Self { txid, index })
    }
}

impl fmt::Display for InscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.txid {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "i{}", self.index)
    }
}

impl FromStr for InscriptionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (txid_hex, index) = s
            .split_once('i')
            .ok_or(Error::InvalidName("inscription id must be TXIDiINDEX"))?;
        let txid_bytes =
            hex::decode(txid_hex).map_err(|_| Error::InvalidName("bad txid hex"))?;
        if txid_bytes.len() != 32 {
            return Err(Error::InvalidName("txid must be 32 bytes"));
        }
        let mut txid = [0u8; 32];
        txid.copy_from_slice(&txid_bytes);
        let index = index
            .parse()
            .map_err(|_| Error::InvalidName("bad inscription index"))?;
        Ok(Self { txid, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rune_id_delta_round_trips_same_block() {
        let previous = RuneId::new(2585189, 200);
        let current = RuneId::new(2585189, 204);
        let (delta_block, field) = current.delta(previous);
        assert_eq!(delta_block, 0);
        assert_eq!(field, 4);
        assert_eq!(RuneId::next(previous, delta_block, field).unwrap(), current);
    }

    #[test]
    fn rune_id_delta_round_trips_new_block() {
        let previous = RuneId::new(2584000, 130);
        let current = RuneId::new(2584240, 5);
        let (delta_block, field) = current.delta(previous);
        assert_eq!(delta_block, 240);
        assert_eq!(field, 5);
        assert_eq!(RuneId::next(previous, delta_block, field).unwrap(), current);
    }

    #[test]
    fn inscription_id_text_round_trip() {
        let id = InscriptionId::new([0x11; 32], 5);
        let text = id.to_string();
        assert_eq!(InscriptionId::from_str(&text).unwrap(), id);
    }

    #[test]
    fn inscription_id_binary_trims_trailing_zeros() {
        assert_eq!(InscriptionId::new([0; 32], 0).to_bytes().len(), 32);
        assert_eq!(InscriptionId::new([0; 32], 255).to_bytes().len(), 33);
        assert_eq!(InscriptionId::new([0; 32], 256).to_bytes().len(), 34);

        for index in [0u32, 1, 255, 256, 65535, 65536] {
            let id = InscriptionId::new([7; 32], index);
            let bytes = id.to_bytes();
            assert_eq!(InscriptionId::from_bytes(&bytes).unwrap(), id);
        }
    }
}
