// Skeleton: move an amount of one rune to a recipient output, with
// optional rune change, commission, and BTC change outputs.

use super::{dust_output, empty_transaction, unsigned_input, Utxo};
use crate::error::Result;
use crate::id::RuneId;
use crate::runestone::{Edict, Runestone};
use bitcoin::{Amount, ScriptBuf, Transaction, TxOut};

pub struct RuneTransfer {
    pub rune_inputs: Vec<Utxo>,
    pub sat_inputs: Vec<Utxo>,
    pub rune_id: RuneId,
    pub amount: u128,
    pub recipient_script: ScriptBuf,
    pub rune_change_script: Option<ScriptBuf>,
    pub commission: Option<(ScriptBuf, u64)>,
    pub sender_change_btc: Option<(ScriptBuf, u64)>,
    pub dust_limit: u64,
}

impl RuneTransfer {
    /// Build the unsigned transaction. Output order is fixed:
    /// `[runestone, recipient_rune, maybe change_rune, maybe commission, maybe change_btc]`.
    pub fn build(self) -> Result<Transaction> {
        let rune_change = self.rune_change_script.is_some();

        let runestone = Runestone {
            edicts: vec![Edict::new(self.rune_id, self.amount, 1)],
            etching: None,
            mint: None,
            pointer: if rune_change { Some(2) } else { None },
        };

        let mut outputs = vec![
            super::runestone_output(&runestone)?,
            dust_output(self.recipient_script, self.dust_limit),
        ];
        if let Some(change_script) = self.rune_change_script {
            outputs.push(dust_output(change_script, self.dust_limit));
        }
        if let Some((script, sats)) = self.commission {
            outputs.push(TxOut {
                value: Amount::from_sat(sats),
                script_pubkey: script,
            });
        }
        if let Some((script, sats)) = self.sender_change_btc {
            outputs.push(TxOut {
                value: Amount::from_sat(sats),
                script_pubkey: script,
            });
        }

        let inputs = self
            .rune_inputs
            .iter()
            .chain(self.sat_inputs.iter())
            .map(unsigned_input)
            .collect();

        Ok(empty_transaction(inputs, outputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;
    use bitcoin::Txid;

    fn utxo(sats: u64) -> Utxo {
        Utxo {
            txid: Txid::from_byte_array([1u8; 32]),
            vout: 0,
            sats,
            script: ScriptBuf::new(),
            address: None,
            runes: Vec::new(),
        }
    }

    #[test]
    fn sets_pointer_only_when_rune_change_present() {
        let transfer = RuneTransfer {
            rune_inputs: vec![utxo(546)],
            sat_inputs: vec![utxo(10000)],
            rune_id: RuneId::new(1, 1),
            amount: 100,
            recipient_script: ScriptBuf::new(),
            rune_change_script: Some(ScriptBuf::new()),
            commission: None,
            sender_change_btc: None,
            dust_limit: 546,
        };
        let tx = transfer.build().unwrap();
        // runestone output, recipient, change rune: 3 outputs
        assert_eq!(tx.output.len(), 3);
        assert_eq!(tx.input.len(), 2);
    }

    #[test]
    fn no_pointer_without_rune_change() {
        let transfer = RuneTransfer {
            rune_inputs: vec![utxo(546)],
            sat_inputs: vec![],
            rune_id: RuneId::new(1, 1),
            amount: 100,
            recipient_script: ScriptBuf::new(),
            rune_change_script: None,
            commission: None,
            sender_change_btc: None,
            dust_limit: 546,
        };
        let tx = transfer.build().unwrap();
        assert_eq!(tx.output.len(), 2);
    }
}
