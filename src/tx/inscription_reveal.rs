// Skeleton: spend the commit output to reveal an inscription and, via the
// accompanying etching, mint its rune.

use super::{dust_output, empty_transaction, unsigned_input, Utxo};
use crate::error::Result;
use crate::runestone::Runestone;
use bitcoin::{Amount, ScriptBuf, Transaction, TxOut};

pub struct InscriptionReveal {
    pub commit_input: Utxo,
    pub additional_inputs: Vec<Utxo>,
    /// The etching-bearing runestone; `pointer` is overwritten to `1`.
    pub runestone: Runestone,
    pub recipient_script: ScriptBuf,
    pub sender_change_btc: Option<(ScriptBuf, u64)>,
    pub dust_limit: u64,
}

impl InscriptionReveal {
    /// Inputs: the commit UTXO, followed by any extra payment UTXOs needed
    /// when the commit amount falls short of the etch fee. Outputs:
    /// `[runestone, recipient_rune, maybe change_btc]`.
    pub fn build(mut self) -> Result<Transaction> {
        self.runestone.pointer = Some(1);

        let mut outputs = vec![
            super::runestone_output(&self.runestone)?,
            dust_output(self.recipient_script, self.dust_limit),
        ];
        if let Some((script, sats)) = self.sender_change_btc {
            outputs.push(TxOut {
                value: Amount::from_sat(sats),
                script_pubkey: script,
            });
        }

        let mut inputs = vec![unsigned_input(&self.commit_input)];
        inputs.extend(self.additional_inputs.iter().map(unsigned_input));

        Ok(empty_transaction(inputs, outputs))
    }
}
