// Skeleton: plain BTC transfer, optionally with a separate fee payer.

use super::{empty_transaction, unsigned_input, Utxo};
use bitcoin::{Amount, ScriptBuf, Transaction, TxOut};

pub struct BtcTransfer {
    pub sender_inputs: Vec<Utxo>,
    pub fee_payer_inputs: Vec<Utxo>,
    pub recipient_script: ScriptBuf,
    pub amount: u64,
    pub commission: Option<(ScriptBuf, u64)>,
    pub sender_change: Option<(ScriptBuf, u64)>,
    pub fee_payer_change: Option<(ScriptBuf, u64)>,
}

impl BtcTransfer {
    /// Output order is fixed: `[recipient, maybe commission, maybe
    /// sender_change, maybe fee_payer_change]`. When `fee_payer_inputs` is
    /// non-empty, `sender_inputs` need only cover `amount`; the fee payer's
    /// inputs cover the fee separately.
    pub fn build(self) -> Transaction {
        let mut outputs = vec![TxOut {
            value: Amount::from_sat(self.amount),
            script_pubkey: self.recipient_script,
        }];
        if let Some((script, sats)) = self.commission {
            outputs.push(TxOut {
                value: Amount::from_sat(sats),
                script_pubkey: script,
            });
        }
        if let Some((script, sats)) = self.sender_change {
            outputs.push(TxOut {
                value: Amount::from_sat(sats),
                script_pubkey: script,
            });
        }
        if let Some((script, sats)) = self.fee_payer_change {
            outputs.push(TxOut {
                value: Amount::from_sat(sats),
                script_pubkey: script,
            });
        }

        let inputs = self
            .sender_inputs
            .iter()
            .chain(self.fee_payer_inputs.iter())
            .map(unsigned_input)
            .collect();

        empty_transaction(inputs, outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;
    use bitcoin::Txid;

    fn utxo(sats: u64) -> Utxo {
        Utxo {
            txid: Txid::from_byte_array([2u8; 32]),
            vout: 0,
            sats,
            script: ScriptBuf::new(),
            address: None,
            runes: Vec::new(),
        }
    }

    #[test]
    fn separate_fee_payer_adds_its_own_inputs_and_change() {
        let transfer = BtcTransfer {
            sender_inputs: vec![utxo(50000)],
            fee_payer_inputs: vec![utxo(5000)],
            recipient_script: ScriptBuf::new(),
            amount: 50000,
            commission: None,
            sender_change: None,
            fee_payer_change: Some((ScriptBuf::new(), 4000)),
        };
        let tx = transfer.build();
        assert_eq!(tx.input.len(), 2);
        assert_eq!(tx.output.len(), 2);
        assert_eq!(tx.output[1].value.to_sat(), 4000);
    }
}
