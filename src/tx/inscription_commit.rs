// Skeleton: fund the taproot address that commits to an inscription's
// witness script (the key-path `OP_CHECKSIG` prefix plus the envelope),
// ahead of the reveal transaction.

use super::{empty_transaction, unsigned_input, Utxo};
use crate::boundary;
use crate::error::Result;
use crate::inscription::{script, Inscription};
use bitcoin::secp256k1::Verification;
use bitcoin::secp256k1::Secp256k1;
use bitcoin::{Amount, Network, ScriptBuf, Transaction, TxOut, XOnlyPublicKey};

pub struct InscriptionCommit {
    pub funding_inputs: Vec<Utxo>,
    pub internal_key: XOnlyPublicKey,
    pub inscription: Inscription,
    pub network: Network,
    pub etch_fee: u64,
    pub commission: Option<(ScriptBuf, u64)>,
    pub sender_change: Option<(ScriptBuf, u64)>,
    pub dust_limit: u64,
}

impl InscriptionCommit {
    /// Output 0 funds the taproot commit address with `etch_fee +
    /// commission + dust`; commission and sender-change outputs, if given,
    /// follow it. The committed taproot leaf is
    /// `into_script_for_witness(inscription, internal_key)`, not the bare
    /// envelope, so the reveal's control block validates against it.
    pub fn build<C: Verification>(self, secp: &Secp256k1<C>) -> Result<Transaction> {
        let commission_sats = self.commission.as_ref().map(|(_, sats)| *sats).unwrap_or(0);
        let commit_amount = self.etch_fee + commission_sats + self.dust_limit;

        let witness_script =
            ScriptBuf::from_bytes(script::into_script_for_witness(&self.inscription, self.internal_key));

        let address = boundary::commit_address(
            secp,
            self.internal_key,
            witness_script,
            self.network,
        )?;

        let mut outputs = vec![TxOut {
            value: Amount::from_sat(commit_amount),
            script_pubkey: address.script_pubkey(),
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

        let inputs = self.funding_inputs.iter().map(unsigned_input).collect();
        Ok(empty_transaction(inputs, outputs))
    }
}
