// Shared UTXO type and transaction-skeleton helpers. Each skeleton builder
// in this module family returns a `bitcoin::Transaction` with inputs wired
// to the chosen UTXOs and outputs in the order the protocol requires;
// witnesses are left empty for a downstream signer to fill, per the PSBT
// hints left in `boundary`.

pub mod btc_transfer;
pub mod inscription_commit;
pub mod inscription_reveal;
pub mod rune_transfer;

use crate::id::RuneId;
use crate::runestone::Runestone;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneBalance {
    pub rune_id: RuneId,
    pub amount: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub txid: Txid,
    pub vout: u32,
    pub sats: u64,
    pub script: ScriptBuf,
    pub address: Option<String>,
    pub runes: Vec<RuneBalance>,
}

impl Utxo {
    pub fn outpoint(&self) -> OutPoint {
        OutPoint::new(self.txid, self.vout)
    }
}

/// A bare, unsigned `TxIn` spending `utxo` with an empty scriptSig/witness.
pub fn unsigned_input(utxo: &Utxo) -> TxIn {
    TxIn {
        previous_output: utxo.outpoint(),
        script_sig: ScriptBuf::new(),
        sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
        witness: Witness::new(),
    }
}

/// The `OP_RETURN OP_13 <payload>` output carrying a runestone, as output 0.
pub fn runestone_output(runestone: &Runestone) -> crate::error::Result<TxOut> {
    let script = runestone.encipher()?;
    Ok(TxOut {
        value: Amount::from_sat(0),
        script_pubkey: ScriptBuf::from_bytes(script),
    })
}

pub fn dust_output(script_pubkey: ScriptBuf, dust_limit: u64) -> TxOut {
    TxOut {
        value: Amount::from_sat(dust_limit),
        script_pubkey,
    }
}

/// Build the un-fee-adjusted transaction shell; callers fill in the exact
/// output set per skeleton.
pub fn empty_transaction(inputs: Vec<TxIn>, outputs: Vec<TxOut>) -> Transaction {
    Transaction {
        version: bitcoin::transaction::Version::TWO,
        lock_time: bitcoin::absolute::LockTime::ZERO,
        input: inputs,
        output: outputs,
    }
}
