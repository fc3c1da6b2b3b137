// Narrow adapters to the parts of Bitcoin that are standard infrastructure
// rather than protocol-specific: Taproot leaf/key tweaking, bech32m address
// encoding, and PSBT "unknown" map hints for a downstream signer. Everything
// else in this crate hand-rolls its own byte-level codec; only this module
// reaches into the `bitcoin` crate for elliptic-curve and address work.

use bitcoin::psbt::raw::Key as PsbtKey;
use bitcoin::psbt::Input as PsbtInput;
use bitcoin::secp256k1::{Secp256k1, Verification};
use bitcoin::taproot::{LeafVersion, TaprootBuilder, TaprootSpendInfo};
use bitcoin::{Address, Network, ScriptBuf, XOnlyPublicKey};

use crate::error::{Error, Result};

/// PSBT "unknown" map key prefixes the core uses to tell a downstream
/// signer which input indices need which signing path.
pub const PSBT_HINT_TAPROOT_INPUTS: u8 = 0x10;
pub const PSBT_HINT_PAYMENT_INPUTS: u8 = 0x20;
pub const PSBT_HINT_FEE_PAYER_TAPROOT_INPUTS: u8 = 0x11;
pub const PSBT_HINT_FEE_PAYER_PAYMENT_INPUTS: u8 = 0x21;

/// Build a single-leaf Taproot spend-info for `script` tweaked by
/// `internal_key`, matching BIP-341.
pub fn taproot_spend_info<C: Verification>(
    secp: &Secp256k1<C>,
    internal_key: XOnlyPublicKey,
    script: ScriptBuf,
) -> Result<TaprootSpendInfo> {
    TaprootBuilder::new()
        .add_leaf(0, script)
        .map_err(|_| Error::MalformedEnvelope("invalid taproot leaf depth"))?
        .finalize(secp, internal_key)
        .map_err(|_| Error::MalformedEnvelope("taproot tree finalization failed"))
}

/// The commit address for an inscription reveal: a Taproot output holding
/// the envelope script as its sole leaf, encoded as a bech32m address.
pub fn commit_address<C: Verification>(
    secp: &Secp256k1<C>,
    internal_key: XOnlyPublicKey,
    script: ScriptBuf,
    network: Network,
) -> Result<Address> {
    let spend_info = taproot_spend_info(secp, internal_key, script)?;
    Ok(Address::p2tr_tweaked(spend_info.output_key(), network))
}

/// The control block needed to spend the single taproot leaf, handed to the
/// downstream signer alongside the witness script.
pub fn control_block(
    spend_info: &TaprootSpendInfo,
    script: &ScriptBuf,
) -> Result<bitcoin::taproot::ControlBlock> {
    spend_info
        .control_block(&(script.clone(), LeafVersion::TapScript))
        .ok_or(Error::MalformedEnvelope(
            "script is not a leaf of this taproot tree",
        ))
}

/// Type-value used for every PSBT hint key; only the key bytes (the hint
/// marker) vary.
const PSBT_HINT_KEY_TYPE: u8 = 0xfc;

/// Stash an ordered list of input indices into a PSBT input's "unknown" map
/// under one of the `PSBT_HINT_*` keys, for the downstream signer to pick up.
pub fn set_psbt_hint(input: &mut PsbtInput, hint: u8, input_indices: &[u32]) {
    let key = PsbtKey {
        type_value: PSBT_HINT_KEY_TYPE,
        key: vec![hint],
    };
    let mut value = Vec::with_capacity(input_indices.len() * 4);
    for index in input_indices {
        value.extend_from_slice(&index.to_le_bytes());
    }
    input.unknown.insert(key, value);
}
