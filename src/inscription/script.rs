// Body chunking, witness-script emission, and virtual-byte estimation for
// an `Inscription`.

use super::{
    Inscription, TAG_CONTENT_ENCODING, TAG_CONTENT_TYPE, TAG_DELEGATE, TAG_METADATA,
    TAG_METAPROTOCOL, TAG_PARENT, TAG_POINTER, TAG_RUNE,
};
use crate::num::bytes::le_trim;
use bitcoin::XOnlyPublicKey;

const OP_FALSE: u8 = 0x00;
const OP_IF: u8 = 0x63;
const OP_ENDIF: u8 = 0x68;
const OP_CHECKSIG: u8 = 0xac;
const ORD_MARKER: &[u8] = b"ord";

/// Hard protocol constant: the maximum size of a single script data push.
pub const BODY_CHUNK_SIZE: usize = 520;
/// Batching boundary observed in the reference script builder; emitted
/// bytes are unaffected, this only bounds how chunks are grouped while
/// building the script incrementally.
pub const CHUNKS_PER_RUN: usize = 19;

/// Split a body into pushes of at most [`BODY_CHUNK_SIZE`] bytes each.
pub fn chunk_body(body: &[u8]) -> Vec<&[u8]> {
    if body.is_empty() {
        return Vec::new();
    }
    body.chunks(BODY_CHUNK_SIZE).collect()
}

/// Group chunks into runs of at most [`CHUNKS_PER_RUN`] pushes.
pub fn group_into_runs<'a>(chunks: &[&'a [u8]]) -> Vec<&[&'a [u8]]> {
    chunks.chunks(CHUNKS_PER_RUN).collect()
}

fn push_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    match bytes.len() {
        0..=0x4b => {
            out.push(bytes.len() as u8);
        }
        0x4c..=0xff => {
            out.push(0x4c);
            out.push(bytes.len() as u8);
        }
        0x100..=0xffff => {
            out.push(0x4d);
            out.extend_from_slice(&(bytes.len() as u16).to_le_bytes());
        }
        _ => {
            out.push(0x4e);
            out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        }
    }
    out.extend_from_slice(bytes);
}

fn push_tag(out: &mut Vec<u8>, tag: u8) {
    push_bytes(out, &[tag]);
}

/// Push a little-endian-trimmed scalar (`Pointer`/`Rune` field values).
/// `le_trim(0)` is the empty byte string, which on the wire is
/// indistinguishable from `OP_0`/`OP_FALSE` (the body-section marker) once
/// re-tokenized; push an explicit single zero byte instead so parsing
/// cannot mistake a zero-valued field for the start of the body.
fn push_scalar(out: &mut Vec<u8>, value: u128) {
    let trimmed = le_trim(value);
    if trimmed.is_empty() {
        push_bytes(out, &[0]);
    } else {
        push_bytes(out, &trimmed);
    }
}

/// Serialize the envelope: `OP_FALSE OP_IF "ord"`, every set non-body
/// field (tag push, then value push), the body (if any) behind an `OP_0`
/// marker, then `OP_ENDIF`.
pub fn emit(inscription: &Inscription) -> Vec<u8> {
    let mut out = vec![OP_FALSE, OP_IF];
    push_bytes(&mut out, ORD_MARKER);

    if let Some(content_type) = &inscription.content_type {
        push_tag(&mut out, TAG_CONTENT_TYPE);
        push_bytes(&mut out, content_type);
    }
    if let Some(pointer) = inscription.pointer {
        push_tag(&mut out, TAG_POINTER);
        push_scalar(&mut out, u128::from(pointer));
    }
    for parent in &inscription.parents {
        push_tag(&mut out, TAG_PARENT);
        push_bytes(&mut out, &parent.to_bytes());
    }
    if let Some(metadata) = &inscription.metadata {
        push_tag(&mut out, TAG_METADATA);
        push_bytes(&mut out, metadata);
    }
    if let Some(metaprotocol) = &inscription.metaprotocol {
        push_tag(&mut out, TAG_METAPROTOCOL);
        push_bytes(&mut out, metaprotocol);
    }
    if let Some(content_encoding) = &inscription.content_encoding {
        push_tag(&mut out, TAG_CONTENT_ENCODING);
        push_bytes(&mut out, content_encoding);
    }
    if let Some(delegate) = &inscription.delegate {
        push_tag(&mut out, TAG_DELEGATE);
        push_bytes(&mut out, &delegate.to_bytes());
    }
    if let Some(rune) = inscription.rune {
        push_tag(&mut out, TAG_RUNE);
        push_scalar(&mut out, rune.value());
    }

    if !inscription.body.is_empty() {
        out.push(OP_FALSE);
        for chunk in chunk_body(&inscription.body) {
            push_bytes(&mut out, chunk);
        }
    }

    out.push(OP_ENDIF);
    out
}

/// `into_script_for_witness(xonly) = <push xonly> OP_CHECKSIG || <envelope>`:
/// the actual taproot leaf script committed by the commit transaction and
/// spent by the reveal. The bare envelope from [`emit`] is never a script
/// in its own right; it is always prefixed by the key-path spend condition.
pub fn into_script_for_witness(inscription: &Inscription, xonly: XOnlyPublicKey) -> Vec<u8> {
    let mut out = Vec::new();
    push_bytes(&mut out, &xonly.serialize());
    out.push(OP_CHECKSIG);
    out.extend(emit(inscription));
    out
}

/// `vbytes(inscription) = ceil((|script| + 34) / 4)`, where 34 accounts for
/// the taproot leaf's key push, x-only key, and `OP_CHECKSIG`.
pub fn vbytes_estimate(script_len: usize) -> usize {
    (script_len + 34 + 3) / 4
}
