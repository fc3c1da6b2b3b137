// Runestone payload extraction/emission: OP_RETURN OP_13 <pushes...>
//
// Script bytes are walked directly rather than through a general-purpose
// script disassembler, since the wire format only ever uses direct-length
// data pushes (OP_DATA_1..OP_DATA_75).

use crate::error::{Error, Result};

pub const OP_RETURN: u8 = 0x6a;
pub const OP_PUSHNUM_13: u8 = 0x5d;
const OP_DATA_MIN: u8 = 0x01;
const OP_DATA_MAX: u8 = 0x4b; // 75

/// Extract and concatenate the pushed payload bytes from a Runestone
/// output script. `None` means the script does not even begin with the
/// `OP_RETURN OP_13` marker (not a runestone candidate at all). `Some(Err)`
/// means the marker is present but the pushes that follow are ill-formed.
pub fn extract_payload(script: &[u8]) -> Option<Result<Vec<u8>>> {
    if script.len() < 4 {
        return None;
    }
    if script[0] != OP_RETURN || script[1] != OP_PUSHNUM_13 {
        return None;
    }

    Some(read_pushes(&script[2..]))
}

fn read_pushes(mut rest: &[u8]) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    while !rest.is_empty() {
        let opcode = rest[0];
        if !(OP_DATA_MIN..=OP_DATA_MAX).contains(&opcode) {
            log::trace!("runestone envelope rejected: opcode {opcode:#x} is not a direct-length push");
            return Err(Error::MalformedEnvelope("non-push opcode in runestone payload"));
        }
        let len = opcode as usize;
        let body = rest
            .get(1..1 + len)
            .ok_or(Error::MalformedEnvelope("truncated push in runestone payload"))?;
        payload.extend_from_slice(body);
        rest = &rest[1 + len..];
    }
    Ok(payload)
}

/// Emit the `OP_RETURN OP_13 <pushdata>` output script for `payload`.
/// The payload must fit in a single direct-length push (<=75 bytes).
pub fn emit_payload(payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > OP_DATA_MAX as usize {
        return Err(Error::MalformedEnvelope(
            "runestone payload does not fit in a single push",
        ));
    }
    let mut script = Vec::with_capacity(payload.len() + 3);
    script.push(OP_RETURN);
    script.push(OP_PUSHNUM_13);
    script.push(payload.len() as u8);
    script.extend_from_slice(payload);
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_scripts() {
        assert!(extract_payload(&[OP_RETURN, OP_PUSHNUM_13, 0x00]).is_none());
    }

    #[test]
    fn rejects_non_runestone_scripts() {
        assert!(extract_payload(&[0x51, OP_PUSHNUM_13, 0x01, 0x00]).is_none());
    }

    #[test]
    fn extracts_and_reemits_single_push() {
        let payload = vec![0xde, 0xad, 0xbe, 0xef];
        let script = emit_payload(&payload).unwrap();
        assert_eq!(extract_payload(&script).unwrap().unwrap(), payload);
    }

    #[test]
    fn concatenates_multiple_pushes() {
        let mut script = vec![OP_RETURN, OP_PUSHNUM_13];
        script.push(2);
        script.extend([1, 2]);
        script.push(3);
        script.extend([3, 4, 5]);
        assert_eq!(
            extract_payload(&script).unwrap().unwrap(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn non_push_opcode_is_malformed() {
        let script = vec![OP_RETURN, OP_PUSHNUM_13, 0x4c, 0x00];
        assert!(matches!(
            extract_payload(&script).unwrap(),
            Err(Error::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn rejects_oversized_payload_on_emit() {
        let payload = vec![0u8; 76];
        assert!(emit_payload(&payload).is_err());
    }
}
