// Envelope detection and field parsing, operating on script bytes through a
// small opcode-level state machine rather than a textual disassembly: a
// push is classified directly as a tag byte, a value blob, the `OP_0`
// body-section marker, or a body push.

use super::{
    Inscription, TAG_CONTENT_ENCODING, TAG_CONTENT_TYPE, TAG_DELEGATE, TAG_METADATA,
    TAG_METAPROTOCOL, TAG_NOP, TAG_NOTE, TAG_PARENT, TAG_POINTER, TAG_RUNE, TAG_UNBOUND,
};
use crate::error::{Error, Result};
use crate::id::InscriptionId;
use crate::num::bytes::le_untrim;
use crate::rune_name::Rune;

const OP_FALSE: u8 = 0x00;
const OP_IF: u8 = 0x63;
const OP_ENDIF: u8 = 0x68;
const ORD_MARKER: &[u8] = b"ord";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    PushBytes(Vec<u8>),
    Opcode(u8),
}

fn tokenize(script: &[u8]) -> Result<Vec<Op>> {
    let mut ops = Vec::new();
    let mut i = 0;
    while i < script.len() {
        let opcode = script[i];
        i += 1;
        let len = match opcode {
            0x01..=0x4b => opcode as usize,
            0x4c => {
                let n = *script
                    .get(i)
                    .ok_or(Error::MalformedEnvelope("truncated OP_PUSHDATA1 length"))?
                    as usize;
                i += 1;
                n
            }
            0x4d => {
                let bytes = script
                    .get(i..i + 2)
                    .ok_or(Error::MalformedEnvelope("truncated OP_PUSHDATA2 length"))?;
                i += 2;
                u16::from_le_bytes([bytes[0], bytes[1]]) as usize
            }
            0x4e => {
                let bytes = script
                    .get(i..i + 4)
                    .ok_or(Error::MalformedEnvelope("truncated OP_PUSHDATA4 length"))?;
                i += 4;
                u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize
            }
            _ => {
                ops.push(Op::Opcode(opcode));
                continue;
            }
        };
        let data = script
            .get(i..i + len)
            .ok_or(Error::MalformedEnvelope("truncated push"))?;
        ops.push(Op::PushBytes(data.to_vec()));
        i += len;
    }
    Ok(ops)
}

/// Locate and parse the inscription envelope inside a witness script.
/// `None` means there is no `OP_FALSE OP_IF "ord"` marker at all; `Some`
/// carries the parse result (malformed or a completed [`Inscription`]).
pub fn parse(script: &[u8]) -> Option<Result<Inscription>> {
    let tokens = match tokenize(script) {
        Ok(tokens) => tokens,
        Err(error) => return Some(Err(error)),
    };

    let start = tokens.windows(3).position(|window| {
        matches!(
            window,
            [Op::Opcode(OP_FALSE), Op::Opcode(OP_IF), Op::PushBytes(marker)]
                if marker == ORD_MARKER
        )
    })?;

    Some(parse_fields(&tokens[start + 3..]))
}

fn parse_fields(tokens: &[Op]) -> Result<Inscription> {
    let mut inscription = Inscription::new();
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            Op::Opcode(OP_ENDIF) => return Ok(inscription),
            Op::Opcode(OP_FALSE) => {
                i += 1;
                let mut body = Vec::new();
                loop {
                    match tokens.get(i) {
                        Some(Op::Opcode(OP_ENDIF)) => {
                            inscription.body = body;
                            return Ok(inscription);
                        }
                        Some(Op::PushBytes(bytes)) => {
                            body.extend_from_slice(bytes);
                            i += 1;
                        }
                        Some(Op::Opcode(_)) => {
                            return Err(Error::MalformedEnvelope("non-push token in body"));
                        }
                        None => {
                            return Err(Error::MalformedEnvelope("missing OP_ENDIF after body"));
                        }
                    }
                }
            }
            Op::PushBytes(tag_bytes) => {
                let tag = decode_tag(tag_bytes)?;
                let value = match tokens.get(i + 1) {
                    Some(Op::PushBytes(bytes)) => bytes.clone(),
                    _ => return Err(Error::MalformedEnvelope("missing field value")),
                };
                apply_tag(&mut inscription, tag, value)?;
                i += 2;
            }
            Op::Opcode(_) => {
                return Err(Error::MalformedEnvelope("unexpected opcode in field region"));
            }
        }
    }

    Err(Error::MalformedEnvelope("missing OP_ENDIF"))
}

fn decode_tag(bytes: &[u8]) -> Result<u8> {
    match bytes.len() {
        1 => Ok(bytes[0]),
        _ => Err(Error::MalformedEnvelope("tag must be a single byte")),
    }
}

fn apply_tag(inscription: &mut Inscription, tag: u8, value: Vec<u8>) -> Result<()> {
    match tag {
        TAG_CONTENT_TYPE => set_once(&mut inscription.content_type, value),
        TAG_POINTER => {
            let pointer = le_untrim(&value).ok_or(Error::Overflow)?;
            set_once_scalar(&mut inscription.pointer, u64::try_from(pointer).map_err(|_| Error::Overflow)?)
        }
        TAG_PARENT => {
            inscription.parents.push(InscriptionId::from_bytes(&value)?);
            Ok(())
        }
        TAG_METADATA => set_once(&mut inscription.metadata, value),
        TAG_METAPROTOCOL => set_once(&mut inscription.metaprotocol, value),
        TAG_CONTENT_ENCODING => set_once(&mut inscription.content_encoding, value),
        TAG_DELEGATE => {
            set_once_scalar(&mut inscription.delegate, InscriptionId::from_bytes(&value)?)
        }
        TAG_RUNE => {
            let number = le_untrim(&value).ok_or(Error::Overflow)?;
            set_once_scalar(&mut inscription.rune, Rune::new(number)?)
        }
        TAG_NOTE | TAG_NOP | TAG_UNBOUND => Ok(()),
        _ => Err(Error::MalformedEnvelope("unrecognized inscription tag")),
    }
}

fn set_once(slot: &mut Option<Vec<u8>>, value: Vec<u8>) -> Result<()> {
    if slot.is_some() {
        return Err(Error::RepeatedField);
    }
    *slot = Some(value);
    Ok(())
}

fn set_once_scalar<T>(slot: &mut Option<T>, value: T) -> Result<()> {
    if slot.is_some() {
        return Err(Error::RepeatedField);
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(out: &mut Vec<u8>, bytes: &[u8]) {
        out.push(bytes.len() as u8);
        out.extend_from_slice(bytes);
    }

    fn wrap_envelope(fields: &[u8]) -> Vec<u8> {
        let mut script = vec![OP_FALSE, OP_IF];
        push(&mut script, ORD_MARKER);
        script.extend_from_slice(fields);
        script.push(OP_ENDIF);
        script
    }

    #[test]
    fn returns_none_without_marker() {
        assert!(parse(&[0x51, 0x52]).is_none());
    }

    #[test]
    fn parses_content_type_and_body() {
        let mut fields = Vec::new();
        push(&mut fields, &[1]);
        push(&mut fields, b"text/plain");
        fields.push(OP_FALSE);
        push(&mut fields, b"hello");

        let script = wrap_envelope(&fields);
        let inscription = parse(&script).unwrap().unwrap();
        assert_eq!(inscription.content_type, Some(b"text/plain".to_vec()));
        assert_eq!(inscription.body, b"hello");
    }

    #[test]
    fn clean_termination_without_body_is_ok() {
        let mut fields = Vec::new();
        push(&mut fields, &[1]);
        push(&mut fields, b"text/plain");
        let script = wrap_envelope(&fields);
        let inscription = parse(&script).unwrap().unwrap();
        assert_eq!(inscription.content_type, Some(b"text/plain".to_vec()));
        assert!(inscription.body.is_empty());
    }

    #[test]
    fn repeated_single_valued_tag_is_rejected() {
        let mut fields = Vec::new();
        push(&mut fields, &[1]);
        push(&mut fields, b"text/plain");
        push(&mut fields, &[1]);
        push(&mut fields, b"text/html");
        let script = wrap_envelope(&fields);
        assert_eq!(parse(&script).unwrap().unwrap_err(), Error::RepeatedField);
    }

    #[test]
    fn multiple_parents_accumulate_in_order() {
        let first = InscriptionId::new([1; 32], 0);
        let second = InscriptionId::new([2; 32], 0);
        let mut fields = Vec::new();
        push(&mut fields, &[3]);
        push(&mut fields, &first.to_bytes());
        push(&mut fields, &[3]);
        push(&mut fields, &second.to_bytes());
        let script = wrap_envelope(&fields);
        let inscription = parse(&script).unwrap().unwrap();
        assert_eq!(inscription.parents, vec![first, second]);
    }

    #[test]
    fn unknown_tag_is_malformed() {
        let mut fields = Vec::new();
        push(&mut fields, &[200]);
        push(&mut fields, b"x");
        let script = wrap_envelope(&fields);
        assert!(matches!(
            parse(&script).unwrap(),
            Err(Error::MalformedEnvelope(_))
        ));
    }
}
