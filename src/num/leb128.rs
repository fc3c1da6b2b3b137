// LEB128 unsigned varint codec, bounded to u128.
//
// Encodes an integer as a base-128 little-endian byte sequence with the
// high bit set on every byte but the last. Decoding stops as soon as a byte
// with the high bit clear is seen; accumulating past 128 bits is an
// overflow, not a truncation, since the byte stream itself is well-formed.

use crate::error::{Error, Result};

/// Encode a single integer as LEB128 bytes.
pub fn encode(mut value: u128) -> Vec<u8> {
    let mut bytes = Vec::new();
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
        if value == 0 {
            break;
        }
    }
    bytes
}

/// Encode a whole sequence of integers, concatenating their LEB128 forms.
pub fn encode_sequence(values: &[u128]) -> Vec<u8> {
    let mut out = Vec::new();
    for &value in values {
        out.extend(encode(value));
    }
    out
}

/// Decode one LEB128 integer from the front of `bytes`.
/// Returns the value and the number of bytes consumed.
pub fn decode_one(bytes: &[u8]) -> Result<(u128, usize)> {
    let mut result: u128 = 0;
    let mut shift: u32 = 0;
    let mut consumed = 0;

    loop {
        let byte = *bytes.get(consumed).ok_or(Error::Truncated)?;
        consumed += 1;

        let payload = (byte & 0x7f) as u128;
        if shift >= 128 || (shift == 126 && payload > 0b11) {
            // The 19th byte (shift 126) only has 2 bits of budget left
            // before the accumulated value would exceed 128 bits; any
            // higher payload bit there is an overflow rather than a
            // truncation.
            return Err(Error::Overflow);
        }
        result |= payload.checked_shl(shift).ok_or(Error::Overflow)?;

        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }

    Ok((result, consumed))
}

/// Decode a full byte payload into a sequence of u128 integers.
pub fn decode_sequence(payload: &[u8]) -> Result<Vec<u128>> {
    let mut integers = Vec::new();
    let mut i = 0;
    while i < payload.len() {
        let (value, consumed) = decode_one(&payload[i..])?;
        integers.push(value);
        i += consumed;
    }
    Ok(integers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_small_values() {
        for value in [0u128, 1, 127, 128, 300, u64::MAX as u128] {
            let encoded = encode(value);
            let (decoded, consumed) = decode_one(&encoded).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, encoded.len());
        }
    }

    #[test]
    fn round_trips_max_u128() {
        let value = u128::MAX;
        let encoded = encode(value);
        let (decoded, consumed) = decode_one(&encoded).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn sequence_round_trip() {
        let values = vec![0u128, 1879, 2585359, 84, u128::MAX];
        let encoded = encode_sequence(&values);
        let decoded = decode_sequence(&encoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn truncated_stream_errors() {
        let bytes = [0x80, 0x80];
        assert_eq!(decode_one(&bytes).unwrap_err(), Error::Truncated);
    }

    #[test]
    fn overflowing_stream_errors() {
        // 19 continuation bytes then a terminator: far beyond 128 bits.
        let mut bytes = vec![0xff; 19];
        bytes.push(0x7f);
        assert_eq!(decode_sequence(&bytes).unwrap_err(), Error::Overflow);
    }

    #[test]
    fn nineteenth_byte_has_only_two_bits_of_budget() {
        // 18 zero-payload continuation bytes put the 19th byte at shift
        // 126, with only bits 126/127 left to fill.
        let mut bytes = vec![0x80; 18];
        bytes.push(0b0000_0011); // fits exactly
        let (value, consumed) = decode_one(&bytes).unwrap();
        assert_eq!(value, 0b11 << 126);
        assert_eq!(consumed, 19);

        let mut bytes = vec![0x80; 18];
        bytes.push(0b0000_0100); // one bit too many
        assert_eq!(decode_one(&bytes).unwrap_err(), Error::Overflow);
    }

    #[test]
    fn scenario_edict_only_payload() {
        // payload from the edict-only end-to-end scenario
        let payload = hex::decode("008fe69d0154d70e01").unwrap();
        let integers = decode_sequence(&payload).unwrap();
        assert_eq!(integers, vec![0, 2585359, 84, 1879, 1]);
        assert_eq!(encode_sequence(&integers), payload);
    }

    #[test]
    fn scenario_truncated_edict_tail() {
        let payload = hex::decode("008fe69d0154d70e0115").unwrap();
        let integers = decode_sequence(&payload).unwrap();
        // decodes fine as raw integers; message-level truncation is
        // detected downstream when the edict tail isn't a multiple of 4
        assert_eq!(integers, vec![0, 2585359, 84, 1879, 1, 21]);
    }
}
