// Little-endian byte helpers used by the Inscription and id codecs.

/// Reverse a byte buffer in place (used to flip between little- and
/// big-endian representations of the same value).
pub fn reverse_bytes(bytes: &mut [u8]) {
    bytes.reverse();
}

/// Serialize `value` as little-endian bytes with trailing zero bytes
/// stripped. `0` encodes as the empty byte string.
pub fn le_trim(value: u128) -> Vec<u8> {
    let full = value.to_le_bytes();
    let mut end = full.len();
    while end > 0 && full[end - 1] == 0 {
        end -= 1;
    }
    full[..end].to_vec()
}

/// Inverse of [`le_trim`]: zero-pad a trailing-zero-trimmed little-endian
/// byte string back out to a u128.
pub fn le_untrim(bytes: &[u8]) -> Option<u128> {
    if bytes.len() > 16 {
        return None;
    }
    let mut full = [0u8; 16];
    full[..bytes.len()].copy_from_slice(bytes);
    Some(u128::from_le_bytes(full))
}
