// Integer-sequence <-> Message: field/edict split, multimap accumulation,
// and edict delta-folding.

use super::edict::Edict;
use super::tag;
use crate::error::{Cenotaph, Error, Result};
use crate::id::RuneId;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub fields: HashMap<u128, Vec<u128>>,
    pub edicts: Vec<Edict>,
}

impl Message {
    /// Consume `(tag, value)` pairs until either the integers run out or
    /// the `Body` tag is seen; a run that ends mid-pair (an unmatched
    /// trailing tag) is truncated. Once `Body` is seen, everything after it
    /// is the edict tail, required to be a multiple of 4 integers long.
    pub fn decode(integers: &[u128]) -> Result<Self> {
        let mut fields: HashMap<u128, Vec<u128>> = HashMap::new();
        let mut i = 0;

        while i < integers.len() {
            let tag = integers[i];

            if tag == tag::BODY {
                let tail = &integers[i + 1..];
                let edicts = decode_edicts(tail)?;
                return Ok(Message { fields, edicts });
            }

            let value = *integers.get(i + 1).ok_or(Error::Truncated)?;
            fields.entry(tag).or_default().push(value);
            i += 2;
        }

        Ok(Message {
            fields,
            edicts: Vec::new(),
        })
    }

    /// Emit the field region (caller supplies ascending-tag order) followed
    /// by `Body` and the delta-encoded, block/tx-sorted edict tail, when
    /// there are any edicts at all. A runestone with no edicts omits the
    /// `Body` tag entirely rather than writing a dangling terminator.
    pub fn encode(field_pairs: &[(u128, u128)], edicts: &[Edict]) -> Vec<u128> {
        let mut integers = Vec::with_capacity(field_pairs.len() * 2 + 1 + edicts.len() * 4);
        for &(tag, value) in field_pairs {
            integers.push(tag);
            integers.push(value);
        }
        if !edicts.is_empty() {
            integers.push(tag::BODY);
            integers.extend(encode_edicts(edicts));
        }
        integers
    }
}

fn decode_edicts(tail: &[u128]) -> Result<Vec<Edict>> {
    if tail.len() % 4 != 0 {
        return Err(Error::Cenotaph(Cenotaph::Plain));
    }

    let mut edicts = Vec::with_capacity(tail.len() / 4);
    let mut previous = RuneId::default();
    for group in tail.chunks_exact(4) {
        let rune_id = RuneId::next(previous, group[0], group[1])?;
        previous = rune_id;
        edicts.push(Edict {
            rune_id,
            amount: group[2],
            output: u32::try_from(group[3]).map_err(|_| Error::Overflow)?,
        });
    }
    Ok(edicts)
}

fn encode_edicts(edicts: &[Edict]) -> Vec<u128> {
    let mut sorted = edicts.to_vec();
    sorted.sort_by_key(|edict| (edict.rune_id.block, edict.rune_id.tx));

    let mut integers = Vec::with_capacity(sorted.len() * 4);
    let mut previous = RuneId::default();
    for edict in sorted {
        let (delta_block, field) = edict.rune_id.delta(previous);
        previous = edict.rune_id;
        integers.push(delta_block);
        integers.push(field);
        integers.push(edict.amount);
        integers.push(u128::from(edict.output));
    }
    integers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scenario_edict_only() {
        let integers = vec![0u128, 2585359, 84, 1879, 1];
        let message = Message::decode(&integers).unwrap();
        assert!(message.fields.is_empty());
        assert_eq!(message.edicts.len(), 1);
        assert_eq!(message.edicts[0].rune_id, RuneId::new(2585359, 84));
        assert_eq!(message.edicts[0].amount, 1879);
        assert_eq!(message.edicts[0].output, 1);
    }

    #[test]
    fn decodes_mint_only_with_no_body_tag() {
        // two (Mint, value) pairs and nothing else: no edicts, no Body
        let integers = vec![tag::MINT, 2585189, tag::MINT, 204];
        let message = Message::decode(&integers).unwrap();
        assert_eq!(message.fields.get(&tag::MINT).unwrap(), &vec![2585189, 204]);
        assert!(message.edicts.is_empty());
    }

    #[test]
    fn decodes_mint_and_pointer() {
        let integers = vec![tag::MINT, 2584240, tag::MINT, 130, tag::POINTER, 1];
        let message = Message::decode(&integers).unwrap();
        assert_eq!(message.fields.get(&tag::MINT).unwrap(), &vec![2584240, 130]);
        assert_eq!(message.fields.get(&tag::POINTER).unwrap(), &vec![1]);
    }

    #[test]
    fn rejects_edict_tail_not_multiple_of_four() {
        let integers = vec![0u128, 2585359, 84, 1879, 1, 21];
        assert_eq!(
            Message::decode(&integers).unwrap_err(),
            Error::Cenotaph(Cenotaph::Plain)
        );
    }

    #[test]
    fn rejects_truncated_field_region() {
        let integers = vec![2u128];
        assert_eq!(Message::decode(&integers).unwrap_err(), Error::Truncated);
    }

    #[test]
    fn encode_decode_round_trip_sorts_and_deltas() {
        let edicts = vec![
            Edict {
                rune_id: RuneId::new(2585359, 84),
                amount: 1879,
                output: 1,
            },
            Edict {
                rune_id: RuneId::new(100, 2),
                amount: 5,
                output: 0,
            },
        ];
        let integers = Message::encode(&[], &edicts);
        let message = Message::decode(&integers).unwrap();
        let mut expected = edicts.clone();
        expected.sort_by_key(|e| (e.rune_id.block, e.rune_id.tx));
        assert_eq!(message.edicts, expected);
    }
}
