// The Runes protocol codec: payload extraction from a script, the
// integer-sequence message format, flag/tag dispatch, and the structural
// validation that turns a protocol-violating-but-well-formed message into
// a cenotaph.

pub mod edict;
pub mod envelope;
pub mod fields;
pub mod flags;
pub mod message;
pub mod tag;

pub use edict::Edict;
pub use fields::{Etching, Terms};
pub use flags::Flags;
pub use message::Message;

use crate::error::{Cenotaph, Error, Result};
use crate::id::RuneId;
use crate::num::leb128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runestone {
    pub edicts: Vec<Edict>,
    pub etching: Option<Etching>,
    pub mint: Option<RuneId>,
    pub pointer: Option<u32>,
}

/// Either a well-formed runestone or a cenotaph: a runestone-shaped
/// `OP_RETURN` output that turns out to violate a protocol rule. Both are
/// "a runestone was present"; the distinction from "no runestone at all" is
/// made by [`Runestone::decipher`] returning `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Runestone(Runestone),
    Cenotaph(Cenotaph),
}

impl Runestone {
    /// Parse a single output script into a `Runestone`, failing fast on the
    /// first error encountered (envelope malformation, LEB128 overflow,
    /// message truncation, or any cenotaph-triggering field rule).
    pub fn parse(script: &[u8]) -> Option<Result<Self>> {
        let payload = match envelope::extract_payload(script)? {
            Ok(payload) => payload,
            Err(error) => return Some(Err(error)),
        };

        Some(Self::parse_payload(&payload))
    }

    fn parse_payload(payload: &[u8]) -> Result<Self> {
        let integers = leb128::decode_sequence(payload)?;
        let message = Message::decode(&integers)?;
        let dispatched = fields::dispatch(&message)?;

        log::trace!(
            "runestone fields dispatched: mint={:?} pointer={:?} etching_present={}",
            dispatched.mint,
            dispatched.pointer,
            dispatched.etching.is_some()
        );

        Ok(Runestone {
            edicts: message.edicts,
            etching: dispatched.etching,
            mint: dispatched.mint,
            pointer: dispatched.pointer,
        })
    }

    /// Structural validation against the number of outputs in the carrying
    /// transaction. A runestone that parses cleanly can still fail this
    /// check; callers that want the [`Artifact`] view should use
    /// [`Runestone::decipher`] instead.
    pub fn verify(&self, output_count: usize) -> Option<Cenotaph> {
        fields::verify(
            self.pointer,
            &self.etching,
            &self.mint,
            &self.edicts,
            output_count,
        )
    }

    /// Scan every output script of a transaction for a runestone, parse it,
    /// and fold structural validation in: `None` means no runestone-shaped
    /// output was found at all; `Some(Artifact::Cenotaph(..))` means one was
    /// found but is protocol-invalid (either at parse time or at `verify`).
    pub fn decipher<'a, I>(output_scripts: I) -> Option<Artifact>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let scripts: Vec<&[u8]> = output_scripts.into_iter().collect();
        let output_count = scripts.len();

        for script in &scripts {
            match Self::parse(script) {
                None => continue,
                Some(Ok(runestone)) => {
                    return Some(match runestone.verify(output_count) {
                        Some(cenotaph) => Artifact::Cenotaph(cenotaph),
                        None => Artifact::Runestone(runestone),
                    });
                }
                Some(Err(Error::Cenotaph(cenotaph))) => {
                    log::debug!("runestone parse produced a cenotaph: {cenotaph}");
                    return Some(Artifact::Cenotaph(cenotaph));
                }
                Some(Err(_)) => return Some(Artifact::Cenotaph(Cenotaph::Plain)),
            }
        }

        None
    }

    /// Serialize into the `OP_RETURN OP_13 <payload>` output script.
    pub fn encipher(&self) -> Result<Vec<u8>> {
        let mut field_pairs = Vec::new();

        let mut flags = Flags::default();
        if let Some(etching) = &self.etching {
            flags.set_etching();
            if etching.turbo {
                flags.set_turbo();
            }
            if etching.terms.is_some() {
                flags.set_terms();
            }
        }
        if flags.value() != 0 {
            field_pairs.push((tag::FLAGS, flags.value()));
        }

        if let Some(etching) = &self.etching {
            if let Some(rune) = etching.rune {
                field_pairs.push((tag::RUNE, rune.value()));
            }
            if let Some(divisibility) = etching.divisibility {
                field_pairs.push((tag::DIVISIBILITY, u128::from(divisibility)));
            }
            if let Some(spacers) = etching.spacers {
                field_pairs.push((tag::SPACERS, u128::from(spacers)));
            }
            if let Some(symbol) = etching.symbol {
                field_pairs.push((tag::SYMBOL, u128::from(symbol)));
            }
            if etching.premine != 0 {
                field_pairs.push((tag::PREMINE, etching.premine));
            }
            if let Some(terms) = &etching.terms {
                if let Some(amount) = terms.amount {
                    field_pairs.push((tag::AMOUNT, amount));
                }
                if let Some(cap) = terms.cap {
                    field_pairs.push((tag::CAP, cap));
                }
                if let Some(height_start) = terms.height_start {
                    field_pairs.push((tag::HEIGHT_START, u128::from(height_start)));
                }
                if let Some(height_end) = terms.height_end {
                    field_pairs.push((tag::HEIGHT_END, u128::from(height_end)));
                }
                if let Some(offset_start) = terms.offset_start {
                    field_pairs.push((tag::OFFSET_START, u128::from(offset_start)));
                }
                if let Some(offset_end) = terms.offset_end {
                    field_pairs.push((tag::OFFSET_END, u128::from(offset_end)));
                }
            }
        }

        if let Some(mint) = self.mint {
            field_pairs.push((tag::MINT, u128::from(mint.block)));
            field_pairs.push((tag::MINT, u128::from(mint.tx)));
        }
        if let Some(pointer) = self.pointer {
            field_pairs.push((tag::POINTER, u128::from(pointer)));
        }

        field_pairs.sort_by_key(|&(tag, _)| tag);

        let integers = Message::encode(&field_pairs, &self.edicts);
        let payload = leb128::encode_sequence(&integers);
        envelope::emit_payload(&payload)
    }

    /// Fill in a reserved name for an etching that omitted an explicit one.
    pub fn fill_default_etching(&mut self, rune_id: RuneId) {
        if let Some(etching) = &mut self.etching {
            if etching.rune.is_none() {
                etching.rune = Some(crate::rune_name::Rune::reserve(rune_id.block, rune_id.tx));
            }
        }
    }
}
