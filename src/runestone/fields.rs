// Flag-gated field dispatch (message -> typed fields) and the separate
// structural verification pass over an already-parsed runestone.

use super::edict::Edict;
use super::flags::Flags;
use super::message::Message;
use super::tag;
use crate::error::{Cenotaph, Error, Result};
use crate::id::RuneId;
use crate::rune_name::spaced::MAX_SPACERS;
use crate::rune_name::Rune;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terms {
    pub amount: Option<u128>,
    pub cap: Option<u128>,
    pub height_start: Option<u64>,
    pub height_end: Option<u64>,
    pub offset_start: Option<u64>,
    pub offset_end: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Etching {
    pub divisibility: Option<u8>,
    pub premine: u128,
    pub rune: Option<Rune>,
    pub spacers: Option<u32>,
    pub symbol: Option<u32>,
    pub turbo: bool,
    pub terms: Option<Terms>,
}

/// Result of dispatching a decoded [`Message`] against the flag/tag table.
pub struct Dispatched {
    pub flags: Flags,
    pub mint: Option<RuneId>,
    pub pointer: Option<u32>,
    pub etching: Option<Etching>,
}

const ETCHING_GATED_TAGS: &[u128] = &[
    tag::DIVISIBILITY,
    tag::PREMINE,
    tag::RUNE,
    tag::SPACERS,
    tag::SYMBOL,
];

const TERMS_GATED_TAGS: &[u128] = &[
    tag::AMOUNT,
    tag::CAP,
    tag::HEIGHT_START,
    tag::HEIGHT_END,
    tag::OFFSET_START,
    tag::OFFSET_END,
];

pub fn dispatch(message: &Message) -> Result<Dispatched> {
    for key in message.fields.keys() {
        if !tag::is_known(*key) && tag::is_even(*key) {
            return Err(Error::Cenotaph(Cenotaph::Plain));
        }
    }

    let flags = Flags::from_value(take_one(message, tag::FLAGS)?.unwrap_or(0));
    if flags.has_unrecognized_bits() {
        return Err(Error::Cenotaph(Cenotaph::Plain));
    }

    if !flags.etching() && ETCHING_GATED_TAGS.iter().any(|t| message.fields.contains_key(t)) {
        return Err(Error::Cenotaph(Cenotaph::Plain));
    }
    if !flags.terms() && TERMS_GATED_TAGS.iter().any(|t| message.fields.contains_key(t)) {
        return Err(Error::Cenotaph(Cenotaph::Plain));
    }

    let etching = if flags.etching() {
        Some(build_etching(message, &flags)?)
    } else {
        None
    };

    let mint = match message.fields.get(&tag::MINT) {
        None => None,
        Some(values) if values.len() == 2 => Some(RuneId {
            block: u64::try_from(values[0]).map_err(|_| Error::Overflow)?,
            tx: u32::try_from(values[1]).map_err(|_| Error::Overflow)?,
        }),
        Some(_) => return Err(Error::Cenotaph(Cenotaph::Plain)),
    };

    let pointer = take_one(message, tag::POINTER)?
        .map(|v| u32::try_from(v).map_err(|_| Error::Overflow))
        .transpose()?;

    Ok(Dispatched {
        flags,
        mint,
        pointer,
        etching,
    })
}

fn build_etching(message: &Message, flags: &Flags) -> Result<Etching> {
    let divisibility = take_one(message, tag::DIVISIBILITY)?
        .map(|v| u8::try_from(v).map_err(|_| Error::Overflow))
        .transpose()?;
    if let Some(divisibility) = divisibility {
        if divisibility > 38 {
            return Err(Error::Cenotaph(Cenotaph::Plain));
        }
    }

    let premine = take_one(message, tag::PREMINE)?.unwrap_or(0);

    let rune = take_one(message, tag::RUNE)?
        .map(Rune::new)
        .transpose()
        .map_err(|_| Error::Cenotaph(Cenotaph::Plain))?;

    let spacers = take_one(message, tag::SPACERS)?
        .map(|v| u32::try_from(v).map_err(|_| Error::Overflow))
        .transpose()?;
    if let Some(spacers) = spacers {
        if spacers > MAX_SPACERS {
            return Err(Error::Cenotaph(Cenotaph::Plain));
        }
    }

    let symbol = take_one(message, tag::SYMBOL)?
        .map(|v| u32::try_from(v).map_err(|_| Error::Overflow))
        .transpose()?;

    let terms = if flags.terms() {
        Some(build_terms(message)?)
    } else {
        None
    };

    Ok(Etching {
        divisibility,
        premine,
        rune,
        spacers,
        symbol,
        turbo: flags.turbo(),
        terms,
    })
}

fn build_terms(message: &Message) -> Result<Terms> {
    Ok(Terms {
        amount: take_one(message, tag::AMOUNT)?,
        cap: take_one(message, tag::CAP)?,
        height_start: take_u64(message, tag::HEIGHT_START)?,
        height_end: take_u64(message, tag::HEIGHT_END)?,
        offset_start: take_u64(message, tag::OFFSET_START)?,
        offset_end: take_u64(message, tag::OFFSET_END)?,
    })
}

fn take_one(message: &Message, key: u128) -> Result<Option<u128>> {
    match message.fields.get(&key) {
        None => Ok(None),
        Some(values) if values.len() == 1 => Ok(Some(values[0])),
        Some(_) => Err(Error::Cenotaph(Cenotaph::Plain)),
    }
}

fn take_u64(message: &Message, key: u128) -> Result<Option<u64>> {
    take_one(message, key)?
        .map(|v| u64::try_from(v).map_err(|_| Error::Overflow))
        .transpose()
}

/// Structural validation over an already-dispatched runestone: protocol
/// violations that still parse cleanly but make the runestone a cenotaph.
pub fn verify(
    pointer: Option<u32>,
    etching: &Option<Etching>,
    mint: &Option<RuneId>,
    edicts: &[Edict],
    output_count: usize,
) -> Option<Cenotaph> {
    if let Some(pointer) = pointer {
        if pointer as usize >= output_count {
            return Some(Cenotaph::Pointer);
        }
    }

    if !is_valid_etching(etching) {
        return Some(Cenotaph::Etching);
    }

    if !is_valid_mint(mint) {
        return Some(Cenotaph::Mint);
    }

    for (index, edict) in edicts.iter().enumerate() {
        if edict.rune_id.block == 0 && edict.rune_id.tx != 0 {
            return Some(Cenotaph::Edicts(index));
        }
        if edict.output as usize > output_count {
            return Some(Cenotaph::Edicts(index));
        }
    }

    None
}

pub fn is_valid_mint(mint: &Option<RuneId>) -> bool {
    match mint {
        None => true,
        Some(id) => !(id.block == 0 && id.tx != 0),
    }
}

pub fn is_valid_etching(etching: &Option<Etching>) -> bool {
    match etching {
        None => true,
        Some(e) => e.rune.is_some() && e.symbol.is_some() && e.divisibility.is_some() && e.spacers.is_some(),
    }
}

pub fn is_valid_edicts(edicts: &[Edict], output_count: usize) -> bool {
    edicts.iter().all(|e| {
        !(e.rune_id.block == 0 && e.rune_id.tx != 0) && e.output as usize <= output_count
    })
}
