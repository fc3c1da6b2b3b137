// Error taxonomy for the Runestone and Inscription codecs.
//
// Parsing fails fast: the first violated rule is returned and no partial
// object is produced. `verify()` is a separate, later pass over an already
// parsed `Runestone` - see `runestone::fields::verify`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(&'static str),

    #[error("field already filled")]
    RepeatedField,

    #[error("sequence ended")]
    Truncated,

    #[error("cenotaph: {0}")]
    Cenotaph(Cenotaph),

    #[error("integer overflowed 128 bits")]
    Overflow,

    #[error("invalid rune name: {0}")]
    InvalidName(&'static str),

    #[error("insufficient {kind} balance: need {need}, have {have}")]
    InsufficientBalance {
        kind: BalanceKind,
        need: u128,
        have: u128,
    },

    #[error("invalid utxo selection: {0}")]
    InvalidUtxoSelection(&'static str),
}

/// Sub-kinds of a protocol-level cenotaph: which validation rule fired.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Cenotaph {
    #[error("pointer cenotaph")]
    Pointer,
    #[error("etching cenotaph")]
    Etching,
    #[error("mint cenotaph")]
    Mint,
    #[error("edicts cenotaph at index {0}")]
    Edicts(usize),
    #[error("cenotaph")]
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceKind {
    Native,
    Rune,
}

impl std::fmt::Display for BalanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceKind::Native => write!(f, "native"),
            BalanceKind::Rune => write!(f, "rune"),
        }
    }
}
