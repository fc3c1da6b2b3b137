//! Codec and transaction-skeleton assembler for the Runes and Ordinal
//! Inscriptions Bitcoin meta-protocols.
//!
//! The crate is organized leaves-first: [`num`] and [`rune_name`] are pure
//! numeric algebra with no protocol awareness; [`id`] builds on them for the
//! two identifier types; [`runestone`] and [`inscription`] are the two
//! protocol codecs; [`selection`] and [`tx`] assemble transaction skeletons
//! on top; [`boundary`] is the only module that reaches into the `bitcoin`
//! crate for elliptic-curve and address work.

pub mod boundary;
pub mod error;
pub mod id;
pub mod inscription;
pub mod num;
pub mod rune_name;
pub mod runestone;
pub mod selection;
pub mod tx;

pub use error::{BalanceKind, Cenotaph, Error, Result};
pub use id::{InscriptionId, RuneId};
pub use inscription::Inscription;
pub use rune_name::{Rune, SpacedRune};
pub use runestone::{Artifact, Edict, Etching, Message, Runestone, Terms};
