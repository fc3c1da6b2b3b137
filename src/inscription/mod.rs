// Ordinal Inscription envelope codec: `OP_FALSE OP_IF "ord" ... OP_ENDIF`
// detection, tag dispatch, body chunking, and witness-script emission.

pub mod envelope;
pub mod script;

use crate::id::InscriptionId;
use crate::rune_name::Rune;

pub const TAG_CONTENT_TYPE: u8 = 1;
pub const TAG_POINTER: u8 = 2;
pub const TAG_PARENT: u8 = 3;
pub const TAG_METADATA: u8 = 5;
pub const TAG_METAPROTOCOL: u8 = 7;
pub const TAG_CONTENT_ENCODING: u8 = 9;
pub const TAG_DELEGATE: u8 = 11;
pub const TAG_RUNE: u8 = 13;
pub const TAG_NOTE: u8 = 15;
pub const TAG_UNBOUND: u8 = 66;
pub const TAG_NOP: u8 = 255;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inscription {
    pub id: Option<InscriptionId>,
    pub body: Vec<u8>,
    pub content_type: Option<Vec<u8>>,
    pub content_encoding: Option<Vec<u8>>,
    pub metadata: Option<Vec<u8>>,
    pub metaprotocol: Option<Vec<u8>>,
    pub parents: Vec<InscriptionId>,
    pub pointer: Option<u64>,
    pub delegate: Option<InscriptionId>,
    pub rune: Option<Rune>,
}

impl Inscription {
    pub fn new() -> Self {
        Self::default()
    }
}
