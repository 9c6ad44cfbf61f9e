use miette::Diagnostic;
use thiserror::Error;

use crate::{SymbolTableKind, TextField, parsers::errors::DecodingError};

pub type Result<T, E = ChainError> = std::result::Result<T, E>;

// NOTE: Every variant here is local to a single combination or analyte, and none of them should ever abort a whole batch
#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
pub enum ChainError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Decoding {
        #[from]
        error: DecodingError,
    },

    #[diagnostic(help(
        "only combinations with the same number of chain positions can be compared or merged"
    ))]
    #[error("expected a combination of {expected} chains, but found one with {found}")]
    CardinalityMismatch { expected: usize, found: usize },

    #[diagnostic(help("double-check the chain, or add a new entry to the chain symbol database"))]
    #[error("no {table} hydroxylation symbol has been defined for {count} hydroxyl group(s)")]
    HydroxylationLookup { table: SymbolTableKind, count: u32 },

    #[diagnostic(help(
        "labels can't contain ']' and oxidation states can't contain '(', '_', or '/', so rename the chain"
    ))]
    #[error("the {field} {text:?} contains the reserved character {character:?}")]
    ReservedCharacter {
        field: TextField,
        text: String,
        character: char,
    },
}

impl ChainError {
    pub(crate) const fn hydroxylation_lookup(table: SymbolTableKind, count: u32) -> Self {
        Self::HydroxylationLookup { table, count }
    }

    /// Fails with a [`ChainError::ReservedCharacter`] if `text` contains any of the `reserved` characters
    pub(crate) fn check_reserved(field: TextField, text: &str, reserved: &str) -> Result<()> {
        match text.chars().find(|&c| reserved.contains(c)) {
            Some(character) => Err(Self::ReservedCharacter {
                field,
                text: text.to_owned(),
                character,
            }),
            None => Ok(()),
        }
    }

    /// Fails with a [`ChainError::CardinalityMismatch`] unless both chain counts are the same
    pub fn check_cardinality(expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::CardinalityMismatch { expected, found })
        }
    }
}
