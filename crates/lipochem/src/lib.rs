//! Canonical naming for the fatty-acyl, ether, and sphingoid chains of lipid molecules

pub mod chains;
pub mod combinations;
pub mod errors;
pub mod parsers;
pub mod symbols;

// External Crate Imports
use ahash::HashMap;
use derive_more::Display;

// FIXME: Work on what's publicly exported / part of the API! Maybe create a prelude?
pub use combinations::{are_permuted_equivalent, canonicalize, join};
pub use errors::{ChainError, Result};
pub use parsers::errors::{DecodingError, DecodingErrorKind, NumericField};
pub use symbols::chain_symbols::DEFAULT_KDL;

// Public API ==========================================================================================================

/// Joins the chains of a combination whose sn-positions are unknown
pub const UNRESOLVED_SEPARATOR: char = '_';
/// Joins the chains of a combination in sn-position order
pub const RESOLVED_SEPARATOR: char = '/';
/// Stands in for a position where no chain was detected
pub const VACANT_TOKEN: &str = "-";

// NOTE: Labels and oxidation states are free text, but any of these characters would end them early when decoding
const LABEL_TERMINATORS: &str = "]";
const OXIDATION_TERMINATORS: &str = "(_/";

// NOTE: The derived `Ord` follows declaration order, and that order is used as a tie-breaker when canonicalizing
// combinations, so reordering these variants changes every canonical key!
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ChainClass {
    Acyl,
    Alkyl,
    Alkenyl,
    LongChainBase,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ChainDescriptor {
    class: ChainClass,
    carbons: u32,
    double_bonds: u32,
    hydroxylation: u32,
    label: String,
    oxidation: String,
    omega: Option<u32>,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Slot {
    Chain(ChainDescriptor),
    Vacant,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ChainCombination {
    Unresolved(Vec<Slot>),
    Resolved(Vec<Slot>),
}

/// Which optional parts of a chain should be written out when encoding it
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Encoding {
    pub label: bool,
    pub omega: bool,
}

// ---------------------------------------------------------------------------------------------------------------------

// NOTE: Acyl, alkyl, and alkenyl chains share one table, whilst long-chain bases get their own. These must never be
// mixed up, since the same hydroxylation count is written differently for each
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ChainSymbols {
    acyl: SymbolTable,
    long_chain_base: SymbolTable,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<u32, String>,
    counts: HashMap<String, u32>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum TextField {
    #[display("label")]
    Label,
    #[display("oxidation state")]
    Oxidation,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum SymbolTableKind {
    #[display("acyl")]
    Acyl,
    #[display("long-chain-base")]
    LongChainBase,
}
