// Standard Library Imports
use std::collections::hash_map::Entry;

// External Crate Imports
use ahash::{HashMap, HashMapExt};
use knus::{Decode, span::Span};
use miette::{Diagnostic, LabeledSpan, NamedSource, Result};
use thiserror::Error;
use tracing::debug;

// Local Crate Imports
use crate::{
    ChainClass, ChainSymbols, DecodingErrorKind, SymbolTable, SymbolTableKind, errors::ChainError,
};

// Public API ==========================================================================================================

/// The chain symbol database bundled with this library
pub const DEFAULT_KDL: &str = include_str!("../../data/chain_symbols.kdl");

impl ChainSymbols {
    pub fn new(file_name: impl AsRef<str>, kdl_text: impl AsRef<str>) -> Result<Self> {
        let parsed_db: ChainSymbolsKdl = knus::parse(file_name.as_ref(), kdl_text.as_ref())?;
        let symbols = parsed_db
            .validate(())
            .map_err(|e| e.finalize(&file_name, kdl_text))?;
        debug!(
            file = file_name.as_ref(),
            acyl = symbols.acyl.len(),
            long_chain_base = symbols.long_chain_base.len(),
            "loaded chain symbols"
        );
        Ok(symbols)
    }

    #[must_use]
    pub const fn table(&self, kind: SymbolTableKind) -> &SymbolTable {
        match kind {
            SymbolTableKind::Acyl => &self.acyl,
            SymbolTableKind::LongChainBase => &self.long_chain_base,
        }
    }

    /// Looks up the hydroxylation symbol for a chain of `class` carrying `count` hydroxyl groups
    pub fn symbol(&self, class: ChainClass, count: u32) -> crate::Result<&str> {
        let kind = class.symbol_table();
        self.table(kind)
            .symbol(count)
            .ok_or(ChainError::hydroxylation_lookup(kind, count))
    }

    /// Works out which class of chain a hydroxylation `symbol` belongs to, and how many hydroxyl groups it stands
    /// for. Symbols following a linkage marker (`O-` or `P-`) must come from the acyl table.
    pub(crate) fn classify(
        &self,
        symbol: &str,
        linkage: Option<ChainClass>,
    ) -> Result<(ChainClass, u32), DecodingErrorKind> {
        match (self.acyl.count(symbol), self.long_chain_base.count(symbol), linkage) {
            (Some(count), _, Some(class)) => Ok((class, count)),
            (Some(count), _, None) => Ok((ChainClass::Acyl, count)),
            (None, Some(_), Some(_)) => Err(DecodingErrorKind::LinkageWithLongChainBase(
                symbol.to_owned(),
            )),
            (None, Some(count), None) => Ok((ChainClass::LongChainBase, count)),
            (None, None, _) => Err(DecodingErrorKind::UnknownHydroxylation(symbol.to_owned())),
        }
    }
}

impl Default for ChainSymbols {
    fn default() -> Self {
        // SAFETY: The bundled database is checked by the tests below, so this should never fail
        Self::new("chain_symbols.kdl", DEFAULT_KDL).unwrap()
    }
}

// KDL File Schema =====================================================================================================

#[derive(Debug, Decode)]
#[knus(span_type=Span)]
struct ChainSymbolsKdl {
    #[knus(child)]
    acyl: SymbolTableKdl,
    #[knus(child)]
    long_chain_base: SymbolTableKdl,
}

#[derive(Debug, Decode)]
#[knus(span_type=Span)]
struct SymbolTableKdl {
    #[knus(children(name = "hydroxylation"))]
    entries: Vec<HydroxylationKdl>,
}

#[derive(Debug, Decode)]
#[knus(span_type=Span)]
struct HydroxylationKdl {
    #[knus(span)]
    span: Span,
    #[knus(argument)]
    count: u32,
    #[knus(argument)]
    symbol: String,
}

// Contextual Validation Trait  ========================================================================================

type SymbolResult<T> = Result<T, SymbolDatabaseErrorKind>;

trait ValidateInto<T> {
    type Context;

    fn validate(self, ctx: Self::Context) -> SymbolResult<T>;
}

// Chain Symbol Validation =============================================================================================

impl ValidateInto<ChainSymbols> for ChainSymbolsKdl {
    type Context = ();

    fn validate(self, _ctx: Self::Context) -> SymbolResult<ChainSymbols> {
        let (acyl, acyl_spans) = self.acyl.validate(SymbolTableKind::Acyl)?;
        let (long_chain_base, long_chain_base_spans) =
            self.long_chain_base.validate(SymbolTableKind::LongChainBase)?;

        // NOTE: A symbol in both tables would make decoding ambiguous, since there would be no way to tell if "x18:1"
        // is an acyl chain or a long-chain base
        if let Some((symbol, acyl_span, long_chain_base_span)) = long_chain_base_spans
            .into_iter()
            .filter_map(|(symbol, span)| {
                let acyl_span = *acyl_spans.get(&symbol)?;
                Some((symbol, acyl_span, span))
            })
            .min_by_key(|&(_, _, span)| span.0)
        {
            return Err(SymbolDatabaseErrorKind::SharedSymbol(
                acyl_span,
                long_chain_base_span,
                symbol,
            ));
        }

        Ok(ChainSymbols {
            acyl,
            long_chain_base,
        })
    }
}

// ---------------------------------------------------------------------------------------------------------------------

type SpannedTable = (SymbolTable, HashMap<String, Span>);

impl ValidateInto<SpannedTable> for SymbolTableKdl {
    type Context = SymbolTableKind;

    fn validate(self, ctx: Self::Context) -> SymbolResult<SpannedTable> {
        let mut seen_counts = HashMap::new();
        let mut seen_symbols = HashMap::new();
        let mut table = SymbolTable::default();

        for HydroxylationKdl {
            span,
            count,
            symbol,
        } in self.entries
        {
            if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(SymbolDatabaseErrorKind::InvalidSymbol(span, symbol));
            }
            if symbol.is_empty() && ctx == SymbolTableKind::LongChainBase {
                return Err(SymbolDatabaseErrorKind::EmptyLongChainBaseSymbol(span));
            }

            match seen_counts.entry(count) {
                Entry::Occupied(e) => {
                    return Err(SymbolDatabaseErrorKind::DuplicateCount(*e.get(), span, count));
                }
                Entry::Vacant(e) => e.insert(span),
            };
            match seen_symbols.entry(symbol.clone()) {
                Entry::Occupied(e) => {
                    let (symbol, first_defined_at) = e.remove_entry();
                    return Err(SymbolDatabaseErrorKind::DuplicateSymbol(
                        first_defined_at,
                        span,
                        symbol,
                    ));
                }
                Entry::Vacant(e) => e.insert(span),
            };

            table.insert(count, symbol);
        }

        Ok((table, seen_symbols))
    }
}

// Validation Error Types and Trait Implementations  ===================================================================

#[derive(Debug, Error)]
#[error("failed to validate chain symbol database file")]
struct SymbolDatabaseError {
    kdl: NamedSource<String>,
    #[source]
    kind: SymbolDatabaseErrorKind,
}

// NOTE: This is manually implemented because the list of labels is dynamic and needs to be extracted from `self.kind`
impl Diagnostic for SymbolDatabaseError {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.kdl)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(self.kind.labels().into_iter().map(|(s, l)| {
            LabeledSpan::new_with_span(Some(l.to_owned()), *s)
        })))
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        Some(&self.kind)
    }
}

#[derive(Clone, Debug, Diagnostic, Error)]
enum SymbolDatabaseErrorKind {
    #[error("a symbol for {2} hydroxyl group(s) has already been defined")]
    #[diagnostic(help("each hydroxylation count can only be written one way, so remove one of the entries"))]
    DuplicateCount(Span, Span, u32),

    #[error("the symbol {2:?} has already been defined")]
    #[diagnostic(help("double-check for typos, or pick a new symbol"))]
    DuplicateSymbol(Span, Span, String),

    #[error("the symbol {2:?} is used by both the acyl and long-chain-base tables")]
    #[diagnostic(help(
        "symbols must identify the class of a chain, so pick a different symbol for one of the tables"
    ))]
    SharedSymbol(Span, Span, String),

    #[error("the symbol {1:?} contains characters other than ASCII letters")]
    #[diagnostic(help(
        "digits, brackets, and punctuation are already used by other parts of a chain token"
    ))]
    InvalidSymbol(Span, String),

    #[error("long-chain bases cannot be given an empty symbol")]
    #[diagnostic(help("an empty symbol is reserved for acyl chains, so pick a symbol like \"d\""))]
    EmptyLongChainBaseSymbol(Span),
}

impl SymbolDatabaseErrorKind {
    fn labels(&self) -> Vec<(&Span, &'static str)> {
        match self {
            Self::DuplicateCount(s1, s2, _) | Self::DuplicateSymbol(s1, s2, _) => {
                vec![(s1, "first defined here"), (s2, "then again here")]
            }
            Self::SharedSymbol(s1, s2, _) => {
                vec![(s1, "defined for acyl chains"), (s2, "and for long-chain bases")]
            }
            Self::InvalidSymbol(s, _) => vec![(s, "invalid symbol")],
            Self::EmptyLongChainBaseSymbol(s) => vec![(s, "empty symbol")],
        }
    }

    fn finalize(self, file_name: impl AsRef<str>, kdl: impl AsRef<str>) -> SymbolDatabaseError {
        let kdl = NamedSource::new(file_name, kdl.as_ref().to_owned());
        SymbolDatabaseError { kdl, kind: self }
    }
}

// Module Tests ========================================================================================================
