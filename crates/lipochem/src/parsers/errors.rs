// Standard Library Imports
use std::iter;

// External Crate Imports
use derive_more::Display;
use miette::{Diagnostic, LabeledSpan, SourceCode, SourceSpan};
use nom::{
    Finish, IResult, Parser,
    combinator::all_consuming,
    error::{ErrorKind, ParseError},
};
use thiserror::Error;

// Public API ==========================================================================================================

#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("failed to decode {:?}", .source_code.trim_end())]
pub struct DecodingError {
    // NOTE: Holds the original token plus a trailing space, so that labels can point just past the end of the input
    source_code: String,
    span: SourceSpan,
    #[source]
    kind: DecodingErrorKind,
}

impl DecodingError {
    #[must_use]
    pub fn token(&self) -> &str {
        // SAFETY: `source_code` always ends in the single ASCII space added by `DecodingError::new()`
        &self.source_code[..self.source_code.len() - 1]
    }

    #[must_use]
    pub const fn kind(&self) -> &DecodingErrorKind {
        &self.kind
    }

    #[must_use]
    pub const fn span(&self) -> SourceSpan {
        self.span
    }

    fn new(token: &str, span: SourceSpan, kind: DecodingErrorKind) -> Self {
        let source_code = format!("{token} ");
        Self {
            source_code,
            span,
            kind,
        }
    }
}

// NOTE: This is manually implemented because the label text is pulled from `self.kind`
impl Diagnostic for DecodingError {
    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(self.kind.label().to_owned()), self.span);
        Some(Box::new(iter::once(label)))
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        Some(&self.kind)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum DecodingErrorKind {
    #[diagnostic(help(
        "chain lengths are written as a carbon count and a number of double bonds, like 18:1"
    ))]
    #[error("expected a ':' between the carbon count and the number of double bonds")]
    MissingSeparator,

    #[error("expected the {0} to be a whole number")]
    NonNumeric(NumericField),

    #[diagnostic(help("double-check for typos, or add a new entry to the chain symbol database"))]
    #[error("the hydroxylation symbol {0:?} could not be found in the supplied chain symbol database")]
    UnknownHydroxylation(String),

    #[diagnostic(help(
        "long-chain bases are never ether-linked, so either drop the 'O-' / 'P-' prefix or use an acyl symbol"
    ))]
    #[error("the long-chain-base symbol {0:?} cannot follow an ether linkage marker")]
    LinkageWithLongChainBase(String),

    #[error("expected a label between '[' and ']'")]
    ExpectedLabel,

    #[diagnostic(help("you've probably forgotten to close an earlier '[' bracket"))]
    #[error("expected ']' to close the label")]
    UnclosedLabel,

    #[error("expected an oxidation state after ';'")]
    ExpectedOxidation,

    #[error("expected an omega position, like (n-9)")]
    ExpectedOmega,

    #[diagnostic(help(
        "check the unparsed region for errors, or remove it from the rest of the combination"
    ))]
    #[error("could not interpret the full input as a chain combination")]
    Incomplete,

    #[diagnostic(help(
        "this is an internal error that you shouldn't ever see! If you have gotten this error, \
        then please report it as a bug!"
    ))]
    #[error("internal `nom` error: {0:?}")]
    NomError(ErrorKind),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum NumericField {
    #[display("carbon count")]
    CarbonCount,
    #[display("number of double bonds")]
    DoubleBonds,
    #[display("omega position")]
    Omega,
}

impl DecodingErrorKind {
    fn label(&self) -> &'static str {
        match self {
            Self::MissingSeparator => "expected ':'",
            Self::NonNumeric(_) => "expected a number",
            Self::UnknownHydroxylation(_) => "unknown symbol",
            Self::LinkageWithLongChainBase(_) => "long-chain-base symbol",
            Self::ExpectedLabel => "expected a label",
            Self::UnclosedLabel => "expected ']'",
            Self::ExpectedOxidation => "expected an oxidation state",
            Self::ExpectedOmega => "expected (n-...)",
            Self::Incomplete => "input was valid up until this point",
            Self::NomError(_) => "the region that triggered this bug!",
        }
    }
}

// Parser Plumbing =====================================================================================================

pub(crate) type ParseResult<'s, O> = IResult<&'s str, O, TokenError<'s>>;

#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct TokenError<'s> {
    input: &'s str,
    length: usize,
    kind: DecodingErrorKind,
}

impl<'s> TokenError<'s> {
    pub(crate) const fn new(input: &'s str, kind: DecodingErrorKind) -> Self {
        Self::with_length(input, 0, kind)
    }

    pub(crate) const fn with_length(input: &'s str, length: usize, kind: DecodingErrorKind) -> Self {
        Self {
            input,
            length,
            kind,
        }
    }

    // NOTE: `nom` only ever slices from the front of its input, so the remaining input of an error is always a suffix
    // of the full input, and its offset is just the difference in length
    pub(crate) fn into_decoding_error(self, full_input: &str) -> DecodingError {
        let start = full_input.len() - self.input.len();
        let span = SourceSpan::from(start..start + self.length);
        DecodingError::new(full_input, span, self.kind)
    }
}

impl<'s> ParseError<&'s str> for TokenError<'s> {
    fn from_error_kind(input: &'s str, kind: ErrorKind) -> Self {
        let kind = match kind {
            ErrorKind::Eof => DecodingErrorKind::Incomplete,
            kind => DecodingErrorKind::NomError(kind),
        };
        Self::new(input, kind)
    }

    fn append(_input: &str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    // NOTE: When every branch of an `alt` fails, report the branch that made it furthest into the input
    fn or(self, other: Self) -> Self {
        if other.input.len() < self.input.len() {
            other
        } else {
            self
        }
    }
}

/// Replaces any error from `parser` with `kind`, pointing at the input `parser` started from
pub(crate) fn expect<'s, O, P>(
    mut parser: P,
    kind: DecodingErrorKind,
) -> impl FnMut(&'s str) -> ParseResult<'s, O>
where
    P: Parser<&'s str, O, TokenError<'s>>,
{
    move |i| {
        parser
            .parse(i)
            .map_err(|e| e.map(|_| TokenError::new(i, kind.clone())))
    }
}

/// Runs `parser` over the whole of `input`, converting any failure into a user-facing `DecodingError`
pub(crate) fn final_parser<'s, O, P>(parser: P, input: &'s str) -> Result<O, DecodingError>
where
    P: Parser<&'s str, O, TokenError<'s>>,
{
    all_consuming(parser)(input)
        .finish()
        .map(|(_, o)| o)
        .map_err(|e| e.into_decoding_error(input))
}

// Module Tests ========================================================================================================
