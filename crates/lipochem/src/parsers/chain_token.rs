use nom::{
    Err,
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{alpha0, char, u32},
    combinator::{cut, opt, value},
    sequence::{delimited, preceded, separated_pair, terminated},
};

use crate::{
    ChainClass, ChainDescriptor, ChainSymbols, DecodingErrorKind, LABEL_TERMINATORS, NumericField,
    OXIDATION_TERMINATORS,
};

use super::errors::{ParseResult, TokenError, expect};

/// Chain Token
///   = [ Linkage ] , [ Label ] , [ Hydroxylation ] , Carbons , ":" , Double Bonds ,
///     [ Oxidation ] , [ Omega ]
///   ;
pub(crate) fn chain_token<'s>(
    symbols: &ChainSymbols,
) -> impl FnMut(&'s str) -> ParseResult<'s, ChainDescriptor> {
    move |i| {
        let (i, linkage) = opt(linkage)(i)?;
        let (i, label) = opt(label)(i)?;
        let (i, (class, hydroxylation)) = hydroxylation(symbols, linkage, i)?;
        let (i, (carbons, double_bonds)) = chain_length(i)?;
        let (i, oxidation) = opt(oxidation)(i)?;
        let (i, omega) = opt(omega)(i)?;

        let chain = ChainDescriptor::new(class, carbons, double_bonds)
            .with_hydroxylation(hydroxylation)
            .with_label(label.unwrap_or_default())
            .with_oxidation(oxidation.unwrap_or_default())
            .with_omega(omega);
        Ok((i, chain))
    }
}

/// Linkage = "O-" | "P-" ;
fn linkage(i: &str) -> ParseResult<ChainClass> {
    alt((
        value(ChainClass::Alkyl, tag("O-")),
        value(ChainClass::Alkenyl, tag("P-")),
    ))(i)
}

/// Label = "[" , { character - "]" }- , "]" ;
fn label(i: &str) -> ParseResult<&str> {
    let contents = expect(is_not(LABEL_TERMINATORS), DecodingErrorKind::ExpectedLabel);
    let close = expect(char(']'), DecodingErrorKind::UnclosedLabel);
    preceded(char('['), cut(terminated(contents, close)))(i)
}

/// Hydroxylation = { ASCII letter } ;
fn hydroxylation<'s>(
    symbols: &ChainSymbols,
    linkage: Option<ChainClass>,
    i: &'s str,
) -> ParseResult<'s, (ChainClass, u32)> {
    let (rest, symbol) = alpha0::<_, TokenError>(i)?;
    match symbols.classify(symbol, linkage) {
        Ok(class_and_count) => Ok((rest, class_and_count)),
        // NOTE: There is nothing else a chain could start with here, so unknown symbols are a hard failure
        Err(kind) => Err(Err::Failure(TokenError::with_length(i, symbol.len(), kind))),
    }
}

/// Chain Length = Carbons , ":" , Double Bonds ;
fn chain_length(i: &str) -> ParseResult<(u32, u32)> {
    let carbons = expect(u32, DecodingErrorKind::NonNumeric(NumericField::CarbonCount));
    let separator = expect(char(':'), DecodingErrorKind::MissingSeparator);
    let double_bonds = expect(u32, DecodingErrorKind::NonNumeric(NumericField::DoubleBonds));
    separated_pair(carbons, cut(separator), cut(double_bonds))(i)
}

/// Oxidation = ";" , { character - ( "(" | "_" | "/" ) }- ;
fn oxidation(i: &str) -> ParseResult<&str> {
    let state = expect(is_not(OXIDATION_TERMINATORS), DecodingErrorKind::ExpectedOxidation);
    preceded(char(';'), cut(state))(i)
}

/// Omega = "(n-" , digit , { digit } , ")" ;
fn omega(i: &str) -> ParseResult<u32> {
    let prefix = expect(tag("n-"), DecodingErrorKind::ExpectedOmega);
    let position = expect(u32, DecodingErrorKind::NonNumeric(NumericField::Omega));
    let close = expect(char(')'), DecodingErrorKind::ExpectedOmega);
    preceded(char('('), cut(delimited(prefix, position, close)))(i)
}
