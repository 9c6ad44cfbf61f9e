use std::iter;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::one_of,
    combinator::{cut, map, value},
    multi::many0,
    sequence::pair,
};

use crate::{ChainCombination, ChainSymbols, RESOLVED_SEPARATOR, Slot, VACANT_TOKEN};

use super::{chain_token, errors::ParseResult};

/// Combination Key = Slot , { Separator , Slot } ;
pub(crate) fn combination_key<'s>(
    symbols: &ChainSymbols,
) -> impl FnMut(&'s str) -> ParseResult<'s, ChainCombination> {
    move |i| {
        let (i, first) = slot(symbols)(i)?;
        let (i, rest) = many0(pair(separator, slot(symbols)))(i)?;

        // NOTE: A single `_` anywhere means that at least some positions are unknown, so the whole key is treated as
        // unresolved. Keys with only one slot have no positions to resolve either.
        let resolved = !rest.is_empty() && rest.iter().all(|&(s, _)| s == RESOLVED_SEPARATOR);
        let slots = iter::once(first)
            .chain(rest.into_iter().map(|(_, slot)| slot))
            .collect();

        let combination = if resolved {
            ChainCombination::Resolved(slots)
        } else {
            ChainCombination::Unresolved(slots)
        };
        Ok((i, combination))
    }
}

/// Slot = Placeholder | Chain Token ;
fn slot<'s>(symbols: &ChainSymbols) -> impl FnMut(&'s str) -> ParseResult<'s, Slot> {
    alt((
        value(Slot::Vacant, tag(VACANT_TOKEN)),
        cut(map(chain_token(symbols), Slot::Chain)),
    ))
}

/// Separator = "_" | "/" ;
fn separator(i: &str) -> ParseResult<char> {
    one_of("_/")(i)
}

#[cfg(test)]
mod tests {
    use nom::Err;

    use crate::ChainDescriptor;

    use super::*;

    #[test]
    fn test_separator() {
        assert_eq!(separator("_18:1"), Ok(("18:1", '_')));
        assert_eq!(separator("/18:1"), Ok(("18:1", '/')));
        assert!(separator(";18:1").is_err());
    }

    #[test]
    fn test_slot() {
        let symbols = ChainSymbols::default();
        let mut slot = slot(&symbols);

        assert_eq!(slot("-_16:0"), Ok(("_16:0", Slot::Vacant)));
        assert_eq!(
            slot("16:0_-"),
            Ok(("_-", Slot::Chain(ChainDescriptor::acyl(16, 0))))
        );
        assert!(matches!(slot("_16:0"), Err(Err::Failure(_))));
    }

    #[test]
    fn test_combination_key() {
        let symbols = ChainSymbols::default();
        let mut combination_key = combination_key(&symbols);
        let (palmitoyl, oleoyl) = (
            Slot::from(ChainDescriptor::acyl(16, 0)),
            Slot::from(ChainDescriptor::acyl(18, 1)),
        );

        assert_eq!(
            combination_key("16:0"),
            Ok(("", ChainCombination::Unresolved(vec![palmitoyl.clone()])))
        );
        assert_eq!(
            combination_key("18:1_16:0"),
            Ok((
                "",
                ChainCombination::Unresolved(vec![oleoyl.clone(), palmitoyl.clone()])
            ))
        );
        assert_eq!(
            combination_key("16:0/18:1"),
            Ok((
                "",
                ChainCombination::Resolved(vec![palmitoyl.clone(), oleoyl.clone()])
            ))
        );
        assert_eq!(
            combination_key("16:0/18:1_-"),
            Ok((
                "",
                ChainCombination::Unresolved(vec![palmitoyl, oleoyl, Slot::Vacant])
            ))
        );
        assert_eq!(
            combination_key("16:0/18:1 "),
            combination_key("16:0/18:1").map(|(_, c)| (" ", c))
        );
        assert!(matches!(combination_key("16:0_"), Err(Err::Failure(_))));
    }
}
