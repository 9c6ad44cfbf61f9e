// Standard Library Imports
use std::cmp::Ordering;

// External Crate Imports
use itertools::{Either, Itertools};

// Local Crate Imports
use crate::{ChainDescriptor, ChainSymbols, Encoding, Result, Slot};

// Public API ==========================================================================================================

/// Sorts the slots of a combination into a deterministic order that doesn't depend on the order they were given in.
///
/// Chains are ordered by carbon count, then number of double bonds. Within a group of chains sharing both, omega
/// positions are only compared if every chain in the group has one. After that, ties are broken by chain class,
/// label, and hydroxylation. Vacant slots always come last, keeping their original relative order.
#[must_use]
pub fn canonicalize(slots: &[Slot]) -> Vec<Slot> {
    let (mut chains, vacancies): (Vec<_>, Vec<_>) =
        slots.iter().partition_map(|slot| match slot {
            Slot::Chain(chain) => Either::Left(chain.clone()),
            Slot::Vacant => Either::Right(Slot::Vacant),
        });

    chains.sort_by_key(chain_length);
    for group in chains.chunk_by_mut(|a, b| chain_length(a) == chain_length(b)) {
        // NOTE: Knowing the omega position of only some chains in a group says nothing about how the rest should be
        // ordered, so partial omega assignments are ignored entirely
        let compare_omegas = group.iter().all(|chain| chain.omega().is_some());
        group.sort_by(|a, b| {
            let omega = if compare_omegas {
                a.omega().cmp(&b.omega())
            } else {
                Ordering::Equal
            };
            omega
                .then_with(|| a.class().cmp(&b.class()))
                .then_with(|| a.label().cmp(b.label()))
                .then_with(|| a.hydroxylation().cmp(&b.hydroxylation()))
                .then_with(|| a.cmp(b))
        });
    }

    chains.into_iter().map(Slot::Chain).chain(vacancies).collect()
}

/// Encodes every slot and joins the resulting tokens with `separator`
pub fn join(
    slots: &[Slot],
    separator: char,
    symbols: &ChainSymbols,
    encoding: Encoding,
) -> Result<String> {
    slots
        .iter()
        .map(|slot| slot.encode(symbols, encoding))
        .process_results(|mut tokens| tokens.join(&separator.to_string()))
}

// Private Helper Functions ============================================================================================

const fn chain_length(chain: &ChainDescriptor) -> (u32, u32) {
    (chain.carbons(), chain.double_bonds())
}

// Module Tests ========================================================================================================
