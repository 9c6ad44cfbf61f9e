// External Crate Imports
use itertools::Itertools;

// Local Crate Imports
use crate::{ChainClass, ChainCombination, ChainError, ChainSymbols, Result};

// Public API ==========================================================================================================

/// Checks if two combination keys contain the same chains, in any order and with either separator. Chains are
/// compared by class, length, hydroxylation, omega position, and oxidation state, but not by label.
pub fn are_permuted_equivalent(
    key_a: impl AsRef<str>,
    key_b: impl AsRef<str>,
    symbols: &ChainSymbols,
) -> Result<bool> {
    let a = ChainCombination::decode(key_a, symbols)?;
    let b = ChainCombination::decode(key_b, symbols)?;
    a.is_permutation_of(&b)
}

impl ChainCombination {
    /// Checks if `other` holds the same multiset of chains as `self`, failing if the two have a different number of
    /// slots
    pub fn is_permutation_of(&self, other: &Self) -> Result<bool> {
        ChainError::check_cardinality(self.len(), other.len())?;
        Ok(identities(self).eq(identities(other)))
    }
}

// Private Helper Functions ============================================================================================

// NOTE: `None` stands in for a vacant slot
type Identity<'c> = Option<(ChainClass, u32, u32, u32, Option<u32>, &'c str)>;

fn identities(combination: &ChainCombination) -> impl Iterator<Item = Identity<'_>> {
    combination
        .slots()
        .iter()
        .map(|slot| {
            slot.chain().map(|c| {
                (
                    c.class(),
                    c.carbons(),
                    c.double_bonds(),
                    c.hydroxylation(),
                    c.omega(),
                    c.oxidation(),
                )
            })
        })
        .sorted_unstable()
}

// Module Tests ========================================================================================================
