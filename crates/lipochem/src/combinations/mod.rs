mod canonical;
mod chain_combination;
mod equivalence;

pub use canonical::{canonicalize, join};
pub use equivalence::are_permuted_equivalent;
