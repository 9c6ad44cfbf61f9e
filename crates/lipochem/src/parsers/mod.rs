pub mod errors;

mod chain_token;
mod combination_key;

pub(crate) use chain_token::chain_token;
pub(crate) use combination_key::combination_key;
