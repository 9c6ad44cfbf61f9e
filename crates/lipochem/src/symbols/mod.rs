pub mod chain_symbols;
mod symbol_table;
