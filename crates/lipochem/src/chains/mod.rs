mod chain_class;
mod chain_descriptor;
mod encoding;
mod slot;
