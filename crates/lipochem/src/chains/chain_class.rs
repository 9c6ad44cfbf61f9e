use crate::{ChainClass, SymbolTableKind};

impl ChainClass {
    /// The prefix that marks ether-linked chains
    #[must_use]
    pub const fn linkage_marker(self) -> Option<&'static str> {
        match self {
            Self::Alkyl => Some("O-"),
            Self::Alkenyl => Some("P-"),
            Self::Acyl | Self::LongChainBase => None,
        }
    }

    /// The hydroxylation symbol table that chains of this class are encoded with
    #[must_use]
    pub const fn symbol_table(self) -> SymbolTableKind {
        match self {
            Self::Acyl | Self::Alkyl | Self::Alkenyl => SymbolTableKind::Acyl,
            Self::LongChainBase => SymbolTableKind::LongChainBase,
        }
    }
}
