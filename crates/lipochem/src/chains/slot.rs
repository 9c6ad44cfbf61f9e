use crate::{ChainDescriptor, ChainSymbols, Encoding, Result, Slot, VACANT_TOKEN};

impl Slot {
    /// Encodes the chain in this slot, or the `-` placeholder if it's vacant
    pub fn encode(&self, symbols: &ChainSymbols, encoding: Encoding) -> Result<String> {
        match self {
            Self::Chain(chain) => chain.encode(symbols, encoding),
            Self::Vacant => Ok(VACANT_TOKEN.to_owned()),
        }
    }

    #[must_use]
    pub const fn chain(&self) -> Option<&ChainDescriptor> {
        match self {
            Self::Chain(chain) => Some(chain),
            Self::Vacant => None,
        }
    }

    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        matches!(self, Self::Vacant)
    }

    #[must_use]
    pub fn omega(&self) -> Option<u32> {
        self.chain().and_then(ChainDescriptor::omega)
    }

    #[must_use]
    pub fn without_omega(&self) -> Self {
        match self {
            Self::Chain(chain) => Self::Chain(chain.without_omega()),
            Self::Vacant => Self::Vacant,
        }
    }

    // NOTE: Vacant slots have nowhere to put an omega, so any omega they're given is silently dropped
    #[must_use]
    pub fn with_omega(&self, omega: Option<u32>) -> Self {
        match self {
            Self::Chain(chain) => Self::Chain(chain.clone().with_omega(omega)),
            Self::Vacant => Self::Vacant,
        }
    }
}

impl From<ChainDescriptor> for Slot {
    fn from(chain: ChainDescriptor) -> Self {
        Self::Chain(chain)
    }
}
