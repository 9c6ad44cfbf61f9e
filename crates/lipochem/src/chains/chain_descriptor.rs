// Local Crate Imports
use crate::{
    ChainClass, ChainDescriptor, ChainError, ChainSymbols, Encoding, LABEL_TERMINATORS,
    OXIDATION_TERMINATORS, Result, TextField,
    parsers::{chain_token, errors::final_parser},
};

// Public API ==========================================================================================================

impl ChainDescriptor {
    #[must_use]
    pub const fn new(class: ChainClass, carbons: u32, double_bonds: u32) -> Self {
        Self {
            class,
            carbons,
            double_bonds,
            hydroxylation: 0,
            label: String::new(),
            oxidation: String::new(),
            omega: None,
        }
    }

    #[must_use]
    pub const fn acyl(carbons: u32, double_bonds: u32) -> Self {
        Self::new(ChainClass::Acyl, carbons, double_bonds)
    }

    #[must_use]
    pub const fn alkyl(carbons: u32, double_bonds: u32) -> Self {
        Self::new(ChainClass::Alkyl, carbons, double_bonds)
    }

    #[must_use]
    pub const fn alkenyl(carbons: u32, double_bonds: u32) -> Self {
        Self::new(ChainClass::Alkenyl, carbons, double_bonds)
    }

    #[must_use]
    pub const fn long_chain_base(carbons: u32, double_bonds: u32, hydroxylation: u32) -> Self {
        Self::new(ChainClass::LongChainBase, carbons, double_bonds).with_hydroxylation(hydroxylation)
    }

    #[must_use]
    pub const fn with_hydroxylation(mut self, hydroxylation: u32) -> Self {
        self.hydroxylation = hydroxylation;
        self
    }

    #[must_use]
    pub fn with_omega(mut self, omega: impl Into<Option<u32>>) -> Self {
        self.omega = omega.into();
        self
    }

    #[must_use]
    pub fn with_oxidation(mut self, oxidation: impl Into<String>) -> Self {
        self.oxidation = oxidation.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Decodes a single chain token, like `O-16:0` or `d18:1;OH` or `18:1(n-9)`
    pub fn decode(token: impl AsRef<str>, symbols: &ChainSymbols) -> Result<Self> {
        Ok(final_parser(chain_token(symbols), token.as_ref())?)
    }

    /// Encodes this chain as a token, looking up its hydroxylation symbol in the table matching its class. Fails if
    /// the label or oxidation state contains a character that would stop the token from being decoded again.
    pub fn encode(&self, symbols: &ChainSymbols, encoding: Encoding) -> Result<String> {
        let linkage = self.class.linkage_marker().unwrap_or_default();
        let label = if encoding.label && !self.label.is_empty() {
            ChainError::check_reserved(TextField::Label, &self.label, LABEL_TERMINATORS)?;
            format!("[{}]", self.label)
        } else {
            String::new()
        };
        let hydroxylation = symbols.symbol(self.class, self.hydroxylation)?;
        let (carbons, double_bonds) = (self.carbons, self.double_bonds);
        let oxidation = if self.oxidation.is_empty() {
            String::new()
        } else {
            ChainError::check_reserved(TextField::Oxidation, &self.oxidation, OXIDATION_TERMINATORS)?;
            format!(";{}", self.oxidation)
        };
        let omega = self
            .omega
            .filter(|_| encoding.omega)
            .map(|omega| format!("(n-{omega})"))
            .unwrap_or_default();

        Ok(format!(
            "{linkage}{label}{hydroxylation}{carbons}:{double_bonds}{oxidation}{omega}"
        ))
    }

    /// The same chain, with its double-bond position forgotten
    #[must_use]
    pub fn without_omega(&self) -> Self {
        self.clone().with_omega(None)
    }

    #[must_use]
    pub const fn class(&self) -> ChainClass {
        self.class
    }

    #[must_use]
    pub const fn carbons(&self) -> u32 {
        self.carbons
    }

    #[must_use]
    pub const fn double_bonds(&self) -> u32 {
        self.double_bonds
    }

    #[must_use]
    pub const fn hydroxylation(&self) -> u32 {
        self.hydroxylation
    }

    #[must_use]
    pub const fn omega(&self) -> Option<u32> {
        self.omega
    }

    #[must_use]
    pub fn oxidation(&self) -> &str {
        &self.oxidation
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

// Module Tests ========================================================================================================
