use crate::Encoding;

impl Encoding {
    /// Writes out every part of a chain
    pub const FULL: Self = Self {
        label: true,
        omega: true,
    };

    /// Drops omega positions, as needed for keys that shouldn't distinguish between double-bond positions
    pub const WITHOUT_OMEGA: Self = Self {
        label: true,
        omega: false,
    };
}

impl Default for Encoding {
    fn default() -> Self {
        Self::FULL
    }
}
