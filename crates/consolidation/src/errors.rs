use lipochem::ChainError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Clone, PartialEq, Error)]
#[error("failed to consolidate the identifications of {analyte:?}")]
pub struct ConsolidationError {
    analyte: String,
    #[source]
    #[diagnostic_source]
    error: ChainError,
}

impl ConsolidationError {
    pub(crate) fn new(analyte: impl Into<String>, error: ChainError) -> Self {
        let analyte = analyte.into();
        Self { analyte, error }
    }

    #[must_use]
    pub fn analyte(&self) -> &str {
        &self.analyte
    }

    #[must_use]
    pub const fn error(&self) -> &ChainError {
        &self.error
    }
}
