//! Call-level failures. Per-row problems are [`crate::types::SkipReason`]s, not errors.

/// Failures that abort a whole extraction call
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The document did not yield a movements table.
    #[error("not enough tables found in document: expected at least {expected}, found {found}")]
    InsufficientTables { expected: usize, found: usize },

    /// The table source could not produce tables at all.
    #[error("table source failed: {0}")]
    Source(String),
}

impl ExtractError {
    /// Wrap a source error, keeping its full context chain in the message.
    pub fn source(err: &anyhow::Error) -> Self {
        Self::Source(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_messages() {
        let err = ExtractError::InsufficientTables { expected: 2, found: 1 };
        assert_eq!(
            err.to_string(),
            "not enough tables found in document: expected at least 2, found 1"
        );

        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("eof")).context("reading tables.json");
        let err = ExtractError::source(&inner.unwrap_err());
        assert_eq!(err.to_string(), "table source failed: reading tables.json: eof");
    }
}
