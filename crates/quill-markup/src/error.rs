//! Error types for markup configuration.

/// Error returned when configuring the markup compiler.
///
/// Compilation itself never fails: malformed author syntax degrades to
/// literal passthrough. Errors here are configuration bugs and surface
/// at setup time, before any document is compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    /// A construct name that no rule is registered under.
    #[error("unknown construct: {0:?} (expected one of: emdash, figure, callout, gallery)")]
    UnknownConstruct(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_construct_display() {
        let err = MarkupError::UnknownConstruct("wibble".to_owned());
        let msg = err.to_string();
        assert!(msg.contains("wibble"));
        assert!(msg.contains("emdash"));
    }
}
