use allowlist_types::Identity;
use thiserror::Error;

/// Why a gate refused a call.
///
/// Every variant is terminal: the core never retries, and a refused mutation
/// leaves state exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("caller {caller} is not the owner")]
    AuthorizationDenied { caller: Identity },

    #[error("{caller} is not in the whitelist")]
    NotInWhitelist { caller: Identity },

    #[error("signature validation failed")]
    SignatureValidationFailed,

    #[error("invalid merkle proof")]
    InvalidProof,

    #[error("merkle root is not set")]
    InvalidRoot,
}

impl GateError {
    /// Stable reason code for collaborators (UIs, scripts) to branch on.
    pub fn code(&self) -> &'static str {
        match self {
            GateError::AuthorizationDenied { .. } => "NOT_OWNER",
            GateError::NotInWhitelist { .. } => "NOT_IN_WHITELIST",
            GateError::SignatureValidationFailed => "SIGNATURE_VALIDATION_FAILED",
            GateError::InvalidProof => "INVALID_PROOF",
            GateError::InvalidRoot => "INVALID_ROOT",
        }
    }
}

/// Errors from loading configuration or building gates from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let caller = Identity::from_bytes([1u8; 20]);
        assert_eq!(GateError::AuthorizationDenied { caller }.code(), "NOT_OWNER");
        assert_eq!(GateError::NotInWhitelist { caller }.code(), "NOT_IN_WHITELIST");
        assert_eq!(
            GateError::SignatureValidationFailed.code(),
            "SIGNATURE_VALIDATION_FAILED"
        );
        assert_eq!(GateError::InvalidProof.code(), "INVALID_PROOF");
        assert_eq!(GateError::InvalidRoot.code(), "INVALID_ROOT");
    }

    #[test]
    fn display_names_the_caller() {
        let caller = Identity::from_bytes([0xab; 20]);
        let msg = GateError::NotInWhitelist { caller }.to_string();
        assert!(msg.contains(&caller.to_string()));
    }
}
