use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Error taxonomy shared by every ledger, recorder and aggregator operation.
///
/// Each variant carries enough human-readable detail for a UI layer to build
/// a message; localization is the caller's concern.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl DomainError {
    pub fn client_not_found(id: impl ToString) -> Self {
        DomainError::NotFound {
            entity: "client",
            id: id.to_string(),
        }
    }

    pub fn plan_not_found(id: impl ToString) -> Self {
        DomainError::NotFound {
            entity: "plan",
            id: id.to_string(),
        }
    }

    pub fn subscription_not_found(id: impl ToString) -> Self {
        DomainError::NotFound {
            entity: "subscription",
            id: id.to_string(),
        }
    }

    pub fn payment_not_found(id: impl ToString) -> Self {
        DomainError::NotFound {
            entity: "payment",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}
