use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl DomainError {
    /// Shorthand for the common "row with this id does not exist" case.
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// The message shown to API clients, without the category prefix.
    pub fn client_message(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => format!("{} not found", entity),
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Unauthenticated(msg)
            | Self::Forbidden(msg) => msg.clone(),
            Self::Unavailable(_) => "Internal server error".to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        let err = DomainError::not_found("Vehicle", 7);
        assert_eq!(err.to_string(), "Not found: Vehicle with id=7");
        assert_eq!(err.client_message(), "Vehicle not found");
    }

    #[test]
    fn unavailable_hides_storage_detail() {
        let err = DomainError::Unavailable("disk I/O error".into());
        assert_eq!(err.client_message(), "Internal server error");
    }
}
