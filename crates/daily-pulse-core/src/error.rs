use thiserror::Error;

#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Missing required input field: {field}")]
    MissingRequiredField { field: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PulseError {
    /// Name of the offending input field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            PulseError::MissingRequiredField { field } => Some(field.as_str()),
            PulseError::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for PulseError {
    fn from(e: serde_json::Error) -> Self {
        PulseError::SerializationError(e.to_string())
    }
}
