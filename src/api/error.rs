//! API Error Types
//!
//! Errors raised while talking to the calculation API. Every variant maps to
//! a short Portuguese message shown to the user.

use thiserror::Error;

/// Failure of a single API call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Server unreachable, connection reset or timeout
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP status
    #[error("HTTP error {0}")]
    Http(u16),

    /// Server answered with `sucesso: false`
    #[error("API error: {0}")]
    Api(String),

    /// Body was not the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl RequestError {
    /// Message for the floating notification
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Transport(_) => {
                "Não foi possível conectar ao servidor de cálculos".to_string()
            }
            RequestError::Http(status) => format!("Erro HTTP {}", status),
            RequestError::Api(message) => message.clone(),
            RequestError::Decode(_) => "Resposta inválida do servidor".to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Http(status) => Some(*status),
            _ => None,
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RequestError::Http(status.as_u16())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode(err.to_string())
    }
}

/// Result type for API calls
pub type RequestResult<T> = Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RequestError::Http(500).to_string(), "HTTP error 500");
        assert_eq!(
            RequestError::Api("Receita inválida".into()).to_string(),
            "API error: Receita inválida"
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(RequestError::Http(502).user_message(), "Erro HTTP 502");
        assert_eq!(
            RequestError::Api("Dados incompletos".into()).user_message(),
            "Dados incompletos"
        );
        assert_eq!(
            RequestError::Transport("connection refused".into()).user_message(),
            "Não foi possível conectar ao servidor de cálculos"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let req_err: RequestError = err.into();
        assert!(matches!(req_err, RequestError::Decode(_)));
    }
}
