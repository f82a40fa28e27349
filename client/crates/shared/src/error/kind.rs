//! Error Kind - Classification of errors
//!
//! One [`ErrorKind`] per failure class a screen needs to tell apart. HTTP
//! kinds carry their status code; client-side kinds (network, cancellation,
//! storage, unreadable replies) carry none.

use serde::Serialize;

/// Failure class shared by every client crate
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Unauthorized.status_code(), Some(401));
/// assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
/// assert_eq!(ErrorKind::Network.status_code(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    RequestTimeout,
    Conflict,
    /// Resource removed or expired
    Gone,
    UnprocessableEntity,
    TooManyRequests,
    InternalServerError,
    ServiceUnavailable,
    /// Backend unreachable
    Network,
    /// Caller cancelled before a reply arrived
    Cancelled,
    /// Credential store read or write failed
    Storage,
    /// Reply body could not be understood
    InvalidResponse,
}

/// Kinds that map one-to-one onto a status code
const STATUS_TABLE: [(ErrorKind, u16); 11] = [
    (ErrorKind::BadRequest, 400),
    (ErrorKind::Unauthorized, 401),
    (ErrorKind::Forbidden, 403),
    (ErrorKind::NotFound, 404),
    (ErrorKind::RequestTimeout, 408),
    (ErrorKind::Conflict, 409),
    (ErrorKind::Gone, 410),
    (ErrorKind::UnprocessableEntity, 422),
    (ErrorKind::TooManyRequests, 429),
    (ErrorKind::InternalServerError, 500),
    (ErrorKind::ServiceUnavailable, 503),
];

impl ErrorKind {
    /// `None` for client-side kinds
    pub fn status_code(&self) -> Option<u16> {
        STATUS_TABLE
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, code)| *code)
    }

    /// Kind for a non-success reply
    ///
    /// Unlisted 4xx and 5xx codes fall back to `BadRequest` and
    /// `InternalServerError`. Anything else was never an HTTP failure,
    /// so the reply itself is the problem.
    pub fn from_status(status: u16) -> Self {
        if let Some((kind, _)) = STATUS_TABLE.iter().find(|(_, code)| *code == status) {
            return *kind;
        }
        match status {
            400..=499 => ErrorKind::BadRequest,
            500..=599 => ErrorKind::InternalServerError,
            _ => ErrorKind::InvalidResponse,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::RequestTimeout => "Request Timeout",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Gone => "Gone",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
            ErrorKind::Network => "Network Error",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Storage => "Storage Error",
            ErrorKind::InvalidResponse => "Invalid Response",
        }
    }

    /// The user should try again later rather than change their input.
    /// Nothing retries automatically.
    #[inline]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::Network
                | ErrorKind::RequestTimeout
                | ErrorKind::TooManyRequests
                | ErrorKind::ServiceUnavailable
        )
    }

    #[inline]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, ErrorKind::Unauthorized | ErrorKind::Forbidden)
    }

    /// 5xx
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_some_and(|code| code >= 500)
    }

    /// 4xx
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_some_and(|code| (400..500).contains(&code))
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table_is_consistent() {
        for (kind, code) in STATUS_TABLE {
            assert_eq!(kind.status_code(), Some(code));
            assert_eq!(ErrorKind::from_status(code), kind);
        }
        assert_eq!(ErrorKind::Cancelled.status_code(), None);
        assert_eq!(ErrorKind::Storage.status_code(), None);
    }

    #[test]
    fn test_unlisted_statuses() {
        assert_eq!(ErrorKind::from_status(418), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(502), ErrorKind::InternalServerError);
        assert_eq!(ErrorKind::from_status(302), ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_transient_vs_auth() {
        assert!(ErrorKind::Network.is_transient());
        assert!(ErrorKind::RequestTimeout.is_transient());
        assert!(!ErrorKind::Unauthorized.is_transient());
        assert!(ErrorKind::Forbidden.is_auth_failure());
        assert!(!ErrorKind::Network.is_auth_failure());
    }

    #[test]
    fn test_client_and_server_ranges() {
        assert!(ErrorKind::NotFound.is_client_error());
        assert!(!ErrorKind::NotFound.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
        assert!(!ErrorKind::Network.is_client_error());
        assert!(!ErrorKind::Network.is_server_error());
    }

    #[test]
    fn test_display_and_serialize() {
        assert_eq!(ErrorKind::TooManyRequests.to_string(), "Too Many Requests");
        assert_eq!(
            serde_json::to_string(&ErrorKind::InvalidResponse).unwrap(),
            "\"INVALID_RESPONSE\""
        );
    }
}
