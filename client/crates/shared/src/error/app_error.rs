//! Application Error - Unified error type for the client
//!
//! Every crate-level error converts into [`AppError`]; screens only ever
//! read [`AppError::user_message`].

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Text = Cow<'static, str>;
type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// Classified failure with the text a screen shows
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::unauthorized("Your session is no longer valid")
///     .with_action("Please log in again");
/// assert_eq!(err.kind(), ErrorKind::Unauthorized);
/// assert_eq!(
///     err.user_message(),
///     "Your session is no longer valid. Please log in again"
/// );
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Text,
    /// What the user can do about it
    action: Option<Text>,
    /// Underlying cause, for logs only
    source: Option<BoxedSource>,
}

/// Application result type alias
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Text>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    /// Error for a backend reply with `status`
    #[inline]
    pub fn from_status(status: u16, message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::from_status(status), message)
    }

    #[inline]
    pub fn bad_request(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    #[inline]
    pub fn unauthorized(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    #[inline]
    pub fn internal(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// Backend unreachable
    #[inline]
    pub fn network(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Credential store failure
    #[inline]
    pub fn storage(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Reply that could not be understood
    #[inline]
    pub fn invalid_response(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    #[inline]
    pub fn with_action(mut self, action: impl Into<Text>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// `None` for client-side kinds
    #[inline]
    pub fn status_code(&self) -> Option<u16> {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message and action joined; the kind name is left out
    pub fn user_message(&self) -> String {
        match &self.action {
            Some(action) => format!("{}. {}", self.message, action),
            None => self.message.to_string(),
        }
    }

    /// Worth retrying later
    #[inline]
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}
