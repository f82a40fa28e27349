//! Screen view state

use crate::domain::capability::Capability;
use crate::error::LoyaltyResult;

/// What a role screen renders
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Request in flight
    Loading,
    Ready(T),
    /// Message shown in place of the data
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    /// Settle a capability call; errors are logged and reduced to their
    /// screen message
    pub fn from_result(result: LoyaltyResult<T>, capability: Capability) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(e) => {
                e.log();
                ViewState::Failed(e.screen_message(capability))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Ready(value) => ViewState::Ready(f(value)),
            ViewState::Failed(message) => ViewState::Failed(message),
        }
    }
}
