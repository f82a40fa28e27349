//! HTTP auth gateway
//!
//! Login and registration are the only unauthenticated calls the client
//! makes; both go through [`ApiClient::post_public`].

use std::sync::Arc;

use platform::{ApiClient, ApiError, CancellationToken, KeyValueStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::config::SessionConfig;
use crate::domain::entity::credentials::{Credentials, Registration};
use crate::domain::entity::session::LoginGrant;
use crate::domain::repository::AuthGateway;
use crate::domain::value_object::role::Role;
use crate::error::{SessionError, SessionResult};

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    place: &'a str,
    password: &'a str,
    phone: &'a str,
}

/// Reply shape shared by the login and register routes
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GrantBody {
    token: Option<String>,
    #[serde(alias = "_id", alias = "userId")]
    id: Option<Value>,
    role: Option<String>,
    message: Option<String>,
}

impl GrantBody {
    fn into_grant(self, status: u16) -> LoginGrant {
        LoginGrant {
            status,
            token: self.token,
            user_id: self.id.and_then(id_string),
            role: self.role,
            message: self.message,
        }
    }
}

/// Ids arrive as strings or numbers depending on the route
fn id_string(id: Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Human-readable text out of an error reply
pub(crate) fn rejection_message(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for field in ["message", "error", "msg"] {
            if let Some(text) = json.get(field).and_then(Value::as_str) {
                return text.to_string();
            }
        }
        if let Some(text) = json.as_str() {
            return text.to_string();
        }
    }

    let text = body.trim();
    if text.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        text.to_string()
    }
}

/// Auth gateway backed by the REST API
pub struct HttpAuthGateway<S>
where
    S: KeyValueStore,
{
    api: ApiClient<S>,
    config: Arc<SessionConfig>,
}

impl<S> HttpAuthGateway<S>
where
    S: KeyValueStore + Sync,
{
    pub fn new(api: ApiClient<S>, config: Arc<SessionConfig>) -> Self {
        Self { api, config }
    }

    fn decode(response: &platform::http::RawResponse) -> LoginGrant {
        let status = response.status.as_u16();
        match response.json::<GrantBody>() {
            Ok(body) => body.into_grant(status),
            Err(e) => {
                tracing::debug!(status = status, error = %e, "Auth reply is not a JSON object");
                LoginGrant {
                    status,
                    ..LoginGrant::default()
                }
            }
        }
    }
}

impl<S> AuthGateway for HttpAuthGateway<S>
where
    S: KeyValueStore + Sync,
{
    async fn login(
        &self,
        role: Role,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> SessionResult<LoginGrant> {
        let path = self.config.login_path(role);
        let body = LoginBody {
            email: credentials.identifier.as_str(),
            password: credentials.password.expose(),
        };

        tracing::debug!(role = %role, path = %path, "Submitting login");

        let response = self.api.post_public(&path, &body, cancel).await?;
        Ok(Self::decode(&response))
    }

    async fn register(
        &self,
        role: Role,
        registration: &Registration,
        cancel: &CancellationToken,
    ) -> SessionResult<LoginGrant> {
        let path = self.config.register_path(role);
        let body = RegisterBody {
            name: registration.name.as_str(),
            place: &registration.place,
            password: registration.password.expose(),
            phone: registration.phone.as_str(),
        };

        tracing::debug!(role = %role, path = %path, "Submitting registration");

        match self.api.post_public(&path, &body, cancel).await {
            Ok(response) => Ok(Self::decode(&response)),
            Err(ApiError::Status { status, body }) => {
                Err(SessionError::Rejected(rejection_message(&body, status)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
