//! HTTP loyalty gateway
//!
//! Every capability call is an authenticated JSON request through
//! [`ApiClient::send_json`]; the bearer token and `loggedId` are read from the
//! credential store at call time.

use platform::storage::keys;
use platform::{ApiClient, CancellationToken, KeyValueStore, Method};
use serde_json::Value;

use crate::domain::capability::{Endpoint, HttpMethod};
use crate::domain::repository::LoyaltyGateway;
use crate::error::LoyaltyResult;

/// Loyalty gateway backed by the REST API
pub struct HttpLoyaltyGateway<S>
where
    S: KeyValueStore,
{
    api: ApiClient<S>,
}

impl<S> HttpLoyaltyGateway<S>
where
    S: KeyValueStore + Sync,
{
    pub fn new(api: ApiClient<S>) -> Self {
        Self { api }
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

/// Decode a reply body; blank bodies read as `null`
fn decode_body(body: &[u8]) -> LoyaltyResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

impl<S> LoyaltyGateway for HttpLoyaltyGateway<S>
where
    S: KeyValueStore + Sync,
{
    async fn call(
        &self,
        endpoint: &Endpoint,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> LoyaltyResult<Value> {
        let response = self
            .api
            .send_json(method(endpoint.method), &endpoint.path, body.as_ref(), cancel)
            .await?;
        decode_body(&response.body)
    }

    async fn logged_id(&self) -> Option<String> {
        self.api.store().get(keys::LOGGED_ID).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_body_is_null() {
        assert_eq!(decode_body(b"").unwrap(), Value::Null);
        assert_eq!(decode_body(b" \n").unwrap(), Value::Null);
        assert_eq!(decode_body(br#"{"a":1}"#).unwrap()["a"], 1);
        assert!(decode_body(b"<html>").is_err());
    }
}
