//! Scenario tests for the session crate
//! Login / logout lifecycle, guard decisions, and the HTTP round trip

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use platform::{ApiError, CancellationToken, MemoryStore};
    use tokio::sync::Notify;

    use crate::application::config::SessionConfig;
    use crate::application::manager::SessionManager;
    use crate::domain::entity::credentials::{Credentials, Registration};
    use crate::domain::entity::session::LoginGrant;
    use crate::domain::repository::AuthGateway;
    use crate::domain::value_object::role::Role;
    use crate::error::{SessionError, SessionResult};
    use crate::infra::store::StoreSessionRepository;

    #[derive(Clone)]
    pub enum Reply {
        Grant(LoginGrant),
        Status(u16),
        /// Never answers; resolves only through cancellation
        Hang,
    }

    pub struct FakeGateway {
        reply: Reply,
        pub calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl FakeGateway {
        pub fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        /// Replies only after the returned handle is notified
        pub fn gated(reply: Reply) -> (Self, Arc<Notify>) {
            let gate = Arc::new(Notify::new());
            let gateway = Self {
                gate: Some(gate.clone()),
                ..Self::new(reply)
            };
            (gateway, gate)
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn answer(&self, cancel: &CancellationToken) -> SessionResult<LoginGrant> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.reply {
                Reply::Grant(grant) => Ok(grant.clone()),
                Reply::Status(status) => Err(SessionError::Api(ApiError::Status {
                    status: *status,
                    body: "Invalid password".into(),
                })),
                Reply::Hang => {
                    cancel.cancelled().await;
                    Err(SessionError::Api(ApiError::Cancelled))
                }
            }
        }
    }

    impl AuthGateway for FakeGateway {
        async fn login(
            &self,
            _role: Role,
            _credentials: &Credentials,
            cancel: &CancellationToken,
        ) -> SessionResult<LoginGrant> {
            self.answer(cancel).await
        }

        async fn register(
            &self,
            _role: Role,
            _registration: &Registration,
            cancel: &CancellationToken,
        ) -> SessionResult<LoginGrant> {
            self.answer(cancel).await
        }
    }

    pub type Repo = StoreSessionRepository<MemoryStore>;
    pub type Manager = SessionManager<Repo, FakeGateway>;

    pub struct Harness {
        pub store: Arc<MemoryStore>,
        pub repo: Arc<Repo>,
        pub gateway: Arc<FakeGateway>,
        pub manager: Arc<Manager>,
    }

    impl Harness {
        pub fn new(gateway: FakeGateway) -> Self {
            Self::with_store(gateway, MemoryStore::new())
        }

        pub fn with_store(gateway: FakeGateway, store: MemoryStore) -> Self {
            let store = Arc::new(store);
            let repo = Arc::new(StoreSessionRepository::new(store.clone()));
            let gateway = Arc::new(gateway);
            let manager = Arc::new(SessionManager::new(
                repo.clone(),
                gateway.clone(),
                Arc::new(SessionConfig::default()),
            ));
            Self {
                store,
                repo,
                gateway,
                manager,
            }
        }
    }

    pub fn grant(token: Option<&str>, id: Option<&str>, role: Option<&str>) -> LoginGrant {
        LoginGrant {
            status: 200,
            token: token.map(str::to_string),
            user_id: id.map(str::to_string),
            role: role.map(str::to_string),
            message: None,
        }
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use super::support::*;
    use crate::domain::entity::auth_state::{AuthPhase, AuthState};
    use crate::domain::value_object::role::Role;
    use crate::error::{
        INCOMPLETE_GRANT_MESSAGE, INVALID_CREDENTIALS_MESSAGE, SessionError,
        UNEXPECTED_STATUS_MESSAGE,
    };
    use platform::storage::keys;
    use platform::{CancellationToken, KeyValueStore, MemoryStore};

    #[tokio::test]
    async fn test_login_persists_backend_role() {
        let h = Harness::new(FakeGateway::new(Reply::Grant(grant(
            Some("abc"),
            Some("u1"),
            Some("user"),
        ))));

        let output = h
            .manager
            .login("a@b.com", "pw", Role::User, &CancellationToken::new())
            .await
            .unwrap();

        assert!(!output.role_mismatch());
        assert_eq!(h.store.get(keys::TOKEN).await.as_deref(), Some("abc"));
        assert_eq!(h.store.get(keys::LOGGED_ID).await.as_deref(), Some("u1"));
        assert_eq!(h.store.get(keys::ROLE).await.as_deref(), Some("user"));

        let state = h.manager.state();
        assert_eq!(state.phase(), AuthPhase::Authenticated(Some(Role::User)));
        assert_eq!(state.username.as_deref(), Some("a@b.com"));
        assert!(state.attempted_login);
    }

    #[tokio::test]
    async fn test_login_role_mismatch_is_flagged() {
        // Retailer selected, backend says user: the backend role is stored
        let h = Harness::new(FakeGateway::new(Reply::Grant(grant(
            Some("abc"),
            Some("u1"),
            Some("user"),
        ))));

        let output = h
            .manager
            .login("a@b.com", "pw", Role::Retailer, &CancellationToken::new())
            .await
            .unwrap();

        assert!(output.role_mismatch());
        assert_eq!(output.requested_role, Role::Retailer);
        assert_eq!(output.granted_role(), Some(Role::User));
        assert_eq!(h.store.get(keys::ROLE).await.as_deref(), Some("user"));
        assert_eq!(h.manager.state().role, Some(Role::User));
    }

    #[tokio::test]
    async fn test_partial_response_writes_nothing() {
        let h = Harness::new(FakeGateway::new(Reply::Grant(grant(
            None,
            Some("x"),
            Some("user"),
        ))));

        let err = h
            .manager
            .login("a@b.com", "pw", Role::User, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::IncompleteGrant));
        assert!(h.store.is_empty().await);
        assert_eq!(
            h.manager.state().phase(),
            AuthPhase::Failed(INCOMPLETE_GRANT_MESSAGE.into())
        );
    }

    #[tokio::test]
    async fn test_missing_id_is_partial_too() {
        let h = Harness::new(FakeGateway::new(Reply::Grant(grant(
            Some("abc"),
            None,
            Some("user"),
        ))));

        let result = h
            .manager
            .login("a@b.com", "pw", Role::User, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(SessionError::IncompleteGrant)));
        assert_eq!(h.store.get(keys::TOKEN).await, None);
    }

    #[tokio::test]
    async fn test_non_200_success_status() {
        let mut reply = grant(Some("abc"), Some("u1"), Some("user"));
        reply.status = 201;
        let h = Harness::new(FakeGateway::new(Reply::Grant(reply)));

        let result = h
            .manager
            .login("a@b.com", "pw", Role::User, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(SessionError::UnexpectedStatus(201))));
        assert!(h.store.is_empty().await);
        assert_eq!(
            h.manager.state().error.as_deref(),
            Some(UNEXPECTED_STATUS_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_rejected_login_uses_generic_message() {
        let h = Harness::new(FakeGateway::new(Reply::Status(401)));

        let result = h
            .manager
            .login("a@b.com", "wrong", Role::Manufacturer, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
        let state = h.manager.state();
        assert_eq!(state.authenticated, Some(false));
        assert!(state.attempted_login);
        // Backend body is not surfaced
        assert_eq!(state.error.as_deref(), Some(INVALID_CREDENTIALS_MESSAGE));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_backend() {
        let h = Harness::new(FakeGateway::new(Reply::Status(500)));

        let result = h
            .manager
            .login("   ", "pw", Role::User, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(SessionError::Validation(_))));
        assert_eq!(h.gateway.call_count(), 0);
        assert!(h.manager.state().has_failed_attempt());
    }

    #[tokio::test]
    async fn test_logout_twice_is_clean() {
        let h = Harness::new(FakeGateway::new(Reply::Grant(grant(
            Some("abc"),
            Some("u1"),
            Some("retailer"),
        ))));
        h.manager
            .login("a@b.com", "pw", Role::Retailer, &CancellationToken::new())
            .await
            .unwrap();

        h.manager.logout().await.unwrap();
        assert!(h.store.is_empty().await);
        h.manager.logout().await.unwrap();
        assert!(h.store.is_empty().await);

        let state = h.manager.state();
        assert_eq!(state, AuthState::signed_out());
        assert!(!state.attempted_login);
    }

    #[tokio::test]
    async fn test_clear_storage_wipes_everything() {
        let store = MemoryStore::with_entries([
            (keys::TOKEN, "t"),
            (keys::ROLE, "retailer"),
            ("draftInvoice", "INV-9"),
        ]);
        let h = Harness::with_store(FakeGateway::new(Reply::Status(500)), store);

        h.manager.clear_storage().await.unwrap();

        assert!(h.store.is_empty().await);
        assert_eq!(h.manager.state(), AuthState::signed_out());
    }

    #[tokio::test]
    async fn test_second_login_while_in_flight_is_refused() {
        let (gateway, gate) = FakeGateway::gated(Reply::Grant(grant(
            Some("abc"),
            Some("u1"),
            Some("user"),
        )));
        let h = Harness::new(gateway);
        let mut states = h.manager.subscribe();

        let manager = h.manager.clone();
        let first = tokio::spawn(async move {
            manager
                .login("a@b.com", "pw", Role::User, &CancellationToken::new())
                .await
        });

        states
            .wait_for(|s| s.phase() == AuthPhase::Authenticating)
            .await
            .unwrap();

        let second = h
            .manager
            .login("a@b.com", "pw", Role::User, &CancellationToken::new())
            .await;
        assert!(matches!(second, Err(SessionError::LoginInProgress)));
        assert_eq!(h.manager.state().phase(), AuthPhase::Authenticating);

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(h.gateway.call_count(), 1);
        assert!(h.manager.state().is_authenticated());
    }

    #[tokio::test]
    async fn test_cancelled_login_restores_previous_state() {
        let h = Harness::new(FakeGateway::new(Reply::Hang));
        let mut states = h.manager.subscribe();
        let cancel = CancellationToken::new();

        let manager = h.manager.clone();
        let token = cancel.clone();
        let attempt = tokio::spawn(async move {
            manager.login("a@b.com", "pw", Role::User, &token).await
        });

        states
            .wait_for(|s| s.phase() == AuthPhase::Authenticating)
            .await
            .unwrap();
        cancel.cancel();

        let result = attempt.await.unwrap();
        assert!(matches!(result, Err(SessionError::Cancelled)));
        assert_eq!(h.manager.state(), AuthState::default());
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_restore_reads_store() {
        let store = MemoryStore::with_entries([
            (keys::TOKEN, "t"),
            (keys::LOGGED_ID, "r1"),
            (keys::ROLE, "retailer"),
        ]);
        let h = Harness::with_store(FakeGateway::new(Reply::Status(500)), store);
        assert_eq!(h.manager.state().authenticated, None);

        let state = h.manager.restore().await;
        assert_eq!(state, AuthState::restored(Some(Role::Retailer)));
        assert!(!state.attempted_login);

        let empty = Harness::new(FakeGateway::new(Reply::Status(500)));
        assert_eq!(empty.manager.restore().await, AuthState::signed_out());
    }
}

#[cfg(test)]
mod registration_tests {
    use super::support::*;
    use crate::domain::value_object::role::Role;
    use crate::error::SessionError;
    use platform::storage::keys;
    use platform::{CancellationToken, KeyValueStore};

    #[tokio::test]
    async fn test_manufacturer_cannot_register() {
        let h = Harness::new(FakeGateway::new(Reply::Status(500)));
        let result = h
            .manager
            .register(
                "Acme Pipes",
                "Pune",
                "pw",
                "9876543210",
                Role::Manufacturer,
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            result,
            Err(SessionError::RegistrationNotAllowed(Role::Manufacturer))
        ));
        assert_eq!(h.gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_register_with_grant_signs_in() {
        let h = Harness::new(FakeGateway::new(Reply::Grant(grant(
            Some("tok"),
            Some("p7"),
            Some("user"),
        ))));

        let output = h
            .manager
            .register(
                "Ravi",
                "Pune",
                "pw",
                "9876543210",
                Role::User,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(output.session.is_some());
        assert_eq!(output.message, "Account created successfully");
        assert_eq!(h.store.get(keys::LOGGED_ID).await.as_deref(), Some("p7"));
        assert!(h.manager.state().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_without_grant_stays_signed_out() {
        let h = Harness::new(FakeGateway::new(Reply::Grant(grant(None, None, None))));

        let output = h
            .manager
            .register(
                "Ravi",
                "Pune",
                "pw",
                "9876543210",
                Role::Retailer,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(output.session.is_none());
        assert!(h.store.is_empty().await);
        assert_eq!(h.manager.state().authenticated, None);
    }

    #[tokio::test]
    async fn test_register_validates_phone_first() {
        let h = Harness::new(FakeGateway::new(Reply::Status(500)));
        let result = h
            .manager
            .register(
                "Ravi",
                "Pune",
                "pw",
                "12345",
                Role::User,
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::Validation(_))));
        assert_eq!(h.gateway.call_count(), 0);
    }
}

#[cfg(test)]
mod guard_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::support::*;
    use crate::domain::entity::auth_state::AuthState;
    use crate::domain::value_object::role::Role;
    use crate::infra::store::StoreSessionRepository;
    use crate::presentation::guard::{GuardDecision, Navigator, RouterGuard, ScreenGroup};
    use platform::storage::keys;
    use platform::{CancellationToken, MemoryStore};
    use tokio::sync::mpsc;

    struct ChannelNavigator(mpsc::UnboundedSender<ScreenGroup>);

    impl Navigator for ChannelNavigator {
        fn navigate(&mut self, group: ScreenGroup) {
            let _ = self.0.send(group);
        }
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<ScreenGroup>) -> ScreenGroup {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_store_with_retailer_session_routes_to_retailer() {
        let store = Arc::new(MemoryStore::with_entries([
            (keys::TOKEN, "t"),
            (keys::ROLE, "retailer"),
        ]));
        let guard = RouterGuard::new(Arc::new(StoreSessionRepository::new(store)));

        assert_eq!(
            guard.evaluate(&AuthState::default()).await,
            GuardDecision::Redirect(ScreenGroup::Retailer)
        );
    }

    #[tokio::test]
    async fn test_empty_store_routes_to_login() {
        let guard = RouterGuard::new(Arc::new(StoreSessionRepository::new(Arc::new(
            MemoryStore::new(),
        ))));

        let state = AuthState::default();
        assert!(!state.attempted_login);
        assert_eq!(
            guard.evaluate(&state).await,
            GuardDecision::Redirect(ScreenGroup::Public)
        );
    }

    #[tokio::test]
    async fn test_failed_attempt_keeps_login_screen() {
        let h = Harness::new(FakeGateway::new(Reply::Status(401)));
        let _ = h
            .manager
            .login("a@b.com", "bad", Role::User, &CancellationToken::new())
            .await;

        let guard = RouterGuard::new(h.repo.clone());
        let state = h.manager.state();
        assert!(state.attempted_login);
        assert_eq!(state.authenticated, Some(false));
        assert_eq!(guard.evaluate(&state).await, GuardDecision::Stay);
    }

    #[tokio::test]
    async fn test_guard_follows_login_and_logout() {
        let h = Harness::new(FakeGateway::new(Reply::Grant(grant(
            Some("abc"),
            Some("m1"),
            Some("manufacturer"),
        ))));
        let guard = RouterGuard::new(h.repo.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let task = {
            let guard = guard.clone();
            let states = h.manager.subscribe();
            let shutdown = shutdown.clone();
            tokio::spawn(async move { guard.run(states, ChannelNavigator(tx), shutdown).await })
        };

        assert_eq!(next(&mut rx).await, ScreenGroup::Public);

        h.manager
            .login("m@acme.com", "pw", Role::Manufacturer, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(next(&mut rx).await, ScreenGroup::Manufacturer);

        h.manager.logout().await.unwrap();
        assert_eq!(next(&mut rx).await, ScreenGroup::Public);

        shutdown.cancel();
        task.await.unwrap();
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use crate::application::config::SessionConfig;
    use crate::application::manager::SessionManager;
    use crate::domain::entity::auth_state::AuthState;
    use crate::domain::value_object::role::Role;
    use crate::error::SessionError;
    use crate::infra::http::HttpAuthGateway;
    use crate::infra::store::StoreSessionRepository;
    use crate::presentation::guard::{GuardDecision, RouterGuard, ScreenGroup};
    use platform::storage::keys;
    use platform::{ApiClient, BackendConfig, CancellationToken, KeyValueStore, MemoryStore};

    async fn users_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body == json!({ "email": "a@b.com", "password": "pw" }) {
            (
                StatusCode::OK,
                Json(json!({ "token": "abc", "id": "u1", "role": "user" })),
            )
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid credentials" })),
            )
        }
    }

    async fn retailer_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["email"] == "Ravi.Kumar@Example.com" {
            (
                StatusCode::OK,
                Json(json!({ "token": "rt", "id": "r1", "role": "retailer" })),
            )
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": format!("Unknown account {}", body["email"]) })),
            )
        }
    }

    async fn retailer_register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["phone"] == "9999999999" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Phone already registered" })),
            );
        }
        (StatusCode::OK, Json(json!({ "message": "created" })))
    }

    async fn spawn_backend() -> String {
        let router = Router::new()
            .route("/api/users/login", post(users_login))
            .route("/api/retailer/login", post(retailer_login))
            .route("/api/retailer/register", post(retailer_register));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    type HttpManager =
        SessionManager<StoreSessionRepository<MemoryStore>, HttpAuthGateway<MemoryStore>>;

    fn stack(
        base: &str,
    ) -> (
        Arc<MemoryStore>,
        Arc<StoreSessionRepository<MemoryStore>>,
        HttpManager,
    ) {
        let store = Arc::new(MemoryStore::new());
        let config = Arc::new(SessionConfig::default());
        let api = ApiClient::new(Arc::new(BackendConfig::new(base)), store.clone()).unwrap();
        let repo = Arc::new(StoreSessionRepository::new(store.clone()));
        let gateway = Arc::new(HttpAuthGateway::new(api, config.clone()));
        let manager = SessionManager::new(repo.clone(), gateway, config);
        (store, repo, manager)
    }

    #[tokio::test]
    async fn test_end_to_end_user_login() {
        let base = spawn_backend().await;
        let (store, repo, manager) = stack(&base);

        manager
            .login("a@b.com", "pw", Role::User, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(store.get(keys::TOKEN).await.as_deref(), Some("abc"));
        assert_eq!(store.get(keys::LOGGED_ID).await.as_deref(), Some("u1"));
        assert_eq!(store.get(keys::ROLE).await.as_deref(), Some("user"));

        let guard = RouterGuard::new(repo);
        assert_eq!(
            guard.evaluate(&manager.state()).await,
            GuardDecision::Redirect(ScreenGroup::User)
        );
    }

    #[tokio::test]
    async fn test_identifier_sent_as_entered() {
        let base = spawn_backend().await;
        let (store, _repo, manager) = stack(&base);

        manager
            .login(
                "Ravi.Kumar@Example.com",
                "pw",
                Role::Retailer,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(store.get(keys::TOKEN).await.as_deref(), Some("rt"));
        assert_eq!(
            manager.state().username.as_deref(),
            Some("Ravi.Kumar@Example.com")
        );
    }

    #[tokio::test]
    async fn test_wrong_password_over_http() {
        let base = spawn_backend().await;
        let (store, _repo, manager) = stack(&base);

        let result = manager
            .login("a@b.com", "nope", Role::User, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
        assert!(store.is_empty().await);
        assert_eq!(
            manager.state(),
            AuthState::failed("Incorrect Email or Password or Select the role again")
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_generic_failure() {
        let (_store, _repo, manager) = stack("http://127.0.0.1:9");

        let result = manager
            .login("a@b.com", "pw", Role::Retailer, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
        assert!(manager.state().has_failed_attempt());
    }

    #[tokio::test]
    async fn test_registration_surfaces_backend_message() {
        let base = spawn_backend().await;
        let (_store, _repo, manager) = stack(&base);

        let err = manager
            .register(
                "Ravi Traders",
                "Pune",
                "pw",
                "9999999999",
                Role::Retailer,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Phone already registered");

        let ok = manager
            .register(
                "Ravi Traders",
                "Pune",
                "pw",
                "9876543210",
                Role::Retailer,
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert!(ok.session.is_none());
    }
}
