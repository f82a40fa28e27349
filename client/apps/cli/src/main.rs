//! Scatch CLI Entry Point
//!
//! Drives the client core against a real backend with the session kept in a
//! JSON file. Uses `anyhow` for startup errors; library errors are reported
//! through their user messages.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use loyalty::{CapabilityCatalog, HttpLoyaltyGateway, LoyaltyConfig, RoleScreens, ViewState};
use platform::{ApiClient, BackendConfig, CancellationToken, FileStore};
use session::domain::SessionRepository;
use session::{
    GuardDecision, HttpAuthGateway, Role, RouterGuard, SessionConfig, SessionManager,
    StoreSessionRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

type Manager = SessionManager<StoreSessionRepository<FileStore>, HttpAuthGateway<FileStore>>;

#[derive(Parser, Debug)]
#[command(name = "scatch", about = "Scatch loyalty client")]
struct Cli {
    /// Backend base URL (defaults to the build-time value)
    #[arg(long, env = "SCATCH_BACKEND_URL")]
    backend_url: Option<String>,

    /// Credential store file
    #[arg(long, env = "SCATCH_STORE", default_value = "scatch-session.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in for a role
    Login {
        #[arg(long, value_parser = parse_role)]
        role: Role,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SCATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Remove the session keys
    Logout,
    /// Remove every stored key
    ClearStorage,
    /// Print the screen group the guard would show
    Route,
    /// Print the stored session
    Whoami,
    /// Points balance of the signed-in account
    Points,
    /// KYC status of the signed-in account
    KycStatus,
    /// Upload a file through a pre-signed URL and print the object key
    Upload {
        file: PathBuf,
        #[arg(long, default_value = "application/octet-stream")]
        content_type: String,
    },
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|e| e.to_string())
}

struct App {
    api: ApiClient<FileStore>,
    repo: Arc<StoreSessionRepository<FileStore>>,
    manager: Manager,
}

impl App {
    fn new(cli: &Cli) -> anyhow::Result<Self> {
        let mut backend = BackendConfig::from_env();
        if let Some(url) = &cli.backend_url {
            backend = BackendConfig {
                base_url: url.trim_end_matches('/').to_string(),
                ..backend
            };
        }
        tracing::debug!(
            base_url = %backend.base_url,
            store = %cli.store.display(),
            "Client configured"
        );

        let store = Arc::new(FileStore::new(cli.store.clone()));
        let api = ApiClient::new(Arc::new(backend), store.clone())
            .context("failed to build HTTP client")?;
        let config = Arc::new(SessionConfig::default());
        let repo = Arc::new(StoreSessionRepository::new(store));
        let gateway = Arc::new(HttpAuthGateway::new(api.clone(), config.clone()));
        let manager = SessionManager::new(repo.clone(), gateway, config);

        Ok(Self { api, repo, manager })
    }

    /// Screens for the role in the store
    async fn screens(&self) -> anyhow::Result<RoleScreens<HttpLoyaltyGateway<FileStore>>> {
        let Some(role) = self.repo.load().await.known_role() else {
            bail!("Not signed in");
        };
        Ok(RoleScreens::new(
            role,
            Arc::new(HttpLoyaltyGateway::new(self.api.clone())),
            Arc::new(CapabilityCatalog::default()),
            Arc::new(LoyaltyConfig::default()),
        ))
    }
}

fn print_view<T>(state: ViewState<T>, render: impl FnOnce(T)) -> anyhow::Result<()> {
    match state {
        ViewState::Ready(value) => {
            render(value);
            Ok(())
        }
        ViewState::Failed(message) => bail!(message),
        ViewState::Loading => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scatch=info,session=info,loyalty=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let app = App::new(&cli)?;

    // Ctrl-C cancels whatever request is in flight
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    match cli.command {
        Command::Login {
            role,
            email,
            password,
        } => match app.manager.login(&email, password, role, &cancel).await {
            Ok(output) => {
                if output.role_mismatch() {
                    tracing::warn!(
                        requested = %output.requested_role,
                        granted = %output.session.role,
                        "Signed in with a different role than requested"
                    );
                }
                println!("Signed in as {} ({})", email, output.session.role);
            }
            Err(_) => {
                let message = app.manager.state().error.unwrap_or_default();
                bail!(message);
            }
        },
        Command::Logout => {
            app.manager.logout().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Signed out");
        }
        Command::ClearStorage => {
            app.manager
                .clear_storage()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Storage cleared");
        }
        Command::Route => {
            let state = app.manager.restore().await;
            let guard = RouterGuard::new(app.repo.clone());
            match guard.evaluate(&state).await {
                GuardDecision::Redirect(group) => println!("{}", group),
                GuardDecision::Stay => println!("stay"),
            }
        }
        Command::Whoami => {
            let stored = app.repo.load().await;
            if stored.is_empty() {
                println!("Not signed in");
            } else {
                println!(
                    "user id: {}\nrole: {}",
                    stored.user_id.as_deref().unwrap_or("-"),
                    stored.role.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Points => {
            let screens = app.screens().await?;
            let role = screens.role();
            print_view(screens.points(&cancel).await, |balance| {
                println!("name: {}", balance.name.as_deref().unwrap_or("-"));
                println!("received: {}", balance.points_received);
                println!("redeemed: {}", balance.points_redeemed);
                if role == Role::Retailer {
                    println!("sent: {}", balance.points_sent);
                }
                println!("available: {}", balance.available_for(role));
                if let Some(status) = balance.kyc_status {
                    println!("kyc: {}", status);
                }
            })?;
        }
        Command::KycStatus => {
            let screens = app.screens().await?;
            print_view(screens.kyc_status(&cancel).await, |report| {
                println!("{}", report.status);
                if let Some(comment) = report.comment {
                    println!("{}", comment);
                }
            })?;
        }
        Command::Upload { file, content_type } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let key = app
                .api
                .upload_file(&name, &content_type, bytes, &cancel)
                .await
                .map_err(|e| {
                    e.log();
                    anyhow::anyhow!(e.user_message())
                })?;
            println!("{}", key);
        }
    }

    Ok(())
}
