//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod logout;
pub mod manager;
pub mod register;

// Re-exports
pub use config::SessionConfig;
pub use login::{LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use manager::SessionManager;
pub use register::{RegisterOutput, RegisterUseCase};
