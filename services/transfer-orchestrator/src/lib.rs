//! PIX transfer risk client
//!
//! Runs the client side of the PIX transfer risk flow against the demo
//! backend's `/api/*` surface:
//! - `orchestrator`: pre-transaction analysis, verdict branching, processing
//! - `report`: fraud report submission and the scam-type catalog
//! - `state`: the session's security score and in-flight flag
//!
//! Nothing here renders UI. Screens, toasts and assistant messages are
//! `events::UiEvent`s handed to a `events::Presenter`.

pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod events;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod state;

pub use client::{HttpPixApi, PixApi};
pub use config::OrchestratorConfig;
pub use error::{ApiError, ConfigError, OrchestratorError};
pub use events::{Presenter, TracingPresenter, UiEvent};
pub use orchestrator::{TransferOrchestrator, TransferOutcome};
pub use report::{FraudReporter, ReportOutcome};
pub use state::AppState;
