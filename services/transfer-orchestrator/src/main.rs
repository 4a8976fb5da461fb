use anyhow::Context;
use clap::{Parser, Subcommand};
use pix_types::numeric::Amount;
use pix_types::report::{BlockedTransactionContext, FraudReportForm};
use pix_types::transfer::PixKey;
use std::sync::Arc;
use transfer_orchestrator::{
    AppState, FraudReporter, HttpPixApi, OrchestratorConfig, PixApi, Presenter, TracingPresenter,
    TransferOrchestrator,
};

/// PIX transfer client with pre-transaction fraud analysis
#[derive(Parser, Debug)]
#[command(name = "pix-transfer")]
#[command(version)]
#[command(about = "Send PIX transfers through the fraud analysis flow", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse and send a transfer
    Transfer {
        /// Destination PIX key
        key: String,
        /// Amount in BRL (`50`, `12.5`, `12,50`)
        amount: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Report a blocked transfer as fraud
    Report {
        /// Scam type code from the catalog (`OUT001`, ...)
        scam_code: String,
        /// Destination PIX key of the blocked transfer
        key: String,
        /// Amount of the blocked transfer
        amount: String,
        /// What happened, at least 20 characters
        description: String,
        /// How the scammer reached you; repeatable
        #[arg(short, long = "contact")]
        contacts: Vec<String>,
    },
    /// List the reportable scam types
    Catalog,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = OrchestratorConfig::from_env().context("reading PIX_* configuration")?;
    tracing::info!(api = %config.api_base_url, "Starting PIX transfer client");

    let api: Arc<dyn PixApi> = Arc::new(HttpPixApi::new(config.api_base_url.clone()));
    let presenter: Arc<dyn Presenter> = Arc::new(TracingPresenter);
    let state = Arc::new(AppState::new(config.initial_security_score));

    match args.command {
        Command::Transfer {
            key,
            amount,
            description,
        } => {
            let orchestrator = TransferOrchestrator::new(api, presenter, state.clone(), config);
            let outcome = orchestrator.submit_form(&key, &amount, &description).await;
            tracing::debug!(?outcome, "Transfer finished");
        }
        Command::Report {
            scam_code,
            key,
            amount,
            description,
            contacts,
        } => {
            let amount = Amount::parse(&amount).context("invalid amount")?;
            let reporter = FraudReporter::new(api, presenter, state.clone(), config);
            reporter.load_scam_catalog().await;
            let form = FraudReportForm {
                scam_type_code: scam_code,
                description,
                contact_methods: contacts,
                context: BlockedTransactionContext {
                    destination_key: PixKey::new(key),
                    amount,
                    description: None,
                },
            };
            let outcome = reporter.submit_report(form).await;
            tracing::debug!(?outcome, "Report finished");
        }
        Command::Catalog => {
            let reporter = FraudReporter::new(api, presenter, state.clone(), config);
            let catalog = reporter.load_scam_catalog().await;
            for category in catalog.categories.values() {
                println!("{} {}", category.emoji, category.name);
                for scam in &category.types {
                    println!(
                        "  {:<8} {} ({:?}, ~{}h)",
                        scam.code,
                        scam.name,
                        scam.severity,
                        scam.severity.analysis_hours()
                    );
                }
            }
        }
    }

    let score = state.security_score();
    println!("Security score: {score} ({:?})", score.band());
    Ok(())
}
