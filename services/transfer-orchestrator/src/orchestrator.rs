//! Transfer Risk Orchestrator
//!
//! Drives one PIX transfer from form input to a terminal screen:
//! - local validation and the single in-flight slot
//! - pre-transaction risk analysis, branching on the server's risk action
//! - destination account resolution and processing
//! - reconciliation of the two scores into the session's security score
//!
//! Collaborator failures never escape. Each one ends as a notification or a
//! result screen, and a processing failure after a cleared analysis is shown
//! as a pending transfer rather than an error.

use crate::client::{PixApi, with_deadline};
use crate::config::OrchestratorConfig;
use crate::directory::AccountDirectory;
use crate::error::OrchestratorError;
use crate::events::{
    AssistantTone, BlockStage, BlockedView, NotificationLevel, Presenter, ReceiptView, UiEvent,
};
use crate::models::{
    ANALYSIS_PATH, AnalysisRequest, PROCESSING_PATH, ProcessRequest, ProcessResponse,
    format_timestamp,
};
use crate::state::AppState;
use chrono::{Local, Utc};
use pix_types::ids::TransactionId;
use pix_types::report::BlockedTransactionContext;
use pix_types::risk::{Clearance, Escalation, RiskAssessment, RiskVerdict};
use pix_types::score::SecurityScore;
use pix_types::transfer::{TransferRequest, TransferResult, TransferStatus};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Description sent for processing when the user left it blank
pub const DEFAULT_TRANSFER_DESCRIPTION: &str = "Transferência PIX";

/// Score displayed for a processing block that carries no score
const BLOCKED_FALLBACK_SCORE: i64 = 1;

const PENDING_MESSAGE: &str = "The transfer is being processed and may be delayed. \
Check your statement and confirm it within 10 minutes.";

/// Terminal branch of one `submit_transfer` run
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    /// Stopped before or during analysis. Nothing was processed.
    Rejected(OrchestratorError),
    Blocked {
        stage: BlockStage,
        score: SecurityScore,
        transaction_id: Option<TransactionId>,
    },
    Suspended { score: SecurityScore },
    ManualApprovalRequired { score: SecurityScore },
    Completed {
        transaction_id: TransactionId,
        score: SecurityScore,
    },
    /// Processing outcome unknown; shown optimistically as pending
    Pending {
        transaction_id: TransactionId,
        score: SecurityScore,
        cause: OrchestratorError,
    },
}

impl TransferOutcome {
    /// Whether a processing call was attempted
    pub fn reached_processing(&self) -> bool {
        matches!(
            self,
            TransferOutcome::Blocked {
                stage: BlockStage::Processing,
                ..
            } | TransferOutcome::Completed { .. }
                | TransferOutcome::Pending { .. }
        )
    }
}

pub struct TransferOrchestrator {
    api: Arc<dyn PixApi>,
    presenter: Arc<dyn Presenter>,
    state: Arc<AppState>,
    directory: AccountDirectory,
    config: OrchestratorConfig,
}

impl TransferOrchestrator {
    pub fn new(
        api: Arc<dyn PixApi>,
        presenter: Arc<dyn Presenter>,
        state: Arc<AppState>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            api,
            presenter,
            state,
            directory: AccountDirectory::default(),
            config,
        }
    }

    pub fn with_directory(mut self, directory: AccountDirectory) -> Self {
        self.directory = directory;
        self
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Parse raw form fields and submit them
    pub async fn submit_form(
        &self,
        destination_key: &str,
        amount: &str,
        description: &str,
    ) -> TransferOutcome {
        match TransferRequest::from_form(destination_key, amount, description) {
            Ok(request) => self.submit_transfer(request).await,
            Err(e) => self.reject(e.into()),
        }
    }

    /// Run the full analysis and processing flow for one transfer
    pub async fn submit_transfer(&self, request: TransferRequest) -> TransferOutcome {
        if let Err(e) = request.validate() {
            return self.reject(e.into());
        }
        let Some(_in_flight) = self.state.try_begin_transfer() else {
            return self.reject(OrchestratorError::TransferInFlight);
        };

        info!(
            destination = %request.destination_key,
            amount = %request.amount.to_wire_string(),
            "Starting PIX transfer"
        );
        self.present(UiEvent::assistant(
            AssistantTone::Info,
            "Let me check this transfer for signs of fraud before it goes out.",
        ));
        self.present(UiEvent::progress("Running security analysis"));
        let analysis = self.analyze(&request).await;
        self.present(UiEvent::ProgressFinished);

        let assessment = match analysis {
            Ok(assessment) => assessment,
            Err(e) => {
                error!(error = %e, "Pre-transaction analysis failed");
                self.present(UiEvent::notify(NotificationLevel::Error, e.to_string()));
                return TransferOutcome::Rejected(e);
            }
        };

        let action = assessment.action.wire_name();
        let allowed = assessment.allowed;
        let verdict = assessment.into_verdict();
        info!(
            score = verdict.score().value(),
            action,
            allowed,
            proceeds = verdict.proceeds(),
            "Risk assessment received"
        );

        match verdict {
            RiskVerdict::Block(escalation) => self.block_before_processing(&request, escalation),
            RiskVerdict::Suspend(escalation) => {
                let score = escalation.score;
                warn!(score = score.value(), "Transfer suspended for review");
                self.present(UiEvent::assistant(
                    AssistantTone::Warning,
                    "I put this transfer on hold. Our security team will review it.",
                ));
                self.present(UiEvent::TransferSuspended(escalation));
                self.present(UiEvent::TransferFormClosed);
                TransferOutcome::Suspended { score }
            }
            RiskVerdict::ManualApproval(escalation) => {
                let score = escalation.score;
                warn!(score = score.value(), "Transfer needs manual approval");
                self.present(UiEvent::assistant(
                    AssistantTone::Warning,
                    "This transfer needs a manual approval before it can go out.",
                ));
                self.present(UiEvent::ManualApprovalRequired(escalation));
                self.present(UiEvent::TransferFormClosed);
                TransferOutcome::ManualApprovalRequired { score }
            }
            RiskVerdict::Monitor(clearance) => {
                self.present(UiEvent::TransferApproved {
                    monitored: true,
                    score: clearance.score,
                });
                self.present(UiEvent::assistant(
                    AssistantTone::Warning,
                    "Approved, but I will keep an eye on this one.",
                ));
                self.present(UiEvent::progress("Processing with extra monitoring"));
                tokio::time::sleep(self.config.monitor_delay).await;
                self.present(UiEvent::ProgressFinished);
                self.process(&request, clearance).await
            }
            RiskVerdict::Approve(clearance) => {
                self.present(UiEvent::TransferApproved {
                    monitored: false,
                    score: clearance.score,
                });
                self.present(UiEvent::assistant(
                    AssistantTone::Success,
                    "All clear. Sending your transfer now.",
                ));
                self.process(&request, clearance).await
            }
        }
    }

    /// Simulated manual approval request for a transfer held for approval
    pub async fn request_manual_approval(&self) {
        info!("Manual approval requested");
        self.present(UiEvent::progress("Sending approval request"));
        tokio::time::sleep(self.config.manual_approval_delay).await;
        self.present(UiEvent::ProgressFinished);
        self.present(UiEvent::notify(
            NotificationLevel::Success,
            "Approval request sent. You will be notified within 2 hours.",
        ));
        self.present(UiEvent::assistant(
            AssistantTone::Success,
            "Request sent. I will let you know as soon as the team decides.",
        ));
    }

    async fn analyze(&self, request: &TransferRequest) -> Result<RiskAssessment, OrchestratorError> {
        let body = AnalysisRequest {
            chave_pix: request.destination_key.as_str().to_string(),
            valor: request.amount.to_wire_string(),
            descricao: request.description_or_empty().to_string(),
            conta_origem_id: self.config.source_account_id.as_str().to_string(),
        };

        with_deadline(
            ANALYSIS_PATH,
            self.config.analysis_timeout,
            self.api.analyze_pre_transaction(&body),
        )
        .await
        .map_err(|e| OrchestratorError::Analysis(e.to_string()))?
        .into_assessment()
    }

    fn block_before_processing(
        &self,
        request: &TransferRequest,
        escalation: Escalation,
    ) -> TransferOutcome {
        let score = escalation.score;
        warn!(
            score = score.value(),
            factors = ?escalation.risk_factors,
            "Transfer blocked by pre-transaction analysis"
        );

        self.present(UiEvent::assistant(
            AssistantTone::Blocked,
            "I blocked this transfer to protect you. It looks like a scam.",
        ));
        self.present(UiEvent::TransferBlocked(BlockedView {
            stage: BlockStage::PreAnalysis,
            score,
            risk_level: Some(escalation.risk_level),
            risk_factors: escalation.risk_factors,
            reason: escalation.reason,
            recommendations: escalation.recommendations,
            transaction_id: None,
            report_protocol: None,
            context: blocked_context(request),
        }));
        self.update_score(score);
        self.present(UiEvent::TransferFormClosed);

        TransferOutcome::Blocked {
            stage: BlockStage::PreAnalysis,
            score,
            transaction_id: None,
        }
    }

    async fn process(&self, request: &TransferRequest, clearance: Clearance) -> TransferOutcome {
        let destination = self.directory.resolve(&request.destination_key);
        let body = ProcessRequest {
            conta_origem_id: self.config.source_account_id.as_str().to_string(),
            conta_destino_id: destination.as_str().to_string(),
            valor: request.amount.to_wire_string(),
            descricao: request
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_TRANSFER_DESCRIPTION.to_string()),
        };
        info!(
            source = %body.conta_origem_id,
            destination = %body.conta_destino_id,
            "Processing transfer"
        );

        self.present(UiEvent::progress("Processing transfer"));
        let processed = with_deadline(
            PROCESSING_PATH,
            self.config.processing_timeout,
            self.api.process_transfer(&body),
        )
        .await
        .map_err(|e| OrchestratorError::ProcessingSoft(e.to_string()))
        .and_then(ProcessResponse::into_result);
        self.present(UiEvent::ProgressFinished);

        let outcome = match processed {
            Ok(result) if result.status == TransferStatus::Blocked => {
                self.block_at_processing(request, result)
            }
            Ok(result) => self.complete(request, result, clearance),
            Err(cause) => self.pending(request, clearance, cause),
        };
        self.present(UiEvent::TransferFormClosed);
        outcome
    }

    fn block_at_processing(
        &self,
        request: &TransferRequest,
        result: TransferResult,
    ) -> TransferOutcome {
        let score = result
            .score
            .unwrap_or(SecurityScore::new(BLOCKED_FALLBACK_SCORE));
        warn!(
            transaction_id = %result.transaction_id,
            score = score.value(),
            "Transfer blocked at processing"
        );

        self.present(UiEvent::assistant(
            AssistantTone::Blocked,
            "The bank stopped this transfer. You can report the recipient below.",
        ));
        self.present(UiEvent::TransferBlocked(BlockedView {
            stage: BlockStage::Processing,
            score,
            risk_level: None,
            risk_factors: Vec::new(),
            reason: None,
            recommendations: Vec::new(),
            transaction_id: Some(result.transaction_id.clone()),
            report_protocol: result.report_protocol,
            context: blocked_context(request),
        }));
        self.update_score(score);

        TransferOutcome::Blocked {
            stage: BlockStage::Processing,
            score,
            transaction_id: Some(result.transaction_id),
        }
    }

    fn complete(
        &self,
        request: &TransferRequest,
        result: TransferResult,
        clearance: Clearance,
    ) -> TransferOutcome {
        let score = result.score.unwrap_or(clearance.score);
        info!(
            transaction_id = %result.transaction_id,
            status = %result.raw_status,
            score = score.value(),
            "Transfer completed"
        );

        self.present(UiEvent::TransferCompleted(ReceiptView {
            transaction_id: result.transaction_id.clone(),
            amount: request.amount.to_string(),
            destination_key: request.destination_key.clone(),
            description: request.description.clone(),
            timestamp: format_timestamp(&result.timestamp),
            status: result.raw_status,
            score,
            message: None,
        }));
        self.present(UiEvent::notify(
            NotificationLevel::Success,
            format!("PIX of {} sent", request.amount),
        ));
        self.present(UiEvent::assistant(AssistantTone::Success, "Done! Your PIX was sent."));
        self.update_score(score);

        TransferOutcome::Completed {
            transaction_id: result.transaction_id,
            score,
        }
    }

    fn pending(
        &self,
        request: &TransferRequest,
        clearance: Clearance,
        cause: OrchestratorError,
    ) -> TransferOutcome {
        let transaction_id = TransactionId::local_fallback(Utc::now().timestamp_millis());
        let score = clearance.score;
        warn!(
            error = %cause,
            transaction_id = %transaction_id,
            "Processing unconfirmed, showing transfer as pending"
        );

        self.present(UiEvent::TransferPending(ReceiptView {
            transaction_id: transaction_id.clone(),
            amount: request.amount.to_string(),
            destination_key: request.destination_key.clone(),
            description: request.description.clone(),
            timestamp: format_timestamp(&Local::now().naive_local()),
            status: "PENDENTE".to_string(),
            score,
            message: Some(PENDING_MESSAGE.to_string()),
        }));
        self.present(UiEvent::assistant(
            AssistantTone::Info,
            "Your transfer is on its way but may take a little longer than usual.",
        ));
        self.update_score(score);

        TransferOutcome::Pending {
            transaction_id,
            score,
            cause,
        }
    }

    fn reject(&self, cause: OrchestratorError) -> TransferOutcome {
        warn!(error = %cause, "Transfer rejected");
        self.present(UiEvent::notify(NotificationLevel::Warning, cause.to_string()));
        TransferOutcome::Rejected(cause)
    }

    fn update_score(&self, score: SecurityScore) {
        self.state.set_security_score(score);
        self.present(UiEvent::score_changed(score));
    }

    fn present(&self, event: UiEvent) {
        self.presenter.present(event);
    }
}

fn blocked_context(request: &TransferRequest) -> BlockedTransactionContext {
    BlockedTransactionContext {
        destination_key: request.destination_key.clone(),
        amount: request.amount,
        description: request.description.clone(),
    }
}
