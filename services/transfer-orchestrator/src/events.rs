//! UI events emitted by the transfer and report flows
//!
//! The flows never render anything. Every modal, toast, progress indicator
//! and assistant message is an `UiEvent` handed to a `Presenter`.

use pix_types::ids::{ProtocolNumber, TransactionId};
use pix_types::report::{BlockedTransactionContext, ReportPriority};
use pix_types::risk::{Escalation, RiskLevel};
use pix_types::score::{ScoreBand, SecurityScore};
use pix_types::transfer::PixKey;
use serde::Serialize;
use tracing::{error, info, warn};

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Short message shown as a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Mood of an assistant message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssistantTone {
    Info,
    Success,
    Warning,
    Blocked,
}

/// Where a transfer was stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockStage {
    /// Stopped by the pre-transaction analysis, nothing was sent for processing
    PreAnalysis,
    /// Stopped by the processing endpoint
    Processing,
}

/// Blocked-transfer screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockedView {
    pub stage: BlockStage,
    pub score: SecurityScore,
    pub risk_level: Option<RiskLevel>,
    pub risk_factors: Vec<String>,
    pub reason: Option<String>,
    pub recommendations: Vec<String>,
    pub transaction_id: Option<TransactionId>,
    pub report_protocol: Option<ProtocolNumber>,
    /// Lets the screen offer a fraud report for this transfer
    pub context: BlockedTransactionContext,
}

/// Receipt of a transfer that went through, or may still go through
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptView {
    pub transaction_id: TransactionId,
    pub amount: String,
    pub destination_key: PixKey,
    pub description: Option<String>,
    pub timestamp: String,
    pub status: String,
    pub score: SecurityScore,
    pub message: Option<String>,
}

/// Confirmation of a fraud report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportReceiptView {
    pub protocol: ProtocolNumber,
    pub scam_type_name: String,
    pub priority: Option<ReportPriority>,
    pub analysis_time: Option<String>,
    pub filed_at: Option<String>,
    /// `false` when the protocol was generated locally and awaits sync
    pub synced: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UiEvent {
    Notification(Notification),
    ProgressStarted { message: String },
    ProgressFinished,
    AssistantMessage { message: String, tone: AssistantTone },
    TransferBlocked(BlockedView),
    TransferSuspended(Escalation),
    ManualApprovalRequired(Escalation),
    TransferApproved { monitored: bool, score: SecurityScore },
    TransferCompleted(ReceiptView),
    TransferPending(ReceiptView),
    TransferFormClosed,
    SecurityScoreChanged { score: SecurityScore, band: ScoreBand },
    ReportFiled(ReportReceiptView),
}

impl UiEvent {
    pub fn notify(level: NotificationLevel, message: impl Into<String>) -> Self {
        UiEvent::Notification(Notification {
            level,
            message: message.into(),
        })
    }

    pub fn assistant(tone: AssistantTone, message: impl Into<String>) -> Self {
        UiEvent::AssistantMessage {
            message: message.into(),
            tone,
        }
    }

    pub fn progress(message: impl Into<String>) -> Self {
        UiEvent::ProgressStarted {
            message: message.into(),
        }
    }

    pub fn score_changed(score: SecurityScore) -> Self {
        UiEvent::SecurityScoreChanged {
            score,
            band: score.band(),
        }
    }
}

/// Sink for UI events
pub trait Presenter: Send + Sync {
    fn present(&self, event: UiEvent);
}

/// Presenter that writes every event to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn present(&self, event: UiEvent) {
        match event {
            UiEvent::Notification(Notification { level, message }) => match level {
                NotificationLevel::Error => error!(target: "ui", "{message}"),
                NotificationLevel::Warning => warn!(target: "ui", "{message}"),
                NotificationLevel::Info | NotificationLevel::Success => {
                    info!(target: "ui", "{message}")
                }
            },
            UiEvent::ProgressStarted { message } => info!(target: "ui", "⏳ {message}"),
            UiEvent::ProgressFinished => {}
            UiEvent::AssistantMessage { message, tone } => {
                info!(target: "ui", ?tone, "Bino: {message}")
            }
            UiEvent::TransferBlocked(view) => warn!(
                target: "ui",
                stage = ?view.stage,
                score = view.score.value(),
                transaction_id = ?view.transaction_id.as_ref().map(|t| t.as_str()),
                protocol = ?view.report_protocol.as_ref().map(|p| p.as_str()),
                factors = ?view.risk_factors,
                "Transfer blocked"
            ),
            UiEvent::TransferSuspended(review) => warn!(
                target: "ui",
                score = review.score.value(),
                factors = ?review.risk_factors,
                "Transfer suspended for manual review"
            ),
            UiEvent::ManualApprovalRequired(review) => warn!(
                target: "ui",
                score = review.score.value(),
                factors = ?review.risk_factors,
                "Transfer requires manual approval"
            ),
            UiEvent::TransferApproved { monitored, score } => {
                info!(target: "ui", monitored, score = score.value(), "Transfer approved")
            }
            UiEvent::TransferCompleted(receipt) => info!(
                target: "ui",
                transaction_id = %receipt.transaction_id,
                amount = %receipt.amount,
                destination = %receipt.destination_key,
                at = %receipt.timestamp,
                status = %receipt.status,
                "Transfer completed"
            ),
            UiEvent::TransferPending(receipt) => warn!(
                target: "ui",
                transaction_id = %receipt.transaction_id,
                amount = %receipt.amount,
                destination = %receipt.destination_key,
                message = receipt.message.as_deref().unwrap_or(""),
                "Transfer pending confirmation"
            ),
            UiEvent::TransferFormClosed => {}
            UiEvent::SecurityScoreChanged { score, band } => {
                info!(target: "ui", score = score.value(), ?band, "Security score updated")
            }
            UiEvent::ReportFiled(receipt) => info!(
                target: "ui",
                protocol = %receipt.protocol,
                scam_type = %receipt.scam_type_name,
                synced = receipt.synced,
                "{}",
                receipt.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_changed_carries_band() {
        assert_eq!(
            UiEvent::score_changed(SecurityScore::new(45)),
            UiEvent::SecurityScoreChanged {
                score: SecurityScore::new(45),
                band: ScoreBand::MediumRisk,
            }
        );
    }
}
