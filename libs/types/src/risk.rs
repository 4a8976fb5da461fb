//! Pre-transaction risk assessment
//!
//! The analysis endpoint classifies a transfer into one of five risk actions.
//! `RiskAssessment` is the parsed classification; `RiskVerdict` is the tagged
//! union the orchestrator branches on, carrying exactly the data each branch
//! needs.

use crate::score::SecurityScore;
use serde::{Deserialize, Serialize};

/// Coarse risk level reported alongside the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    LOW,
    MEDIUM,
    HIGH,
}

impl RiskLevel {
    /// Parse the server's decorated label (`"🟢 BAIXO"`, `"🔴 CRÍTICO"`, ...).
    ///
    /// CRÍTICO and ALTO both map to HIGH. Unknown labels map to MEDIUM.
    pub fn from_label(label: &str) -> Self {
        let upper = label.to_uppercase();
        if upper.contains("CRÍTICO") || upper.contains("CRITICO") || upper.contains("ALTO") || upper.contains("HIGH") {
            RiskLevel::HIGH
        } else if upper.contains("BAIXO") || upper.contains("LOW") {
            RiskLevel::LOW
        } else {
            RiskLevel::MEDIUM
        }
    }
}

/// Handling policy chosen by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskAction {
    #[serde(rename = "APROVAR")]
    Approve,
    #[serde(rename = "MONITORAR")]
    Monitor,
    #[serde(rename = "APROVAR_MANUAL")]
    ManualApproval,
    #[serde(rename = "SUSPENDER")]
    Suspend,
    #[serde(rename = "BLOQUEAR")]
    Block,
}

impl RiskAction {
    /// Parse the wire `acao`. Anything unrecognised (or absent) approves.
    pub fn from_wire(action: Option<&str>) -> Self {
        match action.map(str::trim) {
            Some("BLOQUEAR") => RiskAction::Block,
            Some("SUSPENDER") => RiskAction::Suspend,
            Some("APROVAR_MANUAL") => RiskAction::ManualApproval,
            Some("MONITORAR") => RiskAction::Monitor,
            _ => RiskAction::Approve,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            RiskAction::Approve => "APROVAR",
            RiskAction::Monitor => "MONITORAR",
            RiskAction::ManualApproval => "APROVAR_MANUAL",
            RiskAction::Suspend => "SUSPENDER",
            RiskAction::Block => "BLOQUEAR",
        }
    }
}

/// Parsed pre-transaction analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: SecurityScore,
    pub risk_level: RiskLevel,
    pub action: RiskAction,
    pub allowed: bool,
    pub risk_factors: Vec<String>,
    pub block_reason: Option<String>,
    pub recommendations: Vec<String>,
}

/// Details shown when a transfer is stopped before processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escalation {
    pub score: SecurityScore,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub reason: Option<String>,
    pub recommendations: Vec<String>,
}

/// Details carried forward when a transfer proceeds to processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clearance {
    pub score: SecurityScore,
    pub risk_level: RiskLevel,
    pub action: RiskAction,
}

/// One branch per risk action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RiskVerdict {
    Block(Escalation),
    Suspend(Escalation),
    ManualApproval(Escalation),
    Monitor(Clearance),
    Approve(Clearance),
}

impl RiskVerdict {
    /// Whether the verdict lets the transfer reach the processing endpoint
    pub fn proceeds(&self) -> bool {
        matches!(self, RiskVerdict::Monitor(_) | RiskVerdict::Approve(_))
    }

    pub fn score(&self) -> SecurityScore {
        match self {
            RiskVerdict::Block(e) | RiskVerdict::Suspend(e) | RiskVerdict::ManualApproval(e) => e.score,
            RiskVerdict::Monitor(c) | RiskVerdict::Approve(c) => c.score,
        }
    }
}

impl RiskAssessment {
    /// Consume the assessment into the branch the client must take.
    ///
    /// A BLOCK action or any disallowed assessment is a block, whatever the
    /// action. SUSPEND and MANUAL_APPROVAL branches only apply when allowed.
    pub fn into_verdict(self) -> RiskVerdict {
        let blocks = self.action == RiskAction::Block || !self.allowed;

        if blocks {
            let risk_factors = if self.risk_factors.is_empty() {
                default_block_factors(self.score)
            } else {
                self.risk_factors
            };
            return RiskVerdict::Block(Escalation {
                score: self.score,
                risk_level: self.risk_level,
                risk_factors,
                reason: self.block_reason,
                recommendations: self.recommendations,
            });
        }

        let clearance = Clearance {
            score: self.score,
            risk_level: self.risk_level,
            action: self.action,
        };
        let escalation = || Escalation {
            score: self.score,
            risk_level: self.risk_level,
            risk_factors: self.risk_factors.clone(),
            reason: self.block_reason.clone(),
            recommendations: self.recommendations.clone(),
        };

        match self.action {
            RiskAction::Suspend => RiskVerdict::Suspend(escalation()),
            RiskAction::ManualApproval => RiskVerdict::ManualApproval(escalation()),
            RiskAction::Monitor => RiskVerdict::Monitor(clearance),
            RiskAction::Approve | RiskAction::Block => RiskVerdict::Approve(clearance),
        }
    }
}

/// Factors shown for a block when the server sent none
pub fn default_block_factors(score: SecurityScore) -> Vec<String> {
    vec![
        format!("Critical score: {score}"),
        "High fraud risk detected".to_string(),
        "Transaction blocked automatically".to_string(),
    ]
}
