//! Scam-type catalog and fraud report form

use crate::errors::ValidationError;
use crate::numeric::Amount;
use crate::transfer::PixKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum length of a report description, in characters
pub const REPORT_MIN_DESCRIPTION_CHARS: usize = 20;

/// Scam-type code used when the catalog cannot be loaded
pub const FALLBACK_SCAM_CODE: &str = "OUT001";

/// Severity of a scam type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScamSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ScamSeverity {
    /// Parse `"Crítica"`, `"ALTA"`, `"Média"`, `"BAIXA"` and friends
    pub fn from_label(label: &str) -> Self {
        let upper = label.trim().to_uppercase();
        match upper.as_str() {
            "CRÍTICA" | "CRITICA" | "CRITICAL" => ScamSeverity::Critical,
            "ALTA" | "HIGH" => ScamSeverity::High,
            "BAIXA" | "LOW" => ScamSeverity::Low,
            _ => ScamSeverity::Medium,
        }
    }

    /// Report priority derived from severity
    pub fn priority(&self) -> ReportPriority {
        match self {
            ScamSeverity::Critical => ReportPriority::Urgent,
            ScamSeverity::High => ReportPriority::High,
            ScamSeverity::Medium => ReportPriority::Medium,
            ScamSeverity::Low => ReportPriority::Low,
        }
    }

    /// Expected analysis time in hours
    pub fn analysis_hours(&self) -> u32 {
        match self {
            ScamSeverity::Critical => 2,
            ScamSeverity::High => 8,
            ScamSeverity::Medium => 24,
            ScamSeverity::Low => 48,
        }
    }
}

/// Handling priority of a filed report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportPriority {
    Urgent,
    High,
    Medium,
    Low,
}

/// One reportable scam type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamType {
    pub code: String,
    pub name: String,
    pub category: String,
    pub emoji: String,
    pub severity: ScamSeverity,
    pub description: String,
}

/// A named group of scam types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamCategory {
    pub name: String,
    pub emoji: String,
    pub types: Vec<ScamType>,
}

/// Scam types grouped by category key (`RELACIONAMENTO`, `FINANCEIRO`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScamCatalog {
    pub categories: BTreeMap<String, ScamCategory>,
}

impl ScamCatalog {
    pub fn new(categories: BTreeMap<String, ScamCategory>) -> Self {
        Self { categories }
    }

    /// Minimal catalog used when the server is unreachable
    pub fn fallback() -> Self {
        let other = ScamType {
            code: FALLBACK_SCAM_CODE.to_string(),
            name: "Outros".to_string(),
            category: "Outros".to_string(),
            emoji: "❓".to_string(),
            severity: ScamSeverity::Medium,
            description: String::new(),
        };
        let mut categories = BTreeMap::new();
        categories.insert(
            "OUTROS".to_string(),
            ScamCategory {
                name: "Outros".to_string(),
                emoji: "❓".to_string(),
                types: vec![other],
            },
        );
        Self { categories }
    }

    /// All scam types, category by category
    pub fn types(&self) -> impl Iterator<Item = &ScamType> {
        self.categories.values().flat_map(|c| c.types.iter())
    }

    pub fn find(&self, code: &str) -> Option<&ScamType> {
        self.types().find(|t| t.code == code)
    }

    pub fn len(&self) -> usize {
        self.types().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Transfer that was blocked and is now being reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedTransactionContext {
    pub destination_key: PixKey,
    pub amount: Amount,
    pub description: Option<String>,
}

/// Fraud report as filled in by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudReportForm {
    pub scam_type_code: String,
    pub description: String,
    pub contact_methods: Vec<String>,
    pub context: BlockedTransactionContext,
}

impl FraudReportForm {
    /// Local checks performed before anything is sent
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scam_type_code.trim().is_empty() {
            return Err(ValidationError::MissingScamType);
        }
        let actual = self.description.trim().chars().count();
        if actual < REPORT_MIN_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooShort {
                min: REPORT_MIN_DESCRIPTION_CHARS,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(code: &str, description: &str) -> FraudReportForm {
        FraudReportForm {
            scam_type_code: code.to_string(),
            description: description.to_string(),
            contact_methods: vec!["email".to_string()],
            context: BlockedTransactionContext {
                destination_key: PixKey::new("49650556474"),
                amount: Amount::parse("150").unwrap(),
                description: None,
            },
        }
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(ScamSeverity::from_label("Crítica"), ScamSeverity::Critical);
        assert_eq!(ScamSeverity::from_label("ALTA"), ScamSeverity::High);
        assert_eq!(ScamSeverity::from_label("Média"), ScamSeverity::Medium);
        assert_eq!(ScamSeverity::from_label("baixa"), ScamSeverity::Low);
        assert_eq!(ScamSeverity::Critical.priority(), ReportPriority::Urgent);
        assert_eq!(ScamSeverity::Low.analysis_hours(), 48);
    }

    #[test]
    fn test_fallback_catalog() {
        let catalog = ScamCatalog::fallback();
        assert_eq!(catalog.len(), 1);
        let other = catalog.find(FALLBACK_SCAM_CODE).unwrap();
        assert_eq!(other.name, "Outros");
        assert_eq!(other.severity, ScamSeverity::Medium);
    }

    #[test]
    fn test_form_requires_scam_type() {
        let f = form("  ", "a description that is long enough");
        assert_eq!(f.validate(), Err(ValidationError::MissingScamType));
    }

    #[test]
    fn test_form_rejects_short_description() {
        let f = form("SEQ001", "too short");
        assert_eq!(
            f.validate(),
            Err(ValidationError::DescriptionTooShort { min: 20, actual: 9 })
        );
    }

    #[test]
    fn test_form_counts_characters_not_bytes() {
        // 20 characters, more than 20 bytes
        let f = form("SEQ001", "ééééééééééééééééééé!");
        assert!(f.validate().is_ok());
    }
}
