//! Transfer request and result types
//!
//! A `TransferRequest` is built from form input, validated, and consumed by
//! exactly one orchestration run. A `TransferResult` is what the processing
//! endpoint reports back.

use crate::errors::ValidationError;
use crate::ids::{ProtocolNumber, TransactionId};
use crate::numeric::Amount;
use crate::score::SecurityScore;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination PIX key as typed by the user (CPF, e-mail, phone, random key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixKey(String);

impl PixKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// CPF digits when the key is CPF-shaped.
    ///
    /// Accepts `ddd.ddd.ddd-dd` or eleven bare digits; any other key
    /// (e-mail, phone, random) yields `None`.
    pub fn cpf_digits(&self) -> Option<String> {
        let key = self.0.as_str();
        if key.len() == 11 && key.chars().all(|c| c.is_ascii_digit()) {
            return Some(key.to_string());
        }

        let bytes = key.as_bytes();
        let formatted = bytes.len() == 14
            && bytes[3] == b'.'
            && bytes[7] == b'.'
            && bytes[11] == b'-'
            && bytes
                .iter()
                .enumerate()
                .filter(|(i, _)| ![3, 7, 11].contains(i))
                .all(|(_, b)| b.is_ascii_digit());
        if formatted {
            return Some(key.chars().filter(|c| c.is_ascii_digit()).collect());
        }

        None
    }
}

impl fmt::Display for PixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A PIX transfer the user asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub destination_key: PixKey,
    pub amount: Amount,
    pub description: Option<String>,
}

impl TransferRequest {
    pub fn new(destination_key: PixKey, amount: Amount, description: Option<String>) -> Self {
        Self {
            destination_key,
            amount,
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }

    /// Build a request from raw form fields
    pub fn from_form(
        destination_key: &str,
        amount: &str,
        description: &str,
    ) -> Result<Self, ValidationError> {
        let key = PixKey::new(destination_key);
        if key.is_empty() {
            return Err(ValidationError::MissingDestinationKey);
        }
        let amount = Amount::parse(amount)?;
        Ok(Self::new(key, amount, Some(description.to_string())))
    }

    /// Re-check the invariants a request must hold before any network call
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.destination_key.is_empty() {
            return Err(ValidationError::MissingDestinationKey);
        }
        Amount::new(self.amount.as_decimal())?;
        Ok(())
    }

    /// Description as displayed, empty when none was given
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Terminal status of a processed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    /// Money moved (or was accepted for moving)
    Processed,
    /// Stopped by the server at processing time
    Blocked,
}

impl TransferStatus {
    /// Classify a wire status string. Only `BLOQUEADA` blocks.
    pub fn from_wire(status: &str) -> Self {
        if status.trim().eq_ignore_ascii_case("BLOQUEADA") {
            TransferStatus::Blocked
        } else {
            TransferStatus::Processed
        }
    }
}

/// Result reported by the processing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferResult {
    pub success: bool,
    pub transaction_id: TransactionId,
    pub status: TransferStatus,
    /// Status string exactly as the server sent it, for display
    pub raw_status: String,
    pub score: Option<SecurityScore>,
    pub timestamp: NaiveDateTime,
    pub report_protocol: Option<ProtocolNumber>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_digits_bare() {
        assert_eq!(
            PixKey::new("12345678901").cpf_digits(),
            Some("12345678901".to_string())
        );
    }

    #[test]
    fn test_cpf_digits_formatted() {
        assert_eq!(
            PixKey::new("123.456.789-01").cpf_digits(),
            Some("12345678901".to_string())
        );
    }

    #[test]
    fn test_cpf_digits_rejects_other_keys() {
        assert_eq!(PixKey::new("maria@example.com").cpf_digits(), None);
        assert_eq!(PixKey::new("+5511999998888").cpf_digits(), None);
        assert_eq!(PixKey::new("1234567890").cpf_digits(), None);
        assert_eq!(PixKey::new("123.456.78a-01").cpf_digits(), None);
    }

    #[test]
    fn test_from_form_trims_and_drops_blank_description() {
        let request = TransferRequest::from_form("  12345678901 ", "50", "   ").unwrap();
        assert_eq!(request.destination_key.as_str(), "12345678901");
        assert_eq!(request.description, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_from_form_requires_key() {
        assert_eq!(
            TransferRequest::from_form("", "50", "x"),
            Err(ValidationError::MissingDestinationKey)
        );
    }

    #[test]
    fn test_validate_catches_empty_key_built_by_hand() {
        let request = TransferRequest {
            destination_key: PixKey::new(""),
            amount: Amount::parse("10").unwrap(),
            description: None,
        };
        assert_eq!(request.validate(), Err(ValidationError::MissingDestinationKey));
    }

    #[test]
    fn test_transfer_status_from_wire() {
        assert_eq!(TransferStatus::from_wire("BLOQUEADA"), TransferStatus::Blocked);
        assert_eq!(TransferStatus::from_wire("PROCESSADA"), TransferStatus::Processed);
        assert_eq!(TransferStatus::from_wire("CONCLUIDA"), TransferStatus::Processed);
        assert_eq!(TransferStatus::from_wire("SUSPEITA"), TransferStatus::Processed);
    }
}
