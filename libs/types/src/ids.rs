//! Identifier types for the PIX client
//!
//! The remote API hands out numeric database ids, but every id travels as a
//! string on the wire, so all of them are string newtypes here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bank account identifier as known by the remote API (e.g. `"1"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transfer identifier
///
/// Either assigned by the processing endpoint or generated locally when the
/// processing outcome is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Locally generated id: `TXN` followed by the last 8 digits of the
    /// Unix epoch in milliseconds.
    pub fn local_fallback(epoch_millis: i64) -> Self {
        let digits = epoch_millis.unsigned_abs().to_string();
        let tail = &digits[digits.len().saturating_sub(8)..];
        Self(format!("TXN{tail}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fraud report protocol number (server-issued or local `D####`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolNumber(String);

impl ProtocolNumber {
    pub fn new(protocol: impl Into<String>) -> Self {
        Self(protocol.into())
    }

    /// Local protocol for a report that could not be synced: `D` followed by
    /// the sequence zero-padded to four digits.
    pub fn local(sequence: u16) -> Self {
        Self(format!("D{sequence:04}"))
    }

    /// Whether this protocol was generated locally rather than by the server
    pub fn is_local(&self) -> bool {
        let mut chars = self.0.chars();
        chars.next() == Some('D') && self.0.len() == 5 && chars.all(|c| c.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProtocolNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
