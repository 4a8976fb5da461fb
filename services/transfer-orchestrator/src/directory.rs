//! PIX key to account resolution
//!
//! The demo backend has no key lookup endpoint, so the client carries a
//! static CPF table. Non-CPF keys resolve through a fixed high-risk test CPF,
//! and CPFs missing from the table resolve to a fallback account.

use pix_types::ids::AccountId;
use pix_types::transfer::PixKey;
use std::collections::HashMap;

/// CPF used for keys that are not CPF-shaped
pub const HIGH_RISK_TEST_CPF: &str = "49650556474";

/// Account used when a CPF is not in the table
pub const FALLBACK_ACCOUNT_ID: &str = "2";

/// Masked CPF as shown on screen when the key is unknown
const MASKED_CPF: &str = "***.***.***-**";

#[derive(Debug, Clone)]
pub struct AccountDirectory {
    by_cpf: HashMap<String, AccountId>,
    non_cpf_key_cpf: String,
    fallback_account: AccountId,
}

impl AccountDirectory {
    pub fn new(
        by_cpf: HashMap<String, AccountId>,
        non_cpf_key_cpf: impl Into<String>,
        fallback_account: AccountId,
    ) -> Self {
        Self {
            by_cpf,
            non_cpf_key_cpf: non_cpf_key_cpf.into(),
            fallback_account,
        }
    }

    /// CPF a key stands for: its own digits, or the high-risk test CPF
    pub fn cpf_for_key(&self, key: &PixKey) -> String {
        key.cpf_digits()
            .unwrap_or_else(|| self.non_cpf_key_cpf.clone())
    }

    /// Destination account for a PIX key
    pub fn resolve(&self, key: &PixKey) -> AccountId {
        self.account_for_cpf(&self.cpf_for_key(key))
    }

    /// Account for CPF text as displayed (formatted, bare, or masked)
    pub fn account_for_cpf(&self, cpf_text: &str) -> AccountId {
        let trimmed = cpf_text.trim();
        if trimmed.is_empty() || trimmed == MASKED_CPF {
            return self.fallback_account.clone();
        }
        let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
        self.by_cpf
            .get(&digits)
            .cloned()
            .unwrap_or_else(|| self.fallback_account.clone())
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        let by_cpf = [
            ("12345678901", "1"),
            ("23456789012", "2"),
            ("34567890123", "3"),
            ("45678901234", "4"),
            ("56789012345", "5"),
            ("67890123456", "6"),
            ("78901234567", "7"),
            ("89012345678", "8"),
        ]
        .into_iter()
        .map(|(cpf, account)| (cpf.to_string(), AccountId::new(account)))
        .collect();

        Self::new(by_cpf, HIGH_RISK_TEST_CPF, AccountId::new(FALLBACK_ACCOUNT_ID))
    }
}
