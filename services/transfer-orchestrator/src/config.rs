//! Client configuration
//!
//! Defaults match the demo deployment. `from_env` overrides them from
//! `PIX_*` environment variables.

use crate::error::ConfigError;
use pix_types::ids::AccountId;
use pix_types::score::{REPORT_SCORE_PENALTY, SecurityScore};
use std::time::Duration;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Base URL of the remote API, without trailing slash
    pub api_base_url: String,
    /// Account of the logged-in user
    pub source_account_id: AccountId,
    /// Deadline for the pre-transaction analysis call
    pub analysis_timeout: Duration,
    /// Deadline for the processing call
    pub processing_timeout: Duration,
    /// Deadline for the fraud report call
    pub report_timeout: Duration,
    /// Deadline for the scam catalog call
    pub catalog_timeout: Duration,
    /// Extra pause before processing a monitored transfer
    pub monitor_delay: Duration,
    /// Simulated turnaround of a manual approval request
    pub manual_approval_delay: Duration,
    /// Security score at startup
    pub initial_security_score: SecurityScore,
    /// Points removed per filed report
    pub report_score_penalty: u8,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            source_account_id: AccountId::new("1"),
            analysis_timeout: Duration::from_secs(10),
            processing_timeout: Duration::from_secs(15),
            report_timeout: Duration::from_secs(10),
            catalog_timeout: Duration::from_secs(10),
            monitor_delay: Duration::from_secs(3),
            manual_approval_delay: Duration::from_secs(2),
            initial_security_score: SecurityScore::default(),
            report_score_penalty: REPORT_SCORE_PENALTY,
        }
    }
}

impl OrchestratorConfig {
    /// Defaults overridden by process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `PIX_*` key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("PIX_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(account) = lookup("PIX_SOURCE_ACCOUNT_ID") {
            config.source_account_id = AccountId::new(account);
        }

        let millis = |key: &'static str, current: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| ConfigError::InvalidValue {
                        key,
                        value: raw.clone(),
                        reason: e.to_string(),
                    }),
                None => Ok(current),
            }
        };

        config.analysis_timeout = millis("PIX_ANALYSIS_TIMEOUT_MS", config.analysis_timeout)?;
        config.processing_timeout = millis("PIX_PROCESSING_TIMEOUT_MS", config.processing_timeout)?;
        config.report_timeout = millis("PIX_REPORT_TIMEOUT_MS", config.report_timeout)?;
        config.catalog_timeout = millis("PIX_CATALOG_TIMEOUT_MS", config.catalog_timeout)?;
        config.monitor_delay = millis("PIX_MONITOR_DELAY_MS", config.monitor_delay)?;
        config.manual_approval_delay =
            millis("PIX_MANUAL_APPROVAL_DELAY_MS", config.manual_approval_delay)?;

        if let Some(raw) = lookup("PIX_INITIAL_SECURITY_SCORE") {
            let value = raw.trim().parse::<u8>().ok().filter(|v| *v <= 100).ok_or_else(|| {
                ConfigError::InvalidValue {
                    key: "PIX_INITIAL_SECURITY_SCORE",
                    value: raw.clone(),
                    reason: "expected an integer from 0 to 100".to_string(),
                }
            })?;
            config.initial_security_score = SecurityScore::new(value as i64);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.initial_security_score.value(), 11);
        assert_eq!(config.report_score_penalty, 8);
        assert_eq!(config.monitor_delay, Duration::from_secs(3));
        assert_eq!(config.source_account_id.as_str(), "1");
    }

    #[test]
    fn test_overrides() {
        let config = OrchestratorConfig::from_lookup(lookup_from(&[
            ("PIX_API_BASE_URL", "http://bank.local:9000/"),
            ("PIX_ANALYSIS_TIMEOUT_MS", "2500"),
            ("PIX_MONITOR_DELAY_MS", "0"),
            ("PIX_INITIAL_SECURITY_SCORE", "70"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://bank.local:9000");
        assert_eq!(config.analysis_timeout, Duration::from_millis(2500));
        assert_eq!(config.monitor_delay, Duration::ZERO);
        assert_eq!(config.initial_security_score.value(), 70);
        assert_eq!(config.processing_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let err = OrchestratorConfig::from_lookup(lookup_from(&[(
            "PIX_PROCESSING_TIMEOUT_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "PIX_PROCESSING_TIMEOUT_MS", .. }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        let err = OrchestratorConfig::from_lookup(lookup_from(&[(
            "PIX_INITIAL_SECURITY_SCORE",
            "150",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("PIX_INITIAL_SECURITY_SCORE"));
    }
}
