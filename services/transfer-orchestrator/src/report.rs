//! Fraud report submission
//!
//! Reports a blocked transfer to `/api/denuncias/manual`. A report that cannot
//! be delivered still gets a local `D####` protocol so the user has something
//! to quote; only delivered reports cost security score.

use crate::client::{PixApi, with_deadline};
use crate::config::OrchestratorConfig;
use crate::directory::AccountDirectory;
use crate::error::OrchestratorError;
use crate::events::{AssistantTone, NotificationLevel, Presenter, ReportReceiptView, UiEvent};
use crate::models::{
    MANUAL_REPORT_PATH, ManualReportRequest, ManualReportResponse, ReportTransactionDetails,
    SCAM_CATALOG_PATH,
};
use crate::state::AppState;
use pix_types::ids::ProtocolNumber;
use pix_types::report::{FraudReportForm, ScamCatalog, ScamType};
use pix_types::score::SecurityScore;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

/// Reporter name sent with every report
pub const REPORTER_NAME: &str = "Cliente via Interface Web";

const TRANSACTION_TYPE: &str = "PIX";

/// Terminal branch of one `submit_report` run
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// Failed local validation. Nothing was sent.
    Rejected(OrchestratorError),
    /// Accepted by the server
    Filed {
        protocol: ProtocolNumber,
        score: SecurityScore,
    },
    /// Not delivered; kept under a local protocol awaiting sync
    StoredLocally {
        protocol: ProtocolNumber,
        cause: OrchestratorError,
    },
}

pub struct FraudReporter {
    api: Arc<dyn PixApi>,
    presenter: Arc<dyn Presenter>,
    state: Arc<AppState>,
    directory: AccountDirectory,
    config: OrchestratorConfig,
}

impl FraudReporter {
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

    /// Scam-type catalog, fetched once per session.
    ///
    /// An unreachable server or an empty answer yields the fallback catalog,
    /// which is cached too.
    pub async fn load_scam_catalog(&self) -> &ScamCatalog {
        self.state
            .scam_catalog
            .get_or_init(|| async {
                let fetched = with_deadline(
                    SCAM_CATALOG_PATH,
                    self.config.catalog_timeout,
                    self.api.fetch_scam_catalog(),
                )
                .await;

                match fetched.map(|response| response.into_catalog()) {
                    Ok(Some(catalog)) if !catalog.is_empty() => {
                        info!(types = catalog.len(), "Scam catalog loaded");
                        catalog
                    }
                    Ok(_) => self.fallback_catalog("server returned no scam types"),
                    Err(e) => self.fallback_catalog(&e.to_string()),
                }
            })
            .await
    }

    /// Validate and send a fraud report
    pub async fn submit_report(&self, form: FraudReportForm) -> ReportOutcome {
        if let Err(e) = form.validate() {
            warn!(error = %e, "Fraud report rejected");
            self.present(UiEvent::notify(NotificationLevel::Warning, e.to_string()));
            return ReportOutcome::Rejected(e.into());
        }

        let body = self.build_request(&form);
        info!(
            scam_type = %body.tipo_golpe,
            account = %body.conta_id,
            "Submitting fraud report"
        );

        self.present(UiEvent::progress("Sending report"));
        let delivered = with_deadline(
            MANUAL_REPORT_PATH,
            self.config.report_timeout,
            self.api.submit_manual_report(&body),
        )
        .await
        .map_err(|e| OrchestratorError::ReportSubmission(e.to_string()))
        .and_then(accepted);
        self.present(UiEvent::ProgressFinished);

        let scam_type = self
            .state
            .cached_catalog()
            .and_then(|catalog| catalog.find(&body.tipo_golpe))
            .cloned();

        match delivered {
            Ok((protocol, response)) => self.filed(protocol, response, &body.tipo_golpe, scam_type),
            Err(cause) => self.stored_locally(cause, &body.tipo_golpe, scam_type),
        }
    }

    fn build_request(&self, form: &FraudReportForm) -> ManualReportRequest {
        let context = &form.context;
        ManualReportRequest {
            tipo_transacao: TRANSACTION_TYPE.to_string(),
            tipo_golpe: form.scam_type_code.trim().to_string(),
            conta_id: self
                .directory
                .resolve(&context.destination_key)
                .as_str()
                .to_string(),
            valor_transacao: context.amount.to_wire_string(),
            motivo_denuncia: form.description.trim().to_string(),
            evidencias: form.contact_methods.join(", "),
            denunciante: REPORTER_NAME.to_string(),
            canais_contato: form.contact_methods.clone(),
            detalhes_transacao: ReportTransactionDetails {
                chave_pix: context.destination_key.as_str().to_string(),
                valor_formatado: context.amount.to_string(),
                descricao_transacao: context.description.clone().unwrap_or_default(),
            },
        }
    }

    fn filed(
        &self,
        protocol: ProtocolNumber,
        response: ManualReportResponse,
        code: &str,
        scam_type: Option<ScamType>,
    ) -> ReportOutcome {
        let score = self
            .state
            .apply_report_penalty(self.config.report_score_penalty);
        let scam_type = scam_type.or_else(|| {
            response
                .tipo_golpe
                .clone()
                .map(|t| t.into_scam_type(""))
        });
        let name = scam_type
            .as_ref()
            .map(|t| t.name.clone())
            .or_else(|| response.tipo.clone())
            .unwrap_or_else(|| code.to_string());
        info!(protocol = %protocol, scam_type = %name, score = score.value(), "Fraud report filed");

        let info = response.info.unwrap_or_default();
        let analysis_time = info.tempo_analise.or_else(|| {
            scam_type
                .as_ref()
                .map(|t| format!("{} hours", t.severity.analysis_hours()))
        });
        let message = info
            .mensagem
            .unwrap_or_else(|| format!("Report registered under protocol {protocol}"));

        self.present(UiEvent::ReportFiled(ReportReceiptView {
            protocol: protocol.clone(),
            scam_type_name: name.clone(),
            priority: scam_type.as_ref().map(|t| t.severity.priority()),
            analysis_time,
            filed_at: response.data_hora,
            synced: true,
            message,
        }));
        self.present(UiEvent::notify(
            NotificationLevel::Success,
            format!("Report of \"{name}\" sent. Protocol {protocol}"),
        ));
        self.present(UiEvent::assistant(
            AssistantTone::Success,
            "Thanks for reporting. This helps protect other customers too.",
        ));
        self.present(UiEvent::score_changed(score));

        ReportOutcome::Filed { protocol, score }
    }

    fn stored_locally(
        &self,
        cause: OrchestratorError,
        code: &str,
        scam_type: Option<ScamType>,
    ) -> ReportOutcome {
        let protocol = ProtocolNumber::local(rand::thread_rng().gen_range(1..=9999));
        warn!(error = %cause, protocol = %protocol, "Fraud report kept locally");

        self.present(UiEvent::ReportFiled(ReportReceiptView {
            protocol: protocol.clone(),
            scam_type_name: scam_type
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_else(|| code.to_string()),
            priority: scam_type.as_ref().map(|t| t.severity.priority()),
            analysis_time: None,
            filed_at: None,
            synced: false,
            message: "Report saved. It will be sent as soon as the connection is back."
                .to_string(),
        }));
        self.present(UiEvent::notify(
            NotificationLevel::Warning,
            format!("Report pending sync. Protocol {protocol}"),
        ));

        ReportOutcome::StoredLocally { protocol, cause }
    }

    fn fallback_catalog(&self, reason: &str) -> ScamCatalog {
        warn!(reason, "Using fallback scam catalog");
        self.present(UiEvent::notify(
            NotificationLevel::Warning,
            "Could not load scam types. Showing a reduced list.",
        ));
        ScamCatalog::fallback()
    }

    fn present(&self, event: UiEvent) {
        self.presenter.present(event);
    }
}

/// Protocol of an accepted report, or why the report counts as undelivered
fn accepted(
    response: ManualReportResponse,
) -> Result<(ProtocolNumber, ManualReportResponse), OrchestratorError> {
    if !response.success {
        return Err(OrchestratorError::ReportSubmission(
            response
                .error
                .clone()
                .unwrap_or_else(|| "report rejected".to_string()),
        ));
    }
    let protocol = response
        .protocolo
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ProtocolNumber::new);
    match protocol {
        Some(protocol) => Ok((protocol, response)),
        None => Err(OrchestratorError::ReportSubmission(
            "response carries no protocol".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_requires_protocol() {
        let response = ManualReportResponse {
            success: true,
            protocolo: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            accepted(response),
            Err(OrchestratorError::ReportSubmission(_))
        ));
    }

    #[test]
    fn test_accepted_trims_protocol() {
        let response = ManualReportResponse {
            success: true,
            protocolo: Some(" DEN-2026-000042 ".to_string()),
            ..Default::default()
        };
        let (protocol, _) = accepted(response).unwrap();
        assert_eq!(protocol.as_str(), "DEN-2026-000042");
    }

    #[test]
    fn test_unsuccessful_response_is_submission_error() {
        let response = ManualReportResponse {
            success: false,
            error: Some("Conta não encontrada".to_string()),
            ..Default::default()
        };
        assert_eq!(
            accepted(response).unwrap_err(),
            OrchestratorError::ReportSubmission("Conta não encontrada".to_string())
        );
    }
}
