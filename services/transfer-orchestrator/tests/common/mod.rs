//! Shared fakes for the flow tests
#![allow(dead_code)]

use async_trait::async_trait;
use pix_types::numeric::Amount;
use pix_types::report::{BlockedTransactionContext, FraudReportForm};
use pix_types::transfer::{PixKey, TransferRequest};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use transfer_orchestrator::events::{Notification, NotificationLevel};
use transfer_orchestrator::models::{
    AnalysisRequest, AnalysisResponse, ManualReportRequest, ManualReportResponse, ProcessRequest,
    ProcessResponse, ScamCatalogResponse,
};
use transfer_orchestrator::{
    ApiError, AppState, FraudReporter, OrchestratorConfig, PixApi, Presenter,
    TransferOrchestrator, UiEvent,
};

/// Scripted collaborator: fixed answers, call counters, optional stalls
pub struct FakePixApi {
    analysis: Result<AnalysisResponse, ApiError>,
    processing: Result<ProcessResponse, ApiError>,
    report: Result<ManualReportResponse, ApiError>,
    catalog: Result<ScamCatalogResponse, ApiError>,
    analysis_stall: Option<Duration>,
    processing_stall: Option<Duration>,
    report_stall: Option<Duration>,
    pub analysis_calls: AtomicUsize,
    pub processing_calls: AtomicUsize,
    pub report_calls: AtomicUsize,
    pub catalog_calls: AtomicUsize,
    pub last_analysis: Mutex<Option<AnalysisRequest>>,
    pub last_process: Mutex<Option<ProcessRequest>>,
    pub last_report: Mutex<Option<ManualReportRequest>>,
}

impl Default for FakePixApi {
    fn default() -> Self {
        let unscripted = || ApiError::Transport("connection refused".to_string());
        Self {
            analysis: Err(unscripted()),
            processing: Err(unscripted()),
            report: Err(unscripted()),
            catalog: Err(unscripted()),
            analysis_stall: None,
            processing_stall: None,
            report_stall: None,
            analysis_calls: AtomicUsize::new(0),
            processing_calls: AtomicUsize::new(0),
            report_calls: AtomicUsize::new(0),
            catalog_calls: AtomicUsize::new(0),
            last_analysis: Mutex::new(None),
            last_process: Mutex::new(None),
            last_report: Mutex::new(None),
        }
    }
}

impl FakePixApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(mut self, analysis: Result<AnalysisResponse, ApiError>) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn with_processing(mut self, processing: Result<ProcessResponse, ApiError>) -> Self {
        self.processing = processing;
        self
    }

    pub fn with_report(mut self, report: Result<ManualReportResponse, ApiError>) -> Self {
        self.report = report;
        self
    }

    pub fn with_catalog(mut self, catalog: Result<ScamCatalogResponse, ApiError>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn stall_analysis(mut self, stall: Duration) -> Self {
        self.analysis_stall = Some(stall);
        self
    }

    pub fn stall_processing(mut self, stall: Duration) -> Self {
        self.processing_stall = Some(stall);
        self
    }

    pub fn stall_report(mut self, stall: Duration) -> Self {
        self.report_stall = Some(stall);
        self
    }

    pub fn analysis_calls(&self) -> usize {
        self.analysis_calls.load(Ordering::SeqCst)
    }

    pub fn processing_calls(&self) -> usize {
        self.processing_calls.load(Ordering::SeqCst)
    }

    pub fn report_calls(&self) -> usize {
        self.report_calls.load(Ordering::SeqCst)
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn last_process(&self) -> Option<ProcessRequest> {
        self.last_process.lock().unwrap().clone()
    }

    pub fn last_report(&self) -> Option<ManualReportRequest> {
        self.last_report.lock().unwrap().clone()
    }
}

async fn stall(duration: Option<Duration>) {
    if let Some(duration) = duration {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl PixApi for FakePixApi {
    async fn analyze_pre_transaction(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, ApiError> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_analysis.lock().unwrap() = Some(request.clone());
        stall(self.analysis_stall).await;
        self.analysis.clone()
    }

    async fn process_transfer(&self, request: &ProcessRequest) -> Result<ProcessResponse, ApiError> {
        self.processing_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_process.lock().unwrap() = Some(request.clone());
        stall(self.processing_stall).await;
        self.processing.clone()
    }

    async fn submit_manual_report(
        &self,
        request: &ManualReportRequest,
    ) -> Result<ManualReportResponse, ApiError> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_report.lock().unwrap() = Some(request.clone());
        stall(self.report_stall).await;
        self.report.clone()
    }

    async fn fetch_scam_catalog(&self) -> Result<ScamCatalogResponse, ApiError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.clone()
    }
}

/// Presenter that keeps every event for inspection
#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notifications(&self, level: NotificationLevel) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Notification(Notification { level: l, message }) if l == level => {
                    Some(message)
                }
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct Harness {
    pub api: Arc<FakePixApi>,
    pub presenter: Arc<RecordingPresenter>,
    pub state: Arc<AppState>,
    pub orchestrator: TransferOrchestrator,
    pub reporter: FraudReporter,
}

impl Harness {
    pub fn new(api: FakePixApi) -> Self {
        Self::with_config(api, OrchestratorConfig::default())
    }

    pub fn with_config(api: FakePixApi, config: OrchestratorConfig) -> Self {
        let api = Arc::new(api);
        let presenter = Arc::new(RecordingPresenter::default());
        let state = Arc::new(AppState::new(config.initial_security_score));
        let orchestrator = TransferOrchestrator::new(
            api.clone(),
            presenter.clone(),
            state.clone(),
            config.clone(),
        );
        let reporter = FraudReporter::new(api.clone(), presenter.clone(), state.clone(), config);
        Self {
            api,
            presenter,
            state,
            orchestrator,
            reporter,
        }
    }

    pub fn score(&self) -> u8 {
        self.state.security_score().value()
    }
}

pub fn analysis(action: &str, score: i64, allowed: bool) -> AnalysisResponse {
    AnalysisResponse {
        sucesso: true,
        score_atual: Some(score),
        nivel_risco: Some("🟡 MÉDIO".to_string()),
        acao: Some(action.to_string()),
        permitir_transacao: Some(allowed),
        ..Default::default()
    }
}

pub fn processed(id: &str, status: &str, score: Option<i64>) -> ProcessResponse {
    ProcessResponse {
        sucesso: true,
        transacao_id: Some(id.to_string()),
        status: Some(status.to_string()),
        score,
        data_hora: Some(serde_json::json!("2026-10-18T14:05:00")),
        ..Default::default()
    }
}

pub fn request(key: &str, amount: &str, description: &str) -> TransferRequest {
    TransferRequest::from_form(key, amount, description).unwrap()
}

pub fn report_form(code: &str, description: &str, contacts: &[&str]) -> FraudReportForm {
    FraudReportForm {
        scam_type_code: code.to_string(),
        description: description.to_string(),
        contact_methods: contacts.iter().map(|c| c.to_string()).collect(),
        context: BlockedTransactionContext {
            destination_key: PixKey::new("345.678.901-23"),
            amount: Amount::parse("150,50").unwrap(),
            description: Some("Ajuda urgente".to_string()),
        },
    }
}
