//! Wire models for the remote `/api/*` endpoints
//!
//! Field names follow the server's Portuguese JSON. Conversions into the
//! typed domain live next to each response.

use crate::error::OrchestratorError;
use chrono::{DateTime, Local, NaiveDateTime};
use pix_types::ids::{ProtocolNumber, TransactionId};
use pix_types::report::{ScamCatalog, ScamCategory, ScamSeverity, ScamType};
use pix_types::risk::{RiskAction, RiskAssessment, RiskLevel};
use pix_types::score::SecurityScore;
use pix_types::transfer::{TransferResult, TransferStatus};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const ANALYSIS_PATH: &str = "/api/pix/analisar-pre-transacao";
pub const PROCESSING_PATH: &str = "/api/pix/processar";
pub const MANUAL_REPORT_PATH: &str = "/api/denuncias/manual";
pub const SCAM_CATALOG_PATH: &str = "/api/tipos-golpes/por-categoria";

/// Body of `POST /api/pix/analisar-pre-transacao`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub chave_pix: String,
    pub valor: String,
    pub descricao: String,
    pub conta_origem_id: String,
}

/// Answer of the analysis endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResponse {
    pub sucesso: bool,
    pub erro: Option<String>,
    pub score_atual: Option<i64>,
    pub nivel_risco: Option<String>,
    pub acao: Option<String>,
    pub permitir_transacao: Option<bool>,
    pub fatores_risco: Option<Vec<String>>,
    pub motivo_bloqueio: Option<String>,
    pub recomendacoes: Option<Vec<String>>,
}

impl AnalysisResponse {
    /// Typed assessment, or an analysis error when the server refused to assess
    pub fn into_assessment(self) -> Result<RiskAssessment, OrchestratorError> {
        if !self.sucesso {
            return Err(OrchestratorError::Analysis(
                self.erro.unwrap_or_else(|| "analysis rejected".to_string()),
            ));
        }
        let score = self.score_atual.ok_or_else(|| {
            OrchestratorError::Analysis("analysis response carries no score".to_string())
        })?;
        let action = RiskAction::from_wire(self.acao.as_deref());

        Ok(RiskAssessment {
            score: SecurityScore::new(score),
            risk_level: self
                .nivel_risco
                .as_deref()
                .map(RiskLevel::from_label)
                .unwrap_or(RiskLevel::MEDIUM),
            action,
            allowed: self.permitir_transacao.unwrap_or(action != RiskAction::Block),
            risk_factors: self.fatores_risco.unwrap_or_default(),
            block_reason: self.motivo_bloqueio,
            recommendations: self.recomendacoes.unwrap_or_default(),
        })
    }
}

/// Body of `POST /api/pix/processar`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub conta_origem_id: String,
    pub conta_destino_id: String,
    pub valor: String,
    pub descricao: String,
}

/// Answer of the processing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessResponse {
    pub sucesso: bool,
    pub erro: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub transacao_id: Option<String>,
    pub status: Option<String>,
    pub score: Option<i64>,
    pub data_hora: Option<Value>,
    pub protocolo_denuncia: Option<String>,
}

impl ProcessResponse {
    /// Typed result. `sucesso:false` or a missing id is a soft processing error.
    pub fn into_result(self) -> Result<TransferResult, OrchestratorError> {
        if !self.sucesso {
            return Err(OrchestratorError::ProcessingSoft(
                self.erro.unwrap_or_else(|| "processing rejected".to_string()),
            ));
        }
        let transaction_id = self.transacao_id.ok_or_else(|| {
            OrchestratorError::ProcessingSoft("processing response carries no id".to_string())
        })?;
        let raw_status = self.status.unwrap_or_else(|| "PROCESSADA".to_string());

        Ok(TransferResult {
            success: true,
            transaction_id: TransactionId::new(transaction_id),
            status: TransferStatus::from_wire(&raw_status),
            raw_status,
            score: self.score.map(SecurityScore::new),
            timestamp: self
                .data_hora
                .as_ref()
                .and_then(parse_server_timestamp)
                .unwrap_or_else(|| Local::now().naive_local()),
            report_protocol: self
                .protocolo_denuncia
                .filter(|p| !p.trim().is_empty())
                .map(ProtocolNumber::new),
        })
    }
}

/// Details of the transfer being reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTransactionDetails {
    pub chave_pix: String,
    pub valor_formatado: String,
    pub descricao_transacao: String,
}

/// Body of `POST /api/denuncias/manual`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualReportRequest {
    pub tipo_transacao: String,
    pub tipo_golpe: String,
    pub conta_id: String,
    pub valor_transacao: String,
    pub motivo_denuncia: String,
    pub evidencias: String,
    pub denunciante: String,
    pub canais_contato: Vec<String>,
    pub detalhes_transacao: ReportTransactionDetails,
}

/// Free-text guidance attached to a filed report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportInfo {
    pub mensagem: Option<String>,
    pub protocolo_acesso: Option<String>,
    pub tempo_analise: Option<String>,
    pub contato: Option<String>,
}

/// Answer of the manual report endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManualReportResponse {
    pub success: bool,
    pub error: Option<String>,
    pub protocolo: Option<String>,
    pub tipo: Option<String>,
    pub prioridade: Option<String>,
    pub data_hora: Option<String>,
    pub tipo_golpe: Option<ScamTypeBody>,
    pub info: Option<ReportInfo>,
}

/// Scam type entry of the catalog endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScamTypeBody {
    pub codigo: String,
    pub nome: String,
    pub categoria: Option<String>,
    pub emoji: Option<String>,
    pub severidade: Option<String>,
    pub descricao: Option<String>,
}

impl ScamTypeBody {
    /// Typed scam type; `category` fills in a missing `categoria`
    pub fn into_scam_type(self, category: &str) -> ScamType {
        ScamType {
            code: self.codigo,
            name: self.nome,
            category: self.categoria.unwrap_or_else(|| category.to_string()),
            emoji: self.emoji.unwrap_or_default(),
            severity: self
                .severidade
                .as_deref()
                .map(ScamSeverity::from_label)
                .unwrap_or(ScamSeverity::Medium),
            description: self.descricao.unwrap_or_default(),
        }
    }
}

/// Category entry of the catalog endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScamCategoryBody {
    pub nome: String,
    pub emoji: Option<String>,
    pub tipos: Vec<ScamTypeBody>,
}

/// Answer of `GET /api/tipos-golpes/por-categoria`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScamCatalogResponse {
    pub success: bool,
    pub error: Option<String>,
    pub categorias: BTreeMap<String, ScamCategoryBody>,
}

impl ScamCatalogResponse {
    /// Typed catalog, `None` when the server reported a failure
    pub fn into_catalog(self) -> Option<ScamCatalog> {
        if !self.success {
            return None;
        }
        let categories = self
            .categorias
            .into_iter()
            .map(|(key, body)| {
                let types = body
                    .tipos
                    .into_iter()
                    .filter(|t| !t.codigo.trim().is_empty())
                    .map(|t| t.into_scam_type(&body.nome))
                    .collect();
                let category = ScamCategory {
                    name: body.nome,
                    emoji: body.emoji.unwrap_or_default(),
                    types,
                };
                (key, category)
            })
            .collect();
        Some(ScamCatalog::new(categories))
    }
}

/// Accept ids sent either as JSON numbers or strings
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Server timestamps arrive as RFC 3339, as zone-less ISO local time, or as
/// Jackson's `[y, m, d, h, min, s, nanos]` array.
pub fn parse_server_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(text) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Some(dt.with_timezone(&Local).naive_local());
            }
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%d/%m/%Y %H:%M:%S"))
                .ok()
        }
        Value::Array(parts) => {
            let nums: Vec<i64> = parts.iter().filter_map(Value::as_i64).collect();
            if nums.len() < 5 {
                return None;
            }
            let date = chrono::NaiveDate::from_ymd_opt(nums[0] as i32, nums[1] as u32, nums[2] as u32)?;
            let seconds = nums.get(5).copied().unwrap_or(0) as u32;
            let nanos = nums.get(6).copied().unwrap_or(0) as u32;
            date.and_hms_nano_opt(nums[3] as u32, nums[4] as u32, seconds, nanos)
        }
        _ => None,
    }
}

/// pt-BR display of a timestamp (`18/10/2026 14:05:00`)
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%d/%m/%Y %H:%M:%S").to_string()
}
