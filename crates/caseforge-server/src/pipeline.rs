//! The analysis pipeline — chains LLM calls, extracts the recommendation,
//! renders the HTML report, and persists the case.
//!
//! Provider failures never abort a case: the legacy string channel carries
//! the error sentinel through extraction (`{"raw": "[ERROR] …"}`) and the
//! report renders it verbatim. Only storage and filesystem failures error.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use caseforge_core::config::GenerationDefaults;
use caseforge_core::extract_json;
use caseforge_core::types::{AnalysisType, CaseRecord, GenerateOptions};
use caseforge_core::utils::unix_now;
use caseforge_providers::LlmRouter;

use crate::db::{CaseStore, StoreError};
use crate::{prompts, report};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("report write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub struct CaseEngine {
    router: Arc<LlmRouter>,
    store: Arc<Mutex<CaseStore>>,
    reports_dir: PathBuf,
    defaults: GenerationDefaults,
}

impl CaseEngine {
    pub fn new(
        router: Arc<LlmRouter>,
        store: Arc<Mutex<CaseStore>>,
        reports_dir: PathBuf,
        defaults: GenerationDefaults,
    ) -> Self {
        Self {
            router,
            store,
            reports_dir,
            defaults,
        }
    }

    pub fn store(&self) -> MutexGuard<'_, CaseStore> {
        self.store.lock().expect("case store mutex poisoned")
    }

    fn options(&self) -> GenerateOptions {
        let mut opts = GenerateOptions::for_report(
            self.defaults.temperature,
            self.defaults.max_tokens,
            self.defaults.timeout_secs,
        );
        opts.system = Some(prompts::CONSULTANT_SYSTEM.to_string());
        opts
    }

    /// Standard case: diagnostic questions → self-answers → final synthesis.
    pub async fn run_standard(
        &self,
        company_name: &str,
        industry: &str,
        problem_statement: &str,
        provider: Option<&str>,
    ) -> Result<CaseRecord, EngineError> {
        let opts = self.options();
        let provider_id = self.router.resolve(provider);

        info!(
            provider = provider_id.as_str(),
            company = company_name,
            "starting standard case"
        );

        let questions = self
            .router
            .generate(
                provider,
                &prompts::diagnostic_questions(company_name, problem_statement),
                &opts,
            )
            .await;
        let answers = self
            .router
            .generate(
                provider,
                &prompts::diagnostic_answers(company_name, problem_statement, &questions),
                &opts,
            )
            .await;
        let raw = self
            .router
            .generate(
                provider,
                &prompts::final_synthesis(company_name, problem_statement, &answers),
                &opts,
            )
            .await;

        let recommendation = extract_json(&raw);
        self.persist(
            AnalysisType::Standard,
            format!("Case Study for {company_name}"),
            provider_id.as_str(),
            company_name,
            industry,
            problem_statement,
            recommendation,
        )
    }

    /// SWOT: one call, one extraction.
    pub async fn run_swot(
        &self,
        company_name: &str,
        provider: Option<&str>,
    ) -> Result<CaseRecord, EngineError> {
        let opts = self.options();
        let provider_id = self.router.resolve(provider);

        info!(provider = provider_id.as_str(), company = company_name, "starting SWOT");

        let raw = self
            .router
            .generate(provider, &prompts::swot(company_name), &opts)
            .await;
        let recommendation = extract_json(&raw);
        self.persist(
            AnalysisType::Swot,
            format!("SWOT Analysis for {company_name}"),
            provider_id.as_str(),
            company_name,
            "",
            "",
            recommendation,
        )
    }

    /// PESTLE: one call, one extraction.
    pub async fn run_pestle(
        &self,
        industry: &str,
        provider: Option<&str>,
    ) -> Result<CaseRecord, EngineError> {
        let opts = self.options();
        let provider_id = self.router.resolve(provider);

        info!(provider = provider_id.as_str(), industry = industry, "starting PESTLE");

        let raw = self
            .router
            .generate(provider, &prompts::pestle(industry), &opts)
            .await;
        let recommendation = extract_json(&raw);
        self.persist(
            AnalysisType::Pestle,
            format!("PESTLE Analysis for {industry} industry"),
            provider_id.as_str(),
            "",
            industry,
            "",
            recommendation,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn persist(
        &self,
        analysis_type: AnalysisType,
        title: String,
        provider: &str,
        company_name: &str,
        industry: &str,
        problem_statement: &str,
        recommendation: Map<String, Value>,
    ) -> Result<CaseRecord, EngineError> {
        let case_id = Uuid::new_v4().to_string();

        if recommendation.contains_key("raw") {
            warn!(case_id = %case_id, "extraction degraded to raw text");
        }

        let html = report::render(&title, analysis_type, &recommendation);
        std::fs::create_dir_all(&self.reports_dir)?;
        let report_path = self.reports_dir.join(format!("report_{case_id}.html"));
        std::fs::write(&report_path, &html)?;

        let record = CaseRecord {
            case_id,
            provider: provider.to_string(),
            title,
            analysis_type,
            company_name: company_name.to_string(),
            industry: industry.to_string(),
            region: String::new(),
            problem_statement: problem_statement.to_string(),
            created_at: unix_now(),
            final_recommendation: Value::Object(recommendation).to_string(),
            report_path: report_path.to_string_lossy().into_owned(),
        };

        self.store().insert(&record)?;
        info!(case_id = %record.case_id, report = %record.report_path, "case persisted");
        Ok(record)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use caseforge_core::config::Config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn engine_for(uri: &str, reports_dir: PathBuf) -> CaseEngine {
        let mut config = Config::default();
        config.providers.default = "ollama".to_string();
        config.providers.ollama.host = uri.to_string();

        CaseEngine::new(
            Arc::new(LlmRouter::new(&config)),
            Arc::new(Mutex::new(CaseStore::open_in_memory().unwrap())),
            reports_dir,
            GenerationDefaults::default(),
        )
    }

    async fn mount_reply(mock_server: &MockServer, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": reply
            })))
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_swot_pipeline_end_to_end() {
        let mock_server = MockServer::start().await;
        mount_reply(
            &mock_server,
            "Here you go: {\"strengths\":[{\"name\":\"Brand\"}],\"weaknesses\":[],\
             \"opportunities\":[],\"threats\":[]}",
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let engine = engine_for(&mock_server.uri(), dir.path().to_path_buf());

        let record = engine.run_swot("Acme", Some("ollama")).await.unwrap();

        assert_eq!(record.analysis_type, AnalysisType::Swot);
        assert_eq!(record.title, "SWOT Analysis for Acme");
        assert_eq!(record.provider, "ollama");

        // Recommendation extracted despite the surrounding prose
        let rec: Value = serde_json::from_str(&record.final_recommendation).unwrap();
        assert_eq!(rec["strengths"][0]["name"], "Brand");

        // Report written and retrievable via the store
        let html = std::fs::read_to_string(&record.report_path).unwrap();
        assert!(html.contains("<h4>Strengths</h4>"));
        let loaded = engine.store().get(&record.case_id).unwrap().unwrap();
        assert_eq!(loaded.title, record.title);
    }

    #[tokio::test]
    async fn test_standard_case_makes_three_calls() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "{\"executive_summary\":\"ok\",\"diagnosis\":[],\
                             \"plan_30_60_90\":{},\"metrics\":[],\"quick_wins\":[]}"
            })))
            .expect(3)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let engine = engine_for(&mock_server.uri(), dir.path().to_path_buf());

        let record = engine
            .run_standard("Acme", "widgets", "sales are flat", None)
            .await
            .unwrap();
        assert_eq!(record.analysis_type, AnalysisType::Standard);
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.problem_statement, "sales are flat");
    }

    #[tokio::test]
    async fn test_provider_failure_still_produces_case() {
        // Backend unreachable: the sentinel flows through extraction and the
        // report renders it, but the case persists.
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_for("http://127.0.0.1:1", dir.path().to_path_buf());

        let record = engine.run_pestle("fintech", None).await.unwrap();

        let rec: Value = serde_json::from_str(&record.final_recommendation).unwrap();
        let raw = rec["raw"].as_str().unwrap();
        assert!(raw.starts_with("[ERROR]"));
        assert!(raw.contains("Ollama"));

        let html = std::fs::read_to_string(&record.report_path).unwrap();
        assert!(html.contains("[ERROR]"));
    }
}
