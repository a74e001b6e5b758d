use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use standpos_ledger::{FinancialSummary, LedgerSnapshot};

use crate::error::AdvisorError;
use crate::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiModel};
use crate::model::CompletionModel;
use crate::prompt::build_prompt;

/// Settings for the hosted model. `api_key: None` disables the advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Whether the advisory panel can be used, and why not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Availability {
    Available { model: String },
    Disabled { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub answer: String,
    pub model: String,
}

/// Business advisor over a ledger snapshot.
///
/// Read-only with respect to the ledger: it only ever sees an owned snapshot.
/// One question, one answer; failures are returned, never retried.
#[derive(Clone)]
pub struct Advisor {
    model: Option<Arc<dyn CompletionModel>>,
    disabled_reason: String,
}

impl core::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Advisor")
            .field("availability", &self.availability())
            .finish()
    }
}

impl Advisor {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model: Some(model),
            disabled_reason: String::new(),
        }
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        Self {
            model: None,
            disabled_reason: reason.into(),
        }
    }

    /// Build a Gemini-backed advisor, or a disabled one when no credential is set.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let Some(api_key) = config.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) else {
            warn!("no model API credential configured; advisor disabled");
            return Ok(Self::disabled("no model API credential configured"));
        };

        let model = GeminiModel::new(api_key, &config.model, &config.endpoint, config.timeout)?;
        info!(model = %config.model, "advisor enabled");
        Ok(Self::new(Arc::new(model)))
    }

    pub fn availability(&self) -> Availability {
        match &self.model {
            Some(m) => Availability::Available {
                model: m.name().to_string(),
            },
            None => Availability::Disabled {
                reason: self.disabled_reason.clone(),
            },
        }
    }

    pub async fn ask(&self, snapshot: &LedgerSnapshot, question: &str) -> Result<Advice, AdvisorError> {
        let Some(model) = &self.model else {
            return Err(AdvisorError::ConfigurationMissing(self.disabled_reason.clone()));
        };
        if question.trim().is_empty() {
            return Err(AdvisorError::EmptyQuestion);
        }

        let summary = FinancialSummary::from_snapshot(snapshot);
        let prompt = build_prompt(snapshot, &summary, question);

        info!(
            model = model.name(),
            orders = snapshot.orders.len(),
            expenses = snapshot.expenses.len(),
            "sending advisory request"
        );

        match model.generate(&prompt).await {
            Ok(answer) => Ok(Advice {
                answer,
                model: model.name().to_string(),
            }),
            Err(e) => {
                warn!(model = model.name(), code = e.code(), error = %e, "advisory request failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    use standpos_ledger::{Ledger, MenuItem, OrderInput, PaymentStatus, PredefinedItem};

    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        fail_with: Option<AdvisorError>,
    }

    #[async_trait]
    impl CompletionModel for RecordingModel {
        fn name(&self) -> &str {
            "fake-model"
        }

        async fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok("Sell more mango juice.".to_string()),
            }
        }
    }

    fn snapshot() -> LedgerSnapshot {
        let mut ledger = Ledger::new();
        ledger
            .append_order(
                OrderInput {
                    payer: "Budi".to_string(),
                    menu: MenuItem::Predefined(PredefinedItem::MangoJuice),
                    quantity: 1,
                    price: 15_000,
                    status: PaymentStatus::Paid,
                },
                Utc::now(),
            )
            .unwrap();
        ledger.snapshot()
    }

    #[tokio::test]
    async fn disabled_advisor_reports_configuration_missing() {
        let advisor = Advisor::from_config(&AdvisorConfig::default()).unwrap();
        assert!(matches!(advisor.availability(), Availability::Disabled { .. }));

        let err = advisor.ask(&snapshot(), "How is business?").await.unwrap_err();
        assert!(matches!(err, AdvisorError::ConfigurationMissing(_)));
        assert_eq!(err.code(), "configuration_missing");
    }

    #[tokio::test]
    async fn blank_key_counts_as_missing() {
        let config = AdvisorConfig {
            api_key: Some("   ".to_string()),
            ..AdvisorConfig::default()
        };
        let advisor = Advisor::from_config(&config).unwrap();
        assert!(matches!(advisor.availability(), Availability::Disabled { .. }));
    }

    #[tokio::test]
    async fn configured_key_enables_gemini() {
        let config = AdvisorConfig {
            api_key: Some("secret".to_string()),
            ..AdvisorConfig::default()
        };
        let advisor = Advisor::from_config(&config).unwrap();
        assert_eq!(
            advisor.availability(),
            Availability::Available {
                model: DEFAULT_MODEL.to_string()
            }
        );
    }

    #[tokio::test]
    async fn ask_sends_rendered_prompt_and_returns_answer() {
        let model = Arc::new(RecordingModel::default());
        let advisor = Advisor::new(model.clone());

        let advice = advisor.ask(&snapshot(), "Should I open earlier?").await.unwrap();
        assert_eq!(advice.answer, "Sell more mango juice.");
        assert_eq!(advice.model, "fake-model");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Cash in: Rp 15,000"));
        assert!(prompts[0].contains("Should I open earlier?"));
    }

    #[tokio::test]
    async fn empty_question_never_reaches_the_model() {
        let model = Arc::new(RecordingModel::default());
        let advisor = Advisor::new(model.clone());

        let err = advisor.ask(&snapshot(), "  \n").await.unwrap_err();
        assert_eq!(err, AdvisorError::EmptyQuestion);
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn service_failure_is_returned_once_without_retry() {
        let model = Arc::new(RecordingModel {
            prompts: Mutex::new(Vec::new()),
            fail_with: Some(AdvisorError::QuotaExceeded("daily limit".to_string())),
        });
        let advisor = Advisor::new(model.clone());

        let err = advisor.ask(&snapshot(), "Any tips?").await.unwrap_err();
        assert!(err.is_service_error());
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }
}
