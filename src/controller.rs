//! Calculation Controller
//!
//! Drives one statement form: validates input, calls the calculation API,
//! paints the result panel and records history. State is owned by the
//! controller; the caller only hands in a form source and reads back the
//! outcome.
//!
//! Phases of a submission:
//!
//! ```text
//! Idle -> Validating -> Idle                      (invalid input)
//!                    -> Submitting -> Idle        (request failed)
//!                                  -> Rendered
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

use crate::api::{CalculationApi, CalculationRequest, CalculationResult, RequestError};
use crate::form::{self, FormSource, ValidationError};
use crate::history::{HistoryCache, KeyValueStore};
use crate::notify::NotificationCenter;
use crate::render::{ResultPanel, ResultView};
use crate::statement::StatementKind;

pub const EXAMPLE_LOADED: &str =
    "✅ Dados de exemplo carregados! Clique em \"Calcular\" para ver os resultados.";
pub const EXAMPLE_FAILED: &str = "Não foi possível carregar os dados de exemplo";
pub const FORM_CLEARED: &str = "Formulário limpo com sucesso!";

/// Interaction phase of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    Rendered,
}

/// Shared visibility flag of the loading indicator
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    visible: Arc<AtomicBool>,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the indicator until the returned guard is dropped
    pub fn show(&self) -> LoadingGuard {
        self.visible.store(true, Ordering::SeqCst);
        LoadingGuard {
            visible: Arc::clone(&self.visible),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

/// Hides the loading indicator on drop
#[derive(Debug)]
pub struct LoadingGuard {
    visible: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.visible.store(false, Ordering::SeqCst);
    }
}

/// Why a submission did not render
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl SubmitError {
    /// Message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(e) => e.to_string(),
            SubmitError::Request(e) => e.user_message(),
        }
    }
}

/// A rendered submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub sequence: u64,
    pub request: CalculationRequest,
    pub result: CalculationResult,
    pub view: ResultView,
    /// History length after recording, `None` when nothing was recorded
    pub history_len: Option<usize>,
}

/// Owns the state of one statement form
pub struct CalculationController<A, S> {
    kind: StatementKind,
    api: A,
    panel: ResultPanel,
    history: HistoryCache<S>,
    notifications: NotificationCenter,
    loading: LoadingIndicator,
    phase: Phase,
    api_online: Option<bool>,
    sequence: AtomicU64,
}

impl<A: CalculationApi, S: KeyValueStore> CalculationController<A, S> {
    pub fn new(kind: StatementKind, api: A, history: HistoryCache<S>) -> Self {
        Self {
            kind,
            api,
            panel: ResultPanel::new(kind),
            history,
            notifications: NotificationCenter::new(),
            loading: LoadingIndicator::new(),
            phase: Phase::Idle,
            api_online: None,
            sequence: AtomicU64::new(0),
        }
    }

    /// Use an existing indicator, e.g. one shared with a spinner
    pub fn with_loading(mut self, loading: LoadingIndicator) -> Self {
        self.loading = loading;
        self
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn panel(&self) -> &ResultPanel {
        &self.panel
    }

    pub fn history(&self) -> &HistoryCache<S> {
        &self.history
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// Result of the last status check, `None` before the first one
    pub fn api_online(&self) -> Option<bool> {
        self.api_online
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Validate the form, compute the statement and paint the result.
    ///
    /// Every failure is also turned into an error notification; invalid
    /// input never reaches the API.
    pub async fn submit<F: FormSource + ?Sized>(
        &mut self,
        form: &F,
    ) -> Result<SubmitOutcome, SubmitError> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let span = tracing::info_span!("submit", statement = self.kind.slug(), sequence);

        let outcome = self.run_submit(sequence, form).instrument(span).await;

        match &outcome {
            Ok(_) => self.phase = Phase::Rendered,
            Err(e) => {
                self.notifications.error(e.user_message());
                self.phase = Phase::Idle;
            }
        }
        outcome
    }

    async fn run_submit<F: FormSource + ?Sized>(
        &mut self,
        sequence: u64,
        form: &F,
    ) -> Result<SubmitOutcome, SubmitError> {
        self.phase = Phase::Validating;
        let request = form::collect_validated(self.kind, form).map_err(|e| {
            tracing::debug!(field = e.field_id(), error = %e, "Validation failed");
            e
        })?;

        self.panel.clear();
        self.phase = Phase::Submitting;

        let response = {
            let _loading = self.loading.show();
            self.api.calculate(self.kind, &request).await
        };
        let result = response?;
        let view = ResultView::build(self.kind, &result)?;

        self.panel.paint(&view);

        let history_len = if self.kind.keeps_history() {
            match self.history.record_result(&result) {
                Ok(len) => Some(len),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not save history");
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(
            lucro_liquido = result.lucro_liquido(),
            rows = view.rows.len(),
            "Result rendered"
        );

        Ok(SubmitOutcome {
            sequence,
            request,
            result,
            view,
            history_len,
        })
    }

    /// Fetch the sample payload for the form
    pub async fn load_example(&mut self) -> Option<CalculationRequest> {
        match self.api.example(self.kind).await {
            Ok(example) => {
                self.notifications.success(EXAMPLE_LOADED);
                self.phase = Phase::Idle;
                Some(example)
            }
            Err(e) => {
                tracing::error!(statement = self.kind.slug(), error = %e, "Could not load example");
                self.notifications.error(EXAMPLE_FAILED);
                None
            }
        }
    }

    /// Reset the result panel
    pub fn clear(&mut self) {
        self.panel.clear();
        self.phase = Phase::Idle;
        self.notifications.info(FORM_CLEARED);
    }

    /// The form changed since the last result
    pub fn edit(&mut self) {
        self.phase = Phase::Idle;
    }

    pub async fn check_status(&mut self) -> bool {
        let online = self.api.check_status().await;
        if self.api_online != Some(online) {
            tracing::info!(online, "API status changed");
        }
        self.api_online = Some(online);
        online
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RequestResult, CalculationResult};
    use crate::history::MemoryStore;
    use crate::notify::Level;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records calls and answers with a fixed result
    struct FakeApi {
        answer: RequestResult<CalculationResult>,
        calls: Mutex<Vec<CalculationRequest>>,
        loading: LoadingIndicator,
        loading_seen: AtomicBool,
        online: bool,
    }

    impl FakeApi {
        fn answering(answer: RequestResult<CalculationResult>) -> Self {
            Self {
                answer,
                calls: Mutex::new(Vec::new()),
                loading: LoadingIndicator::new(),
                loading_seen: AtomicBool::new(false),
                online: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CalculationApi for FakeApi {
        async fn calculate(
            &self,
            _kind: StatementKind,
            request: &CalculationRequest,
        ) -> RequestResult<CalculationResult> {
            self.loading_seen
                .store(self.loading.is_visible(), Ordering::SeqCst);
            self.calls.lock().unwrap().push(request.clone());
            self.answer.clone()
        }

        async fn example(&self, _kind: StatementKind) -> RequestResult<CalculationRequest> {
            Err(RequestError::Http(404))
        }

        async fn check_status(&self) -> bool {
            self.online
        }
    }

    fn profit(lucro: f64) -> CalculationResult {
        serde_json::from_value(crate::test_utils::dre_success_body(lucro)).unwrap()
    }

    fn controller(api: FakeApi) -> CalculationController<FakeApi, MemoryStore> {
        let loading = api.loading.clone();
        CalculationController::new(
            StatementKind::Dre,
            api,
            HistoryCache::new(MemoryStore::new()),
        )
        .with_loading(loading)
    }

    #[tokio::test]
    async fn test_missing_revenue_never_calls_api() {
        let mut ctrl = controller(FakeApi::answering(Ok(profit(1.0))));

        for form in [vec![], vec![("receita_bruta", "")]] {
            let err = ctrl.submit(form.as_slice()).await.unwrap_err();
            assert!(matches!(
                err,
                SubmitError::Validation(ValidationError::MissingRequired { .. })
            ));
        }

        assert_eq!(ctrl.api().call_count(), 0);
        assert_eq!(ctrl.phase(), Phase::Idle);
        let note = ctrl.notifications().latest().unwrap();
        assert_eq!(note.level, Level::Danger);
        assert_eq!(note.text(), "❌ Informe a Receita Bruta");
    }

    #[tokio::test]
    async fn test_negative_revenue_never_calls_api() {
        let mut ctrl = controller(FakeApi::answering(Ok(profit(1.0))));

        let err = ctrl.submit(&[("receita_bruta", "-1")]).await.unwrap_err();
        assert_eq!(err.user_message(), "Receita Bruta não pode ser negativa");
        assert_eq!(ctrl.api().call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_renders_and_records() {
        let mut ctrl = controller(FakeApi::answering(Ok(profit(-50.0))));

        let outcome = ctrl.submit(&[("receita_bruta", "10000")]).await.unwrap();
        assert_eq!(outcome.sequence, 1);
        assert_eq!(outcome.history_len, Some(1));
        assert_eq!(ctrl.phase(), Phase::Rendered);

        assert!(ctrl.api().loading_seen.load(Ordering::SeqCst));
        assert!(!ctrl.loading().is_visible());

        assert_eq!(
            ctrl.panel().class("result-lucro-liquido"),
            Some("alert alert-danger")
        );
        assert_eq!(ctrl.history().entries()[0].lucro_liquido, -50.0);

        let sent = &ctrl.api().calls.lock().unwrap()[0];
        assert_eq!(sent.len(), 7);
        assert_eq!(sent.get("impostos"), Some("0"));
    }

    #[tokio::test]
    async fn test_request_failure_hides_loading_and_notifies() {
        let mut ctrl = controller(FakeApi::answering(Err(RequestError::Transport(
            "connection refused".to_string(),
        ))));
        ctrl.submit(&[("receita_bruta", "10")]).await.unwrap_err();

        assert!(ctrl.api().loading_seen.load(Ordering::SeqCst));
        assert!(!ctrl.loading().is_visible());
        assert_eq!(ctrl.phase(), Phase::Idle);
        assert!(!ctrl.panel().is_painted());
        assert!(ctrl.history().entries().is_empty());
        assert_eq!(
            ctrl.notifications().latest().unwrap().message,
            "Não foi possível conectar ao servidor de cálculos"
        );
    }

    #[tokio::test]
    async fn test_failed_request_clears_previous_result() {
        let mut ctrl = controller(FakeApi::answering(Ok(profit(10.0))));
        ctrl.submit(&[("receita_bruta", "10")]).await.unwrap();
        assert!(ctrl.panel().is_painted());

        ctrl.api.answer = Err(RequestError::Http(500));
        let err = ctrl.submit(&[("receita_bruta", "10")]).await.unwrap_err();
        assert_eq!(err.user_message(), "Erro HTTP 500");
        assert!(!ctrl.panel().is_painted());
    }

    #[tokio::test]
    async fn test_balanco_keeps_no_history() {
        let api = FakeApi::answering(Ok(CalculationResult {
            sucesso: true,
            ..Default::default()
        }));
        let mut ctrl = CalculationController::new(
            StatementKind::Balanco,
            api,
            HistoryCache::new(MemoryStore::new()),
        );

        let outcome = ctrl.submit(&[("ativo_circulante", "500")]).await.unwrap();
        assert_eq!(outcome.history_len, None);
        assert!(ctrl.history().entries().is_empty());
    }

    #[tokio::test]
    async fn test_sequence_increments() {
        let mut ctrl = controller(FakeApi::answering(Ok(profit(1.0))));
        ctrl.submit(&[("receita_bruta", "")]).await.unwrap_err();
        let outcome = ctrl.submit(&[("receita_bruta", "1")]).await.unwrap();
        assert_eq!(outcome.sequence, 2);
    }

    #[tokio::test]
    async fn test_clear_edit_example_status() {
        let mut ctrl = controller(FakeApi::answering(Ok(profit(1.0))));
        ctrl.submit(&[("receita_bruta", "1")]).await.unwrap();

        ctrl.edit();
        assert_eq!(ctrl.phase(), Phase::Idle);

        ctrl.clear();
        assert!(!ctrl.panel().is_painted());
        assert_eq!(ctrl.notifications().latest().unwrap().message, FORM_CLEARED);

        assert!(ctrl.load_example().await.is_none());
        assert_eq!(ctrl.notifications().latest().unwrap().message, EXAMPLE_FAILED);

        assert_eq!(ctrl.api_online(), None);
        assert!(ctrl.check_status().await);
        assert_eq!(ctrl.api_online(), Some(true));
    }
}
