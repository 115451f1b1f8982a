//! Application router and handler wiring.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::application::enrichment::{Summarizer, SymptomExtractor};
use crate::application::handlers::dashboard::{
    GetConversationDetailHandler, GetPatientOverviewHandler, ListPatientsHandler,
    UpdatePatientSeverityHandler,
};
use crate::application::handlers::interview::{
    GetInterviewHandler, InterviewSlot, StartInterviewHandler, SubmitResponseHandler,
};
use crate::config::ServerConfig;
use crate::domain::catalog::QuestionCatalog;
use crate::ports::{AIProvider, ClinicStore};

use super::dashboard::{dashboard_routes, DashboardHandlers};
use super::interview::{interview_routes, InterviewHandlers};

/// Every HTTP-facing handler, wired to one store, one provider and one
/// interview slot.
#[derive(Clone)]
pub struct AppState {
    pub interview: InterviewHandlers,
    pub dashboard: DashboardHandlers,
}

impl AppState {
    pub fn build(
        store: Arc<dyn ClinicStore>,
        provider: Arc<dyn AIProvider>,
        catalog: Arc<QuestionCatalog>,
    ) -> Self {
        let slot = InterviewSlot::new();

        let extractor = Arc::new(SymptomExtractor::new(
            provider.clone(),
            store.clone(),
            catalog.clone(),
        ));
        let summarizer = Arc::new(Summarizer::new(provider.clone(), store.clone()));

        let interview = InterviewHandlers::new(
            Arc::new(StartInterviewHandler::new(
                store.clone(),
                provider,
                catalog.clone(),
                slot.clone(),
            )),
            Arc::new(SubmitResponseHandler::new(
                store.clone(),
                extractor,
                summarizer,
                slot.clone(),
            )),
            Arc::new(GetInterviewHandler::new(slot)),
        );

        let dashboard = DashboardHandlers::new(
            Arc::new(ListPatientsHandler::new(store.clone())),
            Arc::new(GetPatientOverviewHandler::new(store.clone(), catalog)),
            Arc::new(UpdatePatientSeverityHandler::new(store.clone())),
            Arc::new(GetConversationDetailHandler::new(store)),
        );

        Self {
            interview,
            dashboard,
        }
    }

    /// Full router with request tracing, CORS and a request timeout.
    pub fn router(self, config: &ServerConfig) -> Router {
        Router::new()
            .route("/health", get(health))
            .merge(interview_routes(self.interview))
            .merge(dashboard_routes(self.dashboard))
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(cors_layer(config))
            .layer(TraceLayer::new_for_http())
    }
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && !config.is_production() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}
