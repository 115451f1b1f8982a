//! RECOVER server binary.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recover::adapters::ai::{GeminiConfig, GeminiProvider, MockAIProvider};
use recover::adapters::http::AppState;
use recover::adapters::memory::InMemoryClinicStore;
use recover::config::{AiConfig, AiProvider as ProviderKind, AppConfig};
use recover::domain::catalog::reference_catalog;
use recover::ports::{AIProvider, ClinicStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config);
    config.validate().context("validating configuration")?;

    let provider = build_provider(&config.ai)?;
    let info = provider.provider_info();
    tracing::info!(
        provider = %info.name,
        model = %info.model,
        max_context_tokens = info.max_context_tokens,
        "text generation ready"
    );

    let store: Arc<dyn ClinicStore> =
        Arc::new(InMemoryClinicStore::seeded(config.clinic.seed_patients));
    tracing::info!(patients = config.clinic.seed_patients, "patient roster seeded");

    let app = AppState::build(store, provider, reference_catalog()).router(&config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(%addr, environment = ?config.server.environment, "RECOVER listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_provider(config: &AiConfig) -> anyhow::Result<Arc<dyn AIProvider>> {
    match config.provider {
        ProviderKind::Gemini => {
            let api_key = config
                .gemini_api_key
                .clone()
                .context("RECOVER__AI__GEMINI_API_KEY is not set")?;
            let mut gemini = GeminiConfig::new(api_key)
                .with_model(&config.model)
                .with_base_url(&config.base_url)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(temperature) = config.temperature {
                gemini = gemini.with_default_temperature(temperature);
            }
            Ok(Arc::new(GeminiProvider::new(gemini)?))
        }
        ProviderKind::Mock => {
            tracing::warn!("using the mock text-generation provider; replies are canned");
            Ok(Arc::new(
                MockAIProvider::new()
                    .with_default_response(
                        "Thank you. Let's continue with the next question.",
                    )
                    .with_delay(Duration::from_millis(50)),
            ))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
