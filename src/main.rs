use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use study_technique::config::{LoggingSettings, Settings};
use study_technique::core::{CategoryLexicon, Predictor};
use study_technique::routes::{self, AppState};
use study_technique::services::{GeminiClient, GenerationConfig, KnnClassifier};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);
    info!("Starting study technique prediction service...");

    let classifier = KnnClassifier::load(&settings.model.path)
        .map_err(|e| startup_error("Failed to load classifier model", e))?;

    info!(
        "Classifier loaded from {} (k={}, {} samples)",
        settings.model.path,
        classifier.k(),
        classifier.sample_count()
    );

    let explainer = GeminiClient::new(
        settings.gemini.endpoint.clone(),
        settings.gemini.model.clone(),
        settings.gemini.api_key.clone(),
        GenerationConfig::from(&settings.generation),
        settings.gemini.timeout_secs.map(Duration::from_secs),
    )
    .map_err(|e| startup_error("Failed to create Gemini client", e))?;

    info!("Gemini client initialized (model: {})", explainer.model());

    let predictor = Predictor::new(
        Arc::new(CategoryLexicon::standard()),
        Arc::new(classifier),
        Arc::new(explainer),
    );

    let app_state = AppState { predictor };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
