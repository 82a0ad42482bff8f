use serde_json::{json, Value};
use timeline_similarity::config::{LoggingSettings, Settings};
use timeline_similarity::{display_similar_entries, Entry, GeminiClient, Profile, SimilarityRequester};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // LOG_LEVEL / LOG_FORMAT win over the configured values
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "json" => subscriber.json().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.pretty().init(),
    }
}

/// Non-object JSON is handed back as the error
fn example_profile() -> Result<Profile, Value> {
    Profile::try_from(json!({
        "timeline": {
            "birth_year": 1990,
            "education": "Bachelor's Degree",
            "career": "Software Engineer",
            "location": "San Francisco"
        }
    }))
}

fn example_entries() -> Result<Vec<Entry>, Value> {
    Ok(vec![Entry::try_from(json!({
        "id": 1,
        "timeline": {
            "birth_year": 1988,
            "education": "Bachelor's Degree",
            "career": "Software Developer",
            "location": "San Francisco"
        }
    }))?])
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&settings.logging);

    info!("Configuration loaded (model: {})", settings.gemini.model);

    let client = match GeminiClient::new(&settings.gemini) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Gemini client: {}", e);
            std::process::exit(1);
        }
    };

    let requester = SimilarityRequester::new(client, settings.matching.max_prompt_bytes);

    let (profile, entries) = match (example_profile(), example_entries()) {
        (Ok(profile), Ok(entries)) => (profile, entries),
        (Err(value), _) | (_, Err(value)) => {
            error!("Example data is not a JSON object: {}", value);
            std::process::exit(1);
        }
    };

    let results = match requester.similar_entries(&profile, &entries).await {
        Ok(results) => results,
        Err(e) => {
            error!("Similarity request failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = display_similar_entries(&results) {
        error!("Failed to print results: {}", e);
        std::process::exit(1);
    }
}
