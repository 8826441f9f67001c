use clap::Parser;
use std::sync::Arc;
use tracing::info;
use voxlog_cloud::{
    GoogleSentimentAnalyzer, GoogleSpeechToText, GoogleTextToSpeech, MockSentimentAnalyzer,
    MockSpeechToText, MockTextToSpeech, SentimentAnalyzer, SpeechToText, TextToSpeech,
};
use voxlog_core::VoxlogConfig;
use voxlog_gateway::{AppState, GatewayServer};
use voxlog_store::Store;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, default_value = "voxlog.toml")]
    config: String,

    /// Bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Recordings folder (overrides config)
    #[arg(long)]
    recordings_dir: Option<String>,

    /// Synthesized-speech folder (overrides config)
    #[arg(long)]
    synthesized_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
    let args = Args::parse();

    let mut config = VoxlogConfig::load_or_default(&args.config);
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.recordings_dir {
        config.storage.recordings_dir = dir;
    }
    if let Some(dir) = args.synthesized_dir {
        config.storage.synthesized_dir = dir;
    }

    let store = Store::new(&config.storage.recordings_dir, &config.storage.synthesized_dir);
    store.ensure_dirs().await?;
    info!(
        "Storage ready: {} / {}",
        config.storage.recordings_dir, config.storage.synthesized_dir
    );

    let (stt, tts, sentiment) = build_providers(&config)?;
    info!(
        "Providers: stt={} tts={} sentiment={}",
        stt.provider_name(),
        tts.provider_name(),
        sentiment.provider_name()
    );

    let state = AppState::new(store, stt, tts, sentiment);
    let server = GatewayServer::new(state, &config.server.host, config.server.port);
    let handle = server.start();

    handle.await?;
    Ok(())
}

/// Google clients when an API key is present, mocks otherwise.
#[allow(clippy::type_complexity)]
fn build_providers(
    config: &VoxlogConfig,
) -> anyhow::Result<(
    Arc<dyn SpeechToText>,
    Arc<dyn TextToSpeech>,
    Arc<dyn SentimentAnalyzer>,
)> {
    match std::env::var("GOOGLE_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok((
            Arc::new(GoogleSpeechToText::new(&key, &config.speech, &config.cloud)?),
            Arc::new(GoogleTextToSpeech::new(&key, &config.speech, &config.cloud)?),
            Arc::new(GoogleSentimentAnalyzer::new(&key, &config.cloud)?),
        )),
        _ => {
            info!("GOOGLE_API_KEY not set; using mock providers");
            Ok((
                Arc::new(MockSpeechToText),
                Arc::new(MockTextToSpeech),
                Arc::new(MockSentimentAnalyzer),
            ))
        }
    }
}
