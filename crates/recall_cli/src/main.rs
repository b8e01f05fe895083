use anyhow::Context;
use clap::Parser;
use recall_core::{Config, FiveW1H, ResourceKind};
use recall_dashboard::{create_sink, Dashboard};
use recall_web::{create_app, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "RECALL_FEED", default_value = "supabase", help = "Resource feed. Available feeds: supabase (default), memory")]
    feed: String,
    #[arg(long, env = "RECALL_MODEL_KIND", default_value = "gemini", help = "Tutor model. Available models: gemini (default), dummy")]
    model: String,
    #[arg(long)]
    supabase_url: Option<String>,
    #[arg(long)]
    supabase_anon_key: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    model_name: Option<String>,
    /// n8n webhook that receives synced words
    #[arg(long)]
    sync_webhook: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the dashboard HTTP API
    Serve {
        #[arg(long, env = "RECALL_ADDR", default_value = "127.0.0.1:3000")]
        addr: String,
    },
    /// Print the newest incoming resources
    Feed,
    /// Summarize an article and extract key vocabulary
    Analyze {
        /// Read the article from this file instead of stdin
        file: Option<PathBuf>,
    },
    /// Grade a 5W1H recall summary of a podcast or talk
    Review {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "")]
        who: String,
        #[arg(long, default_value = "")]
        what: String,
        #[arg(long, default_value = "")]
        when: String,
        #[arg(long = "where", default_value = "")]
        where_: String,
        #[arg(long, default_value = "")]
        why: String,
        #[arg(long, default_value = "")]
        how: String,
    },
}

impl Cli {
    /// Environment config with explicit flags layered on top.
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(url) = &self.supabase_url {
            config.supabase_url = url.clone();
        }
        if let Some(key) = &self.supabase_anon_key {
            config.supabase_anon_key = key.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(name) = &self.model_name {
            config.model_name = name.clone();
        }
        if let Some(hook) = &self.sync_webhook {
            config.sync_webhook = Some(hook.clone());
        }
        config
    }
}

async fn read_article(file: Option<PathBuf>) -> anyhow::Result<String> {
    let mut text = String::new();
    match file {
        Some(path) => {
            text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            tokio::io::stdin().read_to_string(&mut text).await?;
        }
    }
    Ok(text)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = cli.config();

    let feed = recall_storage::create_feed(&cli.feed, &config)?;
    info!("📡 Resource feed initialized (using {})", feed.name());

    let model = recall_inference::create_model(&cli.model, &config)?;
    info!("🧠 Tutor model initialized successfully (using {})", model.name());

    let sink = create_sink(&config)?;
    info!("✈️ Vocabulary sync initialized (using {})", sink.name());

    let dashboard = Arc::new(Dashboard::new(feed, model, sink));

    match cli.command {
        Commands::Serve { addr } => {
            let resources = dashboard.load_feed().await;
            info!("📥 Loaded {} incoming resources", resources.len());

            let app = create_app(AppState::new(dashboard));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("🚀 Dashboard listening on http://{}", listener.local_addr()?);
            axum::serve(listener, app).await?;
        }
        Commands::Feed => {
            for resource in dashboard.load_feed().await {
                let kind = match resource.kind {
                    ResourceKind::Article => "article",
                    ResourceKind::Video => "video",
                };
                println!("{:<8} {:<12} {} ({}, {})", kind, resource.id, resource.title, resource.source, resource.date);
            }
        }
        Commands::Analyze { file } => {
            let text = read_article(file).await?;
            info!("📰 Analyzing {} characters", text.chars().count());
            let analysis = dashboard.analyze_article(Some(text)).await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Commands::Review { topic, who, what, when, where_, why, how } => {
            let inputs = FiveW1H { who, what, when, where_, why, how };
            info!("🎧 Reviewing summary of \"{}\" ({}/6 answered)", topic, inputs.answered());
            let feedback = dashboard.review_podcast(Some(topic), Some(inputs)).await?;
            println!("{}", serde_json::to_string_pretty(&feedback)?);
        }
    }

    Ok(())
}
