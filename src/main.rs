use std::{process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recommender_client::{
    app,
    config::Config,
    services::{
        providers::DEFAULT_RECOMMENDATION_COUNT, HttpRecommendationProvider, RecommendationProvider,
    },
    view::RecommendationView,
};

#[derive(Parser, Debug)]
#[command(name = "recommender-client")]
#[command(about = "Terminal front-end for the product recommendation API", long_about = None)]
struct Args {
    /// Overrides API_BASE_URL from the environment
    #[arg(long)]
    api_base_url: Option<String>,

    /// Number of recommendations to request
    #[arg(short = 'n', long, default_value_t = DEFAULT_RECOMMENDATION_COUNT)]
    count: u32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and render recommendations for one user, then exit
    Recommend { user_id: String },
    /// Check whether the backend has its model loaded
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the rendered view; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommender_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut config = Config::from_env()?;
    if let Some(api_base_url) = args.api_base_url {
        config = config.with_api_base_url(api_base_url);
    }
    tracing::info!(api_base_url = %config.api_base_url, "Configuration loaded");

    let provider = Arc::new(HttpRecommendationProvider::new(&config));

    match args.command {
        Some(Command::Health) => match provider.health().await {
            Ok(health) => {
                println!(
                    "{}: status={} model_loaded={}",
                    health.service, health.status, health.model_loaded
                );
                Ok(if health.is_ok() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            Err(e) => {
                println!("{}", e.user_message());
                Ok(ExitCode::FAILURE)
            }
        },
        Some(Command::Recommend { user_id }) => {
            let view = RecommendationView::with_count(provider, args.count);
            let mut stdout = tokio::io::stdout();
            app::submit(&view, &user_id, &mut stdout).await?;
            let failed = view.state().await.error.is_some();
            view.unmount();
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        None => {
            let view = RecommendationView::with_count(provider, args.count);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            app::run_interactive(&view, stdin, &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
