use scribe_client::{ClientConfig, ClientError, PollEvent, ScribeClient};
use scribe_core::types::DbId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scribe_client=info,scribe_generate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(project_id) = std::env::args().nth(1).and_then(|arg| arg.parse::<DbId>().ok()) else {
        eprintln!("usage: scribe-generate <project-id>");
        std::process::exit(2);
    };

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, "Loaded client configuration");
    let client = ScribeClient::new(&config);

    let result = client
        .run_generation(project_id, |event| match event {
            PollEvent::Progress { generated, total } => {
                tracing::info!(generated, total, "Generation progress");
            }
            PollEvent::FetchFailed { message } => {
                tracing::warn!(error = %message, "Could not refresh progress");
            }
            PollEvent::Completed { count } => {
                tracing::info!(count, "All content generated");
            }
        })
        .await;

    match result {
        Ok(rows) => {
            for row in rows {
                println!("## {}\n\n{}\n", row.name, row.result);
            }
        }
        Err(ClientError::NotEligible { message }) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
        Err(e) => {
            let message = e.api_message().unwrap_or_else(|| e.to_string());
            eprintln!("Generation failed: {message}");
            std::process::exit(1);
        }
    }
}
