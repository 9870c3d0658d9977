use chemstock::api::{ApiClient, HttpTransport};
use chemstock::cli::{self, Cli, CliContext};
use chemstock::config::{self, database};
use chemstock::errors::Result;
use chemstock::notify::{ConsoleNotifier, Notifier};
use chemstock::store::Session;
use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Tracing first; quiet by default so command output stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. .env is optional, variables may come from the environment
    if dotenv().is_ok() {
        debug!("loaded .env file");
    }

    let cli = Cli::parse();
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    match start(cli, Arc::clone(&notifier)).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "command failed");
            notifier.failure(&e);
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli, notifier: Arc<dyn Notifier>) -> Result<bool> {
    // 3. Configuration: file, then environment
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Backend client and the persisted session it belongs to
    let transport = HttpTransport::new(&app_config.server_url, app_config.request_timeout())?;
    let api = Arc::new(ApiClient::new(Arc::new(transport)));
    let db = database::create_connection(&app_config.store_url)
        .await
        .inspect_err(|e| error!("Failed to open session store: {}", e))?;
    let session = Session::open(db, api, app_config.store_name.clone()).await?;

    // 5. Run the command
    let ctx = CliContext::new(Arc::new(session), notifier, app_config.page_limit);
    cli::run(cli.command, &ctx).await
}
