//! geoquiz binary entry point.

use std::process::ExitCode;

use geoquiz::api::{serve, AppState};
use geoquiz::cli::{self, Args};
use geoquiz::config::Config;
use geoquiz::logging;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run 'geoquiz --help' for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(args)?;
    logging::init_with_filter(config.log_filter()).ok();

    info!("geoquiz v{}", env!("CARGO_PKG_VERSION"));
    info!(backend = %config.auth.backend, "auth backend selected");
    if let Some(ref project) = config.firebase.project_id {
        info!(project = %project, "firebase project");
    }

    let auth = config.build_auth_context()?;

    // Resolve the signed-in user without holding up the server.
    let resolution = auth.spawn_identity_resolution();
    tokio::spawn(async move {
        match resolution.await {
            Ok(Ok(Some(name))) => info!(display_name = %name, "startup identity resolved"),
            Ok(Ok(None)) => info!("no user signed in at startup"),
            Ok(Err(e)) => warn!("startup identity resolution failed: {}", e),
            Err(e) => warn!("startup identity task failed: {}", e),
        }
    });

    let questions = geoquiz::quiz::questions();
    info!(count = questions.len(), "quiz questions loaded");

    let server_config = config.to_server_config()?;
    serve(server_config, AppState::new(auth)).await?;

    info!("geoquiz stopped");
    Ok(())
}
