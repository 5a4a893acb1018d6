//! `prlens` 바이너리 진입점.

use prlens::interface::cli::{Cli, CliAction};

#[tokio::main]
async fn main() {
    let action = Cli::parse_action();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| action.default_log_level().into()),
        )
        .init();

    let result = match action {
        CliAction::Serve { bind } => prlens::serve(bind).await,
        CliAction::InspectConfig => prlens::inspect_config_pretty_json().map(|json| println!("{json}")),
        CliAction::Review(options) => prlens::run(options).await.map(|out| println!("{out}")),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
