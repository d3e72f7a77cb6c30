mod analyze;
mod backend;
mod projects;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use protocol::ApiError;

use crate::analyze::AnalyzeArgs;
use crate::backend::ReqwestBackend;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing user id; pass --user-id or set MEDAI_USER_ID")]
    MissingUserId,
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
    #[error("cannot read {path}: {source}")]
    ReadInput { path: PathBuf, source: std::io::Error },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no interpretation to save")]
    NoReport,
    #[error("refusing to delete {0:?} without --yes")]
    Unconfirmed(String),
}

#[derive(Parser, Debug)]
#[command(name = "medai", about = "MedAI gene-expression clustering CLI")]
struct Cli {
    #[arg(long, env = "MEDAI_API_BASE_URL")]
    base_url: String,

    #[arg(long, env = "MEDAI_USER_ID")]
    user_id: Option<String>,

    /// Whole-request timeout; clustering large datasets is slow.
    #[arg(long, default_value_t = 300)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cluster a dataset, print the result and its interpretation.
    Analyze(AnalyzeArgs),
    Projects(ProjectsCommand),
    Report(ReportCommand),
}

#[derive(Args, Debug)]
struct ProjectsCommand {
    #[command(subcommand)]
    command: projects::ProjectsSubcommand,
}

#[derive(Args, Debug)]
struct ReportCommand {
    #[command(subcommand)]
    command: ReportSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReportSubcommand {
    /// Upload a markdown file as a saved report.
    Upload { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()?;
    let backend = ReqwestBackend::new(http, &cli.base_url);
    let owner = cli.user_id.as_deref().map(str::trim).filter(|id| !id.is_empty());

    match cli.command {
        Command::Analyze(args) => analyze::run(&backend, owner, args).await,
        Command::Projects(projects) => {
            projects::run(&backend, owner.ok_or(CliError::MissingUserId)?, projects.command).await
        }
        Command::Report(report) => match report.command {
            ReportSubcommand::Upload { file } => {
                projects::upload_report(&backend, owner.ok_or(CliError::MissingUserId)?, &file).await
            }
        },
    }
}
