//! `medai analyze`: one clustering run driven through the workflow core.

#[cfg(test)]
#[path = "analyze_test.rs"]
mod analyze_test;

use std::cell::RefCell;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use clap::Args;
use protocol::{Algorithm, AlgorithmParams, AnalysisResult, ApiError, DatasetFile, Linkage};
use tokio::io::{AsyncBufReadExt, BufReader};
use workflow::{AnalysisDraft, Backend, Workbench, driver};

use crate::CliError;
use crate::backend::ReqwestBackend;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Dataset file (.csv, .xls, .xlsx, .txt).
    file: PathBuf,

    #[arg(long)]
    project: String,

    #[command(flatten)]
    params: ParamArgs,

    /// Chat about the result after the interpretation is printed.
    #[arg(long)]
    chat: bool,

    /// Upload the interpretation as a report.
    #[arg(long)]
    save_report: bool,
}

#[derive(Args, Debug, Default)]
pub struct ParamArgs {
    #[arg(long, default_value = "auto", value_parser = parse_algorithm)]
    algorithm: Algorithm,
    #[arg(long)]
    clusters: Option<u32>,
    #[arg(long)]
    max_iterations: Option<u32>,
    #[arg(long, value_parser = parse_linkage)]
    linkage: Option<Linkage>,
    #[arg(long)]
    epsilon: Option<f64>,
    #[arg(long)]
    min_samples: Option<u32>,
}

fn parse_algorithm(raw: &str) -> Result<Algorithm, String> {
    raw.parse().map_err(|err: ApiError| err.user_message())
}

fn parse_linkage(raw: &str) -> Result<Linkage, String> {
    raw.parse().map_err(|err: ApiError| err.user_message())
}

impl ParamArgs {
    /// Algorithm defaults overridden by the flags given. A flag that the
    /// chosen algorithm does not take is an error.
    pub fn to_params(&self) -> Result<AlgorithmParams, ApiError> {
        let stray = |flag: &str| {
            ApiError::validation(format!("--{flag} does not apply to {}", self.algorithm.label()))
        };
        let params = match AlgorithmParams::defaults_for(self.algorithm) {
            AlgorithmParams::Auto => AlgorithmParams::Auto,
            AlgorithmParams::Kmeans { cluster_count, max_iterations } => AlgorithmParams::Kmeans {
                cluster_count: self.clusters.unwrap_or(cluster_count),
                max_iterations: self.max_iterations.unwrap_or(max_iterations),
            },
            AlgorithmParams::Agglomerative { linkage } => {
                AlgorithmParams::Agglomerative { linkage: self.linkage.unwrap_or(linkage) }
            }
            AlgorithmParams::Dbscan { epsilon, min_samples } => AlgorithmParams::Dbscan {
                epsilon: self.epsilon.unwrap_or(epsilon),
                min_samples: self.min_samples.unwrap_or(min_samples),
            },
        };

        let algorithm = self.algorithm;
        if self.clusters.is_some() && algorithm != Algorithm::Kmeans {
            return Err(stray("clusters"));
        }
        if self.max_iterations.is_some() && algorithm != Algorithm::Kmeans {
            return Err(stray("max-iterations"));
        }
        if self.linkage.is_some() && algorithm != Algorithm::Agglomerative {
            return Err(stray("linkage"));
        }
        if self.epsilon.is_some() && algorithm != Algorithm::Dbscan {
            return Err(stray("epsilon"));
        }
        if self.min_samples.is_some() && algorithm != Algorithm::Dbscan {
            return Err(stray("min-samples"));
        }
        params.validate()?;
        Ok(params)
    }
}

/// Plain-text overview of a clustering result.
pub fn render_summary(result: &AnalysisResult) -> String {
    let summary = result.summary();
    let mut out = String::new();
    if let Some(algorithm) = &summary.algorithm {
        let _ = writeln!(out, "Algorithm: {algorithm}");
    }
    let _ = writeln!(out, "Samples:   {}", result.clusters.len());
    let _ = writeln!(out, "Clusters:  {}", summary.n_clusters.unwrap_or(result.clusters.distinct_clusters() as u64));
    for (cluster_id, points) in result.clusters.groups() {
        let _ = writeln!(out, "  cluster {cluster_id}: {} samples", points.len());
    }
    out
}

pub async fn run(backend: &ReqwestBackend, owner: Option<&str>, args: AnalyzeArgs) -> Result<(), CliError> {
    let owner = owner.ok_or(CliError::MissingUserId)?;
    let params = args.params.to_params()?;
    let bytes = tokio::fs::read(&args.file)
        .await
        .map_err(|source| CliError::ReadInput { path: args.file.clone(), source })?;
    let name = args.file.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    let draft = AnalysisDraft { dataset: Some(DatasetFile::new(name, bytes)), project_name: args.project, params };

    let cell = RefCell::new(Workbench::default());
    tracing::info!(file = %args.file.display(), algorithm = %params.algorithm(), "submitting analysis");
    driver::run_analysis(&cell, backend, &draft, Some(owner)).await?;

    let report = {
        let workbench = cell.borrow();
        if let Some(err) = workbench.analysis().error() {
            return Err(err.clone().into());
        }
        if let Some(result) = workbench.analysis().result() {
            print!("{}", render_summary(&result));
        }
        let interpretation = workbench.assistant().interpretation();
        if let Some(text) = &interpretation.text {
            println!("\n{text}\n");
        }
        workbench.assistant().report_text().map(str::to_owned)
    };

    if args.save_report {
        let markdown = report.ok_or(CliError::NoReport)?;
        backend.upload_report(owner, &markdown).await?;
        tracing::info!("report saved");
    }

    if args.chat {
        chat_repl(&cell, backend).await?;
    }
    Ok(())
}

async fn chat_repl(cell: &RefCell<Workbench>, backend: &ReqwestBackend) -> Result<(), CliError> {
    cell.borrow_mut().open_chat();
    println!("Chat with MedAI about this result. Empty line or Ctrl-D ends the chat.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }
        if let Err(err) = driver::send_chat_message(cell, backend, &line).await {
            eprintln!("{}", err.user_message());
            continue;
        }
        if let Some(reply) = cell.borrow().assistant().messages().last() {
            println!("\n{}\n", reply.content);
        }
    }

    cell.borrow_mut().close_chat();
    Ok(())
}
