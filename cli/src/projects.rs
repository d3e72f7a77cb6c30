//! `medai projects` and `medai report`: saved-project management.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use protocol::{Project, ProjectInfo};
use workflow::Backend;

use crate::CliError;
use crate::backend::ReqwestBackend;

#[derive(Subcommand, Debug)]
pub enum ProjectsSubcommand {
    List,
    Info {
        name: String,
    },
    Delete {
        name: String,
        #[arg(long)]
        yes: bool,
    },
    /// Save the project's results archive.
    Download {
        name: String,
        /// Defaults to `<name>.zip` in the current directory.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn format_project_line(project: &Project) -> String {
    match &project.last_edited {
        Some(edited) => format!("{}\t{}\t{edited}", project.name, project.id),
        None => format!("{}\t{}", project.name, project.id),
    }
}

pub fn render_project_info(info: &ProjectInfo) -> String {
    let summary = info.summary();
    let mut out = String::new();
    let _ = writeln!(out, "Project:   {}", info.name);
    if let Some(algorithm) = &summary.algorithm {
        let _ = writeln!(out, "Algorithm: {algorithm}");
    }
    if let Some(n_clusters) = summary.n_clusters {
        let _ = writeln!(out, "Clusters:  {n_clusters}");
    }
    if let Some(created_at) = &summary.created_at {
        let _ = writeln!(out, "Created:   {created_at}");
    }
    if let Some(link) = &info.zip_link {
        let _ = writeln!(out, "Archive:   {link}");
    }
    out
}

fn default_archive_path(name: &str) -> PathBuf {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    PathBuf::from(format!("{safe}.zip"))
}

pub async fn run(backend: &ReqwestBackend, owner: &str, command: ProjectsSubcommand) -> Result<(), CliError> {
    match command {
        ProjectsSubcommand::List => {
            let projects = backend.list_projects(owner).await?;
            if projects.is_empty() {
                eprintln!("no saved projects");
            }
            for project in &projects {
                println!("{}", format_project_line(project));
            }
        }
        ProjectsSubcommand::Info { name } => {
            let info = backend.fetch_project_info(owner, &name).await?;
            print!("{}", render_project_info(&info));
        }
        ProjectsSubcommand::Delete { name, yes } => {
            if !yes {
                return Err(CliError::Unconfirmed(name));
            }
            backend.delete_project(owner, &name).await?;
            tracing::info!(project = %name, "project deleted");
        }
        ProjectsSubcommand::Download { name, output } => {
            let dest = output.unwrap_or_else(|| default_archive_path(&name));
            let written = backend.download(owner, &name, &dest).await?;
            println!("{} ({written} bytes)", dest.display());
        }
    }
    Ok(())
}

pub async fn upload_report(backend: &ReqwestBackend, owner: &str, file: &Path) -> Result<(), CliError> {
    let markdown = tokio::fs::read_to_string(file)
        .await
        .map_err(|source| CliError::ReadInput { path: file.to_path_buf(), source })?;
    if markdown.trim().is_empty() {
        return Err(CliError::NoReport);
    }
    backend.upload_report(owner, &markdown).await?;
    tracing::info!(file = %file.display(), "report uploaded");
    Ok(())
}
