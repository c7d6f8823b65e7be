#![deny(missing_docs)]
//! DevScope command-line interface.
//!
//! Provides batch analysis of raw repository dumps plus re-runs of the
//! translation, modeling, and prediction stages over existing artifacts.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use devscope_core::{
    FILTERED_ARTIFACT, PREDICTIVE_ARTIFACT, ProjectType, StdFileSystem, TRANSLATED_ARTIFACT,
    build_from_dump, generate_predictive_profile, load_filtered_profile, load_translated_profile,
    predict_project_success, render_json, render_prediction_text, render_predictive_text,
    render_translated_text, save_artifact, translate,
};
use log::{debug, info};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "devscope", version, about = "DevScope CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(&["file", "dump", "dir"])
))]
struct DumpSourceArgs {
    /// File containing dump paths (one per line).
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Single dump file to analyze.
    #[arg(long)]
    dump: Option<PathBuf>,
    /// Directory containing dump files to analyze.
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct AnalyzeArgs {
    /// Output directory for the JSON artifacts, one subdirectory per dump.
    #[arg(short, long, default_value = "devscope-out")]
    output: PathBuf,
    /// Maximum number of dumps processed concurrently.
    #[arg(short = 'j', long, default_value_t = 4)]
    concurrency: usize,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum ProjectTypeArg {
    ApiService,
    CliTool,
    DataPipeline,
    MlModel,
    FrontendApp,
    FullstackApp,
    Infrastructure,
    PluginSystem,
}

impl ProjectTypeArg {
    fn into_core(self) -> ProjectType {
        match self {
            Self::ApiService => ProjectType::ApiService,
            Self::CliTool => ProjectType::CliTool,
            Self::DataPipeline => ProjectType::DataPipeline,
            Self::MlModel => ProjectType::MlModel,
            Self::FrontendApp => ProjectType::FrontendApp,
            Self::FullstackApp => ProjectType::FullstackApp,
            Self::Infrastructure => ProjectType::Infrastructure,
            Self::PluginSystem => ProjectType::PluginSystem,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze raw dumps end to end and write the three JSON artifacts.
    Analyze {
        #[command(flatten)]
        source: DumpSourceArgs,
        #[command(flatten)]
        run: AnalyzeArgs,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Re-run profile translation from an existing filtered artifact.
    Translate {
        /// Path to a filtered.json artifact.
        #[arg(long)]
        filtered: PathBuf,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Re-run predictive modeling from an existing translated artifact.
    Model {
        /// Path to a translated.json artifact.
        #[arg(long)]
        translated: PathBuf,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Predict success for one project type from an existing translated
    /// artifact.
    Predict {
        /// Path to a translated.json artifact.
        #[arg(long)]
        translated: PathBuf,
        /// Project type to predict.
        #[arg(long, value_enum)]
        project_type: ProjectTypeArg,
        #[command(flatten)]
        report: OutputArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            run,
            report,
        } => {
            let source = resolve_source_args(&source)?;
            run_analyze(source, run.output, run.concurrency, report).await?
        }
        Commands::Translate { filtered, report } => run_translate(&filtered, &report).await?,
        Commands::Model { translated, report } => run_model(&translated, &report).await?,
        Commands::Predict {
            translated,
            project_type,
            report,
        } => run_predict(&translated, project_type.into_core(), &report).await?,
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

enum DumpSource {
    File(PathBuf),
    Dump(PathBuf),
    Dir(PathBuf),
}

/// Outcome of analyzing one dump file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DumpReport {
    /// Dump file the report covers.
    source: PathBuf,
    /// Whether the analysis ran to completion.
    analysis_status: DumpStatus,
    /// Repositories found in the dump.
    repositories: usize,
    /// Commits found across those repositories.
    total_commits: u64,
    /// Directory the three artifacts were written to.
    artifact_dir: Option<PathBuf>,
    /// Translated-profile summary for the text report.
    #[serde(skip)]
    summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
enum DumpStatus {
    Analyzed,
    Failed(String),
}

impl DumpReport {
    fn failed(source: PathBuf, error: impl Into<String>) -> Self {
        Self {
            source,
            analysis_status: DumpStatus::Failed(error.into()),
            repositories: 0,
            total_commits: 0,
            artifact_dir: None,
            summary: String::new(),
        }
    }
}

async fn run_analyze(
    source: DumpSource,
    output: PathBuf,
    concurrency: usize,
    report: OutputArgs,
) -> CliResult<()> {
    let dumps = load_dump_paths(source).await?;
    if dumps.is_empty() {
        println!("No dumps found to analyze.");
        return Ok(());
    }

    info!("analyzing {} dump(s)", dumps.len());
    let concurrency = if concurrency == 0 { 1 } else { concurrency };
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for dump in dumps {
        let permit = semaphore.clone().acquire_owned().await?;
        let output = output.clone();
        tasks.spawn(async move {
            let _permit = permit;
            analyze_dump(dump, output).await
        });
    }

    let mut reports = Vec::new();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => reports.push(DumpReport::failed(PathBuf::from("."), err.to_string())),
        }
    }
    reports.sort_by(|a, b| a.source.cmp(&b.source));

    emit_analyze_reports(&reports, &report).await?;

    Ok(())
}

async fn analyze_dump(path: PathBuf, output_root: PathBuf) -> DumpReport {
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(err) => return DumpReport::failed(path, err.to_string()),
    };

    let filtered = build_from_dump(&text);
    let translated = translate(&filtered);
    let predictive = generate_predictive_profile(&translated);

    let artifact_dir = output_root.join(dump_dir_name(&path));
    let fs = StdFileSystem::new();
    if let Err(err) = save_artifact(&fs, &artifact_dir.join(FILTERED_ARTIFACT), &filtered) {
        return DumpReport::failed(path, err.to_string());
    }
    if let Err(err) = save_artifact(&fs, &artifact_dir.join(TRANSLATED_ARTIFACT), &translated) {
        return DumpReport::failed(path, err.to_string());
    }
    if let Err(err) = save_artifact(&fs, &artifact_dir.join(PREDICTIVE_ARTIFACT), &predictive) {
        return DumpReport::failed(path, err.to_string());
    }
    debug!("wrote artifacts to {}", artifact_dir.display());

    info!(
        "analyzed {}: {} repositories, {} commits",
        path.display(),
        filtered.repositories.len(),
        filtered.total_commits
    );

    DumpReport {
        source: path,
        analysis_status: DumpStatus::Analyzed,
        repositories: filtered.repositories.len(),
        total_commits: filtered.total_commits,
        artifact_dir: Some(artifact_dir),
        summary: render_translated_text(&translated),
    }
}

async fn run_translate(filtered_path: &Path, report: &OutputArgs) -> CliResult<()> {
    let fs = StdFileSystem::new();
    let filtered = load_filtered_profile(&fs, filtered_path)?;
    let translated = translate(&filtered);
    info!(
        "translated profile over {} repositories",
        translated.metadata.total_repositories
    );

    let contents = match report.format {
        OutputFormat::Text => render_translated_text(&translated),
        OutputFormat::Json => render_json(&translated)?,
    };
    emit_output(report, contents).await
}

async fn run_model(translated_path: &Path, report: &OutputArgs) -> CliResult<()> {
    let fs = StdFileSystem::new();
    let translated = load_translated_profile(&fs, translated_path)?;
    let predictive = generate_predictive_profile(&translated);
    info!(
        "modeled profile based on {} repositories",
        predictive.metadata.based_on_repos
    );

    let contents = match report.format {
        OutputFormat::Text => render_predictive_text(&predictive),
        OutputFormat::Json => render_json(&predictive)?,
    };
    emit_output(report, contents).await
}

async fn run_predict(
    translated_path: &Path,
    project_type: ProjectType,
    report: &OutputArgs,
) -> CliResult<()> {
    let fs = StdFileSystem::new();
    let translated = load_translated_profile(&fs, translated_path)?;
    let prediction = predict_project_success(project_type, &translated);
    info!(
        "predicted {}: success {:.3}",
        prediction.project_type, prediction.success_likelihood
    );

    let contents = match report.format {
        OutputFormat::Text => render_prediction_text(&prediction),
        OutputFormat::Json => render_json(&prediction)?,
    };
    emit_output(report, contents).await
}

fn resolve_source_args(source: &DumpSourceArgs) -> CliResult<DumpSource> {
    if let Some(file) = source.file.clone() {
        return Ok(DumpSource::File(file));
    }
    if let Some(dump) = source.dump.clone() {
        return Ok(DumpSource::Dump(dump));
    }
    if let Some(dir) = source.dir.clone() {
        return Ok(DumpSource::Dir(dir));
    }
    Err("no dump source provided".into())
}

async fn load_dump_paths(source: DumpSource) -> CliResult<Vec<PathBuf>> {
    match source {
        DumpSource::File(file) => {
            let contents = tokio::fs::read_to_string(&file).await?;
            Ok(contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(PathBuf::from)
                .collect())
        }
        DumpSource::Dump(path) => Ok(vec![path]),
        DumpSource::Dir(dir) => load_dump_paths_from_dir(&dir).await,
    }
}

async fn load_dump_paths_from_dir(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut dumps = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        if !file_type.is_file() {
            continue;
        }
        let entry_path = entry.path();
        if is_hidden_path(&entry_path) {
            continue;
        }
        dumps.push(entry_path);
    }
    dumps.sort();
    Ok(dumps)
}

fn is_hidden_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Artifact subdirectory for a dump file: its stem, or "dump" as fallback.
fn dump_dir_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("dump")
        .to_string()
}

async fn emit_analyze_reports(reports: &[DumpReport], output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_analyze_text(reports),
        OutputFormat::Json => render_json(reports)?,
    };
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_analyze_text(reports: &[DumpReport]) -> String {
    let mut output = String::new();
    for report in reports {
        let _ = writeln!(output, "Dump: {}", report.source.display());
        match &report.analysis_status {
            DumpStatus::Analyzed => {
                let _ = writeln!(output, "Status: analyzed");
            }
            DumpStatus::Failed(error) => {
                let _ = writeln!(output, "Status: failed ({error})");
                let _ = writeln!(output);
                continue;
            }
        }
        if let Some(dir) = &report.artifact_dir {
            let _ = writeln!(output, "Artifacts: {}", dir.display());
        }
        let _ = writeln!(output, "Repositories: {}", report.repositories);
        let _ = writeln!(output, "Total commits: {}", report.total_commits);
        if !report.summary.is_empty() {
            let _ = writeln!(output, "{}", report.summary.trim_end());
        }
        let _ = writeln!(output);
    }
    output
}
