//! docsift CLI - document outline and persona-relevance extraction

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use docsift::{outline_file, process_collection_in_dir, CollectionRequest, DocumentRef, PipelineConfig};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Extract document outlines and persona-relevant content", long_about = None)]
struct Cli {
    /// Emit heuristic traces (also honors RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    /// Process documents sequentially
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a PDF, or of every PDF in a directory
    Outline {
        /// Input PDF file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory for <stem>.json files (stdout for a single
        /// file if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Select persona-relevant sections across a document collection
    Collection {
        /// Collection request JSON
        #[arg(value_name = "REQUEST")]
        request: PathBuf,

        /// Directory holding the collection's PDFs (defaults to
        /// <request dir>/PDFs)
        #[arg(long, value_name = "DIR")]
        pdfs: Option<PathBuf>,

        /// Output file (defaults to <request dir>/collection_output.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Collection request JSON, as produced by upstream tooling.
#[derive(Deserialize)]
struct RequestFile {
    #[serde(default)]
    documents: Vec<RequestDocument>,
    #[serde(default)]
    persona: Option<RequestPersona>,
    #[serde(default)]
    job_to_be_done: Option<RequestJob>,
}

#[derive(Deserialize)]
struct RequestDocument {
    filename: String,
}

#[derive(Deserialize)]
struct RequestPersona {
    role: String,
}

#[derive(Deserialize)]
struct RequestJob {
    task: String,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = PipelineConfig::new().with_debug(cli.debug);
    if cli.sequential {
        config = config.sequential();
    }

    let result = match cli.command {
        Commands::Outline { input, output } => cmd_outline(&input, output.as_deref(), &config),
        Commands::Collection {
            request,
            pdfs,
            output,
        } => cmd_collection(&request, pdfs.as_deref(), output.as_deref(), &config),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    config: &PipelineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if input.is_dir() {
        return cmd_outline_batch(input, output, config);
    }

    let outline = outline_file(input, config)?;
    let json = serde_json::to_string_pretty(&outline)?;

    if let Some(out) = output {
        let path = resolve_output_path(out, input)?;
        fs::write(&path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{json}");
    }

    Ok(())
}

fn cmd_outline_batch(
    input_dir: &Path,
    output: Option<&Path>,
    config: &PipelineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input_dir.join("output"));
    fs::create_dir_all(&output_dir)?;

    let mut pdf_files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdf_files.sort();

    if pdf_files.is_empty() {
        println!("{}", "No PDF files found".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new(pdf_files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    for pdf in &pdf_files {
        let name = pdf
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(name.clone());

        let outline = outline_file(pdf, config)?;
        let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
        let out_path = output_dir.join(format!("{stem}.json"));
        fs::write(&out_path, serde_json::to_string_pretty(&outline)?)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{} {} documents in {:.2}s -> {}",
        "Processed".green().bold(),
        pdf_files.len(),
        start.elapsed().as_secs_f64(),
        output_dir.display()
    );

    Ok(())
}

fn cmd_collection(
    request_path: &Path,
    pdfs: Option<&Path>,
    output: Option<&Path>,
    config: &PipelineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let request_dir = request_path.parent().unwrap_or_else(|| Path::new("."));
    let pdf_dir = pdfs
        .map(Path::to_path_buf)
        .unwrap_or_else(|| request_dir.join("PDFs"));
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| request_dir.join("collection_output.json"));

    let raw = fs::read_to_string(request_path)?;
    let request_file: RequestFile = serde_json::from_str(&raw)?;

    let documents: Vec<DocumentRef> = request_file
        .documents
        .into_iter()
        .map(|d| DocumentRef::new(d.filename))
        .collect();
    let persona = request_file
        .persona
        .map(|p| p.role)
        .unwrap_or_else(|| "Travel Planner".to_string());
    let task = request_file
        .job_to_be_done
        .map(|j| j.task)
        .unwrap_or_else(|| "Plan a trip of 4 days for a group of 10 college friends.".to_string());

    let request = CollectionRequest::new(documents, persona, task);

    let start = Instant::now();
    let result = process_collection_in_dir(&request, &pdf_dir, config);
    fs::write(&output_path, serde_json::to_string_pretty(&result)?)?;

    println!(
        "{} {} sections, {} subsections in {:.2}s",
        "Selected".green().bold(),
        result.extracted_sections.len(),
        result.subsection_analysis.len(),
        start.elapsed().as_secs_f64()
    );
    println!("{} {}", "Saved to".green(), output_path.display());

    for section in &result.extracted_sections {
        println!(
            "  {} {}. {} ({}, p{})",
            "├─".dimmed(),
            section.importance_rank,
            section.section_title,
            section.document,
            section.page_number
        );
    }

    Ok(())
}

/// Treat an existing directory as a target for `<stem>.json`, anything
/// else as the output file itself.
fn resolve_output_path(output: &Path, input: &Path) -> Result<PathBuf, std::io::Error> {
    if output.is_dir() {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        Ok(output.join(format!("{stem}.json")))
    } else {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(output.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_file_defaults() {
        let parsed: RequestFile = serde_json::from_str("{}").unwrap();
        assert!(parsed.documents.is_empty());
        assert!(parsed.persona.is_none());
        assert!(parsed.job_to_be_done.is_none());
    }

    #[test]
    fn test_request_file_full() {
        let raw = r#"{
            "documents": [{"filename": "a.pdf"}, {"filename": "b.pdf"}],
            "persona": {"role": "HR Professional"},
            "job_to_be_done": {"task": "prepare onboarding forms"}
        }"#;
        let parsed: RequestFile = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.documents.len(), 2);
        assert_eq!(parsed.persona.unwrap().role, "HR Professional");
        assert_eq!(parsed.job_to_be_done.unwrap().task, "prepare onboarding forms");
    }

    #[test]
    fn test_resolve_output_path_directory() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_output_path(dir.path(), Path::new("report.pdf")).unwrap();
        assert_eq!(resolved, dir.path().join("report.json"));
    }
}
