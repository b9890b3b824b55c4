use clap::Parser;
use keiro::prelude::*;
use std::fs;
use std::time::Instant;

/// A workflow graph validation CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the canonical workflow document JSON file
    workflow_path: String,

    /// Treat unregistered node types as errors instead of warnings
    #[arg(short, long)]
    strict: bool,

    /// Optional path to write a sealed binary artifact when validation passes
    #[arg(short, long)]
    artifact: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. File Loading & Parsing ---
    let load_start = Instant::now();
    let document = fs::read_to_string(&cli.workflow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workflow file '{}': {}",
            &cli.workflow_path, e
        ))
    });
    let workflow = keiro::document::parse(&document)
        .unwrap_or_else(|e| exit_with_error(&format!("Parse failed: {}", e)));
    let load_duration = load_start.elapsed();

    println!(
        "Parsed workflow '{}' ({} nodes)",
        workflow.name,
        workflow.nodes.len()
    );

    // --- 2. Validation ---
    let validate_start = Instant::now();
    let registry = NodeTypeRegistry::builder().build();
    let options = ValidationOptions::default().strict_unknown_types(cli.strict);
    let report = Validator::new(&registry)
        .with_options(options)
        .validate(&workflow);
    let validate_duration = validate_start.elapsed();

    if report.is_empty() {
        println!("\nNo findings. Workflow is valid.");
    } else {
        println!("\n--- Findings ---");
        for issue in report.issues() {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            match &issue.connection {
                Some(connection) => {
                    println!("  [{}] {} ({})", severity, issue.message(), connection)
                }
                None => println!("  [{}] {}", severity, issue.message()),
            }
        }
        println!(
            "{} error(s), {} warning(s)",
            report.errors().count(),
            report.warnings().count()
        );
    }

    // --- 3. Artifact Output ---
    if let Some(artifact_path) = &cli.artifact {
        let artifact = ValidatedWorkflow::seal(workflow, report.clone())
            .unwrap_or_else(|e| exit_with_error(&format!("Cannot seal artifact: {}", e)));
        artifact
            .save(artifact_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write artifact: {}", e)));
        println!("Artifact written to '{}'", artifact_path);
    }

    // --- 4. Summary ---
    println!("\n--- Performance Summary ---");
    println!("Load & Parse:  {:?}", load_duration);
    println!("Validation:    {:?}", validate_duration);
    println!("Total:         {:?}", total_start.elapsed());

    if !report.is_valid() {
        std::process::exit(1);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
