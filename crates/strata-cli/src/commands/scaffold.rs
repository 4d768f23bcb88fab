//! The scaffold command: validate arguments, then run the pipeline for real
//! or against in-memory adapters for `--dry-run`.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use strata_adapters::{DotnetToolchain, LocalFilesystem, MemoryFilesystem, RecordingToolchain};
use strata_core::prelude::*;

use crate::{
    cli::ScaffoldArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
    progress::ConsoleProgress,
};

/// Execute the scaffold command.
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: ScaffoldArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "reading the current directory")?;
    let request = ScaffoldRequest::from_args(args.name.as_deref(), args.path.as_deref(), &cwd)?;

    debug!(
        project = %request.project_name(),
        root = %request.root_path().display(),
        program = %config.toolchain.program,
        "Request validated"
    );

    let toolchain = DotnetToolchain::with_program(config.toolchain.program.as_str());
    if args.dry_run {
        return dry_run(&request, toolchain, &output);
    }

    output.header(&format!(
        "Scaffolding {} in {}",
        request.project_name(),
        request.project_path().display()
    ))?;

    let service = ScaffoldService::new(Box::new(toolchain), Box::new(LocalFilesystem::new()))
        .with_progress(Box::new(ConsoleProgress::new(output.clone())));
    let outcome = service.scaffold(&request)?;

    info!(run_id = %outcome.run_id, "Scaffold finished");

    if output.is_json() {
        output.json(&outcome)?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created successfully at {}",
        outcome.project,
        outcome.root.display()
    ))?;
    print_next_steps(&outcome.root, &output)?;

    Ok(())
}

fn print_next_steps(root: &Path, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", root.display()))?;
    output.print("  dotnet build")?;
    output.print("  docker compose up --build")?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct DryRunReport<'a> {
    dry_run: bool,
    plan: &'a ScaffoldPlan,
    commands: Vec<String>,
    root_exists: bool,
}

/// Run the full pipeline against a recording toolchain and an in-memory
/// filesystem, then report what a real run would do.
fn dry_run(
    request: &ScaffoldRequest,
    toolchain: DotnetToolchain,
    output: &OutputManager,
) -> CliResult<()> {
    let plan = ScaffoldPlan::for_request(request)?;
    let memory = MemoryFilesystem::new();
    let recorder = RecordingToolchain::new(toolchain).materializing(memory.clone());

    ScaffoldService::new(Box::new(recorder.clone()), Box::new(memory)).scaffold(request)?;

    let commands: Vec<String> = recorder.commands().iter().map(ToString::to_string).collect();
    let root_exists = plan.root().exists();

    if output.is_json() {
        output.json(&DryRunReport {
            dry_run: true,
            plan: &plan,
            commands,
            root_exists,
        })?;
        return Ok(());
    }

    output.header(&format!(
        "Dry run: {} would be created at {}",
        plan.project_name,
        plan.root().display()
    ))?;
    if root_exists {
        output.warning(&format!(
            "{} already exists; a real run would stop before writing anything",
            plan.root().display()
        ))?;
    }

    output.print("")?;
    output.print("Layers:")?;
    for layer in &plan.layers {
        output.print(&format!("  {} ({})", layer.name, layer.template.as_str()))?;
    }

    output.print("")?;
    output.print("References:")?;
    for edge in &plan.references {
        let targets: Vec<&str> = edge.to.iter().map(|t| t.name.as_str()).collect();
        output.print(&format!("  {} -> {}", edge.from.name, targets.join(", ")))?;
    }

    output.print("")?;
    output.print("Commands:")?;
    for command in &commands {
        output.print(&format!("  $ {command}"))?;
    }

    output.print("")?;
    output.print("Files:")?;
    for file in &plan.support_files {
        output.print(&format!("  {}", file.path.display()))?;
    }

    output.info("Nothing was written. Run again without --dry-run to create it.")?;
    Ok(())
}
