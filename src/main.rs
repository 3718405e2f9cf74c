use release_pipeline::cli::commands::{RunCommand, ValidateCommand};
use release_pipeline::cli::output::*;
use release_pipeline::cli::{Cli, Command};
use release_pipeline::collaborator::{scripts, SubprocessRunner};
use release_pipeline::core::{PipelineError, PipelineState};
use release_pipeline::execution::ReleasePipeline;
use release_pipeline::reporting::{GithubOutputFile, OutputSink, StdoutSink};

use anyhow::{Context, Result};
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_release(cmd, &cli).await?,
        Command::Validate(cmd) => validate_inputs(cmd, &cli)?,
    }

    Ok(())
}

async fn run_release(cmd: &RunCommand, cli: &Cli) -> Result<()> {
    let (config, context) = match cmd.release.resolve(cli.settings.as_deref(), cli.verbose) {
        Ok(resolved) => resolved,
        Err(e) => fail(&e),
    };

    let mut pipeline = ReleasePipeline::new(SubprocessRunner::new(), context, config);
    pipeline.add_event_handler(|event| println!("{}", format_execution_event(&event)));

    // GitHub Actions collects outputs from a file; elsewhere print them
    let mut sink: Box<dyn OutputSink> = match GithubOutputFile::from_env() {
        Some(file) => Box::new(file),
        None => Box::new(StdoutSink),
    };

    let mut state = PipelineState::new();
    match pipeline.execute(&mut state, sink.as_mut()).await {
        Ok(outputs) => {
            println!("\n{} Release {}", CHECK, style("prepared").green());
            println!("{}", format_outputs(&outputs));
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&outputs)?);
            }
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

fn validate_inputs(cmd: &ValidateCommand, cli: &Cli) -> Result<()> {
    println!("{} Validating inputs...", INFO);

    let (config, context) = match cmd.release.resolve(cli.settings.as_deref(), cli.verbose) {
        Ok(resolved) => resolved,
        Err(e) => fail(&e),
    };

    println!("{} Inputs are valid!", CHECK);
    if cmd.json {
        let invocation = scripts::create_release_branch(&context, &config);
        let data = serde_json::json!({
            "config": config,
            "identity": context.identity,
            "scripts_dir": context.scripts_dir,
            "branch_creation": {
                "program": invocation.program,
                "args": invocation.args,
            },
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!("{}", format_config(&config, &context));
    }
    Ok(())
}

/// Surface the error verbatim and end the run as failed
fn fail(e: &PipelineError) -> ! {
    let in_github_actions = std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true");
    for line in format_failure(e, in_github_actions) {
        println!("{}", line);
    }
    error!("{}", e);
    std::process::exit(FAILURE_EXIT_CODE);
}
