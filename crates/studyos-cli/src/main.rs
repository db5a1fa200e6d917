mod config;
mod plan_cmd;
mod serve_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use studyos_core::{FailurePolicy, GeminiClient, Pipeline, PipelineConfig};

use config::{CliOverrides, StudyosConfig};

#[derive(Parser)]
#[command(name = "studyos", about = "Turn an exam profile into a study plan")]
struct Cli {
    /// Gemini API key (overrides GEMINI_API_KEY env var)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Gemini model name (overrides STUDYOS_GEMINI_MODEL env var)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a studyos config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Serve the planning API over HTTP
    Serve {
        /// Address to bind
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
        /// Abort a run at the first failed stage instead of passing error text on
        #[arg(long)]
        halt_on_failure: bool,
    },
    /// Run the pipeline once for a profile file (JSON, or TOML by extension)
    Plan {
        /// Path to the profile file
        file: PathBuf,
        /// Print the result bundle as JSON
        #[arg(long)]
        json: bool,
        /// Abort at the first failed stage instead of passing error text on
        #[arg(long)]
        halt_on_failure: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Execute the `studyos init` command: write config file.
fn cmd_init(api_key: Option<&str>, model: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        gemini: config::GeminiSection {
            api_key: api_key.map(str::to_string),
            model: model.map(str::to_string),
            base_url: None,
        },
        server: config::ServerSection::default(),
    };

    config::save_config_to(&path, &cfg)?;

    println!("Config written to {}", path.display());
    match api_key {
        Some(key) => {
            let prefix: String = key.chars().take(4).collect();
            println!("  gemini.api_key = {prefix}...");
        }
        None => println!(
            "  gemini.api_key is not set; add it to the file or export {}",
            config::API_KEY_ENV
        ),
    }
    Ok(())
}

fn build_pipeline(resolved: &StudyosConfig, halt_on_failure: bool) -> Pipeline {
    let failure_policy = if halt_on_failure {
        FailurePolicy::Halt
    } else {
        FailurePolicy::Propagate
    };
    let client = GeminiClient::new(resolved.gemini.clone());
    Pipeline::with_config(Arc::new(client), PipelineConfig { failure_policy })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut overrides = CliOverrides {
        api_key: cli.api_key.clone(),
        model: cli.model.clone(),
        ..Default::default()
    };

    match cli.command {
        Commands::Init { force } => {
            cmd_init(cli.api_key.as_deref(), cli.model.as_deref(), force)?;
        }
        Commands::Serve {
            bind,
            port,
            halt_on_failure,
        } => {
            overrides.bind = bind;
            overrides.port = port;
            let resolved = StudyosConfig::resolve(&overrides)?;
            tracing::info!(model = %resolved.gemini.model, "using Gemini model");
            let pipeline = build_pipeline(&resolved, halt_on_failure);
            serve_cmd::run_serve(pipeline, &resolved.bind, resolved.port).await?;
        }
        Commands::Plan {
            file,
            json,
            halt_on_failure,
        } => {
            let resolved = StudyosConfig::resolve(&overrides)?;
            let pipeline = build_pipeline(&resolved, halt_on_failure);
            plan_cmd::run_plan(&pipeline, &file, json).await?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "studyos", &mut std::io::stdout());
        }
    }

    Ok(())
}
