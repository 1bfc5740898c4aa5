mod cli;

use scriptbridge::{config, images};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use sb_core::ElementKind;
use sb_engine::EchoSession;
use sb_pipeline::{create_node, ScriptReference};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "scriptbridge=trace,sb_pipeline=trace,sb_engine=trace,sb_core=debug".to_string()
        } else {
            "scriptbridge=info,sb_pipeline=info,sb_engine=info,sb_core=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve { script } => resolve_script(script, cli.config.as_deref()),
        Commands::Preview {
            images,
            output_dir,
            script,
            params,
            element,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(preview(
                &images,
                output_dir.as_deref(),
                script,
                params,
                element,
                cli.config.as_deref(),
            ))
        }
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("scriptbridge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn resolve_script(script: Option<String>, config_path: Option<&Path>) -> Result<()> {
    let path = match script {
        Some(path) => path,
        None => config::load_config_or_default(config_path)?.script.path,
    };

    let script = ScriptReference::resolve(&path)?;
    println!("Script:    {path}");
    println!(
        "Directory: {}",
        if script.directory().is_empty() {
            "(none)"
        } else {
            script.directory()
        }
    );
    println!("Callable:  {}", script.callable());
    Ok(())
}

async fn preview(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    script: Option<String>,
    params: Vec<String>,
    element: Option<ElementKind>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    if let Some(script) = script {
        config.script.path = script;
    }
    if !params.is_empty() {
        config.script.params = params;
    }
    if let Some(element) = element {
        config.engine.element = element;
    }

    let kind = config.engine.element;
    tracing::info!("Previewing {} image(s) as {kind}", inputs.len());

    let input = images::load_list(inputs, kind)?;
    let mut node = create_node("preview", kind, &config);
    let mut session = EchoSession::new();

    let output = node
        .execute(Some(&mut session), &input)
        .await
        .with_context(|| format!("Preview of '{}' failed", config.script.path))?;

    println!("Commands issued:");
    for command in session.commands() {
        println!("  {command}");
    }

    if let Some(dir) = output_dir {
        let written = images::save_list(&output, inputs, dir)?;
        println!("\nWrote {} image(s) to {}", written.len(), dir.display());
    }

    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let warnings = config.validate();

    if let Some(path) = config_path {
        println!("Config: {}", path.display());
    } else {
        println!("Config: (defaults)");
    }

    if warnings.is_empty() {
        println!("Configuration is valid");
    } else {
        println!("Configuration warnings:");
        for warning in &warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}
