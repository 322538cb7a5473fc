use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use memprompt::memory::{MemPrompt, MemoryItem, MemorySource, render_history};
use memprompt::{PromptLoader, PromptTemplate};
use std::fs;
use std::path::PathBuf;

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, TemplateSource};
use config::Config;

fn setup_logging(verbose: bool, log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("memprompt")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("memprompt.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::new();
    if let Some(level) = log_level {
        builder.parse_filters(level);
    }
    builder.parse_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Templates => handle_templates_command(config),
        Commands::Vars { template } => handle_vars_command(template, config),
        Commands::Fill { template, vars } => handle_fill_command(template, vars, config),
        Commands::Ask { question } => handle_ask_command(question, config),
        Commands::Remember { question, answer } => handle_remember_command(question, answer, config),
        Commands::Forget => handle_forget_command(config),
        Commands::History => handle_history_command(config),
    }
}

fn load_template(source: &TemplateSource, config: &Config) -> Result<PromptTemplate> {
    if let Some(path) = &source.file {
        let content =
            fs::read_to_string(path).context(format!("Failed to read template from {}", path.display()))?;
        return Ok(PromptTemplate::new(content));
    }

    match &source.name {
        Some(name) => PromptLoader::new(&config.templates_dir)
            .load(name)
            .context(format!("Failed to load template '{}'", name)),
        None => eyre::bail!("either a template name or --file is required"),
    }
}

fn handle_templates_command(config: &Config) -> Result<()> {
    let loader = PromptLoader::new(&config.templates_dir);
    let names = loader.list_available()?;
    if names.is_empty() {
        println!("{} {}", "No templates in".yellow(), loader.templates_dir().display());
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn handle_vars_command(source: &TemplateSource, config: &Config) -> Result<()> {
    let template = load_template(source, config)?;
    info!("Template expects {:?}", template.expected_variables());
    for name in template.expected_variables() {
        println!("{}", name.cyan());
    }
    Ok(())
}

fn handle_fill_command(source: &TemplateSource, vars: &[(String, String)], config: &Config) -> Result<()> {
    let template = load_template(source, config)?;
    let filled = template
        .fill(vars.iter().cloned())
        .context("Failed to fill template")?;
    print!("{}", filled);
    Ok(())
}

fn handle_ask_command(question: &str, config: &Config) -> Result<()> {
    let prompt = MemPrompt::with_template(config.memory_source(), config.outer_template());
    let completed = prompt
        .complete_prompt(question)
        .context("Failed to complete prompt")?;
    print!("{}", completed);
    Ok(())
}

fn handle_remember_command(question: &str, answer: &str, config: &Config) -> Result<()> {
    let memory = config.memory_source();
    memory.append(&MemoryItem::new(question, answer))?;
    info!("Remembered question in {}", memory.path().display());
    println!("{} {}", "Remembered:".green(), question);
    Ok(())
}

fn handle_forget_command(config: &Config) -> Result<()> {
    let memory = config.memory_source();
    memory.save_memory(Vec::new())?;
    println!("{} {}", "Cleared:".red(), memory.path().display());
    Ok(())
}

fn handle_history_command(config: &Config) -> Result<()> {
    match config.memory_source().get_memory()? {
        Some(items) if !items.is_empty() => print!("{}", render_history(&items)),
        _ => println!("{}", "No memory yet".yellow()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.is_verbose(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
