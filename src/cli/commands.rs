//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - vars/fill: inspect and fill a template
//! - ask: complete a question with remembered history
//! - remember/forget/history: manage the memory file

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// memprompt - Build LLM prompts from templates and question/answer memory
#[derive(Parser, Debug)]
#[command(name = "memprompt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Which template to use: a name in the templates directory, or a file
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TemplateSource {
    /// Template name (file `<name>.txt` in the templates directory)
    pub name: Option<String>,

    /// Read the template from this file instead
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List templates in the templates directory
    Templates,

    /// Show the variables a template expects
    Vars {
        #[command(flatten)]
        template: TemplateSource,
    },

    /// Fill a template with variables
    Fill {
        #[command(flatten)]
        template: TemplateSource,

        /// Variable assignment, as name=value (repeatable)
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        vars: Vec<(String, String)>,
    },

    /// Build a prompt for a question using remembered history
    Ask {
        /// The question to ask
        question: String,
    },

    /// Remember a question and its answer
    Remember {
        /// The question that was asked
        question: String,

        /// The answer it got
        answer: String,
    },

    /// Forget all remembered questions and answers
    Forget,

    /// Print the remembered history section
    History,
}

/// Parse `name=value`, splitting at the first `=`.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid assignment '{}': expected name=value", s))?;
    Ok((name.trim().to_string(), value.to_string()))
}
