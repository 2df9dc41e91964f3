use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::error::{Result, XccError};

/// An interactive CLI for triggering Xcode Cloud builds from the terminal
#[derive(Parser)]
#[command(name = "xcc")]
#[command(version, propagate_version = true)]
#[command(about = "Trigger Xcode Cloud builds from the terminal")]
pub struct Cli {
    #[command(flatten)]
    pub auth: AuthArgs,

    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Print shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

/// App Store Connect API credentials, from flags or the environment
#[derive(Args, Clone, Debug, Default)]
pub struct AuthArgs {
    /// API issuer ID (Users and Access > Integrations)
    #[arg(long, env = "XCC_ISSUER_ID", global = true)]
    pub issuer_id: Option<String>,

    /// API private key ID
    #[arg(long, env = "XCC_KEY_ID", global = true)]
    pub key_id: Option<String>,

    /// API private key PEM contents (literal \n sequences are accepted)
    #[arg(long, env = "XCC_PRIVATE_KEY", global = true, hide_env_values = true)]
    pub private_key: Option<String>,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Trigger an Xcode Cloud build
    #[command(alias = "b")]
    Build(BuildArgs),

    /// List Xcode Cloud products
    #[command(alias = "p")]
    Products(ProductsArgs),

    /// List a product's workflows
    #[command(alias = "w")]
    Workflows(WorkflowsArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the build command
#[derive(Args)]
pub struct BuildArgs {
    /// Product name (prompts when omitted)
    #[arg(short, long)]
    pub product: Option<String>,

    /// Workflow name (prompts when omitted)
    #[arg(short, long)]
    pub workflow: Option<String>,

    /// Git branch or tag name to build from
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Pull request number to build from
    #[arg(long)]
    pub pull_request: Option<u64>,
}

impl BuildArgs {
    /// A build runs from exactly one source; reject both flags before
    /// touching credentials or the network.
    pub fn validate(&self) -> Result<()> {
        if self.reference.is_some() && self.pull_request.is_some() {
            return Err(XccError::ConflictingSource);
        }
        Ok(())
    }
}

/// Arguments for the products command
#[derive(Args)]
pub struct ProductsArgs {
    /// Filter products by name
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the workflows command
#[derive(Args)]
pub struct WorkflowsArgs {
    /// Product name (prompts when omitted)
    #[arg(short, long)]
    pub product: Option<String>,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.issuer_id)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
    /// Initialize configuration interactively
    Init,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
