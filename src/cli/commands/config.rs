use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::{Result, XccError};

/// Handle the config command
pub fn config(config: &mut Config, args: &ConfigArgs, format: OutputFormat) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => config_show(config, format),
        ConfigCommands::Set { key, value } => config_set(config, key, value, format),
        ConfigCommands::Path => config_path(format),
        ConfigCommands::Init => config_init(config, format),
    }
}

/// Show current configuration
fn config_show(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Configuration".bold()));
            output.push_str(&"─".repeat(40));
            output.push('\n');

            output.push_str(&format!("\n{}\n", "[api]".cyan()));
            output.push_str(&format!(
                "  issuer_id = {}\n",
                config.api.issuer_id.as_deref().unwrap_or("(not set)")
            ));
            output.push_str(&format!(
                "  key_id = {}\n",
                config.api.key_id.as_deref().unwrap_or("(not set)")
            ));
            output.push_str(&format!(
                "  private_key_path = {}\n",
                config.api.private_key_path.as_deref().unwrap_or("(not set)")
            ));

            Ok(output)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
    }
}

/// Set a configuration value
fn config_set(config: &mut Config, key: &str, value: &str, format: OutputFormat) -> Result<String> {
    match key {
        "api.issuer_id" => config.api.issuer_id = Some(value.to_string()),
        "api.key_id" => config.api.key_id = Some(value.to_string()),
        "api.private_key_path" => config.api.private_key_path = Some(value.to_string()),
        _ => {
            return Err(XccError::InvalidArgument(format!(
                "Unknown config key: {key}. Valid keys: api.issuer_id, api.key_id, api.private_key_path"
            )));
        }
    }
    config.save()?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Set {} = {}", "✓".green(), key, value)),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "key": key,
                "value": value
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Show configuration file path
fn config_path(format: OutputFormat) -> Result<String> {
    let paths = Paths::new()?;

    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("Config file: {}\n", paths.config_file.display()));
            output.push_str(&format!(
                "Exists: {}\n",
                if paths.config_exists() {
                    "yes".green()
                } else {
                    "no".yellow()
                }
            ));
            Ok(output)
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": paths.config_file.display().to_string(),
                "exists": paths.config_exists()
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Initialize configuration interactively
fn config_init(config: &mut Config, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Err(XccError::InvalidArgument(
            "config init requires interactive mode (--output pretty)".to_string(),
        ));
    }

    println!("{}", "xcc Configuration".bold());
    println!("{}", "─".repeat(40));
    println!(
        "API keys are created in App Store Connect under Users and Access > Integrations.\n"
    );

    let theme = ColorfulTheme::default();

    let issuer_id: String = Input::with_theme(&theme)
        .with_prompt("Issuer ID")
        .with_initial_text(config.api.issuer_id.clone().unwrap_or_default())
        .interact_text()?;
    let key_id: String = Input::with_theme(&theme)
        .with_prompt("Key ID")
        .with_initial_text(config.api.key_id.clone().unwrap_or_default())
        .interact_text()?;
    let private_key_path: String = Input::with_theme(&theme)
        .with_prompt("Path to AuthKey_<ID>.p8")
        .with_initial_text(config.api.private_key_path.clone().unwrap_or_default())
        .interact_text()?;

    config.api.issuer_id = Some(issuer_id);
    config.api.key_id = Some(key_id);
    config.api.private_key_path = Some(private_key_path);
    config.save()?;

    let paths = Paths::new()?;

    Ok(format!(
        "\n{} Configuration saved to: {}\n\nRun '{}' to see your products.",
        "✓".green(),
        paths.config_file.display(),
        "xcc products".cyan()
    ))
}
