use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;

use xcc::appstore::AppStoreClient;
use xcc::cli::args::{Cli, Commands, CompletionsArgs};
use xcc::cli::commands;
use xcc::config::Config;
use xcc::credentials::Credentials;
use xcc::error::XccError;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    // An interrupted prompt leaves the cursor hidden; restore it before
    // exiting on Ctrl+C, whatever stage the pipeline is in.
    let term = console::Term::stderr();
    ctrlc::set_handler(move || {
        let _ = term.show_cursor();
        std::process::exit(130);
    })
    .ok();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), XccError> {
    let cli = Cli::parse();
    let format = cli.output;

    // Handle completions command early (no config or client needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    // Load configuration
    let mut config = Config::load()?;

    let output = match &cli.command {
        Commands::Completions(_) => unreachable!(), // Handled above
        Commands::Config(args) => commands::config(&mut config, args, format)?,

        // All other commands need the API client
        Commands::Build(args) => {
            // Flag conflicts are user errors; catch them before signing
            // a token or touching the network
            args.validate()?;
            let client = make_client(&cli, &config)?;
            commands::build(&client, args, format)?
        }
        Commands::Products(args) => {
            let client = make_client(&cli, &config)?;
            commands::products(&client, args, format)?
        }
        Commands::Workflows(args) => {
            let client = make_client(&cli, &config)?;
            commands::workflows(&client, args, format)?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

fn make_client(cli: &Cli, config: &Config) -> Result<AppStoreClient, XccError> {
    let credentials = Credentials::resolve(&cli.auth, config)?;
    AppStoreClient::new(&credentials)
}
