use clap::Parser;
use hostvault::cli::commands::upsert::UpsertArgs;
use hostvault::cli::{config_dir, output, Cli, Commands, Paths};
use hostvault::config::Settings;

fn main() {
    let cli = Cli::parse();

    // Resolve the config directory and settings before anything else.
    let (config_dir, settings) = match config_dir(&cli)
        .and_then(|dir| Settings::load(&dir).map(|settings| (dir, settings)))
    {
        Ok(resolved) => resolved,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    let level = if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    hostvault::logging::init(level);

    let paths = Paths::resolve(&cli, config_dir, &settings);
    tracing::debug!(config_dir = %paths.config_dir.display(), "resolved paths");

    let result = match cli.command {
        Commands::CreateKey => hostvault::cli::commands::create_key::execute(&paths),
        Commands::Upsert {
            ref host,
            ref password,
            ref hostname,
            ref user,
            ref port,
        } => hostvault::cli::commands::upsert::execute(
            &paths,
            &UpsertArgs {
                host,
                password: password.as_deref(),
                hostname: hostname.as_deref(),
                user,
                port,
            },
        ),
        Commands::Remove { ref host } => hostvault::cli::commands::remove::execute(&paths, host),
        Commands::Reveal { ref host } => hostvault::cli::commands::reveal::execute(&paths, host),
        Commands::List => hostvault::cli::commands::list::execute(&paths),
        Commands::Ip { ref host } => hostvault::cli::commands::ip::execute(&paths, host),
        Commands::History { ref host } => {
            hostvault::cli::commands::history::execute(&paths, host)
        }
        Commands::Completions { ref shell } => {
            hostvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
