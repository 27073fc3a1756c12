use ascii_reel::cli::{self, Args, Command, CommandError, ViewArgs};
use ascii_reel::config::Config;
use ascii_reel::logging::{self, LogTarget};
use ascii_reel::signal;
use clap::Parser;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CommandError> {
    let config = Config::load(args.config.as_deref())?;
    // No subcommand means play the converted files
    let command = args
        .command
        .unwrap_or_else(|| Command::View(ViewArgs::default()));

    let target = match command {
        Command::View(_) => LogTarget::FileOnly,
        _ => LogTarget::Terminal,
    };
    let level = logging::effective_level(config.log_level()?, args.verbose, args.quiet);
    logging::init(level, config.log.file.as_deref(), target)?;

    if let Err(e) = signal::install_handler() {
        log::warn!("Could not install signal handler: {}", e);
    }

    match command {
        Command::Convert(convert) => {
            cli::run_convert(config, &convert)?;
        }
        Command::View(view) => cli::run_view(config, &view)?,
        Command::Config { action } => {
            cli::handle_config_action(action, args.config.as_deref(), &config)?
        }
    }
    Ok(())
}
