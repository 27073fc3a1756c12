//! Subcommand handlers for convert, view, and config actions.

use std::path::{Path, PathBuf};

use super::args::{ConfigAction, ConvertArgs, ViewArgs};
use crate::config::{default_path, Config, ConfigError, DEFAULT_CONFIG};
use crate::convert::{convert_dir, BatchReport, ConvertError};
use crate::logging::LoggingError;
use crate::player::{run_viewer, PlayerError, Playlist};
use crate::terminal::CrosstermTerminal;

/// Anything a subcommand can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("Failed to write config file '{}': {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Layer `convert` flags over the loaded config and re-validate.
pub fn apply_convert_args(config: &mut Config, args: &ConvertArgs) -> Result<(), ConfigError> {
    if let Some(images) = &args.images {
        config.paths.images = images.clone();
    }
    if let Some(output) = &args.output {
        config.paths.output = output.clone();
    }
    if let Some(width) = args.width {
        config.convert.width = width;
    }
    if let Some(mode) = args.color_mode {
        config.convert.color_mode = mode.into();
    }
    if let Some(charset) = args.charset {
        config.convert.charset = charset.into();
    }
    if args.no_compress {
        config.convert.compress = false;
    }
    if let Some(threshold) = args.threshold {
        config.convert.threshold = threshold;
    }
    if args.no_diff {
        config.convert.diff = false;
    }
    if let Some(background) = &args.background {
        config.convert.background = background.clone();
    }
    config.validate()
}

/// Layer `view` flags over the loaded config.
pub fn apply_view_args(config: &mut Config, args: &ViewArgs) {
    if let Some(dir) = &args.dir {
        config.paths.output = dir.clone();
    }
    if args.no_color {
        config.player.monochrome = true;
    }
    if let Some(delay) = args.delay {
        config.player.default_delay_ms = delay;
    }
}

/// Convert the configured image directory and print a summary.
pub fn run_convert(mut config: Config, args: &ConvertArgs) -> Result<BatchReport, CommandError> {
    apply_convert_args(&mut config, args)?;
    let options = config.convert_options()?;

    log::info!(
        "Converting {} -> {} (width {}, {}, {})",
        config.paths.images.display(),
        config.paths.output.display(),
        options.width,
        options.color_mode.name(),
        options.charset.name()
    );

    let report = convert_dir(
        &config.paths.images,
        &config.paths.output,
        &config.paths.extension,
        &options,
        args.force,
    )?;

    println!(
        "Converted {}, skipped {}, failed {}",
        report.converted, report.skipped, report.failed
    );
    Ok(report)
}

/// Play every converted file until the user quits.
pub fn run_view(mut config: Config, args: &ViewArgs) -> Result<(), CommandError> {
    apply_view_args(&mut config, args);
    let options = config.viewer_options();
    let mut playlist = Playlist::scan(&config.paths.output, &config.paths.extension)?;

    let mut term = CrosstermTerminal::new().map_err(PlayerError::Terminal)?;
    let result = run_viewer(&mut term, &mut playlist, &options);
    term.restore().map_err(PlayerError::Terminal)?;
    result?;

    println!("\nBye!\n");
    Ok(())
}

/// Handle config subcommand actions.
///
/// `path` is the `--config` argument; the default location is used without it.
pub fn handle_config_action(
    action: ConfigAction,
    path: Option<&Path>,
    config: &Config,
) -> Result<(), CommandError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!();
            println!("{}", config.to_toml()?);

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(CommandError::ConfigExists(config_path));
            }

            let write_err = |source| CommandError::ConfigWrite {
                path: config_path.clone(),
                source,
            };
            // Create parent directories if needed
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(write_err)?;

            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{CharSet, ColorMode};
    use crate::cli::enums::{CharacterSet, ColorModeArg};

    #[test]
    fn test_convert_args_override_config() {
        let mut config = Config::default();
        let args = ConvertArgs {
            images: Some(PathBuf::from("pics")),
            width: Some(32),
            color_mode: Some(ColorModeArg::Grayscale),
            charset: Some(CharacterSet::Minimal),
            no_compress: true,
            no_diff: true,
            background: Some("#102030".to_string()),
            ..ConvertArgs::default()
        };
        apply_convert_args(&mut config, &args).unwrap();

        assert_eq!(config.paths.images, PathBuf::from("pics"));
        assert_eq!(config.paths.output, PathBuf::from("ascii"));
        assert_eq!(config.convert.width, 32);
        assert_eq!(config.convert.color_mode, ColorMode::Grayscale);
        assert_eq!(config.convert.charset, CharSet::Minimal);
        assert!(!config.convert.compress);
        assert!(!config.convert.diff);
        assert_eq!(config.convert.background, "#102030");
    }

    #[test]
    fn test_missing_flags_keep_config_values() {
        let mut config = Config::parse("[convert]\nwidth = 50\nthreshold = 5\n").unwrap();
        apply_convert_args(&mut config, &ConvertArgs::default()).unwrap();
        assert_eq!(config.convert.width, 50);
        assert_eq!(config.convert.threshold, 5);
        assert!(config.convert.compress);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut config = Config::default();
        let args = ConvertArgs {
            width: Some(1),
            ..ConvertArgs::default()
        };
        assert!(apply_convert_args(&mut config, &args).is_err());
    }

    #[test]
    fn test_view_args_override_config() {
        let mut config = Config::default();
        let args = ViewArgs {
            dir: Some(PathBuf::from("reels")),
            no_color: true,
            delay: Some(40),
        };
        apply_view_args(&mut config, &args);
        assert_eq!(config.paths.output, PathBuf::from("reels"));
        assert!(config.player.monochrome);
        assert_eq!(config.player.default_delay_ms, 40);
    }

    #[test]
    fn test_config_init_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::default();

        handle_config_action(ConfigAction::Init, Some(&path), &config).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_CONFIG);

        let err = handle_config_action(ConfigAction::Init, Some(&path), &config).unwrap_err();
        assert!(matches!(err, CommandError::ConfigExists(_)));
    }

    #[test]
    fn test_convert_missing_images_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConvertArgs {
            images: Some(dir.path().join("missing")),
            output: Some(dir.path().join("out")),
            ..ConvertArgs::default()
        };
        let err = run_convert(Config::default(), &args).unwrap_err();
        assert!(matches!(err, CommandError::Convert(ConvertError::Io { .. })));
    }
}
