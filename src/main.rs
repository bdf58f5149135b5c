//! pullpane - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// pullpane - responsive layout container with pull-to-refresh
#[derive(Parser, Debug)]
#[command(name = "pullpane")]
#[command(version)]
#[command(about = "Responsive grid/list/split container with pull-to-refresh, in the terminal")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not attach pull-to-refresh listeners
    #[arg(long)]
    pub no_pull_to_refresh: bool,

    /// Simulated refresh latency in milliseconds
    #[arg(long)]
    pub refresh_delay_ms: Option<u64>,

    /// Initial content view
    #[arg(long, value_parser = ["grid", "list", "split"])]
    pub view: Option<String>,

    /// JSON array of `{title, detail}` items to display
    #[arg(long)]
    pub feed: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Overrides for the flags that were explicitly set.
    fn overrides(&self) -> pullpane::config::CliOverrides {
        pullpane::config::CliOverrides {
            enable_pull_to_refresh: self.no_pull_to_refresh.then_some(false),
            refresh_delay_ms: self.refresh_delay_ms,
            view: self.view.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = pullpane::config::load_config_with_precedence(args.config.clone())?;
        let merged = pullpane::config::merge_config(config_file);
        let with_env = pullpane::config::apply_env_overrides(merged);
        pullpane::config::apply_cli_overrides(with_env, args.overrides())
    };

    pullpane::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let feed = match &args.feed {
        Some(path) => pullpane::model::load_feed(path)?,
        None => pullpane::model::sample_feed(),
    };

    let cli_args = pullpane::view::CliArgs {
        options: config.container_options()?,
        metrics: config.cell_metrics()?,
        view: config.view_kind()?,
        refresh_delay: config.refresh_delay(),
        feed,
        colors: pullpane::view::ColorConfig::from_env_and_args(args.no_color),
    };

    pullpane::view::run(cli_args)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["pullpane", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["pullpane", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["pullpane"]);
        assert_eq!(args.config, None);
        assert!(!args.no_pull_to_refresh);
        assert_eq!(args.refresh_delay_ms, None);
        assert_eq!(args.view, None);
        assert_eq!(args.feed, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_no_args_override_nothing() {
        let args = Args::parse_from(["pullpane"]);
        assert_eq!(args.overrides(), pullpane::config::CliOverrides::default());
    }

    #[test]
    fn test_view_accepts_known_names() {
        for view in ["grid", "list", "split"] {
            let args = Args::parse_from(["pullpane", "--view", view]);
            assert_eq!(args.view.as_deref(), Some(view));
        }
    }

    #[test]
    fn test_view_invalid_rejects() {
        let result = Args::try_parse_from(["pullpane", "--view", "carousel"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_refresh_delay_rejects_negative() {
        let result = Args::try_parse_from(["pullpane", "--refresh-delay-ms", "-5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_feed_and_config_paths() {
        let args = Args::parse_from([
            "pullpane",
            "--feed",
            "items.json",
            "--config",
            "/custom/config.toml",
        ]);
        assert_eq!(args.feed, Some(PathBuf::from("items.json")));
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_flags_flow_through_config_precedence_chain() {
        use pullpane::config::{ConfigFile, apply_cli_overrides, merge_config};

        let config_file = ConfigFile {
            view: Some("list".to_string()),
            refresh_delay_ms: Some(300),
            ..ConfigFile::default()
        };
        let merged = merge_config(Some(config_file));
        assert_eq!(merged.view, "list");

        let args = Args::parse_from([
            "pullpane",
            "--no-pull-to-refresh",
            "--view",
            "split",
        ]);
        let resolved = apply_cli_overrides(merged, args.overrides());

        assert!(!resolved.enable_pull_to_refresh);
        assert_eq!(resolved.view, "split");
        assert_eq!(
            resolved.refresh_delay_ms, 300,
            "Unset CLI flags keep the config file value"
        );
    }
}
