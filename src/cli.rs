//! Launch options for flixtui
//!
//! The binary has no subcommands; flags only tune the interactive session.
//!
//! ```bash
//! flixtui --theme light
//! flixtui --debounce-ms 250 -v
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::ui::theme::ThemeMode;

/// flixtui - Netflix-style terminal browser
#[derive(Parser, Debug, Default)]
#[command(
    name = "flixtui",
    version,
    about = "Netflix-style terminal browser for movies and TV shows",
    long_about = "Browse trending and top rated titles from TMDB, search the \
                  catalog, and open details, all from the terminal.\n\n\
                  Set TMDB_ACCESS_TOKEN (or TMDB_API_KEY) to load remote data.",
    after_help = "KEYS:\n\
                  Tab      Switch between Home, New & Hot and Explore\n\
                  /        Search the catalog\n\
                  t        Toggle light/dark theme\n\
                  Esc      Back\n\
                  q        Quit"
)]
pub struct Cli {
    /// Path to config file (default: ~/.config/flixtui/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeMode>,

    /// Search debounce window in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Write logs here instead of the default data directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(ms) = self.debounce_ms {
            config.search_debounce_ms = ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["flixtui", "--theme", "light", "--debounce-ms", "250", "-v"]);
        assert_eq!(cli.theme, Some(ThemeMode::Light));
        assert_eq!(cli.debounce_ms, Some(250));
        assert!(cli.verbose);
    }

    #[test]
    fn test_apply_overrides_config() {
        let cli = Cli::parse_from(["flixtui", "--theme", "system", "--debounce-ms", "100"]);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.theme, ThemeMode::System);
        assert_eq!(config.search_debounce_ms, 100);
        // explore window is untouched
        assert_eq!(config.explore_debounce_ms, 300);
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = Cli::parse_from(["flixtui"]);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(Cli::try_parse_from(["flixtui", "--theme", "neon"]).is_err());
    }
}
