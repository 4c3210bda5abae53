//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Decode JIS X 0410 mesh codes and turn mesh/value tables into choropleth GeoJSON
#[derive(Parser, Debug)]
#[command(name = "meshmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: ./.meshmap.toml if present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the rectangle of each mesh code
    Decode {
        /// 10-digit mesh codes
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Print the color band of each value
    Classify {
        /// Values to classify
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Convert a mesh/value CSV into GeoJSON
    Convert {
        /// Input CSV file ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Output GeoJSON file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Print the color legend
    Legend,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Print config file locations
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["meshmap", "-vv", "legend"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Legend)));
    }

    #[test]
    fn test_classify_accepts_negative_values() {
        let cli = Cli::parse_from(["meshmap", "classify", "-5", "12.5"]);
        match cli.command {
            Some(Commands::Classify { values }) => assert_eq!(values, vec![-5.0, 12.5]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_convert_with_output() {
        let cli = Cli::parse_from(["meshmap", "convert", "in.csv", "-o", "out.geojson"]);
        match cli.command {
            Some(Commands::Convert { input, output }) => {
                assert_eq!(input, PathBuf::from("in.csv"));
                assert_eq!(output, Some(PathBuf::from("out.geojson")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
