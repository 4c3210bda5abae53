//! Command handlers

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{classify, decode, Band, Dataset, BREAKPOINTS};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::geojson::RenderTarget;
use crate::infrastructure::traits::{RenderAdapter, RowSource};

/// Input path meaning "read from stdin".
const STDIN_PATH: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Decode { codes }) => _decode(codes),
        Some(Commands::Classify { values }) => _classify(values),
        Some(Commands::Convert { input, output }) => {
            let container = load_container(cli)?;
            _convert(&container, input, output.as_deref())
        }
        Some(Commands::Legend) => _legend(),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `meshmap --help`".into(),
        )),
    }
}

fn load_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

#[instrument]
fn _decode(codes: &[String]) -> CliResult<()> {
    let mut failed = 0;
    for code in codes {
        match decode(code) {
            Ok(rect) => output::info(&format!(
                "{}  SW {:.9}, {:.9}  NE {:.9}, {:.9}",
                code,
                rect.south_west.lat,
                rect.south_west.lon,
                rect.north_east.lat,
                rect.north_east.lon
            )),
            Err(e) => {
                failed += 1;
                output::failure(&format!("{code}: {e}"));
            }
        }
    }
    if failed > 0 {
        return Err(CliError::DecodeFailed {
            failed,
            total: codes.len(),
        });
    }
    Ok(())
}

#[instrument]
fn _classify(values: &[f64]) -> CliResult<()> {
    for value in values {
        let band = classify(*value);
        output::swatch(band.color(), &format!("{value} → {}", band.label()));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _convert(container: &ServiceContainer, input: &Path, out: Option<&Path>) -> CliResult<()> {
    if out == Some(input) {
        return Err(CliError::InvalidArgs(format!(
            "output would overwrite input: {}",
            input.display()
        )));
    }

    let rows = if input == Path::new(STDIN_PATH) {
        container
            .csv_reader(io::stdin().lock(), "<stdin>")
            .read_rows()?
    } else {
        container.csv_file(input)?.read_rows()?
    };

    let dataset = container.transformer.transform(&rows);

    let target = match out {
        Some(path) => RenderTarget::File(path.to_path_buf()),
        None => RenderTarget::Stdout,
    };
    let mut renderer = container.renderer(target);
    renderer.replace(dataset)?;

    if let Some(dataset) = renderer.current() {
        print_summary(rows.len(), dataset);
    }
    if let Some(path) = out {
        output::success(&format!("written: {}", path.display()));
    }
    Ok(())
}

fn print_summary(row_count: usize, dataset: &Dataset) {
    output::stat("rows", &row_count);
    output::stat("features", &dataset.len());
    output::stat("errors", &dataset.error_count);
    output::stat("max", &dataset.max_value);
    if let Some(b) = dataset.bounds() {
        output::stat(
            "bounds",
            &format!(
                "{:.6},{:.6} – {:.6},{:.6}",
                b.south_west.lat, b.south_west.lon, b.north_east.lat, b.north_east.lon
            ),
        );
    }
    if dataset.error_count > 0 {
        output::warning(&format!(
            "{} rows skipped: mesh code could not be decoded",
            dataset.error_count
        ));
    }
}

#[instrument]
fn _legend() -> CliResult<()> {
    output::header(&format!(
        "Value bands (breakpoints: {})",
        BREAKPOINTS
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    for band in Band::ALL {
        output::swatch(band.color(), band.label());
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!(
                    "global: {} ({})",
                    path.display(),
                    exists_label(&path)
                )),
                None => output::info("global: <no config directory>"),
            }
            let local = cli.config.clone().unwrap_or_else(local_config_path);
            output::info(&format!(
                "local:  {} ({})",
                local.display(),
                exists_label(&local)
            ));
        }
    }
    Ok(())
}

fn exists_label(path: &Path) -> &'static str {
    if path.exists() {
        "found"
    } else {
        "not found"
    }
}

#[instrument]
fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
