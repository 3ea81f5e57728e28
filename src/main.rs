use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use console::style;

use scmver::{get_version, Configuration, LocalScheme, Result, VersionScheme};

/// Print a version string derived from source-control metadata.
///
/// The version is computed from the nearest version-looking git tag, the
/// commit distance from it, and the working tree's dirty state. Setting the
/// SCMVER_PRETEND_VERSION environment variable bypasses all SCM inspection
/// and uses its value verbatim.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Directory of the repository to inspect
    #[arg(default_value = ".")]
    root: PathBuf,

    /// TOML configuration file to load
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Version scheme: guess-next-dev or post-release
    #[arg(long, value_name = "SCHEME")]
    version_scheme: Option<VersionScheme>,

    /// Local scheme: node-and-date or no-local-version
    #[arg(long, value_name = "SCHEME")]
    local_scheme: Option<LocalScheme>,

    /// Also write the computed version to this file, relative to ROOT.
    /// The format is inferred from the extension (*.txt or *.py).
    #[arg(long, value_name = "FILE")]
    write_to: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(version) => {
            println!("{version}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => Configuration::from_file(path)?,
        None => Configuration::default(),
    };
    // flags override the file
    if let Some(version_scheme) = cli.version_scheme {
        config.version_scheme = version_scheme;
    }
    if let Some(local_scheme) = cli.local_scheme {
        config.local_scheme = local_scheme;
    }
    if let Some(write_to) = cli.write_to {
        config.write_to = Some(write_to);
    }
    get_version(&cli.root, &config)
}
