//! Print the OpenAPI document as JSON.
//!
//! ```text
//! openapi-dump --pretty --output openapi.json
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;

use starter_api::ApiDoc;
use starter_api::settings::AppSettings;

/// Command-line options for the dump.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Write the OpenAPI document as JSON")]
struct Cli {
    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
    /// Write to this file instead of standard output.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Use built-in defaults instead of `APP_*` settings.
    #[arg(long)]
    defaults: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let settings = if cli.defaults {
        AppSettings::default()
    } else {
        AppSettings::load_from_iter([std::ffi::OsString::from("openapi-dump")])
            .map_err(|e| color_eyre::eyre::eyre!("failed to load settings: {e}"))?
    };
    let doc = ApiDoc::document(&settings);
    let json = if cli.pretty {
        doc.to_pretty_json()
    } else {
        doc.to_json()
    }
    .wrap_err("serialise OpenAPI document")?;

    match cli.output {
        Some(path) => std::fs::write(&path, format!("{json}\n"))
            .wrap_err_with(|| format!("write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").wrap_err("write to stdout")?;
        }
    }
    Ok(())
}
