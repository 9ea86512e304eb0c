//! QRSNAP desktop entrypoint

#![cfg_attr(all(target_os = "windows", not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Context;
use clap::Parser;
use qrsnap::app::{APP_TITLE, native_options};
use qrsnap::{Generator, NativeDialogs, QrSnapApp, QrSnapConfig, logging};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "qrsnap",
    version,
    about = "Save text or a URL as a QR code PNG"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrsnap.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the default save folder (takes precedence over config file)
    #[arg(long, value_name = "DIR")]
    folder: Option<PathBuf>,

    /// Decode every saved image and check it matches the input text
    #[arg(long)]
    verify: bool,
}

fn main() {
    // Startup failures are printed rather than surfacing as a crash.
    if let Err(err) = run() {
        report_startup_failure(&err, &mut io::stderr());
    }
}

/// Write one line for a startup failure. The subscriber may not be installed
/// yet, so this bypasses tracing.
fn report_startup_failure(err: &anyhow::Error, out: &mut impl Write) {
    let _ = writeln!(out, "qrsnap: {err:#}");
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = QrSnapConfig::load(cli.config.as_deref())?;

    if let Some(folder) = cli.folder {
        config.output.default_folder = folder;
    }

    if cli.verify {
        config.output.verify_after_save = true;
    }

    logging::init(&config.logging)?;

    if let Err(err) = config.output.ensure_default_folder() {
        warn!("{err}");
    }

    info!(
        default_folder = %config.output.default_folder.display(),
        verify = config.output.verify_after_save,
        "Starting QRSNAP"
    );

    let generator = Generator::new(config.output);
    eframe::run_native(
        APP_TITLE,
        native_options(),
        Box::new(move |_cc| Ok(Box::new(QrSnapApp::new(generator, Box::new(NativeDialogs))))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("Failed to run the main window")?;

    Ok(())
}
