//! u-enrollment: load the registry, run a command script against it.
//!
//! Exits non-zero only when the registry data or the script cannot be
//! read; rejected commands are logged to the notice file.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

use u_enrollment::config::Config;
use u_enrollment::dispatch::{Dispatcher, NoticeLog};
use u_enrollment::script::Script;
use u_enrollment::store::FileStore;

#[derive(Parser, Debug)]
#[command(name = "u-enrollment")]
#[command(about = "Apply a command script to a teaching registry")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the registry data files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Command script to run
    #[arg(long)]
    script: Option<PathBuf>,

    /// Notice log to append to
    #[arg(long)]
    notices: Option<PathBuf>,

    /// Also write the final registry as JSON
    #[arg(long)]
    export_json: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(script) = &self.script {
            config = config.with_script(script);
        }
        if let Some(notices) = &self.notices {
            config = config.with_notice_log(notices);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config()?;

    info!("Loading registry from: {}", config.data_dir.display());
    let store = FileStore::new(config.clone());
    let registry = store
        .load()
        .with_context(|| format!("loading registry from {}", config.data_dir.display()))?;
    info!(
        "Academic year {} (course starts in week {})",
        registry.calendar.year, registry.calendar.start_week
    );

    let script = Script::load(&config.script)?;
    info!("Running {} commands from {}", script.len(), config.script.display());

    let mut dispatcher = Dispatcher::new(registry, NoticeLog::new(&config.notice_log), store);
    dispatcher.run_script(&script);

    if let Some(path) = &cli.export_json {
        let json = dispatcher
            .registry()
            .to_json()
            .context("serializing registry")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("Exported registry to {}", path.display());
    }
    Ok(())
}
