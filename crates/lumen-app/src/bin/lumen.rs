use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use lumen_app::{AppContext, Shell};
use lumen_core::config::CliOverrides;
use lumen_core::LumenConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Occupancy prediction client", long_about = None)]
struct Cli {
    /// Config file to use instead of ./lumen.toml
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Interval between background file checks, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Skip the startup splash
    #[arg(long, action = ArgAction::SetTrue)]
    no_splash: bool,

    /// Directory downloaded files are saved into
    #[arg(long, value_hint = ValueHint::DirPath)]
    download_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            base_url: self.base_url.clone(),
            poll_interval_ms: self.poll_interval_ms,
            splash_delay_ms: self.no_splash.then_some(0),
            download_dir: self.download_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = cli.overrides();

    let config = match &cli.config {
        Some(path) => LumenConfig::load_file(path, Some(&overrides))
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("resolving working directory")?;
            LumenConfig::load(&cwd, Some(&overrides)).context("loading configuration")?
        }
    };

    lumen_observability::init_tracing(&config.observability);

    let ctx = AppContext::connect(config).context("connecting to backend")?;
    let shell = Shell::new(ctx);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    shell.run(stdin, &mut stdout).await?;
    Ok(())
}
