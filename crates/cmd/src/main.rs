use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(name = "mntgen")]
#[command(about = "Mount a filesystem that creates any directory looked up at its root")]
struct Cli {
    /// Where to mount the filesystem
    #[arg(default_value = cmd::DEFAULT_MOUNTPOINT)]
    mountpoint: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init_diagnostics();

    let cli = Cli::parse();
    cmd::run(&cli.mountpoint).await?;

    Ok(())
}
