//! gridpath: run and compare grid search strategies from the terminal.

use std::io::Write;

use clap::Parser;
use env_logger::{Builder, Env};

use gridpath_lib::app;
use gridpath_lib::cli::{Cli, Command};
use gridpath_lib::config::SandboxConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Run(args) => {
            let cfg = SandboxConfig::from(args);
            log::debug!("Running {:?} on {}", cfg.strategies, cfg.map.display());
            app::run(&cfg, &mut out)?;
        }
        Command::Maze(args) => app::maze(&args, &mut out)?,
        Command::Show { map } => app::show(&map, &mut out)?,
    }
    Ok(())
}
