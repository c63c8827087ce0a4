#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use vconf::domain::config::AppConfig;
use vconf::kernel::config::load_config;
use vconf_cli::handlers::{dump, history, populate, serve, show};
use vconf_cli::models::args::{AppCommands, Cli};
use vconf_logger::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg: AppConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    let platform = vconf::init(&cfg).context("Platform bootstrap failed")?;

    match cli.command {
        AppCommands::Populate { file, username } => {
            let created = populate::populate(&platform, file.as_deref(), username.as_deref())?;
            println!("✅ Created {created} configuration row(s)");
        },
        AppCommands::Dump { file, schemas } => {
            let rows = dump::dump(&platform, &file, &schemas)?;
            println!("✅ Wrote {rows} configuration row(s) to {}", file.display());
        },
        AppCommands::Show { schema, keys } => {
            show::show(&platform, &schema, &keys, io::stdout())?;
        },
        AppCommands::History { schema } => history::history(&platform, &schema, io::stdout())?,
        AppCommands::Serve {} => serve::serve(cfg, platform).await?,
    }

    Ok(())
}
