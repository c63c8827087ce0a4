use anyhow::Context;
use vconf::kernel::config::load_config;
use vconf_logger::Logger;
use vconf_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let path = std::env::args().nth(1);
    let cfg = load_config(path.as_deref()).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build()?.run().await
}
