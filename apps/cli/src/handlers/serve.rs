use anyhow::Result;
use vconf::Platform;
use vconf::domain::config::AppConfig;
use vconf_server::Server;

/// Serves `platform` over HTTP until a shutdown signal arrives.
///
/// # Errors
/// Returns an error if the server cannot bind its address.
pub async fn serve(cfg: AppConfig, platform: Platform) -> Result<()> {
    Server::builder().config(cfg).platform(platform).build()?.run().await
}
