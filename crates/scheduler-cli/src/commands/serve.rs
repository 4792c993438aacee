use anyhow::Result;

use crate::cli::ServeCommand;
use crate::config::Config;
use crate::server;
use crate::util::Lifecycle;

/// Applies the command-line overrides and runs the HTTP server until ctrl-c.
pub async fn serve(lifecycle: Lifecycle, mut config: Config, command: ServeCommand) -> Result<()> {
    if let Some(port) = command.port {
        config.port = port;
    }
    if let Some(bind) = command.bind {
        config.bind = bind;
    }
    if let Some(web_dir) = command.web_dir {
        config.web_dir = web_dir;
    }
    server::serve(&config, lifecycle).await
}
