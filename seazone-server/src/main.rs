use std::time::Duration;

use clap::Parser;
use tokio_graceful_shutdown::{SubsystemBuilder, Toplevel};

use seazone_server::config::Cli;
use seazone_server::dataset::open_store;
use seazone_server::web::Web;
use seazone_server::AppState;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let store = open_store(cli.data.as_deref())?;
    let state = AppState::new(store, cli.missing_coordinates());
    log::debug!(
        "Nearest-zone lookups use {:?} for zones without coordinates",
        state.missing_coordinates
    );

    let web = Web::new(state, cli.socket_addr());

    Toplevel::new(|s| async move {
        s.start(SubsystemBuilder::new("Webserver", |a| web.run(a)));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(1000))
    .await
    .map_err(Into::into)
}
