mod backend;
mod config;
mod error;
mod models;
mod pipeline;
mod state;
mod views;

use std::sync::Arc;

use anyhow::Result;

use poem::{
    endpoint::StaticFilesEndpoint, get, listener::TcpListener, middleware::Compression, Endpoint,
    EndpointExt, Route, Server,
};

use crate::backend::{ChaserBackend, HttpBackend};
use crate::config::Config;
use crate::state::DashboardState;

pub struct AppContext {
    pub config: Config,
    pub backend: Arc<dyn ChaserBackend>,
    pub state: DashboardState,
}

pub struct BaseContext<'a> {
    pub cur_module: &'a str,
    pub backend: &'a str,
}

pub fn get_context_for<'a>(module_name: &'a str, backend: &'a str) -> BaseContext<'a> {
    BaseContext {
        cur_module: module_name,
        backend,
    }
}

fn setup_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();
}

pub fn build_app(ctx: Arc<AppContext>) -> impl Endpoint {
    Route::new()
        .at("/", get(views::dashboard::index))
        .at(
            "/refresh",
            get(views::dashboard::refresh).post(views::dashboard::refresh),
        )
        .at("/ask", get(views::dashboard::ask))
        .at("/api/clients", get(views::dashboard::clients))
        .at("/health", get(views::dashboard::health))
        .nest("/static", StaticFilesEndpoint::new("./static"))
        .data(ctx)
        .with(Compression::new())
        .inspect_all_err(|err| {
            tracing::error!("{:?}", err);
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let config = Config::from_env()?;
    tracing::info!(
        "serving dashboard on {} (backend: {:?})",
        config.listen_addr,
        config.api_base
    );

    let backend = HttpBackend::new(config.backend_timeout)?;
    let listen_addr = config.listen_addr.clone();
    let ctx = Arc::new(AppContext {
        config,
        backend: Arc::new(backend),
        state: DashboardState::new(),
    });

    Server::new(TcpListener::bind(listen_addr))
        .run(build_app(ctx))
        .await?;

    Ok(())
}
