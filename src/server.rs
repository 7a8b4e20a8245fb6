//! HTTP server bootstrap for the `serve` command.

use std::io;
use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{dev::Server, http, middleware, web, App, HttpServer};
use log::info;

use crate::api::{self, AppState};
use crate::config::ServerConfig;
use crate::store::{bootstrap_logged, PgUserStore, UserStore};

fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![http::header::ACCEPT, http::header::CONTENT_TYPE])
        .max_age(3600)
}

/// Bind, bootstrap the schema and serve until shutdown.
pub async fn run(config: ServerConfig) -> io::Result<()> {
    let store = PgUserStore::connect_lazy(&config.database)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let store: Arc<dyn UserStore> = Arc::new(store);
    serve(config, store).await
}

/// Serve with an already-constructed store on the configured address.
pub async fn serve(config: ServerConfig, store: Arc<dyn UserStore>) -> io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr())?;
    info!(
        "server running on {}:{}{}",
        config.host,
        config.port,
        config.route_prefix()
    );
    listen(listener, &config.route_prefix(), store)?.await
}

/// Start serving on `listener` and kick off schema bootstrap alongside it.
///
/// Requests are answered while bootstrap is still in flight. A failed
/// bootstrap is logged and the server keeps serving. Must be called from
/// within an actix runtime.
pub fn listen(
    listener: TcpListener,
    prefix: &str,
    store: Arc<dyn UserStore>,
) -> io::Result<Server> {
    let state = AppState::new(Arc::clone(&store));
    let prefix = prefix.to_owned();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors())
            .wrap(middleware::Logger::default())
            .service(api::scope(&prefix))
    })
    .listen(listener)?
    .run();

    actix_web::rt::spawn(async move {
        bootstrap_logged(store.as_ref()).await;
    });

    Ok(server)
}
