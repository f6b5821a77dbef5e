//! The HTTP server, handler and routes.
//!
//! This file itself contains fairly little business logic and just sets up the
//! `hyper` server and catches errors. The main logic is in `handlers.rs`.

use bytes::Bytes;
use futures::FutureExt;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::{conn::auto, graceful::GracefulShutdown},
};
use std::{
    convert::Infallible,
    future::Future,
    net::{IpAddr, SocketAddr},
    panic::AssertUnwindSafe,
    pin::pin,
    sync::Arc,
    time::Duration,
};
use tokio::net::TcpListener;

use crate::{api, config::Config, model::Store, prelude::*};
use self::handlers::handle;


mod handlers;
mod log;
mod response;


/// HTTP server configuration.
#[derive(Debug, Clone, confique::Config)]
pub(crate) struct HttpConfig {
    /// The TCP port the HTTP server should listen on.
    #[config(default = 4000)]
    pub(crate) port: u16,

    /// The bind address to listen on.
    #[config(default = "127.0.0.1")]
    pub(crate) address: IpAddr,

    /// When shutting down, how long to wait for open connections to finish
    /// their requests before exiting anyway.
    #[config(default = "5s", deserialize_with = crate::config::deserialize_duration)]
    pub(crate) shutdown_timeout: Duration,
}


// All our responses have their body fully in memory.
type Response<T = Full<Bytes>> = hyper::Response<T>;


/// Context that the request handler has access to.
struct Context {
    api_root: Arc<api::RootNode>,
    store: Arc<Store>,
    config: Config,
}


/// Starts the HTTP server and runs it until a shutdown signal (Ctrl+C) is
/// received.
pub(crate) async fn serve(
    config: Config,
    api_root: api::RootNode,
    store: Store,
) -> Result<()> {
    let addr = SocketAddr::new(config.http.address, config.http.port);
    let shutdown_timeout = config.http.shutdown_timeout;
    let ctx = Arc::new(Context {
        api_root: Arc::new(api_root),
        store: Arc::new(store),
        config,
    });

    let listener = TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    // Each connection is served in its own task. The graceful shutdown
    // watcher keeps track of them so that we can wait for them on shutdown.
    let builder = auto::Builder::new(TokioExecutor::new());
    let graceful = GracefulShutdown::new();
    let mut shutdown_signal = pin!(tokio::signal::ctrl_c());

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(v) => v,
                    Err(e) => {
                        warn!("Failed to accept TCP connection: {e}");
                        continue;
                    }
                };
                trace!("Accepted connection from {peer}");

                let ctx = Arc::clone(&ctx);
                let service = service_fn(move |req| {
                    handle_internal_errors(handle(req, Arc::clone(&ctx)))
                });
                let conn = builder.serve_connection_with_upgrades(TokioIo::new(stream), service);
                let conn = graceful.watch(conn.into_owned());
                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        debug!("Error serving connection from {peer}: {e}");
                    }
                });
            }

            res = &mut shutdown_signal => {
                res.context("failed to listen for shutdown signal")?;
                info!("Received shutdown signal, stopping HTTP server");
                break;
            }
        }
    }

    // Stop accepting connections and give the open ones a bit of time.
    drop(listener);
    tokio::select! {
        _ = graceful.shutdown() => debug!("All connections closed"),
        _ = tokio::time::sleep(shutdown_timeout) => {
            warn!("Some connections were still open after {shutdown_timeout:?}, closing anyway");
        }
    }

    Ok(())
}

/// This just wraps another future and catches all panics that might occur when
/// resolving/polling that given future. This ensures that we always answer with
/// `500` instead of just crashing the task and closing the connection.
async fn handle_internal_errors(
    future: impl Future<Output = Response>,
) -> Result<Response, Infallible> {
    // The `AssertUnwindSafe` is necessary: we are basically saying "if the
    // future panics, the remaining application state is not broken". That
    // holds as the only shared state is immutable.
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(response) => Ok(response),
        Err(panic) => {
            // For most panics (which use `panic!` like `println!`), the payload
            // is either `&str` or `String`.
            let msg = panic.downcast_ref::<String>()
                .map(|s| s.as_str())
                .or(panic.downcast_ref::<&str>().copied());

            match msg {
                Some(msg) => error!("INTERNAL SERVER ERROR: HTTP handler panicked: '{}'", msg),
                None => error!("INTERNAL SERVER ERROR: HTTP handler panicked"),
            }

            Ok(response::internal_server_error())
        }
    }
}
