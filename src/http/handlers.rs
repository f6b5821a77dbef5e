use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, body::Incoming};
use std::{sync::Arc, time::Instant};

use crate::{api, prelude::*};
use super::{Context, Response, log, response};


/// This is the main HTTP entry point, called for each incoming request.
pub(super) async fn handle(req: hyper::Request<Incoming>, ctx: Arc<Context>) -> Response {
    log::req::log(&req);
    if ctx.config.log.log_http_headers {
        log::headers::log(&req);
    }

    let method = req.method().clone();
    let path = req.uri().path().trim_end_matches('/').to_owned();

    match path.as_str() {
        // The GraphQL endpoint. Queries can be sent via GET or POST.
        "/graphql" if method == Method::GET || method == Method::POST => {
            handle_api(req, &ctx).await
        }
        "/graphql" => response::method_not_allowed("GET, POST"),

        // The interactive GraphQL API explorer/IDE.
        "/~graphiql" if method == Method::GET => {
            into_full(juniper_hyper::graphiql("/graphql", None).await)
        }
        "/~graphiql" => response::method_not_allowed("GET"),

        _ => {
            debug!("Responding with 404 to {:?} '{}'", method, path);
            response::not_found()
        }
    }
}

/// Handles a request to `/graphql`. Parsing the request, executing it and
/// choosing the status code (400 if the request could not be executed at all)
/// is done by `juniper_hyper`.
async fn handle_api(req: hyper::Request<Incoming>, ctx: &Context) -> Response {
    let before = Instant::now();

    let api_context = Arc::new(api::Context::new(Arc::clone(&ctx.store)));
    let out = juniper_hyper::graphql(Arc::clone(&ctx.api_root), api_context, req).await;

    debug!("Finished /graphql query with {} in {:.2?}", out.status(), before.elapsed());
    into_full(out)
}

/// `juniper_hyper` responds with `String` bodies.
fn into_full(response: hyper::Response<String>) -> Response {
    response.map(|body| Full::new(Bytes::from(body)))
}
