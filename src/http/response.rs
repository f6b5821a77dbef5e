use hyper::{StatusCode, header};

use super::Response;


pub(crate) fn json(status: StatusCode, body: Vec<u8>) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub(crate) fn html(body: String) -> Response {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/html; charset=UTF-8")
        .body(body.into())
        .unwrap()
}

pub(crate) fn bad_request(msg: &str) -> Response {
    plain_text(StatusCode::BAD_REQUEST, format!("Bad request: {msg}"))
}

pub(crate) fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "404 Not found".into())
}

/// `allowed` is the value for the `Allow` header, e.g. "GET, POST".
pub(crate) fn method_not_allowed(allowed: &'static str) -> Response {
    let mut response = plain_text(StatusCode::METHOD_NOT_ALLOWED, "405 Method not allowed".into());
    response.headers_mut().insert(header::ALLOW, header::HeaderValue::from_static(allowed));
    response
}

pub(crate) fn internal_server_error() -> Response {
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
}

fn plain_text(status: StatusCode, body: String) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=UTF-8")
        .body(body.into())
        .unwrap()
}
