use lambda_http::http::{Method, StatusCode};
use serde_json::json;
use tracing::debug;

use crate::event::{IncomingRequest, OutgoingResponse};
use crate::hello;

pub type RouteHandler = fn(&IncomingRequest) -> OutgoingResponse;

struct Route {
    method: Method,
    path: &'static str,
    handler: RouteHandler,
}

/// Ordered `(method, path) -> handler` table. First match wins.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: Method, path: &'static str, handler: RouteHandler) -> Self {
        self.routes.push(Route {
            method,
            path,
            handler,
        });
        self
    }

    pub fn get(self, path: &'static str, handler: RouteHandler) -> Self {
        self.route(Method::GET, path, handler)
    }

    pub fn post(self, path: &'static str, handler: RouteHandler) -> Self {
        self.route(Method::POST, path, handler)
    }

    pub fn resolve(&self, request: &IncomingRequest) -> OutgoingResponse {
        let method = request.method();
        let route = self
            .routes
            .iter()
            .find(|r| Some(&r.method) == method.as_ref() && r.path == request.path);

        match route {
            Some(route) => (route.handler)(request),
            None => {
                debug!(method = %request.http_method, path = %request.path, "no route matched");
                OutgoingResponse::json(
                    StatusCode::NOT_FOUND,
                    json!({ "statusCode": 404, "message": "Not found" }),
                )
            }
        }
    }
}

/// The routes served by this function.
pub fn app() -> Router {
    Router::new()
        .get("/hello", hello::get_hello)
        .post("/hello", hello::post_hello)
}
