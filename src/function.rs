use lambda_http::Error;
use lambda_runtime::LambdaEvent;
use tracing::info;

use crate::config::{EnvSource, LoggerConfig};
use crate::context::{ColdStart, InvocationContext};
use crate::event::{IncomingRequest, OutgoingResponse};
use crate::router::Router;

/// The Lambda entry point: injects the log context, then dispatches.
pub struct Function<E> {
    router: Router,
    config: LoggerConfig,
    env: E,
    cold_start: ColdStart,
}

impl<E: EnvSource> Function<E> {
    pub fn new(router: Router, config: LoggerConfig, env: E) -> Self {
        Self {
            router,
            config,
            env,
            cold_start: ColdStart::default(),
        }
    }

    pub fn handle(&self, event: LambdaEvent<IncomingRequest>) -> Result<OutgoingResponse, Error> {
        let (request, lambda) = event.into_parts();
        let invocation =
            InvocationContext::from_lambda(&request, &lambda, &self.env, self.cold_start.take());
        Ok(self.invoke(&request, &invocation))
    }

    pub fn invoke(&self, request: &IncomingRequest, invocation: &InvocationContext) -> OutgoingResponse {
        let span = invocation.span();
        let _entered = span.enter();

        if self.config.log_event {
            if let Ok(event) = serde_json::to_string(request) {
                info!("{event}");
            }
        }

        self.router.resolve(request)
    }
}
