use hello_greeter::config::{LoggerConfig, ProcessEnv};
use hello_greeter::event::IncomingRequest;
use hello_greeter::function::Function;
use hello_greeter::logging::{self, StructuredLogLayer};
use hello_greeter::router;
use lambda_http::Error;
use lambda_runtime::{run, service_fn, LambdaEvent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = LoggerConfig::from_env(&ProcessEnv)?;
    // every log line needs ENVIRONMENT and AWS_REGION
    logging::require_environment(&ProcessEnv)?;

    tracing_subscriber::registry()
        .with(
            StructuredLogLayer::new(ProcessEnv, std::io::stdout)
                .with_sample_rate(config.sample_rate)
                .with_filter(config.level),
        )
        .init();

    let function = Function::new(router::app(), config, ProcessEnv);
    let function = &function;

    run(service_fn(move |event: LambdaEvent<IncomingRequest>| async move {
        function.handle(event)
    }))
    .await
}
