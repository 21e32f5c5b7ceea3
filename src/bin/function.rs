//! Serverless entry point: adapts `lambda_http` invocations to
//! `hire_relay::function::invoke`.

use hire_relay::{AppContext, ConfigBuilder, function};
use lambda_http::{Body, Error, Request, Response, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = ConfigBuilder::new().from_env().build()?;
    hire_relay::init_tracing_with_config(&config);

    let ctx = AppContext::builder().with_config(config).build();
    let ctx = &ctx;
    run(service_fn(move |event: Request| async move { handle(ctx, event).await })).await
}

async fn handle(ctx: &AppContext, event: Request) -> Result<Response<Body>, Error> {
    let reply = function::invoke(ctx, event.method(), event.body().as_ref()).await;

    let mut builder = Response::builder().status(reply.status);
    if let Some(headers) = builder.headers_mut() {
        headers.extend(reply.headers);
    }
    let body = reply.body.map(Body::from).unwrap_or(Body::Empty);

    Ok(builder.body(body)?)
}
