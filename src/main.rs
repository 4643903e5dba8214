use tracing_subscriber::EnvFilter;

mod core;
mod kernel;
mod net;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let krn = kernel::boot().await?;
    krn.setup_http_adapter().run().await
}
