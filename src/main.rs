use std::io;
use std::sync::Arc;

use checkout_redirect::infrastructure::square::SquareClient;
use checkout_redirect::{build_server, CheckoutService, Config};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut square = SquareClient::new(config.environment, config.provider_timeout)
        .map_err(io::Error::other)?;
    if let Some(base_url) = &config.square_base_url {
        square = square.with_base_url(base_url.as_str());
    }

    if config.credentials.is_none() {
        log::error!(
            "SQUARE_ACCESS_TOKEN or SQUARE_LOCATION_ID is not set; checkout requests will fail"
        );
    }
    log::info!(
        "Using Square {} API at {} with {} coupon code(s)",
        config.environment,
        square.base_url(),
        config.coupons.len()
    );

    let service = CheckoutService::new(
        Arc::new(square),
        config.credentials,
        config.coupons,
        config.thank_you_url,
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(service, &config.host, config.port)?.await
}
