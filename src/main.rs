use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use chrono::Duration;

use uptask::auth::{AuthMiddleware, PasswordHasher, TokenIssuer};
use uptask::config::Config;
use uptask::graphql::build_schema;
use uptask::{routes, store, Services};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(to_io_error)?;
    let store = store::open(config.database_url.as_deref())
        .await
        .map_err(to_io_error)?;

    let tokens = TokenIssuer::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours));
    let services = Services::new(store, PasswordHasher::new(config.bcrypt_cost), tokens.clone());
    let schema = web::Data::new(build_schema(services));

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(schema.clone())
            .wrap(AuthMiddleware::new(tokens.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

fn to_io_error(err: uptask::AppError) -> std::io::Error {
    log::error!("startup failed: {}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
