use actix_web::{web, App, HttpServer};
use catchfish::config::db::DbProfile;
use catchfish::infra::state::build_state;
use catchfish::middleware::RequestTrace;
use catchfish::{routes, telemetry};
use catchfish::state::security_config::SecurityConfig;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };

    // Game settings are read from CATCHFISH_* variables by the builder.
    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_security(SecurityConfig::new(jwt.as_bytes()))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(host = %host, port, settings = ?app_state.settings, "starting catchfish backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
