use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info, warn};

use cravings_gate::config::CONFIG;
use cravings_gate::middleware::create_login_rate_limiter_config;
use cravings_gate::routes::{configure_routes, RouteOptions};
use cravings_gate::routing::{RouteGate, RouteTable};
use cravings_gate::services::{codec_for, AuthBackend, HttpAuthBackend, TokenMode};

fn load_route_table() -> io::Result<RouteTable> {
    let table = match CONFIG.route_table_path.as_deref() {
        Some(path) => {
            info!("Loading route table from {}", path);
            RouteTable::load(path)
        }
        None => {
            let table = RouteTable::builtin();
            table.validate().map(|_| table)
        }
    };
    table.map_err(|e| {
        error!("Invalid route table: {}", e);
        io::Error::new(io::ErrorKind::InvalidData, e.to_string())
    })
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let table = load_route_table()?;
    if CONFIG.token_mode == TokenMode::Trusting {
        warn!("Token signatures are NOT verified; role claims are taken on trust");
    }
    let gate = Arc::new(RouteGate::new(
        table,
        codec_for(CONFIG.token_mode, &CONFIG.jwt_secret),
    ));
    info!("Route gate ready ({} token codec)", gate.codec_name());

    let backend = HttpAuthBackend::new(CONFIG.auth_backend_url.clone(), CONFIG.backend_timeout)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    info!("Forwarding logins to {} ({})", CONFIG.auth_backend_url, backend.name());
    let backend: Arc<dyn AuthBackend> = Arc::new(backend);

    let options = RouteOptions {
        gate: gate.clone(),
        cookies: CONFIG.cookie_settings(),
        login_limiter: create_login_rate_limiter_config(),
        rate_limit_login: CONFIG.login_rate_limit,
    };
    let gate_data = web::Data::from(gate);
    let backend_data: web::Data<dyn AuthBackend> = web::Data::from(backend);
    let cookie_data = web::Data::new(options.cookies.clone());

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        let options = options.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(gate_data.clone())
            .app_data(backend_data.clone())
            .app_data(cookie_data.clone())
            .configure(move |cfg| configure_routes(cfg, &options))
    })
    .bind(&server_addr)?
    .run()
    .await
}
