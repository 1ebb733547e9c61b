use actix_web::{App, HttpServer};
use clap::Parser;
use log::info;

use chess_board::config::{Cli, Mode, ServerConfig};
use chess_board::{routes, terminal};

async fn serve(config: ServerConfig) -> std::io::Result<()> {
    info!("Starting move log server at http://{}:{}", config.host, config.port);

    HttpServer::new(|| App::new().configure(routes::configure_routes))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}

fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    match Mode::from(Cli::parse()) {
        Mode::Serve(config) => actix_web::rt::System::new().block_on(serve(config)),
        Mode::Play(config) => terminal::play(config),
    }
}
