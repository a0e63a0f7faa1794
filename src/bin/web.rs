//! Single binary web server for the round-robin tournament API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! DATA_FILE keeps a JSON snapshot across restarts; STATIC_DIR serves a front-end at /.

use actix_files::Files;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use round_robin_tournament::{web, ServerConfig, TournamentStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = match &config.data_file {
        Some(path) => {
            log::info!("Using snapshot file {}", path.display());
            TournamentStore::open(path)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
        }
        None => {
            log::info!("No DATA_FILE set, state is kept in memory only");
            TournamentStore::new()
        }
    };
    let store = Data::new(store);

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        let app = App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(web::configure);
        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
