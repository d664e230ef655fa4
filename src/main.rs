use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::handle;
use astra::{Request, Server};
use clap::Parser;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;

#[cfg(test)]
mod tests;

fn main() {
    let config = Config::parse();

    let filter = EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1️⃣ Create the database handle
    let db = Database::new(&config.database).with_query_timeout(config.query_timeout());

    // 2️⃣ Make sure the tables exist
    if let Err(e) = init_db(&db, &config.schema) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    // 3️⃣ Start the server
    info!(addr = %config.listen, workers = config.max_workers, "starting server");
    let server = Server::bind(&config.listen).max_workers(config.max_workers);

    // 4️⃣ Serve requests, passing db handle into closure
    let result = server.serve(move |req: Request, _info| {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        let resp = match handle(req, &db) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        };

        info!(
            %method,
            path = %path,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );
        resp
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}
