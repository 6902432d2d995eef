// src/bin/server.rs
use clap::Parser;
use imdb_scrape::{log, server::{self, ServeArgs}};

#[tokio::main]
async fn main() {
    let args = ServeArgs::parse();
    log::init(args.source.verbose);

    if let Err(e) = server::serve(&args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
