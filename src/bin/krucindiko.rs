//! Render flash-card sheets from `vortoj.tsv`.
//!
//! Usage:
//!   cargo run --release --bin krucindiko
//!
//! Reads `vortoj.tsv` from the working directory and writes
//! `krucindiko-unuflanke.pdf`, `krucindiko-duflanke.pdf` and
//! `krucindiko.pdf` next to it. Set `RUST_LOG=info` to see page counts.

use env_logger::Env;
use krucindiko::config::AppConfig;
use krucindiko::pipeline;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = AppConfig::default();
    if let Err(e) = pipeline::run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
