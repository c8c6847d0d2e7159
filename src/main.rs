use std::path::Path;

use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use rust_product_scraper::catalog;
use rust_product_scraper::config::Config;
use rust_product_scraper::error::ScrapeError;

fn init_logging() {
    if Path::new("log4rs.yml").exists() {
        log4rs::init_file("log4rs.yml", Default::default()).unwrap();
        return;
    }

    // Console-only fallback so the binary still logs when run outside the
    // repository root.
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(log::LevelFilter::Info))
        .unwrap();
    log4rs::init_config(config).unwrap();
}

#[tokio::main]
async fn main() -> Result<(), ScrapeError> {
    init_logging();

    let config = Config::load();
    info!("Output directory: {}", config.output_dir);

    catalog::run_catalog(&config).await
}
