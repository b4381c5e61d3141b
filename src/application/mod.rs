mod scrape_service;
mod target_resolver;

pub use scrape_service::ScrapeService;
pub use target_resolver::{resolve, PRESSURE_PATH};
