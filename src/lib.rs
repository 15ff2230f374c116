pub mod cache;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod model;
pub mod parser;
pub mod rss;
pub mod util;

pub use error::{Error, Result};

// default wiring of the poller: HTTP fetch and the configured external program
pub fn get_poller(
    config: &config::Config,
) -> rss::Poller<'_, client::Client, dispatch::ExternalDownloader> {
    rss::Poller::new(
        config,
        client::Client::new(),
        dispatch::ExternalDownloader::new(config.downloader.clone()),
    )
}
