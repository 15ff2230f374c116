use crate::{
    cache::SeenSet,
    client::Fetcher,
    config::Config,
    dispatch::Downloader,
    entity::{EpisodeLink, EpisodeMap},
    parser::parse_feed,
    Result,
};
use log::{debug, info};
use std::convert::TryFrom;

/// Counts for one completed run.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Summary {
    pub skipped: usize,
    pub accepted: usize,
    pub dispatched: usize,
}

/// One pass over the feed: fetch, filter against the seen-set, resolve
/// episodes, then hand each one to the downloader.
///
/// The first error ends the run. Titles accepted before it stay in the cache,
/// and nothing is dispatched, since dispatching only starts once every item
/// has been resolved.
pub struct Poller<'a, F, D> {
    config: &'a Config,
    fetcher: F,
    downloader: D,
}

impl<'a, F: Fetcher, D: Downloader> Poller<'a, F, D> {
    pub fn new(config: &'a Config, fetcher: F, downloader: D) -> Self {
        Poller {
            config,
            fetcher,
            downloader,
        }
    }

    pub fn run(&mut self) -> Result<Summary> {
        let body = self.fetcher.fetch(&self.config.feed_url)?;
        let items = parse_feed(&body)?;

        let mut summary = Summary::default();
        let mut episodes = EpisodeMap::new();
        if items.is_empty() {
            info!("no links to download");
            return Ok(summary);
        }
        // first read of the cache happens only once there is an item to check
        let mut seen = SeenSet::open(&self.config.cache_file)?;

        for item in &items {
            if seen.contains(&item.title) {
                info!("title cached, not downloading: {}", item.title);
                summary.skipped += 1;
                continue;
            }

            info!("downloading title: {}", item.title);
            let ep = EpisodeLink::try_from(item)?;
            let episode = ep.episode;
            if let Some(old) = episodes.insert(ep) {
                debug!("episode {} already queued, dropping {}", episode, old);
            }

            info!("adding title to cache file");
            seen.insert(&item.title)?;
            summary.accepted += 1;
        }

        if episodes.is_empty() {
            info!("no links to download");
            return Ok(summary);
        }

        info!("processing links with {}", self.downloader.name());
        for ep in episodes.iter() {
            let dir = self.config.episode_dir(ep.episode);
            self.downloader.download(&dir, &ep.link)?;
            summary.dispatched += 1;
        }

        Ok(summary)
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (F, D) {
        (self.fetcher, self.downloader)
    }
}
