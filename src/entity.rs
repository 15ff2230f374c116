use crate::{model::FeedItem, Error, Result};
use std::convert::TryFrom;
use url::form_urlencoded;

const EPISODE_PARAM: &str = "episode_no";
// the feed numbers episodes one higher than the directories we keep
const EPISODE_OFFSET: i64 = 1;

#[derive(Debug, PartialEq, Clone)]
pub struct EpisodeLink {
    pub episode: i64,
    pub link: String,
}

// query of a possibly relative link: after the first '?', before any '#'
fn query(link: &str) -> &str {
    let without_fragment = link.split('#').next().unwrap_or("");
    without_fragment
        .split_once('?')
        .map(|(_, q)| q)
        .unwrap_or("")
}

/// Reads `episode_no` from the link's query and applies the offset.
///
/// Blank values are skipped and the first remaining one wins. Links need
/// not be absolute.
pub fn episode_number(link: &str) -> Result<i64> {
    let value = form_urlencoded::parse(query(link).as_bytes())
        .find(|(k, v)| *k == EPISODE_PARAM && !v.is_empty())
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| Error::episode(link, format!("no {} parameter", EPISODE_PARAM)))?;
    let number = value
        .trim()
        .parse::<i64>()
        .map_err(|e| Error::episode(link, format!("{} {:?}: {}", EPISODE_PARAM, value, e)))?;
    number
        .checked_sub(EPISODE_OFFSET)
        .ok_or_else(|| Error::episode(link, "episode number out of range"))
}

impl TryFrom<&FeedItem> for EpisodeLink {
    type Error = Error;

    fn try_from(item: &FeedItem) -> Result<Self> {
        Ok(EpisodeLink {
            episode: episode_number(&item.link)?,
            link: item.link.clone(),
        })
    }
}

/// Episode number -> link, iterated in first-insertion order.
///
/// Inserting an episode that is already present replaces its link but keeps
/// its position, so when two feed items resolve to the same episode only the
/// later link is ever dispatched.
#[derive(Debug, Default)]
pub struct EpisodeMap {
    entries: Vec<EpisodeLink>,
}

impl EpisodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the link that was replaced, if any.
    pub fn insert(&mut self, ep: EpisodeLink) -> Option<String> {
        match self.entries.iter_mut().find(|e| e.episode == ep.episode) {
            Some(existing) => Some(std::mem::replace(&mut existing.link, ep.link)),
            None => {
                self.entries.push(ep);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpisodeLink> {
        self.entries.iter()
    }
}
