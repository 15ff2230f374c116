use crate::{Error, Result};
use std::io::Read;

pub trait Fetcher {
    /// Retrieves the whole response body. Any failure is a connection error.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP(S) client. No retries, no extra headers.
#[derive(Debug, Default)]
pub struct Client {}

impl Client {
    pub fn new() -> Self {
        Client {}
    }
}

impl Fetcher for Client {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("fetching {}", url);
        let resp = ureq::get(url)
            .call()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let mut body = Vec::new();
        resp.into_reader()
            .read_to_end(&mut body)
            .map_err(|e| Error::Connection(e.to_string()))?;
        log::debug!("fetched {} bytes", body.len());
        Ok(body)
    }
}
