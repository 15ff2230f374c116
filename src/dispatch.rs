use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Program invoked once per new episode when none is configured.
pub const DEFAULT_DOWNLOADER: &str = "webtoon-dl.py";

pub trait Downloader {
    fn name(&self) -> &str;

    /// Runs one download to completion. Its outcome is not inspected.
    fn download(&mut self, dir: &Path, link: &str) -> Result<()>;
}

/// Runs `<program> -d <dir> <link>` and waits for it.
#[derive(Debug, Clone)]
pub struct ExternalDownloader {
    program: String,
}

impl ExternalDownloader {
    pub fn new(program: impl Into<String>) -> Self {
        ExternalDownloader {
            program: program.into(),
        }
    }
}

impl Default for ExternalDownloader {
    fn default() -> Self {
        Self::new(DEFAULT_DOWNLOADER)
    }
}

impl Downloader for ExternalDownloader {
    fn name(&self) -> &str {
        &self.program
    }

    fn download(&mut self, dir: &Path, link: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("-d")
            .arg(dir)
            .arg(link)
            .status()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;
        log::debug!("{} exited with {}", self.program, status);
        Ok(())
    }
}
