use crate::dispatch::DEFAULT_DOWNLOADER;
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

const CACHE_NAME: &str = ".cache/rss-link-dl";

#[derive(Parser, Debug)]
#[command(name = "rss-link-dl")]
#[command(about = "Retrieve comic links from a LINE Webtoon comic RSS feed.", long_about = None)]
pub struct Cli {
    /// URL to comic RSS feed
    #[arg(value_name = "RSS")]
    pub rss: String,

    /// Base directory name to store episodes in
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Be verbose
    #[arg(short, long)]
    pub verbose: bool,

    /// Seen-title cache file [default: $HOME/.cache/rss-link-dl]
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Program run once per new episode as `<PROGRAM> -d <DIR> <LINK>`
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_DOWNLOADER)]
    pub downloader: String,
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub feed_url: String,
    pub base_dir: PathBuf,
    pub verbose: bool,
    pub cache_file: PathBuf,
    pub downloader: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let cache_file = match cli.cache_file {
            Some(path) => path,
            None => default_cache_file()?,
        };
        Ok(Config {
            feed_url: cli.rss,
            base_dir: cli.dir,
            // always verbose for now, whatever -v says
            verbose: true,
            cache_file,
            downloader: cli.downloader,
        })
    }

    /// Directory handed to the downloader for one episode.
    pub fn episode_dir(&self, episode: i64) -> PathBuf {
        self.base_dir.join(episode.to_string())
    }
}

pub fn default_cache_file() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or(Error::NoHome)?;
    Ok(PathBuf::from(home).join(CACHE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_USAGE;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("args rejected")
    }

    #[test]
    fn defaults() {
        let cli = parse(&["rss-link-dl", "https://x/rss"]);
        assert_eq!(cli.rss, "https://x/rss");
        assert_eq!(cli.dir, PathBuf::from("."));
        assert!(!cli.verbose);
        assert_eq!(cli.cache_file, None);
        assert_eq!(cli.downloader, "webtoon-dl.py");
    }

    #[test]
    fn verbose_is_forced() {
        let cli = parse(&[
            "rss-link-dl",
            "-d",
            "comics",
            "--cache-file",
            "/tmp/seen",
            "https://x/rss",
        ]);
        let cfg = Config::from_cli(cli).unwrap();
        assert!(cfg.verbose);
        assert_eq!(cfg.base_dir, PathBuf::from("comics"));
        assert_eq!(cfg.cache_file, PathBuf::from("/tmp/seen"));
        assert_eq!(cfg.episode_dir(9), PathBuf::from("comics/9"));
    }

    #[test]
    fn missing_feed_url_is_usage_error() {
        let err = Cli::try_parse_from(&["rss-link-dl"]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }

    #[test]
    fn unknown_flag_is_usage_error() {
        let err = Cli::try_parse_from(&["rss-link-dl", "--bogus", "https://x/rss"]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }

    #[test]
    fn default_cache_under_home() {
        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(
                default_cache_file().unwrap(),
                PathBuf::from(home).join(".cache").join("rss-link-dl")
            );
        }
    }
}
