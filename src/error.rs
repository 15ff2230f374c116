use simple_error::SimpleError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit code used when the feed could not be retrieved.
pub const EXIT_CONNECTION: i32 = 1;
/// Exit code used by the argument parser on usage errors.
pub const EXIT_USAGE: i32 = 2;
/// Exit code for feed contents that cannot be turned into episodes.
pub const EXIT_DATA: i32 = 3;
/// Exit code for seen-set cache failures.
pub const EXIT_CACHE: i32 = 4;
/// Exit code when the downloader program cannot be started.
pub const EXIT_LAUNCH: i32 = 5;

/// Every way a run can abort. None of them is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("invalid feed: {0}")]
    Feed(#[from] SimpleError),

    #[error("bad episode link {link:?}: {reason}")]
    Episode { link: String, reason: String },

    #[error("cache file {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot locate cache file: HOME is not set")]
    NoHome,

    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Connection(_) => EXIT_CONNECTION,
            Error::Feed(_) | Error::Episode { .. } => EXIT_DATA,
            Error::Cache { .. } | Error::NoHome => EXIT_CACHE,
            Error::Launch { .. } => EXIT_LAUNCH,
        }
    }

    pub(crate) fn episode(link: &str, reason: impl Into<String>) -> Self {
        Error::Episode {
            link: link.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn exit_codes_by_class() {
        assert_eq!(Error::Connection("refused".into()).exit_code(), 1);
        assert_eq!(Error::Feed(SimpleError::new("no title")).exit_code(), 3);
        assert_eq!(Error::episode("http://x", "no episode_no").exit_code(), 3);
        let cache = Error::Cache {
            path: PathBuf::from("/nowhere"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(cache.exit_code(), 4);
        assert_eq!(Error::NoHome.exit_code(), 4);
        let launch = Error::Launch {
            program: "webtoon-dl.py".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(launch.exit_code(), 5);
    }

    #[test]
    fn connection_message() {
        let e = Error::Connection("dns failure".into());
        assert_eq!(e.to_string(), "connection error: dns failure");
    }
}
