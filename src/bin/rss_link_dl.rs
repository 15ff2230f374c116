use clap::Parser;
use std::process;
use webtoon_rss::{
    config::{Cli, Config},
    get_poller, util, Error,
};

fn fail(err: Error) -> ! {
    eprintln!("{}: error: {}", util::program_name(), err);
    process::exit(err.exit_code());
}

fn main() {
    let cli = Cli::parse();
    let config = Config::from_cli(cli).unwrap_or_else(|e| fail(e));

    let _log = match util::init_log(config.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("{}: logger unavailable: {}", util::program_name(), e);
            None
        }
    };

    let mut poller = get_poller(&config);
    match poller.run() {
        Ok(summary) => log::debug!("{:?}", summary),
        Err(e) => fail(e),
    }
}
