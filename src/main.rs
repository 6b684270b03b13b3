mod args;
mod guide;

use clap::Parser;
use log::{debug, info, warn, LevelFilter};
use snafu::ErrorCompat;

use crate::args::{Args, Command};
use plan_extract::ExtractConfig;

fn report_error(e: &guide::GuideError) -> ! {
    warn!("Error occured {:?}", e);
    eprintln!("An error occured {}", e);
    if let Some(bt) = ErrorCompat::backtrace(e) {
        eprintln!("trace: {}", bt);
    }
    std::process::exit(1)
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    match args.command {
        Command::Match(m) => {
            match guide::run_match(&m.config, m.input, m.input_type, m.out, m.reference) {
                Ok(summary) => {
                    if let Some(top) = summary.top() {
                        info!(
                            "Best match: {} ({}) with {}%",
                            top.name, top.party, top.percentage
                        );
                    }
                }
                Err(e) => report_error(&e),
            }
        }
        Command::Extract(x) => {
            let config: ExtractConfig = match &x.config {
                Some(path) => match guide::read_extract_config(path) {
                    Ok(c) => c,
                    Err(e) => report_error(&e),
                },
                None => ExtractConfig::default(),
            };
            // The key is read once here and handed over explicitly.
            let api_key = std::env::var(&config.completion.api_key_env).ok();
            match guide::run_extract(&x, &config, api_key) {
                Ok(doc) if doc.had_failures => {
                    warn!("Extraction finished with failed chunks: {:?}", doc.failed_chunks)
                }
                Ok(_) => info!("Extraction finished"),
                Err(e) => report_error(&e),
            }
        }
    }
}
