/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use clap::Parser;
use clap::error::ErrorKind;
use dotenvy::dotenv;
use photoset_tools::config::{CredentialArgs, load_creds};
use photoset_tools::export::{DEFAULT_OUTPUT_DIR, Exporter};
use photoset_tools::flickr::Client;
use photoset_tools::messenger::Messenger;
use std::path::PathBuf;
use std::process::ExitCode;

// CLI Definitions
static LONG_ABOUT: &str = r#"
Downloads the original photos and videos of one or more Flickr photosets.

Each photoset is written to <OUTPUT>/<photoset title>/ with one file per photo, named after the
photo title and the content type of the download.

Credentials are taken from --key/--secret/--token, else from the environment:
FLICKR_KEY, FLICKR_SECRET, FLICKR_TOKEN - API key, shared secret and auth token
FLICKR_RC - rc file to read key=, secret= and token= from (default ~/.flickrrc)
A .env file can be created in the working directory that contains these as well.
"#;

#[derive(Debug, Parser)]
#[command(name = "photoset-export", version)]
#[command(about = "Export Flickr photosets to disk", long_about = Some(LONG_ABOUT))]
struct Cli {
    #[command(flatten)]
    creds: CredentialArgs,

    /// Directory the photosets are written under
    #[arg(short = 'o', long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Also append all output to this file
    #[arg(short = 'l', long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Show progress details
    #[arg(long)]
    verbose: bool,

    /// Photosets to export
    #[arg(required = true, value_name = "PHOTOSET_ID")]
    photoset_ids: Vec<String>,
}

// CLI tool for exporting photosets
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();
    log::debug!("+++ export");

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let mut messenger = Messenger::new();
    messenger.set_prefix("photoset-export: ");
    if let Some(log) = args.log.as_ref() {
        messenger.set_log_file(log);
    }
    if args.verbose {
        messenger.set_verbose(None);
    }

    let creds = load_creds(&args.creds).unwrap_or_else(|err| messenger.error_exit(1, err));
    let client = Client::new(creds).unwrap_or_else(|err| messenger.error_exit(1, err));

    let summary = Exporter::new(&client, &messenger, &args.output)
        .export(&args.photoset_ids)
        .await;

    log::debug!("--- export");
    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
