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
use photoset_tools::flickr::Client;
use photoset_tools::import::{ImportOptions, Importer};
use photoset_tools::messenger::Messenger;
use std::path::PathBuf;
use std::process::ExitCode;

// CLI Definitions
static LONG_ABOUT: &str = r#"
Uploads every photo and video found under the given paths and gathers them in a new Flickr
photoset called TITLE.

Directories are searched recursively for jpeg, jpg, gif, png, tiff, avi, wmv, mov, mpg, mpeg,
mp4 and 3gp files. Files larger than 300 MiB are skipped. The first uploaded file becomes the
primary photo of the photoset.

Credentials are taken from --key/--secret/--token, else from the environment:
FLICKR_KEY, FLICKR_SECRET, FLICKR_TOKEN - API key, shared secret and auth token
FLICKR_RC - rc file to read key=, secret= and token= from (default ~/.flickrrc)
A .env file can be created in the working directory that contains these as well.
"#;

#[derive(Debug, Parser)]
#[command(name = "photoset-import", version)]
#[command(about = "Import a directory tree as a new Flickr photoset", long_about = Some(LONG_ABOUT))]
struct Cli {
    #[command(flatten)]
    creds: CredentialArgs,

    /// Description for the photoset and every uploaded photo
    #[arg(short = 'd', long)]
    description: Option<String>,

    /// Tag added to every uploaded photo. Can be repeated.
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Upload files in ascending path order
    #[arg(short = 's', long)]
    sort: bool,

    /// Skip files that fail to upload instead of failing
    #[arg(short = 'k', long)]
    keep_going: bool,

    /// Also append all output to this file
    #[arg(short = 'l', long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Show progress details
    #[arg(long)]
    verbose: bool,

    /// Title of the new photoset
    title: String,

    /// Files or directories to upload
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
}

// CLI tool for importing a photoset
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();
    log::debug!("+++ import");

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
    messenger.set_prefix("photoset-import: ");
    if let Some(log) = args.log.as_ref() {
        messenger.set_log_file(log);
    }
    if args.verbose {
        messenger.set_verbose(None);
    }

    let creds = load_creds(&args.creds).unwrap_or_else(|err| messenger.error_exit(1, err));
    let client = Client::new(creds).unwrap_or_else(|err| messenger.error_exit(1, err));

    let options = ImportOptions {
        title: args.title,
        description: args.description,
        tags: args.tags,
        sort: args.sort,
        keep_going: args.keep_going,
    };
    let result = Importer::new(&client, &messenger, options)
        .import(&args.paths)
        .await;

    log::debug!("--- import");
    match result {
        Ok(summary) => {
            messenger.verbose(format!(
                "photoset {} holds {} photos",
                summary.photoset_id, summary.photo_count
            ));
            ExitCode::SUCCESS
        }
        Err(err) => {
            messenger.error(err);
            ExitCode::FAILURE
        }
    }
}
