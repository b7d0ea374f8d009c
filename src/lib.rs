/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Photoset Tools
//!
//! Moves photo/video collections between a local filesystem and Flickr photosets.
//!
//! For further details on the Rest API refer to the [Flickr API Docs](https://www.flickr.com/services/api/)
//!
//! ## Binaries
//!
//! - `photoset-export` downloads the originals of one or more photosets into
//!   `<output>/<photoset title>/<photo title><ext>`
//! - `photoset-import` uploads every photo/video found under a set of paths and gathers them in
//!   a new photoset
//!
//! ## Library
//!
//! - [`flickr`] signs and sends requests and decodes the replies into typed structs
//! - [`service::PhotoService`] is the set of remote operations the tools need
//! - [`export::Exporter`] and [`import::Importer`] are the two orchestrators
//! - [`messenger::Messenger`] handles user facing output and the optional log file
//! - [`config`] reads `~/.flickrrc` and resolves credentials
//!
//! *Requests are signed with the API key, shared secret and an auth token. Obtaining the auth
//! token is left up to the user of this library.*
//!
//! ## Usage
//!
//! ```no_run
//! use photoset_tools::export::Exporter;
//! use photoset_tools::flickr::{Client, Creds};
//! use photoset_tools::messenger::Messenger;
//!
//! async fn backup(photoset_ids: &[String]) -> Result<bool, photoset_tools::flickr::FlickrError> {
//!     let client = Client::new(Creds::from_tokens("key", "secret", "token"))?;
//!     let messenger = Messenger::new();
//!     let summary = Exporter::new(&client, &messenger, "backup")
//!         .export(photoset_ids)
//!         .await;
//!     Ok(summary.is_success())
//! }
//! ```
//!
pub mod config;
pub mod export;
pub mod flickr;
pub mod import;
pub mod messenger;
pub mod service;
