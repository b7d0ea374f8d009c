/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod api;
pub mod client;
pub mod errors;
mod macros;
mod parsers;
pub mod photo;
pub mod photoset;
pub mod properties;
pub mod upload;

pub use api::*;
pub use client::*;
pub use errors::*;
pub use photo::*;
pub use photoset::*;
pub use properties::*;
pub use upload::UploadProps;

// Page size used when listing photos. 500 is the maximum the API allows.
pub(crate) const NUM_TO_GET: usize = 500;
