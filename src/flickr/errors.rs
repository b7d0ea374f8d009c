/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::flickr::ApiErrorCode;
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum FlickrError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Request network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error: {0}")]
    UrlParsing(#[from] url::ParseError),

    #[error("Expected response missing")]
    ResponseMissing(),

    #[error("API Response was error: {0:?}, msg: {1}")]
    ApiResponse(ApiErrorCode, String),

    #[error("API Response is malformed: {0}")]
    ApiResponseMalformed(serde_json::Error),

    #[error("HTTP status {0} for {1}")]
    HttpStatus(u16, String),

    #[error("Upload response is malformed: {0}")]
    UploadResponseMalformed(String),

    #[error("No original video variant for photo {0}")]
    OriginalVideoMissing(String),

    #[error("No original URL for photo {0}")]
    OriginalUrlMissing(String),
}
