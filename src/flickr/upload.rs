/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::flickr::errors::FlickrError;
use crate::flickr::{ApiErrorCode, Client};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static STAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<rsp\s+stat="(\w+)""#).expect("valid regex"));
static PHOTO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<photoid[^>]*>\s*([^<\s]+)\s*</photoid>").expect("valid regex")
});
static ERR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<err\s+code="(\d+)"\s+msg="([^"]*)""#).expect("valid regex")
});

/// Properties shared by every file in an upload batch
#[derive(Default, Debug, Clone)]
pub struct UploadProps {
    /// Space separated tag list
    pub tags: Option<String>,

    pub description: Option<String>,
}

impl Client {
    /// Uploads the file at `path` and returns the new photo id
    pub async fn upload_file(&self, path: &Path, props: &UploadProps) -> Result<String, FlickrError> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let mut params = Vec::new();
        if let Some(tags) = props.tags.as_deref() {
            params.push(("tags", tags));
        }
        if let Some(description) = props.description.as_deref() {
            params.push(("description", description));
        }
        self.api_client
            .upload(&file_name, data, mime.essence_str(), &params)
            .await
    }
}

/// Upload replies are always XML, either `<photoid>` or `<err code msg>` inside `<rsp>`
pub(crate) fn parse_upload_response(body: &str) -> Result<String, FlickrError> {
    let stat = STAT_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| FlickrError::UploadResponseMalformed(body.to_string()))?;

    if stat != "ok" {
        let (code, msg) = ERR_RE
            .captures(body)
            .map(|c| {
                (
                    c[1].parse::<u32>().unwrap_or_default(),
                    c[2].to_string(),
                )
            })
            .unwrap_or((0, String::from("upload failed")));
        return Err(FlickrError::ApiResponse(ApiErrorCode::from(code), msg));
    }

    PHOTO_ID_RE
        .captures(body)
        .map(|c| c[1].to_string())
        .ok_or_else(|| FlickrError::UploadResponseMalformed(body.to_string()))
}
