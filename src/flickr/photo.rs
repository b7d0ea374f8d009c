/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::flickr::errors::FlickrError;
use crate::flickr::parsers::{from_content, from_empty_str_to_none, from_media};
use crate::flickr::{Client, MediaKind};
use serde::Deserialize;

/// Label the service gives the untranscoded upload of a video
pub const ORIGINAL_VIDEO_LABEL: &str = "Video Original";

/// A photo or video entry as listed inside a photoset.
///
/// See [Flickr API Docs](https://www.flickr.com/services/api/flickr.photosets.getPhotos.html)
#[derive(Deserialize, Debug)]
pub struct Photo {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    pub id: String,

    #[serde(default, deserialize_with = "from_content")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "from_media")]
    pub media: MediaKind,

    #[serde(default, rename = "url_o", deserialize_with = "from_empty_str_to_none")]
    pub original_url: Option<String>,
}

impl Photo {
    const GET_SIZES: &'static str = "flickr.photos.getSizes";

    /// Returns the available size variants of the specified photo id
    pub async fn sizes_from_id(client: Client, id: &str) -> Result<Vec<PhotoSize>, FlickrError> {
        let params = [("photo_id", id)];
        client
            .call::<SizesResponse>(Self::GET_SIZES, &params)
            .await
            .map(|v| v.sizes.size)
    }

    /// Returns the available size variants of this photo
    pub async fn sizes(&self) -> Result<Vec<PhotoSize>, FlickrError> {
        let client = self.client.as_ref().ok_or(FlickrError::ResponseMissing())?;
        Self::sizes_from_id(client.clone(), &self.id).await
    }
}

/// One size variant returned by `flickr.photos.getSizes`
#[derive(Deserialize, Debug, Clone)]
pub struct PhotoSize {
    pub label: String,

    pub source: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "from_media")]
    pub media: MediaKind,
}

#[derive(Deserialize, Debug)]
struct SizeList {
    #[serde(default)]
    size: Vec<PhotoSize>,
}

// Expected response for a sizes request
#[derive(Deserialize, Debug)]
struct SizesResponse {
    sizes: SizeList,
}
