/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::flickr::errors::FlickrError;
use crate::flickr::macros::{obj_from_method, stream_pages_from_method};
use crate::flickr::parsers::{from_content, from_str_or_num};
use crate::flickr::{Client, NUM_TO_GET, Photo, PhotoExtra, extras_param};
use async_stream::try_stream;
use futures::Stream;
use serde::Deserialize;

/// Holds information returned from `flickr.photosets.getInfo`.
///
/// See [Flickr API Docs](https://www.flickr.com/services/api/flickr.photosets.getInfo.html) for
/// more details on the individual fields.
#[derive(Deserialize, Debug)]
pub struct Photoset {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    pub id: String,

    #[serde(default, deserialize_with = "from_content")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "from_content")]
    pub description: Option<String>,

    pub primary: Option<String>,

    #[serde(default, rename = "count_photos", deserialize_with = "from_str_or_num")]
    pub photo_count: u64,

    #[serde(default, rename = "count_videos", deserialize_with = "from_str_or_num")]
    pub video_count: u64,
}

impl Photoset {
    const GET_INFO: &'static str = "flickr.photosets.getInfo";
    const GET_PHOTOS: &'static str = "flickr.photosets.getPhotos";
    const CREATE: &'static str = "flickr.photosets.create";
    const ADD_PHOTO: &'static str = "flickr.photosets.addPhoto";

    /// Returns information for the specified photoset id
    pub async fn from_id(client: Client, id: &str) -> Result<Self, FlickrError> {
        let params = [("photoset_id", id)];
        obj_from_method!(client, Self::GET_INFO, &params, PhotosetResponse, photoset)
    }

    /// Retrieves the photos of this photoset along with their media kind and original url
    pub fn photos(&self) -> Result<impl Stream<Item = Result<Photo, FlickrError>>, FlickrError> {
        let client = self.client.as_ref().ok_or(FlickrError::ResponseMissing())?;
        Ok(Self::photos_from_id(client.clone(), &self.id))
    }

    /// Retrieves the photos of the specified photoset id page by page
    pub fn photos_from_id(
        client: Client,
        id: &str,
    ) -> impl Stream<Item = Result<Photo, FlickrError>> {
        let photoset_id = id.to_string();
        let extras = extras_param(&[PhotoExtra::Media, PhotoExtra::UrlO]);
        stream_pages_from_method!(
            client,
            Self::GET_PHOTOS,
            [
                ("photoset_id", photoset_id.as_str()),
                ("extras", extras.as_str())
            ],
            PhotosetPhotosResponse,
            photoset,
            photo
        )
    }

    /// Creates a new photoset around an already uploaded primary photo
    pub async fn create(
        client: Client,
        props: &CreatePhotosetProps,
    ) -> Result<CreatedPhotoset, FlickrError> {
        let mut params = vec![
            ("title", props.title.as_str()),
            ("primary_photo_id", props.primary_photo_id.as_str()),
        ];
        if let Some(description) = props.description.as_deref() {
            params.push(("description", description));
        }
        client
            .call_write::<CreatedPhotosetResponse>(Self::CREATE, &params)
            .await
            .map(|v| v.photoset)
    }

    /// Adds a photo to the specified photoset id
    pub async fn add_photo_to_id(
        client: Client,
        photoset_id: &str,
        photo_id: &str,
    ) -> Result<(), FlickrError> {
        let params = [("photoset_id", photoset_id), ("photo_id", photo_id)];
        client
            .call_write::<serde_json::Value>(Self::ADD_PHOTO, &params)
            .await
            .map(|_| ())
    }

    /// Adds a photo to this photoset
    pub async fn add_photo(&self, photo_id: &str) -> Result<(), FlickrError> {
        let client = self.client.as_ref().ok_or(FlickrError::ResponseMissing())?;
        Self::add_photo_to_id(client.clone(), &self.id, photo_id).await
    }
}

/// Properties that can be used in the creation of a Photoset
#[derive(Default, Debug, Clone)]
pub struct CreatePhotosetProps {
    pub title: String,

    pub primary_photo_id: String,

    pub description: Option<String>,
}

/// Identity of a freshly created photoset
#[derive(Deserialize, Debug, Clone)]
pub struct CreatedPhotoset {
    pub id: String,

    #[serde(default)]
    pub url: Option<String>,
}

// Expected response for a Photoset info request
#[derive(Deserialize, Debug)]
struct PhotosetResponse {
    photoset: Photoset,
}

// One page of photos within a photoset
#[derive(Deserialize, Debug)]
struct PhotosetPhotosPage {
    #[serde(default)]
    photo: Vec<Photo>,

    #[serde(default, deserialize_with = "from_str_or_num")]
    pages: u64,
}

// Expected response for a request to get a Photoset's photos
#[derive(Deserialize, Debug)]
struct PhotosetPhotosResponse {
    photoset: PhotosetPhotosPage,
}

// Expected response for a create request
#[derive(Deserialize, Debug)]
struct CreatedPhotosetResponse {
    photoset: CreatedPhotoset,
}
