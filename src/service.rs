/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! The remote operations the export and import tools depend on.
//!
//! [`PhotoService`] is implemented by [`flickr::Client`] and can be implemented by anything else
//! that speaks the same photoset model.

use crate::flickr::{
    self, CreatePhotosetProps, Download, FlickrError, MediaKind, Photo, Photoset, UploadProps,
};
use futures::TryStreamExt;
use std::path::Path;

/// A photoset member with the metadata needed to fetch its original
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoEntry {
    pub id: String,
    pub title: String,
    pub media: MediaKind,
    pub original_url: Option<String>,
}

/// One size/variant of a photo or video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeVariant {
    pub label: String,
    pub source: String,
    pub media: MediaKind,
}

/// One method per remote operation.
#[allow(async_fn_in_trait)]
pub trait PhotoService {
    /// Title of a photoset. Fails when the photoset has no title element.
    async fn photoset_title(&self, photoset_id: &str) -> Result<String, FlickrError>;

    /// Every photo of a photoset with media kind and original url
    async fn photoset_photos(&self, photoset_id: &str) -> Result<Vec<PhotoEntry>, FlickrError>;

    async fn photo_sizes(&self, photo_id: &str) -> Result<Vec<SizeVariant>, FlickrError>;

    /// Fetches an asset url. Non success HTTP statuses are errors.
    async fn download(&self, url: &str) -> Result<Download, FlickrError>;

    /// Uploads one file synchronously and returns the new photo id
    async fn upload(&self, path: &Path, props: &UploadProps) -> Result<String, FlickrError>;

    /// Creates a photoset and returns its id
    async fn create_photoset(&self, props: &CreatePhotosetProps) -> Result<String, FlickrError>;

    async fn add_photo(&self, photoset_id: &str, photo_id: &str) -> Result<(), FlickrError>;
}

impl From<Photo> for PhotoEntry {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title.unwrap_or_default(),
            media: photo.media,
            original_url: photo.original_url,
        }
    }
}

impl From<flickr::PhotoSize> for SizeVariant {
    fn from(size: flickr::PhotoSize) -> Self {
        Self {
            label: size.label,
            source: size.source,
            media: size.media,
        }
    }
}

impl PhotoService for flickr::Client {
    async fn photoset_title(&self, photoset_id: &str) -> Result<String, FlickrError> {
        Photoset::from_id(self.clone(), photoset_id)
            .await?
            .title
            .ok_or(FlickrError::ResponseMissing())
    }

    async fn photoset_photos(&self, photoset_id: &str) -> Result<Vec<PhotoEntry>, FlickrError> {
        Photoset::photos_from_id(self.clone(), photoset_id)
            .map_ok(PhotoEntry::from)
            .try_collect()
            .await
    }

    async fn photo_sizes(&self, photo_id: &str) -> Result<Vec<SizeVariant>, FlickrError> {
        Ok(Photo::sizes_from_id(self.clone(), photo_id)
            .await?
            .into_iter()
            .map(SizeVariant::from)
            .collect())
    }

    async fn download(&self, url: &str) -> Result<Download, FlickrError> {
        flickr::Client::download(self, url).await
    }

    async fn upload(&self, path: &Path, props: &UploadProps) -> Result<String, FlickrError> {
        self.upload_file(path, props).await
    }

    async fn create_photoset(&self, props: &CreatePhotosetProps) -> Result<String, FlickrError> {
        Photoset::create(self.clone(), props).await.map(|v| v.id)
    }

    async fn add_photo(&self, photoset_id: &str, photo_id: &str) -> Result<(), FlickrError> {
        Photoset::add_photo_to_id(self.clone(), photoset_id, photo_id).await
    }
}
