/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Copies photosets to `<output>/<album title>/<photo title><ext>`.

use crate::flickr::{FlickrError, MediaKind, ORIGINAL_VIDEO_LABEL};
use crate::messenger::Messenger;
use crate::service::{PhotoEntry, PhotoService};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output root used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "album";

const UNSAFE_CHARS: &[char] = &['/', '\\', '?', '*', ':', '|', '"', '<', '>', ' '];

const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpeg"),
    ("image/gif", ".gif"),
    ("image/png", ".png"),
    ("image/tiff", ".tiff"),
    ("video/x-msvideo", ".avi"),
    ("video/x-ms-wmv", ".wmv"),
    ("video/quicktime", ".mov"),
    ("video/mpeg", ".mpeg"),
    ("video/mp4", ".mp4"),
    ("video/3gpp", ".3gp"),
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Remote(#[from] FlickrError),

    #[error("cannot create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Replaces characters that are unsafe in file names with `_`
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// File extension for a content type, `None` when the type is not a known photo/video type
pub fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    MIME_EXTENSIONS
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(essence))
        .map(|(_, ext)| *ext)
}

/// A photo whose original can be fetched
#[derive(Debug, Clone)]
pub struct Asset {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl Asset {
    // Empty titles would turn into hidden, colliding file names
    fn file_stem(&self) -> String {
        if self.title.is_empty() {
            sanitize_name(&self.id)
        } else {
            sanitize_name(&self.title)
        }
    }
}

/// Totals for a finished export
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub photosets: usize,
    pub files: usize,
    pub errors: usize,
}

impl ExportSummary {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

pub struct Exporter<'a, S: PhotoService> {
    service: &'a S,
    messenger: &'a Messenger,
    output_root: PathBuf,
}

impl<'a, S: PhotoService> Exporter<'a, S> {
    pub fn new(service: &'a S, messenger: &'a Messenger, output_root: impl Into<PathBuf>) -> Self {
        Self {
            service,
            messenger,
            output_root: output_root.into(),
        }
    }

    /// Exports every photoset in order. A failing photoset does not stop the others.
    pub async fn export(&self, photoset_ids: &[String]) -> ExportSummary {
        let mut summary = ExportSummary::default();
        for photoset_id in photoset_ids {
            let (files, errors) = self.export_photoset(photoset_id).await;
            if errors == 0 {
                summary.photosets += 1;
            }
            summary.files += files;
            summary.errors += errors;
        }
        self.messenger.verbose(format!(
            "exported {} of {} photosets, {} files, {} errors",
            summary.photosets,
            photoset_ids.len(),
            summary.files,
            summary.errors
        ));
        summary
    }

    /// Exports one photoset and returns the number of files written and errors seen
    pub async fn export_photoset(&self, photoset_id: &str) -> (usize, usize) {
        let title = match self.service.photoset_title(photoset_id).await {
            Ok(title) => title,
            Err(err) => {
                self.messenger
                    .error(format!("cannot get info for photoset {}: {}", photoset_id, err));
                return (0, 1);
            }
        };
        self.messenger
            .verbose(format!("photoset {}: \"{}\"", photoset_id, title));

        let (assets, mut errors) = match self.resolve_assets(photoset_id).await {
            Ok(resolved) => resolved,
            Err(err) => {
                self.messenger.error(format!(
                    "cannot list photos of photoset {}: {}",
                    photoset_id, err
                ));
                return (0, 1);
            }
        };
        if errors > 0 {
            self.messenger.error(format!(
                "{} photos of photoset {} could not be resolved",
                errors, photoset_id
            ));
        }

        let dir_name = if title.is_empty() {
            sanitize_name(photoset_id)
        } else {
            sanitize_name(&title)
        };
        let dir = self.output_root.join(dir_name);
        if let Err(source) = fs::create_dir_all(&dir) {
            let err = ExportError::CreateDir { path: dir, source };
            self.messenger.error(err);
            return (0, errors + 1);
        }

        let mut files = 0;
        for asset in &assets {
            match self.download_asset(&dir, asset).await {
                Ok(path) => {
                    files += 1;
                    self.messenger.verbose(format!("wrote {}", path.display()));
                }
                Err(err) => {
                    errors += 1;
                    self.messenger
                        .error(format!("cannot export photo {}: {}", asset.id, err));
                }
            }
        }
        (files, errors)
    }

    /// Resolves the original url of every photo. Returns the resolved assets and how many failed.
    pub async fn resolve_assets(
        &self,
        photoset_id: &str,
    ) -> Result<(Vec<Asset>, usize), FlickrError> {
        let photos = self.service.photoset_photos(photoset_id).await?;
        let mut assets = Vec::with_capacity(photos.len());
        let mut errors = 0;
        for photo in photos {
            match self.original_url(&photo).await {
                Ok(url) => assets.push(Asset {
                    id: photo.id,
                    title: photo.title,
                    url,
                }),
                Err(err) => {
                    errors += 1;
                    self.messenger.error(format!(
                        "cannot resolve original of photo {}: {}",
                        photo.id, err
                    ));
                }
            }
        }
        Ok((assets, errors))
    }

    async fn original_url(&self, photo: &PhotoEntry) -> Result<String, FlickrError> {
        match photo.media {
            MediaKind::Video => self
                .service
                .photo_sizes(&photo.id)
                .await?
                .into_iter()
                .find(|v| v.label == ORIGINAL_VIDEO_LABEL)
                .map(|v| v.source)
                .ok_or_else(|| FlickrError::OriginalVideoMissing(photo.id.clone())),
            _ => photo
                .original_url
                .clone()
                .ok_or_else(|| FlickrError::OriginalUrlMissing(photo.id.clone())),
        }
    }

    /// Downloads one asset into `dir`, overwriting any existing file
    pub async fn download_asset(&self, dir: &Path, asset: &Asset) -> Result<PathBuf, ExportError> {
        let download = self.service.download(&asset.url).await?;
        let content_type = download.content_type.as_deref().unwrap_or_default();
        let extension = extension_for_mime(content_type).unwrap_or_else(|| {
            self.messenger.warning(format!(
                "unknown content type \"{}\" for photo {}, saving without extension",
                content_type, asset.id
            ));
            ""
        });

        let path = dir.join(format!("{}{}", asset.file_stem(), extension));
        fs::File::create(&path)
            .and_then(|mut file| file.write_all(&download.body))
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
