/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Uploads a tree of photos and videos and gathers them into a new photoset.
//!
//! The first photo uploaded becomes the primary photo of the photoset. It is part of the
//! photoset from creation on, so only the remaining photos are added afterwards.

use crate::flickr::{CreatePhotosetProps, FlickrError, UploadProps};
use crate::messenger::Messenger;
use crate::service::PhotoService;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Largest file the service accepts
pub const MAX_UPLOAD_BYTES: u64 = 300 * 1024 * 1024;

/// Recognised photo and video extensions, compared case-insensitively
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "jpeg", "jpg", "gif", "png", "tiff", "avi", "wmv", "mov", "mpg", "mpeg", "mp4", "3gp",
];

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("{0}: no such file or directory")]
    MissingPath(PathBuf),

    #[error("cannot walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("{0} input paths could not be read")]
    Discovery(usize),

    #[error("{path}: {size} bytes exceeds the {max} byte limit", max = MAX_UPLOAD_BYTES)]
    TooLarge { path: PathBuf, size: u64 },

    #[error("cannot stat {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot upload {path}: {source}")]
    Upload { path: PathBuf, source: FlickrError },

    #[error("{0} files failed to upload")]
    UploadFailed(usize),

    #[error("no files were uploaded")]
    NothingUploaded,

    #[error("cannot create photoset \"{title}\": {source}")]
    CreatePhotoset { title: String, source: FlickrError },

    #[error("{failed} photos could not be added to photoset {photoset_id}")]
    Attach { photoset_id: String, failed: usize },
}

/// Whether a file name carries one of [`MEDIA_EXTENSIONS`]
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|v| v.to_str())
        .is_some_and(|ext| MEDIA_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(ext)))
}

/// Settings for one import run
#[derive(Debug, Default, Clone)]
pub struct ImportOptions {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Upload in ascending path order instead of walk order
    pub sort: bool,
    /// Skip files that fail to upload instead of failing the run
    pub keep_going: bool,
}

impl ImportOptions {
    fn upload_props(&self) -> UploadProps {
        UploadProps {
            tags: (!self.tags.is_empty()).then(|| self.tags.join(" ")),
            description: self.description.clone(),
        }
    }
}

/// Ids collected by the upload phase
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub photo_ids: Vec<String>,
    /// Failed files that count against the run
    pub errors: usize,
    /// Failed files in total, including the ones tolerated by keep-going mode
    pub skipped: usize,
}

/// Result of a completed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub photoset_id: String,
    pub photo_count: usize,
}

pub struct Importer<'a, S: PhotoService> {
    service: &'a S,
    messenger: &'a Messenger,
    options: ImportOptions,
}

impl<'a, S: PhotoService> Importer<'a, S> {
    pub fn new(service: &'a S, messenger: &'a Messenger, options: ImportOptions) -> Self {
        Self {
            service,
            messenger,
            options,
        }
    }

    /// Runs discovery, upload, photoset creation and attach in that order
    pub async fn import(&self, paths: &[PathBuf]) -> Result<ImportSummary, ImportError> {
        let files = self.discover(paths)?;
        self.messenger
            .verbose(format!("found {} files to upload", files.len()));

        let outcome = self.upload_files(&files).await;
        if outcome.errors > 0 {
            return Err(ImportError::UploadFailed(outcome.errors));
        }
        let mut photo_ids = outcome.photo_ids.into_iter();
        let Some(primary) = photo_ids.next() else {
            return Err(ImportError::NothingUploaded);
        };
        let additional: Vec<String> = photo_ids.collect();

        let photoset_id = self.create_photoset(&primary).await?;
        self.messenger.verbose(format!(
            "created photoset {} \"{}\" with primary photo {}",
            photoset_id, self.options.title, primary
        ));

        let failed = self.attach(&photoset_id, &additional).await;
        if failed > 0 {
            return Err(ImportError::Attach {
                photoset_id,
                failed,
            });
        }
        Ok(ImportSummary {
            photoset_id,
            photo_count: additional.len() + 1,
        })
    }

    /// Collects media files under every path, sorted when requested.
    ///
    /// Every path must exist; otherwise nothing is returned.
    pub fn discover(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, ImportError> {
        let mut files = Vec::new();
        let mut errors = 0;
        for root in paths {
            if !root.exists() {
                errors += 1;
                self.messenger
                    .error(ImportError::MissingPath(root.to_path_buf()));
                continue;
            }
            for entry in WalkDir::new(root).follow_links(true) {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() && is_media_file(entry.path()) {
                            files.push(entry.into_path());
                        }
                    }
                    Err(source) => {
                        errors += 1;
                        self.messenger.error(ImportError::Walk {
                            path: root.to_path_buf(),
                            source,
                        });
                    }
                }
            }
        }
        if errors > 0 {
            return Err(ImportError::Discovery(errors));
        }
        if self.options.sort {
            files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        }
        Ok(files)
    }

    /// Uploads every file in order. Per-file failures only count in default mode.
    pub async fn upload_files(&self, files: &[PathBuf]) -> UploadOutcome {
        let props = self.options.upload_props();
        let mut outcome = UploadOutcome::default();
        for path in files {
            match self.upload_file(path, &props).await {
                Ok(photo_id) => {
                    self.messenger
                        .verbose(format!("uploaded {} as {}", path.display(), photo_id));
                    outcome.photo_ids.push(photo_id);
                }
                Err(err) => {
                    outcome.skipped += 1;
                    if self.options.keep_going {
                        self.messenger.warning(format!("skipping: {}", err));
                    } else {
                        outcome.errors += 1;
                        self.messenger.error(err);
                    }
                }
            }
        }
        outcome
    }

    /// Uploads one file, retrying once on failure
    pub async fn upload_file(&self, path: &Path, props: &UploadProps) -> Result<String, ImportError> {
        let size = std::fs::metadata(path)
            .map_err(|source| ImportError::Metadata {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        if size > MAX_UPLOAD_BYTES {
            return Err(ImportError::TooLarge {
                path: path.to_path_buf(),
                size,
            });
        }

        match self.service.upload(path, props).await {
            Ok(photo_id) => Ok(photo_id),
            Err(first) => {
                log::debug!("retrying {} after: {}", path.display(), first);
                self.messenger
                    .verbose(format!("upload of {} failed, retrying", path.display()));
                self.service
                    .upload(path, props)
                    .await
                    .map_err(|source| ImportError::Upload {
                        path: path.to_path_buf(),
                        source,
                    })
            }
        }
    }

    async fn create_photoset(&self, primary: &str) -> Result<String, ImportError> {
        let props = CreatePhotosetProps {
            title: self.options.title.clone(),
            primary_photo_id: primary.to_string(),
            description: self.options.description.clone(),
        };
        self.service
            .create_photoset(&props)
            .await
            .map_err(|source| ImportError::CreatePhotoset {
                title: self.options.title.clone(),
                source,
            })
    }

    /// Adds each photo to the photoset and returns how many failed
    pub async fn attach(&self, photoset_id: &str, photo_ids: &[String]) -> usize {
        let mut failed = 0;
        for photo_id in photo_ids {
            if let Err(err) = self.service.add_photo(photoset_id, photo_id).await {
                failed += 1;
                self.messenger.error(format!(
                    "cannot add photo {} to photoset {}: {}",
                    photo_id, photoset_id, err
                ));
            }
        }
        failed
    }
}
