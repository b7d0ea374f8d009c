/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use bytes::Bytes;
use photoset_tools::flickr::{
    ApiErrorCode, CreatePhotosetProps, Download, FlickrError, MediaKind, UploadProps,
};
use photoset_tools::messenger::Messenger;
use photoset_tools::service::{PhotoEntry, PhotoService, SizeVariant};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

fn api_error(msg: &str) -> FlickrError {
    FlickrError::ApiResponse(ApiErrorCode::Other(3), msg.to_string())
}

/// Canned reply for a download url
#[allow(dead_code)]
pub(crate) struct FakeDownload {
    pub(crate) status: u16,
    pub(crate) content_type: Option<String>,
    pub(crate) body: Vec<u8>,
}

/// In-memory stand-in for the remote service that records every call it receives
#[derive(Default)]
pub(crate) struct FakeService {
    pub(crate) titles: HashMap<String, String>,
    pub(crate) photos: HashMap<String, Vec<PhotoEntry>>,
    pub(crate) sizes: HashMap<String, Vec<SizeVariant>>,
    pub(crate) downloads: HashMap<String, FakeDownload>,
    /// Outcome per attempt keyed by file name, `None` is a failed attempt.
    /// Files without a script upload fine as `id-<file name>`.
    pub(crate) upload_script: RefCell<HashMap<String, VecDeque<Option<String>>>>,
    pub(crate) fail_create: bool,
    pub(crate) failing_attach: HashSet<String>,
    pub(crate) calls: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl FakeService {
    pub(crate) fn with_photoset(mut self, id: &str, title: &str, photos: Vec<PhotoEntry>) -> Self {
        self.titles.insert(id.to_string(), title.to_string());
        self.photos.insert(id.to_string(), photos);
        self
    }

    pub(crate) fn with_download(mut self, url: &str, content_type: Option<&str>, body: &[u8]) -> Self {
        self.downloads.insert(
            url.to_string(),
            FakeDownload {
                status: 200,
                content_type: content_type.map(str::to_string),
                body: body.to_vec(),
            },
        );
        self
    }

    pub(crate) fn with_upload_script(self, file_name: &str, attempts: &[Option<&str>]) -> Self {
        self.upload_script.borrow_mut().insert(
            file_name.to_string(),
            attempts.iter().map(|v| v.map(str::to_string)).collect(),
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|v| v.starts_with(prefix))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl PhotoService for FakeService {
    async fn photoset_title(&self, photoset_id: &str) -> Result<String, FlickrError> {
        self.record(format!("title:{}", photoset_id));
        self.titles
            .get(photoset_id)
            .cloned()
            .ok_or_else(|| FlickrError::ApiResponse(ApiErrorCode::NotFound, "Photoset not found".into()))
    }

    async fn photoset_photos(&self, photoset_id: &str) -> Result<Vec<PhotoEntry>, FlickrError> {
        self.record(format!("photos:{}", photoset_id));
        self.photos
            .get(photoset_id)
            .cloned()
            .ok_or_else(|| FlickrError::ApiResponse(ApiErrorCode::NotFound, "Photoset not found".into()))
    }

    async fn photo_sizes(&self, photo_id: &str) -> Result<Vec<SizeVariant>, FlickrError> {
        self.record(format!("sizes:{}", photo_id));
        Ok(self.sizes.get(photo_id).cloned().unwrap_or_default())
    }

    async fn download(&self, url: &str) -> Result<Download, FlickrError> {
        self.record(format!("download:{}", url));
        match self.downloads.get(url) {
            Some(v) if (200..300).contains(&v.status) => Ok(Download {
                content_type: v.content_type.clone(),
                body: Bytes::from(v.body.clone()),
            }),
            Some(v) => Err(FlickrError::HttpStatus(v.status, url.to_string())),
            None => Err(FlickrError::HttpStatus(404, url.to_string())),
        }
    }

    async fn upload(&self, path: &Path, props: &UploadProps) -> Result<String, FlickrError> {
        let name = path
            .file_name()
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.record(format!(
            "upload:{}:{}:{}",
            name,
            props.tags.as_deref().unwrap_or_default(),
            props.description.as_deref().unwrap_or_default()
        ));
        let mut script = self.upload_script.borrow_mut();
        match script.get_mut(&name) {
            Some(attempts) => match attempts.pop_front() {
                Some(Some(id)) => Ok(id),
                _ => Err(api_error("General upload failure")),
            },
            None => Ok(format!("id-{}", name)),
        }
    }

    async fn create_photoset(&self, props: &CreatePhotosetProps) -> Result<String, FlickrError> {
        self.record(format!(
            "create:{}:{}:{}",
            props.title,
            props.primary_photo_id,
            props.description.as_deref().unwrap_or_default()
        ));
        if self.fail_create {
            return Err(api_error("Primary photo not found"));
        }
        Ok("set-1".to_string())
    }

    async fn add_photo(&self, photoset_id: &str, photo_id: &str) -> Result<(), FlickrError> {
        self.record(format!("add:{}:{}", photoset_id, photo_id));
        if self.failing_attach.contains(photo_id) {
            return Err(api_error("Photo not found"));
        }
        Ok(())
    }
}

#[allow(dead_code)]
pub(crate) fn photo(id: &str, title: &str, url: &str) -> PhotoEntry {
    PhotoEntry {
        id: id.to_string(),
        title: title.to_string(),
        media: MediaKind::Photo,
        original_url: Some(url.to_string()),
    }
}

#[allow(dead_code)]
pub(crate) fn video(id: &str, title: &str) -> PhotoEntry {
    PhotoEntry {
        id: id.to_string(),
        title: title.to_string(),
        media: MediaKind::Video,
        original_url: None,
    }
}

/// Captures messenger output for assertions
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
impl SharedBuf {
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

#[allow(dead_code)]
pub(crate) fn capturing_messenger() -> (Messenger, SharedBuf) {
    let buf = SharedBuf::default();
    let messenger = Messenger::with_stream(Box::new(buf.clone()));
    (messenger, buf)
}
