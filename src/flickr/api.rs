/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::flickr::errors::FlickrError;
use crate::flickr::upload::parse_upload_response;
use bytes::Bytes;
use num_enum::FromPrimitive;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

// Root Flickr API
pub const API_ORIGIN: &str = "https://api.flickr.com";

// Root Flickr upload API
pub const UPLOAD_ORIGIN: &str = "https://up.flickr.com";

const REST_PATH: &str = "/services/rest/";
const UPLOAD_PATH: &str = "/services/upload/";

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

/// Directly communicates with the API.
#[derive(Clone)]
pub struct ApiClient {
    creds: Creds,
    https_client: reqwest::Client,
    rest_url: Url,
    upload_url: Url,
}

impl ApiClient {
    /// Creates a new Flickr client instance from provided credentials
    pub fn new(creds: Creds) -> Result<Self, FlickrError> {
        Self::with_origins(creds, API_ORIGIN, UPLOAD_ORIGIN)
    }

    /// Creates a client that talks to the given origins instead of the public service
    pub fn with_origins(
        creds: Creds,
        api_origin: &str,
        upload_origin: &str,
    ) -> Result<Self, FlickrError> {
        Ok(Self {
            creds,
            https_client: reqwest::Client::new(),
            rest_url: Url::parse(api_origin)?.join(REST_PATH)?,
            upload_url: Url::parse(upload_origin)?.join(UPLOAD_PATH)?,
        })
    }

    /// Performs a read request against the REST API
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &ApiParams<'_>,
    ) -> Result<T, FlickrError> {
        self.request(Method::GET, method, params).await
    }

    /// Performs a write request against the REST API
    pub async fn call_write<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &ApiParams<'_>,
    ) -> Result<T, FlickrError> {
        self.request(Method::POST, method, params).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        http_method: Method,
        method: &str,
        params: &ApiParams<'_>,
    ) -> Result<T, FlickrError> {
        let mut all_params: Vec<(&str, &str)> = vec![
            ("method", method),
            ("api_key", self.creds.api_key.as_str()),
            ("auth_token", self.creds.auth_token.as_str()),
            ("format", "json"),
            ("nojsoncallback", "1"),
        ];
        all_params.extend_from_slice(params);
        let api_sig = self.creds.sign(&all_params);

        let mut req_url = self.rest_url.clone();
        req_url
            .query_pairs_mut()
            .extend_pairs(&all_params)
            .append_pair("api_sig", &api_sig);

        log::debug!("{} {}", http_method, method);
        let resp = self
            .https_client
            .request(http_method, req_url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let body = resp.bytes().await?;
        log::trace!("{} response: {}", method, String::from_utf8_lossy(&body));

        let status: ResponseStatus = serde_json::from_slice(&body)?;
        if status.stat != "ok" {
            return Err(FlickrError::ApiResponse(
                ApiErrorCode::from(status.code),
                status.message,
            ));
        }
        serde_json::from_slice::<T>(&body).map_err(FlickrError::ApiResponseMalformed)
    }

    /// Uploads file data synchronously and returns the id of the new photo
    pub async fn upload(
        &self,
        file_name: &str,
        data: Vec<u8>,
        mime: &str,
        params: &ApiParams<'_>,
    ) -> Result<String, FlickrError> {
        // The photo part itself is never part of the signature
        let mut all_params: Vec<(&str, &str)> = vec![
            ("api_key", self.creds.api_key.as_str()),
            ("auth_token", self.creds.auth_token.as_str()),
            ("async", "0"),
        ];
        all_params.extend_from_slice(params);
        let api_sig = self.creds.sign(&all_params);

        let mut form = Form::new();
        for (k, v) in &all_params {
            form = form.text(k.to_string(), v.to_string());
        }
        let photo = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = form.text("api_sig", api_sig).part("photo", photo);

        log::debug!("POST upload {}", file_name);
        let resp = self
            .https_client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FlickrError::HttpStatus(
                status.as_u16(),
                self.upload_url.to_string(),
            ));
        }
        let body = resp.text().await?;
        log::trace!("upload response: {}", body);
        parse_upload_response(&body)
    }

    /// Retrieves the bytes behind a static asset url
    pub async fn download(&self, url: &str) -> Result<Download, FlickrError> {
        log::debug!("GET {}", url);
        let resp = self.https_client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FlickrError::HttpStatus(status.as_u16(), url.to_string()));
        }
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Download {
            content_type,
            body: resp.bytes().await?,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("rest_url", &self.rest_url.as_str())
            .field("upload_url", &self.upload_url.as_str())
            .finish()
    }
}

/// A fetched asset
#[derive(Debug, Clone)]
pub struct Download {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Error codes per the Flickr API docs.
///
/// Code 1 is method specific but always means the requested object was not found for the
/// methods used here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum ApiErrorCode {
    NotFound = 1,
    SslRequired = 95,
    InvalidSignature = 96,
    MissingSignature = 97,
    LoginFailed = 98,
    InsufficientPermissions = 99,
    InvalidApiKey = 100,
    ServiceUnavailable = 105,
    WriteFailed = 106,
    FormatNotFound = 111,
    MethodNotFound = 112,
    BadUrl = 116,
    #[num_enum(catch_all)]
    Other(u32),
}

/// Api key, shared secret and auth token
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Creds {
    api_key: String,
    api_secret: String,
    auth_token: String,
}

impl Creds {
    pub fn from_tokens(api_key: &str, api_secret: &str, auth_token: &str) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            auth_token: auth_token.into(),
        }
    }

    /// md5 of the secret followed by every key/value pair sorted by key
    pub(crate) fn sign(&self, params: &ApiParams<'_>) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let mut raw = self.api_secret.clone();
        for (k, v) in sorted {
            raw.push_str(k);
            raw.push_str(v);
        }
        format!("{:x}", md5::compute(raw.as_bytes()))
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("api_key", &"xxx")
            .field("api_secret", &"xxx")
            .field("auth_token", &"xxx")
            .finish()
    }
}

// Envelope fields present on every REST reply
#[derive(Deserialize, Debug)]
struct ResponseStatus {
    stat: String,

    #[serde(default)]
    code: u32,

    #[serde(default)]
    message: String,
}
