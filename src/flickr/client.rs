/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::flickr::errors::FlickrError;
use crate::flickr::{ApiClient, ApiParams, Creds, Download};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Cheaply cloneable handle to the Flickr API.
///
/// Example
/// ```no_run
/// # async fn run() -> Result<(), photoset_tools::flickr::FlickrError> {
/// use photoset_tools::flickr::{Client, Creds, Photoset};
///
/// let client = Client::new(Creds::from_tokens("key", "secret", "token"))?;
/// let photoset = Photoset::from_id(client, "72157600000000000").await?;
/// println!("{:?}", photoset.title);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) api_client: Arc<ApiClient>,
}

impl Client {
    pub fn new(creds: Creds) -> Result<Self, FlickrError> {
        Ok(Self::from_api_client(ApiClient::new(creds)?))
    }

    pub fn from_api_client(api_client: ApiClient) -> Self {
        Self {
            api_client: Arc::new(api_client),
        }
    }

    /// Calls a read method and returns the decoded payload
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &ApiParams<'_>,
    ) -> Result<T, FlickrError> {
        self.api_client.call(method, params).await
    }

    /// Calls a method that modifies data on the account
    pub async fn call_write<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &ApiParams<'_>,
    ) -> Result<T, FlickrError> {
        self.api_client.call_write(method, params).await
    }

    /// Downloads an asset url
    pub async fn download(&self, url: &str) -> Result<Download, FlickrError> {
        self.api_client.download(url).await
    }
}
