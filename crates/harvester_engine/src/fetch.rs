use std::io;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::types::{FailureKind, FetchError, FetchedPage};

/// Network knobs for one harvest run.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Budget for fetching one listing page.
    pub page_timeout: Duration,
    /// Budget for downloading one document; documents run larger than pages.
    pub file_timeout: Duration,
    pub redirect_limit: usize,
    /// Upper bound on a listing page body. Document downloads are unbounded.
    pub max_page_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(20),
            file_timeout: Duration::from_secs(60),
            redirect_limit: 5,
            max_page_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Receives a download body chunk by chunk as it arrives off the wire.
pub trait ChunkSink: Send {
    fn accept(&mut self, chunk: &[u8]) -> io::Result<()>;
}

/// Network boundary of the engine. Tests substitute an in-memory
/// implementation; production uses [`ReqwestFetcher`].
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// GET a listing page, returning its raw bytes and declared content type.
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError>;

    /// GET a document, streaming the body into `sink` as it arrives.
    /// Returns the number of bytes received.
    async fn fetch_file(
        &self,
        url: &str,
        sink: &mut dyn ChunkSink,
    ) -> Result<u64, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self, request_timeout: Duration) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(request_timeout)
            .redirect(reqwest::redirect::Policy::limited(
                self.settings.redirect_limit,
            ))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn get_checked(
        &self,
        url: &str,
        request_timeout: Duration,
    ) -> Result<reqwest::Response, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client(request_timeout)?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.get_checked(url, self.settings.page_timeout).await?;

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_page_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_page_bytes,
                        actual: Some(content_len),
                    },
                    "page too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_page_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_page_bytes,
                        actual: Some(next_len),
                    },
                    "page too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchedPage {
            bytes,
            content_type,
        })
    }

    async fn fetch_file(
        &self,
        url: &str,
        sink: &mut dyn ChunkSink,
    ) -> Result<u64, FetchError> {
        let response = self.get_checked(url, self.settings.file_timeout).await?;

        let mut received: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            sink.accept(&chunk)
                .map_err(|err| FetchError::new(FailureKind::Sink, err.to_string()))?;
            received += chunk.len() as u64;
        }
        Ok(received)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
