use reqwest::{
    blocking::{Client, Response},
    header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE},
    Proxy,
};
use tracing::{debug, trace, warn};
use url::form_urlencoded;

use super::Fetch;
use crate::{
    error::{Error, Result},
    types::{CaptionTrack, VideoId},
};

pub const WATCH_URL: &str = "https://www.youtube.com/watch";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US";

/// Build the watch page URL of a video
pub fn watch_url(video_id: &VideoId) -> String {
    watch_url_at(WATCH_URL, video_id)
}

fn watch_url_at(base: &str, video_id: &VideoId) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("v", video_id)
        .finish();
    format!("{base}?{query}")
}

/// Transport settings, applied once when the fetcher is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpOptions {
    /// Proxy for every request. An invalid value is ignored.
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
}

/// [`Fetch`] implementation over HTTP(S).
///
/// The inner client is cheap to share and safe to use from several threads.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    watch_base: String,
}

impl HttpFetcher {
    pub fn new(options: &HttpOptions) -> Result<Self> {
        let accept_language = options
            .accept_language
            .as_deref()
            .unwrap_or(DEFAULT_ACCEPT_LANGUAGE);

        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(accept_language) {
            Ok(value) => {
                headers.insert(ACCEPT_LANGUAGE, value);
            }
            Err(_) => warn!("Ignoring invalid Accept-Language value '{accept_language}'"),
        }

        let mut builder = Client::builder()
            .user_agent(options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .default_headers(headers);

        if let Some(proxy) = options.proxy.as_deref() {
            match Proxy::all(proxy) {
                Ok(proxy) => {
                    debug!("Using proxy {proxy:?}");
                    builder = builder.proxy(proxy);
                }
                Err(err) => warn!("Ignoring invalid proxy URL '{proxy}': {err}"),
            }
        }

        let client = builder.build().map_err(Error::HttpClient)?;
        Ok(Self {
            client,
            watch_base: WATCH_URL.to_owned(),
        })
    }

    /// Point the watch page requests to another host
    #[cfg(test)]
    fn with_watch_base(mut self, base: impl Into<String>) -> Self {
        self.watch_base = base.into();
        self
    }

    fn get(&self, url: &str) -> reqwest::Result<Response> {
        trace!("GET {url}");
        self.client.get(url).send()?.error_for_status()
    }
}

impl Fetch for HttpFetcher {
    fn watch_page(&self, video_id: &VideoId) -> Result<String> {
        let url = watch_url_at(&self.watch_base, video_id);
        debug!("Fetching watch page {url}");

        // DNS failures, refused connections, 404 and 429 all look the same to callers
        let page = self
            .get(&url)
            .and_then(Response::text)
            .map_err(|err| {
                debug!("Watch page request failed: {err}");
                Error::VideoUnavailable {
                    video_id: video_id.to_string(),
                }
            })?;

        trace!("watch page is {} bytes long", page.len());
        Ok(page)
    }

    fn timed_text(&self, track: &CaptionTrack) -> Result<String> {
        debug!("Fetching '{}' timed-text document", track.language_code);

        self.get(&track.base_url)
            .and_then(Response::text)
            .map_err(|err| Error::TimedTextUnavailable {
                url: track.base_url.clone(),
                source: Some(err),
            })
    }
}
