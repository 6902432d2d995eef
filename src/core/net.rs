// src/core/net.rs
// One blocking HTTPS GET per run. No retries: a failed fetch ends the run.

use std::{fs, path::PathBuf};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};

use crate::config::{consts, options::FetchOptions};
use crate::error::{Result, ScrapeError};

/// Where the chart page comes from. The runner and the HTTP service only see this.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self) -> Result<String>;

    /// Short human label for logs ("https://…", "file page.html").
    fn describe(&self) -> String;
}

/// Live page over HTTP(S).
#[derive(Clone, Debug)]
pub struct HttpSource {
    opts: FetchOptions,
}

impl HttpSource {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl PageSource for HttpSource {
    fn fetch_page(&self) -> Result<String> {
        http_get(&self.opts)
    }

    fn describe(&self) -> String {
        self.opts.url.clone()
    }
}

/// A page saved to disk earlier (offline runs, fixtures).
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FileSource {
    fn fetch_page(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            ScrapeError::Network(format!("cannot read {}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// A page already in memory.
#[derive(Clone, Debug)]
pub struct StaticSource {
    html: String,
}

impl StaticSource {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl PageSource for StaticSource {
    fn fetch_page(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory page ({} bytes)", self.html.len())
    }
}

/// GET `opts.url` with a browser User-Agent and explicit timeouts.
/// Any non-2xx status is returned as `ScrapeError::Network`.
pub fn http_get(opts: &FetchOptions) -> Result<String> {
    // Built per call: the client owns a runtime that must not be dropped
    // on an async worker thread.
    let client = Client::builder()
        .user_agent(opts.user_agent.as_str())
        .connect_timeout(opts.connect_timeout)
        .timeout(opts.timeout)
        .build()?;

    logd!("Fetch: GET {}", opts.url);
    let resp = client
        .get(&opts.url)
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .header(ACCEPT_LANGUAGE, consts::ACCEPT_LANGUAGE)
        .send()?;

    let status = resp.status();
    if !status.is_success() {
        loge!("Fetch: HTTP {} from {}", status.as_u16(), opts.url);
        return Err(ScrapeError::Network(format!(
            "HTTP {} from {}",
            status.as_u16(),
            opts.url
        )));
    }

    let body = resp.text()?;
    logf!("Fetch: {} bytes from {}", body.len(), opts.url);
    Ok(body)
}
