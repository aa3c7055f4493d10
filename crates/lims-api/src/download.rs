//! The file-export side channel.
//!
//! Exports are requested as ordinary URLs with format parameters and a
//! client-generated `downloadID`. The server streams the file and, when
//! the response begins, sets a cookie matching the id; the client detects
//! completion by polling that cookie at a fixed interval, up to a bounded
//! number of attempts.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, Result};

/// Cookie set by the server when a download begins.
pub const DOWNLOAD_COOKIE: &str = "downloadID";

/// Parameters of one export request.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Export format, e.g. `csv` or `xls`.
    pub format: String,
    /// Substitute vocabulary titles for raw keys.
    pub use_vocabularies: bool,
    /// Substitute field titles for keys in the header row.
    pub use_titles: bool,
    /// Emit list values unjoined.
    pub raw_lists: bool,
    /// Client-generated id matched by the completion cookie.
    pub download_id: u64,
}

impl DownloadRequest {
    pub fn new(format: &str, download_id: u64) -> Self {
        Self {
            format: format.to_string(),
            use_vocabularies: true,
            use_titles: true,
            raw_lists: false,
            download_id,
        }
    }

    /// Append the export parameters to a resource URL.
    pub fn apply_to(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("format", &self.format)
            .append_pair("use_vocabularies", bool_param(self.use_vocabularies))
            .append_pair("use_titles", bool_param(self.use_titles))
            .append_pair("raw_lists", bool_param(self.raw_lists))
            .append_pair(DOWNLOAD_COOKIE, &self.download_id.to_string());
        url
    }
}

fn bool_param(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Read access to the client-visible cookie jar.
pub trait CookiePort {
    fn get(&self, name: &str) -> Option<String>;
}

/// Poll the download cookie until it matches `download_id`.
///
/// Returns the number of polls used. After `max_attempts` misses the
/// download is reported timed out; the server may still complete it, but
/// the client stops watching.
pub fn wait_for_download(
    cookies: &dyn CookiePort,
    download_id: u64,
    interval: Duration,
    max_attempts: u32,
) -> Result<u32> {
    let expected = download_id.to_string();
    for attempt in 1..=max_attempts {
        if cookies.get(DOWNLOAD_COOKIE).as_deref() == Some(expected.as_str()) {
            debug!(download_id, attempt, "download complete");
            return Ok(attempt);
        }
        if attempt < max_attempts {
            thread::sleep(interval);
        }
    }
    warn!(download_id, max_attempts, "download polling gave up");
    Err(ApiError::DownloadTimeout {
        download_id,
        attempts: max_attempts,
    })
}
