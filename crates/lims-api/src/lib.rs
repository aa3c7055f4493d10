//! The REST API contract consumed by the client.
//!
//! Resources live at `<api_root>/<resource_key>[/<id>]`. List requests
//! accept the recognized query parameters (`rpp`, `page`, `order`,
//! `search`, `includes`, `children`, `log`); mutations may carry an audit
//! comment header; exports run through a cookie-polled side channel.

pub mod client;
pub mod download;
pub mod error;
pub mod params;

pub use client::{APILOG_COMMENT_HEADER, ApiConfig, HttpClient, RestClient, unwrap_single};
pub use download::{CookiePort, DOWNLOAD_COOKIE, DownloadRequest, wait_for_download};
pub use error::{ApiError, Result};
pub use params::{DEFAULT_SEARCH_SEPARATOR, ListParams};
