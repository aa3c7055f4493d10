//! The REST client seam.
//!
//! Callers program against [`RestClient`]; [`HttpClient`] is the blocking
//! HTTP implementation. Mutations carry an optional free-text audit
//! comment, sent in the `X-APILOG-COMMENT` header and recorded by the
//! server's change log.

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, Result};
use crate::params::{DEFAULT_SEARCH_SEPARATOR, ListParams};

/// Header carrying the audit comment on create/update requests.
pub const APILOG_COMMENT_HEADER: &str = "X-APILOG-COMMENT";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root of the REST API, e.g. `https://lims.example.org/db/api/v1`.
    pub api_root: Url,
    /// Delimiter between search clauses in the `search` parameter.
    pub search_separator: String,
}

impl ApiConfig {
    pub fn new(api_root: &str) -> Result<Self> {
        Ok(Self {
            api_root: Url::parse(api_root)?,
            search_separator: DEFAULT_SEARCH_SEPARATOR.to_string(),
        })
    }

    /// URL of a resource listing or, with `id`, one record.
    pub fn resource_url(&self, resource: &str, id: Option<&str>) -> Result<Url> {
        let mut url = self.api_root.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            segments.pop_if_empty().push(resource);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

/// Unwrap a single-result list response.
///
/// List and detail endpoints may wrap one record in an `objects` array of
/// length 1; callers always want the record itself.
pub fn unwrap_single(value: Value) -> Value {
    if let Some(objects) = value.get("objects").and_then(|o| o.as_array())
        && objects.len() == 1
    {
        return objects[0].clone();
    }
    value
}

/// Retrieval and mutation against the REST resources.
pub trait RestClient {
    fn get_list(&self, resource: &str, params: &ListParams) -> Result<Value>;
    fn get_detail(&self, resource: &str, id: &str) -> Result<Value>;
    fn post(&self, resource: &str, body: &Value, comment: Option<&str>) -> Result<Value>;
    fn patch(&self, resource: &str, id: &str, body: &Value, comment: Option<&str>)
    -> Result<Value>;
}

/// Blocking HTTP implementation of [`RestClient`].
pub struct HttpClient {
    config: ApiConfig,
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            inner: reqwest::blocking::Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn execute(&self, request: reqwest::blocking::RequestBuilder) -> Result<Value> {
        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ApiError::Network {
                status: Some(status.as_u16()),
                text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn with_comment(
        request: reqwest::blocking::RequestBuilder,
        comment: Option<&str>,
    ) -> reqwest::blocking::RequestBuilder {
        match comment {
            Some(comment) => request.header(APILOG_COMMENT_HEADER, comment),
            None => request,
        }
    }
}

impl RestClient for HttpClient {
    fn get_list(&self, resource: &str, params: &ListParams) -> Result<Value> {
        let mut url = self.config.resource_url(resource, None)?;
        for (name, value) in params.to_query_pairs(&self.config.search_separator) {
            url.query_pairs_mut().append_pair(&name, &value);
        }
        debug!(%url, "GET list");
        self.execute(self.inner.get(url))
    }

    fn get_detail(&self, resource: &str, id: &str) -> Result<Value> {
        let url = self.config.resource_url(resource, Some(id))?;
        debug!(%url, "GET detail");
        Ok(unwrap_single(self.execute(self.inner.get(url))?))
    }

    fn post(&self, resource: &str, body: &Value, comment: Option<&str>) -> Result<Value> {
        let url = self.config.resource_url(resource, None)?;
        debug!(%url, "POST");
        let request = Self::with_comment(self.inner.post(url).json(body), comment);
        self.execute(request)
    }

    fn patch(
        &self,
        resource: &str,
        id: &str,
        body: &Value,
        comment: Option<&str>,
    ) -> Result<Value> {
        let url = self.config.resource_url(resource, Some(id))?;
        debug!(%url, "PATCH");
        let request = Self::with_comment(self.inner.patch(url).json(body), comment);
        self.execute(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_urls_append_segments() {
        let config = ApiConfig::new("https://lims.example.org/db/api/v1").expect("config");
        let list = config.resource_url("screen", None).expect("list url");
        assert_eq!(list.as_str(), "https://lims.example.org/db/api/v1/screen");
        let detail = config.resource_url("screen", Some("1014")).expect("detail url");
        assert_eq!(detail.as_str(), "https://lims.example.org/db/api/v1/screen/1014");
    }

    #[test]
    fn single_object_responses_unwrap() {
        let wrapped = json!({"objects": [{"facility_id": "1014"}]});
        assert_eq!(unwrap_single(wrapped), json!({"facility_id": "1014"}));

        let multi = json!({"objects": [{"a": 1}, {"a": 2}]});
        assert_eq!(unwrap_single(multi.clone()), multi);

        let plain = json!({"facility_id": "1014"});
        assert_eq!(unwrap_single(plain.clone()), plain);
    }
}
