use serde::de::DeserializeOwned;
use tracing::debug;

use crate::chart::ChartConfig;
use crate::error::{DashboardError, DashboardResult};

use super::{PendingRequest, RequestInterceptor, RequestMethod};

/// Server-rendered fragment returned by a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub status: u16,
    pub body: String,
}

impl Fragment {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking client for partial page updates.
///
/// Wraps `reqwest::blocking` and runs every registered interceptor over the
/// assembled request before transmission, in registration order. The client
/// itself holds no page state; anything request-scoped lives in the
/// interceptors.
pub struct UpdateClient {
    http: reqwest::blocking::Client,
    base_url: String,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
}

impl std::fmt::Debug for UpdateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateClient")
            .field("base_url", &self.base_url)
            .field("interceptor_count", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

impl UpdateClient {
    /// Creates a client rooted at `base_url` with an empty interceptor chain.
    pub fn new(base_url: impl Into<String>) -> DashboardResult<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        let mut base_url: String = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        if base_url.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "base url must not be empty".to_owned(),
            ));
        }
        Ok(Self {
            http,
            base_url,
            interceptors: Vec::new(),
        })
    }

    /// Appends an interceptor to the chain, builder-style.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.register_interceptor(interceptor);
        self
    }

    /// Appends an interceptor to the chain.
    pub fn register_interceptor(&mut self, interceptor: impl RequestInterceptor + 'static) {
        self.interceptors.push(Box::new(interceptor));
    }

    #[must_use]
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// GETs a server-rendered fragment.
    ///
    /// The fragment is returned for every response status; hosts decide how
    /// to swap non-success bodies.
    pub fn get_fragment(&self, path: &str) -> DashboardResult<Fragment> {
        self.dispatch(self.assemble(RequestMethod::Get, path, None))
    }

    /// POSTs a urlencoded form, the shape state-changing updates use.
    pub fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> DashboardResult<Fragment> {
        let form = fields
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        self.dispatch(self.assemble(RequestMethod::Post, path, Some(form)))
    }

    /// GETs and decodes a JSON payload, rejecting non-success responses.
    pub fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> DashboardResult<T> {
        let request = self.assemble(RequestMethod::Get, path, None);
        let url = request.url.clone();
        let fragment = self.dispatch(request)?;
        if !fragment.is_success() {
            return Err(DashboardError::UnexpectedStatus {
                status: fragment.status,
                url,
            });
        }
        serde_json::from_str(&fragment.body)
            .map_err(|e| DashboardError::Payload(format!("failed to decode json body: {e}")))
    }

    /// GETs a chart configuration payload ready to hand to a chart view.
    pub fn fetch_chart_config(&self, path: &str) -> DashboardResult<ChartConfig> {
        self.fetch_json(path)
    }

    fn assemble(
        &self,
        method: RequestMethod,
        path: &str,
        form_body: Option<Vec<(String, String)>>,
    ) -> PendingRequest {
        let mut request = PendingRequest::new(method, self.absolute_url(path));
        request.form_body = form_body;
        request
    }

    /// Runs the interceptor chain over the request, then transmits it.
    fn dispatch(&self, mut request: PendingRequest) -> DashboardResult<Fragment> {
        for interceptor in &self.interceptors {
            interceptor.apply(&mut request);
        }
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            header_count = request.headers.len(),
            "dispatching partial update"
        );

        let mut builder = match request.method {
            RequestMethod::Get => self.http.get(&request.url),
            RequestMethod::Post => self.http.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(form) = &request.form_body {
            builder = builder.form(form);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, body_len = body.len(), "partial update response");
        Ok(Fragment { status, body })
    }

    fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
