use indexmap::IndexMap;

/// HTTP method of a partial-update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One outgoing partial-update request, observed between assembly and
/// transmission.
///
/// Interceptors receive the request mutably and may rewrite headers; the
/// dispatching client consumes it afterwards, so every mutation lands on the
/// wire.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub method: RequestMethod,
    pub url: String,
    /// Insertion-ordered so header writes stay observable in chain order.
    pub headers: IndexMap<String, String>,
    pub form_body: Option<Vec<(String, String)>>,
}

impl PendingRequest {
    #[must_use]
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: IndexMap::new(),
            form_body: None,
        }
    }

    /// Sets a header, replacing any earlier value under the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Middleware seam run over every request the client dispatches.
///
/// Interceptors are registered on the client explicitly and run in
/// registration order inside the dispatch call. They cannot fail and must
/// not block; when two of them write the same header, the later write wins.
pub trait RequestInterceptor {
    fn apply(&self, request: &mut PendingRequest);
}
