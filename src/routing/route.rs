//! Route value types.

use std::fmt;

/// HTTP method a route is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    /// Matches every method.
    Any,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Any => "*",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bound endpoint: method, full pattern and handler chain.
///
/// `handlers` holds the inherited group handlers followed by the handlers
/// given at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<H> {
    pub method: Method,
    pub pattern: String,
    pub handlers: Vec<H>,
}

impl<H> Route<H> {
    pub fn new(method: Method, pattern: impl Into<String>, handlers: Vec<H>) -> Self {
        Self {
            method,
            pattern: pattern.into(),
            handlers,
        }
    }
}
