//! Route templates and their compilation into request targets
//!
//! A [`Route`] describes one remote endpoint: HTTP method, path pattern with
//! `{placeholder}` segments, and the query keys the endpoint understands.
//! Compiling a route substitutes concrete values and yields a
//! [`CompiledRoute`], which is handed to exactly one request.

mod templates;

pub use templates::*;

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Method;
use thiserror::Error;

/// Bytes escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Root a compiled route is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteBase {
    /// Versioned REST API (overridable by the executor)
    Api,
    /// Public invite links
    InviteUrl,
}

impl RouteBase {
    /// Default absolute URL for this base, without trailing slash
    pub const fn default_url(self) -> &'static str {
        match self {
            RouteBase::Api => "https://discord.com/api/v10",
            RouteBase::InviteUrl => "https://discord.gg",
        }
    }
}

/// Failure to compile a route with the supplied values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route '{route}' expects {expected} path parameter(s), got {got}")]
    ParamCount {
        route: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("route '{route}' path parameter #{index} is empty")]
    EmptyParam { route: &'static str, index: usize },

    #[error("route '{route}' path parameter #{index} is a dot segment")]
    UnsafeParam { route: &'static str, index: usize },

    #[error("route '{route}' does not accept query key '{key}'")]
    UnknownQueryKey { route: &'static str, key: String },
}

/// Query parameters to set on a compiled route
///
/// Keys are kept sorted so identical inputs compile to identical routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues(BTreeMap<String, String>);

impl QueryValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to the display form of `value`, replacing any previous value
    pub fn insert(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    /// Builder-style variant of [`QueryValues::insert`]
    pub fn with(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Named template for one remote endpoint
#[derive(Debug)]
pub struct Route {
    method: Method,
    base: RouteBase,
    path: &'static str,
    query_keys: &'static [&'static str],
    auth: bool,
}

impl Route {
    /// API route sent with the bot authorization header
    pub const fn api(
        method: Method,
        path: &'static str,
        query_keys: &'static [&'static str],
    ) -> Self {
        Self {
            method,
            base: RouteBase::Api,
            path,
            query_keys,
            auth: true,
        }
    }

    /// API route authorized by a token embedded in the path instead of the bot token
    pub const fn api_without_auth(
        method: Method,
        path: &'static str,
        query_keys: &'static [&'static str],
    ) -> Self {
        Self {
            method,
            base: RouteBase::Api,
            path,
            query_keys,
            auth: false,
        }
    }

    /// Plain link route outside the API (never executed, only rendered)
    pub const fn link(base: RouteBase, path: &'static str) -> Self {
        Self {
            method: Method::GET,
            base,
            path,
            query_keys: &[],
            auth: false,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn query_keys(&self) -> &'static [&'static str] {
        self.query_keys
    }

    /// Number of `{placeholder}` segments in the path pattern
    pub fn slot_count(&self) -> usize {
        self.path.split('/').filter(|s| is_slot(s)).count()
    }

    /// Substitute path and query values
    ///
    /// # Arguments
    ///
    /// * `query` - Query values; every key must be whitelisted by the template
    /// * `params` - Path values in slot order; count must equal [`Route::slot_count`]
    ///
    /// # Errors
    ///
    /// [`RouteError`] on slot count mismatch, an empty or dot-segment path
    /// value, or a non-whitelisted query key. Nothing is truncated or padded.
    pub fn compile(
        &self,
        query: QueryValues,
        params: &[&dyn fmt::Display],
    ) -> Result<CompiledRoute, RouteError> {
        let expected = self.slot_count();
        if params.len() != expected {
            return Err(RouteError::ParamCount {
                route: self.path,
                expected,
                got: params.len(),
            });
        }

        let mut path = String::with_capacity(self.path.len() + params.len() * 20);
        let mut next = 0;
        for segment in self.path.split('/').skip(1) {
            path.push('/');
            if !is_slot(segment) {
                path.push_str(segment);
                continue;
            }
            let value = params[next].to_string();
            if value.is_empty() {
                return Err(RouteError::EmptyParam {
                    route: self.path,
                    index: next,
                });
            }
            // URL parsing would resolve these against the parent path
            if value == "." || value == ".." {
                return Err(RouteError::UnsafeParam {
                    route: self.path,
                    index: next,
                });
            }
            path.extend(utf8_percent_encode(&value, PATH_SEGMENT));
            next += 1;
        }

        if let Some(key) = query
            .0
            .keys()
            .find(|key| !self.query_keys.iter().any(|k| *k == key.as_str()))
        {
            return Err(RouteError::UnknownQueryKey {
                route: self.path,
                key: key.clone(),
            });
        }

        Ok(CompiledRoute {
            template: self.path,
            method: self.method.clone(),
            base: self.base,
            path,
            query: query.0.into_iter().collect(),
            auth: self.auth,
        })
    }
}

fn is_slot(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// A route with every value substituted
///
/// Not `Clone`; each one is consumed by a single request.
#[derive(Debug, PartialEq, Eq)]
pub struct CompiledRoute {
    template: &'static str,
    method: Method,
    base: RouteBase,
    path: String,
    query: Vec<(String, String)>,
    auth: bool,
}

impl CompiledRoute {
    /// Path pattern of the template this route was compiled from
    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn base(&self) -> RouteBase {
        self.base
    }

    /// Encoded path without query
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the bot authorization header should be attached
    pub fn requires_auth(&self) -> bool {
        self.auth
    }

    /// Path plus encoded query string, relative to the base
    pub fn route(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }

    /// Absolute URL against the template's default base
    pub fn url(&self) -> String {
        format!("{}{}", self.base.default_url(), self.route())
    }
}
