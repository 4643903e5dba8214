//! Redirect rule-set and match results

use actix_http::{Method, StatusCode, Uri};
use actix_web::{HttpRequest, HttpResponse};

use crate::Middleware;

use super::error::Error;
use super::pattern::PatternRule;
use super::respond;
use super::table::RedirectTable;
use super::util;

const DEFAULT_NAME: &str = "redirect";

/// Per-request inputs required to match a redirect rule.
#[derive(Clone, Copy, Debug)]
pub struct RequestView<'a> {
    pub method: &'a Method,
    /// Host header value, including the port when given.
    pub host: &'a str,
    pub tls: bool,
    /// Raw request target. Either `path[?query]` or a scheme-qualified url.
    pub target: &'a str,
}

/// Diagnostic details attached to table redirects in debug mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub source: String,
    pub destination: String,
    pub status: Option<StatusCode>,
    pub old_url: String,
}

/// Redirect response to send instead of forwarding the request.
#[derive(Clone, Debug)]
pub struct Redirect {
    /// Location exactly as configured or rewritten.
    pub location: String,
    /// Explicitly configured status. `None` lets the request method decide.
    pub status: Option<StatusCode>,
    pub trace: Option<Trace>,
}

impl Redirect {
    #[inline]
    pub fn new<S: Into<String>>(location: S, status: Option<StatusCode>) -> Self {
        Self {
            location: location.into(),
            status,
            trace: None,
        }
    }

    #[inline]
    pub fn trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }
}

/// Outcome of matching a request against the configured rules.
#[derive(Clone, Debug)]
pub enum Rewrite {
    /// Forward the request unchanged.
    Pass,
    /// Replace the request uri and forward.
    Uri(Uri),
    /// Respond with a redirect.
    Redirect(Redirect),
}

/// Common capability of every redirect rule kind.
pub trait Matcher {
    fn evaluate(&self, view: &RequestView<'_>) -> Rewrite;
}

/// Immutable set of redirect rules, built once on startup.
#[derive(Clone, Debug)]
pub enum RuleSet {
    Pattern(PatternRule),
    Table(RedirectTable),
}

impl Matcher for RuleSet {
    #[inline]
    fn evaluate(&self, view: &RequestView<'_>) -> Rewrite {
        match self {
            Self::Pattern(rule) => rule.evaluate(view),
            Self::Table(table) => table.evaluate(view),
        }
    }
}

impl From<PatternRule> for RuleSet {
    #[inline]
    fn from(value: PatternRule) -> Self {
        Self::Pattern(value)
    }
}

impl From<RedirectTable> for RuleSet {
    #[inline]
    fn from(value: RedirectTable) -> Self {
        Self::Table(value)
    }
}

/// Actix-Web compatible redirect engine.
///
/// # Examples
///
/// ```
/// use actix_web::App;
/// use actix_redirect::Engine;
///
/// let engine = Engine::pattern(r"^http://localhost/old/(.*)", "http://localhost/new/$1", 301)
///     .expect("invalid redirect pattern");
///
/// let app = App::new().wrap(engine.middleware());
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    name: String,
    rules: RuleSet,
}

impl Engine {
    /// Creates a new [`Engine`] from an existing [`RuleSet`].
    pub fn new<R: Into<RuleSet>>(rules: R) -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            rules: rules.into(),
        }
    }

    /// Creates an [`Engine`] redirecting urls matching `pattern` to the
    /// expanded `replacement`.
    ///
    /// A `status` of `0` resolves to `302`, or `307` for non-GET requests.
    #[inline]
    pub fn pattern(pattern: &str, replacement: &str, status: u16) -> Result<Self, Error> {
        Ok(Self::new(PatternRule::new(pattern, replacement, status)?))
    }

    /// Creates an [`Engine`] from `source:destination[:status]` entries.
    ///
    /// Entries without a destination are skipped.
    #[inline]
    pub fn table<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(RedirectTable::new(entries))
    }

    /// Name reported in the `X-Middleware-Name` debug header.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Enables debug response headers on table redirects.
    pub fn debug(mut self, debug: bool) -> Self {
        self.rules = match self.rules {
            RuleSet::Table(table) => RuleSet::Table(table.debug(debug)),
            rules => rules,
        };
        self
    }

    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluates the given [`HttpRequest`](actix_web::HttpRequest) against
    /// the engine rules.
    pub fn rewrite(&self, req: &HttpRequest) -> Rewrite {
        let target = req.uri().to_string();
        self.rules.evaluate(&util::request_view(req, &target))
    }

    /// Builds the redirect response for the given request method.
    ///
    /// Falls back to `500 Internal Server Error` when the response
    /// headers cannot be encoded.
    pub fn respond(&self, method: &Method, redirect: &Redirect) -> HttpResponse {
        respond::redirect_response(&self.name, method, redirect).unwrap_or_else(|err| {
            tracing::error!("failed to build redirect response: {err}");
            HttpResponse::from_error(err)
        })
    }

    /// Converts Engine Instance into Actix-Web Middleware
    #[inline]
    pub fn middleware(self) -> Middleware {
        self.into()
    }
}
