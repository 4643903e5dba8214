//! Single regex rewrite rule

use std::str::FromStr;

use actix_http::{StatusCode, Uri};
use regex_automata::meta::Regex;

use super::error::Error;
use super::redirect::{Matcher, Redirect, RequestView, Rewrite};
use super::url;

/// Regex pattern matched against the canonical request url, together
/// with the substitution template used to build the new url.
///
/// The template supports `$1`, `${1}` and `${name}` group references.
#[derive(Clone, Debug)]
pub struct PatternRule {
    pattern: Regex,
    replacement: String,
    status: Option<StatusCode>,
}

impl PatternRule {
    /// Compile a new rule. A `status` of `0` leaves the redirect
    /// status to be decided by the request method.
    pub fn new(pattern: &str, replacement: &str, status: u16) -> Result<Self, Error> {
        let status = match status {
            0 => None,
            sc => Some(StatusCode::from_u16(sc)?),
        };
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_owned(),
            status,
        })
    }

    /// Check if the pattern matches anywhere in the given url.
    #[inline]
    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// Replace every non-overlapping match in `url` with the expanded
    /// substitution template.
    ///
    /// Returns `None` when the pattern does not match.
    pub fn rewrite(&self, url: &str) -> Option<String> {
        let mut dst = String::with_capacity(url.len());
        let mut last = 0;
        let mut matched = false;
        for caps in self.pattern.captures_iter(url) {
            let Some(m) = caps.get_match() else {
                continue;
            };
            matched = true;
            dst.push_str(&url[last..m.start()]);
            caps.interpolate_string_into(url, &self.replacement, &mut dst);
            last = m.end();
        }
        if !matched {
            return None;
        }
        dst.push_str(&url[last..]);
        Some(dst)
    }
}

impl Matcher for PatternRule {
    fn evaluate(&self, view: &RequestView<'_>) -> Rewrite {
        let original = url::canonical_url(view.target, view.host, view.tls);
        if !self.matches(&original) {
            return Rewrite::Pass;
        }
        let Some(candidate) = self.rewrite(&original) else {
            return Rewrite::Pass;
        };

        let parsed = match url::parse_reference(&candidate) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("rewritten url {candidate:?} is invalid: {err}");
                return Rewrite::Pass;
            }
        };
        if candidate != original {
            return Rewrite::Redirect(Redirect::new(candidate, self.status));
        }

        match Uri::from_str(url::request_target(&parsed)) {
            Ok(uri) => Rewrite::Uri(uri),
            Err(err) => {
                tracing::warn!("rewritten url {candidate:?} is not a valid request target: {err}");
                Rewrite::Pass
            }
        }
    }
}
