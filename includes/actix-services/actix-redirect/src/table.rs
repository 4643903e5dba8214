//! Ordered literal redirect table

use std::str::FromStr;

use actix_http::StatusCode;

use super::error::Error;
use super::redirect::{Matcher, Redirect, RequestView, Rewrite, Trace};
use super::url;

/// Status used when an entry does not declare a valid one.
pub const DEFAULT_STATUS: StatusCode = StatusCode::FOUND;

/// Singular `source:destination[:status]` redirect definition.
///
/// The destination may contain colons of its own (`https://host/x`,
/// `mailto:a@b.c`). The trailing field is read as a status when it is
/// numeric, or when it contains no `/` and the destination has no scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectEntry {
    pub source: String,
    pub destination: String,
    pub status: Option<StatusCode>,
}

impl RedirectEntry {
    /// Parse an entry, returning `None` when it lacks a destination.
    pub fn parse(s: &str) -> Option<Self> {
        let (source, rest) = s.split_once(':')?;
        let (destination, status) = match rest.rsplit_once(':') {
            Some((destination, status)) if is_status_field(rest, status) => {
                (destination, parse_status(s, status))
            }
            _ => (rest, Some(DEFAULT_STATUS)),
        };
        Some(Self {
            source: source.to_owned(),
            destination: destination.to_owned(),
            status,
        })
    }
}

impl FromStr for RedirectEntry {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::MalformedEntry(s.to_owned()))
    }
}

fn is_status_field(rest: &str, field: &str) -> bool {
    let field = field.trim();
    if field.contains('/') {
        return false;
    }
    let numeric = !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit());
    numeric || !has_scheme(rest)
}

fn has_scheme(s: &str) -> bool {
    s.split_once(':').is_some_and(|(scheme, _)| {
        let mut chars = scheme.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

fn parse_status(entry: &str, status: &str) -> Option<StatusCode> {
    match status.trim().parse::<u16>() {
        Ok(0) => None,
        Ok(sc) => StatusCode::from_u16(sc).map(Some).unwrap_or_else(|_| {
            tracing::warn!("redirect {entry:?} has invalid status {sc}, using {DEFAULT_STATUS}");
            Some(DEFAULT_STATUS)
        }),
        Err(_) => {
            tracing::warn!("redirect {entry:?} has invalid status {status:?}, using {DEFAULT_STATUS}");
            Some(DEFAULT_STATUS)
        }
    }
}

/// Exact-match redirect lookup over entries in declaration order.
#[derive(Clone, Debug, Default)]
pub struct RedirectTable {
    entries: Vec<RedirectEntry>,
    debug: bool,
}

impl RedirectTable {
    /// Parse the given entries, dropping any without a destination.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|entry| {
                let entry = entry.as_ref();
                let parsed = RedirectEntry::parse(entry);
                if parsed.is_none() {
                    tracing::warn!("dropping malformed redirect {entry:?}");
                }
                parsed
            })
            .collect();
        Self {
            entries,
            debug: false,
        }
    }

    /// Attach a [`Trace`] to every redirect produced by the table.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Parsed entries in lookup order.
    #[inline]
    pub fn entries(&self) -> &[RedirectEntry] {
        &self.entries
    }

    /// Find the first entry whose source equals `target` and whose
    /// destination parses as a valid url reference.
    ///
    /// Entries with an unparsable destination are skipped, so a later
    /// entry with the same source may still match.
    pub fn lookup(&self, target: &str) -> Option<&RedirectEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.source == target)
            .find(|entry| match url::parse_reference(&entry.destination) {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!("redirect destination {:?} is invalid: {err}", entry.destination);
                    false
                }
            })
    }
}

impl Matcher for RedirectTable {
    fn evaluate(&self, view: &RequestView<'_>) -> Rewrite {
        let Some(entry) = self.lookup(view.target) else {
            return Rewrite::Pass;
        };
        let mut redirect = Redirect::new(entry.destination.as_str(), entry.status);
        if self.debug {
            redirect = redirect.trace(Trace {
                source: entry.source.clone(),
                destination: entry.destination.clone(),
                status: entry.status,
                old_url: view.target.to_owned(),
            });
        }
        Rewrite::Redirect(redirect)
    }
}
