//! Actix-Web Middleware for redirecting or silently rewriting request urls.
//!
//! Two kinds of rules are supported:
//!
//! * a single regex pattern matched against the reconstructed absolute
//!   request url and expanded into a new url via a substitution template.
//! * an ordered table of literal `source:destination[:status]` entries
//!   matched exactly against the raw request target.
//!
//! Requests that do not match are forwarded untouched.
//!
//! # Example
//!
//! ```
//! use actix_web::App;
//! use actix_redirect::Engine;
//!
//! let engine = Engine::pattern(
//!     r"^http://localhost/blog/(\d+)$",
//!     "https://blog.example.com/posts/$1",
//!     301,
//! ).expect("invalid redirect pattern");
//!
//! let app = App::new()
//!   .wrap(engine.middleware());
//! ```
mod error;
mod factory;
mod pattern;
mod redirect;
pub mod respond;
mod service;
mod table;
pub mod url;
pub mod util;

pub use error::Error;
pub use factory::Middleware;
pub use pattern::PatternRule;
pub use redirect::{Engine, Matcher, Redirect, RequestView, Rewrite, RuleSet, Trace};
pub use service::RedirectService;
pub use table::{DEFAULT_STATUS, RedirectEntry, RedirectTable};
