use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error,
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::redirect::Engine;
use crate::service::{RedirectInner, RedirectService};

/// Redirect middleware service
///
/// `Middleware` must be registered with `App::wrap()` method.
///
/// # Examples
///
/// ```
/// use actix_web::App;
/// use actix_redirect::{Middleware, Engine};
///
/// let engine = Engine::table(["/old:/new:301", "/legacy:https://example.com/"])
///     .name("legacy-links")
///     .debug(true);
///
/// let app = App::new().wrap(Middleware::new(engine));
/// ```
pub struct Middleware(Rc<Engine>);

impl Middleware {
    /// Creates a new redirect middleware instance
    #[inline]
    pub fn new(engine: Engine) -> Self {
        Self(Rc::new(engine))
    }
}

impl From<Engine> for Middleware {
    #[inline]
    fn from(value: Engine) -> Self {
        Self::new(value)
    }
}

impl<S> Transform<S, ServiceRequest> for Middleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RedirectService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectService(Rc::new(RedirectInner {
            service: Rc::new(service),
            engine: self.0.clone(),
        }))))
    }
}
