use std::{ops::Deref, rc::Rc};

use actix_web::{
    body::BoxBody,
    dev::{Path, Service, ServiceRequest, ServiceResponse, Url, forward_ready},
    error::Error as ActixError,
};
use futures_core::future::LocalBoxFuture;

use super::redirect::{Engine, Rewrite};

/// Assembled redirect service
#[derive(Clone)]
pub struct RedirectService<S>(pub(crate) Rc<RedirectInner<S>>);

impl<S> Deref for RedirectService<S> {
    type Target = RedirectInner<S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct RedirectInner<S> {
    pub(crate) service: Rc<S>,
    pub(crate) engine: Rc<Engine>,
}

impl<S> Service<ServiceRequest> for RedirectService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = ActixError> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let this = Rc::clone(&self.0);
        Box::pin(async move {
            match this.engine.rewrite(req.request()) {
                Rewrite::Pass => {
                    tracing::trace!("no redirect for {:?}", req.uri());
                }
                Rewrite::Uri(uri) => {
                    tracing::debug!("rewrote {:?} -> {uri:?}", req.uri());
                    req.head_mut().uri = uri.clone();
                    *req.match_info_mut() = Path::new(Url::new(uri));
                }
                Rewrite::Redirect(redirect) => {
                    let res = this.engine.respond(req.method(), &redirect);
                    tracing::debug!(
                        "redirecting {:?} -> {} ({})",
                        req.uri(),
                        redirect.location,
                        res.status()
                    );
                    return Ok(req.into_response(res));
                }
            }
            this.service.call(req).await
        })
    }
}
