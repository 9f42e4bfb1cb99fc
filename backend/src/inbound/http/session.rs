//! Request identity extraction.
//!
//! Resolves the `Authorization` header into a [`RequestContext`] through the
//! [`SessionResolver`](crate::domain::ports::SessionResolver) port, so
//! handlers receive the caller's identity as an ordinary argument.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, RequestContext};
use crate::inbound::http::state::HttpState;

/// Extractor yielding the caller's [`RequestContext`].
///
/// Missing or invalid credentials produce an anonymous context; only store
/// failures reject the request.
#[derive(Debug, Clone)]
pub struct RequestIdentity(pub RequestContext);

impl RequestIdentity {
    /// Unwrap the resolved context.
    pub fn into_inner(self) -> RequestContext {
        self.0
    }
}

impl FromRequest for RequestIdentity {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let authorization = match req.headers().get(AUTHORIZATION).map(|v| v.to_str()) {
            Some(Ok(value)) => Some(value.to_owned()),
            Some(Err(err)) => {
                debug!(error = %err, "non-ASCII authorization header; treating as anonymous");
                None
            }
            None => None,
        };

        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let session = state.sessions.resolve(authorization.as_deref()).await?;
            Ok(RequestIdentity(RequestContext::new(session)))
        })
    }
}
