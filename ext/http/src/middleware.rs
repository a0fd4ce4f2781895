//! `HeaderBlock`: the header filter as a request handler.
//!
//! A [`Handler`] turns an `http::Request` into an `http::Response`.
//! [`HeaderBlock`] wraps the next handler: allowed requests are passed to it
//! unchanged, denied requests are answered with the terminal status (403 by
//! default) and an empty body without ever reaching it.

use crate::HttpHeaders;
use headerblock::{Decision, Engine, EngineConfig, RuleError};
use http::{Request, Response, StatusCode};
use std::sync::Arc;

/// Something that answers requests.
///
/// Implemented for every `Fn(Request<B>) -> Response<R>` closure, and for
/// [`HeaderBlock`] itself so filters chain.
pub trait Handler<B> {
    /// Response body type. `Default` supplies the body of a rejection.
    type Body: Default;

    /// Answer one request.
    fn handle(&self, request: Request<B>) -> Response<Self::Body>;
}

impl<B, R, F> Handler<B> for F
where
    F: Fn(Request<B>) -> Response<R>,
    R: Default,
{
    type Body = R;

    fn handle(&self, request: Request<B>) -> Response<R> {
        self(request)
    }
}

/// Header filter middleware in front of `next`.
///
/// The engine is behind an `Arc`: clones share the compiled rules.
///
/// # Example
///
/// ```
/// use headerblock::prelude::*;
/// use headerblock_http::{Handler, HeaderBlock};
/// use http::{Request, Response, StatusCode};
///
/// let config = EngineConfig::new().block(HeaderPattern::new("User-Agent", "Googlebot"));
/// let next = |_req: Request<()>| Response::new("hello");
/// let filter = HeaderBlock::new(&config, next).unwrap();
///
/// let req = Request::builder().header("user-agent", "Googlebot").body(()).unwrap();
/// assert_eq!(filter.handle(req).status(), StatusCode::FORBIDDEN);
///
/// let req = Request::builder().header("user-agent", "Firefox").body(()).unwrap();
/// assert_eq!(filter.handle(req).status(), StatusCode::OK);
/// ```
#[derive(Debug, Clone)]
pub struct HeaderBlock<H> {
    engine: Arc<Engine>,
    next: H,
    status: StatusCode,
}

impl<H> HeaderBlock<H> {
    /// Compile `config` and wrap `next`.
    ///
    /// # Errors
    ///
    /// Returns the [`RuleError`] of the first pattern that fails to compile.
    pub fn new(config: &EngineConfig, next: H) -> Result<Self, RuleError> {
        Ok(Self::from_engine(Arc::new(Engine::build(config)?), next))
    }

    /// Wrap `next` with an already-built engine.
    #[must_use]
    pub fn from_engine(engine: Arc<Engine>, next: H) -> Self {
        Self {
            engine,
            next,
            status: StatusCode::FORBIDDEN,
        }
    }

    /// Answer denied requests with `status` instead of 403.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// The shared engine.
    #[must_use]
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// The wrapped handler.
    #[must_use]
    pub fn next(&self) -> &H {
        &self.next
    }

    /// Status sent on denial.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Decide on a request without forwarding it.
    pub fn check<B>(&self, request: &Request<B>) -> Decision {
        let headers = HttpHeaders::canonical(request.headers());
        if self.engine.logs_decisions() {
            self.engine.decide_for(&request.uri().to_string(), &headers)
        } else {
            self.engine.decide(&headers)
        }
    }
}

impl<B, H> Handler<B> for HeaderBlock<H>
where
    H: Handler<B>,
{
    type Body = H::Body;

    fn handle(&self, request: Request<B>) -> Response<H::Body> {
        match self.check(&request) {
            Decision::Allow => self.next.handle(request),
            Decision::Deny => {
                log::debug!("request rejected with {}", self.status);
                let mut response = Response::new(H::Body::default());
                *response.status_mut() = self.status;
                response
            }
        }
    }
}
