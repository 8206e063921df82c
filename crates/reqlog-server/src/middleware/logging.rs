//! Middleware de logging estructurado por request.
//!
//! [`RequestLogLayer`] wires the pieces together for every request that the
//! filter does not skip:
//!
//! ```text
//! request ─► ensure id ─► start record ─► call_recovered(inner)
//!                                              │
//!            emit ◄─ classify ◄─ finish ◄──────┘
//! ```
//!
//! Finalization is owned by a [`RequestGuard`]. If the request future is
//! dropped before the handler finishes, the guard still emits the record
//! with status `0` and a [`Failure::Cancelled`].

use std::{
    fmt,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    body::Body,
    http::{Request, Response},
};
use reqlog_core::{Classification, Failure, RequestLogRecord, classify, emit};
use tower::{Layer, Service};
use tracing::Dispatch;

use super::fields::{self, PendingRecord};
use super::recover::{self, Outcome};
use super::request_id::{ensure_request_id, set_response_request_id};

/// Predicate deciding which requests bypass the middleware entirely.
///
/// Returning `true` skips logging, panic recovery and request ID handling.
pub type Filter = Arc<dyn Fn(&Request<Body>) -> bool + Send + Sync>;

/// Builds a filter that skips requests whose path is one of `paths`.
pub fn skip_paths<I, P>(paths: I) -> Filter
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
    Arc::new(move |request: &Request<Body>| {
        let path = request.uri().path();
        paths.iter().any(|p| p == path)
    })
}

/// Creates the request logging layer.
///
/// `logger` receives one event per logged request; `filter`, when given,
/// selects requests that pass straight through.
pub fn middleware(logger: Dispatch, filter: Option<Filter>) -> RequestLogLayer {
    let layer = RequestLogLayer::new(logger);
    match filter {
        Some(filter) => layer.with_filter(filter),
        None => layer,
    }
}

/// Layer that logs requests and recovers handler panics.
#[derive(Clone)]
pub struct RequestLogLayer {
    logger: Dispatch,
    filter: Option<Filter>,
}

impl RequestLogLayer {
    /// Creates a layer writing to `logger`, with no filter.
    pub fn new(logger: Dispatch) -> Self {
        recover::install_panic_hook();
        Self {
            logger,
            filter: None,
        }
    }

    /// Sets the bypass filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

impl fmt::Debug for RequestLogLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogLayer")
            .field("filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogMiddleware {
            inner,
            logger: self.logger.clone(),
            filter: self.filter.clone(),
        }
    }
}

/// Middleware that emits one log record per request.
#[derive(Clone)]
pub struct RequestLogMiddleware<S> {
    inner: S,
    logger: Dispatch,
    filter: Option<Filter>,
}

impl<S> Service<Request<Body>> for RequestLogMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: fmt::Display + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        // clone-swap: keep the instance that was polled ready
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if let Some(filter) = &self.filter
            && filter(&request)
        {
            return Box::pin(inner.call(request));
        }

        let request_id = ensure_request_id(&mut request);
        let guard = RequestGuard::new(self.logger.clone(), fields::start(&request, &request_id));

        Box::pin(async move {
            match recover::call_recovered(inner, request).await {
                Outcome::Completed(mut response) => {
                    set_response_request_id(&mut response, &request_id);
                    guard.completed(response.status().as_u16());
                    Ok(response)
                }
                Outcome::Panicked { failure, stack } => {
                    let mut response = recover::panic_response();
                    set_response_request_id(&mut response, &request_id);
                    guard.panicked(response.status().as_u16(), failure, stack);
                    Ok(response)
                }
                Outcome::Failed(e) => {
                    guard.failed(Failure::service(&e));
                    Err(e)
                }
            }
        })
    }
}

/// Owns the pending record and guarantees it is emitted exactly once.
pub struct RequestGuard {
    logger: Dispatch,
    pending: Option<PendingRecord>,
}

impl RequestGuard {
    pub fn new(logger: Dispatch, pending: PendingRecord) -> Self {
        Self {
            logger,
            pending: Some(pending),
        }
    }

    /// The handler returned a response with `status`.
    pub fn completed(mut self, status: u16) {
        if let Some(pending) = self.pending.take() {
            let record = pending.finish(status);
            self.write(classify(status), &record);
        }
    }

    /// The handler panicked and `status` was sent instead.
    pub fn panicked(mut self, status: u16, failure: Failure, stack: String) {
        if let Some(pending) = self.pending.take() {
            let record = pending.finish(status).with_panic(failure, stack);
            self.write(Classification::panic_recover(), &record);
        }
    }

    /// The inner service failed without producing a response.
    pub fn failed(mut self, failure: Failure) {
        if let Some(pending) = self.pending.take() {
            let record = pending.finish(0).with_failure(failure);
            self.write(classify(0), &record);
        }
    }

    fn write(&self, classification: Classification, record: &RequestLogRecord) {
        emit(&self.logger, classification, record);
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            let record = pending.finish(0).with_failure(Failure::Cancelled);
            self.write(classify(0), &record);
        }
    }
}
