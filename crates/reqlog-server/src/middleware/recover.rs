//! Contencion de panics alrededor del handler.
//!
//! The downstream call is wrapped in two unwind boundaries: one around the
//! synchronous `Service::call` and one around the returned future. A panic
//! in either becomes an [`Outcome::Panicked`] and never reaches the server.
//!
//! The backtrace of the panic site is recorded by a process panic hook into
//! a thread-local slot, but only while a [`RecoveryScope`] is active on
//! that thread. The slot is cleared when each scope opens, and
//! `catch_unwind` returns on the same thread inside the same poll. A panic
//! raised with `resume_unwind` skips the hook, so its stack is captured at
//! the recovery site instead.
//!
//! Panics inside a scope are not passed to the previous hook, so a
//! recovered panic appears only in the structured request record.

use std::{
    any::Any,
    backtrace::Backtrace,
    cell::Cell,
    panic::{self, AssertUnwindSafe},
    pin::pin,
    sync::Once,
    task::Poll,
};

use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, StatusCode, header},
};
use futures::future::poll_fn;
use reqlog_core::{Failure, marshal};
use serde::Serialize;
use tower::Service;

thread_local! {
    static LAST_BACKTRACE: Cell<Option<String>> = const { Cell::new(None) };
    static RECOVERING: Cell<bool> = const { Cell::new(false) };
}

static PANIC_HOOK: Once = Once::new();

/// Installs the backtrace-recording panic hook.
///
/// Panics outside [`call_recovered`] go to the previous hook unchanged.
/// Calling this more than once has no effect.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if RECOVERING.with(Cell::get) {
                let trace = Backtrace::force_capture().to_string();
                LAST_BACKTRACE.with(|slot| slot.set(Some(trace)));
            } else {
                previous(info);
            }
        }));
    });
}

fn take_backtrace() -> Option<String> {
    LAST_BACKTRACE.with(Cell::take)
}

/// Marks the current thread as running protected handler code.
///
/// The previous flag is restored on drop, so nested scopes unwind cleanly.
struct RecoveryScope {
    outer: bool,
}

impl RecoveryScope {
    fn enter() -> Self {
        LAST_BACKTRACE.with(|slot| slot.set(None));
        Self {
            outer: RECOVERING.with(|flag| flag.replace(true)),
        }
    }
}

impl Drop for RecoveryScope {
    fn drop(&mut self) {
        RECOVERING.with(|flag| flag.set(self.outer));
    }
}

fn catch<R>(f: impl FnOnce() -> R) -> Result<R, Box<dyn Any + Send>> {
    let _scope = RecoveryScope::enter();
    panic::catch_unwind(AssertUnwindSafe(f))
}

/// Result of one protected downstream invocation.
#[derive(Debug)]
pub enum Outcome<E> {
    /// The handler produced a response, whatever its status.
    Completed(Response<Body>),
    /// The inner service returned an error.
    Failed(E),
    /// The handler panicked.
    Panicked { failure: Failure, stack: String },
}

impl<E> Outcome<E> {
    fn panicked(payload: Box<dyn Any + Send>) -> Self {
        let stack = take_backtrace().unwrap_or_else(|| Backtrace::force_capture().to_string());

        Self::Panicked {
            failure: Failure::from_panic(payload),
            stack,
        }
    }
}

/// Invokes `inner` once, converting any panic into [`Outcome::Panicked`].
///
/// Every poll of the handler future runs in its own recovery scope.
pub async fn call_recovered<S>(mut inner: S, request: Request<Body>) -> Outcome<S::Error>
where
    S: Service<Request<Body>, Response = Response<Body>>,
{
    let future = match catch(|| inner.call(request)) {
        Ok(future) => future,
        Err(payload) => return Outcome::panicked(payload),
    };

    let mut future = pin!(future);
    let result = poll_fn(|cx| match catch(|| future.as_mut().poll(cx)) {
        Ok(Poll::Ready(result)) => Poll::Ready(Ok(result)),
        Ok(Poll::Pending) => Poll::Pending,
        Err(payload) => Poll::Ready(Err(payload)),
    })
    .await;

    match result {
        Ok(Ok(response)) => Outcome::Completed(response),
        Ok(Err(e)) => Outcome::Failed(e),
        Err(payload) => Outcome::panicked(payload),
    }
}

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

/// Builds the fixed response returned after a recovered panic.
///
/// The body is `{"status":"Internal Server Error"}`.
pub fn panic_response() -> Response<Body> {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    let body = marshal(&StatusBody {
        status: status.canonical_reason().unwrap_or_default(),
    });

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
