//! # Panic Recovery
//!
//! A per-request boundary mounted inside the auth layer. A panicking
//! handler produces a `{500, <panic message>, null}` envelope for that
//! request only; the worker task and every other request are unaffected.

use std::any::Any;

use axum::response::Response;
use idgate_core::Envelope;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::INTERNAL_ERROR_CODE;
use crate::response;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Build the panic boundary layer.
pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let msg = panic_message(payload.as_ref());
    tracing::error!(panic = %msg, "handler panicked");
    response::envelope(Envelope::<()>::failure(INTERNAL_ERROR_CODE, msg))
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    }
}
