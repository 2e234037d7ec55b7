//! Response rendering.
//!
//! Payloads go out as JSON unless the client asks for raw mode, which is
//! tuned for 8-bit clients with tiny parsers: braces, brackets, and quotes
//! are stripped and the JSON text collapses to delimiter-separated lines
//! (NUL by default, newline with `lf=1`). `uc=1`/`lc=1` force the body's
//! case.

use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Rendering switches pulled from the request's query string.
#[derive(Clone, Copy, Debug, Default)]
pub struct Format {
    pub raw: bool,
    pub lf: bool,
    pub uc: bool,
    pub lc: bool,
}

/// Serialize `value` according to the requested format.
pub fn respond<T: Serialize>(format: Format, value: &T) -> Response {
    if !format.raw {
        return Json(value).into_response();
    }

    let delimiter = if format.lf { "\n" } else { "\u{0000}" };
    let json = serde_json::to_string(value).unwrap_or_default();

    // Structural characters first, then separators, then leftover quotes.
    let mut body = json
        .replace('{', "")
        .replace('}', "")
        .replace('[', "")
        .replace(']', "");
    body = body.replace(':', delimiter);
    body = body.replace("\",", delimiter).replace(",\"", delimiter);
    body = body.replace('"', "");

    if format.uc {
        body = body.to_uppercase();
    }
    if format.lc {
        body = body.to_lowercase();
    }

    body.into_response()
}
