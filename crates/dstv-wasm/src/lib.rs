#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `dstv-wasm`: DSTV NC1 import with lexing, block decoding and cut
//! reconstruction for steel-fabrication files.

pub mod decode;
pub mod document;
pub mod error;
pub mod geometry;
pub mod lexer;
pub mod validate;

use std::borrow::Cow;

use wasm_bindgen::prelude::*;

use crate::document::Nc1Document;
use crate::error::Nc1Error;
use crate::geometry::ProfileContext;
use crate::lexer::Token;

/// Initialize the WASM module. Sets up the panic hook for debugging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Parse an NC1 file from raw bytes.
///
/// `profile` is an optional `{ length, width, height }` object; pass
/// `undefined` or `null` to take the dimensions from the file header.
/// Returns the `Nc1Document` as a `JsValue` via `serde-wasm-bindgen`.
///
/// # Errors
///
/// Returns a descriptive error string for empty input or an unusable
/// profile.
#[wasm_bindgen]
pub fn parse_nc1(data: &[u8], profile: JsValue) -> Result<JsValue, JsValue> {
    let profile = if profile.is_undefined() || profile.is_null() {
        None
    } else {
        let profile: ProfileContext = serde_wasm_bindgen::from_value(profile)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Some(profile)
    };
    let doc = parse_nc1_internal(data, profile).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&doc).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal parse logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn parse_nc1_internal(
    data: &[u8],
    profile: Option<ProfileContext>,
) -> Result<Nc1Document, Nc1Error> {
    if let Some(profile) = &profile {
        profile.validate()?;
    }
    let text = decode_text(data)?;
    Ok(document::parse(&text, profile))
}

/// Tokenize an NC1 file from raw bytes.
///
/// Returns the token list as a `JsValue` via `serde-wasm-bindgen`.
///
/// # Errors
///
/// Returns a descriptive error string for empty input.
#[wasm_bindgen]
pub fn tokenize_nc1(data: &[u8]) -> Result<JsValue, JsValue> {
    let tokens = tokenize_nc1_internal(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&tokens).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal tokenize logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn tokenize_nc1_internal(data: &[u8]) -> Result<Vec<Token>, Nc1Error> {
    let text = decode_text(data)?;
    Ok(lexer::tokenize(&text))
}

/// Decodes the input bytes, replacing invalid UTF-8 (8-bit exports).
fn decode_text(data: &[u8]) -> Result<Cow<'_, str>, Nc1Error> {
    if data.is_empty() {
        return Err(Nc1Error::EmptyInput);
    }
    let text = String::from_utf8_lossy(data);
    if matches!(text, Cow::Owned(_)) {
        tracing::debug!(bytes = data.len(), "input is not valid UTF-8, decoded lossily");
    }
    Ok(text)
}
