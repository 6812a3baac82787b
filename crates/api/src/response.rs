//! Shared response types for API handlers.
//!
//! Pages are JSON documents keyed by their context names (`news_list`,
//! `object_list`, `form`, ...). Forms are described by [`FormView`]; a
//! submission that fails validation re-renders the form with `errors` filled in
//! and HTTP 200, mirroring a server-rendered form page.

use std::collections::BTreeMap;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use newsroom_core::error::CoreError;
use serde::Serialize;

use crate::error::AppError;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Description of an HTML-style form: its fields, the submitted values, and
/// per-field error messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormView {
    pub fields: Vec<&'static str>,
    pub values: BTreeMap<&'static str, String>,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormView {
    pub fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turn a failed check into a response error.
    ///
    /// Validation failures become a re-render of this form; anything else is
    /// passed through unchanged.
    pub fn reject(mut self, err: CoreError) -> AppError {
        match err {
            CoreError::Validation { field, message } => {
                self.add_error(field, message);
                AppError::InvalidForm(self)
            }
            other => AppError::Core(other),
        }
    }
}

/// Body of a form re-render: `{"form": {...}}`.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub form: FormView,
}

/// `302 Found` to `location`.
pub fn found(location: impl AsRef<str>) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.as_ref().to_string())]).into_response()
}
