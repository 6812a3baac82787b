//! Body extractors for form submissions.

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A buffered, not yet decoded form submission.
///
/// Reading the body never looks at its format, so handlers can run the
/// login check first and only then call [`FormBody::decode`]. An anonymous
/// POST with a garbled body still gets the login redirect.
#[derive(Debug, Clone)]
pub struct FormBody {
    content_type: String,
    bytes: Bytes,
}

impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(FormBody {
            content_type,
            bytes,
        })
    }
}

impl FormBody {
    /// Decode as `application/x-www-form-urlencoded` or JSON.
    ///
    /// An empty body yields `T::default()`, so a missing field surfaces as a
    /// validation error rather than a 400.
    pub async fn decode<T>(self) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let media_type = self.content_type.to_ascii_lowercase();

        if media_type.starts_with("application/json") {
            let Json(value) =
                Json::<T>::from_bytes(&self.bytes).map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(value);
        }

        if media_type.starts_with("application/x-www-form-urlencoded") {
            let req = Request::builder()
                .method("POST")
                .header(CONTENT_TYPE, self.content_type.as_str())
                .body(Body::from(self.bytes))
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            let Form(value) = Form::<T>::from_request(req, &())
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(value);
        }

        if self.bytes.is_empty() {
            return Ok(T::default());
        }

        Err(AppError::BadRequest(format!(
            "Unsupported content type '{}'; expected JSON or form data",
            self.content_type
        )))
    }
}

/// A form payload decoded up front, for endpoints open to everyone.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = FormBody::from_request(req, state).await?;
        Ok(FormOrJson(body.decode().await?))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Comment {
        #[serde(default)]
        text: String,
    }

    fn body(content_type: &str, bytes: &'static str) -> FormBody {
        FormBody {
            content_type: content_type.to_string(),
            bytes: Bytes::from_static(bytes.as_bytes()),
        }
    }

    #[tokio::test]
    async fn decodes_json_and_urlencoded() {
        let json: Comment = body("application/json", r#"{"text":"hi"}"#)
            .decode()
            .await
            .unwrap();
        assert_eq!(json.text, "hi");

        let form: Comment = body("application/x-www-form-urlencoded", "text=a+b")
            .decode()
            .await
            .unwrap();
        assert_eq!(form.text, "a b");
    }

    #[tokio::test]
    async fn empty_body_is_default() {
        let empty: Comment = body("", "").decode().await.unwrap();
        assert_eq!(empty, Comment::default());
    }

    #[tokio::test]
    async fn malformed_or_unknown_bodies_are_bad_requests() {
        let err = body("application/json", "{not json")
            .decode::<Comment>()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = body("text/plain", "text").decode::<Comment>().await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
