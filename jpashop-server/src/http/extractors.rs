//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use jpashop_core::ValidationError;

use super::error::ApiError;

/// Extract and validate a numeric entity id from a single-segment path
pub struct ValidId(pub i64);

/// Extract and validate two numeric ids, e.g. `/categories/{id}/items/{item_id}`
pub struct ValidIdPair(pub i64, pub i64);

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    let id = raw.parse::<i64>().map_err(|_| {
        ApiError::Validation(ValidationError::InvalidVariant {
            field: "id",
            value: raw.to_owned(),
        })
    })?;

    if id < 1 {
        return Err(ValidationError::TooSmall { field: "id", min: 1 }.into());
    }
    Ok(id)
}

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self(parse_id(&raw)?))
    }
}

impl<S> FromRequestParts<S> for ValidIdPair
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)): Path<(String, String)> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self(parse_id(&first)?, parse_id(&second)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn echo(ValidId(id): ValidId) -> String {
        id.to_string()
    }

    async fn echo_pair(ValidIdPair(a, b): ValidIdPair) -> String {
        format!("{a}/{b}")
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app: Router = Router::new()
            .route("/things/{id}", get(echo))
            .route("/things/{id}/parts/{part_id}", get(echo_pair));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.into_response().status()
    }

    #[tokio::test]
    async fn accepts_positive_ids() {
        assert_eq!(status_for("/things/42").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_garbage_and_zero() {
        assert_eq!(status_for("/things/abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/things/0").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn pair_rejects_either_bad_segment() {
        assert_eq!(status_for("/things/1/parts/2").await, StatusCode::OK);
        assert_eq!(status_for("/things/x/parts/2").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/things/1/parts/-3").await, StatusCode::BAD_REQUEST);
    }
}
