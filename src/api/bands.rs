//! Band collection endpoints.
//!
//! Handlers decode transport input, call the record service, and shape
//! the response; no business logic lives here.

use crate::api::AppState;
use crate::error::{CatalogError, Result};
use crate::filter::FilterQuery;
use crate::model::Band;
use crate::store::BandStore;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

/// Canonical location reference for a band, returned by mutating calls.
fn band_location(name: &str) -> String {
    format!("/api/bands/{}", urlencoding::encode(name))
}

/// Fold a body-decode rejection into a bad-request with a message body,
/// keeping it distinct from record validation failures.
fn decoded(payload: std::result::Result<Json<Band>, JsonRejection>) -> Result<Band> {
    match payload {
        Ok(Json(band)) => Ok(band),
        Err(rejection) => Err(CatalogError::Validation {
            message: format!("Error reading band data: {}", rejection.body_text()),
        }),
    }
}

pub async fn list_bands<S: BandStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Band>>> {
    if query.is_unfiltered() {
        return Ok(Json(state.service.list().await?));
    }

    Ok(Json(state.service.list_filtered(&query).await?))
}

pub async fn get_band<S: BandStore>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<Band>> {
    Ok(Json(state.service.get(&name).await?))
}

pub async fn create_band<S: BandStore>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<Band>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let band = state.service.create(decoded(payload)?).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: band_location(&band.name),
        }),
    ))
}

pub async fn update_band<S: BandStore>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<Band>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let band = state.service.replace(decoded(payload)?).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: band_location(&band.name),
        }),
    ))
}

pub async fn patch_band_rating<S: BandStore>(
    State(state): State<AppState<S>>,
    Path((name, rate)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    state.service.patch_rating(&name, &rate).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: band_location(&name),
        }),
    ))
}

pub async fn delete_band<S: BandStore>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    state.service.delete(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::{router, AppState};
    use crate::service::BandService;
    use crate::store::MemoryBandStore;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(BandService::new(MemoryBandStore::new())))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn nirvana() -> Value {
        json!({"Name": "Nirvana", "Year": 1987, "Rating": 4})
    }

    #[tokio::test]
    async fn test_full_scenario() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/api/bands", Some(nirvana())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "/api/bands/Nirvana");

        let (status, body) = send(&app, Method::GET, "/api/bands/Nirvana", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, nirvana());

        let (status, _) = send(&app, Method::PATCH, "/api/bands/Nirvana/2", None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, Method::GET, "/api/bands?rating=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["Name"], "Nirvana");
        assert_eq!(body[0]["Rating"], 2);

        let (status, _) = send(&app, Method::DELETE, "/api/bands/Nirvana", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, "/api/bands/Nirvana", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unfiltered_empty_list_is_ok() {
        let (status, body) = send(&app(), Method::GET, "/api/bands", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_filter_with_no_constraints_is_bad_request() {
        let (status, body) = send(&app(), Method::GET, "/api/bands?year=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "must filter by year or rating");
    }

    #[tokio::test]
    async fn test_filter_with_no_matches_is_not_found() {
        let app = app();
        send(&app, Method::POST, "/api/bands", Some(nirvana())).await;

        let (status, body) = send(&app, Method::GET, "/api/bands?year=1900", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No matching records");
    }

    #[tokio::test]
    async fn test_conjunctive_filter() {
        let app = app();
        send(&app, Method::POST, "/api/bands", Some(nirvana())).await;
        send(
            &app,
            Method::POST,
            "/api/bands",
            Some(json!({"Name": "Melvins", "Year": 1987, "Rating": 2})),
        )
        .await;

        let (status, body) =
            send(&app, Method::GET, "/api/bands?year=1987&rating=4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["Name"], "Nirvana");
    }

    #[tokio::test]
    async fn test_duplicate_create_is_not_modified() {
        let app = app();
        send(&app, Method::POST, "/api/bands", Some(nirvana())).await;

        let (status, _) = send(&app, Method::POST, "/api/bands", Some(nirvana())).await;
        assert_eq!(status, StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/bands")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_record_is_bad_request() {
        let (status, _) = send(
            &app(),
            Method::POST,
            "/api/bands",
            Some(json!({"Name": "ZZ", "Year": 1969, "Rating": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_absent_is_not_found() {
        let (status, _) = send(&app(), Method::PUT, "/api/bands", Some(nirvana())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_updates_record() {
        let app = app();
        send(&app, Method::POST, "/api/bands", Some(nirvana())).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/bands",
            Some(json!({"Name": "Nirvana", "Year": 1988, "Rating": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "/api/bands/Nirvana");

        let (_, body) = send(&app, Method::GET, "/api/bands/Nirvana", None).await;
        assert_eq!(body["Year"], 1988);
        assert_eq!(body["Rating"], 2);
    }

    #[tokio::test]
    async fn test_patch_invalid_rate_is_bad_request() {
        let app = app();
        send(&app, Method::POST, "/api/bands", Some(nirvana())).await;

        for rate in ["0", "abc", "9"] {
            let uri = format!("/api/bands/Nirvana/{}", rate);
            let (status, _) = send(&app, Method::PATCH, &uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "rate {:?}", rate);
        }

        // Stored record untouched
        let (_, body) = send(&app, Method::GET, "/api/bands/Nirvana", None).await;
        assert_eq!(body["Rating"], 4);
    }

    #[tokio::test]
    async fn test_patch_absent_is_not_found() {
        let (status, _) = send(&app(), Method::PATCH, "/api/bands/Ghost/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_absent_is_not_found() {
        let (status, _) = send(&app(), Method::DELETE, "/api/bands/Ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store_connected"], true);
    }
}
