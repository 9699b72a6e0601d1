//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use assetledger_domain::{Asset, AssetId, DataHash};

use crate::app::App;
use crate::contract::{ContractError, Invocation};
use crate::entities::{AssetError, AssetErrorKind};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/assets", post(create_asset))
        .route("/api/assets/{id}", get(get_asset))
        .route("/api/assets/{id}/exists", get(asset_exists))
        .route("/api/contract/functions", get(list_functions))
        .route("/api/invoke", post(invoke))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Assets
// =============================================================================

/// `dataHash` and `metadata` are both optional and default to empty. When
/// `data` is sent instead of `dataHash`, the hash is derived from it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAssetRequest {
    id: String,
    #[serde(default)]
    data_hash: Option<String>,
    #[serde(default)]
    metadata: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl CreateAssetRequest {
    fn resolve_data_hash(&self) -> Result<DataHash, ApiError> {
        match (&self.data_hash, &self.data) {
            (Some(_), Some(_)) => Err(ApiError::BadRequest(
                "Send either dataHash or data, not both".to_string(),
            )),
            (Some(hash), None) => Ok(DataHash::new(hash.as_str())),
            (None, Some(data)) => {
                DataHash::of_json(data).map_err(|e| ApiError::BadRequest(e.to_string()))
            }
            (None, None) => Ok(DataHash::default()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExistsResponse {
    exists: bool,
}

async fn create_asset(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    let data_hash = request.resolve_data_hash()?;
    let id = parse_id(request.id)?;
    let asset = app
        .registry
        .create_asset(app.tx(), id, data_hash, request.metadata)
        .await?;

    tracing::info!(asset_id = %asset.id(), "Asset created");
    Ok((StatusCode::CREATED, Json(asset)))
}

async fn get_asset(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Asset>, ApiError> {
    let id = parse_id(id)?;
    let asset = app.registry.query_asset(app.tx(), &id).await?;
    Ok(Json(asset))
}

async fn asset_exists(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let id = parse_id(id)?;
    let exists = app.registry.asset_exists(app.tx(), &id).await?;
    Ok(Json(ExistsResponse { exists }))
}

fn parse_id(id: String) -> Result<AssetId, ApiError> {
    AssetId::new(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}

// =============================================================================
// Contract invocation
// =============================================================================

async fn list_functions(State(app): State<Arc<App>>) -> Json<Vec<&'static str>> {
    Json(app.contract.functions().iter().map(|f| f.name()).collect())
}

/// Run a ledger-style invocation. The response body is the raw payload, or
/// `204 No Content` when the function returns nothing.
async fn invoke(State(app): State<Arc<App>>, body: String) -> Result<Response, ApiError> {
    let invocation = Invocation::from_json(&body)?;
    let payload = app.contract.invoke(app.tx(), &invocation).await?;

    if payload.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response())
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Conflict(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<AssetError> for ApiError {
    fn from(e: AssetError) -> Self {
        match e.kind() {
            AssetErrorKind::NotFound => ApiError::NotFound(e.to_string()),
            AssetErrorKind::AlreadyExists => ApiError::Conflict(e.to_string()),
            AssetErrorKind::Storage | AssetErrorKind::Decode => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ContractError> for ApiError {
    fn from(e: ContractError) -> Self {
        match e {
            ContractError::Asset(e) => e.into(),
            e if e.is_bad_request() => ApiError::BadRequest(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    use crate::infrastructure::memory_state::InMemoryWorldState;
    use crate::infrastructure::ports::{MockWorldState, WorldState, WorldStateError};

    fn router_with(state: Arc<dyn WorldState>) -> Router {
        routes().with_state(Arc::new(App::new(state)))
    }

    fn router() -> Router {
        router_with(Arc::new(InMemoryWorldState::new()))
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        router.oneshot(request).await.expect("response")
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = send(router(), Method::GET, "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn create_then_get_asset() {
        let router = router();
        let body = r#"{"id":"asset1","dataHash":"abc123hash","metadata":"{\"owner\":\"alice\"}"}"#;

        let created = send(router.clone(), Method::POST, "/api/assets", Some(body)).await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let fetched = send(router, Method::GET, "/api/assets/asset1", None).await;
        assert_eq!(fetched.status(), StatusCode::OK);

        let json: serde_json::Value =
            serde_json::from_str(&body_string(fetched).await).expect("json");
        assert_eq!(json["ID"], "asset1");
        assert_eq!(json["dataHash"], "abc123hash");
        assert_eq!(json["metadata"], r#"{"owner":"alice"}"#);
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict() {
        let router = router();
        let body = r#"{"id":"asset1","dataHash":"h","metadata":"m"}"#;

        send(router.clone(), Method::POST, "/api/assets", Some(body)).await;
        let second = send(router, Method::POST, "/api/assets", Some(body)).await;

        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_string(second).await,
            "The asset asset1 already exists"
        );
    }

    #[tokio::test]
    async fn missing_asset_is_not_found() {
        let response = send(router(), Method::GET, "/api/assets/missing", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn exists_reports_presence() {
        let router = router();
        let before = send(router.clone(), Method::GET, "/api/assets/asset1/exists", None).await;
        assert_eq!(body_string(before).await, r#"{"exists":false}"#);

        send(
            router.clone(),
            Method::POST,
            "/api/assets",
            Some(r#"{"id":"asset1","dataHash":"h","metadata":"m"}"#),
        )
        .await;

        let after = send(router, Method::GET, "/api/assets/asset1/exists", None).await;
        assert_eq!(body_string(after).await, r#"{"exists":true}"#);
    }

    #[tokio::test]
    async fn empty_id_is_bad_request() {
        let response = send(
            router(),
            Method::POST,
            "/api/assets",
            Some(r#"{"id":"","dataHash":"h","metadata":"m"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn storage_failure_hides_details() {
        let mut state = MockWorldState::new();
        state
            .expect_get()
            .returning(|_| Err(WorldStateError::backend("get", "secret path /var/db")));

        let response = send(
            router_with(Arc::new(state)),
            Method::GET,
            "/api/assets/asset1",
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Internal error");
    }

    #[tokio::test]
    async fn invoke_runs_contract_functions() {
        let router = router();

        let created = send(
            router.clone(),
            Method::POST,
            "/api/invoke",
            Some(r#"{"Args":["CreateAsset","asset1","h","m"]}"#),
        )
        .await;
        assert_eq!(created.status(), StatusCode::NO_CONTENT);
        assert!(created.headers().get(header::CONTENT_TYPE).is_none());
        assert_eq!(body_string(created).await, "");

        let exists = send(
            router.clone(),
            Method::POST,
            "/api/invoke",
            Some(r#"{"function":"AssetExists","Args":["asset1"]}"#),
        )
        .await;
        assert_eq!(body_string(exists).await, "true");

        let queried = send(
            router,
            Method::POST,
            "/api/invoke",
            Some(r#"{"Args":["QueryAsset","asset1"]}"#),
        )
        .await;
        assert_eq!(
            body_string(queried).await,
            r#"{"ID":"asset1","dataHash":"h","metadata":"m"}"#
        );
    }

    #[tokio::test]
    async fn invoke_unknown_function_is_bad_request() {
        let response = send(
            router(),
            Method::POST,
            "/api/invoke",
            Some(r#"{"Args":["DeleteAsset","asset1"]}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invoke_malformed_body_is_bad_request() {
        let response = send(router(), Method::POST, "/api/invoke", Some("{not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invoke_wrong_arity_is_bad_request() {
        let response = send(
            router(),
            Method::POST,
            "/api/invoke",
            Some(r#"{"Args":["CreateAsset","asset1"]}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            "CreateAsset expects 3 argument(s), got 1"
        );
    }

    #[tokio::test]
    async fn create_derives_hash_from_data() {
        let created = send(
            router(),
            Method::POST,
            "/api/assets",
            Some(r#"{"id":"asset1","data":{"b":1,"a":"x"}}"#),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let json: serde_json::Value =
            serde_json::from_str(&body_string(created).await).expect("json");
        assert_eq!(
            json["dataHash"],
            "385820f0096fd558f4091319e7fa742cebf877dc3baca180981889f1c40eca84"
        );
        assert_eq!(json["metadata"], "");
    }

    #[tokio::test]
    async fn create_without_hash_or_metadata_stores_empty_fields() {
        let router = router();
        let created = send(
            router.clone(),
            Method::POST,
            "/api/assets",
            Some(r#"{"id":"asset1"}"#),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let fetched = send(router, Method::GET, "/api/assets/asset1", None).await;
        assert_eq!(
            body_string(fetched).await,
            r#"{"ID":"asset1","dataHash":"","metadata":""}"#
        );
    }

    #[tokio::test]
    async fn create_with_hash_and_data_is_bad_request() {
        let router = router();
        let response = send(
            router.clone(),
            Method::POST,
            "/api/assets",
            Some(r#"{"id":"asset1","dataHash":"h","data":{"a":1}}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let exists = send(router, Method::GET, "/api/assets/asset1/exists", None).await;
        assert_eq!(body_string(exists).await, r#"{"exists":false}"#);
    }

    #[tokio::test]
    async fn invoke_query_missing_is_not_found() {
        let response = send(
            router(),
            Method::POST,
            "/api/invoke",
            Some(r#"{"Args":["QueryAsset","missing"]}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lists_registered_functions() {
        let response = send(router(), Method::GET, "/api/contract/functions", None).await;
        assert_eq!(
            body_string(response).await,
            r#"["CreateAsset","QueryAsset","AssetExists"]"#
        );
    }
}
