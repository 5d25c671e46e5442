//! Axum route handlers for the Idyllic API.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use idyllic_core::{NewUser, User, UserId, UserStore};
use serde::Serialize;
use serde_json::{Map, Value};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

use crate::{
    config::GatewayConfig,
    error::GatewayError,
    extract::{JsonBody, PathParam},
};

// ── Shared state ─────────────────────────────────────────────────────────────

type Store = Arc<UserStore>;

// ── Request / response types ──────────────────────────────────────────────────

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Single-message body shared by `GET /` and `GET /hello/{name}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Wire projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Body of `GET /users`.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router around the given store.
pub fn create_router(store: Store, config: &GatewayConfig) -> Router {
    let router: Router = Router::new()
        .route("/health", get(health))
        .route("/", get(root))
        .route("/hello/{name}", get(hello))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(store)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    if config.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Service is running",
    })
}

/// `GET /` — welcome message.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Idyllic API!".to_owned(),
    })
}

/// `GET /hello/{name}` — personalised greeting.
pub async fn hello(PathParam(name): PathParam<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Hello, {name}!"),
    })
}

/// `GET /users` — every user in creation order.
pub async fn list_users(State(store): State<Store>) -> Json<UserListResponse> {
    let users = store.list().into_iter().map(UserResponse::from).collect();
    Json(UserListResponse { users })
}

/// `GET /users/{id}` — a single user.
///
/// # Errors
/// Returns [`GatewayError::InvalidUserId`] if `id` is not an integer, or a
/// not-found [`GatewayError::Core`] if no user has that ID.
pub async fn get_user(
    State(store): State<Store>,
    PathParam(raw_id): PathParam<String>,
) -> Result<Json<UserResponse>, GatewayError> {
    let id: UserId = raw_id
        .parse()
        .map_err(|_| GatewayError::InvalidUserId(raw_id))?;
    let user = store.get(id)?;
    debug!(user_id = %id, "user fetched");
    Ok(Json(user.into()))
}

/// `POST /users` — validate the body and store a new user.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the body is not a JSON
/// object, or a validation [`GatewayError::Core`] listing each failing field
/// (wrong types included). The store is untouched on error.
pub async fn create_user(
    State(store): State<Store>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<impl IntoResponse, GatewayError> {
    let new_user = NewUser::from_json_object(&body)?;
    let user = store.create(new_user.name, new_user.email);
    info!(user_id = %user.id, name = %user.name, "user created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Fallback for paths no route matches.
async fn route_not_found(uri: Uri) -> GatewayError {
    GatewayError::RouteNotFound(uri.path().to_owned())
}

/// Fallback for a matched path with an unsupported method.
async fn method_not_allowed(method: Method, uri: Uri) -> GatewayError {
    GatewayError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn test_store() -> Store {
        Arc::new(UserStore::new())
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    #[tokio::test]
    async fn health_response_format_returns_healthy_with_message() {
        let app = create_router(test_store(), &GatewayConfig::default());
        let (status, body) = send(app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"status": "healthy", "message": "Service is running"})
        );
    }

    #[tokio::test]
    async fn hello_percent_decodes_name() {
        let app = create_router(test_store(), &GatewayConfig::default());
        let (status, body) = send(app, get_req("/hello/Jos%C3%A9")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello, José!");
    }

    #[tokio::test]
    async fn get_user_non_integer_id_is_not_found() {
        let app = create_router(test_store(), &GatewayConfig::default());
        let (status, body) = send(app, get_req("/users/abc")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user with id abc not found");
    }

    #[tokio::test]
    async fn undecodable_path_segments_are_json_404() {
        for uri in ["/users/%FF", "/hello/%FF"] {
            let app = create_router(test_store(), &GatewayConfig::default());
            let (status, body) = send(app, get_req(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"], format!("route not found: {uri}"));
        }
    }

    #[tokio::test]
    async fn get_user_reads_from_injected_store() {
        let store = test_store();
        store.create("Alice", "alice@example.com");
        let app = create_router(Arc::clone(&store), &GatewayConfig::default());
        let (status, body) = send(app, get_req("/users/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"id": 1, "name": "Alice", "email": "alice@example.com"})
        );
    }

    #[test]
    fn user_response_projects_every_user_field() {
        let store = UserStore::new();
        let user = store.create("Bob", "bob@example.com");
        let json = match serde_json::to_value(UserResponse::from(user)) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Bob", "email": "bob@example.com"})
        );
    }
}
