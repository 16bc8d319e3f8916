//! REST and GraphQL endpoint handlers.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};

use crate::health::{self, ApiResponse, DatabaseConfigView, HealthStatus};
use crate::http::server::AppState;

pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(health::health_status(&state.settings))
}

pub async fn database_config(
    State(state): State<AppState>,
) -> Json<ApiResponse<DatabaseConfigView>> {
    Json(health::database_config(&state.settings))
}

pub async fn graphql(State(state): State<AppState>, request: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(request.into_inner()).await.into()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not found")))
}
