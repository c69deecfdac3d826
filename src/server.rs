use crate::data::{SolveConfig, TimetableInput};
use crate::solver::{self, Encoding, SolveOutcome};
use axum::{Json, Router, routing::post};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub input: TimetableInput,
    #[serde(default)]
    pub config: SolveConfig,
    #[serde(default)]
    pub encoding: Encoding,
}

async fn solve_handler(
    Json(request): Json<SolveRequest>,
) -> Result<Json<SolveOutcome>, (axum::http::StatusCode, String)> {
    match solver::solve(&request.input, &request.config, request.encoding) {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => Err((axum::http::StatusCode::BAD_REQUEST, e)),
    }
}

pub async fn run_server() {
    let app = Router::new().route("/v1/timetable/solve", post(solve_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
