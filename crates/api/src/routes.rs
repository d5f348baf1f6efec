use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use market_core::ClassId;
use serde::{Deserialize, Serialize};
use view::{
    class_options, company_series, event_history, portfolio_series, ChartSeries, ClassOption,
    EventHistoryView, MarketView, ReportView,
};

use crate::{
    error::ApiError,
    state::{AppState, SessionId},
    ws,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/classes", get(list_classes))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(delete_session))
        .route("/sessions/:id/investments", post(invest))
        .route("/sessions/:id/end", post(end_market))
        .route("/sessions/:id/report", get(get_report))
        .route("/sessions/:id/reset", post(reset_session))
        .route(
            "/sessions/:id/companies/:index/history",
            get(company_history),
        )
        .route("/sessions/:id/portfolio/history", get(portfolio_history))
        .route("/sessions/:id/events", get(session_events))
        .route("/ws/events", get(ws::events_socket))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CreateSessionRequest {
    class_id: String,
}

#[derive(Debug, Deserialize)]
struct InvestmentRequest {
    company_index: usize,
    amount: f64,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    session_id: SessionId,
    #[serde(flatten)]
    view: MarketView,
}

async fn list_classes() -> Json<Vec<ClassOption>> {
    Json(class_options())
}

async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let class: ClassId = request.class_id.parse()?;
    let (session_id, view) = state.create_session(class)?;
    let location = format!("/sessions/{session_id}");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(SessionResponse { session_id, view }),
    ))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<SessionResponse>, ApiError> {
    let view = state.read(session_id, MarketView::from_session)?;
    Ok(Json(SessionResponse { session_id, view }))
}

async fn invest(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    Json(request): Json<InvestmentRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let view = state.invest(session_id, request.company_index, request.amount)?;
    Ok(Json(SessionResponse { session_id, view }))
}

async fn end_market(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<ReportView>, ApiError> {
    state.end_market(session_id).await.map(Json)
}

async fn get_report(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<ReportView>, ApiError> {
    let view = state.read(session_id, |session| {
        ReportView::new(session.class(), session.report())
    })?;
    Ok(Json(view))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<SessionResponse>, ApiError> {
    let view = state.reset(session_id)?;
    Ok(Json(SessionResponse { session_id, view }))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    state.remove(session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn company_history(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(SessionId, usize)>,
) -> Result<Json<ChartSeries>, ApiError> {
    state
        .read(session_id, |session| company_series(session, index))?
        .map(Json)
        .ok_or(ApiError::CompanyNotFound(index))
}

async fn portfolio_history(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<ChartSeries>, ApiError> {
    state.read(session_id, portfolio_series).map(Json)
}

async fn session_events(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<EventHistoryView>, ApiError> {
    state.read(session_id, event_history).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::router;
    use crate::state::AppState;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn create_session_returns_location_and_view() {
        let app = router(AppState::new());

        let response = send(&app, post_json("/sessions", json!({ "class_id": "9a" }))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/sessions/1");
        let body = body_json(response).await;
        assert_eq!(body["session_id"], 1);
        assert_eq!(body["class_id"], "9A");
        assert_eq!(body["summary"]["balance"], 2_000.0);
        assert_eq!(body["companies"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn unknown_class_is_unprocessable() {
        let app = router(AppState::new());

        let response = send(&app, post_json("/sessions", json!({ "class_id": "7C" }))).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"], "unknown_class");
    }

    #[tokio::test]
    async fn classroom_scenario_buy_then_oversized_buy() {
        let app = router(AppState::new());
        send(&app, post_json("/sessions", json!({ "class_id": "9A" }))).await;

        let bought = send(
            &app,
            post_json(
                "/sessions/1/investments",
                json!({ "company_index": 0, "amount": 500.0 }),
            ),
        )
        .await;
        assert_eq!(bought.status(), StatusCode::OK);
        let body = body_json(bought).await;
        assert_eq!(body["summary"]["balance"], 1_500.0);
        assert_eq!(body["companies"][0]["investment"], 500.0);

        let rejected = send(
            &app,
            post_json(
                "/sessions/1/investments",
                json!({ "company_index": 4, "amount": 2_000.0 }),
            ),
        )
        .await;
        assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(rejected).await["error"], "insufficient_balance");

        let current = send(&app, Request::get("/sessions/1").body(Body::empty()).unwrap()).await;
        assert_eq!(body_json(current).await["summary"]["balance"], 1_500.0);
    }

    #[tokio::test]
    async fn selling_beyond_holding_and_unknown_company_are_rejected() {
        let app = router(AppState::new());
        send(&app, post_json("/sessions", json!({ "class_id": "9B" }))).await;

        let oversold = send(
            &app,
            post_json(
                "/sessions/1/investments",
                json!({ "company_index": 1, "amount": -100.0 }),
            ),
        )
        .await;
        assert_eq!(oversold.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(oversold).await["error"], "insufficient_holding");

        let unknown = send(
            &app,
            post_json(
                "/sessions/1/investments",
                json!({ "company_index": 7, "amount": 100.0 }),
            ),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(unknown).await["error"], "unknown_company");
    }

    #[tokio::test]
    async fn end_market_ranks_and_closes_trading() {
        let app = router(AppState::new());
        send(&app, post_json("/sessions", json!({ "class_id": "9A" }))).await;
        for (index, amount) in [(0, 800.0), (1, 200.0)] {
            send(
                &app,
                post_json(
                    "/sessions/1/investments",
                    json!({ "company_index": index, "amount": amount }),
                ),
            )
            .await;
        }

        let ended = send(&app, Request::post("/sessions/1/end").body(Body::empty()).unwrap()).await;
        assert_eq!(ended.status(), StatusCode::OK);
        let report = body_json(ended).await;
        assert_eq!(report["report"]["ranking"][0]["name"], "ECOSOL");
        assert_eq!(report["report"]["total"], 1_000.0);
        assert_eq!(report["report"]["average"], 200.0);

        let late = send(
            &app,
            post_json(
                "/sessions/1/investments",
                json!({ "company_index": 0, "amount": 100.0 }),
            ),
        )
        .await;
        assert_eq!(late.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(late).await["error"], "market_closed");
    }

    #[tokio::test]
    async fn reset_then_delete_returns_to_class_selection() {
        let app = router(AppState::new());
        send(&app, post_json("/sessions", json!({ "class_id": "9B" }))).await;

        let reset = send(
            &app,
            Request::post("/sessions/1/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(reset.status(), StatusCode::OK);
        assert_eq!(body_json(reset).await["generation"], 1);

        let deleted = send(&app, Request::delete("/sessions/1").body(Body::empty()).unwrap()).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let missing = send(&app, Request::get("/sessions/1").body(Body::empty()).unwrap()).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(missing).await["error"], "session_not_found");
    }

    #[tokio::test]
    async fn history_endpoints_serve_chart_data() {
        let app = router(AppState::new());
        send(&app, post_json("/sessions", json!({ "class_id": "9A" }))).await;
        send(
            &app,
            post_json(
                "/sessions/1/investments",
                json!({ "company_index": 2, "amount": 300.0 }),
            ),
        )
        .await;

        let company = send(
            &app,
            Request::get("/sessions/1/companies/2/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(company.status(), StatusCode::OK);
        assert_eq!(body_json(company).await["points"][1]["value"], 300.0);

        let missing = send(
            &app,
            Request::get("/sessions/1/companies/9/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let portfolio = send(
            &app,
            Request::get("/sessions/1/portfolio/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body_json(portfolio).await["points"][0]["value"], 300.0);

        let events = send(
            &app,
            Request::get("/sessions/1/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body_json(events).await["events"], json!([]));
    }

    #[tokio::test]
    async fn classes_lists_both_rosters() {
        let app = router(AppState::new());

        let response = send(&app, Request::get("/classes").body(Body::empty()).unwrap()).await;

        let body = body_json(response).await;
        assert_eq!(body[0]["class_id"], "9A");
        assert_eq!(body[1]["companies"][4], "ALFABANK");
    }
}
