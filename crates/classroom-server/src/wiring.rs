use api::AppSettings;
use axum::{routing::get, Router};

pub fn build_app(settings: AppSettings) -> Router {
    api::app(api::AppState::with_settings(settings)).route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use api::AppSettings;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use session::EVENT_HISTORY_CSV_HEADER;
    use tower::ServiceExt;

    #[tokio::test]
    async fn server_healthcheck_responds_ok() {
        let app = super::build_app(AppSettings::default());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn ending_a_market_appends_its_history() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("classroom-wiring-{unique}.csv"));
        let app = super::build_app(AppSettings {
            history_output: Some(path.clone()),
            ..AppSettings::default()
        });

        let created = app
            .clone()
            .oneshot(
                Request::post("/sessions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"class_id":"9A"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let ended = app
            .oneshot(Request::post("/sessions/1/end").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ended.status(), StatusCode::OK);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, EVENT_HISTORY_CSV_HEADER);

        fs::remove_file(&path).unwrap();
    }
}
