use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub trait IndexRouter {
    fn route_index(self) -> Self;
}

impl<S> IndexRouter for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn route_index(self) -> Self {
        self.route(
            "/",
            get(|| async { Json(json!({ "message": "Hello World" })) }),
        )
    }
}

#[cfg(test)]
mod test {
    use super::IndexRouter;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn greets() {
        let router = Router::<()>::new().route_index();
        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "Hello World" }));
    }
}
