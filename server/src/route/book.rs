use crate::controller::Controller;
use crate::error::{ErrorStatus, Operation};
use crate::handler::AppModule;
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookRequest, UpdateBookRequest,
};
use crate::response::{BookPresenter, ResultResponse};
use application::service::{
    CreateBookService, DeleteBookService, GetBookService, UpdateBookService,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get, put};
use axum::{Json, Router};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        let collection = get(|State(module): State<AppModule>| async move {
            Controller::new((), BookPresenter)
                .bypass(|| async move { module.pgpool().get_all_books().await })
                .await
                .map_err(ErrorStatus::on(Operation::GetBook))
        })
        .post(
            |State(module): State<AppModule>,
             req: Result<Json<CreateBookRequest>, JsonRejection>| async move {
                let Json(req) = req.map_err(|rejection| {
                    ErrorStatus::invalid(Operation::CreateBook, rejection.body_text())
                })?;
                Controller::new(BookTransformer, BookPresenter)
                    .intake(req)
                    .handle(|dto| async move { module.pgpool().create_book(dto).await })
                    .await
                    .map_err(ErrorStatus::on(Operation::CreateBook))
            },
        );

        self.route("/books", collection.clone())
            .route("/books/", collection)
            .route(
                "/books/:id",
                get(
                    |State(module): State<AppModule>,
                     id: Result<Path<i64>, PathRejection>| async move {
                        let Path(id) = id.map_err(|rejection| {
                            ErrorStatus::invalid(Operation::GetBook, rejection.body_text())
                        })?;
                        let strict = module.config().strict_not_found();
                        Controller::new(BookTransformer, BookPresenter)
                            .intake(GetBookRequest::new(id))
                            .handle(|dto| async move { module.pgpool().get_book(dto).await })
                            .await
                            .map_err(ErrorStatus::on(Operation::GetBook))
                            .and_then(|res| match res {
                                Some(book) => Ok(book.into_response()),
                                None if strict => Err(ErrorStatus::not_found(Operation::GetBook)),
                                None => Ok(ResultResponse::no_book_found().into_response()),
                            })
                    },
                ),
            )
            .route(
                "/books/:id/edit",
                put(
                    |State(module): State<AppModule>,
                     id: Result<Path<i64>, PathRejection>,
                     req: Result<Json<UpdateBookRequest>, JsonRejection>| async move {
                        let Path(id) = id.map_err(|rejection| {
                            ErrorStatus::invalid(Operation::UpdateBook, rejection.body_text())
                        })?;
                        let Json(req) = req.map_err(|rejection| {
                            ErrorStatus::invalid(Operation::UpdateBook, rejection.body_text())
                        })?;
                        Controller::new(BookTransformer, BookPresenter)
                            .intake((id, req))
                            .handle(|dto| async move { module.pgpool().update_book(dto).await })
                            .await
                            .map_err(ErrorStatus::on(Operation::UpdateBook))
                    },
                ),
            )
            .route(
                "/books/:id/delete",
                delete(
                    |State(module): State<AppModule>,
                     id: Result<Path<i64>, PathRejection>| async move {
                        let Path(id) = id.map_err(|rejection| {
                            ErrorStatus::invalid(Operation::DeleteBook, rejection.body_text())
                        })?;
                        Controller::new(BookTransformer, BookPresenter)
                            .intake(DeleteBookRequest::new(id))
                            .handle(|dto| async move { module.pgpool().delete_book(dto).await })
                            .await
                            .map_err(ErrorStatus::on(Operation::DeleteBook))
                    },
                ),
            )
    }
}

#[cfg(test)]
mod test {
    use crate::config::ServerConfig;
    use crate::handler::AppModule;
    use crate::route::router;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map_or_else(Body::empty, |body| Body::from(body.to_string()));
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn router_with(config: ServerConfig) -> Router {
        let module = AppModule::new(config).await.unwrap();
        router(module)
    }

    fn dune(qty: i32) -> Value {
        json!({"title": "Dune", "author": "Herbert", "price": 9.99, "qty": qty})
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn book_lifecycle() {
        let router = router_with(ServerConfig::default()).await;

        let (status, created) = call(&router, Method::POST, "/books/", Some(dune(3))).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_i64().unwrap();
        assert!(id > 0);
        assert_eq!(
            created["data"],
            json!({"id": id, "title": "Dune", "author": "Herbert", "price": 9.99, "qty": 3})
        );

        let (status, found) = call(&router, Method::GET, &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, created["data"]);

        let (status, updated) = call(
            &router,
            Method::PUT,
            &format!("/books/{id}/edit"),
            Some(dune(5)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], json!(id));
        assert_eq!(updated["data"]["qty"], json!(5));

        let (_, found) = call(&router, Method::GET, &format!("/books/{id}"), None).await;
        assert_eq!(found["qty"], json!(5));
        assert_eq!(found["id"], json!(id));

        let (status, deleted) =
            call(&router, Method::DELETE, &format!("/books/{id}/delete"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!({"result": "ok"}));

        let (status, missing) = call(&router, Method::GET, &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(missing, json!({"result": "no book found"}));
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn list_puts_newest_first() {
        let router = router_with(ServerConfig::default()).await;

        let (_, a) = call(&router, Method::POST, "/books", Some(dune(1))).await;
        let (_, b) = call(&router, Method::POST, "/books", Some(dune(2))).await;

        let (status, list) = call(&router, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids = list
            .as_array()
            .unwrap()
            .iter()
            .map(|book| book["id"].clone())
            .collect::<Vec<_>>();
        let position = |id: &Value| ids.iter().position(|other| other == id);
        assert!(position(&b["id"]) < position(&a["id"]));
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn missing_book_on_edit_and_delete_is_404() {
        let router = router_with(ServerConfig::default()).await;

        let (status, body) = call(
            &router,
            Method::PUT,
            &format!("/books/{}/edit", i64::MAX),
            Some(dune(1)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("Book not found"));

        let (status, _) = call(
            &router,
            Method::DELETE,
            &format!("/books/{}/delete", i64::MAX),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn strict_mode_turns_missing_get_into_404() {
        let router = router_with(ServerConfig::new(8000, true)).await;

        let (status, body) = call(&router, Method::GET, &format!("/books/{}", i64::MAX), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Book not found"}));
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn malformed_input_is_422() {
        let router = router_with(ServerConfig::default()).await;

        let (status, _) = call(
            &router,
            Method::POST,
            "/books",
            Some(json!({"title": "Dune"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(&router, Method::GET, "/books/not-a-number", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
