use crate::controller::Exhaust;
use application::transfer::BookDto;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: i64,
    title: String,
    author: String,
    price: f64,
    qty: i32,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            price: value.price,
            qty: value.qty,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

/// Answer to create and edit: the id next to the stored record.
#[derive(Debug, Serialize)]
pub struct BookDataResponse {
    id: i64,
    data: BookResponse,
}

impl IntoResponse for BookDataResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    result: &'static str,
}

impl ResultResponse {
    pub fn ok() -> Self {
        Self { result: "ok" }
    }

    pub fn no_book_found() -> Self {
        Self {
            result: "no book found",
        }
    }
}

impl IntoResponse for ResultResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<()> for BookPresenter {
    type To = ResultResponse;
    fn emit(&self, _: ()) -> Self::To {
        ResultResponse::ok()
    }
}

impl Exhaust<BookDto> for BookPresenter {
    type To = BookDataResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookDataResponse {
            id: input.id,
            data: BookResponse::from(input),
        }
    }
}

impl Exhaust<Option<BookDto>> for BookPresenter {
    type To = Option<BookResponse>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        input.map(BookResponse::from)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = axum::Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        axum::Json::from(result)
    }
}

#[cfg(test)]
mod test {
    use super::{BookPresenter, ResultResponse};
    use crate::controller::Exhaust;
    use application::transfer::BookDto;
    use serde_json::json;

    fn dune() -> BookDto {
        BookDto {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            price: 9.99,
            qty: 3,
        }
    }

    #[test]
    fn saved_book_is_wrapped_with_its_id() {
        let response = BookPresenter.emit(dune());
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "id": 1,
                "data": {"id": 1, "title": "Dune", "author": "Herbert", "price": 9.99, "qty": 3}
            })
        );
    }

    #[test]
    fn list_keeps_service_order() {
        let mut second = dune();
        second.id = 2;
        let axum::Json(list) = BookPresenter.emit(vec![second, dune()]);
        let ids = list
            .into_iter()
            .map(|book| serde_json::to_value(book).unwrap()["id"].clone())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![json!(2), json!(1)]);
    }

    #[test]
    fn result_payloads() {
        assert_eq!(
            serde_json::to_value(BookPresenter.emit(())).unwrap(),
            json!({"result": "ok"})
        );
        assert_eq!(
            serde_json::to_value(ResultResponse::no_book_found()).unwrap(),
            json!({"result": "no book found"})
        );
    }
}
