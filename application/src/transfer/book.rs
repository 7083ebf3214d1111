use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookPrice, BookQuantity, BookTitle, DestructBook,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub qty: i32,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            price,
            qty,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            price: price.into(),
            qty: qty.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: i64,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub qty: i32,
}

impl From<CreateBookDto> for BookDraft {
    fn from(value: CreateBookDto) -> Self {
        BookDraft::new(
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookPrice::new(value.price),
            BookQuantity::new(value.qty),
        )
    }
}

pub struct UpdateBookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub qty: i32,
}

pub struct DeleteBookDto {
    pub id: i64,
}
