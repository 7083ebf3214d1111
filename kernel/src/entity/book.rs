mod author;
mod id;
mod price;
mod quantity;
mod title;

pub use self::{author::*, id::*, price::*, quantity::*, title::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    price: BookPrice,
    qty: BookQuantity,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        price: BookPrice,
        qty: BookQuantity,
    ) -> Self {
        Self {
            id,
            title,
            author,
            price,
            qty,
        }
    }

    /// Replaces every field except the id with the content of `draft`.
    pub fn overwrite(self, draft: BookDraft) -> Self {
        draft.into_book(self.id)
    }
}

/// A book that has not been stored yet. The store assigns its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct BookDraft {
    title: BookTitle,
    author: BookAuthor,
    price: BookPrice,
    qty: BookQuantity,
}

impl BookDraft {
    pub fn new(title: BookTitle, author: BookAuthor, price: BookPrice, qty: BookQuantity) -> Self {
        Self {
            title,
            author,
            price,
            qty,
        }
    }

    pub fn into_book(self, id: BookId) -> Book {
        let DestructBookDraft {
            title,
            author,
            price,
            qty,
        } = self.into_destruct();
        Book::new(id, title, author, price, qty)
    }
}
