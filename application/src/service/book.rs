use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookId, BookPrice, BookQuantity, BookTitle,
};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

#[async_trait::async_trait]
pub trait GetBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery
{
    /// `None` when no book has the requested id.
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;

        Ok(book.map(BookDto::from))
    }

    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self.book_query().find_all(&mut connection).await?;

        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let draft = BookDraft::from(dto);
        let created = self
            .book_modifier()
            .create(&mut connection, &draft)
            .await
            .map(|id| draft.into_book(id));

        let book = commit_or_roll_back(connection, created).await?;
        tracing::debug!("Created book {}", book.id());
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
    /// Overwrites title, author, price and qty of an existing book.
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let draft = BookDraft::new(
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookPrice::new(dto.price),
            BookQuantity::new(dto.qty),
        );
        let updated = async {
            let book = self
                .book_query()
                .find_by_id(&mut connection, &id)
                .await?
                .ok_or_else(|| not_found(&id))?
                .overwrite(draft);
            self.book_modifier().update(&mut connection, &book).await?;
            Ok::<_, Report<KernelError>>(book)
        }
        .await;

        let book = commit_or_roll_back(connection, updated).await?;
        tracing::info!("Book {} updated successfully", book.id());
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let deleted = async {
            let book = self
                .book_query()
                .find_by_id(&mut connection, &id)
                .await?
                .ok_or_else(|| not_found(&id))?;
            self.book_modifier()
                .delete(&mut connection, book.id())
                .await
        }
        .await;

        commit_or_roll_back(connection, deleted).await?;
        tracing::info!("Book {id} deleted successfully");
        Ok(())
    }
}

impl<T> DeleteBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}

fn not_found(id: &BookId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("No book with id {id}"))
}

async fn commit_or_roll_back<T, Tx>(
    transaction: Tx,
    result: error_stack::Result<T, KernelError>,
) -> error_stack::Result<T, KernelError>
where
    T: Send,
    Tx: Transaction,
{
    match result {
        Ok(value) => {
            transaction.commit().await?;
            Ok(value)
        }
        Err(report) => {
            if let Err(error) = transaction.roll_back().await {
                tracing::error!("Failed to roll back transaction: {error:?}");
            }
            Err(report)
        }
    }
}
