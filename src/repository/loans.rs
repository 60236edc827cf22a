//! Loans repository for database operations
//!
//! Borrow and return are the only multi-row writes in the system. Both run
//! inside a transaction with a `FOR UPDATE` lock on the row whose state is
//! checked, so concurrent attempts on the same book or loan serialize and
//! exactly one observes the precondition.

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Availability,
        loan::{LoanRecord, LoanWithBook},
    },
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrow a book: flip its availability and insert an open loan, as one
    /// atomic unit. Returns the new loan's ID.
    pub async fn borrow(&self, book_id: i32, user_id: i32) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT availability FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        let availability: Availability = row.get("availability");
        if availability != Availability::Available {
            return Err(AppError::Conflict(
                "Book is not available for borrowing".to_string(),
            ));
        }

        sqlx::query("UPDATE books SET availability = $1 WHERE id = $2")
            .bind(Availability::Borrowed)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        let loan_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO loans (book_id, user_id, loan_date)
            VALUES ($1, $2, NOW())
            RETURNING id
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(loan_id)
    }

    /// Return a loan: stamp `returned_date` and free the book, as one atomic
    /// unit.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT book_id, returned_date FROM loans WHERE id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))?;

        let returned_date: Option<chrono::DateTime<chrono::Utc>> = row.get("returned_date");
        if returned_date.is_some() {
            return Err(AppError::Conflict(
                "Book has already been returned".to_string(),
            ));
        }

        let book_id: i32 = row.get("book_id");

        sqlx::query("UPDATE loans SET returned_date = NOW() WHERE id = $1")
            .bind(loan_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE books SET availability = $1 WHERE id = $2")
            .bind(Availability::Available)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// All loans for a user (open and closed), newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<LoanWithBook>> {
        let loans = sqlx::query_as::<_, LoanWithBook>(
            r#"
            SELECT l.id, l.book_id, b.title, b.author, b.genre,
                   l.loan_date, l.returned_date
            FROM loans l
            JOIN books b ON l.book_id = b.id
            WHERE l.user_id = $1
            ORDER BY l.loan_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// All loans across all users, joined with book and borrower fields,
    /// newest first
    pub async fn list_all(&self) -> AppResult<Vec<LoanRecord>> {
        let loans = sqlx::query_as::<_, LoanRecord>(
            r#"
            SELECT l.id, l.book_id, b.title, b.author,
                   u.id as user_id, u.name as user_name, u.email as user_email,
                   l.loan_date, l.returned_date
            FROM loans l
            JOIN books b ON l.book_id = b.id
            JOIN users u ON l.user_id = u.id
            ORDER BY l.loan_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }
}
