//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user's loan joined with the borrowed book's fields. A loan is open
/// while `returned_date` is null.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanWithBook {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub loan_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
}

/// Admin view: a loan joined with book and borrower fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanRecord {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub loan_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
}

/// Borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowBook {
    pub book_id: i32,
}
