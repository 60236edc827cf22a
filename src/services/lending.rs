//! Lending coordinator: the borrow/return workflows
//!
//! These are the only operations where two records must change together.
//! Atomicity and the "at most one open loan per book" invariant live in the
//! loans repository's transactions; this service just fronts them.

use crate::{
    error::AppResult,
    models::loan::{LoanRecord, LoanWithBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
}

impl LendingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for a user. Returns the new loan's ID.
    pub async fn borrow(&self, book_id: i32, user_id: i32) -> AppResult<i32> {
        let loan_id = self.repository.loans.borrow(book_id, user_id).await?;

        tracing::info!(book_id, user_id, loan_id, "book borrowed");

        Ok(loan_id)
    }

    /// Return a borrowed book
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<()> {
        self.repository.loans.return_loan(loan_id).await?;

        tracing::info!(loan_id, "book returned");

        Ok(())
    }

    /// A user's loan history, newest first
    pub async fn loans_for_user(&self, user_id: i32) -> AppResult<Vec<LoanWithBook>> {
        self.repository.loans.list_for_user(user_id).await
    }

    /// Every loan in the ledger, newest first
    pub async fn all_loans(&self) -> AppResult<Vec<LoanRecord>> {
        self.repository.loans.list_all().await
    }
}
