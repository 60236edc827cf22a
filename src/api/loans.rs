//! Lending endpoints: borrow, return and loan listings

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{BorrowBook, LoanRecord, LoanWithBook},
};

use super::{AuthenticatedUser, MessageResponse};

/// Borrow response
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub success: bool,
    pub message: String,
    /// ID of the newly created loan
    pub loan_id: i32,
}

/// The caller's loans joined with book fields
#[derive(Serialize, ToSchema)]
pub struct UserLoansResponse {
    pub success: bool,
    pub loans: Vec<LoanWithBook>,
}

/// All loans joined with book and borrower fields
#[derive(Serialize, ToSchema)]
pub struct AllLoansResponse {
    pub success: bool,
    pub loans: Vec<LoanRecord>,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = BorrowBook,
    responses(
        (status = 201, description = "Book borrowed", body = BorrowResponse),
        (status = 400, description = "Book is not available"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    Json(request): Json<BorrowBook>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let loan_id = state
        .services
        .lending
        .borrow(request.book_id, identity.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            success: true,
            message: "Book borrowed successfully".to_string(),
            loan_id,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    put,
    path = "/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 400, description = "Already returned"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    _identity: AuthenticatedUser,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.lending.return_loan(loan_id).await?;

    Ok(Json(MessageResponse::ok("Book returned successfully")))
}

/// List the caller's own loans
#[utoipa::path(
    get,
    path = "/loans/user",
    tag = "loans",
    responses(
        (status = 200, description = "The caller's loans", body = UserLoansResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
) -> AppResult<Json<UserLoansResponse>> {
    let loans = state.services.lending.loans_for_user(identity.user_id).await?;

    Ok(Json(UserLoansResponse {
        success: true,
        loans,
    }))
}

/// List every loan in the ledger (admin)
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "All loans", body = AllLoansResponse),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
) -> AppResult<Json<AllLoansResponse>> {
    state.services.auth.require_admin(identity.user_id).await?;

    let loans = state.services.lending.all_loans().await?;

    Ok(Json(AllLoansResponse {
        success: true,
        loans,
    }))
}
