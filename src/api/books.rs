//! Catalog endpoints. Reads are public; writes require the admin role.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

use super::{AuthenticatedUser, MessageResponse};

/// Book list response
#[derive(Serialize, ToSchema)]
pub struct BooksResponse {
    pub success: bool,
    pub books: Vec<Book>,
}

/// Single book response
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub success: bool,
    pub book: Book,
}

/// List books with optional filters
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = BooksResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.catalog.list_books(&query).await?;

    Ok(Json(BooksResponse {
        success: true,
        books,
    }))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.catalog.get_book(id).await?;

    Ok(Json(BookResponse {
        success: true,
        book,
    }))
}

/// Add a book to the catalog (admin)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    state.services.auth.require_admin(identity.user_id).await?;

    let book = state.services.catalog.create_book(book).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            success: true,
            book,
        }),
    ))
}

/// Update a book (admin)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(book): Json<UpdateBook>,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth.require_admin(identity.user_id).await?;

    state.services.catalog.update_book(id, book).await?;

    Ok(Json(MessageResponse::ok("Book updated successfully")))
}

/// Delete a book (admin). Refused while the book is borrowed.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 400, description = "Book is currently borrowed"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth.require_admin(identity.user_id).await?;

    state.services.catalog.delete_book(id).await?;

    Ok(Json(MessageResponse::ok("Book deleted successfully")))
}
