//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vellum API",
        version = "0.3.0",
        description = "Library Catalog and Lending REST API",
        license(name = "MIT")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::logout,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Loans
        loans::borrow_book,
        loans::return_loan,
        loans::my_loans,
        loans::list_loans,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::reset_password,
    ),
    components(
        schemas(
            // Auth
            auth::RegisterResponse,
            auth::LoginResponse,
            crate::models::user::RegisterUser,
            crate::models::user::Credentials,
            // Books
            books::BooksResponse,
            books::BookResponse,
            crate::models::book::Book,
            crate::models::book::Availability,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Loans
            loans::BorrowResponse,
            loans::UserLoansResponse,
            loans::AllLoansResponse,
            crate::models::loan::BorrowBook,
            crate::models::loan::LoanWithBook,
            crate::models::loan::LoanRecord,
            // Users
            users::UsersResponse,
            users::UserResponse,
            crate::models::user::UserInfo,
            crate::models::user::Role,
            crate::models::user::UpdateUser,
            crate::models::user::ResetPassword,
            // Health
            health::HealthResponse,
            // Envelope
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and sessions"),
        (name = "books", description = "Catalog management"),
        (name = "loans", description = "Borrow and return"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
