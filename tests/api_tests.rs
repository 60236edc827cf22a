//! API integration tests
//!
//! These run against a live server (`cargo run`) with a provisioned admin
//! account (admin@example.com / admin123). Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:3000/api";

/// Client with a cookie store, so the session cookie set at login is sent on
/// subsequent requests
fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

/// A unique email per test run, since emails must be unique
fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}@example.com", prefix, nanos)
}

/// Register a fresh user and log the client in. Returns the user id.
async fn register_and_login(client: &Client, email: &str, password: &str) -> i64 {
    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&json!({
            "name": "Test User",
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let user_id = body["user_id"].as_i64().expect("No user id");

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    user_id
}

/// Log in as the provisioned admin
async fn admin_client() -> Client {
    let client = new_client();
    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "email": "admin@example.com",
            "password": "admin123"
        }))
        .send()
        .await
        .expect("Failed to send admin login request");
    assert!(response.status().is_success(), "admin account must be provisioned");
    client
}

/// Create a book as admin, returning its id
async fn create_book(admin: &Client, title: &str) -> i64 {
    let response = admin
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Frank Herbert",
            "genre": "Science Fiction"
        }))
        .send()
        .await
        .expect("Failed to send create book request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["book"]["id"].as_i64().expect("No book id")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_login_wrong_then_right_password() {
    let client = new_client();
    let email = unique_email("auth");

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&json!({
            "name": "A",
            "email": email,
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Wrong password is rejected
    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({ "email": email, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    // Correct password establishes a session
    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({ "email": email, "password": "secret1" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["role"], "user");

    // And the session grants access to /loans/user
    let response = client
        .get(format!("{}/loans/user", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_rejected() {
    let client = new_client();
    let email = unique_email("dup");

    let payload = json!({
        "name": "A",
        "email": email,
        "password": "secret1"
    });

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_short_password_rejected() {
    let client = new_client();

    let response = client
        .post(format!("{}/register", BASE_URL))
        .json(&json!({
            "name": "A",
            "email": unique_email("short"),
            "password": "12345"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_books_are_public_but_writes_are_not() {
    let client = Client::new();

    // Anyone can list
    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].is_array());

    // Unauthenticated create is rejected before any role check
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "X",
            "author": "Y",
            "genre": "Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_regular_user_cannot_manage_books() {
    let client = new_client();
    register_and_login(&client, &unique_email("nonadmin"), "secret1").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "X",
            "author": "Y",
            "genre": "Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_borrow_return_lifecycle() {
    let admin = admin_client().await;
    let book_id = create_book(&admin, "Dune").await;

    let u1 = new_client();
    register_and_login(&u1, &unique_email("borrower1"), "secret1").await;

    let u2 = new_client();
    register_and_login(&u2, &unique_email("borrower2"), "secret1").await;

    // U1 borrows: book flips to borrowed
    let response = u1
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let loan_id = body["loan_id"].as_i64().expect("No loan id");

    let response = u1
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["availability"], "borrowed");

    // The open loan shows up with a null return date
    let response = u1
        .get(format!("{}/loans/user", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let loan = body["loans"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["id"].as_i64() == Some(loan_id))
        .expect("Loan not listed");
    assert!(loan["returned_date"].is_null());

    // U2 cannot borrow the same book
    let response = u2
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // U1 returns: book is available again
    let response = u1
        .put(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = u1
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["availability"], "available");

    // A second return of the same loan is rejected
    let response = u1
        .put(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // And now U2 can borrow it
    let response = u2
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_borrow_missing_book_is_404() {
    let client = new_client();
    register_and_login(&client, &unique_email("missing"), "secret1").await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": 999999 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_guards() {
    let admin = admin_client().await;
    let book_id = create_book(&admin, "Guarded").await;

    let borrower = new_client();
    let borrower_id =
        register_and_login(&borrower, &unique_email("guard"), "secret1").await;

    let response = borrower
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // A borrowed book cannot be deleted
    let response = admin
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // A user with an open loan cannot be deleted
    let response = admin
        .delete(format!("{}/users/{}", BASE_URL, borrower_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // The refused deletes left everything intact: the book still exists,
    // still borrowed, and the open loan was not cascaded away
    let response = admin
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["availability"], "borrowed");

    let response = borrower
        .get(format!("{}/loans/user", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let open = body["loans"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["book_id"].as_i64() == Some(book_id) && l["returned_date"].is_null());
    assert!(open, "open loan must survive the refused delete");
}

#[tokio::test]
#[ignore]
async fn test_update_user_rejects_taken_email() {
    let admin = admin_client().await;

    let first_email = unique_email("taken");
    let first = new_client();
    register_and_login(&first, &first_email, "secret1").await;

    let second = new_client();
    let second_id = register_and_login(&second, &unique_email("claimant"), "secret1").await;

    // Moving the second user onto the first one's email is refused
    let response = admin
        .put(format!("{}/users/{}", BASE_URL, second_id))
        .json(&json!({
            "name": "Claimant",
            "email": first_email,
            "role": "user"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);

    // Updating to a fresh email still works
    let response = admin
        .put(format!("{}/users/{}", BASE_URL, second_id))
        .json(&json!({
            "name": "Claimant",
            "email": unique_email("fresh"),
            "role": "user"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_admin_loan_listing_joins_book_and_borrower() {
    let admin = admin_client().await;
    let book_id = create_book(&admin, "Ledger Entry").await;

    let email = unique_email("ledger");
    let borrower = new_client();
    let borrower_id = register_and_login(&borrower, &email, "secret1").await;

    let response = borrower
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let loan_id = body["loan_id"].as_i64().expect("No loan id");

    // A regular user is refused the full ledger
    let response = borrower
        .get(format!("{}/loans", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // The admin view joins book and borrower fields onto the loan
    let response = admin
        .get(format!("{}/loans", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let loan = body["loans"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["id"].as_i64() == Some(loan_id))
        .expect("Loan not in admin listing");

    assert_eq!(loan["book_id"].as_i64(), Some(book_id));
    assert_eq!(loan["title"], "Ledger Entry");
    assert_eq!(loan["author"], "Frank Herbert");
    assert_eq!(loan["user_id"].as_i64(), Some(borrower_id));
    assert_eq!(loan["user_name"], "Test User");
    assert_eq!(loan["user_email"], email.as_str());
    assert!(loan["returned_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_admin_cannot_delete_own_account() {
    let admin = admin_client().await;

    // Find the admin's own id in the user list
    let response = admin
        .get(format!("{}/users", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let admin_id = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == "admin@example.com")
        .and_then(|u| u["id"].as_i64())
        .expect("Admin not in user list");

    let response = admin
        .delete(format!("{}/users/{}", BASE_URL, admin_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_logout_invalidates_session() {
    let client = new_client();
    register_and_login(&client, &unique_email("logout"), "secret1").await;

    let response = client
        .post(format!("{}/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/loans/user", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_catalog_filters() {
    let admin = admin_client().await;
    let marker = format!("Filterable-{}", unique_email(""));
    create_book(&admin, &marker).await;

    let client = Client::new();
    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("title", marker.as_str()), ("author", "herbert")])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], marker.as_str());
}

#[tokio::test]
#[ignore]
async fn test_reset_password_validation() {
    let admin = admin_client().await;

    let target = new_client();
    let target_id = register_and_login(&target, &unique_email("reset"), "secret1").await;

    // Too short
    let response = admin
        .post(format!("{}/users/{}/reset-password", BASE_URL, target_id))
        .json(&json!({ "new_password": "12345" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Long enough
    let response = admin
        .post(format!("{}/users/{}/reset-password", BASE_URL, target_id))
        .json(&json!({ "new_password": "newsecret" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}
