//! Data models for Vellum

pub mod book;
pub mod loan;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use book::{Availability, Book};
pub use loan::{LoanRecord, LoanWithBook};
pub use session::Session;
pub use user::{Role, User, UserInfo};
