//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book availability state. A book is `borrowed` exactly while one open loan
/// references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Borrowed,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Borrowed => "borrowed",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Availability::Available),
            "borrowed" => Ok(Availability::Borrowed),
            _ => Err(format!("Invalid availability: {}", s)),
        }
    }
}

// SQLx conversion: stored as a plain string column
impl sqlx::Type<Postgres> for Availability {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Availability {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Availability {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub availability: Availability,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
}

/// Update book request (full field set)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    pub availability: Availability,
}

/// Catalog search filters, combined with logical AND
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Case-insensitive title substring
    pub title: Option<String>,
    /// Case-insensitive author substring
    pub author: Option<String>,
    /// Case-insensitive genre substring
    pub genre: Option<String>,
    /// Exact availability match
    pub availability: Option<Availability>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_round_trips_through_strings() {
        assert_eq!("available".parse::<Availability>(), Ok(Availability::Available));
        assert_eq!("BORROWED".parse::<Availability>(), Ok(Availability::Borrowed));
        assert_eq!(Availability::Borrowed.as_str(), "borrowed");
        assert!("lost".parse::<Availability>().is_err());
    }

    #[test]
    fn create_book_rejects_empty_title() {
        use validator::Validate;

        let book = CreateBook {
            title: String::new(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
        };
        assert!(book.validate().is_err());
    }
}
