//! Book detail model and the genre enumeration

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Supported genres (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Biography,
    History,
    Children,
    Fantasy,
    Other,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Biography => "Biography",
            Genre::History => "History",
            Genre::Children => "Children",
            Genre::Fantasy => "Fantasy",
            Genre::Other => "Other",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fiction" => Ok(Genre::Fiction),
            "Non-Fiction" => Ok(Genre::NonFiction),
            "Science Fiction" => Ok(Genre::ScienceFiction),
            "Biography" => Ok(Genre::Biography),
            "History" => Ok(Genre::History),
            "Children" => Ok(Genre::Children),
            "Fantasy" => Ok(Genre::Fantasy),
            "Other" => Ok(Genre::Other),
            _ => Err(format!("Unsupported genre: {}", s)),
        }
    }
}

// SQLx conversion: genres are stored as plain text
impl sqlx::Type<Postgres> for Genre {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Genre {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Genre {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Book detail model from database
///
/// A book may carry one detail record per genre; `(book_id, genre)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub book_id: i32,
    pub genre: Genre,
    pub summary: String,
    pub cover_image_url: String,
}

/// Book detail payload for create and full-replace update
///
/// The genre arrives as a raw string so the validation engine can report an
/// unsupported value instead of failing at deserialization.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookDetailInput {
    pub book_id: i32,
    pub genre: String,
    pub summary: String,
    pub cover_image_url: String,
}
