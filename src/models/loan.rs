//! Loan model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan model from database
///
/// A loan with no `return_date` is open; the book it references cannot be
/// lent again until the loan is closed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    /// Overdue-ness is a read-time comparison, never a stored state.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.return_date.is_none() && today > self.due_date
    }
}

/// Loan payload for create and full-replace update
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoanInput {
    pub book_id: i32,
    pub user_id: i32,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}
