//! Loan management service
//!
//! Composes the pure lifecycle rules with the repository. The availability
//! check here is the fast path for a friendly error; the partial unique
//! index in the schema settles any check-then-act race.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanInput},
    repository::Repository,
    validation::{
        first_violation,
        loan::{can_create, validate_loan_dates, validate_return, LoanState},
        ValidationError, ValidationStore,
    },
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        self.repository.loans.get_by_id(id).await
    }

    pub async fn get_all(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.get_all().await
    }

    /// Get loans for a user; empty history is a 404, matching the
    /// established API contract.
    pub async fn get_user_loans(&self, user_id: i32) -> AppResult<Vec<Loan>> {
        let loans = self.repository.loans.get_by_user(user_id).await?;
        if loans.is_empty() {
            return Err(AppError::NotFound(format!(
                "No loans found for user with id {}",
                user_id
            )));
        }
        Ok(loans)
    }

    /// Create a loan: legal only while the book is Available.
    pub async fn create(&self, loan: LoanInput) -> AppResult<Loan> {
        first_violation(validate_loan_dates(&loan))?;

        if !self.repository.book_exists(loan.book_id).await? {
            return Err(ValidationError::BookMissing(loan.book_id).into_app_error());
        }
        if !self.repository.user_exists(loan.user_id).await? {
            return Err(ValidationError::UserMissing(loan.user_id).into_app_error());
        }

        let state =
            LoanState::from_open_loan(self.repository.loans.open_loan_exists(loan.book_id).await?);
        if !can_create(state) {
            return Err(AppError::Conflict(format!(
                "Book with id {} is not available for loan",
                loan.book_id
            )));
        }

        tracing::info!(book_id = loan.book_id, user_id = loan.user_id, "creating loan");
        self.repository.loans.create(&loan).await
    }

    /// Full-replace update; date ordering is re-validated.
    pub async fn update(&self, id: i32, loan: LoanInput) -> AppResult<Loan> {
        self.repository.loans.get_by_id(id).await?;
        first_violation(validate_loan_dates(&loan))?;
        self.repository.loans.update(id, &loan).await
    }

    /// Return a borrowed book: close the loan with today's date.
    pub async fn return_loan(&self, id: i32) -> AppResult<Loan> {
        let loan = self.repository.loans.get_by_id(id).await?;

        let return_date = Utc::now().date_naive();
        first_violation(validate_return(loan.loan_date, return_date))?;

        tracing::info!(loan_id = id, book_id = loan.book_id, "returning loan");
        self.repository.loans.set_return_date(id, return_date).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.loans.delete(id).await
    }
}
