//! Loan lifecycle rules
//!
//! A book's lending state is derived from its loan rows, never stored: no
//! open loan means Available, exactly one open loan means OnLoan. These
//! checks are the fast path; the partial unique index on open loans is the
//! authority under concurrent requests (see migrations).

use chrono::NaiveDate;

use crate::models::loan::LoanInput;

use super::ValidationError;

/// Derived lending state of a single book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanState {
    Available,
    OnLoan,
}

impl LoanState {
    /// Derive the state from whether an open loan row exists for the book.
    pub fn from_open_loan(open_loan_exists: bool) -> Self {
        if open_loan_exists {
            LoanState::OnLoan
        } else {
            LoanState::Available
        }
    }
}

/// Creating a loan is only legal from Available.
pub fn can_create(state: LoanState) -> bool {
    state == LoanState::Available
}

/// Date-ordering rules for a loan payload (create or full-replace update).
pub fn validate_loan_dates(loan: &LoanInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if loan.due_date < loan.loan_date {
        errors.push(ValidationError::DueBeforeLoanDate);
    }
    if let Some(return_date) = loan.return_date {
        if return_date < loan.loan_date {
            errors.push(ValidationError::ReturnBeforeLoanDate);
        }
    }
    errors
}

/// Check a return against the loan being closed.
pub fn validate_return(loan_date: NaiveDate, return_date: NaiveDate) -> Vec<ValidationError> {
    if return_date < loan_date {
        vec![ValidationError::ReturnBeforeLoanDate]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(loan_day: u32, due_day: u32, return_day: Option<u32>) -> LoanInput {
        LoanInput {
            book_id: 1,
            user_id: 10,
            loan_date: date(2024, 5, loan_day),
            due_date: date(2024, 5, due_day),
            return_date: return_day.map(|d| date(2024, 5, d)),
        }
    }

    #[test]
    fn state_is_derived_from_open_loans() {
        assert_eq!(LoanState::from_open_loan(false), LoanState::Available);
        assert_eq!(LoanState::from_open_loan(true), LoanState::OnLoan);
    }

    #[test]
    fn create_only_legal_from_available() {
        assert!(can_create(LoanState::Available));
        assert!(!can_create(LoanState::OnLoan));
    }

    #[test]
    fn lifecycle_available_onloan_available() {
        // Available book: loan may be created.
        let mut state = LoanState::from_open_loan(false);
        assert!(can_create(state));

        // Once the loan is open, a second create is illegal.
        state = LoanState::from_open_loan(true);
        assert!(!can_create(state));

        // After the return closes the loan, the book is lendable again.
        state = LoanState::from_open_loan(false);
        assert!(can_create(state));
    }

    #[test]
    fn due_date_may_not_precede_loan_date() {
        assert!(validate_loan_dates(&loan(10, 20, None)).is_empty());
        assert!(validate_loan_dates(&loan(10, 10, None)).is_empty());
        assert_eq!(
            validate_loan_dates(&loan(10, 9, None)),
            vec![ValidationError::DueBeforeLoanDate]
        );
    }

    #[test]
    fn supplied_return_date_may_not_precede_loan_date() {
        assert!(validate_loan_dates(&loan(10, 20, Some(15))).is_empty());
        assert_eq!(
            validate_loan_dates(&loan(10, 20, Some(9))),
            vec![ValidationError::ReturnBeforeLoanDate]
        );
    }

    #[test]
    fn both_date_violations_are_collected() {
        assert_eq!(
            validate_loan_dates(&loan(10, 9, Some(8))),
            vec![
                ValidationError::DueBeforeLoanDate,
                ValidationError::ReturnBeforeLoanDate,
            ]
        );
    }

    #[test]
    fn return_date_checked_against_loan_date() {
        assert!(validate_return(date(2024, 5, 10), date(2024, 5, 10)).is_empty());
        assert!(validate_return(date(2024, 5, 10), date(2024, 5, 12)).is_empty());
        assert_eq!(
            validate_return(date(2024, 5, 10), date(2024, 5, 9)),
            vec![ValidationError::ReturnBeforeLoanDate]
        );
    }
}
