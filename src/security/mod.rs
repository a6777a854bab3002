//! Access control: token issuance/verification and the authorization matrix

pub mod middleware;
pub mod rules;
pub mod token;

pub use rules::{access_rules, AccessRule};
pub use token::{Principal, TokenError};
