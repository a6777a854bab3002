//! Data models for the Libris REST API

pub mod book;
pub mod book_detail;
pub mod loan;
pub mod review;
pub mod user;
