//! Data models

pub mod book;
pub mod loan;
pub mod patron;
