pub mod categorize;
pub mod common;
pub mod insights;
pub mod recurring;
pub mod spending;
