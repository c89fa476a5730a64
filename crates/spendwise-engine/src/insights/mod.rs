//! Transaction classification and analytics core.
//!
//! Every function here is a pure transformation over an in-memory feed. Bad or
//! missing data degrades to `Other`, skipped rows or empty results; nothing in
//! this module returns an error.

pub mod categorize;
pub mod date;
pub mod normalize;
pub mod policy;
pub mod recurring;
pub mod rules;
pub mod spending;
pub mod types;

pub use categorize::{add_categories, add_categories_with, categorize, categorize_with, is_transfer};
pub use date::{CadenceKind, previous_window};
pub use normalize::{categorization_key, normalize_merchant, transfer_reason};
pub use recurring::{RecurringCommitment, detect_recurring_commitments};
pub use rules::{Category, CategoryRule, RuleTable};
pub use spending::{category_deltas, spending_by_category};
pub use types::{CategoryDelta, CategoryTotal, Transaction, Window};
