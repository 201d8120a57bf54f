//! Row-level authorization for customer records.
//!
//! Everything here is pure: the filter never touches storage. The customer
//! service looks records up first and hands them in as the target.

pub mod models;
pub mod policy;

pub use models::AccessDecision;
pub use models::AccessError;
pub use models::AccessScope;
pub use models::Operation;
pub use models::Owned;
pub use models::Principal;
pub use policy::authorize;
pub use policy::decide;
pub use policy::require_administrator;
