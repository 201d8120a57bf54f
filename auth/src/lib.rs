//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the customer service:
//! - Password hashing (Argon2id, with verification of legacy bcrypt hashes)
//! - Signed, time-limited identity tokens (HS256)
//! - The canonical [`Role`] vocabulary
//!
//! Nothing here performs I/O; persistence and request handling live in the
//! service crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Role, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::days(7));
//! let issued = issuer.issue(5, "alice", Role::SalesExecutive).unwrap();
//!
//! let claims = issuer.verify(&issued.access_token).unwrap();
//! assert_eq!(claims.sub, 5);
//! assert_eq!(claims.role, Role::SalesExecutive);
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;
pub mod roles;

// Re-export commonly used items
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::DEFAULT_TOKEN_LIFETIME_HOURS;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use roles::Role;
pub use roles::UnknownRoleError;
