//! Authentication infrastructure library.
//!
//! Building blocks the identity service composes into its auth flows:
//! - Password hashing and verification (Argon2id, salted PHC strings)
//! - Access-token issuance and verification (HS256, bounded lifetime)
//!
//! The token API takes the current time as an argument rather than reading
//! the wall clock, so validity windows can be exercised deterministically.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::{Duration, Utc};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//! let now = Utc::now();
//! let token = issuer.issue("42", now).unwrap();
//! let claims = issuer.verify(&token, now).unwrap();
//! assert_eq!(claims.sub, "42");
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
