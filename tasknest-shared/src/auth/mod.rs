/// Authentication and authorization utilities
///
/// This module provides the authentication primitives for TaskNest:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Signed-cookie session issuance, revocation, and the
///   owner check used by every protected handler
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Sessions**: HMAC-signed cookie carrying the authenticated username
/// - **Constant-time Comparison**: verification uses constant-time operations
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session;
