use thiserror::Error;

use crate::{Catalog, User};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Login or password is incorrect. The message is the exact text
    /// shown to the user.
    #[error("Login o contraseña incorrectos.")]
    InvalidCredentials,
}

/// A login attempt, as submitted by the user
#[derive(Debug)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Matches the credentials against the user list.
///
/// Both fields are trimmed of surrounding whitespace, then compared by
/// exact case-sensitive equality. Passwords are stored in plaintext in
/// the source data, so no hashing is involved.
pub fn authenticate<'a>(catalog: &'a Catalog, credentials: &Credentials) -> Result<&'a User, AuthError> {
    let login = credentials.login.trim();
    let password = credentials.password.trim();

    catalog
        .users
        .iter()
        .find(|user| user.login == login && user.password == password)
        .ok_or(AuthError::InvalidCredentials)
}
