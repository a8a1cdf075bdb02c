use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, error::ErrorUnauthorized};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Identity of the user making the request, taken from the session cookie.
pub struct AuthenticatedUser {
    /// Database id of the logged-in user.
    pub id: i32,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let resolved = Identity::from_request(req, payload)
            .into_inner()
            .and_then(|identity| identity.id().map_err(Error::from))
            .and_then(|id| {
                id.parse::<i32>()
                    .map_err(|_| ErrorUnauthorized("invalid session identity"))
            })
            .map(|id| AuthenticatedUser { id });
        ready(resolved)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Requesting identity for endpoints that also serve anonymous callers.
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl OptionalUser {
    /// User id when the caller is authenticated.
    pub fn viewer_id(&self) -> Option<i32> {
        self.0.map(|user| user.id)
    }
}

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = AuthenticatedUser::from_request(req, payload)
            .into_inner()
            .ok();
        ready(Ok(OptionalUser(user)))
    }
}

/// Hash a password with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a password against a stored argon2 hash.
pub fn verify_password(
    password: &str,
    password_hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(password_hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
