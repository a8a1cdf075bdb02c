use crate::auth::verify_password;
use crate::domain::user::User;
use crate::forms::auth::LoginForm;
use crate::repository::UserReader;
use crate::services::{ServiceError, ServiceResult};

/// Check the submitted credentials and return the matching account.
/// Unknown e-mail and wrong password are indistinguishable to the caller.
pub fn authenticate<R>(repo: &R, form: &LoginForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let account = repo
        .get_user_by_email(&form.email)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;

    let matches =
        verify_password(&form.password, &account.password_hash).unwrap_or(false);

    if !matches {
        return Err(ServiceError::Unauthorized);
    }

    Ok(account)
}
