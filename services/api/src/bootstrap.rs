//! Initial administrator account

use auth::{AuthError, AuthResult, UserRepository, models::NewUser};
use tracing::info;

use crate::config::AdminCredentials;

/// Create the administrator unless a user of that name already exists
///
/// Returns whether a user was created.
pub async fn ensure_admin(users: &UserRepository, admin: &AdminCredentials) -> AuthResult<bool> {
    let new_user = NewUser {
        username: admin.username.clone(),
        password: admin.password.clone(),
    };

    match users.create(&new_user).await {
        Ok(user) => {
            info!("Bootstrapped administrator {}", user.username);
            Ok(true)
        }
        Err(AuthError::Conflict(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
