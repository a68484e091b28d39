//! User entity <-> model mapper

use account_core::{AccountStatus, User, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            password: model.password,
            email: model.email,
            phone: model.phone,
            status: model.is_delete.map(AccountStatus::from_flag),
            created_at: model.create_time,
            updated_at: model.update_time,
        }
    }
}
