use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, User, UserNewCmd, users,
    util::{normalize_email, normalize_required_name},
};

use super::{Engine, with_tx};

impl Engine {
    /// Register a user. The password is stored as an argon2 hash.
    pub async fn register_user(&self, cmd: UserNewCmd) -> ResultEngine<User> {
        let email = normalize_email(&cmd.email)?;
        let name = normalize_required_name(&cmd.name, "user")?;
        if cmd.password.is_empty() {
            return Err(EngineError::InvalidName(
                "password must not be empty".to_string(),
            ));
        }
        let password_hash = users::hash_password(&cmd.password)?;

        with_tx!(self, |db_tx| {
            if users::Entity::find_by_id(email.clone())
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(email));
            }

            let model = users::ActiveModel {
                email: ActiveValue::Set(email.clone()),
                name: ActiveValue::Set(name),
                password_hash: ActiveValue::Set(password_hash),
            }
            .insert(&db_tx)
            .await?;
            tracing::info!(email = %model.email, "user registered");
            Ok(User::from(model))
        })
    }

    /// Check an email/password pair.
    ///
    /// An unknown email and a wrong password fail the same way and take the
    /// same time: both run one argon2 verification.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let model = match normalize_email(email) {
            Ok(email) => users::Entity::find_by_id(email).one(&self.database).await?,
            Err(_) => None,
        };
        let Some(model) = model else {
            // Unknown emails pay for a verification too.
            users::verify_dummy_password(password);
            return Err(EngineError::InvalidCredentials);
        };
        if !users::verify_password(password, &model.password_hash)? {
            return Err(EngineError::InvalidCredentials);
        }
        Ok(User::from(model))
    }

    pub async fn user(&self, email: &str) -> ResultEngine<User> {
        let email = normalize_email(email)?;
        users::Entity::find_by_id(email)
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }
}
