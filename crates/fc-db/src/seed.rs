use anyhow::{Context, bail};
use rand::{Rng, distributions::Alphanumeric};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::repositories::user;

const GENERATED_PASSWORD_LENGTH: usize = 20;

/// Admin account inserted into an empty database
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
    #[serde(default = "default_admin_username", rename = "admin_username")]
    pub username: String,
    #[serde(default = "default_admin_email", rename = "admin_email")]
    pub email: String,
    /// Generated when absent
    #[serde(default, rename = "admin_password")]
    pub password: Option<String>,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            email: default_admin_email(),
            password: None,
        }
    }
}

impl AdminSeed {
    /// Reject values the users table would store but nobody could log in with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.username.trim().is_empty() {
            bail!("Admin username cannot be empty");
        }
        if !self.email.validate_email() {
            bail!("Invalid admin email: '{}'", self.email);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Users already existed; nothing was inserted
    Skipped { existing_users: i64 },
    Created { user_id: Uuid },
}

/// Insert the admin account if and only if the users table is empty.
///
/// When no password is configured a random one is generated and logged once.
pub async fn seed_admin_if_empty(
    pool: &PgPool,
    seed: &AdminSeed,
    bcrypt_cost: u32,
) -> anyhow::Result<SeedOutcome> {
    seed.validate()?;

    let mut tx = pool.begin().await?;

    // Serialize concurrent bootstraps so the count check and insert stay atomic
    sqlx::query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await?;

    let existing_users = user::count_users(&mut *tx).await?;
    if existing_users > 0 {
        tx.commit().await?;
        tracing::info!(existing_users, "Users already present, skipping admin seed");
        return Ok(SeedOutcome::Skipped { existing_users });
    }

    let (password, generated) = match &seed.password {
        Some(password) if !password.is_empty() => (password.clone(), false),
        _ => (generate_password(), true),
    };
    let hashed = bcrypt::hash(&password, bcrypt_cost).context("failed to hash admin password")?;

    let user_id = user::create_user(&mut *tx, &seed.username, &seed.email, &hashed, true)
        .await
        .context("failed to insert admin user")?;
    tx.commit().await?;

    if generated {
        tracing::warn!(
            username = %seed.username,
            "Created admin user with generated password: {password}"
        );
    } else {
        tracing::info!(username = %seed.username, %user_id, "Created admin user");
    }

    Ok(SeedOutcome::Created { user_id })
}

fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}
