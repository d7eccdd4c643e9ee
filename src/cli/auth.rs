use chrono::Local;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::security::hash_password,
    model::profile::{Profile, ProfileRole},
    repository::profile::{create_profile, get_profile_by_email},
};

/// Create an active profile, typically the first admin.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    role: ProfileRole,
) -> anyhow::Result<Profile> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        anyhow::bail!("invalid email {}", email);
    }
    let mut tx = pool.begin().await?;
    if get_profile_by_email(&mut tx, &email).await?.is_some() {
        anyhow::bail!("email {} already registered", email);
    }

    let hashed_password =
        hash_password(password).map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let now = Local::now().fixed_offset();
    let profile = Profile {
        id: Uuid::now_v7(),
        email,
        password: hashed_password,
        full_name: None,
        phone: None,
        avatar_url: None,
        role: role.as_str().to_string(),
        is_active: true,
        wedding_date: None,
        partner_name: None,
        city: None,
        last_sign_in_at: None,
        created_at: now,
        updated_at: now,
    };
    create_profile(&mut tx, &profile).await?;
    tx.commit().await?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{cli::auth::create_user, model::profile::ProfileRole};

    #[sqlx::test]
    async fn test_create_user(pool: PgPool) -> anyhow::Result<()> {
        // When
        let email = "Owner@Local.com";
        let password = "password";
        create_user(&pool, email, password, ProfileRole::Admin).await?;

        // Expect
        let db_res: Option<(String, String, bool)> = sqlx::query_as(
            r#"
            SELECT email, role, is_active
            FROM public.profile
            WHERE email = $1
            "#,
        )
        .bind("owner@local.com")
        .fetch_optional(&pool)
        .await?;
        assert!(db_res.is_some());
        let (_, role, is_active) = db_res.unwrap();
        assert_eq!(role, "admin");
        assert!(is_active);

        // duplicate email
        let duplicate = create_user(&pool, "owner@local.com", password, ProfileRole::User).await;
        assert!(duplicate.is_err());
        Ok(())
    }
}
