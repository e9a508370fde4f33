use sqlx::PgPool;

use crate::{model::member_type::MemberType, repository};

/// Seed a member type without a requesting user.
pub async fn create_member_type(
    pool: &PgPool,
    type_name: &str,
    description: Option<String>,
) -> anyhow::Result<MemberType> {
    let mut tx = pool.begin().await?;
    let member_type = repository::member_type::create_member_type(
        &mut tx,
        type_name.to_string(),
        description,
        None,
        None,
    )
    .await?;
    tx.commit().await?;
    tracing::info!(
        "created member type {} with id {}",
        member_type.type_name,
        member_type.id
    );
    Ok(member_type)
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::cli::member_type::create_member_type;

    #[sqlx::test]
    async fn test_create_member_type(pool: PgPool) -> anyhow::Result<()> {
        // When
        let member_type = create_member_type(&pool, "Lifetime", None).await?;
        let blank = create_member_type(&pool, " ", None).await;

        // Expect
        let db_res: (String, Option<i32>) =
            sqlx::query_as("SELECT type_name, created_by FROM public.member_types WHERE id = $1")
                .bind(member_type.id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(db_res, ("Lifetime".to_string(), None));
        assert!(blank.is_err());
        Ok(())
    }
}
