use sqlx::PgPool;

use crate::model::assigned_user::AssignedUser;

use super::user::UserFactory;

/// Assigns freshly generated users to `user_id`.
pub struct AssignedUserFactory {
    user_id: i32,
}

impl AssignedUserFactory {
    pub fn new(user_id: i32) -> Self {
        Self { user_id }
    }

    pub async fn generate_one(&mut self, db: &PgPool) -> anyhow::Result<AssignedUser> {
        let assignuser = UserFactory::new().generate_one(db, ()).await?;
        let data: AssignedUser = sqlx::query_as(
            r#"
            INSERT INTO public.assignusers (user_id, assignuser_id)
            VALUES ($1, $2)
            RETURNING *"#,
        )
        .bind(self.user_id)
        .bind(assignuser.id)
        .fetch_one(db)
        .await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
    ) -> anyhow::Result<Vec<AssignedUser>> {
        let mut result: Vec<AssignedUser> = vec![];
        for _ in 0..num {
            result.push(self.generate_one(db).await?);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::factory::{assigned_user::AssignedUserFactory, user::UserFactory};

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let owner = UserFactory::new().generate_one(&pool, ()).await?;

        // When
        let data = AssignedUserFactory::new(owner.id)
            .generate_many(&pool, 3)
            .await?;

        // Expect
        let num_data: (i64,) =
            sqlx::query_as(r#"SELECT COUNT(*) FROM public.assignusers WHERE user_id = $1"#)
                .bind(owner.id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(num_data.0, 3);
        assert!(data.iter().all(|x| x.assignuser_id != owner.id));
        Ok(())
    }
}
