use chrono::{DateTime, FixedOffset};
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::model::user::User;

async fn insert_user_row(tx: &mut Transaction<'_, Postgres>, data: &User) -> anyhow::Result<User> {
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO public.user (user_name, email, is_active, created_date, updated_date, deleted_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *"#,
    )
    .bind(&data.user_name)
    .bind(&data.email)
    .bind(data.is_active)
    .bind(data.created_date)
    .bind(data.updated_date)
    .bind(data.deleted_date)
    .fetch_one(&mut **tx)
    .await?;
    Ok(user)
}

pub struct UserFactory<T: Clone> {
    modifier_one: fn(x: &User, ext: T) -> User,
    modifier_many: fn(x: &User, idx: usize, ext: T) -> User,
}

impl<T: Clone> Default for UserFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> UserFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &User, ext: T) -> User) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &User, idx: usize, ext: T) -> User) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<User> {
        let data = UserDummy::generate_one();
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        let user = insert_user_row(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(user)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<User>> {
        let mut result: Vec<User> = vec![];
        let mut tx = db.begin().await?;
        for (idx, item) in UserDummy::generate_many(num).iter().enumerate() {
            let data = (self.modifier_many)(item, idx, ext.clone());
            result.push(insert_user_row(&mut tx, &data).await?);
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct UserDummy {
    pub email: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}

impl UserDummy {
    fn generate_one() -> User {
        let dummy = Faker.fake::<Self>();
        User {
            id: 0,
            // user_name is unique
            user_name: format!("user_{}", uuid::Uuid::now_v7().simple()),
            email: dummy.email,
            is_active: Some(true),
            created_date: dummy.created_date,
            updated_date: dummy.updated_date,
            deleted_date: None,
        }
    }

    fn generate_many(num: u32) -> Vec<User> {
        (0..num).map(|_| Self::generate_one()).collect()
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{factory::user::UserFactory, model::user::User};

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UserFactory::new();
        let user = factory.generate_one(&pool, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.user"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 1);
        assert!(user.id > 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = UserFactory::<bool>::new();
        factory.modified_many(|data, idx, ext| User {
            user_name: format!("operator_{}", idx),
            is_active: Some(ext),
            ..data.clone()
        });
        factory.generate_many(&pool, 3, false).await?;

        // Expect
        let res: Vec<(String, Option<bool>)> =
            sqlx::query_as(r#"SELECT user_name, is_active FROM public.user ORDER BY id"#)
                .fetch_all(&pool)
                .await?;
        assert_eq!(
            res,
            vec![
                ("operator_0".to_string(), Some(false)),
                ("operator_1".to_string(), Some(false)),
                ("operator_2".to_string(), Some(false)),
            ]
        );
        Ok(())
    }
}
