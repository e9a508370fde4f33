use chrono::{DateTime, FixedOffset};
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::model::member_type::MemberType;

async fn insert_member_type_row(
    tx: &mut Transaction<'_, Postgres>,
    data: &MemberType,
) -> anyhow::Result<MemberType> {
    let member_type: MemberType = sqlx::query_as(
        r#"
        INSERT INTO public.member_types (type_name, description, created_by, created_at, updated_by, updated_at, deleted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *"#,
    )
    .bind(&data.type_name)
    .bind(&data.description)
    .bind(data.created_by)
    .bind(data.created_at)
    .bind(data.updated_by)
    .bind(data.updated_at)
    .bind(data.deleted_at)
    .fetch_one(&mut **tx)
    .await?;
    Ok(member_type)
}

pub struct MemberTypeFactory<T: Clone> {
    modifier_one: fn(x: &MemberType, ext: T) -> MemberType,
    modifier_many: fn(x: &MemberType, idx: usize, ext: T) -> MemberType,
}

impl<T: Clone> Default for MemberTypeFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemberTypeFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &MemberType, ext: T) -> MemberType) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &MemberType, idx: usize, ext: T) -> MemberType) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<MemberType> {
        let data = MemberTypeDummy::generate_one();
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        let member_type = insert_member_type_row(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(member_type)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<MemberType>> {
        let mut result: Vec<MemberType> = vec![];
        let mut tx = db.begin().await?;
        for (idx, item) in MemberTypeDummy::generate_many(num).iter().enumerate() {
            let data = (self.modifier_many)(item, idx, ext.clone());
            result.push(insert_member_type_row(&mut tx, &data).await?);
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct MemberTypeDummy {
    pub type_name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl MemberTypeDummy {
    fn generate_one() -> MemberType {
        let dummy = Faker.fake::<Self>();
        MemberType {
            id: 0,
            type_name: dummy.type_name,
            description: dummy.description,
            created_by: None,
            created_at: dummy.created_at,
            updated_by: None,
            updated_at: dummy.updated_at,
            deleted_at: None,
        }
    }

    fn generate_many(num: u32) -> Vec<MemberType> {
        (0..num).map(|_| Self::generate_one()).collect()
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{factory::member_type::MemberTypeFactory, model::member_type::MemberType};

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = MemberTypeFactory::new();
        let data = factory.generate_many(&pool, 4, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.member_types"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 4);
        assert!(data.iter().all(|x| x.id > 0));
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = MemberTypeFactory::<&'static str>::new();
        factory.modified_one(|data, ext| MemberType {
            type_name: ext.to_string(),
            description: None,
            ..data.clone()
        });
        let member_type = factory.generate_one(&pool, "Associate").await?;

        // Expect
        let res: (i32, String, Option<String>) =
            sqlx::query_as(r#"SELECT id, type_name, description FROM public.member_types"#)
                .fetch_one(&pool)
                .await?;
        assert_eq!(res, (member_type.id, "Associate".to_string(), None));
        Ok(())
    }
}
