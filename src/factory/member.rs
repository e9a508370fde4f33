use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::model::member::Member;

async fn insert_member_row(
    tx: &mut Transaction<'_, Postgres>,
    data: &Member,
) -> anyhow::Result<Member> {
    let member: Member = sqlx::query_as(
        r#"
        INSERT INTO public.members (member_type, member_no, member_date, full_name, father_husband_name, mother_name, member_email, member_photo, member_sign, created_by, created_at, updated_by, updated_at, deleted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *"#,
    )
    .bind(data.member_type)
    .bind(&data.member_no)
    .bind(data.member_date)
    .bind(&data.full_name)
    .bind(&data.father_husband_name)
    .bind(&data.mother_name)
    .bind(&data.member_email)
    .bind(&data.member_photo)
    .bind(&data.member_sign)
    .bind(data.created_by)
    .bind(data.created_at)
    .bind(data.updated_by)
    .bind(data.updated_at)
    .bind(data.deleted_at)
    .fetch_one(&mut **tx)
    .await?;
    Ok(member)
}

/// Members are generated under an existing member type.
pub struct MemberFactory<T: Clone> {
    member_type: i32,
    modifier_one: fn(x: &Member, ext: T) -> Member,
    modifier_many: fn(x: &Member, idx: usize, ext: T) -> Member,
}

impl<T: Clone> MemberFactory<T> {
    pub fn new(member_type: i32) -> Self {
        Self {
            member_type,
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Member, ext: T) -> Member) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Member, idx: usize, ext: T) -> Member) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Member> {
        let data = MemberDummy::generate_one(self.member_type);
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        let member = insert_member_row(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(member)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Member>> {
        let mut result: Vec<Member> = vec![];
        let mut tx = db.begin().await?;
        for idx in 0..num as usize {
            let item = MemberDummy::generate_one(self.member_type);
            let data = (self.modifier_many)(&item, idx, ext.clone());
            result.push(insert_member_row(&mut tx, &data).await?);
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct MemberDummy {
    pub member_no: String,
    #[dummy(faker = "0..3650")]
    pub member_day: i64,
    pub full_name: String,
    pub father_husband_name: Option<String>,
    pub mother_name: Option<String>,
    pub member_email: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl MemberDummy {
    fn generate_one(member_type: i32) -> Member {
        let dummy = Faker.fake::<Self>();
        Member {
            id: 0,
            member_type,
            member_no: dummy.member_no,
            member_date: NaiveDate::from_ymd_opt(2015, 1, 1)
                .unwrap_or_default()
                .checked_add_signed(TimeDelta::days(dummy.member_day))
                .unwrap_or_default(),
            full_name: dummy.full_name,
            father_husband_name: dummy.father_husband_name,
            mother_name: dummy.mother_name,
            member_email: dummy.member_email,
            member_photo: None,
            member_sign: None,
            created_by: None,
            created_at: dummy.created_at,
            updated_by: None,
            updated_at: dummy.updated_at,
            deleted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{
        factory::{member::MemberFactory, member_type::MemberTypeFactory},
        model::member::Member,
    };

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let member_type = MemberTypeFactory::new().generate_one(&pool, ()).await?;

        // When
        let mut factory = MemberFactory::new(member_type.id);
        factory.generate_many(&pool, 6, ()).await?;

        // Expect
        let res: Vec<(i32,)> = sqlx::query_as(r#"SELECT member_type FROM public.members"#)
            .fetch_all(&pool)
            .await?;
        assert_eq!(res.len(), 6);
        assert!(res.iter().all(|x| x.0 == member_type.id));
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let member_type = MemberTypeFactory::new().generate_one(&pool, ()).await?;

        // When
        let mut factory = MemberFactory::<String>::new(member_type.id);
        factory.modified_one(|data, ext| Member {
            member_no: ext,
            member_photo: Some("photos/1.png".to_string()),
            ..data.clone()
        });
        let member = factory
            .generate_one(&pool, "M-0001".to_string())
            .await?;

        // Expect
        assert_eq!(member.member_no, "M-0001");
        assert_eq!(member.member_photo.as_deref(), Some("photos/1.png"));
        Ok(())
    }
}
