use chrono::{DateTime, FixedOffset, NaiveDate};
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::{Query, QueryAs},
    Postgres,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SqlxBinds {
    String(String),
    OptionString(Option<String>),
    Int(i32),
    OptionInt(Option<i32>),
    Bool(bool),
    OptionBool(Option<bool>),
    Date(NaiveDate),
    OptionDate(Option<NaiveDate>),
    DateTimeFixedOffset(DateTime<FixedOffset>),
    OptionDateTimeFixedOffset(Option<DateTime<FixedOffset>>),
}

impl SqlxBinds {
    /// A value that does not satisfy a required field: SQL null or blank text.
    pub fn is_missing(&self) -> bool {
        match self {
            SqlxBinds::String(val) => val.trim().is_empty(),
            SqlxBinds::OptionString(val) => val.as_ref().is_none_or(|x| x.trim().is_empty()),
            SqlxBinds::OptionInt(val) => val.is_none(),
            SqlxBinds::OptionBool(val) => val.is_none(),
            SqlxBinds::OptionDate(val) => val.is_none(),
            SqlxBinds::OptionDateTimeFixedOffset(val) => val.is_none(),
            SqlxBinds::Int(_)
            | SqlxBinds::Bool(_)
            | SqlxBinds::Date(_)
            | SqlxBinds::DateTimeFixedOffset(_) => false,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            SqlxBinds::Int(val) => Some(*val),
            SqlxBinds::OptionInt(val) => *val,
            _ => None,
        }
    }
}

macro_rules! bind_all {
    ($q:expr, $binds:expr) => {{
        let mut q = $q;
        for bind in $binds.iter() {
            q = match bind {
                SqlxBinds::String(val) => q.bind(val.clone()),
                SqlxBinds::OptionString(val) => q.bind(val.clone()),
                SqlxBinds::Int(val) => q.bind(*val),
                SqlxBinds::OptionInt(val) => q.bind(*val),
                SqlxBinds::Bool(val) => q.bind(*val),
                SqlxBinds::OptionBool(val) => q.bind(*val),
                SqlxBinds::Date(val) => q.bind(*val),
                SqlxBinds::OptionDate(val) => q.bind(*val),
                SqlxBinds::DateTimeFixedOffset(val) => q.bind(*val),
                SqlxBinds::OptionDateTimeFixedOffset(val) => q.bind(*val),
            };
        }
        q
    }};
}

pub fn binds_query(stmt: &str, binds: Vec<SqlxBinds>) -> Query<'_, Postgres, PgArguments> {
    let q: Query<'_, Postgres, PgArguments> = sqlx::query(stmt);
    bind_all!(q, binds)
}

pub fn binds_query_as<'a, T: for<'r> sqlx::FromRow<'r, PgRow>>(
    stmt: &'a str,
    binds: Vec<SqlxBinds>,
) -> QueryAs<'a, Postgres, T, PgArguments> {
    let q: QueryAs<'_, Postgres, T, PgArguments> = sqlx::query_as(stmt);
    bind_all!(q, binds)
}

pub fn query_builder(
    select: Option<String>,
    table_name: &str,
    wheres: &[String],
    order_by: Vec<String>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> String {
    // Select
    let mut stmt = "SELECT ".to_string();
    if let Some(val) = select {
        stmt.push_str(&val);
    } else {
        stmt.push('*');
    }

    // From
    stmt.push_str(format!(" FROM {}", table_name).as_str());

    // Where
    if !wheres.is_empty() {
        stmt.push_str(" WHERE");
        for (idx, item) in wheres.iter().enumerate() {
            stmt.push_str(&format!(" {}", item));
            if idx < wheres.len() - 1 {
                stmt.push_str(" AND");
            }
        }
    }

    // order by
    if !order_by.is_empty() {
        stmt.push_str(" ORDER BY");
        for (idx, item) in order_by.iter().enumerate() {
            stmt.push_str(format!(" {}", item).as_str());
            if idx < order_by.len() - 1 {
                stmt.push(',');
            }
        }
    }

    // Limit
    if let Some(limit) = limit {
        stmt.push_str(format!(" LIMIT {}", limit).as_str());
    }

    // Offset
    if let Some(offset) = offset {
        stmt.push_str(format!(" OFFSET {}", offset).as_str());
    }
    stmt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder_full() {
        let stmt = query_builder(
            None,
            "public.members",
            &["full_name ILIKE $1".to_string(), "deleted_at IS NULL".to_string()],
            vec!["updated_at DESC".to_string(), "id".to_string()],
            Some(10),
            Some(20),
        );
        assert_eq!(
            stmt,
            "SELECT * FROM public.members WHERE full_name ILIKE $1 AND deleted_at IS NULL ORDER BY updated_at DESC, id LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_query_builder_count() {
        let stmt = query_builder(
            Some("count(id)".to_string()),
            "public.assignusers",
            &[],
            vec![],
            None,
            None,
        );
        assert_eq!(stmt, "SELECT count(id) FROM public.assignusers");
    }

    #[test]
    fn test_binds_missing() {
        assert!(SqlxBinds::String("  ".to_string()).is_missing());
        assert!(SqlxBinds::OptionString(None).is_missing());
        assert!(SqlxBinds::OptionInt(None).is_missing());
        assert!(!SqlxBinds::Int(0).is_missing());
        assert!(!SqlxBinds::OptionString(Some("M-01".to_string())).is_missing());
        assert_eq!(SqlxBinds::OptionInt(Some(3)).as_int(), Some(3));
        assert_eq!(SqlxBinds::String("3".to_string()).as_int(), None);
    }
}
