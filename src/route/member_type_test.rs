use std::sync::Arc;

use chrono::Local;
use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::{test_utils::generate_test_user, utils::datetime_to_string_opt},
    factory::member_type::MemberTypeFactory,
    init_openapi_route,
    layout::settings::LayoutSettings,
    model::member_type::MemberType,
    schema::member_type::DetailMemberType,
    settings::get_config,
    AppState,
};

#[sqlx::test]
async fn test_get_all_member_type_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone())?;
    let redis_pool = r2d2::Pool::builder().build(client)?;
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
        layout_settings: LayoutSettings::default(),
    });
    let mut db = app_state.db.acquire().await?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let test_user = generate_test_user(&mut db, &mut *redis_conn, &config, "test_user").await?;
    let mut factory = MemberTypeFactory::new();
    factory.modified_many(|data, idx, _| MemberType {
        type_name: ["Lifetime", "General", "Associate"][idx].to_string(),
        ..data.clone()
    });
    let mut member_types = factory.generate_many(&app_state.db, 3, ()).await?;
    let mut deleted_factory = MemberTypeFactory::new();
    deleted_factory.modified_one(|data, _| MemberType {
        deleted_at: Some(Local::now().fixed_offset()),
        ..data.clone()
    });
    deleted_factory.generate_one(&app_state.db, ()).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/member-type/all/")
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    member_types.sort_by(|a, b| a.type_name.cmp(&b.type_name));
    let results: Vec<DetailMemberType> = member_types
        .into_iter()
        .map(|x| DetailMemberType {
            id: x.id,
            type_name: x.type_name,
            description: x.description,
            created_by: None,
            updated_by: None,
            created_at: datetime_to_string_opt(x.created_at),
            updated_at: datetime_to_string_opt(x.updated_at),
        })
        .collect();
    resp.assert_json(&results).await;
    Ok(())
}

#[sqlx::test]
async fn test_member_type_crud_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone())?;
    let redis_pool = r2d2::Pool::builder().build(client)?;
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
        layout_settings: LayoutSettings::default(),
    });
    let mut db = app_state.db.acquire().await?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let test_user = generate_test_user(&mut db, &mut *redis_conn, &config, "test_user").await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let created = cli
        .post("/api/member-type/")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"type_name": "General", "description": "regular members"}))
        .send()
        .await;

    // Expect
    created.assert_status(StatusCode::CREATED);
    let json = created.json().await;
    let body = json.value().object();
    body.get("type_name").assert_string("General");
    body.get("created_by")
        .object()
        .get("user_name")
        .assert_string("test_user");
    let id = body.get("id").i64();

    // When
    let updated = cli
        .put("/api/member-type/")
        .query("id", &id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"type_name": "Ordinary"}))
        .send()
        .await;
    let detail = cli
        .get("/api/member-type/detail/")
        .query("id", &id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    updated.assert_status_is_ok();
    detail.assert_status_is_ok();
    let json = detail.json().await;
    let body = json.value().object();
    body.get("type_name").assert_string("Ordinary");
    body.get("description").assert_null();

    // When
    let deleted = cli
        .delete("/api/member-type/")
        .query("id", &id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;
    let detail = cli
        .get("/api/member-type/detail/")
        .query("id", &id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    deleted.assert_status(StatusCode::NO_CONTENT);
    detail.assert_status(StatusCode::NOT_FOUND);
    let row: (bool,) =
        sqlx::query_as("SELECT deleted_at IS NOT NULL FROM public.member_types WHERE id = $1")
            .bind(id as i32)
            .fetch_one(&app_state.db)
            .await?;
    assert!(row.0);
    Ok(())
}

#[sqlx::test]
async fn test_create_member_type_api_blank_name(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone())?;
    let redis_pool = r2d2::Pool::builder().build(client)?;
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
        layout_settings: LayoutSettings::default(),
    });
    let mut db = app_state.db.acquire().await?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let test_user = generate_test_user(&mut db, &mut *redis_conn, &config, "test_user").await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/member-type/")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"type_name": ""}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(&json!({
        "message": "public.member_types: missing required field(s): type_name"
    }))
    .await;
    Ok(())
}

#[sqlx::test]
async fn test_update_member_type_api_not_found(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone())?;
    let redis_pool = r2d2::Pool::builder().build(client)?;
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
        layout_settings: LayoutSettings::default(),
    });
    let mut db = app_state.db.acquire().await?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let test_user = generate_test_user(&mut db, &mut *redis_conn, &config, "test_user").await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .put("/api/member-type/")
        .query("id", &404)
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"type_name": "Ghost"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(&json!({"message": "member type with id = 404 not found"}))
        .await;
    Ok(())
}
