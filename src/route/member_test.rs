use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::{
        test_utils::generate_test_user,
        utils::{date_to_string, datetime_to_string_opt},
    },
    factory::{member::MemberFactory, member_type::MemberTypeFactory},
    init_openapi_route,
    layout::settings::LayoutSettings,
    model::member::Member,
    schema::{
        common::RelatedUser,
        member::{DetailMember, MemberTypeSummary},
    },
    settings::get_config,
    AppState,
};

#[sqlx::test]
async fn test_paginate_member_api(pool: PgPool) -> anyhow::Result<()> {
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
    let member_type = MemberTypeFactory::new().generate_one(&app_state.db, ()).await?;
    let mut member_factory = MemberFactory::new(member_type.id);
    member_factory.modified_many(|data, idx, _| Member {
        full_name: format!("member {:02}", idx),
        updated_at: Some(Local::now().fixed_offset() - Duration::minutes(idx as i64)),
        ..data.clone()
    });
    member_factory.generate_many(&app_state.db, 12, ()).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/member/")
        .query("page", &2)
        .query("page_size", &5)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("counts").assert_i64(12);
    body.get("page").assert_i64(2);
    body.get("page_count").assert_i64(3);
    body.get("page_size").assert_i64(5);
    let results = body.get("results").object_array();
    assert_eq!(results.len(), 5);
    // most recently updated first
    results[0].get("full_name").assert_string("member 05");
    results[4].get("full_name").assert_string("member 09");
    results[0]
        .get("member_type")
        .object()
        .get("type_name")
        .assert_string(&member_type.type_name);
    Ok(())
}

#[sqlx::test]
async fn test_paginate_member_api_out_of_range_page(pool: PgPool) -> anyhow::Result<()> {
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
    let member_type = MemberTypeFactory::new().generate_one(&app_state.db, ()).await?;
    MemberFactory::new(member_type.id)
        .generate_many(&app_state.db, 3, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let huge = cli
        .get("/api/member/")
        .query("page", &100000)
        .query("page_size", &100000)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;
    let zero = cli
        .get("/api/member/")
        .query("page", &0)
        .query("page_size", &0)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    huge.assert_status_is_ok();
    let json = huge.json().await;
    let body = json.value().object();
    body.get("counts").assert_i64(3);
    body.get("page").assert_i64(100000);
    body.get("page_size").assert_i64(100000);
    body.get("results").array().assert_len(0);
    zero.assert_status_is_ok();
    let json = zero.json().await;
    let body = json.value().object();
    body.get("page").assert_i64(1);
    body.get("page_size").assert_i64(1);
    body.get("page_count").assert_i64(3);
    body.get("results").array().assert_len(1);
    Ok(())
}

#[sqlx::test]
async fn test_paginate_member_api_search_and_filter(pool: PgPool) -> anyhow::Result<()> {
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
    let member_types = MemberTypeFactory::new()
        .generate_many(&app_state.db, 2, ())
        .await?;
    let mut member_factory = MemberFactory::new(member_types[0].id);
    member_factory.modified_many(|data, idx, _| Member {
        full_name: if idx == 0 {
            "Rahima Khatun".to_string()
        } else {
            format!("other {}", idx)
        },
        ..data.clone()
    });
    member_factory.generate_many(&app_state.db, 3, ()).await?;
    let mut deleted_factory = MemberFactory::new(member_types[0].id);
    deleted_factory.modified_one(|data, _| Member {
        full_name: "Rahima Deleted".to_string(),
        deleted_at: Some(Local::now().fixed_offset()),
        ..data.clone()
    });
    deleted_factory.generate_one(&app_state.db, ()).await?;
    MemberFactory::new(member_types[1].id)
        .generate_many(&app_state.db, 4, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let search_resp = cli
        .get("/api/member/")
        .query("search", &"rahima")
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;
    let filter_resp = cli
        .get("/api/member/")
        .query("member_type", &member_types[1].id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    search_resp.assert_status_is_ok();
    let json = search_resp.json().await;
    let body = json.value().object();
    body.get("counts").assert_i64(1);
    body.get("results").object_array()[0]
        .get("full_name")
        .assert_string("Rahima Khatun");

    filter_resp.assert_status_is_ok();
    filter_resp.json().await.value().object().get("counts").assert_i64(4);
    Ok(())
}

#[sqlx::test]
async fn test_get_detail_member_api(pool: PgPool) -> anyhow::Result<()> {
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
    let member_type = MemberTypeFactory::new().generate_one(&app_state.db, ()).await?;
    let mut member_factory = MemberFactory::<i32>::new(member_type.id);
    member_factory.modified_one(|data, user_id| Member {
        created_by: Some(user_id),
        updated_by: Some(user_id),
        ..data.clone()
    });
    let member = member_factory
        .generate_one(&app_state.db, test_user.user.id)
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/member/detail/")
        .query("id", &member.id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let related_user = RelatedUser {
        id: test_user.user.id,
        user_name: "test_user".to_string(),
    };
    resp.assert_json(&json!(DetailMember {
        id: member.id,
        member_type: Some(MemberTypeSummary {
            id: member_type.id,
            type_name: member_type.type_name,
        }),
        member_no: member.member_no,
        member_date: date_to_string(member.member_date),
        full_name: member.full_name,
        father_husband_name: member.father_husband_name,
        mother_name: member.mother_name,
        member_email: member.member_email,
        member_photo: None,
        member_sign: None,
        created_by: Some(related_user.clone()),
        updated_by: Some(related_user),
        created_at: datetime_to_string_opt(member.created_at),
        updated_at: datetime_to_string_opt(member.updated_at),
    }))
    .await;
    Ok(())
}

#[sqlx::test]
async fn test_get_detail_member_api_not_found(pool: PgPool) -> anyhow::Result<()> {
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
        .get("/api/member/detail/")
        .query("id", &9999)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(&json!({"message": "member with id = 9999 not found"}))
        .await;
    Ok(())
}

#[sqlx::test]
async fn test_member_api_unknown_session(pool: PgPool) -> anyhow::Result<()> {
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
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/member/")
        .header("authorization", "Bearer not-a-session")
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    resp.assert_json(&json!({"message": "invalid or expired session"}))
        .await;
    Ok(())
}

#[sqlx::test]
async fn test_create_member_api(pool: PgPool) -> anyhow::Result<()> {
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
    let member_type = MemberTypeFactory::new().generate_one(&app_state.db, ()).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/member/")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({
            "member_type": member_type.id,
            "member_no": "M-0042",
            "member_date": "2024-02-29",
            "full_name": "Abdul Karim",
            "father_husband_name": "Abdul Rahim",
            "member_email": "karim@example.com"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let body = json.value().object();
    body.get("full_name").assert_string("Abdul Karim");
    body.get("member_date").assert_string("2024-02-29");
    body.get("created_by")
        .object()
        .get("user_name")
        .assert_string("test_user");
    let row: (i32, String, NaiveDate, Option<i32>, Option<String>) = sqlx::query_as(
        "SELECT member_type, member_no, member_date, created_by, mother_name FROM public.members",
    )
    .fetch_one(&app_state.db)
    .await?;
    assert_eq!(
        row,
        (
            member_type.id,
            "M-0042".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            Some(test_user.user.id),
            None
        )
    );
    Ok(())
}

#[sqlx::test]
async fn test_create_member_api_rejects_invalid_input(pool: PgPool) -> anyhow::Result<()> {
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
    let member_type = MemberTypeFactory::new().generate_one(&app_state.db, ()).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let blank_name = cli
        .post("/api/member/")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({
            "member_type": member_type.id,
            "member_no": "M-1",
            "member_date": "2024-01-01",
            "full_name": "  "
        }))
        .send()
        .await;
    let bad_date = cli
        .post("/api/member/")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({
            "member_type": member_type.id,
            "member_no": "M-1",
            "member_date": "01/01/2024",
            "full_name": "Someone"
        }))
        .send()
        .await;
    let unknown_type = cli
        .post("/api/member/")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({
            "member_type": member_type.id + 100,
            "member_no": "M-1",
            "member_date": "2024-01-01",
            "full_name": "Someone"
        }))
        .send()
        .await;

    // Expect
    blank_name.assert_status(StatusCode::BAD_REQUEST);
    blank_name
        .assert_json(&json!({
            "message": "public.members: missing required field(s): full_name"
        }))
        .await;
    bad_date.assert_status(StatusCode::BAD_REQUEST);
    unknown_type.assert_status(StatusCode::BAD_REQUEST);
    unknown_type
        .assert_json(&json!({
            "message": format!("member type with id = {} not found", member_type.id + 100)
        }))
        .await;
    let count: (i64,) = sqlx::query_as("SELECT count(*) FROM public.members")
        .fetch_one(&app_state.db)
        .await?;
    assert_eq!(count.0, 0);
    Ok(())
}

#[sqlx::test]
async fn test_update_member_api(pool: PgPool) -> anyhow::Result<()> {
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
    let member_types = MemberTypeFactory::new()
        .generate_many(&app_state.db, 2, ())
        .await?;
    let member = MemberFactory::new(member_types[0].id)
        .generate_one(&app_state.db, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .put("/api/member/")
        .query("id", &member.id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({
            "member_type": member_types[1].id,
            "member_no": "M-0100",
            "member_date": "2023-12-31",
            "full_name": "Renamed Member",
            "member_photo": "photos/100.png"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let row: (i32, String, Option<String>, Option<i32>, Option<String>) = sqlx::query_as(
        "SELECT member_type, full_name, member_photo, updated_by, father_husband_name FROM public.members WHERE id = $1",
    )
    .bind(member.id)
    .fetch_one(&app_state.db)
    .await?;
    assert_eq!(
        row,
        (
            member_types[1].id,
            "Renamed Member".to_string(),
            Some("photos/100.png".to_string()),
            Some(test_user.user.id),
            None
        )
    );
    Ok(())
}

#[sqlx::test]
async fn test_delete_member_api(pool: PgPool) -> anyhow::Result<()> {
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
    let member_type = MemberTypeFactory::new().generate_one(&app_state.db, ()).await?;
    let member = MemberFactory::new(member_type.id)
        .generate_one(&app_state.db, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .delete("/api/member/")
        .query("id", &member.id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;
    let detail = cli
        .get("/api/member/detail/")
        .query("id", &member.id)
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NO_CONTENT);
    detail.assert_status(StatusCode::NOT_FOUND);
    let row: (bool, Option<i32>) = sqlx::query_as(
        "SELECT deleted_at IS NOT NULL, updated_by FROM public.members WHERE id = $1",
    )
    .bind(member.id)
    .fetch_one(&app_state.db)
    .await?;
    assert_eq!(row, (true, Some(test_user.user.id)));
    Ok(())
}
