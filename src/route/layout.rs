use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::{
    core::security::{get_user_from_token, BearerAuthorization},
    layout::{
        compose_page,
        mutation::settings_mutations,
        nav::build_menu_tree,
        theme::{stored_theme, theme_on_toggle, RedisPreferenceStore, Theme},
    },
    repository::menu::get_all_menu,
    schema::{
        common::{InternalServerErrorResponse, UnauthorizedResponse},
        layout::{
            class_mutations, ElementClasses, LayoutSettingsResponses, MenuItem,
            PageLayoutResponse, PageLayoutResponses, ThemeGetResponses, ThemeResponse,
            ThemeToggleRequest, ThemeToggleResponse, ThemeToggleResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiLayoutTags {
    Layout,
}

/// An empty `back_link` stands for a marker without href.
fn back_link_hrefs(back_link: Option<Vec<String>>) -> Vec<Option<String>> {
    back_link
        .unwrap_or_default()
        .into_iter()
        .map(|x| if x.is_empty() { None } else { Some(x) })
        .collect()
}

pub struct ApiLayout;

#[OpenApi]
impl ApiLayout {
    /// Page state for `path` once the load-time scripts have run.
    #[oai(path = "/layout/page/", method = "get", tag = "ApiLayoutTags::Layout")]
    async fn get_page_layout_api(
        &self,
        Query(path): Query<String>,
        Query(back_link): Query<Option<Vec<String>>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> PageLayoutResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return PageLayoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_page_layout_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return PageLayoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_page_layout_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let request_user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return PageLayoutResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return PageLayoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_page_layout_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let rows = match get_all_menu(&mut tx).await {
            Ok(val) => val,
            Err(err) => {
                return PageLayoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_page_layout_api",
                        "get_all_menu",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut store = RedisPreferenceStore::new(&mut *redis_conn, request_user.id);
        let page = compose_page(
            &state.layout_settings,
            build_menu_tree(&rows),
            &path,
            &back_link_hrefs(back_link),
            &mut store,
        );

        PageLayoutResponses::Ok(Json(PageLayoutResponse {
            classes: ElementClasses::from(&page.document),
            theme_switch_checked: page.document.theme_switch_checked,
            resize_events: page.document.resize_events,
            menu: page.menu.into_iter().map(MenuItem::from).collect(),
        }))
    }

    /// Class mutations the configured layout settings apply on load.
    #[oai(path = "/layout/settings/", method = "get", tag = "ApiLayoutTags::Layout")]
    async fn get_layout_settings_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> LayoutSettingsResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return LayoutSettingsResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_layout_settings_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return LayoutSettingsResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_layout_settings_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(val) => val,
            Err(err) => {
                return LayoutSettingsResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_layout_settings_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if user.is_none() {
            return LayoutSettingsResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let mutations = settings_mutations(&state.layout_settings);
        LayoutSettingsResponses::Ok(Json(class_mutations(&mutations)))
    }

    #[oai(path = "/layout/theme/", method = "get", tag = "ApiLayoutTags::Layout")]
    async fn get_theme_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ThemeGetResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ThemeGetResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_theme_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return ThemeGetResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_theme_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let request_user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ThemeGetResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return ThemeGetResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "get_theme_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut store = RedisPreferenceStore::new(&mut *redis_conn, request_user.id);
        ThemeGetResponses::Ok(Json(ThemeResponse {
            theme: stored_theme(&mut store).map(|x| x.to_string()),
        }))
    }

    /// Flip the theme switch and persist the choice for the session user.
    #[oai(path = "/layout/theme/", method = "put", tag = "ApiLayoutTags::Layout")]
    async fn toggle_theme_api(
        &self,
        Json(json): Json<ThemeToggleRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ThemeToggleResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ThemeToggleResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "toggle_theme_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return ThemeToggleResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "toggle_theme_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let request_user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ThemeToggleResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return ThemeToggleResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "toggle_theme_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut store = RedisPreferenceStore::new(&mut *redis_conn, request_user.id);
        let mutations = match theme_on_toggle(&mut store, json.checked) {
            Ok(val) => val,
            Err(err) => {
                return ThemeToggleResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.layout",
                        "toggle_theme_api",
                        "theme_on_toggle",
                        &err.to_string(),
                    ),
                ))
            }
        };

        ThemeToggleResponses::Ok(Json(ThemeToggleResponse {
            theme: Theme::from_checked(json.checked).to_string(),
            mutations: class_mutations(&mutations),
        }))
    }
}
