use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use uuid::Uuid;

use crate::{
    core::{
        filter::ActiveStatusFilter,
        security::{authorize, BearerAuthorization},
        utils::non_blank,
    },
    model::profile::ProfileRole,
    repository::profile::{
        delete_profile, get_profile_by_id, paginate_profile, profile_stats, update_profile,
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
            PaginateResponse,
        },
        profile::{
            ChangeRoleRequest, DetailProfile, GetPaginateProfileResponses, ProfileDeleteResponses,
            ProfileDetailResponses, ProfileStatsResponse, ProfileStatsResponses,
            ProfileUpdateRequest, ProfileUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiProfileTags {
    AdminUser,
}

pub struct ApiProfile;

#[OpenApi]
impl ApiProfile {
    #[oai(path = "/admin/users", method = "get", tag = "ApiProfileTags::AdminUser")]
    #[allow(clippy::too_many_arguments)]
    async fn get_paginate_profile_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        Query(role): Query<Option<ProfileRole>>,
        Query(status): Query<Option<ActiveStatusFilter>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateProfileResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.profile",
            "get_paginate_profile_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        let (data, counts, page_count) = match paginate_profile(
            &mut tx,
            page,
            page_size,
            search,
            role,
            status.unwrap_or_default(),
        )
        .await
        {
            Ok(val) => val,
            Err(err) => {
                return GetPaginateProfileResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "get_paginate_profile_api",
                        "paginate profile",
                        &err.to_string(),
                    ),
                ))
            }
        };

        GetPaginateProfileResponses::Ok(Json(PaginateResponse {
            counts,
            page,
            page_count,
            page_size,
            results: data.into_iter().map(DetailProfile::from).collect(),
        }))
    }

    #[oai(
        path = "/admin/users/stats",
        method = "get",
        tag = "ApiProfileTags::AdminUser"
    )]
    async fn get_profile_stats_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProfileStatsResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.profile",
            "get_profile_stats_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        match profile_stats(&mut tx).await {
            Ok(val) => ProfileStatsResponses::Ok(Json(ProfileStatsResponse {
                total: val.total,
                active: val.active,
                vendors: val.vendors,
                admins: val.admins,
            })),
            Err(err) => ProfileStatsResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "get_profile_stats_api",
                    "profile stats",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/admin/users/detail",
        method = "get",
        tag = "ApiProfileTags::AdminUser"
    )]
    async fn get_detail_profile_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProfileDetailResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.profile",
            "get_detail_profile_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let profile_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ProfileDetailResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
        };
        match get_profile_by_id(&mut tx, &profile_id).await {
            Ok(Some(val)) => ProfileDetailResponses::Ok(Json(val.into())),
            Ok(None) => {
                ProfileDetailResponses::NotFound(Json(NotFoundResponse::new("profile", "id", &id)))
            }
            Err(err) => ProfileDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "get_detail_profile_api",
                    "get profile by id",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/admin/users", method = "put", tag = "ApiProfileTags::AdminUser")]
    async fn update_profile_api(
        &self,
        Query(id): Query<String>,
        json: Json<ProfileUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProfileUpdateResponses {
        let (mut tx, request_profile) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.profile",
            "update_profile_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let profile_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ProfileUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
        };
        let mut profile = match get_profile_by_id(&mut tx, &profile_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ProfileUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
            Err(err) => {
                return ProfileUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "update_profile_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if profile.id == request_profile.id && !json.is_active {
            return ProfileUpdateResponses::BadRequest(Json(BadRequestResponse::new(
                "You cannot deactivate your own account",
            )));
        }
        if profile.id == request_profile.id && json.role != ProfileRole::Admin {
            return ProfileUpdateResponses::BadRequest(Json(BadRequestResponse::new(
                "You cannot remove your own admin role",
            )));
        }

        profile.full_name = non_blank(json.full_name.clone());
        profile.phone = non_blank(json.phone.clone());
        profile.role = json.role.as_str().to_string();
        profile.is_active = json.is_active;
        profile.city = non_blank(json.city.clone());
        let now = Local::now().fixed_offset();
        if let Err(err) = update_profile(&mut tx, &mut profile, &now).await {
            return ProfileUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "update_profile_api",
                    "update profile",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return ProfileUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "update_profile_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ProfileUpdateResponses::Ok(Json(MessageResponse {
            message: "User updated successfully".to_string(),
            data: profile.into(),
        }))
    }

    #[oai(
        path = "/admin/users/toggle-active",
        method = "post",
        tag = "ApiProfileTags::AdminUser"
    )]
    async fn toggle_active_profile_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProfileUpdateResponses {
        let (mut tx, request_profile) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.profile",
            "toggle_active_profile_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let profile_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ProfileUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
        };
        let mut profile = match get_profile_by_id(&mut tx, &profile_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ProfileUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
            Err(err) => {
                return ProfileUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "toggle_active_profile_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if profile.id == request_profile.id {
            return ProfileUpdateResponses::BadRequest(Json(BadRequestResponse::new(
                "You cannot deactivate your own account",
            )));
        }

        profile.is_active = !profile.is_active;
        let now = Local::now().fixed_offset();
        if let Err(err) = update_profile(&mut tx, &mut profile, &now).await {
            return ProfileUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "toggle_active_profile_api",
                    "update profile",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return ProfileUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "toggle_active_profile_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        let message = if profile.is_active {
            "User activated successfully"
        } else {
            "User deactivated successfully"
        };
        ProfileUpdateResponses::Ok(Json(MessageResponse {
            message: message.to_string(),
            data: profile.into(),
        }))
    }

    #[oai(
        path = "/admin/users/change-role",
        method = "post",
        tag = "ApiProfileTags::AdminUser"
    )]
    async fn change_role_profile_api(
        &self,
        Query(id): Query<String>,
        json: Json<ChangeRoleRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProfileUpdateResponses {
        let (mut tx, request_profile) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.profile",
            "change_role_profile_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let profile_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ProfileUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
        };
        let mut profile = match get_profile_by_id(&mut tx, &profile_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ProfileUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
            Err(err) => {
                return ProfileUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "change_role_profile_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        if profile.id == request_profile.id && json.role != ProfileRole::Admin {
            return ProfileUpdateResponses::BadRequest(Json(BadRequestResponse::new(
                "You cannot remove your own admin role",
            )));
        }

        profile.role = json.role.as_str().to_string();
        let now = Local::now().fixed_offset();
        if let Err(err) = update_profile(&mut tx, &mut profile, &now).await {
            return ProfileUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "change_role_profile_api",
                    "update profile",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return ProfileUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "change_role_profile_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ProfileUpdateResponses::Ok(Json(MessageResponse {
            message: format!("User role changed to {}", json.role),
            data: profile.into(),
        }))
    }

    #[oai(path = "/admin/users", method = "delete", tag = "ApiProfileTags::AdminUser")]
    async fn delete_profile_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProfileDeleteResponses {
        let (mut tx, request_profile) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.profile",
            "delete_profile_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let profile_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ProfileDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
        };
        if profile_id == request_profile.id {
            return ProfileDeleteResponses::BadRequest(Json(BadRequestResponse::new(
                "You cannot delete your own account",
            )));
        }
        match delete_profile(&mut tx, &profile_id).await {
            Ok(0) => {
                return ProfileDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "profile", "id", &id,
                )))
            }
            Ok(_) => {}
            Err(err) => {
                return ProfileDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "delete_profile_api",
                        "delete profile",
                        &err.to_string(),
                    ),
                ))
            }
        }
        if let Err(err) = tx.commit().await {
            return ProfileDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "delete_profile_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        tracing::info!("profile {} deleted by {}", profile_id, request_profile.id);
        ProfileDeleteResponses::NoContent
    }
}
