use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use uuid::Uuid;

use crate::{
    core::{
        membership::{authorize_wedding, parse_id, WeddingAccess},
        security::{authorize, BearerAuthorization},
        utils::{datetime_to_string, non_blank, parse_date_opt},
    },
    model::wedding::{
        website_slug, DestinationType, InvitationStatus, MemberRole, PlanningStatus, Wedding,
        WeddingMember,
    },
    repository::{
        profile::get_profile_by_email,
        wedding::{
            create_wedding, create_wedding_member, delete_wedding, delete_wedding_member,
            get_wedding_member, get_wedding_members, get_wedding_stats,
            paginate_wedding_by_profile, update_wedding,
        },
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
            PaginateResponse,
        },
        wedding::{
            DetailWedding, DetailWeddingMember, GetPaginateWeddingResponses,
            WeddingCreateResponses, WeddingDeleteResponses, WeddingDetailResponses,
            WeddingMemberCreateRequest, WeddingMemberCreateResponses, WeddingMemberListResponses,
            WeddingRequest, WeddingStatsResponse, WeddingStatsResponses, WeddingUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiWeddingTags {
    Wedding,
    WeddingMember,
}

pub struct ApiWedding;

/// Copy the form onto `wedding`, keeping stored values for absent optional fields.
pub(crate) fn apply_wedding_request(
    wedding: &mut Wedding,
    req: &WeddingRequest,
) -> Result<(), String> {
    let bride_name = req.bride_name.trim();
    let groom_name = req.groom_name.trim();
    if bride_name.is_empty() || groom_name.is_empty() {
        return Err("Bride and groom names are required".to_string());
    }
    wedding.bride_name = bride_name.to_string();
    wedding.groom_name = groom_name.to_string();
    if let Some(val) = &req.wedding_date {
        wedding.wedding_date = parse_date_opt(Some(val.as_str()))
            .map_err(|_| "Invalid wedding date".to_string())?;
    }
    if req.primary_city.is_some() {
        wedding.primary_city = non_blank(req.primary_city.clone());
    }
    if let Some(val) = req.destination_type {
        wedding.destination_type = val.as_str().to_string();
    }
    if let Some(val) = req.estimated_guests {
        if val < 0 {
            return Err("Estimated guests cannot be negative".to_string());
        }
        wedding.estimated_guests = Some(val);
    }
    if let Some(val) = req.total_budget {
        if val < 0 {
            return Err("Total budget cannot be negative".to_string());
        }
        wedding.total_budget = Some(val);
    }
    if let Some(val) = non_blank(req.currency.clone()) {
        if val.len() != 3 || !val.chars().all(|x| x.is_ascii_alphabetic()) {
            return Err("Currency must be a 3-letter code".to_string());
        }
        wedding.currency = val.to_uppercase();
    }
    if let Some(val) = req.planning_status {
        wedding.planning_status = val.as_str().to_string();
    }
    if req.notes.is_some() {
        wedding.notes = non_blank(req.notes.clone());
    }
    Ok(())
}

fn blank_wedding(created_by: Uuid) -> Wedding {
    let now = Local::now().fixed_offset();
    Wedding {
        id: Uuid::now_v7(),
        bride_name: String::new(),
        groom_name: String::new(),
        wedding_date: None,
        primary_city: None,
        destination_type: DestinationType::default().as_str().to_string(),
        estimated_guests: None,
        total_budget: None,
        currency: "INR".to_string(),
        planning_status: PlanningStatus::default().as_str().to_string(),
        website_slug: String::new(),
        created_by: Some(created_by),
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

#[OpenApi]
impl ApiWedding {
    /// Weddings the caller is a member of.
    #[oai(path = "/weddings", method = "get", tag = "ApiWeddingTags::Wedding")]
    async fn get_paginate_wedding_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateWeddingResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "get_paginate_wedding_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        match paginate_wedding_by_profile(&mut tx, &profile.id, page, page_size, search).await {
            Ok((data, counts, page_count)) => {
                GetPaginateWeddingResponses::Ok(Json(PaginateResponse {
                    counts,
                    page,
                    page_count,
                    page_size,
                    results: data.into_iter().map(DetailWedding::from).collect(),
                }))
            }
            Err(err) => GetPaginateWeddingResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "get_paginate_wedding_api",
                    "paginate wedding",
                    &err.to_string(),
                ),
            )),
        }
    }

    /// The caller becomes the owner of the new wedding.
    #[oai(path = "/weddings", method = "post", tag = "ApiWeddingTags::Wedding")]
    async fn create_wedding_api(
        &self,
        json: Json<WeddingRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingCreateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "create_wedding_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let mut wedding = blank_wedding(profile.id);
        if let Err(message) = apply_wedding_request(&mut wedding, &json) {
            return WeddingCreateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        wedding.website_slug = website_slug(&wedding.bride_name, &wedding.groom_name, &wedding.id);
        let owner = WeddingMember {
            id: Uuid::now_v7(),
            wedding_id: wedding.id,
            profile_id: profile.id,
            role: MemberRole::Owner.as_str().to_string(),
            invitation_status: InvitationStatus::Accepted.as_str().to_string(),
            invited_by: None,
            created_at: wedding.created_at,
        };

        if let Err(err) = create_wedding(&mut tx, &wedding).await {
            return WeddingCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "create_wedding_api",
                    "create wedding",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = create_wedding_member(&mut tx, &owner).await {
            return WeddingCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "create_wedding_api",
                    "create owner member",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return WeddingCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "create_wedding_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        WeddingCreateResponses::Created(Json(MessageResponse {
            message: "Wedding created successfully".to_string(),
            data: wedding.into(),
        }))
    }

    #[oai(path = "/weddings/detail", method = "get", tag = "ApiWeddingTags::Wedding")]
    async fn get_detail_wedding_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingDetailResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "get_detail_wedding_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Read,
            "route.wedding",
            "get_detail_wedding_api",
        )
        .await
        {
            Ok((wedding, _)) => WeddingDetailResponses::Ok(Json(wedding.into())),
            Err(err) => err.into(),
        }
    }

    #[oai(path = "/weddings", method = "put", tag = "ApiWeddingTags::Wedding")]
    async fn update_wedding_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        json: Json<WeddingRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingUpdateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "update_wedding_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (mut wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Edit,
            "route.wedding",
            "update_wedding_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        if let Err(message) = apply_wedding_request(&mut wedding, &json) {
            return WeddingUpdateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        let now = Local::now().fixed_offset();
        if let Err(err) = update_wedding(&mut tx, &mut wedding, &now).await {
            return WeddingUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "update_wedding_api",
                    "update wedding",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return WeddingUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "update_wedding_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        WeddingUpdateResponses::Ok(Json(MessageResponse {
            message: "Wedding updated successfully".to_string(),
            data: wedding.into(),
        }))
    }

    /// Owner only. Guests, budget items, tasks and members go with it.
    #[oai(path = "/weddings", method = "delete", tag = "ApiWeddingTags::Wedding")]
    async fn delete_wedding_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingDeleteResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "delete_wedding_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Owner,
            "route.wedding",
            "delete_wedding_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        if let Err(err) = delete_wedding(&mut tx, &wedding.id).await {
            return WeddingDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "delete_wedding_api",
                    "delete wedding",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return WeddingDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "delete_wedding_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        WeddingDeleteResponses::NoContent
    }

    #[oai(path = "/weddings/stats", method = "get", tag = "ApiWeddingTags::Wedding")]
    async fn get_wedding_stats_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingStatsResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "get_wedding_stats_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Read,
            "route.wedding",
            "get_wedding_stats_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let days_until_wedding = wedding
            .wedding_date
            .map(|date| (date - Local::now().date_naive()).num_days());
        match get_wedding_stats(&mut tx, &wedding.id).await {
            Ok(stats) => WeddingStatsResponses::Ok(Json(WeddingStatsResponse::new(
                stats,
                days_until_wedding,
            ))),
            Err(err) => WeddingStatsResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "get_wedding_stats_api",
                    "get wedding stats",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/weddings/members",
        method = "get",
        tag = "ApiWeddingTags::WeddingMember"
    )]
    async fn get_wedding_members_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingMemberListResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "get_wedding_members_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Read,
            "route.wedding",
            "get_wedding_members_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        match get_wedding_members(&mut tx, &wedding.id).await {
            Ok(data) => WeddingMemberListResponses::Ok(Json(
                data.into_iter().map(DetailWeddingMember::from).collect(),
            )),
            Err(err) => WeddingMemberListResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "get_wedding_members_api",
                    "get wedding members",
                    &err.to_string(),
                ),
            )),
        }
    }

    /// Owners and co-owners add an existing profile by email.
    #[oai(
        path = "/weddings/members",
        method = "post",
        tag = "ApiWeddingTags::WeddingMember"
    )]
    async fn create_wedding_member_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        json: Json<WeddingMemberCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingMemberCreateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "create_wedding_member_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::ManageMembers,
            "route.wedding",
            "create_wedding_member_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        if json.role == MemberRole::Owner {
            return WeddingMemberCreateResponses::BadRequest(Json(BadRequestResponse::new(
                "A wedding has only one owner",
            )));
        }
        let email = json.email.trim();
        if email.is_empty() {
            return WeddingMemberCreateResponses::BadRequest(Json(BadRequestResponse::new(
                "Email is required",
            )));
        }
        let member_profile = match get_profile_by_email(&mut tx, email).await {
            Ok(Some(val)) if val.is_active => val,
            Ok(_) => {
                return WeddingMemberCreateResponses::BadRequest(Json(BadRequestResponse::new(
                    &format!("profile with email = {} not found", email),
                )))
            }
            Err(err) => {
                return WeddingMemberCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.wedding",
                        "create_wedding_member_api",
                        "get profile by email",
                        &err.to_string(),
                    ),
                ))
            }
        };
        match get_wedding_member(&mut tx, &wedding.id, &member_profile.id).await {
            Ok(None) => {}
            Ok(Some(_)) => {
                return WeddingMemberCreateResponses::BadRequest(Json(BadRequestResponse::new(
                    "Profile is already a member of this wedding",
                )))
            }
            Err(err) => {
                return WeddingMemberCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.wedding",
                        "create_wedding_member_api",
                        "get wedding member",
                        &err.to_string(),
                    ),
                ))
            }
        }

        let member = WeddingMember {
            id: Uuid::now_v7(),
            wedding_id: wedding.id,
            profile_id: member_profile.id,
            role: json.role.as_str().to_string(),
            invitation_status: InvitationStatus::Accepted.as_str().to_string(),
            invited_by: Some(profile.id),
            created_at: Local::now().fixed_offset(),
        };
        if let Err(err) = create_wedding_member(&mut tx, &member).await {
            return WeddingMemberCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "create_wedding_member_api",
                    "create wedding member",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return WeddingMemberCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "create_wedding_member_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        WeddingMemberCreateResponses::Created(Json(MessageResponse {
            message: "Member added successfully".to_string(),
            data: DetailWeddingMember {
                id: member.id.to_string(),
                profile_id: member.profile_id.to_string(),
                email: member_profile.email,
                full_name: member_profile.full_name,
                role: json.role,
                invitation_status: InvitationStatus::Accepted,
                created_at: datetime_to_string(member.created_at),
            },
        }))
    }

    /// Owners and co-owners remove members; any member may remove themselves.
    /// The owner always stays.
    #[oai(
        path = "/weddings/members",
        method = "delete",
        tag = "ApiWeddingTags::WeddingMember"
    )]
    async fn delete_wedding_member_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(profile_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingDeleteResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.wedding",
            "delete_wedding_member_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let target_id = match parse_id(profile_id.as_deref(), "Profile") {
            Ok(val) => val,
            Err(err) => return WeddingDeleteResponses::BadRequest(Json(err)),
        };
        let access = if target_id == profile.id {
            WeddingAccess::Read
        } else {
            WeddingAccess::ManageMembers
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            access,
            "route.wedding",
            "delete_wedding_member_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let target = match get_wedding_member(&mut tx, &wedding.id, &target_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return WeddingDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "wedding member",
                    "profile_id",
                    &target_id.to_string(),
                )))
            }
            Err(err) => {
                return WeddingDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.wedding",
                        "delete_wedding_member_api",
                        "get wedding member",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if target.role() == MemberRole::Owner {
            return WeddingDeleteResponses::BadRequest(Json(BadRequestResponse::new(
                "The wedding owner cannot be removed",
            )));
        }
        if let Err(err) = delete_wedding_member(&mut tx, &wedding.id, &target_id).await {
            return WeddingDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "delete_wedding_member_api",
                    "delete wedding member",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return WeddingDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.wedding",
                    "delete_wedding_member_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        WeddingDeleteResponses::NoContent
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::{apply_wedding_request, blank_wedding};
    use crate::{model::wedding::PlanningStatus, schema::wedding::WeddingRequest};

    fn request(bride_name: &str, groom_name: &str) -> WeddingRequest {
        WeddingRequest {
            bride_name: bride_name.to_string(),
            groom_name: groom_name.to_string(),
            wedding_date: None,
            primary_city: None,
            destination_type: None,
            estimated_guests: None,
            total_budget: None,
            currency: None,
            planning_status: None,
            notes: None,
        }
    }

    #[test]
    fn test_apply_wedding_request() {
        let mut wedding = blank_wedding(Uuid::now_v7());
        let req = WeddingRequest {
            wedding_date: Some("2026-12-12".to_string()),
            currency: Some(" usd ".to_string()),
            planning_status: Some(PlanningStatus::Booked),
            total_budget: Some(5_000_000),
            ..request(" Asha ", "Rohan")
        };
        assert!(apply_wedding_request(&mut wedding, &req).is_ok());
        assert_eq!(wedding.bride_name, "Asha");
        assert_eq!(wedding.wedding_date, NaiveDate::from_ymd_opt(2026, 12, 12));
        assert_eq!(wedding.currency, "USD");
        assert_eq!(wedding.planning_status, "booked");

        // Absent fields keep their value, a blank date clears it
        let req = WeddingRequest {
            wedding_date: Some("".to_string()),
            ..request("Asha", "Rohan")
        };
        assert!(apply_wedding_request(&mut wedding, &req).is_ok());
        assert_eq!(wedding.total_budget, Some(5_000_000));
        assert!(wedding.wedding_date.is_none());
    }

    #[test]
    fn test_invalid_wedding_requests() {
        let mut wedding = blank_wedding(Uuid::now_v7());
        assert_eq!(
            apply_wedding_request(&mut wedding, &request("Asha", "  ")),
            Err("Bride and groom names are required".to_string())
        );
        let req = WeddingRequest {
            wedding_date: Some("12/12/2026".to_string()),
            ..request("Asha", "Rohan")
        };
        assert_eq!(
            apply_wedding_request(&mut wedding, &req),
            Err("Invalid wedding date".to_string())
        );
        let req = WeddingRequest {
            estimated_guests: Some(-1),
            ..request("Asha", "Rohan")
        };
        assert_eq!(
            apply_wedding_request(&mut wedding, &req),
            Err("Estimated guests cannot be negative".to_string())
        );
        let req = WeddingRequest {
            currency: Some("Rupees".to_string()),
            ..request("Asha", "Rohan")
        };
        assert_eq!(
            apply_wedding_request(&mut wedding, &req),
            Err("Currency must be a 3-letter code".to_string())
        );
    }
}
