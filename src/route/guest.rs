use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        membership::{authorize_wedding, parse_id, WeddingAccess},
        security::{authorize, BearerAuthorization},
        utils::non_blank,
    },
    model::guest::{Guest, GuestCategory, GuestSide, GuestStatus},
    repository::guest::{
        create_guest, delete_guest, get_guest_by_id, paginate_guest, update_guest, GuestFilter,
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
            PaginateResponse,
        },
        guest::{
            DetailGuest, GetPaginateGuestResponses, GuestCreateResponses, GuestRequest,
            GuestStatusRequest, GuestUpdateResponses,
        },
        wedding::WeddingDeleteResponses,
    },
    AppState,
};

#[derive(Tags)]
enum ApiGuestTags {
    Guest,
}

pub struct ApiGuest;

/// Copy the form onto `guest`, keeping stored values for absent optional fields.
pub(crate) fn apply_guest_request(guest: &mut Guest, req: &GuestRequest) -> Result<(), String> {
    let first_name = req.first_name.trim();
    if first_name.is_empty() {
        return Err("First name is required".to_string());
    }
    guest.first_name = first_name.to_string();
    if req.last_name.is_some() {
        guest.last_name = non_blank(req.last_name.clone());
    }
    if req.email.is_some() {
        let email = non_blank(req.email.clone());
        if let Some(val) = &email {
            if !val.contains('@') {
                return Err("Invalid email".to_string());
            }
        }
        guest.email = email;
    }
    if req.phone.is_some() {
        guest.phone = non_blank(req.phone.clone());
    }
    if let Some(val) = req.side {
        guest.side = Some(val.as_str().to_string());
    }
    if let Some(val) = req.category {
        guest.category = Some(val.as_str().to_string());
    }
    if req.relationship.is_some() {
        guest.relationship = non_blank(req.relationship.clone());
    }
    if let Some(val) = req.has_plus_one {
        guest.has_plus_one = val;
    }
    if req.plus_one_name.is_some() {
        guest.plus_one_name = non_blank(req.plus_one_name.clone());
    }
    if !guest.has_plus_one {
        guest.plus_one_name = None;
    }
    if req.dietary_notes.is_some() {
        guest.dietary_notes = non_blank(req.dietary_notes.clone());
    }
    if let Some(val) = req.needs_accommodation {
        guest.needs_accommodation = val;
    }
    if let Some(val) = req.needs_transportation {
        guest.needs_transportation = val;
    }
    if let Some(val) = req.table_number {
        if val < 1 {
            return Err("Table number must be positive".to_string());
        }
        guest.table_number = Some(val);
    }
    if let Some(val) = req.status {
        guest.status = val.as_str().to_string();
    }
    if req.notes.is_some() {
        guest.notes = non_blank(req.notes.clone());
    }
    Ok(())
}

fn blank_guest(wedding_id: Uuid) -> Guest {
    let now = Local::now().fixed_offset();
    Guest {
        id: Uuid::now_v7(),
        wedding_id,
        first_name: String::new(),
        last_name: None,
        email: None,
        phone: None,
        side: None,
        category: None,
        relationship: None,
        has_plus_one: false,
        plus_one_name: None,
        dietary_notes: None,
        needs_accommodation: false,
        needs_transportation: false,
        table_number: None,
        status: GuestStatus::default().as_str().to_string(),
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

#[OpenApi]
impl ApiGuest {
    #[oai(path = "/weddings/guests", method = "get", tag = "ApiGuestTags::Guest")]
    #[allow(clippy::too_many_arguments)]
    async fn get_paginate_guest_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        Query(status): Query<Option<GuestStatus>>,
        Query(side): Query<Option<GuestSide>>,
        Query(category): Query<Option<GuestCategory>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateGuestResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.guest",
            "get_paginate_guest_api",
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
            "route.guest",
            "get_paginate_guest_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(50);
        let filter = GuestFilter {
            search,
            status,
            side,
            category,
        };
        match paginate_guest(&mut tx, &wedding.id, page, page_size, filter).await {
            Ok((data, counts, page_count)) => {
                GetPaginateGuestResponses::Ok(Json(PaginateResponse {
                    counts,
                    page,
                    page_count,
                    page_size,
                    results: data.into_iter().map(DetailGuest::from).collect(),
                }))
            }
            Err(err) => GetPaginateGuestResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.guest",
                    "get_paginate_guest_api",
                    "paginate guest",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/weddings/guests", method = "post", tag = "ApiGuestTags::Guest")]
    async fn create_guest_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        json: Json<GuestRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GuestCreateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.guest",
            "create_guest_api",
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
            WeddingAccess::Edit,
            "route.guest",
            "create_guest_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let mut guest = blank_guest(wedding.id);
        if let Err(message) = apply_guest_request(&mut guest, &json) {
            return GuestCreateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        if let Err(err) = create_guest(&mut tx, &guest).await {
            return GuestCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.guest",
                    "create_guest_api",
                    "create guest",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return GuestCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.guest",
                    "create_guest_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        GuestCreateResponses::Created(Json(MessageResponse {
            message: "Guest added successfully".to_string(),
            data: guest.into(),
        }))
    }

    #[oai(path = "/weddings/guests", method = "put", tag = "ApiGuestTags::Guest")]
    async fn update_guest_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(guest_id): Query<Option<String>>,
        json: Json<GuestRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GuestUpdateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.guest",
            "update_guest_api",
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
            WeddingAccess::Edit,
            "route.guest",
            "update_guest_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let mut guest =
            match find_guest(&mut tx, &wedding.id, guest_id.as_deref(), "update_guest_api").await
            {
                Ok(val) => val,
                Err(err) => return err,
            };

        if let Err(message) = apply_guest_request(&mut guest, &json) {
            return GuestUpdateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        save_guest(tx, guest, "update_guest_api", "Guest updated successfully").await
    }

    /// RSVP change only.
    #[oai(path = "/weddings/guests/status", method = "put", tag = "ApiGuestTags::Guest")]
    async fn update_guest_status_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(guest_id): Query<Option<String>>,
        json: Json<GuestStatusRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GuestUpdateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.guest",
            "update_guest_status_api",
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
            WeddingAccess::Edit,
            "route.guest",
            "update_guest_status_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let mut guest = match find_guest(
            &mut tx,
            &wedding.id,
            guest_id.as_deref(),
            "update_guest_status_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err,
        };

        guest.status = json.status.as_str().to_string();
        save_guest(tx, guest, "update_guest_status_api", "Guest status updated").await
    }

    #[oai(path = "/weddings/guests", method = "delete", tag = "ApiGuestTags::Guest")]
    async fn delete_guest_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(guest_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingDeleteResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.guest",
            "delete_guest_api",
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
            WeddingAccess::Edit,
            "route.guest",
            "delete_guest_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let guest_id = match parse_id(guest_id.as_deref(), "Guest") {
            Ok(val) => val,
            Err(err) => return WeddingDeleteResponses::BadRequest(Json(err)),
        };

        match delete_guest(&mut tx, &wedding.id, &guest_id).await {
            Ok(0) => {
                return WeddingDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "guest",
                    "id",
                    &guest_id.to_string(),
                )))
            }
            Ok(_) => {}
            Err(err) => {
                return WeddingDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.guest",
                        "delete_guest_api",
                        "delete guest",
                        &err.to_string(),
                    ),
                ))
            }
        }
        if let Err(err) = tx.commit().await {
            return WeddingDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.guest",
                    "delete_guest_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        WeddingDeleteResponses::NoContent
    }
}

async fn find_guest(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    guest_id: Option<&str>,
    function: &str,
) -> Result<Guest, GuestUpdateResponses> {
    let guest_id = parse_id(guest_id, "Guest")
        .map_err(|err| GuestUpdateResponses::BadRequest(Json(err)))?;
    match get_guest_by_id(tx, wedding_id, &guest_id).await {
        Ok(Some(val)) => Ok(val),
        Ok(None) => Err(GuestUpdateResponses::NotFound(Json(NotFoundResponse::new(
            "guest",
            "id",
            &guest_id.to_string(),
        )))),
        Err(err) => Err(GuestUpdateResponses::InternalServerError(Json(
            InternalServerErrorResponse::new(
                "route.guest",
                function,
                "get guest by id",
                &err.to_string(),
            ),
        ))),
    }
}

async fn save_guest(
    mut tx: Transaction<'static, Postgres>,
    mut guest: Guest,
    function: &str,
    message: &str,
) -> GuestUpdateResponses {
    let now = Local::now().fixed_offset();
    if let Err(err) = update_guest(&mut tx, &mut guest, &now).await {
        return GuestUpdateResponses::InternalServerError(Json(InternalServerErrorResponse::new(
            "route.guest",
            function,
            "update guest",
            &err.to_string(),
        )));
    }
    if let Err(err) = tx.commit().await {
        return GuestUpdateResponses::InternalServerError(Json(InternalServerErrorResponse::new(
            "route.guest",
            function,
            "commit transaction",
            &err.to_string(),
        )));
    }
    GuestUpdateResponses::Ok(Json(MessageResponse {
        message: message.to_string(),
        data: guest.into(),
    }))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{apply_guest_request, blank_guest};
    use crate::{model::guest::GuestSide, schema::guest::GuestRequest};

    fn request(first_name: &str) -> GuestRequest {
        GuestRequest {
            first_name: first_name.to_string(),
            last_name: None,
            email: None,
            phone: None,
            side: None,
            category: None,
            relationship: None,
            has_plus_one: None,
            plus_one_name: None,
            dietary_notes: None,
            needs_accommodation: None,
            needs_transportation: None,
            table_number: None,
            status: None,
            notes: None,
        }
    }

    #[test]
    fn test_plus_one_name_needs_plus_one() {
        let mut guest = blank_guest(Uuid::now_v7());
        let req = GuestRequest {
            has_plus_one: Some(true),
            plus_one_name: Some("Kabir".to_string()),
            side: Some(GuestSide::Bride),
            ..request("Asha")
        };
        assert!(apply_guest_request(&mut guest, &req).is_ok());
        assert_eq!(guest.plus_one_name.as_deref(), Some("Kabir"));
        assert_eq!(guest.side.as_deref(), Some("bride"));

        let req = GuestRequest {
            has_plus_one: Some(false),
            ..request("Asha")
        };
        assert!(apply_guest_request(&mut guest, &req).is_ok());
        assert!(guest.plus_one_name.is_none());
    }

    #[test]
    fn test_invalid_guest_requests() {
        let mut guest = blank_guest(Uuid::now_v7());
        assert_eq!(
            apply_guest_request(&mut guest, &request(" ")),
            Err("First name is required".to_string())
        );
        let req = GuestRequest {
            email: Some("asha.local".to_string()),
            ..request("Asha")
        };
        assert_eq!(
            apply_guest_request(&mut guest, &req),
            Err("Invalid email".to_string())
        );
        let req = GuestRequest {
            table_number: Some(0),
            ..request("Asha")
        };
        assert_eq!(
            apply_guest_request(&mut guest, &req),
            Err("Table number must be positive".to_string())
        );
    }
}
