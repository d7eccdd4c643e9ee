use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        security::{authorize, BearerAuthorization},
        utils::{non_blank, parse_date_opt},
    },
    model::{
        inquiry::{Inquiry, InquiryPriority, InquiryStatus},
        profile::ProfileRole,
    },
    repository::{
        inquiry::{
            create_inquiry, get_inquiry_by_id, paginate_inquiry, update_inquiry, InquiryFilter,
        },
        venue::get_venue_by_id,
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
            PaginateResponse,
        },
        inquiry::{
            DetailInquiry, GetPaginateInquiryResponses, InquiryCreateRequest,
            InquiryCreateResponses, InquiryDetailResponses, InquiryNotesRequest,
            InquiryPriorityRequest, InquiryStatusRequest, InquiryUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiInquiryTags {
    Inquiry,
    AdminInquiry,
}

pub struct ApiInquiry;

/// Build a fresh `new`/`normal` inquiry from a public submission.
fn inquiry_from_request(req: &InquiryCreateRequest) -> Result<Inquiry, String> {
    let name = non_blank(Some(req.name.clone())).ok_or("Name is required")?;
    let email = non_blank(Some(req.email.clone())).ok_or("Email is required")?;
    if !email.contains('@') {
        return Err("Invalid email address".to_string());
    }
    let phone = non_blank(Some(req.phone.clone())).ok_or("Phone is required")?;
    let message = non_blank(Some(req.message.clone())).ok_or("Message is required")?;
    let venue_id = match non_blank(req.venue_id.clone()) {
        Some(val) => Some(Uuid::parse_str(&val).map_err(|_| "Invalid venue id".to_string())?),
        None => None,
    };
    let wedding_date = parse_date_opt(req.wedding_date.as_deref())
        .map_err(|_| "Invalid wedding date, expected YYYY-MM-DD".to_string())?;
    if let Some(val) = req.guest_count {
        if val <= 0 {
            return Err("Guest count must be positive".to_string());
        }
    }

    let now = Local::now().fixed_offset();
    Ok(Inquiry {
        id: Uuid::now_v7(),
        venue_id,
        destination: non_blank(req.destination.clone()),
        name,
        email,
        phone,
        wedding_date,
        guest_count: req.guest_count,
        budget_range: non_blank(req.budget_range.clone()),
        message,
        source_page: non_blank(req.source_page.clone()),
        status: InquiryStatus::New.as_str().to_string(),
        priority: InquiryPriority::Normal.as_str().to_string(),
        notes: None,
        created_at: now,
        updated_at: now,
    })
}

#[OpenApi]
impl ApiInquiry {
    #[oai(path = "/inquiries", method = "post", tag = "ApiInquiryTags::Inquiry")]
    async fn create_inquiry_api(
        &self,
        json: Json<InquiryCreateRequest>,
        state: Data<&Arc<AppState>>,
    ) -> InquiryCreateResponses {
        let inquiry = match inquiry_from_request(&json) {
            Ok(val) => val,
            Err(message) => {
                return InquiryCreateResponses::BadRequest(Json(BadRequestResponse::new(&message)))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return InquiryCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.inquiry",
                        "create_inquiry_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        if let Some(venue_id) = inquiry.venue_id {
            match get_venue_by_id(&mut tx, &venue_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return InquiryCreateResponses::BadRequest(Json(BadRequestResponse::new(
                        &format!("venue with id = {} not found", venue_id),
                    )))
                }
                Err(err) => {
                    return InquiryCreateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.inquiry",
                            "create_inquiry_api",
                            "get venue by id",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }

        if let Err(err) = create_inquiry(&mut tx, &inquiry).await {
            return InquiryCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.inquiry",
                    "create_inquiry_api",
                    "create inquiry",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return InquiryCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.inquiry",
                    "create_inquiry_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        tracing::info!("new inquiry {} from {}", inquiry.id, inquiry.email);
        InquiryCreateResponses::Created(Json(MessageResponse {
            message: "Inquiry submitted successfully! Our team will contact you shortly."
                .to_string(),
            data: inquiry.into(),
        }))
    }

    #[oai(path = "/admin/inquiries", method = "get", tag = "ApiInquiryTags::AdminInquiry")]
    async fn get_paginate_inquiry_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        Query(status): Query<Option<InquiryStatus>>,
        Query(priority): Query<Option<InquiryPriority>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateInquiryResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.inquiry",
            "get_paginate_inquiry_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        let filter = InquiryFilter {
            search,
            status,
            priority,
            vendor_id: None,
        };
        match paginate_inquiry(&mut tx, page, page_size, filter).await {
            Ok((data, counts, page_count)) => {
                GetPaginateInquiryResponses::Ok(Json(PaginateResponse {
                    counts,
                    page,
                    page_count,
                    page_size,
                    results: data.into_iter().map(DetailInquiry::from).collect(),
                }))
            }
            Err(err) => GetPaginateInquiryResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.inquiry",
                    "get_paginate_inquiry_api",
                    "paginate inquiry",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/admin/inquiries/detail",
        method = "get",
        tag = "ApiInquiryTags::AdminInquiry"
    )]
    async fn get_detail_inquiry_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> InquiryDetailResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.inquiry",
            "get_detail_inquiry_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let inquiry_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return InquiryDetailResponses::NotFound(Json(NotFoundResponse::new(
                    "inquiry", "id", &id,
                )))
            }
        };
        match get_inquiry_by_id(&mut tx, &inquiry_id).await {
            Ok(Some(val)) => InquiryDetailResponses::Ok(Json(val.into())),
            Ok(None) => InquiryDetailResponses::NotFound(Json(NotFoundResponse::new(
                "inquiry", "id", &id,
            ))),
            Err(err) => InquiryDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.inquiry",
                    "get_detail_inquiry_api",
                    "get inquiry by id",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/admin/inquiries/status",
        method = "put",
        tag = "ApiInquiryTags::AdminInquiry"
    )]
    async fn update_inquiry_status_api(
        &self,
        Query(id): Query<String>,
        json: Json<InquiryStatusRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> InquiryUpdateResponses {
        let (tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.inquiry",
            "update_inquiry_status_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let status = json.status;
        modify_inquiry(
            tx,
            &id,
            None,
            "update_inquiry_status_api",
            "Inquiry status updated",
            |inquiry| inquiry.status = status.as_str().to_string(),
        )
        .await
    }

    #[oai(
        path = "/admin/inquiries/notes",
        method = "put",
        tag = "ApiInquiryTags::AdminInquiry"
    )]
    async fn update_inquiry_notes_api(
        &self,
        Query(id): Query<String>,
        json: Json<InquiryNotesRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> InquiryUpdateResponses {
        let (tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.inquiry",
            "update_inquiry_notes_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let notes = non_blank(json.notes.clone());
        modify_inquiry(
            tx,
            &id,
            None,
            "update_inquiry_notes_api",
            "Notes saved",
            |inquiry| inquiry.notes = notes,
        )
        .await
    }

    #[oai(
        path = "/admin/inquiries/priority",
        method = "put",
        tag = "ApiInquiryTags::AdminInquiry"
    )]
    async fn update_inquiry_priority_api(
        &self,
        Query(id): Query<String>,
        json: Json<InquiryPriorityRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> InquiryUpdateResponses {
        let (tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.inquiry",
            "update_inquiry_priority_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let priority = json.priority;
        modify_inquiry(
            tx,
            &id,
            None,
            "update_inquiry_priority_api",
            "Inquiry priority updated",
            |inquiry| inquiry.priority = priority.as_str().to_string(),
        )
        .await
    }
}

/// Load the inquiry, apply `change` and persist it. With `owner` set the
/// inquiry must be on one of that vendor's venues.
pub(crate) async fn modify_inquiry<F: FnOnce(&mut Inquiry)>(
    mut tx: Transaction<'static, Postgres>,
    id: &str,
    owner: Option<Uuid>,
    function: &str,
    message: &str,
    change: F,
) -> InquiryUpdateResponses {
    let inquiry_id = match Uuid::parse_str(id) {
        Ok(val) => val,
        Err(_) => {
            return InquiryUpdateResponses::NotFound(Json(NotFoundResponse::new(
                "inquiry", "id", id,
            )))
        }
    };
    let mut inquiry = match get_inquiry_by_id(&mut tx, &inquiry_id).await {
        Ok(Some(val)) => val,
        Ok(None) => {
            return InquiryUpdateResponses::NotFound(Json(NotFoundResponse::new(
                "inquiry", "id", id,
            )))
        }
        Err(err) => {
            return InquiryUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.inquiry",
                    function,
                    "get inquiry by id",
                    &err.to_string(),
                ),
            ))
        }
    };

    if let Some(owner) = owner {
        let venue = match inquiry.venue_id {
            Some(venue_id) => match get_venue_by_id(&mut tx, &venue_id).await {
                Ok(val) => val,
                Err(err) => {
                    return InquiryUpdateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.inquiry",
                            function,
                            "get venue by id",
                            &err.to_string(),
                        ),
                    ))
                }
            },
            None => None,
        };
        if venue.and_then(|x| x.vendor_id) != Some(owner) {
            tracing::warn!("vendor {} tried to update inquiry {}", owner, inquiry.id);
            return InquiryUpdateResponses::Forbidden(Json(Default::default()));
        }
    }

    change(&mut inquiry);
    let now = Local::now().fixed_offset();
    if let Err(err) = update_inquiry(&mut tx, &mut inquiry, &now).await {
        return InquiryUpdateResponses::InternalServerError(Json(
            InternalServerErrorResponse::new(
                "route.inquiry",
                function,
                "update inquiry",
                &err.to_string(),
            ),
        ));
    }
    if let Err(err) = tx.commit().await {
        return InquiryUpdateResponses::InternalServerError(Json(
            InternalServerErrorResponse::new(
                "route.inquiry",
                function,
                "commit transaction",
                &err.to_string(),
            ),
        ));
    }
    InquiryUpdateResponses::Ok(Json(MessageResponse {
        message: message.to_string(),
        data: inquiry.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> InquiryCreateRequest {
        InquiryCreateRequest {
            venue_id: None,
            destination: Some("Udaipur".to_string()),
            name: "Priya Sharma".to_string(),
            email: "priya@local.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            wedding_date: Some("2027-02-14".to_string()),
            guest_count: Some(250),
            budget_range: Some("50L - 1Cr".to_string()),
            message: "Looking for a lakeside palace".to_string(),
            source_page: None,
        }
    }

    #[test]
    fn test_inquiry_from_request() {
        let inquiry = inquiry_from_request(&request()).unwrap();
        assert_eq!(inquiry.status, "new");
        assert_eq!(inquiry.priority, "normal");
        assert_eq!(
            inquiry.wedding_date.map(|x| x.to_string()),
            Some("2027-02-14".to_string())
        );
    }

    #[test]
    fn test_inquiry_from_request_rejects_invalid() {
        let mut req = request();
        req.phone = "   ".to_string();
        assert_eq!(inquiry_from_request(&req).unwrap_err(), "Phone is required");

        let mut req = request();
        req.wedding_date = Some("14/02/2027".to_string());
        assert!(inquiry_from_request(&req).is_err());

        let mut req = request();
        req.venue_id = Some("not-a-uuid".to_string());
        assert_eq!(inquiry_from_request(&req).unwrap_err(), "Invalid venue id");
    }
}
