use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use uuid::Uuid;

use crate::{
    core::{
        security::{authorize, BearerAuthorization},
        utils::{datetime_to_string, non_blank},
    },
    model::shortlist::Shortlist,
    repository::{
        shortlist::{create_shortlist, delete_shortlist, get_shortlist, paginate_shortlist},
        venue::get_venue_by_id,
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, PaginateResponse,
        },
        shortlist::{
            DetailShortlist, GetPaginateShortlistResponses, ShortlistAction,
            ShortlistDeleteResponses, ShortlistToggleRequest, ShortlistToggleResponse,
            ShortlistToggleResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiShortlistTags {
    Shortlist,
}

pub struct ApiShortlist;

#[OpenApi]
impl ApiShortlist {
    /// Add the venue to the caller's shortlist, or remove it when already there.
    #[oai(path = "/shortlist", method = "post", tag = "ApiShortlistTags::Shortlist")]
    async fn toggle_shortlist_api(
        &self,
        json: Json<ShortlistToggleRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ShortlistToggleResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.shortlist",
            "toggle_shortlist_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let venue_id = match Uuid::parse_str(json.venue_id.trim()) {
            Ok(val) => val,
            Err(_) => {
                return ShortlistToggleResponses::BadRequest(Json(BadRequestResponse::new(
                    "Invalid venue id",
                )))
            }
        };
        match get_venue_by_id(&mut tx, &venue_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return ShortlistToggleResponses::BadRequest(Json(BadRequestResponse::new(
                    &format!("venue with id = {} not found", venue_id),
                )))
            }
            Err(err) => {
                return ShortlistToggleResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.shortlist",
                        "toggle_shortlist_api",
                        "get venue by id",
                        &err.to_string(),
                    ),
                ))
            }
        }

        let existing = match get_shortlist(&mut tx, &profile.id, &venue_id).await {
            Ok(val) => val,
            Err(err) => {
                return ShortlistToggleResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.shortlist",
                        "toggle_shortlist_api",
                        "get shortlist",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let (action, result) = match existing {
            Some(shortlist) => (
                ShortlistAction::Removed,
                delete_shortlist(&mut tx, &shortlist.id).await,
            ),
            None => {
                let shortlist = Shortlist {
                    id: Uuid::now_v7(),
                    profile_id: profile.id,
                    venue_id,
                    notes: non_blank(json.notes.clone()),
                    event_type: non_blank(json.event_type.clone()),
                    created_at: Local::now().fixed_offset(),
                };
                (
                    ShortlistAction::Added,
                    create_shortlist(&mut tx, &shortlist).await,
                )
            }
        };
        if let Err(err) = result {
            return ShortlistToggleResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.shortlist",
                    "toggle_shortlist_api",
                    "toggle shortlist",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return ShortlistToggleResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.shortlist",
                    "toggle_shortlist_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ShortlistToggleResponses::Ok(Json(ShortlistToggleResponse {
            action,
            venue_id: venue_id.to_string(),
        }))
    }

    /// Remove the venue from the caller's shortlist. Succeeds when it was not there.
    #[oai(path = "/shortlist", method = "delete", tag = "ApiShortlistTags::Shortlist")]
    async fn delete_shortlist_api(
        &self,
        Query(venue_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ShortlistDeleteResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.shortlist",
            "delete_shortlist_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let venue_id = match non_blank(venue_id) {
            Some(val) => val,
            None => {
                return ShortlistDeleteResponses::BadRequest(Json(BadRequestResponse::new(
                    "Venue ID is required",
                )))
            }
        };
        let venue_id = match Uuid::parse_str(&venue_id) {
            Ok(val) => val,
            Err(_) => {
                return ShortlistDeleteResponses::BadRequest(Json(BadRequestResponse::new(
                    "Invalid venue id",
                )))
            }
        };

        let existing = match get_shortlist(&mut tx, &profile.id, &venue_id).await {
            Ok(val) => val,
            Err(err) => {
                return ShortlistDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.shortlist",
                        "delete_shortlist_api",
                        "get shortlist",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Some(shortlist) = existing {
            if let Err(err) = delete_shortlist(&mut tx, &shortlist.id).await {
                return ShortlistDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.shortlist",
                        "delete_shortlist_api",
                        "delete shortlist",
                        &err.to_string(),
                    ),
                ));
            }
        }
        if let Err(err) = tx.commit().await {
            return ShortlistDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.shortlist",
                    "delete_shortlist_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ShortlistDeleteResponses::Ok(Json(MessageResponse {
            message: "Venue removed from shortlist".to_string(),
            data: ShortlistToggleResponse {
                action: ShortlistAction::Removed,
                venue_id: venue_id.to_string(),
            },
        }))
    }

    #[oai(path = "/shortlist", method = "get", tag = "ApiShortlistTags::Shortlist")]
    async fn get_paginate_shortlist_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateShortlistResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.shortlist",
            "get_paginate_shortlist_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        let (data, counts, page_count) =
            match paginate_shortlist(&mut tx, &profile.id, page, page_size).await {
                Ok(val) => val,
                Err(err) => {
                    return GetPaginateShortlistResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.shortlist",
                            "get_paginate_shortlist_api",
                            "paginate shortlist",
                            &err.to_string(),
                        ),
                    ))
                }
            };

        let mut results: Vec<DetailShortlist> = vec![];
        for item in data {
            let venue = match get_venue_by_id(&mut tx, &item.venue_id).await {
                Ok(val) => val,
                Err(err) => {
                    return GetPaginateShortlistResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.shortlist",
                            "get_paginate_shortlist_api",
                            "get venue by id",
                            &err.to_string(),
                        ),
                    ))
                }
            };
            results.push(DetailShortlist {
                id: item.id.to_string(),
                notes: item.notes,
                event_type: item.event_type,
                created_at: datetime_to_string(item.created_at),
                venue: venue.map(|x| x.into()),
            });
        }

        GetPaginateShortlistResponses::Ok(Json(PaginateResponse {
            counts,
            page,
            page_count,
            page_size,
            results,
        }))
    }
}
