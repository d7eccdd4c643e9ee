use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use sqlx::types::Json as SqlxJson;
use uuid::Uuid;

use crate::{
    core::{
        filter::DestinationTypeFilter,
        security::{authorize, BearerAuthorization},
        utils::{non_blank, slugify},
    },
    model::{destination::Destination, profile::ProfileRole},
    repository::destination::{
        create_destination, delete_destination, get_destination_by_id, get_destination_by_slug,
        is_destination_slug_taken, paginate_destination, update_destination,
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
            PaginateResponse,
        },
        destination::{
            DestinationCreateResponses, DestinationDeleteResponses, DestinationRequest,
            DestinationUpdateResponses, DetailDestination, GetPaginateDestinationResponses,
            GetPublicDestinationResponses, PublicDestinationDetailResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiDestinationTags {
    Destination,
    AdminDestination,
}

pub struct ApiDestination;

/// Copy the form onto `destination`, keeping stored values for absent fields.
fn apply_destination_request(
    destination: &mut Destination,
    req: &DestinationRequest,
) -> Result<(), &'static str> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err("Name is required");
    }
    let slug = slugify(req.slug.as_deref().unwrap_or(name));
    if slug.is_empty() {
        return Err("Slug is required");
    }
    destination.name = name.to_string();
    destination.slug = slug;
    if let Some(val) = &req.city {
        destination.city = val.trim().to_string();
    }
    if req.state.is_some() {
        destination.state = non_blank(req.state.clone());
    }
    if let Some(val) = non_blank(req.country.clone()) {
        destination.country = val;
    }
    if let Some(val) = &req.tagline {
        destination.tagline = val.clone();
    }
    if let Some(val) = &req.hero_title {
        destination.hero_title = val.clone();
    }
    if let Some(val) = &req.description {
        destination.description = val.clone();
    }
    if let Some(val) = &req.hero_image_url {
        destination.hero_image_url = val.clone();
    }
    if let Some(val) = &req.gallery_images {
        destination.gallery_images = val.clone();
    }
    if let Some(val) = &req.best_season {
        destination.best_season = val.clone();
    }
    if let Some(val) = &req.best_months {
        destination.best_months = val.clone();
    }
    if let Some(val) = req.avg_budget_min {
        destination.avg_budget_min = val;
    }
    if let Some(val) = req.avg_budget_max {
        destination.avg_budget_max = val;
    }
    if destination.avg_budget_min > destination.avg_budget_max {
        return Err("Minimum budget cannot exceed maximum budget");
    }
    if let Some(val) = req.total_venues {
        destination.total_venues = val;
    }
    if let Some(val) = req.is_featured {
        destination.is_featured = val;
    }
    if let Some(val) = req.is_international {
        destination.is_international = val;
    }
    if let Some(val) = req.sort_order {
        destination.sort_order = val;
    }
    Ok(())
}

fn blank_destination() -> Destination {
    let now = Local::now().fixed_offset();
    Destination {
        id: Uuid::now_v7(),
        name: String::new(),
        slug: String::new(),
        city: String::new(),
        state: None,
        country: "India".to_string(),
        tagline: String::new(),
        hero_title: String::new(),
        description: String::new(),
        hero_image_url: String::new(),
        gallery_images: vec![],
        best_season: String::new(),
        best_months: vec![],
        avg_budget_min: 1_000_000,
        avg_budget_max: 10_000_000,
        total_venues: 0,
        is_featured: false,
        is_international: false,
        sort_order: 99,
        planning_tips: vec![],
        insider_secrets: vec![],
        best_photo_locations: SqlxJson(vec![]),
        created_at: now,
        updated_at: now,
    }
}

#[OpenApi]
impl ApiDestination {
    #[oai(
        path = "/destinations",
        method = "get",
        tag = "ApiDestinationTags::Destination"
    )]
    async fn get_public_destination_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        #[oai(name = "type")] Query(destination_type): Query<Option<DestinationTypeFilter>>,
        state: Data<&Arc<AppState>>,
    ) -> GetPublicDestinationResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return GetPublicDestinationResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.destination",
                        "get_public_destination_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        match paginate_destination(
            &mut tx,
            page,
            page_size,
            search,
            destination_type.unwrap_or_default(),
            true,
        )
        .await
        {
            Ok((data, counts, page_count)) => {
                GetPublicDestinationResponses::Ok(Json(PaginateResponse {
                    counts,
                    page,
                    page_count,
                    page_size,
                    results: data.into_iter().map(DetailDestination::from).collect(),
                }))
            }
            Err(err) => GetPublicDestinationResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "get_public_destination_api",
                    "paginate destination",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/destinations/detail",
        method = "get",
        tag = "ApiDestinationTags::Destination"
    )]
    async fn get_public_detail_destination_api(
        &self,
        Query(slug): Query<String>,
        state: Data<&Arc<AppState>>,
    ) -> PublicDestinationDetailResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return PublicDestinationDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.destination",
                        "get_public_detail_destination_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        match get_destination_by_slug(&mut tx, &slug).await {
            Ok(Some(val)) => PublicDestinationDetailResponses::Ok(Json(val.into())),
            Ok(None) => PublicDestinationDetailResponses::NotFound(Json(NotFoundResponse::new(
                "destination",
                "slug",
                &slug,
            ))),
            Err(err) => PublicDestinationDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "get_public_detail_destination_api",
                    "get destination by slug",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/admin/destinations",
        method = "get",
        tag = "ApiDestinationTags::AdminDestination"
    )]
    async fn get_paginate_destination_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        #[oai(name = "type")] Query(destination_type): Query<Option<DestinationTypeFilter>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateDestinationResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.destination",
            "get_paginate_destination_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        match paginate_destination(
            &mut tx,
            page,
            page_size,
            search,
            destination_type.unwrap_or_default(),
            false,
        )
        .await
        {
            Ok((data, counts, page_count)) => {
                GetPaginateDestinationResponses::Ok(Json(PaginateResponse {
                    counts,
                    page,
                    page_count,
                    page_size,
                    results: data.into_iter().map(DetailDestination::from).collect(),
                }))
            }
            Err(err) => GetPaginateDestinationResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "get_paginate_destination_api",
                    "paginate destination",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/admin/destinations",
        method = "post",
        tag = "ApiDestinationTags::AdminDestination"
    )]
    async fn create_destination_api(
        &self,
        json: Json<DestinationRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DestinationCreateResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.destination",
            "create_destination_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let mut destination = blank_destination();
        if let Err(message) = apply_destination_request(&mut destination, &json) {
            return DestinationCreateResponses::BadRequest(Json(BadRequestResponse::new(message)));
        }
        match is_destination_slug_taken(&mut tx, &destination.slug, None).await {
            Ok(false) => {}
            Ok(true) => {
                return DestinationCreateResponses::BadRequest(Json(BadRequestResponse::new(
                    &format!("slug {} is already used", destination.slug),
                )))
            }
            Err(err) => {
                return DestinationCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.destination",
                        "create_destination_api",
                        "check slug",
                        &err.to_string(),
                    ),
                ))
            }
        }

        if let Err(err) = create_destination(&mut tx, &destination).await {
            return DestinationCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "create_destination_api",
                    "create destination",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return DestinationCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "create_destination_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        DestinationCreateResponses::Created(Json(MessageResponse {
            message: "Destination created successfully".to_string(),
            data: destination.into(),
        }))
    }

    #[oai(
        path = "/admin/destinations",
        method = "put",
        tag = "ApiDestinationTags::AdminDestination"
    )]
    async fn update_destination_api(
        &self,
        Query(id): Query<String>,
        json: Json<DestinationRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DestinationUpdateResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.destination",
            "update_destination_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let destination_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return DestinationUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "destination",
                    "id",
                    &id,
                )))
            }
        };
        let mut destination = match get_destination_by_id(&mut tx, &destination_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return DestinationUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "destination",
                    "id",
                    &id,
                )))
            }
            Err(err) => {
                return DestinationUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.destination",
                        "update_destination_api",
                        "get destination by id",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Err(message) = apply_destination_request(&mut destination, &json) {
            return DestinationUpdateResponses::BadRequest(Json(BadRequestResponse::new(message)));
        }
        match is_destination_slug_taken(&mut tx, &destination.slug, Some(destination.id)).await {
            Ok(false) => {}
            Ok(true) => {
                return DestinationUpdateResponses::BadRequest(Json(BadRequestResponse::new(
                    &format!("slug {} is already used", destination.slug),
                )))
            }
            Err(err) => {
                return DestinationUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.destination",
                        "update_destination_api",
                        "check slug",
                        &err.to_string(),
                    ),
                ))
            }
        }

        let now = Local::now().fixed_offset();
        if let Err(err) = update_destination(&mut tx, &mut destination, &now).await {
            return DestinationUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "update_destination_api",
                    "update destination",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return DestinationUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "update_destination_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        DestinationUpdateResponses::Ok(Json(MessageResponse {
            message: "Destination updated successfully".to_string(),
            data: destination.into(),
        }))
    }

    #[oai(
        path = "/admin/destinations",
        method = "delete",
        tag = "ApiDestinationTags::AdminDestination"
    )]
    async fn delete_destination_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DestinationDeleteResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.destination",
            "delete_destination_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let destination_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return DestinationDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "destination",
                    "id",
                    &id,
                )))
            }
        };
        match delete_destination(&mut tx, &destination_id).await {
            Ok(0) => {
                return DestinationDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "destination",
                    "id",
                    &id,
                )))
            }
            Ok(_) => {}
            Err(err) => {
                return DestinationDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.destination",
                        "delete_destination_api",
                        "delete destination",
                        &err.to_string(),
                    ),
                ))
            }
        }
        if let Err(err) = tx.commit().await {
            return DestinationDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "delete_destination_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        DestinationDeleteResponses::NoContent
    }

    #[oai(
        path = "/admin/destinations/toggle-featured",
        method = "post",
        tag = "ApiDestinationTags::AdminDestination"
    )]
    async fn toggle_featured_destination_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DestinationUpdateResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.destination",
            "toggle_featured_destination_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let destination_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return DestinationUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "destination",
                    "id",
                    &id,
                )))
            }
        };
        let mut destination = match get_destination_by_id(&mut tx, &destination_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return DestinationUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "destination",
                    "id",
                    &id,
                )))
            }
            Err(err) => {
                return DestinationUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.destination",
                        "toggle_featured_destination_api",
                        "get destination by id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        destination.is_featured = !destination.is_featured;
        let now = Local::now().fixed_offset();
        if let Err(err) = update_destination(&mut tx, &mut destination, &now).await {
            return DestinationUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "toggle_featured_destination_api",
                    "update destination",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return DestinationUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.destination",
                    "toggle_featured_destination_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        let message = if destination.is_featured {
            "Destination added to featured"
        } else {
            "Destination removed from featured"
        };
        DestinationUpdateResponses::Ok(Json(MessageResponse {
            message: message.to_string(),
            data: destination.into(),
        }))
    }
}
