use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use sqlx::{types::Json as SqlxJson, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::ActiveStatusFilter,
        security::{authorize, BearerAuthorization},
        utils::{non_blank, slugify},
    },
    model::{
        profile::ProfileRole,
        venue::{Venue, CATEGORIES},
    },
    repository::{
        profile::get_profile_by_id,
        venue::{
            create_venue, delete_venue, get_active_venue_by_slug, get_venue_by_id,
            is_venue_slug_taken, paginate_venue, update_venue, VenueFilter,
        },
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
            PaginateResponse,
        },
        venue::{
            DetailVenue, GetPaginateVenueResponses, GetPublicVenueResponses,
            PublicVenueDetailResponses, VenueCategoriesResponses, VenueCreateResponses,
            VenueDeleteResponses, VenueRequest, VenueUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiVenueTags {
    Venue,
    AdminVenue,
}

pub struct ApiVenue;

/// Copy the form onto `venue`, keeping stored values for absent fields.
/// A blank `vendor_id` detaches the listing from its vendor.
pub(crate) fn apply_venue_request(venue: &mut Venue, req: &VenueRequest) -> Result<(), String> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    let slug = slugify(non_blank(req.slug.clone()).as_deref().unwrap_or(name));
    venue.name = name.to_string();
    venue.slug = slug;
    if let Some(val) = &req.vendor_id {
        venue.vendor_id = match non_blank(Some(val.clone())) {
            Some(id) => Some(
                Uuid::parse_str(&id).map_err(|_| format!("vendor with id = {} not found", id))?,
            ),
            None => None,
        };
    }
    if let Some(val) = non_blank(req.category.clone()) {
        venue.category = val;
    }
    if let Some(val) = &req.city {
        venue.city = val.trim().to_string();
    }
    if let Some(val) = &req.state {
        venue.state = val.trim().to_string();
    }
    if let Some(val) = non_blank(req.country.clone()) {
        venue.country = val;
    }
    if let Some(val) = &req.starting_price {
        venue.starting_price = val.clone();
    }
    if req.price_per_plate_veg.is_some() {
        venue.price_per_plate_veg = req.price_per_plate_veg;
    }
    if let Some(val) = req.guest_capacity_min {
        venue.guest_capacity_min = val;
    }
    if let Some(val) = req.guest_capacity_max {
        venue.guest_capacity_max = val;
    }
    if venue.guest_capacity_min > venue.guest_capacity_max {
        return Err("Minimum guest capacity cannot exceed maximum capacity".to_string());
    }
    if req.accommodation_rooms.is_some() {
        venue.accommodation_rooms = req.accommodation_rooms;
    }
    if let Some(val) = req.star_rating {
        if !(1..=5).contains(&val) {
            return Err("Star rating must be between 1 and 5".to_string());
        }
        venue.star_rating = val;
    }
    if let Some(val) = req.google_rating {
        if !(0.0..=5.0).contains(&val) {
            return Err("Rating must be between 0 and 5".to_string());
        }
        venue.google_rating = val;
    }
    if let Some(val) = req.total_reviews {
        venue.total_reviews = val;
    }
    if let Some(val) = &req.hero_image_url {
        venue.hero_image_url = val.clone();
    }
    if let Some(val) = &req.cuisine_types {
        venue.cuisine_types = val.clone();
    }
    if let Some(val) = req.is_featured {
        venue.is_featured = val;
    }
    if let Some(val) = req.is_active {
        venue.is_active = val;
    }
    Ok(())
}

fn blank_venue() -> Venue {
    let now = Local::now().fixed_offset();
    Venue {
        id: Uuid::now_v7(),
        vendor_id: None,
        name: String::new(),
        slug: String::new(),
        category: CATEGORIES[0].to_string(),
        city: String::new(),
        state: String::new(),
        country: "India".to_string(),
        starting_price: String::new(),
        price_per_plate_veg: None,
        guest_capacity_min: 50,
        guest_capacity_max: 500,
        accommodation_rooms: None,
        star_rating: 5,
        google_rating: 4.5,
        total_reviews: 0,
        hero_image_url: String::new(),
        cuisine_types: vec![],
        is_featured: false,
        is_active: true,
        unique_selling_points: vec![],
        insider_tips: vec![],
        what_to_expect: vec![],
        photography_spots: vec![],
        planning_timeline: SqlxJson(vec![]),
        signature_experiences: SqlxJson(vec![]),
        budget_breakdown: SqlxJson(vec![]),
        vendor_recommendations: SqlxJson(vec![]),
        faqs: SqlxJson(vec![]),
        policies: SqlxJson(vec![]),
        created_at: now,
        updated_at: now,
    }
}

#[OpenApi]
impl ApiVenue {
    #[oai(path = "/venues", method = "get", tag = "ApiVenueTags::Venue")]
    #[allow(clippy::too_many_arguments)]
    async fn get_public_venue_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        Query(category): Query<Option<String>>,
        Query(city): Query<Option<String>>,
        Query(featured): Query<Option<bool>>,
        state: Data<&Arc<AppState>>,
    ) -> GetPublicVenueResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return GetPublicVenueResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.venue",
                        "get_public_venue_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        let filter = VenueFilter {
            search,
            category,
            city,
            featured,
            status: ActiveStatusFilter::Active,
            vendor_id: None,
        };
        match paginate_venue(&mut tx, page, page_size, filter, true).await {
            Ok((data, counts, page_count)) => GetPublicVenueResponses::Ok(Json(PaginateResponse {
                counts,
                page,
                page_count,
                page_size,
                results: data.into_iter().map(DetailVenue::from).collect(),
            })),
            Err(err) => GetPublicVenueResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "get_public_venue_api",
                    "paginate venue",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/venues/detail", method = "get", tag = "ApiVenueTags::Venue")]
    async fn get_public_detail_venue_api(
        &self,
        Query(slug): Query<String>,
        state: Data<&Arc<AppState>>,
    ) -> PublicVenueDetailResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return PublicVenueDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.venue",
                        "get_public_detail_venue_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        match get_active_venue_by_slug(&mut tx, &slug).await {
            Ok(Some(val)) => PublicVenueDetailResponses::Ok(Json(val.into())),
            Ok(None) => PublicVenueDetailResponses::NotFound(Json(NotFoundResponse::new(
                "venue", "slug", &slug,
            ))),
            Err(err) => PublicVenueDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "get_public_detail_venue_api",
                    "get venue by slug",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/venues/categories", method = "get", tag = "ApiVenueTags::Venue")]
    async fn get_venue_categories_api(&self) -> VenueCategoriesResponses {
        VenueCategoriesResponses::Ok(Json(CATEGORIES.iter().map(|x| x.to_string()).collect()))
    }

    #[oai(path = "/admin/venues", method = "get", tag = "ApiVenueTags::AdminVenue")]
    #[allow(clippy::too_many_arguments)]
    async fn get_paginate_venue_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        Query(category): Query<Option<String>>,
        Query(featured): Query<Option<bool>>,
        Query(status): Query<Option<ActiveStatusFilter>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateVenueResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.venue",
            "get_paginate_venue_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        let filter = VenueFilter {
            search,
            category,
            city: None,
            featured,
            status: status.unwrap_or_default(),
            vendor_id: None,
        };
        match paginate_venue(&mut tx, page, page_size, filter, false).await {
            Ok((data, counts, page_count)) => {
                GetPaginateVenueResponses::Ok(Json(PaginateResponse {
                    counts,
                    page,
                    page_count,
                    page_size,
                    results: data.into_iter().map(DetailVenue::from).collect(),
                }))
            }
            Err(err) => GetPaginateVenueResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "get_paginate_venue_api",
                    "paginate venue",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/admin/venues", method = "post", tag = "ApiVenueTags::AdminVenue")]
    async fn create_venue_api(
        &self,
        json: Json<VenueRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> VenueCreateResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.venue",
            "create_venue_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let mut venue = blank_venue();
        if let Err(message) = apply_venue_request(&mut venue, &json) {
            return VenueCreateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        if let Some(vendor_id) = venue.vendor_id {
            match get_profile_by_id(&mut tx, &vendor_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return VenueCreateResponses::BadRequest(Json(BadRequestResponse::new(
                        &format!("vendor with id = {} not found", vendor_id),
                    )))
                }
                Err(err) => {
                    return VenueCreateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.venue",
                            "create_venue_api",
                            "get vendor profile",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }
        match is_venue_slug_taken(&mut tx, &venue.slug, None).await {
            Ok(false) => {}
            Ok(true) => {
                return VenueCreateResponses::BadRequest(Json(BadRequestResponse::new(&format!(
                    "slug {} is already used",
                    venue.slug
                ))))
            }
            Err(err) => {
                return VenueCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.venue",
                        "create_venue_api",
                        "check slug",
                        &err.to_string(),
                    ),
                ))
            }
        }

        if let Err(err) = create_venue(&mut tx, &venue).await {
            return VenueCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "create_venue_api",
                    "create venue",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return VenueCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "create_venue_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        VenueCreateResponses::Created(Json(MessageResponse {
            message: "Venue created successfully".to_string(),
            data: venue.into(),
        }))
    }

    #[oai(path = "/admin/venues", method = "put", tag = "ApiVenueTags::AdminVenue")]
    async fn update_venue_api(
        &self,
        Query(id): Query<String>,
        json: Json<VenueRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> VenueUpdateResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.venue",
            "update_venue_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let venue_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return VenueUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "venue", "id", &id,
                )))
            }
        };
        let mut venue = match get_venue_by_id(&mut tx, &venue_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return VenueUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "venue", "id", &id,
                )))
            }
            Err(err) => {
                return VenueUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.venue",
                        "update_venue_api",
                        "get venue by id",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Err(message) = apply_venue_request(&mut venue, &json) {
            return VenueUpdateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        if let Some(vendor_id) = venue.vendor_id {
            match get_profile_by_id(&mut tx, &vendor_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return VenueUpdateResponses::BadRequest(Json(BadRequestResponse::new(
                        &format!("vendor with id = {} not found", vendor_id),
                    )))
                }
                Err(err) => {
                    return VenueUpdateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.venue",
                            "update_venue_api",
                            "get vendor profile",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }
        match is_venue_slug_taken(&mut tx, &venue.slug, Some(venue.id)).await {
            Ok(false) => {}
            Ok(true) => {
                return VenueUpdateResponses::BadRequest(Json(BadRequestResponse::new(&format!(
                    "slug {} is already used",
                    venue.slug
                ))))
            }
            Err(err) => {
                return VenueUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.venue",
                        "update_venue_api",
                        "check slug",
                        &err.to_string(),
                    ),
                ))
            }
        }

        let now = Local::now().fixed_offset();
        if let Err(err) = update_venue(&mut tx, &mut venue, &now).await {
            return VenueUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "update_venue_api",
                    "update venue",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return VenueUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "update_venue_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        VenueUpdateResponses::Ok(Json(MessageResponse {
            message: "Venue updated successfully".to_string(),
            data: venue.into(),
        }))
    }

    #[oai(path = "/admin/venues", method = "delete", tag = "ApiVenueTags::AdminVenue")]
    async fn delete_venue_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> VenueDeleteResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.venue",
            "delete_venue_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let venue_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return VenueDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "venue", "id", &id,
                )))
            }
        };
        match delete_venue(&mut tx, &venue_id).await {
            Ok(0) => {
                return VenueDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "venue", "id", &id,
                )))
            }
            Ok(_) => {}
            Err(err) => {
                return VenueDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.venue",
                        "delete_venue_api",
                        "delete venue",
                        &err.to_string(),
                    ),
                ))
            }
        }
        if let Err(err) = tx.commit().await {
            return VenueDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "delete_venue_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        VenueDeleteResponses::NoContent
    }

    #[oai(
        path = "/admin/venues/toggle-featured",
        method = "post",
        tag = "ApiVenueTags::AdminVenue"
    )]
    async fn toggle_featured_venue_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> VenueUpdateResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.venue",
            "toggle_featured_venue_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let venue_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return VenueUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "venue", "id", &id,
                )))
            }
        };
        let mut venue = match get_venue_by_id(&mut tx, &venue_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return VenueUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "venue", "id", &id,
                )))
            }
            Err(err) => {
                return VenueUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.venue",
                        "toggle_featured_venue_api",
                        "get venue by id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        venue.is_featured = !venue.is_featured;
        let now = Local::now().fixed_offset();
        if let Err(err) = update_venue(&mut tx, &mut venue, &now).await {
            return VenueUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "toggle_featured_venue_api",
                    "update venue",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return VenueUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    "toggle_featured_venue_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        let message = if venue.is_featured {
            "Venue added to featured"
        } else {
            "Venue removed from featured"
        };
        VenueUpdateResponses::Ok(Json(MessageResponse {
            message: message.to_string(),
            data: venue.into(),
        }))
    }

    #[oai(
        path = "/admin/venues/toggle-active",
        method = "post",
        tag = "ApiVenueTags::AdminVenue"
    )]
    async fn toggle_active_venue_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> VenueUpdateResponses {
        let (tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.venue",
            "toggle_active_venue_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        toggle_venue_active(tx, &id, None, "toggle_active_venue_api").await
    }
}

/// Flip `is_active`. With `owner` set, only that vendor's venues qualify.
pub(crate) async fn toggle_venue_active(
    mut tx: Transaction<'static, Postgres>,
    id: &str,
    owner: Option<Uuid>,
    function: &str,
) -> VenueUpdateResponses {
    let venue_id = match Uuid::parse_str(id) {
        Ok(val) => val,
        Err(_) => {
            return VenueUpdateResponses::NotFound(Json(NotFoundResponse::new("venue", "id", id)))
        }
    };
    let mut venue = match get_venue_by_id(&mut tx, &venue_id).await {
        Ok(Some(val)) => val,
        Ok(None) => {
            return VenueUpdateResponses::NotFound(Json(NotFoundResponse::new("venue", "id", id)))
        }
        Err(err) => {
            return VenueUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.venue",
                    function,
                    "get venue by id",
                    &err.to_string(),
                ),
            ))
        }
    };
    if let Some(owner) = owner {
        if venue.vendor_id != Some(owner) {
            tracing::warn!("vendor {} tried to toggle venue {}", owner, venue.id);
            return VenueUpdateResponses::Forbidden(Json(Default::default()));
        }
    }

    venue.is_active = !venue.is_active;
    let now = Local::now().fixed_offset();
    if let Err(err) = update_venue(&mut tx, &mut venue, &now).await {
        return VenueUpdateResponses::InternalServerError(Json(InternalServerErrorResponse::new(
            "route.venue",
            function,
            "update venue",
            &err.to_string(),
        )));
    }
    if let Err(err) = tx.commit().await {
        return VenueUpdateResponses::InternalServerError(Json(InternalServerErrorResponse::new(
            "route.venue",
            function,
            "commit transaction",
            &err.to_string(),
        )));
    }
    let message = if venue.is_active {
        "Venue activated successfully"
    } else {
        "Venue deactivated successfully"
    };
    VenueUpdateResponses::Ok(Json(MessageResponse {
        message: message.to_string(),
        data: venue.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::{apply_venue_request, blank_venue};
    use crate::schema::venue::VenueRequest;

    fn request(name: &str, slug: Option<&str>) -> VenueRequest {
        VenueRequest {
            name: name.to_string(),
            slug: slug.map(|x| x.to_string()),
            vendor_id: None,
            category: None,
            city: None,
            state: None,
            country: None,
            starting_price: None,
            price_per_plate_veg: None,
            guest_capacity_min: None,
            guest_capacity_max: None,
            accommodation_rooms: None,
            star_rating: None,
            google_rating: None,
            total_reviews: None,
            hero_image_url: None,
            cuisine_types: None,
            is_featured: None,
            is_active: None,
        }
    }

    #[test]
    fn test_slug_derived_from_name() {
        let mut venue = blank_venue();
        apply_venue_request(&mut venue, &request("Taj Lake Palace", None)).unwrap();
        assert_eq!(venue.slug, "taj-lake-palace");
        assert_eq!(venue.country, "India");
    }

    #[test]
    fn test_blank_slug_derived_from_name() {
        let mut venue = blank_venue();
        apply_venue_request(&mut venue, &request("Taj Lake Palace", Some(""))).unwrap();
        assert_eq!(venue.slug, "taj-lake-palace");

        let mut venue = blank_venue();
        apply_venue_request(&mut venue, &request("Leela Palace", Some("   "))).unwrap();
        assert_eq!(venue.slug, "leela-palace");
    }

    #[test]
    fn test_invalid_requests() {
        let mut venue = blank_venue();
        assert!(apply_venue_request(&mut venue, &request("  ", None)).is_err());
        let mut req = request("Rambagh Palace", None);
        req.star_rating = Some(6);
        assert!(apply_venue_request(&mut venue, &req).is_err());
        let mut req = request("Rambagh Palace", None);
        req.vendor_id = Some("not-a-uuid".to_string());
        assert!(apply_venue_request(&mut venue, &req).is_err());
    }
}
