use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use uuid::Uuid;

use crate::{
    core::{
        security::{authorize, BearerAuthorization},
        utils::{non_blank, parse_date_opt},
    },
    model::{
        profile::ProfileRole,
        review::{Review, ReviewStatus, ReviewType, MAX_RATING, MIN_RATING},
    },
    repository::{
        destination::get_destination_by_id,
        review::{
            create_review, get_approved_review, get_review_by_id, paginate_review,
            update_review_status, ReviewFilter,
        },
        venue::get_venue_by_id,
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
            PaginateResponse,
        },
        review::{
            DetailReview, GetPaginateReviewResponses, GetPublicReviewResponses,
            ReviewCreateRequest, ReviewCreateResponses, ReviewStatusRequest,
            ReviewUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiReviewTags {
    Review,
    AdminReview,
}

pub struct ApiReview;

fn parse_uuid_opt(value: Option<String>, what: &str) -> Result<Option<Uuid>, String> {
    match non_blank(value) {
        Some(val) => Uuid::parse_str(&val)
            .map(Some)
            .map_err(|_| format!("Invalid {} id", what)),
        None => Ok(None),
    }
}

/// Build a `pending` review from a public submission. Without an explicit
/// type it is a venue review when a venue is given, a destination review
/// when a destination is given, otherwise a planner review.
fn review_from_request(req: &ReviewCreateRequest) -> Result<Review, String> {
    let reviewer_name = non_blank(Some(req.reviewer_name.clone())).ok_or("Name is required")?;
    let content = non_blank(Some(req.content.clone())).ok_or("Review content is required")?;
    if !(MIN_RATING..=MAX_RATING).contains(&req.rating) {
        return Err(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        ));
    }
    let venue_id = parse_uuid_opt(req.venue_id.clone(), "venue")?;
    let destination_id = parse_uuid_opt(req.destination_id.clone(), "destination")?;
    let review_type = match (req.review_type, venue_id, destination_id) {
        (Some(val), _, _) => val,
        (None, Some(_), _) => ReviewType::Venue,
        (None, None, Some(_)) => ReviewType::Destination,
        (None, None, None) => ReviewType::Planner,
    };
    let wedding_date = parse_date_opt(req.wedding_date.as_deref())
        .map_err(|_| "Invalid wedding date, expected YYYY-MM-DD".to_string())?;

    let now = Local::now().fixed_offset();
    Ok(Review {
        id: Uuid::now_v7(),
        reviewer_name,
        reviewer_email: non_blank(req.reviewer_email.clone()),
        reviewer_city: non_blank(req.reviewer_city.clone()),
        venue_id,
        destination_id,
        review_type: review_type.as_str().to_string(),
        rating: req.rating,
        title: non_blank(req.title.clone()),
        content,
        wedding_date,
        guest_count: req.guest_count,
        status: ReviewStatus::Pending.as_str().to_string(),
        created_at: now,
        updated_at: now,
    })
}

#[OpenApi]
impl ApiReview {
    #[oai(path = "/reviews", method = "post", tag = "ApiReviewTags::Review")]
    async fn create_review_api(
        &self,
        json: Json<ReviewCreateRequest>,
        state: Data<&Arc<AppState>>,
    ) -> ReviewCreateResponses {
        let review = match review_from_request(&json) {
            Ok(val) => val,
            Err(message) => {
                return ReviewCreateResponses::BadRequest(Json(BadRequestResponse::new(&message)))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ReviewCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.review",
                        "create_review_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        if let Some(venue_id) = review.venue_id {
            match get_venue_by_id(&mut tx, &venue_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return ReviewCreateResponses::BadRequest(Json(BadRequestResponse::new(
                        &format!("venue with id = {} not found", venue_id),
                    )))
                }
                Err(err) => {
                    return ReviewCreateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.review",
                            "create_review_api",
                            "get venue by id",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }
        if let Some(destination_id) = review.destination_id {
            match get_destination_by_id(&mut tx, &destination_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return ReviewCreateResponses::BadRequest(Json(BadRequestResponse::new(
                        &format!("destination with id = {} not found", destination_id),
                    )))
                }
                Err(err) => {
                    return ReviewCreateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.review",
                            "create_review_api",
                            "get destination by id",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }

        if let Err(err) = create_review(&mut tx, &review).await {
            return ReviewCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.review",
                    "create_review_api",
                    "create review",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return ReviewCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.review",
                    "create_review_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ReviewCreateResponses::Created(Json(MessageResponse {
            message: "Review submitted successfully! It will be visible after approval."
                .to_string(),
            data: review.into(),
        }))
    }

    #[oai(path = "/reviews", method = "get", tag = "ApiReviewTags::Review")]
    async fn get_public_review_api(
        &self,
        Query(venue_id): Query<Option<String>>,
        Query(destination_id): Query<Option<String>>,
        Query(review_type): Query<Option<ReviewType>>,
        state: Data<&Arc<AppState>>,
    ) -> GetPublicReviewResponses {
        let venue_id = match parse_uuid_opt(venue_id, "venue") {
            Ok(val) => val,
            Err(message) => {
                return GetPublicReviewResponses::BadRequest(Json(BadRequestResponse::new(
                    &message,
                )))
            }
        };
        let destination_id = match parse_uuid_opt(destination_id, "destination") {
            Ok(val) => val,
            Err(message) => {
                return GetPublicReviewResponses::BadRequest(Json(BadRequestResponse::new(
                    &message,
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return GetPublicReviewResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.review",
                        "get_public_review_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let filter = ReviewFilter {
            status: None,
            venue_id,
            destination_id,
            review_type,
        };
        match get_approved_review(&mut tx, filter).await {
            Ok(data) => GetPublicReviewResponses::Ok(Json(
                data.into_iter().map(DetailReview::from).collect(),
            )),
            Err(err) => GetPublicReviewResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.review",
                    "get_public_review_api",
                    "get approved review",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/admin/reviews", method = "get", tag = "ApiReviewTags::AdminReview")]
    async fn get_paginate_review_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(status): Query<Option<ReviewStatus>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateReviewResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.review",
            "get_paginate_review_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        let filter = ReviewFilter {
            status: Some(status.unwrap_or_default()),
            ..Default::default()
        };
        match paginate_review(&mut tx, page, page_size, filter).await {
            Ok((data, counts, page_count)) => {
                GetPaginateReviewResponses::Ok(Json(PaginateResponse {
                    counts,
                    page,
                    page_count,
                    page_size,
                    results: data.into_iter().map(DetailReview::from).collect(),
                }))
            }
            Err(err) => GetPaginateReviewResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.review",
                    "get_paginate_review_api",
                    "paginate review",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/admin/reviews/status",
        method = "put",
        tag = "ApiReviewTags::AdminReview"
    )]
    async fn update_review_status_api(
        &self,
        Query(id): Query<String>,
        json: Json<ReviewStatusRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ReviewUpdateResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.review",
            "update_review_status_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let review_id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ReviewUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "review", "id", &id,
                )))
            }
        };
        let mut review = match get_review_by_id(&mut tx, &review_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ReviewUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "review", "id", &id,
                )))
            }
            Err(err) => {
                return ReviewUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.review",
                        "update_review_status_api",
                        "get review by id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let now = Local::now().fixed_offset();
        if let Err(err) = update_review_status(&mut tx, &mut review, json.status, &now).await {
            return ReviewUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.review",
                    "update_review_status_api",
                    "update review status",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return ReviewUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.review",
                    "update_review_status_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ReviewUpdateResponses::Ok(Json(MessageResponse {
            message: format!("Review {}", json.status.as_str()),
            data: review.into(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReviewCreateRequest {
        ReviewCreateRequest {
            reviewer_name: "Ananya".to_string(),
            reviewer_email: None,
            reviewer_city: Some("Mumbai".to_string()),
            venue_id: None,
            destination_id: None,
            review_type: None,
            rating: 5,
            title: None,
            content: "Flawless planning from start to finish".to_string(),
            wedding_date: None,
            guest_count: Some(200),
        }
    }

    #[test]
    fn test_review_type_inferred() {
        let review = review_from_request(&request()).unwrap();
        assert_eq!(review.review_type, "planner");
        assert_eq!(review.status, "pending");

        let mut req = request();
        req.venue_id = Some("0195b3c4-0000-7000-8000-000000000000".to_string());
        assert_eq!(review_from_request(&req).unwrap().review_type, "venue");

        let mut req = request();
        req.destination_id = Some("0195b3c4-0000-7000-8000-000000000000".to_string());
        assert_eq!(
            review_from_request(&req).unwrap().review_type,
            "destination"
        );
    }

    #[test]
    fn test_review_rating_bounds() {
        let mut req = request();
        req.rating = 0;
        assert_eq!(
            review_from_request(&req).unwrap_err(),
            "Rating must be between 1 and 5"
        );
        req.rating = 6;
        assert!(review_from_request(&req).is_err());
        req.rating = 1;
        assert!(review_from_request(&req).is_ok());
    }
}
