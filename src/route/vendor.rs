use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::{
    core::{
        filter::ActiveStatusFilter,
        security::{authorize, BearerAuthorization},
    },
    model::{inquiry::InquiryStatus, profile::ProfileRole},
    repository::{
        inquiry::{paginate_inquiry, InquiryFilter},
        venue::{get_vendor_stats, paginate_venue, VenueFilter},
    },
    schema::{
        common::{InternalServerErrorResponse, PaginateResponse},
        inquiry::{
            DetailInquiry, GetPaginateInquiryResponses, InquiryStatusRequest,
            InquiryUpdateResponses,
        },
        vendor::{VendorStatsResponse, VendorStatsResponses},
        venue::{DetailVenue, GetPaginateVenueResponses, VenueUpdateResponses},
    },
    AppState,
};

use super::{inquiry::modify_inquiry, venue::toggle_venue_active};

const VENDOR_ROLES: [ProfileRole; 2] = [ProfileRole::Vendor, ProfileRole::Admin];

#[derive(Tags)]
enum ApiVendorTags {
    Vendor,
}

/// Vendor dashboard. Everything is scoped to venues the caller owns.
pub struct ApiVendor;

#[OpenApi]
impl ApiVendor {
    #[oai(path = "/vendor/venues", method = "get", tag = "ApiVendorTags::Vendor")]
    async fn get_vendor_venue_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        Query(status): Query<Option<ActiveStatusFilter>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateVenueResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &VENDOR_ROLES,
            "route.vendor",
            "get_vendor_venue_api",
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
            status: status.unwrap_or_default(),
            vendor_id: Some(profile.id),
            ..Default::default()
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
                    "route.vendor",
                    "get_vendor_venue_api",
                    "paginate venue",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/vendor/stats", method = "get", tag = "ApiVendorTags::Vendor")]
    async fn get_vendor_stats_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> VendorStatsResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &VENDOR_ROLES,
            "route.vendor",
            "get_vendor_stats_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        match get_vendor_stats(&mut tx, &profile.id).await {
            Ok(stats) => VendorStatsResponses::Ok(Json(VendorStatsResponse {
                total_venues: stats.total_venues,
                active_venues: stats.active_venues,
                total_inquiries: stats.total_inquiries,
                new_inquiries: stats.new_inquiries,
                total_reviews: stats.total_reviews,
                avg_rating: stats.avg_rating,
                total_shortlisted: stats.total_shortlisted,
            })),
            Err(err) => VendorStatsResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.vendor",
                    "get_vendor_stats_api",
                    "get vendor stats",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/vendor/venues/toggle-active",
        method = "post",
        tag = "ApiVendorTags::Vendor"
    )]
    async fn toggle_vendor_venue_active_api(
        &self,
        Query(id): Query<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> VenueUpdateResponses {
        let (tx, profile) = match authorize(
            &state,
            &auth,
            &VENDOR_ROLES,
            "route.vendor",
            "toggle_vendor_venue_active_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        toggle_venue_active(
            tx,
            &id,
            Some(profile.id),
            "toggle_vendor_venue_active_api",
        )
        .await
    }

    #[oai(path = "/vendor/inquiries", method = "get", tag = "ApiVendorTags::Vendor")]
    async fn get_vendor_inquiry_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(status): Query<Option<InquiryStatus>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateInquiryResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &VENDOR_ROLES,
            "route.vendor",
            "get_vendor_inquiry_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(10);
        let filter = InquiryFilter {
            status,
            vendor_id: Some(profile.id),
            ..Default::default()
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
                    "route.vendor",
                    "get_vendor_inquiry_api",
                    "paginate inquiry",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/vendor/inquiries/status",
        method = "put",
        tag = "ApiVendorTags::Vendor"
    )]
    async fn update_vendor_inquiry_status_api(
        &self,
        Query(id): Query<String>,
        json: Json<InquiryStatusRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> InquiryUpdateResponses {
        let (tx, profile) = match authorize(
            &state,
            &auth,
            &VENDOR_ROLES,
            "route.vendor",
            "update_vendor_inquiry_status_api",
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
            Some(profile.id),
            "update_vendor_inquiry_status_api",
            "Inquiry status updated",
            |inquiry| inquiry.status = status.as_str().to_string(),
        )
        .await
    }
}
