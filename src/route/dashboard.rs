use std::sync::Arc;

use chrono::{Duration, Local};
use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::{
    core::security::{authorize, BearerAuthorization},
    model::profile::ProfileRole,
    repository::{
        destination::count_destination,
        inquiry::{get_inquiry_counts, get_recent_inquiry},
        review::get_review_counts,
        venue::count_venue,
    },
    schema::{
        common::InternalServerErrorResponse,
        dashboard::{DashboardResponse, DashboardResponses},
        inquiry::DetailInquiry,
    },
    AppState,
};

const RECENT_INQUIRY_LIMIT: u32 = 5;

#[derive(Tags)]
enum ApiDashboardTags {
    AdminDashboard,
}

pub struct ApiDashboard;

/// Rounded percent change from `last` to `this`. 100 when last week had
/// nothing and this week has something, 0 when both are empty.
pub fn weekly_change(this: i64, last: i64) -> i64 {
    if last > 0 {
        (((this - last) as f64) * 100.0 / last as f64).round() as i64
    } else if this > 0 {
        100
    } else {
        0
    }
}

#[OpenApi]
impl ApiDashboard {
    #[oai(
        path = "/admin/dashboard",
        method = "get",
        tag = "ApiDashboardTags::AdminDashboard"
    )]
    async fn get_dashboard_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DashboardResponses {
        let (mut tx, _) = match authorize(
            &state,
            &auth,
            &[ProfileRole::Admin],
            "route.dashboard",
            "get_dashboard_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let now = Local::now().fixed_offset();
        let inquiries = match get_inquiry_counts(
            &mut tx,
            &(now - Duration::days(7)),
            &(now - Duration::days(14)),
        )
        .await
        {
            Ok(val) => val,
            Err(err) => {
                return DashboardResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dashboard",
                        "get_dashboard_api",
                        "get inquiry counts",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let reviews = match get_review_counts(&mut tx).await {
            Ok(val) => val,
            Err(err) => {
                return DashboardResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dashboard",
                        "get_dashboard_api",
                        "get review counts",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let total_venues = match count_venue(&mut tx).await {
            Ok(val) => val,
            Err(err) => {
                return DashboardResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dashboard",
                        "get_dashboard_api",
                        "count venue",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let total_destinations = match count_destination(&mut tx).await {
            Ok(val) => val,
            Err(err) => {
                return DashboardResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dashboard",
                        "get_dashboard_api",
                        "count destination",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let recent = match get_recent_inquiry(&mut tx, RECENT_INQUIRY_LIMIT).await {
            Ok(val) => val,
            Err(err) => {
                return DashboardResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dashboard",
                        "get_dashboard_api",
                        "get recent inquiry",
                        &err.to_string(),
                    ),
                ))
            }
        };

        DashboardResponses::Ok(Json(DashboardResponse {
            total_inquiries: inquiries.total,
            new_inquiries: inquiries.new,
            total_reviews: reviews.total,
            pending_reviews: reviews.pending,
            total_venues,
            total_destinations,
            inquiries_this_week: inquiries.this_week,
            inquiries_last_week: inquiries.last_week,
            weekly_change: weekly_change(inquiries.this_week, inquiries.last_week),
            recent_inquiries: recent.into_iter().map(DetailInquiry::from).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::weekly_change;

    #[test]
    fn test_weekly_change() {
        assert_eq!(weekly_change(15, 10), 50);
        assert_eq!(weekly_change(5, 10), -50);
        assert_eq!(weekly_change(1, 3), -67);
        assert_eq!(weekly_change(4, 0), 100);
        assert_eq!(weekly_change(0, 0), 0);
    }
}
