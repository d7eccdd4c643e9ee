use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::datetime_to_string,
    impl_guard_error, impl_wedding_guard_error,
    model::budget_item::{BudgetItem, PaymentStatus},
};

#[derive(Object, Deserialize)]
pub struct DetailBudgetItem {
    pub id: String,
    pub wedding_id: String,
    pub category: Option<String>,
    pub name: String,
    pub estimated_cost: i64,
    pub actual_cost: Option<i64>,
    pub amount_paid: i64,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BudgetItem> for DetailBudgetItem {
    fn from(item: BudgetItem) -> Self {
        Self {
            id: item.id.to_string(),
            wedding_id: item.wedding_id.to_string(),
            category: item.category,
            name: item.name,
            estimated_cost: item.estimated_cost,
            actual_cost: item.actual_cost,
            amount_paid: item.amount_paid,
            payment_status: item.payment_status.parse().unwrap_or_default(),
            notes: item.notes,
            created_at: datetime_to_string(item.created_at),
            updated_at: datetime_to_string(item.updated_at),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct BudgetCategoryTotal {
    pub id: String,
    pub name: String,
    pub item_count: u32,
    pub total: i64,
}

/// The wedding's budget against everything planned and paid so far.
#[derive(Object, Deserialize)]
pub struct BudgetOverview {
    pub total_budget: Option<i64>,
    pub currency: String,
    pub total_estimated: i64,
    pub total_actual: i64,
    pub total_paid: i64,
    /// `total_budget` minus the cost of every item; null without a budget.
    pub remaining: Option<i64>,
    pub categories: Vec<BudgetCategoryTotal>,
    pub items: Vec<DetailBudgetItem>,
}

#[derive(Object, Deserialize)]
pub struct BudgetItemRequest {
    pub name: String,
    pub category: Option<String>,
    pub estimated_cost: Option<i64>,
    pub actual_cost: Option<i64>,
    pub amount_paid: Option<i64>,
    pub notes: Option<String>,
}

#[derive(ApiResponse)]
pub enum BudgetOverviewResponses {
    #[oai(status = 200)]
    Ok(Json<BudgetOverview>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum BudgetItemCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailBudgetItem>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum BudgetItemUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailBudgetItem>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_guard_error!(
    BudgetOverviewResponses,
    BudgetItemCreateResponses,
    BudgetItemUpdateResponses,
);

impl_wedding_guard_error!(
    BudgetOverviewResponses,
    BudgetItemCreateResponses,
    BudgetItemUpdateResponses,
);
