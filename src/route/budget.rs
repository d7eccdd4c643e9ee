use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use uuid::Uuid;

use crate::{
    core::{
        membership::{authorize_wedding, parse_id, WeddingAccess},
        security::{authorize, BearerAuthorization},
        utils::non_blank,
    },
    model::{
        budget_item::{is_budget_category, BudgetItem, PaymentStatus, BUDGET_CATEGORIES},
        wedding::Wedding,
    },
    repository::budget_item::{
        create_budget_item, delete_budget_item, get_budget_item_by_id, get_budget_items,
        update_budget_item,
    },
    schema::{
        budget::{
            BudgetCategoryTotal, BudgetItemCreateResponses, BudgetItemRequest,
            BudgetItemUpdateResponses, BudgetOverview, BudgetOverviewResponses,
            DetailBudgetItem,
        },
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
        },
        wedding::WeddingDeleteResponses,
    },
    AppState,
};

#[derive(Tags)]
enum ApiBudgetTags {
    Budget,
}

pub struct ApiBudget;

const UNCATEGORIZED: &str = "miscellaneous";

/// Copy the form onto `item` and re-derive its payment status.
pub(crate) fn apply_budget_item_request(
    item: &mut BudgetItem,
    req: &BudgetItemRequest,
) -> Result<(), String> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    item.name = name.to_string();
    if req.category.is_some() {
        let category = non_blank(req.category.clone());
        if let Some(val) = &category {
            if !is_budget_category(val) {
                return Err(format!("Unknown budget category {}", val));
            }
        }
        item.category = category;
    }
    for val in [req.estimated_cost, req.actual_cost, req.amount_paid]
        .into_iter()
        .flatten()
    {
        if val < 0 {
            return Err("Amounts cannot be negative".to_string());
        }
    }
    if let Some(val) = req.estimated_cost {
        item.estimated_cost = val;
    }
    if req.actual_cost.is_some() {
        item.actual_cost = req.actual_cost;
    }
    if let Some(val) = req.amount_paid {
        item.amount_paid = val;
    }
    if req.notes.is_some() {
        item.notes = non_blank(req.notes.clone());
    }
    item.payment_status = item.payment_status().as_str().to_string();
    Ok(())
}

/// Totals per category, items without one count as miscellaneous.
pub(crate) fn build_budget_overview(wedding: &Wedding, items: Vec<BudgetItem>) -> BudgetOverview {
    let categories = BUDGET_CATEGORIES
        .iter()
        .map(|(id, name)| {
            let in_category: Vec<&BudgetItem> = items
                .iter()
                .filter(|x| x.category.as_deref().unwrap_or(UNCATEGORIZED) == *id)
                .collect();
            BudgetCategoryTotal {
                id: id.to_string(),
                name: name.to_string(),
                item_count: in_category.len() as u32,
                total: in_category.iter().map(|x| x.cost()).sum(),
            }
        })
        .collect();
    let total_cost: i64 = items.iter().map(|x| x.cost()).sum();
    BudgetOverview {
        total_budget: wedding.total_budget,
        currency: wedding.currency.clone(),
        total_estimated: items.iter().map(|x| x.estimated_cost).sum(),
        total_actual: items.iter().filter_map(|x| x.actual_cost).sum(),
        total_paid: items.iter().map(|x| x.amount_paid).sum(),
        remaining: wedding.total_budget.map(|x| x - total_cost),
        categories,
        items: items.into_iter().map(DetailBudgetItem::from).collect(),
    }
}

fn blank_budget_item(wedding_id: Uuid) -> BudgetItem {
    let now = Local::now().fixed_offset();
    BudgetItem {
        id: Uuid::now_v7(),
        wedding_id,
        category: None,
        name: String::new(),
        estimated_cost: 0,
        actual_cost: None,
        amount_paid: 0,
        payment_status: PaymentStatus::default().as_str().to_string(),
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

#[OpenApi]
impl ApiBudget {
    #[oai(path = "/weddings/budget", method = "get", tag = "ApiBudgetTags::Budget")]
    async fn get_budget_overview_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> BudgetOverviewResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.budget",
            "get_budget_overview_api",
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
            "route.budget",
            "get_budget_overview_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        match get_budget_items(&mut tx, &wedding.id).await {
            Ok(items) => {
                BudgetOverviewResponses::Ok(Json(build_budget_overview(&wedding, items)))
            }
            Err(err) => BudgetOverviewResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.budget",
                    "get_budget_overview_api",
                    "get budget items",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/weddings/budget", method = "post", tag = "ApiBudgetTags::Budget")]
    async fn create_budget_item_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        json: Json<BudgetItemRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> BudgetItemCreateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.budget",
            "create_budget_item_api",
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
            "route.budget",
            "create_budget_item_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let mut item = blank_budget_item(wedding.id);
        if let Err(message) = apply_budget_item_request(&mut item, &json) {
            return BudgetItemCreateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        if let Err(err) = create_budget_item(&mut tx, &item).await {
            return BudgetItemCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.budget",
                    "create_budget_item_api",
                    "create budget item",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return BudgetItemCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.budget",
                    "create_budget_item_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        BudgetItemCreateResponses::Created(Json(MessageResponse {
            message: "Budget item added successfully".to_string(),
            data: item.into(),
        }))
    }

    #[oai(path = "/weddings/budget", method = "put", tag = "ApiBudgetTags::Budget")]
    async fn update_budget_item_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(item_id): Query<Option<String>>,
        json: Json<BudgetItemRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> BudgetItemUpdateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.budget",
            "update_budget_item_api",
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
            "route.budget",
            "update_budget_item_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let item_id = match parse_id(item_id.as_deref(), "Item") {
            Ok(val) => val,
            Err(err) => return BudgetItemUpdateResponses::BadRequest(Json(err)),
        };
        let mut item = match get_budget_item_by_id(&mut tx, &wedding.id, &item_id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return BudgetItemUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "budget item",
                    "id",
                    &item_id.to_string(),
                )))
            }
            Err(err) => {
                return BudgetItemUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.budget",
                        "update_budget_item_api",
                        "get budget item by id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        if let Err(message) = apply_budget_item_request(&mut item, &json) {
            return BudgetItemUpdateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        let now = Local::now().fixed_offset();
        if let Err(err) = update_budget_item(&mut tx, &mut item, &now).await {
            return BudgetItemUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.budget",
                    "update_budget_item_api",
                    "update budget item",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return BudgetItemUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.budget",
                    "update_budget_item_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        BudgetItemUpdateResponses::Ok(Json(MessageResponse {
            message: "Budget item updated successfully".to_string(),
            data: item.into(),
        }))
    }

    #[oai(path = "/weddings/budget", method = "delete", tag = "ApiBudgetTags::Budget")]
    async fn delete_budget_item_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(item_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingDeleteResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.budget",
            "delete_budget_item_api",
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
            "route.budget",
            "delete_budget_item_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let item_id = match parse_id(item_id.as_deref(), "Item") {
            Ok(val) => val,
            Err(err) => return WeddingDeleteResponses::BadRequest(Json(err)),
        };

        match delete_budget_item(&mut tx, &wedding.id, &item_id).await {
            Ok(0) => {
                return WeddingDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "budget item",
                    "id",
                    &item_id.to_string(),
                )))
            }
            Ok(_) => {}
            Err(err) => {
                return WeddingDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.budget",
                        "delete_budget_item_api",
                        "delete budget item",
                        &err.to_string(),
                    ),
                ))
            }
        }
        if let Err(err) = tx.commit().await {
            return WeddingDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.budget",
                    "delete_budget_item_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        WeddingDeleteResponses::NoContent
    }
}
