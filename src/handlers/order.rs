use crate::error::AppError;
use crate::models::*;
use crate::services::OrderRepository;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Utc;

const DEFAULT_DAYS_BEFORE: i64 = 1;

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    responses(
        (status = 200, description = "All active orders", body = [Order])
    )
)]
pub async fn get_orders(repo: web::Data<dyn OrderRepository>) -> Result<HttpResponse> {
    match repo.list_active().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(ApiResponse::success(orders))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/recentOrders/{daysBefore}",
    tag = "order",
    params(
        ("daysBefore" = i64, Path, description = "Days back from today (UTC); /recentOrders alone uses 1")
    ),
    responses(
        (status = 200, description = "Active orders dated on or after the cutoff", body = [Order]),
        (status = 400, description = "Cutoff outside the calendar range", body = ApiError)
    )
)]
pub async fn get_recent_orders(
    repo: web::Data<dyn OrderRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    recent_orders(repo, path.into_inner()).await
}

pub async fn get_recent_orders_default(
    repo: web::Data<dyn OrderRepository>,
) -> Result<HttpResponse> {
    recent_orders(repo, DEFAULT_DAYS_BEFORE).await
}

async fn recent_orders(
    repo: web::Data<dyn OrderRepository>,
    days_before: i64,
) -> Result<HttpResponse> {
    let today = Utc::now().date_naive();
    let Some(from_date) = recent_cutoff(today, days_before) else {
        return Ok(
            AppError::BadRequest(format!("daysBefore {days_before} is out of range"))
                .error_response(),
        );
    };

    match repo.list_recent(from_date).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(ApiResponse::success(orders))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 400, description = "Id is not an integer", body = ApiError),
        (status = 404, description = "No active order with this id", body = ApiError)
    )
)]
pub async fn get_order(
    repo: web::Data<dyn OrderRepository>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match repo.get_by_id(id).await {
        Ok(Some(order)) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Ok(None) => Ok(not_found(id).error_response()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created; Location points at the new order", body = Order),
        (status = 400, description = "Field validation failed", body = ApiError)
    )
)]
pub async fn create_order(
    repo: web::Data<dyn OrderRepository>,
    req: HttpRequest,
    request: web::Json<OrderRequest>,
) -> Result<HttpResponse> {
    let new_order = match request.into_inner().into_new_order() {
        Ok(order) => order,
        Err(e) => return Ok(e.error_response()),
    };

    match repo.add(new_order).await {
        Ok(order) => {
            let location = format!("{}/{}", req.path().trim_end_matches('/'), order.id);
            Ok(HttpResponse::Created()
                .insert_header((header::LOCATION, location))
                .json(ApiResponse::success(order)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    request_body = OrderRequest,
    responses(
        (status = 204, description = "Order overwritten"),
        (status = 400, description = "Field validation failed", body = ApiError),
        (status = 404, description = "No order with this id", body = ApiError)
    )
)]
pub async fn update_order(
    repo: web::Data<dyn OrderRepository>,
    path: web::Path<i32>,
    request: web::Json<OrderRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let order = match request.into_inner().into_order(id) {
        Ok(order) => order,
        Err(e) => return Ok(e.error_response()),
    };

    match repo.update(order).await {
        Ok(Some(_)) => Ok(HttpResponse::NoContent().finish()),
        Ok(None) => Ok(not_found(id).error_response()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order soft-deleted"),
        (status = 404, description = "No active order with this id", body = ApiError)
    )
)]
pub async fn delete_order(
    repo: web::Data<dyn OrderRepository>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match repo.get_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(id).error_response()),
        Err(e) => return Ok(e.error_response()),
    }

    match repo.soft_delete(id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Order {id} not found"))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let mut fields = FieldErrors::default();
        fields.add("body", &err.to_string());
        AppError::ValidationError(fields).into()
    })
}

/// Route segments that fail to parse (`/orders/abc`) are reported per segment name.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, req| {
        let mut fields = FieldErrors::default();
        for (name, value) in req.match_info().iter() {
            fields.add(name, &format!("The value '{value}' is not valid."));
        }
        AppError::ValidationError(fields).into()
    })
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .app_data(json_config())
            .app_data(path_config())
            .route("", web::get().to(get_orders))
            .route("", web::post().to(create_order))
            // must precede /{id}
            .route("/recentOrders", web::get().to(get_recent_orders_default))
            .route("/recentOrders/{daysBefore}", web::get().to(get_recent_orders))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::put().to(update_order))
            .route("/{id}", web::delete().to(delete_order)),
    );
}
