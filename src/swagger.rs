use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::order::get_orders,
        handlers::order::get_recent_orders,
        handlers::order::get_order,
        handlers::order::create_order,
        handlers::order::update_order,
        handlers::order::delete_order,
    ),
    components(
        schemas(
            Order,
            OrderRequest,
            ApiError,
            FieldErrors,
        )
    ),
    tags(
        (name = "order", description = "Order management API"),
    ),
    info(
        title = "Orders API",
        version = "0.1.0",
        description = "Order CRUD REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_order_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert!(paths.contains(&"/orders"));
        assert!(paths.contains(&"/orders/{id}"));
        assert!(paths.contains(&"/orders/recentOrders/{daysBefore}"));
    }
}
