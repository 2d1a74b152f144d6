use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec![actix_web::http::header::LOCATION])
        .max_age(3600)
}
