pub mod crawler_data;
pub mod crawler_sources;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;

/// Mount the REST API; callers put this under `/api`
pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/crawlersources").configure(crawler_sources::create_routes))
        .service(web::scope("/crawlerdata").configure(crawler_data::create_routes));
}

/// Application-level wiring shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::scope("/api").configure(create_routes));
}

/// Reject malformed bodies with the same `{"detail": ...}` shape as other errors
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::Validation(err.to_string()).into()
    })
}
