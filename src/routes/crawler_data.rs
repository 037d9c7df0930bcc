use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    db::DEFAULT_LIST_LIMIT,
    error::{AppError, AppResult},
    models::crawler_data::{CrawlerData, CrawlerDataForm, CrawlerDataUpdateForm},
    models::Record,
    services::CrawlerDataService,
    AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_crawler_data))
            .route(web::post().to(create_crawler_data)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_crawler_data_by_id))
            .route(web::put().to(update_crawler_data_by_id))
            .route(web::delete().to(delete_crawler_data_by_id)),
    );
}

async fn create_crawler_data(
    state: web::Data<AppState>,
    form: web::Json<CrawlerDataForm>,
) -> AppResult<HttpResponse> {
    form.validate()?;

    let data = form.into_inner().into_data(state.ids.as_ref());
    let created = CrawlerDataService::new(&state.db)
        .insert_new_data(&data)
        .await?;

    Ok(HttpResponse::Created().json(created))
}

async fn list_crawler_data(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let items = CrawlerDataService::new(&state.db)
        .get_data(DEFAULT_LIST_LIMIT)
        .await?;

    Ok(HttpResponse::Ok().json(items))
}

async fn get_crawler_data_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let data = CrawlerDataService::new(&state.db)
        .get_data_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(CrawlerData::not_found_message(&id)))?;

    Ok(HttpResponse::Ok().json(data))
}

async fn update_crawler_data_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<CrawlerDataUpdateForm>,
) -> AppResult<HttpResponse> {
    form.validate()?;

    let id = path.into_inner();
    let data = CrawlerDataService::new(&state.db)
        .update_data_by_id(&id, &form, state.config.unchanged_update)
        .await?;

    Ok(HttpResponse::Ok().json(data))
}

async fn delete_crawler_data_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if CrawlerDataService::new(&state.db)
        .delete_data_by_id(&id)
        .await?
    {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(CrawlerData::not_found_message(&id)))
    }
}
