use actix_web::{web, HttpResponse};

use crate::{
    db::DEFAULT_LIST_LIMIT,
    error::{AppError, AppResult},
    models::crawler_source::{CrawlerSource, CrawlerSourceForm, CrawlerSourceUpdateForm},
    models::Record,
    services::CrawlerSourceService,
    AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_crawler_sources))
            .route(web::post().to(create_crawler_source)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_crawler_source_by_id))
            .route(web::put().to(update_crawler_source_by_id))
            .route(web::delete().to(delete_crawler_source_by_id)),
    );
}

/// POST / - Create a new crawler source
async fn create_crawler_source(
    state: web::Data<AppState>,
    form: web::Json<CrawlerSourceForm>,
) -> AppResult<HttpResponse> {
    let source = form.into_inner().into_source(state.ids.as_ref());
    let created = CrawlerSourceService::new(&state.db)
        .insert_new_source(&source)
        .await?;

    Ok(HttpResponse::Created().json(created))
}

/// GET / - List crawler sources (capped)
async fn list_crawler_sources(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let sources = CrawlerSourceService::new(&state.db)
        .get_sources(DEFAULT_LIST_LIMIT)
        .await?;

    Ok(HttpResponse::Ok().json(sources))
}

/// GET /{id} - Get a single crawler source
async fn get_crawler_source_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let source = CrawlerSourceService::new(&state.db)
        .get_source_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(CrawlerSource::not_found_message(&id)))?;

    Ok(HttpResponse::Ok().json(source))
}

/// PUT /{id} - Merge the supplied fields into a crawler source
async fn update_crawler_source_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<CrawlerSourceUpdateForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let source = CrawlerSourceService::new(&state.db)
        .update_source_by_id(&id, &form, state.config.unchanged_update)
        .await?;

    Ok(HttpResponse::Ok().json(source))
}

/// DELETE /{id} - Delete a crawler source
async fn delete_crawler_source_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if CrawlerSourceService::new(&state.db)
        .delete_source_by_id(&id)
        .await?
    {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(CrawlerSource::not_found_message(&id)))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::UnchangedUpdate;
    use crate::error::ErrorResponse;
    use crate::models::crawler_source::CrawlerSource;
    use crate::routes::configure;
    use crate::test_state;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn example() -> serde_json::Value {
        json!({
            "name": "Mag",
            "description": "d",
            "sourceDomain": "x.com",
            "crawlerSchema": "",
            "createdAt": 1000,
            "enabled": true
        })
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::NotFound))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/crawlersources")
            .set_json(example())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: CrawlerSource = test::read_body_json(resp).await;
        assert_eq!(created.id, "id-1");
        assert_eq!(created.name, "Mag");
        assert_eq!(created.crawler_schema, "");

        let req = test::TestRequest::get()
            .uri("/api/crawlersources/id-1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: CrawlerSource = test::read_body_json(resp).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn test_create_rejects_missing_fields() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::NotFound))
                .configure(configure),
        )
        .await;

        let mut missing = example();
        missing.as_object_mut().unwrap().remove("sourceDomain");
        let req = test::TestRequest::post()
            .uri("/api/crawlersources")
            .set_json(missing)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/crawlersources").to_request();
        let listed: Vec<CrawlerSource> = test::call_and_read_body_json(&app, req).await;
        assert!(listed.is_empty());
    }

    #[actix_web::test]
    async fn test_create_accepts_empty_strings_and_relative_urls() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::NotFound))
                .configure(configure),
        )
        .await;

        let mut body = example();
        body["name"] = json!("");
        body["sourceDomain"] = json!("");
        body["createdAt"] = json!(-1);
        body["topics"] = json!([{
            "topic": "banks",
            "description": "",
            "requestUrl": "/search?q=x",
            "createdAt": 0,
            "updatedAt": null,
            "lastSync": null,
            "available": true
        }]);
        let req = test::TestRequest::post()
            .uri("/api/crawlersources")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: CrawlerSource = test::read_body_json(resp).await;
        assert_eq!(created.name, "");
        assert_eq!(created.created_at, -1);
        assert_eq!(created.topics.unwrap()[0].request_url, "/search?q=x");
    }

    #[actix_web::test]
    async fn test_create_with_supplied_id_and_duplicate() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::NotFound))
                .configure(configure),
        )
        .await;

        let mut body = example();
        body["_id"] = json!("066de609-b04a-4b30-b46c-32537c7f1f6e");

        let req = test::TestRequest::post()
            .uri("/api/crawlersources")
            .set_json(body.clone())
            .to_request();
        let created: CrawlerSource = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.id, "066de609-b04a-4b30-b46c-32537c7f1f6e");

        let req = test::TestRequest::post()
            .uri("/api/crawlersources")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_missing_id_returns_404_naming_id() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::NotFound))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/crawlersources/does-not-exist")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.detail, "Crawler source with ID does-not-exist not found");
    }

    #[actix_web::test]
    async fn test_list_is_capped_at_100() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::NotFound))
                .configure(configure),
        )
        .await;

        for _ in 0..105 {
            let req = test::TestRequest::post()
                .uri("/api/crawlersources")
                .set_json(example())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/api/crawlersources").to_request();
        let listed: Vec<CrawlerSource> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 100);
        assert_eq!(listed[0].id, "id-1");
    }

    #[actix_web::test]
    async fn test_update_merges_and_repeat_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::NotFound))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/crawlersources")
            .set_json(example())
            .to_request();
        let created: CrawlerSource = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/crawlersources/{}", created.id))
            .set_json(json!({"description": "d2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: CrawlerSource = test::read_body_json(resp).await;
        assert_eq!(updated.description, "d2");
        assert_eq!(
            updated,
            CrawlerSource {
                description: "d2".to_string(),
                ..created.clone()
            }
        );

        let req = test::TestRequest::put()
            .uri(&format!("/api/crawlersources/{}", created.id))
            .set_json(json!({"description": "d2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/api/crawlersources/unknown")
            .set_json(json!({"description": "d3"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unchanged_update_can_succeed() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::Ok))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/crawlersources")
            .set_json(example())
            .to_request();
        let created: CrawlerSource = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/crawlersources/{}", created.id))
            .set_json(example())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let same: CrawlerSource = test::read_body_json(resp).await;
        assert_eq!(same, created);
    }

    #[actix_web::test]
    async fn test_delete_then_get_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(UnchangedUpdate::NotFound))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/crawlersources")
            .set_json(example())
            .to_request();
        let created: CrawlerSource = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/crawlersources/{}", created.id);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
