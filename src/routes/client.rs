use actix_web::web;

use crate::{
    handlers::{client, method_not_allowed},
    repositories::ClientRepositoryTrait,
};

pub fn configure<T: ClientRepositoryTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/clients")
            .route(web::post().to(client::create::<T>))
            .route(web::get().to(client::get_all::<T>))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/clients/{id}")
            .route(web::get().to(client::get_by_id::<T>))
            .route(web::put().to(client::update::<T>))
            .route(web::delete().to(client::delete::<T>))
            .default_service(web::to(method_not_allowed)),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::function;
    use serde_json::{json, Value};

    use super::*;
    use crate::handlers::configure_extractors;
    use crate::models::{Client, ClientFilter};
    use crate::repositories::MockClientRepositoryTrait;
    use crate::services::ClientService;

    fn stored(id: i64, version: i32) -> Client {
        Client {
            id,
            name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            cpf: "12345678901".into(),
            status: true,
            version,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    macro_rules! app {
        ($mock:expr) => {
            test::init_service(
                App::new()
                    .configure(|cfg| configure_extractors(cfg, 4096))
                    .app_data(web::Data::new(ClientService::new(Arc::new($mock))))
                    .configure(configure::<MockClientRepositoryTrait>),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_query_string_becomes_filter() {
        let mut mock = MockClientRepositoryTrait::new();
        mock.expect_get_all()
            .with(function(|f: &ClientFilter| {
                f.name.as_deref() == Some("ana")
                    && f.status == Some(true)
                    && f.created_from == NaiveDate::from_ymd_opt(2024, 3, 1)
                    && f.created_to.is_none()
                    && f.limit == 10
            }))
            .times(1)
            .returning(|_| Ok(vec![stored(1, 1)]));
        let app = app!(mock);

        let req = test::TestRequest::get()
            .uri("/clients?name=ana&status=true&created_from=2024-03-01&created_to=garbage&limit=10")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn test_stale_version_is_conflict() {
        let mut mock = MockClientRepositoryTrait::new();
        mock.expect_get_by_id().returning(|id| Ok(stored(id, 3)));
        mock.expect_update().times(0);
        let app = app!(mock);

        let req = test::TestRequest::put()
            .uri("/clients/5")
            .set_json(json!({
                "name": "Ana Souza",
                "email": "ana@example.com",
                "cpf": "12345678901",
                "version": 2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_invalid_cpf_is_bad_request() {
        let mut mock = MockClientRepositoryTrait::new();
        mock.expect_create().times(0);
        let app = app!(mock);

        let req = test::TestRequest::post()
            .uri("/clients")
            .set_json(json!({"name": "Ana Souza", "email": "ana@example.com", "cpf": "123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap_or_default().contains("cpf"));
    }
}
