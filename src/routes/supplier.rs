use actix_web::web;

use crate::{
    handlers::{method_not_allowed, supplier, supplier_full},
    repositories::{SupplierFullRepositoryTrait, SupplierRepositoryTrait},
};

pub fn configure<T: SupplierRepositoryTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/suppliers")
            .route(web::post().to(supplier::create::<T>))
            .route(web::get().to(supplier::get_all::<T>))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/suppliers/{id}")
            .route(web::get().to(supplier::get_by_id::<T>))
            .route(web::put().to(supplier::update::<T>))
            .route(web::delete().to(supplier::delete::<T>))
            .default_service(web::to(method_not_allowed)),
    );
}

/// Must be registered ahead of [`configure`] so `full` is not read as an ID
pub fn configure_full<T: SupplierFullRepositoryTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/suppliers/full")
            .route(web::post().to(supplier_full::create::<T>))
            .default_service(web::to(method_not_allowed)),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::errors::RepositoryError;
    use crate::handlers::configure_extractors;
    use crate::repositories::{MockSupplierRepositoryTrait, SupplierFullTransaction};
    use crate::services::{SupplierFullService, SupplierService};

    /// Refuses to open transactions, counting attempts
    #[derive(Default)]
    struct Unavailable {
        begins: AtomicUsize,
    }

    #[async_trait]
    impl SupplierFullRepositoryTrait for Unavailable {
        async fn begin(&self) -> Result<Box<dyn SupplierFullTransaction>, RepositoryError> {
            self.begins.fetch_add(1, Ordering::SeqCst);
            Err(RepositoryError::Transaction("pool exhausted".into()))
        }
    }

    fn body() -> Value {
        json!({
            "supplier": {"name": "Distribuidora Norte", "cnpj": "12345678000199"},
            "address": {
                "street": "Av. Paulista", "number": "1000", "city": "São Paulo",
                "state": "SP", "country": "Brasil", "postal_code": "01310-100"
            },
            "contact": {"contact_name": "Carla Mendes", "email": "carla@norte.com.br"},
            "categories": [{"id": 1}, {"id": 2}]
        })
    }

    macro_rules! app {
        ($repo:expr) => {
            test::init_service(
                App::new()
                    .configure(|cfg| configure_extractors(cfg, 4096))
                    .app_data(web::Data::new(SupplierFullService::new($repo)))
                    .app_data(web::Data::new(SupplierService::new(Arc::new(
                        MockSupplierRepositoryTrait::new(),
                    ))))
                    .configure(configure_full::<Unavailable>)
                    .configure(configure::<MockSupplierRepositoryTrait>),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_address_never_opens_transaction() {
        let repo = Arc::new(Unavailable::default());
        let app = app!(repo.clone());

        let mut payload = body();
        payload["address"] = Value::Null;
        let req = test::TestRequest::post()
            .uri("/suppliers/full")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(repo.begins.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_begin_failure_is_internal_error() {
        let repo = Arc::new(Unavailable::default());
        let app = app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/suppliers/full")
            .set_json(body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(repo.begins.load(Ordering::SeqCst), 1);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 500);
    }

    #[actix_web::test]
    async fn test_full_path_is_not_an_id() {
        let app = app!(Arc::new(Unavailable::default()));

        let req = test::TestRequest::get().uri("/suppliers/full").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
