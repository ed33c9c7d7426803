use actix_web::web;

use crate::{
    handlers::{address, method_not_allowed},
    repositories::AddressRepositoryTrait,
};

pub fn configure<T: AddressRepositoryTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/addresses")
            .route(web::post().to(address::create::<T>))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/addresses/{id}")
            .route(web::get().to(address::get_by_id::<T>))
            .route(web::delete().to(address::delete::<T>))
            .default_service(web::to(method_not_allowed)),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use super::*;
    use crate::handlers::configure_extractors;
    use crate::repositories::MockAddressRepositoryTrait;
    use crate::services::AddressService;

    #[actix_web::test]
    async fn test_address_without_owner_is_rejected() {
        let mut mock = MockAddressRepositoryTrait::new();
        mock.expect_create().times(0);
        let app = test::init_service(
            App::new()
                .configure(|cfg| configure_extractors(cfg, 4096))
                .app_data(web::Data::new(AddressService::new(Arc::new(mock))))
                .configure(configure::<MockAddressRepositoryTrait>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/addresses")
            .set_json(json!({
                "street": "Rua das Flores",
                "number": "12",
                "city": "Curitiba",
                "state": "pr",
                "country": "Brasil",
                "postal_code": "80010-000"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
