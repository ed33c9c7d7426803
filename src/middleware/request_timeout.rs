use std::rc::Rc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::{ok, LocalBoxFuture, Ready};
use log::warn;

use crate::errors::AppError;

/// Fails a request with [`AppError::Timeout`] once it runs past the deadline.
///
/// The handler future is dropped on expiry, which releases any open database
/// transaction and rolls it back.
pub struct RequestTimeout {
    deadline: Duration,
}

impl RequestTimeout {
    pub fn new(seconds: u64) -> Self {
        Self {
            deadline: Duration::from_secs(seconds),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestTimeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestTimeoutMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequestTimeoutMiddleware {
            service: Rc::new(service),
            deadline: self.deadline,
        })
    }
}

pub struct RequestTimeoutMiddleware<S> {
    service: Rc<S>,
    deadline: Duration,
}

impl<S, B> Service<ServiceRequest> for RequestTimeoutMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let deadline = self.deadline;
        let path = req.path().to_owned();

        Box::pin(async move {
            match tokio::time::timeout(deadline, service.call(req)).await {
                Ok(res) => res,
                Err(_) => {
                    warn!(
                        "Request timed out: path={} deadline_s={}",
                        path,
                        deadline.as_secs()
                    );
                    Err(AppError::Timeout(deadline.as_secs()).into())
                }
            }
        })
    }
}
