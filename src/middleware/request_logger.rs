use std::rc::Rc;
use std::time::Instant;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::{ok, LocalBoxFuture, Ready};
use log::{debug, warn};
use uuid::Uuid;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 128;

/// Tags each request with an `X-Request-ID` and logs its outcome as
/// `request_id=.. method=.. path=.. status=.. elapsed_ms=..`.
///
/// A client-supplied id is kept, otherwise a fresh UUID is generated. The id
/// is written into the request headers, so inner middleware such as the
/// access log see it, and echoed on the response.
///
/// Server errors are always logged at `warn`; everything else only when
/// verbose logging is on.
pub struct RequestLogger {
    verbose: bool,
}

impl RequestLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggerMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequestLoggerMiddleware {
            service: Rc::new(service),
            verbose: self.verbose,
        })
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: Rc<S>,
    verbose: bool,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
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

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let verbose = self.verbose;
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();

        let id = request_id(&req);
        let header = HeaderValue::from_str(&id).ok();
        if let Some(value) = &header {
            req.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
        }

        if verbose {
            debug!(
                "Request started: request_id={} method={} path={}",
                id, method, path
            );
        }

        Box::pin(async move {
            let mut res = service.call(req).await?;
            if let Some(value) = header {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            let status = res.status();
            let elapsed_ms = started.elapsed().as_millis();

            if status.is_server_error() {
                warn!(
                    "Request failed: request_id={} method={} path={} status={} elapsed_ms={}",
                    id,
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            } else if verbose {
                debug!(
                    "Request finished: request_id={} method={} path={} status={} elapsed_ms={}",
                    id,
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            }
            Ok(res)
        })
    }
}

/// The caller's id when it is printable and short, a new UUID otherwise
fn request_id(req: &ServiceRequest) -> String {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
