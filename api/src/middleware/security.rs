//! Transport security for the passcode endpoints.
//!
//! Production refuses plain HTTP unless a trusted proxy vouches for TLS via
//! `X-Forwarded-Proto`. Outside development every response carries headers
//! that keep passcode traffic out of caches and frames.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::{self, HeaderName, HeaderValue},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use gate_shared::{error_codes, Environment, ErrorResponse};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

/// Headers stamped on every response when the policy asks for them
const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
    ("cache-control", "no-store"),
];

#[derive(Debug, Clone, Default)]
struct SecurityPolicy {
    require_https: bool,
    add_headers: bool,
    /// Peer IPs whose `X-Forwarded-Proto` is believed
    trusted_proxies: Vec<String>,
}

impl SecurityPolicy {
    fn check(&self, req: &ServiceRequest) -> Result<(), Error> {
        if self.require_https && !self.is_secure(req) {
            log::warn!("Plain HTTP request refused: {} {}", req.method(), req.path());
            return Err(reject(
                HttpResponse::Forbidden(),
                error_codes::HTTPS_REQUIRED,
                "HTTPS required",
            ));
        }

        if let Some(origin) = req.headers().get(header::ORIGIN) {
            if !is_web_origin(origin) {
                log::warn!("Malformed origin {:?} on {} {}", origin, req.method(), req.path());
                return Err(reject(
                    HttpResponse::BadRequest(),
                    error_codes::BAD_REQUEST,
                    "Invalid request origin",
                ));
            }
        }

        Ok(())
    }

    fn is_secure(&self, req: &ServiceRequest) -> bool {
        if req.app_config().secure() {
            return true;
        }

        let peer_ip = match req.peer_addr() {
            Some(addr) => addr.ip(),
            None => return false,
        };

        // Local clients talking to the process directly
        if peer_ip.is_loopback() {
            return true;
        }

        let peer = peer_ip.to_string();
        self.trusted_proxies.iter().any(|proxy| *proxy == peer)
            && req
                .headers()
                .get("x-forwarded-proto")
                .and_then(|value| value.to_str().ok())
                .map_or(false, |proto| proto.eq_ignore_ascii_case("https"))
    }
}

fn reject(
    mut builder: actix_web::HttpResponseBuilder,
    code: &str,
    message: &'static str,
) -> Error {
    let response = builder.json(ErrorResponse::new(code, message));
    InternalError::from_response(message, response).into()
}

/// Which origins may call us is the CORS layer's decision; this only rejects
/// values that are not web origins at all
fn is_web_origin(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|value| value.starts_with("https://") || value.starts_with("http://"))
        .unwrap_or(false)
}

/// Middleware factory enforcing transport security for one environment
#[derive(Debug, Clone, Default)]
pub struct SecurityMiddleware {
    policy: Rc<SecurityPolicy>,
}

impl SecurityMiddleware {
    /// Policy for a deployment environment
    ///
    /// Production requires HTTPS and adds headers, staging only adds headers
    /// and development does neither.
    pub fn for_environment(environment: Environment) -> Self {
        let (require_https, add_headers) = match environment {
            Environment::Production => (true, true),
            Environment::Staging => (false, true),
            Environment::Development => (false, false),
        };

        log::info!(
            "Security middleware for {:?}: require_https={}, add_headers={}",
            environment,
            require_https,
            add_headers
        );

        Self::from_policy(SecurityPolicy {
            require_https,
            add_headers,
            trusted_proxies: Vec::new(),
        })
    }

    /// Believe `X-Forwarded-Proto` when the connection comes from `ip`
    pub fn with_trusted_proxy(self, ip: impl Into<String>) -> Self {
        let mut policy = (*self.policy).clone();
        policy.trusted_proxies.push(ip.into());
        Self::from_policy(policy)
    }

    pub fn requires_https(&self) -> bool {
        self.policy.require_https
    }

    pub fn adds_headers(&self) -> bool {
        self.policy.add_headers
    }

    fn from_policy(policy: SecurityPolicy) -> Self {
        Self {
            policy: Rc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            policy: Rc::clone(&self.policy),
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    policy: Rc<SecurityPolicy>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let policy = Rc::clone(&self.policy);

        Box::pin(async move {
            policy.check(&req)?;

            let mut response = service.call(req).await?;
            if policy.add_headers {
                let headers = response.headers_mut();
                for &(name, value) in SECURITY_HEADERS {
                    headers.insert(
                        HeaderName::from_static(name),
                        HeaderValue::from_static(value),
                    );
                }
            }

            Ok(response)
        })
    }
}
