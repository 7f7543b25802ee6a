use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, AppState};

/// Rejects requests to non-public routes that lack a valid admin token and
/// stores the decoded [`Claims`] in the request extensions otherwise.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            // Unrouted requests fall through to the router's 404/405
            let routed = req.match_pattern().is_some() && is_routed_method(req.method().as_str());
            if !routed || is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::warn!(path = %req.path(), error = %e, "Rejected unauthenticated request");
                    return Ok(error_response(req, e));
                }
            };

            if !claims.is_admin() {
                return Ok(error_response(req, AuthError::Forbidden("Admin access required".into())));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Routes reachable without a token. Trailing slashes are ignored.
pub fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("GET", [""]) => true,
        ("GET", ["api", "health"]) => true,
        ("POST", ["api", "admin", "login"]) => true,
        ("GET", ["api", "projects"]) | ("GET", ["api", "projects", _]) => true,
        ("POST", ["api", "projects", _, "views"]) => true,
        ("GET", ["api", "blog"]) | ("GET", ["api", "blog", _]) => true,
        ("POST", ["api", "inquiries"]) => true,
        _ => false,
    }
}

/// Methods some route is registered for.
fn is_routed_method(method: &str) -> bool {
    matches!(method, "GET" | "POST" | "PUT" | "DELETE")
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or_else(|| {
            tracing::error!("AppState missing in middleware");
            AuthError::MissingAppState
        })?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_token(&token)?;
    Ok(decoded.claims)
}

fn error_response<B>(req: ServiceRequest, err: AuthError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(err.error_response()).map_into_right_body()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_reads_are_public() {
        assert!(is_public_route("/", "GET"));
        assert!(is_public_route("/api/projects", "GET"));
        assert!(is_public_route("/api/projects/12", "GET"));
        assert!(is_public_route("/api/blog/", "GET"));
        assert!(is_public_route("/api/blog/3", "GET"));
        assert!(is_public_route("/api/health", "GET"));
    }

    #[test]
    fn visitor_writes_are_public() {
        assert!(is_public_route("/api/admin/login", "POST"));
        assert!(is_public_route("/api/inquiries", "POST"));
        assert!(is_public_route("/api/projects/4/views", "POST"));
    }

    #[test]
    fn admin_operations_are_protected() {
        assert!(!is_public_route("/api/projects", "POST"));
        assert!(!is_public_route("/api/projects/1", "PUT"));
        assert!(!is_public_route("/api/projects/1", "DELETE"));
        assert!(!is_public_route("/api/blog", "POST"));
        assert!(!is_public_route("/api/inquiries", "GET"));
        assert!(!is_public_route("/api/inquiries/1", "DELETE"));
        assert!(!is_public_route("/api/stats", "GET"));
        assert!(!is_public_route("/api/upload", "POST"));
    }

    #[test]
    fn only_registered_methods_are_gated() {
        assert!(is_routed_method("DELETE"));
        assert!(!is_routed_method("PATCH"));
        assert!(!is_routed_method("HEAD"));
    }

    #[test]
    fn preflight_requests_pass() {
        assert!(is_public_route("/api/projects", "OPTIONS"));
    }
}
