/// Route Gate Middleware
///
/// Lets public paths through untouched. Protected paths need the session
/// cookie to be present and non-empty; without it the client is redirected
/// to the login page with the requested path as a callback.
///
/// Paths are classified and echoed back in their percent-decoded form, so
/// `/boards/a%20b` yields the callback `/boards/a b` rather than an encoded
/// copy of the encoding.
///
/// Only presence is checked here. Handlers behind the gate must still look
/// the session up before trusting it.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::routing::{RouteClass, RoutePolicy};

pub struct RouteGate {
    policy: Rc<RoutePolicy>,
}

impl RouteGate {
    pub fn new(policy: RoutePolicy) -> Self {
        Self {
            policy: Rc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGateService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(RouteGateService {
            service: Rc::new(service),
            policy: self.policy.clone(),
        }))
    }
}

pub struct RouteGateService<S> {
    service: Rc<S>,
    policy: Rc<RoutePolicy>,
}

impl<S> RouteGateService<S> {
    fn has_session_cookie(&self, req: &ServiceRequest) -> bool {
        req.cookie(self.policy.session_cookie_name())
            .map(|cookie| !cookie.value().is_empty())
            .unwrap_or(false)
    }
}

impl<S, B> Service<ServiceRequest> for RouteGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.match_info().as_str().to_string();

        let allowed = match self.policy.classify(&path) {
            RouteClass::Public => true,
            RouteClass::Protected => self.has_session_cookie(&req),
        };

        if allowed {
            let service = self.service.clone();
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        }

        let location = self.policy.login_redirect(&path);
        tracing::debug!(path = %path, location = %location, "No session cookie, redirecting to login");

        let response = HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, location))
            .finish();
        let res = req.into_response(response).map_into_right_body();

        Box::pin(async move { Ok(res) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::AuthSettings;
    use actix_web::{cookie::Cookie, http::StatusCode, test, web, App};

    fn gate() -> RouteGate {
        RouteGate::new(
            RoutePolicy::from_settings(&AuthSettings::default()).expect("Failed to build policy"),
        )
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().body("ok")
    }

    #[actix_web::test]
    async fn test_public_path_passes_without_cookie() {
        let app = test::init_service(
            App::new().wrap(gate()).route("/login", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get().uri("/login").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_protected_path_without_cookie_redirects() {
        let app = test::init_service(
            App::new().wrap(gate()).route("/dashboard", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get().uri("/dashboard").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "/login?callbackUrl=%2Fdashboard"
        );
    }

    #[actix_web::test]
    async fn test_protected_path_with_cookie_passes() {
        let app = test::init_service(
            App::new().wrap(gate()).route("/dashboard", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(Cookie::new("session_token", "anything"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_empty_cookie_counts_as_missing() {
        let app = test::init_service(
            App::new().wrap(gate()).route("/dashboard", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(Cookie::new("session_token", ""))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[actix_web::test]
    async fn test_other_cookie_names_do_not_count() {
        let app = test::init_service(
            App::new().wrap(gate()).route("/dashboard", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(Cookie::new("csrf_token", "abc"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[actix_web::test]
    async fn test_reset_password_subtree_is_public() {
        let app = test::init_service(
            App::new()
                .wrap(gate())
                .route("/api/auth/reset-password/{token}", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/reset-password/anything")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_callback_is_built_from_decoded_path() {
        let app = test::init_service(
            App::new()
                .wrap(gate())
                .route("/boards/{name}", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get().uri("/boards/a%20b").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "/login?callbackUrl=%2Fboards%2Fa%20b"
        );
    }
}
