use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    web::Data,
};
use serde_json::json;
use tracing::debug;

use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_access_token;
use crate::config::Config;

fn unauthorized(req: ServiceRequest, message: &str) -> ServiceResponse<BoxBody> {
    let resp = HttpResponse::Unauthorized().json(json!({ "message": message }));
    req.into_response(resp.map_into_boxed_body())
}

fn bearer_token(req: &ServiceRequest) -> Result<&str, &'static str> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header encoding")?;
    value
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must start with Bearer")
}

/// Resolves the portal access token into an [`AuthUser`] for the handlers.
/// Every failure is a 401 with a `message` body.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let identity = bearer_token(&req).and_then(|token| {
        let claims = verify_access_token(token, &config.jwt_secret).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            "Invalid or expired token"
        })?;
        AuthUser::from_claims(claims).ok_or("Unknown role")
    });

    match identity {
        Ok(user) => {
            debug!(user = %user.username, role = ?user.role, "Authenticated request");
            req.extensions_mut().insert(user);
            next.call(req).await
        }
        Err(message) => Ok(unauthorized(req, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::sign_for_tests;
    use crate::models::TokenType;
    use actix_web::middleware::from_fn;
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::Value;

    const SECRET: &str = "middleware-secret";

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "SERVER_ADDR" => Some("127.0.0.1:0".into()),
            "JWT_SECRET" => Some(SECRET.into()),
            "PUNCH_LOG_PATH" => Some("unused.json".into()),
            _ => None,
        })
        .unwrap()
    }

    async fn whoami(user: AuthUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(Data::new(config()))
                    .wrap(from_fn(auth_middleware))
                    .route("/", web::get().to(whoami)),
            )
            .await
        };
    }

    async fn rejection(req: test::TestRequest) -> String {
        let app = app!();
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        body["message"].as_str().unwrap().to_string()
    }

    #[actix_web::test]
    async fn attaches_the_portal_user() {
        let app = app!();
        let token = sign_for_tests(1, None, TokenType::Access, SECRET);
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "tester");
    }

    #[actix_web::test]
    async fn missing_or_malformed_header_is_unauthorized() {
        let message = rejection(test::TestRequest::get().uri("/")).await;
        assert_eq!(message, "Missing Authorization header");

        let token = sign_for_tests(1, None, TokenType::Access, SECRET);
        let message = rejection(
            test::TestRequest::get()
                .uri("/")
                .insert_header(("Authorization", format!("Token {token}"))),
        )
        .await;
        assert_eq!(message, "Authorization header must start with Bearer");
    }

    #[actix_web::test]
    async fn bad_tokens_are_unauthorized() {
        let foreign = sign_for_tests(1, None, TokenType::Access, "someone-else");
        let message = rejection(
            test::TestRequest::get()
                .uri("/")
                .insert_header(("Authorization", format!("Bearer {foreign}"))),
        )
        .await;
        assert_eq!(message, "Invalid or expired token");

        // role 5 was never granted by this service
        let unknown_role = sign_for_tests(5, None, TokenType::Access, SECRET);
        let message = rejection(
            test::TestRequest::get()
                .uri("/")
                .insert_header(("Authorization", format!("Bearer {unknown_role}"))),
        )
        .await;
        assert_eq!(message, "Unknown role");
    }
}
