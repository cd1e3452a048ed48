use crate::model::role::Role;
use crate::models::Claims;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,

    /// Present only if this user is linked to a terminal employee id
    pub employee_id: Option<u32>,
}

/// Reads the identity the auth middleware attached to the request.
impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(ErrorUnauthorized("Missing token"))),
        }
    }
}

impl AuthUser {
    /// `None` when the token carries a role this service does not know.
    pub fn from_claims(claims: Claims) -> Option<Self> {
        Some(Self {
            role: Role::from_id(claims.role)?,
            username: claims.sub,
            employee_id: claims.employee_id,
        })
    }

    pub fn require_hr_or_admin(&self) -> actix_web::Result<()> {
        if self.role.sees_all_attendance() {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("HR/Admin only"))
        }
    }

    /// HR and admins see everyone; employees only themselves.
    pub fn require_access_to(&self, employee_id: u32) -> actix_web::Result<()> {
        if self.role.sees_all_attendance() || self.employee_id == Some(employee_id) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Not your attendance record"))
        }
    }
}
