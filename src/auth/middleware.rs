use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

fn login_redirect(req: ServiceRequest) -> ServiceResponse {
    let response = HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish();
    req.into_response(response)
}

/// Middleware function that checks for an authenticated session.
/// Redirects to /login if no session found.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let has_account = session.get::<i64>("account_id").unwrap_or(None).is_some();

    if !has_account {
        return Ok(login_redirect(req).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Middleware for the /admin scope: a valid session is not enough, the
/// account must also carry the admin claim.
pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let has_account = session.get::<i64>("account_id").unwrap_or(None).is_some();
    let is_admin = session.get::<bool>("is_admin").unwrap_or(None).unwrap_or(false);

    if !has_account || !is_admin {
        return Ok(login_redirect(req).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
