//! HTTP handlers. Every endpoint speaks JSON except the public contact form,
//! which accepts a URL-encoded body.

use std::net::{IpAddr, SocketAddr};

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod admin;
pub mod public;
pub mod toasts;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps a failed service call to its HTTP response.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorBody {
        error: err.to_string(),
    };
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Forbidden => HttpResponse::Forbidden().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Repository(_) => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Client address, honouring `Forwarded`/`X-Forwarded-For` when present.
pub fn client_ip(req: &HttpRequest) -> Option<IpAddr> {
    let info = req.connection_info();
    let raw = info.realip_remote_addr()?;
    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}

/// Registers every scope of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(admin::show_settings)
            .service(admin::save_settings)
            .service(admin::create_post)
            .service(admin::update_contact_status)
            .service(admin::block_ip)
            .service(admin::list_entities)
            .service(admin::delete_entity),
    )
    .service(
        web::scope("/public")
            .service(public::site)
            .service(public::banners)
            .service(public::posts)
            .service(public::submit_contact),
    )
    .service(
        web::scope("/toasts")
            .service(toasts::list_toasts)
            .service(toasts::pause_toast)
            .service(toasts::resume_toast)
            .service(toasts::dismiss_toast),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Forbidden, StatusCode::FORBIDDEN),
            (ServiceError::Form("bad".to_string()), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::Conflict("dup".to_string()), StatusCode::CONFLICT),
            (
                ServiceError::Repository("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(service_error_response(&err).status(), status);
        }
    }

    #[test]
    fn client_ip_prefers_forwarded_header() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.9"))
            .peer_addr("10.0.0.1:4000".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req), "203.0.113.9".parse().ok());

        let req = TestRequest::default()
            .peer_addr("10.0.0.1:4000".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req), "10.0.0.1".parse().ok());
    }
}
