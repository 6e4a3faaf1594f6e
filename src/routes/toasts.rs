use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::domain::toast::ToastId;
use crate::toast::ToastCenter;

fn outcome(found: bool) -> HttpResponse {
    if found {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().finish()
    }
}

#[get("")]
pub async fn list_toasts(toasts: web::Data<ToastCenter>) -> impl Responder {
    HttpResponse::Ok().json(toasts.snapshot())
}

/// Hover: freezes the countdown.
#[post("/{id}/pause")]
pub async fn pause_toast(id: web::Path<i64>, toasts: web::Data<ToastCenter>) -> impl Responder {
    outcome(toasts.pause(ToastId::new(id.into_inner())))
}

#[post("/{id}/resume")]
pub async fn resume_toast(id: web::Path<i64>, toasts: web::Data<ToastCenter>) -> impl Responder {
    outcome(toasts.resume(ToastId::new(id.into_inner())))
}

#[delete("/{id}")]
pub async fn dismiss_toast(id: web::Path<i64>, toasts: web::Data<ToastCenter>) -> impl Responder {
    outcome(toasts.remove_toast(ToastId::new(id.into_inner())))
}
