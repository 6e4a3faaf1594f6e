use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use chrono::Utc;

use crate::dto::public::ContactReceipt;
use crate::forms::contact::ContactForm;
use crate::repository::InMemoryRepository;
use crate::routes::{client_ip, service_error_response};
use crate::services::public::{self as public_service, PublicContentService};

#[get("/site")]
pub async fn site(repo: web::Data<InMemoryRepository>) -> impl Responder {
    match public_service::load_site(repo.get_ref()) {
        Ok(site) => HttpResponse::Ok().json(site),
        Err(err) => service_error_response(&err),
    }
}

#[get("/banners")]
pub async fn banners(
    repo: web::Data<InMemoryRepository>,
    public: web::Data<PublicContentService>,
) -> impl Responder {
    match public.banners(repo.get_ref()) {
        Ok(banners) => HttpResponse::Ok().json(banners),
        Err(err) => service_error_response(&err),
    }
}

#[get("/posts")]
pub async fn posts(
    repo: web::Data<InMemoryRepository>,
    public: web::Data<PublicContentService>,
) -> impl Responder {
    match public.posts(repo.get_ref()) {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(err) => service_error_response(&err),
    }
}

#[post("/contact")]
pub async fn submit_contact(
    req: HttpRequest,
    form: web::Form<ContactForm>,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    let ip = client_ip(&req);
    match public_service::submit_contact(
        repo.get_ref(),
        form.into_inner(),
        ip,
        Utc::now().naive_utc(),
    ) {
        Ok(contact) => HttpResponse::Created().json(ContactReceipt::from(&contact)),
        Err(err) => service_error_response(&err),
    }
}
