use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, delete, get, post, web};
use chrono::Utc;
use serde::Serialize;

use crate::domain::banner::Banner;
use crate::domain::contact::Contact;
use crate::domain::post::Post;
use crate::domain::role::Role;
use crate::domain::user::User;
use crate::dto::admin::{ListPageData, ListQuery};
use crate::forms::blacklist::BlockIpForm;
use crate::forms::contact::ContactStatusForm;
use crate::forms::post::PostForm;
use crate::forms::settings::SettingsForm;
use crate::listing::screens::{
    banners_view, blacklist_view, contacts_view, posts_view, roles_view, users_view,
};
use crate::models::config::ServerConfig;
use crate::repository::InMemoryRepository;
use crate::routes::service_error_response;
use crate::services::ServiceResult;
use crate::services::admin as admin_service;
use crate::services::public::PublicContentService;
use crate::toast::ToastCenter;

fn list_response<T: Serialize>(result: ServiceResult<ListPageData<T>>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => service_error_response(&err),
    }
}

#[get("/{kind}")]
pub async fn list_entities(
    kind: web::Path<String>,
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let query = ListQuery::from_params(params.into_inner());
    let per_page = server_config.items_per_page;
    let now = Utc::now().naive_utc();
    let repo = repo.get_ref();

    match kind.as_str() {
        "posts" => list_response(admin_service::load_list_page(
            repo,
            &posts_view(per_page),
            query,
            now,
        )),
        "banners" => list_response(admin_service::load_list_page(
            repo,
            &banners_view(per_page),
            query,
            now,
        )),
        "contacts" => list_response(admin_service::load_list_page(
            repo,
            &contacts_view(per_page),
            query,
            now,
        )),
        "users" => list_response(admin_service::load_list_page(
            repo,
            &users_view(per_page),
            query,
            now,
        )),
        "roles" => list_response(admin_service::load_list_page(
            repo,
            &roles_view(per_page),
            query,
            now,
        )),
        "blacklist" => list_response(admin_service::load_list_page(
            repo,
            &blacklist_view(per_page),
            query,
            now,
        )),
        _ => HttpResponse::NotFound().finish(),
    }
}

#[delete("/{kind}/{id}")]
pub async fn delete_entity(
    path: web::Path<(String, i32)>,
    repo: web::Data<InMemoryRepository>,
    public: web::Data<PublicContentService>,
    toasts: web::Data<ToastCenter>,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    let repo = repo.get_ref();

    let result = match kind.as_str() {
        "posts" => admin_service::delete_entity::<Post, _>(repo, id),
        "banners" => admin_service::delete_entity::<Banner, _>(repo, id),
        "contacts" => admin_service::delete_entity::<Contact, _>(repo, id),
        "users" => admin_service::delete_entity::<User, _>(repo, id),
        "roles" => admin_service::delete_entity::<Role, _>(repo, id),
        "blacklist" => admin_service::unblock_ip(repo, id),
        _ => return HttpResponse::NotFound().finish(),
    };

    match result {
        Ok(()) => {
            if matches!(kind.as_str(), "posts" | "banners") {
                public.invalidate();
            }
            toasts.success(format!("Deleted {kind} #{id}"));
            HttpResponse::NoContent().finish()
        }
        Err(err) => {
            toasts.error(format!("Could not delete {kind} #{id}: {err}"));
            service_error_response(&err)
        }
    }
}

#[post("/posts")]
pub async fn create_post(
    form: web::Json<PostForm>,
    repo: web::Data<InMemoryRepository>,
    public: web::Data<PublicContentService>,
    toasts: web::Data<ToastCenter>,
) -> impl Responder {
    match admin_service::create_post(repo.get_ref(), form.into_inner(), Utc::now().naive_utc()) {
        Ok(post) => {
            public.invalidate();
            toasts.success(format!("Post \"{}\" created", post.title));
            HttpResponse::Created().json(post)
        }
        Err(err) => {
            toasts.error(format!("Could not create post: {err}"));
            service_error_response(&err)
        }
    }
}

#[post("/contacts/{id}/status")]
pub async fn update_contact_status(
    id: web::Path<i32>,
    form: web::Json<ContactStatusForm>,
    repo: web::Data<InMemoryRepository>,
    toasts: web::Data<ToastCenter>,
) -> impl Responder {
    let id = id.into_inner();
    match admin_service::update_contact_status(repo.get_ref(), id, form.into_inner()) {
        Ok(contact) => {
            toasts.success(format!("Contact #{id} marked {}", contact.status));
            HttpResponse::Ok().json(contact)
        }
        Err(err) => {
            toasts.error(format!("Could not update contact #{id}: {err}"));
            service_error_response(&err)
        }
    }
}

#[post("/blacklist")]
pub async fn block_ip(
    form: web::Json<BlockIpForm>,
    repo: web::Data<InMemoryRepository>,
    toasts: web::Data<ToastCenter>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match admin_service::block_ip(
        repo.get_ref(),
        form.into_inner(),
        &server_config.admin_username,
        Utc::now().naive_utc(),
    ) {
        Ok(entry) => {
            toasts.success(format!("Blocked {}", entry.ip_address));
            HttpResponse::Created().json(entry)
        }
        Err(err) => {
            toasts.error(format!("Could not block ip: {err}"));
            service_error_response(&err)
        }
    }
}

#[get("/settings")]
pub async fn show_settings(repo: web::Data<InMemoryRepository>) -> impl Responder {
    match admin_service::load_settings(repo.get_ref()) {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(err) => service_error_response(&err),
    }
}

#[post("/settings")]
pub async fn save_settings(
    form: web::Json<SettingsForm>,
    repo: web::Data<InMemoryRepository>,
    toasts: web::Data<ToastCenter>,
) -> impl Responder {
    match admin_service::save_settings(repo.get_ref(), form.into_inner()) {
        Ok(settings) => {
            toasts.success("Settings saved");
            HttpResponse::Ok().json(settings)
        }
        Err(err) => {
            toasts.error(format!("Could not save settings: {err}"));
            service_error_response(&err)
        }
    }
}
