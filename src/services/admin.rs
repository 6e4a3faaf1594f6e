use chrono::NaiveDateTime;

use crate::domain::blacklist::BlockedIp;
use crate::domain::contact::{Contact, ContactStatus};
use crate::domain::post::Post;
use crate::domain::settings::AppSettings;
use crate::dto::admin::{ListPageData, ListQuery};
use crate::forms::blacklist::BlockIpForm;
use crate::forms::contact::ContactStatusForm;
use crate::forms::post::PostForm;
use crate::forms::settings::SettingsForm;
use crate::listing::{Entity, ListView};
use crate::pagination::Paginated;
use crate::repository::{EntityReader, EntityWriter, SettingsRepository};
use crate::services::{ServiceError, ServiceResult};

/// Loads one page of an admin list, running the filter, sort and paginate
/// pipeline over the whole collection. Time-dependent filters are judged as
/// of `now`.
pub fn load_list_page<T, R>(
    repo: &R,
    view: &ListView<T>,
    query: ListQuery,
    now: NaiveDateTime,
) -> ServiceResult<ListPageData<T>>
where
    T: Entity,
    R: EntityReader<T> + ?Sized,
{
    let entities = repo.list_entities().map_err(|err| {
        log::error!("Failed to list {}: {err}", T::KIND);
        err
    })?;

    let state = query.to_state(view, now);
    let visible = state.derive(&entities, view);
    let list = Paginated::new(
        visible.to_owned_items(),
        state.page(),
        visible.total,
        view.items_per_page(),
    );

    Ok(ListPageData {
        kind: T::KIND,
        list,
        sort: state.sort().to_query(),
        filters: query.params,
    })
}

pub fn delete_entity<T, R>(repo: &R, id: i32) -> ServiceResult<()>
where
    T: Entity,
    R: EntityWriter<T> + ?Sized,
{
    repo.delete_entity(id).map_err(|err| {
        log::error!("Failed to delete {} #{id}: {err}", T::KIND);
        ServiceError::from(err)
    })
}

/// Validates the form and stores a new post. Slugs must be unique.
pub fn create_post<R>(repo: &R, form: PostForm, now: NaiveDateTime) -> ServiceResult<Post>
where
    R: EntityWriter<Post> + ?Sized,
{
    let post = form.into_post(now).map_err(|err| {
        log::error!("Failed to validate post form: {err}");
        err
    })?;

    repo.insert_entity(post).map_err(|err| {
        log::error!("Failed to create post: {err}");
        ServiceError::from(err)
    })
}

pub fn update_contact_status<R>(repo: &R, id: i32, form: ContactStatusForm) -> ServiceResult<Contact>
where
    R: EntityReader<Contact> + EntityWriter<Contact> + ?Sized,
{
    let status = ContactStatus::try_from(form)?;
    let mut contact: Contact = repo.get_entity(id)?.ok_or(ServiceError::NotFound)?;

    contact.status = status;
    repo.update_entity(contact).map_err(|err| {
        log::error!("Failed to update contact #{id}: {err}");
        ServiceError::from(err)
    })
}

/// Adds an IP to the blacklist. An address that is already actively
/// blocked is a conflict.
pub fn block_ip<R>(
    repo: &R,
    form: BlockIpForm,
    blocked_by: &str,
    now: NaiveDateTime,
) -> ServiceResult<BlockedIp>
where
    R: EntityWriter<BlockedIp> + ?Sized,
{
    let entry = form.into_blocked_ip(blocked_by, now)?;

    repo.insert_entity(entry).map_err(|err| {
        log::error!("Failed to block ip: {err}");
        ServiceError::from(err)
    })
}

pub fn unblock_ip<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: EntityWriter<BlockedIp> + ?Sized,
{
    delete_entity::<BlockedIp, R>(repo, id)
}

pub fn load_settings<R>(repo: &R) -> ServiceResult<AppSettings>
where
    R: SettingsRepository + ?Sized,
{
    repo.get_settings().map_err(|err| {
        log::error!("Failed to load settings: {err}");
        ServiceError::from(err)
    })
}

pub fn save_settings<R>(repo: &R, form: SettingsForm) -> ServiceResult<AppSettings>
where
    R: SettingsRepository + ?Sized,
{
    let settings = AppSettings::try_from(form)?;

    repo.save_settings(&settings).map_err(|err| {
        log::error!("Failed to save settings: {err}");
        ServiceError::from(err)
    })
}
