//! Data behind the public marketing pages.

use std::net::IpAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDateTime, Utc};

use crate::cache::{DEFAULT_CACHE_DURATION_MS, FetchDecision, ResourceCache};
use crate::domain::banner::Banner;
use crate::domain::contact::Contact;
use crate::domain::post::Post;
use crate::dto::public::SiteData;
use crate::forms::contact::ContactForm;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BlacklistReader, EntityWriter, PublicContentReader, SettingsRepository};
use crate::services::{ServiceError, ServiceResult};

/// Serves banners and posts, reusing each fetch for the cache window.
pub struct PublicContentService {
    banners: Mutex<ResourceCache<Vec<Banner>>>,
    posts: Mutex<ResourceCache<Vec<Post>>>,
}

impl Default for PublicContentService {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DURATION_MS)
    }
}

impl PublicContentService {
    pub fn new(cache_duration_ms: i64) -> Self {
        Self {
            banners: Mutex::new(ResourceCache::new(cache_duration_ms)),
            posts: Mutex::new(ResourceCache::new(cache_duration_ms)),
        }
    }

    pub fn banners<R>(&self, repo: &R) -> ServiceResult<Vec<Banner>>
    where
        R: PublicContentReader + ?Sized,
    {
        cached_fetch("banners", &self.banners, || {
            repo.list_active_banners(Utc::now().naive_utc())
        })
    }

    pub fn posts<R>(&self, repo: &R) -> ServiceResult<Vec<Post>>
    where
        R: PublicContentReader + ?Sized,
    {
        cached_fetch("posts", &self.posts, || repo.list_published_posts())
    }

    /// Drops both cached payloads' freshness after an admin edit.
    pub fn invalidate(&self) {
        lock(&self.banners).invalidate();
        lock(&self.posts).invalidate();
    }
}

fn lock<T>(cache: &Mutex<ResourceCache<T>>) -> MutexGuard<'_, ResourceCache<T>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `fetch` only when the cache is stale and no other fetch of the same
/// resource is pending. The lock is released while fetching.
fn cached_fetch<T, F>(resource: &str, cache: &Mutex<ResourceCache<T>>, fetch: F) -> ServiceResult<T>
where
    T: Clone + Default,
    F: FnOnce() -> RepositoryResult<T>,
{
    let decision = lock(cache).begin_fetch(Utc::now());
    match decision {
        FetchDecision::UseCached(payload) => {
            log::debug!("Serving cached {resource}");
            Ok(payload)
        }
        FetchDecision::InFlight(stale) => {
            log::debug!("Fetch of {resource} already pending, serving stale data");
            Ok(stale.unwrap_or_default())
        }
        FetchDecision::Fetch => match fetch() {
            Ok(payload) => {
                lock(cache).complete(payload.clone(), Utc::now());
                Ok(payload)
            }
            Err(err) => {
                lock(cache).fail();
                log::error!("Failed to fetch {resource}: {err}");
                Err(ServiceError::from(err))
            }
        },
    }
}

pub fn load_site<R>(repo: &R) -> ServiceResult<SiteData>
where
    R: SettingsRepository + ?Sized,
{
    let settings = repo.get_settings().map_err(|err| {
        log::error!("Failed to load settings: {err}");
        err
    })?;
    Ok(SiteData::from(settings))
}

/// Stores a contact form submission as pending. Submissions from a blocked
/// address are refused.
pub fn submit_contact<R>(
    repo: &R,
    form: ContactForm,
    client_ip: Option<IpAddr>,
    now: NaiveDateTime,
) -> ServiceResult<Contact>
where
    R: BlacklistReader + EntityWriter<Contact> + ?Sized,
{
    if let Some(ip) = client_ip {
        let blocked = repo.is_ip_blocked(ip, now).map_err(|err| {
            log::error!("Failed to check blacklist: {err}");
            err
        })?;
        if blocked {
            log::warn!("Rejected contact form from blocked ip {ip}");
            return Err(ServiceError::Forbidden);
        }
    }

    let contact = form.into_contact(client_ip.map(|ip| ip.to_string()), now)?;

    repo.insert_entity(contact).map_err(|err| {
        log::error!("Failed to store contact: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blacklist::BlockedIp;
    use crate::domain::contact::ContactStatus;
    use crate::repository::memory::SeedData;
    use crate::repository::{EntityReader, InMemoryRepository};

    fn form() -> ContactForm {
        ContactForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            subject: "Hello".to_string(),
            message: "Call me".to_string(),
        }
    }

    fn repo_blocking(ip: &str) -> InMemoryRepository {
        InMemoryRepository::from_seed(SeedData {
            blacklist: vec![BlockedIp {
                id: 1,
                ip_address: ip.to_string(),
                reason: "spam".to_string(),
                blocked_by: "admin".to_string(),
                created_at: Utc::now().naive_utc(),
                expires_at: None,
            }],
            ..SeedData::default()
        })
    }

    #[test]
    fn blocked_ip_is_forbidden() {
        let repo = repo_blocking("203.0.113.7");
        let now = Utc::now().naive_utc();

        let result = submit_contact(&repo, form(), "203.0.113.7".parse().ok(), now);

        assert!(matches!(result, Err(ServiceError::Forbidden)));
        let stored: Vec<Contact> = repo.list_entities().unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn submission_is_stored_as_pending() {
        let repo = repo_blocking("203.0.113.7");
        let now = Utc::now().naive_utc();

        let contact = submit_contact(&repo, form(), "198.51.100.1".parse().ok(), now).unwrap();

        assert_eq!(contact.id, 1);
        assert_eq!(contact.status, ContactStatus::Pending);
        assert_eq!(contact.ip_address.as_deref(), Some("198.51.100.1"));
    }
}
