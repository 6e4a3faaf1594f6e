//! List screens of the admin panel.

use crate::domain::banner::Banner;
use crate::domain::blacklist::BlockedIp;
use crate::domain::contact::{Contact, ContactStatus};
use crate::domain::post::Post;
use crate::domain::role::Role;
use crate::domain::user::User;
use crate::listing::{FilterRule, FilterValue, ListView, SortRule, SortSpec};

pub fn posts_view(items_per_page: usize) -> ListView<Post> {
    ListView::new("posts", items_per_page)
        .filter("search", FilterRule::substring(&["title", "excerpt", "author"]))
        .filter("status", FilterRule::Equals("status".to_string()))
        .filter("category", FilterRule::Equals("category".to_string()))
        .filter("created", FilterRule::DateRange("created_at".to_string()))
        .filter("published", FilterRule::DateRange("published_at".to_string()))
        .sort("created_at", SortRule::Timestamp)
        .sort("published_at", SortRule::Timestamp)
        .default_sort(SortSpec::descending("created_at"))
}

pub fn banners_view(items_per_page: usize) -> ListView<Banner> {
    ListView::new("banners", items_per_page)
        .filter("search", FilterRule::substring(&["title", "subtitle"]))
        .filter("active", FilterRule::Equals("is_active".to_string()))
        .filter(
            "schedule",
            FilterRule::DateOverlap {
                start: "starts_at".to_string(),
                end: "ends_at".to_string(),
            },
        )
        .sort("starts_at", SortRule::Timestamp)
        .sort("ends_at", SortRule::Timestamp)
        .default_sort(SortSpec::ascending("position"))
}

pub fn contacts_view(items_per_page: usize) -> ListView<Contact> {
    ListView::new("contacts", items_per_page)
        .filter("search", FilterRule::substring(&["name", "email", "subject"]))
        .filter("status", FilterRule::Equals("status".to_string()))
        .filter("created", FilterRule::DateRange("created_at".to_string()))
        .sort("status", SortRule::Priority(ContactStatus::PRIORITY))
        .sort("created_at", SortRule::Timestamp)
}

pub fn users_view(items_per_page: usize) -> ListView<User> {
    ListView::new("users", items_per_page)
        .filter("search", FilterRule::substring(&["username", "email", "full_name"]))
        .filter("role", FilterRule::Equals("role".to_string()))
        .filter("active", FilterRule::Equals("is_active".to_string()))
        .filter("last_login", FilterRule::DateRange("last_login".to_string()))
        .sort("created_at", SortRule::Timestamp)
        .sort("last_login", SortRule::Timestamp)
}

pub fn roles_view(items_per_page: usize) -> ListView<Role> {
    ListView::new("roles", items_per_page)
        .filter("search", FilterRule::substring(&["name", "description"]))
        .filter("permission", FilterRule::Custom("has_permission".to_string()))
        .predicate("has_permission", role_has_permission)
        .sort("created_at", SortRule::Timestamp)
}

pub fn blacklist_view(items_per_page: usize) -> ListView<BlockedIp> {
    ListView::new("blacklist", items_per_page)
        .filter("search", FilterRule::substring(&["ip_address", "reason", "blocked_by"]))
        .filter("duration", FilterRule::Custom("block_duration".to_string()))
        .filter("state", FilterRule::Custom("block_state".to_string()))
        .predicate("block_duration", block_duration)
        .predicate("block_state", block_state)
        .sort("created_at", SortRule::Timestamp)
        .sort("expires_at", SortRule::Timestamp)
        .default_sort(SortSpec::descending("created_at"))
}

fn tag(value: &FilterValue) -> Option<&str> {
    match value {
        FilterValue::Text(value) | FilterValue::Tag(value) => Some(value.trim()),
        FilterValue::TagAt { tag, .. } => Some(tag.trim()),
        FilterValue::DateRange { .. } => None,
    }
}

fn role_has_permission(role: &Role, value: &FilterValue) -> bool {
    tag(value).is_none_or(|permission| role.has_permission(permission))
}

/// `permanent` or `temporary`; anything else matches every entry.
fn block_duration(entry: &BlockedIp, value: &FilterValue) -> bool {
    match tag(value) {
        Some("permanent") => entry.is_permanent(),
        Some("temporary") => !entry.is_permanent(),
        _ => true,
    }
}

/// `active` or `expired` as of the instant carried by the value. A value
/// without an instant matches every entry.
fn block_state(entry: &BlockedIp, value: &FilterValue) -> bool {
    let FilterValue::TagAt { tag, at } = value else {
        return true;
    };
    match tag.trim() {
        "active" => entry.is_active_at(*at),
        "expired" => !entry.is_active_at(*at),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    use super::*;
    use crate::listing::{FilterSpec, ListState, derive_visible_page, parse_timestamp};
    use crate::pagination::PageRequest;

    fn ts(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn contact(id: i32, name: &str, status: ContactStatus) -> Contact {
        Contact {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            subject: "Quote request".to_string(),
            message: "Hello".to_string(),
            status,
            ip_address: None,
            created_at: ts(1, id as u32),
        }
    }

    fn ids<T: Clone>(items: &[&T], id: fn(&T) -> i32) -> Vec<i32> {
        items.iter().map(|item| id(item)).collect()
    }

    #[test]
    fn contacts_sort_by_status_priority() {
        let contacts = vec![
            contact(1, "Spammer", ContactStatus::Spam),
            contact(2, "Done", ContactStatus::Completed),
            contact(3, "Waiting", ContactStatus::Pending),
        ];
        let view = contacts_view(10);
        let mut state = view.initial_state();

        state.set_sort(SortSpec::ascending("status"));
        let page = state.derive(&contacts, &view);
        assert_eq!(ids(&page.items, |c: &Contact| c.id), vec![3, 2, 1]);

        state.toggle_sort("status");
        let page = state.derive(&contacts, &view);
        assert_eq!(ids(&page.items, |c: &Contact| c.id), vec![1, 2, 3]);
    }

    #[test]
    fn contacts_status_filter_keeps_only_pending() {
        let contacts = vec![
            contact(1, "Alice", ContactStatus::Pending),
            contact(2, "Bob", ContactStatus::Completed),
            contact(3, "Carol", ContactStatus::Spam),
        ];
        let view = contacts_view(10);
        let mut state = view.initial_state();
        state.set_page(3);

        state.set_filter("status", FilterValue::Tag("pending".to_string()));
        let page = state.derive(&contacts, &view);

        assert_eq!(state.page(), 1);
        assert_eq!(ids(&page.items, |c: &Contact| c.id), vec![1]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn posts_default_to_newest_first() {
        let post = |id: i32, day: u32| Post {
            id,
            title: format!("Post {id}"),
            slug: format!("post-{id}"),
            excerpt: String::new(),
            content: String::new(),
            author: "editor".to_string(),
            category: "news".to_string(),
            status: crate::domain::post::PostStatus::Draft,
            image_url: None,
            created_at: ts(2, day),
            published_at: None,
        };
        let posts = vec![post(1, 3), post(2, 9), post(3, 1)];
        let view = posts_view(2);

        let page = view.initial_state().derive(&posts, &view);

        assert_eq!(ids(&page.items, |p: &Post| p.id), vec![2, 1]);
        assert_eq!(page.total_pages(view.items_per_page()), 2);
    }

    #[test]
    fn banners_schedule_overlaps_open_windows() {
        let banner = |id: i32, starts_at: Option<NaiveDateTime>, ends_at: Option<NaiveDateTime>| {
            Banner {
                id,
                title: format!("Banner {id}"),
                subtitle: None,
                image_url: "/img.png".to_string(),
                link_url: None,
                position: id,
                is_active: id != 3,
                starts_at,
                ends_at,
                created_at: ts(1, 1),
            }
        };
        let banners = vec![
            banner(1, Some(ts(1, 1)), Some(ts(1, 31))),
            banner(2, Some(ts(3, 1)), None),
            banner(3, None, None),
        ];
        let view = banners_view(10);
        let filters = FilterSpec::new().with(
            "schedule",
            FilterValue::DateRange {
                start: parse_timestamp("2024-02-01"),
                end: parse_timestamp("2024-02-28"),
            },
        );

        let page = derive_visible_page(
            &banners,
            &view,
            &filters,
            view.initial_state().sort(),
            PageRequest::new(1, 10),
        );
        assert_eq!(ids(&page.items, |b: &Banner| b.id), vec![3]);

        let active = FilterSpec::new().with("active", FilterValue::Tag("true".to_string()));
        let page = derive_visible_page(
            &banners,
            &view,
            &active,
            &SortSpec::none(),
            PageRequest::new(1, 10),
        );
        assert_eq!(ids(&page.items, |b: &Banner| b.id), vec![1, 2]);
    }

    #[test]
    fn roles_filter_by_permission() {
        let role = |id: i32, permissions: &[&str]| Role {
            id,
            name: format!("Role {id}"),
            description: String::new(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            created_at: ts(1, 1),
        };
        let roles = vec![role(1, &["posts.edit"]), role(2, &["users.manage", "POSTS.EDIT"])];
        let view = roles_view(10);
        let mut state = view.initial_state();

        state.set_filter("permission", FilterValue::Tag("users.manage".to_string()));

        assert_eq!(ids(&state.derive(&roles, &view).items, |r: &Role| r.id), vec![2]);
    }

    #[test]
    fn blacklist_filters_by_duration_and_state() {
        let now = ts(6, 15);
        let entry = |id: i32, expires_at: Option<NaiveDateTime>| BlockedIp {
            id,
            ip_address: format!("10.0.0.{id}"),
            reason: "spam".to_string(),
            blocked_by: "admin".to_string(),
            created_at: now - TimeDelta::days(10),
            expires_at,
        };
        let entries = vec![
            entry(1, None),
            entry(2, Some(now - TimeDelta::days(1))),
            entry(3, Some(now + TimeDelta::days(1))),
        ];
        let view = blacklist_view(10);
        let at = |tag: &str, at: NaiveDateTime| FilterValue::TagAt {
            tag: tag.to_string(),
            at,
        };
        let mut state = ListState::default();

        state.set_filter("duration", FilterValue::Tag("temporary".to_string()));
        assert_eq!(ids(&state.derive(&entries, &view).items, |b: &BlockedIp| b.id), vec![2, 3]);

        state.set_filter("state", at("active", now));
        assert_eq!(ids(&state.derive(&entries, &view).items, |b: &BlockedIp| b.id), vec![3]);

        // The same filter judged two days later sees both temporary blocks expired.
        state.set_filter("state", at("expired", now + TimeDelta::days(2)));
        assert_eq!(ids(&state.derive(&entries, &view).items, |b: &BlockedIp| b.id), vec![2, 3]);

        state.clear_filter("duration");
        state.set_filter("state", at("whatever", now));
        assert_eq!(state.derive(&entries, &view).total, 3);

        state.set_filter("state", FilterValue::Tag("active".to_string()));
        assert_eq!(state.derive(&entries, &view).total, 3);
    }
}
