//! Mock repository implementations for isolating services in tests.

use std::net::IpAddr;

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::banner::Banner;
use crate::domain::post::Post;
use crate::domain::settings::AppSettings;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BlacklistReader, PublicContentReader, SettingsRepository};

mock! {
    pub Repository {}

    impl PublicContentReader for Repository {
        fn list_active_banners(&self, now: NaiveDateTime) -> RepositoryResult<Vec<Banner>>;
        fn list_published_posts(&self) -> RepositoryResult<Vec<Post>>;
    }

    impl BlacklistReader for Repository {
        fn is_ip_blocked(&self, ip: IpAddr, now: NaiveDateTime) -> RepositoryResult<bool>;
    }

    impl SettingsRepository for Repository {
        fn get_settings(&self) -> RepositoryResult<AppSettings>;
        fn save_settings(&self, settings: &AppSettings) -> RepositoryResult<AppSettings>;
    }
}
