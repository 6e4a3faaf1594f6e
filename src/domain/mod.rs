pub mod banner;
pub mod blacklist;
pub mod contact;
pub mod post;
pub mod role;
pub mod settings;
pub mod toast;
pub mod types;
pub mod user;
