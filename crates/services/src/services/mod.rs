pub mod advisor;
pub mod badge;
pub mod expiry;
pub mod flows;
pub mod notification;
pub mod payment;
pub mod timeline;
