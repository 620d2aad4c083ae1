//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod dashboard;
pub mod notifications;
pub mod onboarding;
pub mod profile;
pub mod roles;
pub mod votes;
pub mod wallpapers;
