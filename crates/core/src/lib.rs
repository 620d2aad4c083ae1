//! Domain logic for the Wallhub wallpaper gallery.
//!
//! Everything in this crate is pure and synchronous: permission resolution,
//! the self-protection guards enforced by the admin surface, and the
//! onboarding step machine. Persistence lives in `wallhub-db`, HTTP in
//! `wallhub-api`.

pub mod access;
pub mod actor;
pub mod error;
pub mod onboarding;
pub mod permissions;
pub mod roles;
pub mod slug;
pub mod types;
