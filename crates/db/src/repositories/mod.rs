//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod comment_repo;
pub mod dashboard_repo;
pub mod notification_repo;
pub mod onboarding_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod session_repo;
pub mod vote_repo;
pub mod wallpaper_repo;

pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use dashboard_repo::DashboardRepo;
pub use notification_repo::NotificationRepo;
pub use onboarding_repo::OnboardingRepo;
pub use profile_repo::ProfileRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use vote_repo::VoteRepo;
pub use wallpaper_repo::WallpaperRepo;
