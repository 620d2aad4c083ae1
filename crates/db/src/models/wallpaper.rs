//! Wallpaper entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use wallhub_core::types::{DbId, Timestamp};

/// A wallpaper row from the `wallpapers` table.
///
/// Only metadata and URLs are stored; the service never touches image bytes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Wallpaper {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub tags: Json<Vec<String>>,
    /// Display resolution, e.g. `"3840x2160"`.
    pub resolution: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub uploader_id: Option<DbId>,
    pub featured: bool,
    /// Uploads enter unapproved and are hidden from public listings until
    /// approved.
    pub approved: bool,
    pub downloads_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a wallpaper.
#[derive(Debug)]
pub struct CreateWallpaper {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub tags: Vec<String>,
    pub resolution: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub uploader_id: Option<DbId>,
}

/// DTO for updating wallpaper metadata. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWallpaper {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
    pub resolution: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Public listing filter. `search` is a case-insensitive substring match
/// over title and tags.
#[derive(Debug, Default)]
pub struct WallpaperFilter {
    pub search: Option<String>,
    pub category_id: Option<DbId>,
    pub featured: Option<bool>,
    /// When false (admin views), unapproved rows are included.
    pub approved_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
