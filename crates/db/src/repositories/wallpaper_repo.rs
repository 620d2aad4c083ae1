//! Repository for the `wallpapers` table.

use sqlx::types::Json;
use sqlx::PgPool;
use wallhub_core::types::DbId;

use crate::models::wallpaper::{CreateWallpaper, UpdateWallpaper, Wallpaper, WallpaperFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, category_id, tags, resolution, \
                        file_size_bytes, image_url, thumbnail_url, uploader_id, featured, \
                        approved, downloads_count, created_at, updated_at";

/// Default and maximum page sizes for public listings.
const DEFAULT_LIMIT: i64 = 24;
const MAX_LIMIT: i64 = 100;

/// Provides CRUD and listing operations for wallpapers.
pub struct WallpaperRepo;

impl WallpaperRepo {
    /// Insert a new wallpaper, returning the created row. Uploads enter
    /// unapproved and unfeatured.
    pub async fn create(pool: &PgPool, input: &CreateWallpaper) -> Result<Wallpaper, sqlx::Error> {
        let query = format!(
            "INSERT INTO wallpapers (title, slug, description, category_id, tags, resolution,
                                     file_size_bytes, image_url, thumbnail_url, uploader_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wallpaper>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(Json(&input.tags))
            .bind(&input.resolution)
            .bind(input.file_size_bytes)
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .bind(input.uploader_id)
            .fetch_one(pool)
            .await
    }

    /// Find a wallpaper by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Wallpaper>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wallpapers WHERE id = $1");
        sqlx::query_as::<_, Wallpaper>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a wallpaper by its URL slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Wallpaper>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wallpapers WHERE slug = $1");
        sqlx::query_as::<_, Wallpaper>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List wallpapers, newest first.
    ///
    /// `search` is a case-insensitive substring match over title and the
    /// tags array (no relevance ranking). `approved_only` hides unapproved
    /// rows for the public surface; admin views pass `false`.
    pub async fn list(
        pool: &PgPool,
        filter: &WallpaperFilter,
    ) -> Result<Vec<Wallpaper>, sqlx::Error> {
        let mut where_clauses: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.approved_only {
            where_clauses.push("approved = TRUE".to_string());
        }
        if filter.search.is_some() {
            // Substring match over the title and the flattened tags array.
            where_clauses.push(format!(
                "(title ILIKE ${param_idx} OR EXISTS (
                    SELECT 1 FROM jsonb_array_elements_text(tags) AS tag
                    WHERE tag ILIKE ${param_idx}
                ))"
            ));
            param_idx += 1;
        }
        if filter.category_id.is_some() {
            where_clauses.push(format!("category_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.featured.is_some() {
            where_clauses.push(format!("featured = ${param_idx}"));
            param_idx += 1;
        }

        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };
        let query = format!(
            "SELECT {COLUMNS} FROM wallpapers {where_sql}
             ORDER BY created_at DESC, id DESC
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let limit = filter
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        let offset = filter.offset.unwrap_or(0).max(0);

        let mut q = sqlx::query_as::<_, Wallpaper>(&query);
        if let Some(ref search) = filter.search {
            q = q.bind(format!("%{search}%"));
        }
        if let Some(category_id) = filter.category_id {
            q = q.bind(category_id);
        }
        if let Some(featured) = filter.featured {
            q = q.bind(featured);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Update wallpaper metadata. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWallpaper,
    ) -> Result<Option<Wallpaper>, sqlx::Error> {
        let query = format!(
            "UPDATE wallpapers SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category_id = COALESCE($4, category_id),
                tags = COALESCE($5, tags),
                resolution = COALESCE($6, resolution),
                image_url = COALESCE($7, image_url),
                thumbnail_url = COALESCE($8, thumbnail_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wallpaper>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.tags.as_ref().map(Json))
            .bind(&input.resolution)
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .fetch_optional(pool)
            .await
    }

    /// Set approval. Returns `None` if no row with the given `id` exists.
    pub async fn set_approved(
        pool: &PgPool,
        id: DbId,
        approved: bool,
    ) -> Result<Option<Wallpaper>, sqlx::Error> {
        let query =
            format!("UPDATE wallpapers SET approved = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Wallpaper>(&query)
            .bind(id)
            .bind(approved)
            .fetch_optional(pool)
            .await
    }

    /// Set the featured flag. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        featured: bool,
    ) -> Result<Option<Wallpaper>, sqlx::Error> {
        let query =
            format!("UPDATE wallpapers SET featured = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Wallpaper>(&query)
            .bind(id)
            .bind(featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a wallpaper. Returns `true` if the row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wallpapers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the download counter, returning the updated row.
    pub async fn record_download(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Wallpaper>, sqlx::Error> {
        let query = format!(
            "UPDATE wallpapers SET downloads_count = downloads_count + 1
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wallpaper>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
