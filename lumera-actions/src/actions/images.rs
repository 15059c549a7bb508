//! Image actions
//!
//! The six operations the web layer calls. Each one borrows the shared
//! pool, performs one or two store operations, fires the appropriate caller
//! signal, and funnels unexpected failures through the error surface.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use lumera_core::config::MediaConfig;
use lumera_core::models::{Image, ImageWithAuthor, NewImage, Paginated, Pagination, UpdateImage};

use crate::db;
use crate::db::repos::{ImageRepo, UserRepo};
use crate::error::{ActionError, Result};
use crate::media::{MediaIndex, SearchClient, SearchExpression};
use crate::signals::{Navigator, ViewCache};

/// Folder on the media service that holds every gallery asset.
const MEDIA_FOLDER: &str = "lumera";

/// Where `delete_image` sends the caller afterwards.
const HOME_ROUTE: &str = "/";

/// One page of the whole gallery, plus the independent overall count of
/// stored images.
#[derive(Debug, Clone)]
pub struct GalleryPage {
    pub images: Paginated<ImageWithAuthor>,
    pub total_stored: i64,
}

/// Server-side image actions.
pub struct ImageActions {
    pool: PgPool,
    media: Arc<dyn MediaIndex>,
    views: Arc<dyn ViewCache>,
    navigator: Arc<dyn Navigator>,
}

impl ImageActions {
    /// Wire the actions from the environment: shared cached connection plus
    /// a media search client built from the configured credentials.
    pub async fn connect(
        views: Arc<dyn ViewCache>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let pool = db::connection().await?.clone();
        let media = Arc::new(SearchClient::new(&MediaConfig::from_env()?)?);
        Ok(Self::with_pool(pool, media, views, navigator))
    }

    /// Assemble from explicit parts (tests, embedding into an existing app).
    pub fn with_pool(
        pool: PgPool,
        media: Arc<dyn MediaIndex>,
        views: Arc<dyn ViewCache>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            pool,
            media,
            views,
            navigator,
        }
    }

    /// Create an image owned by `user_id` and invalidate `path`.
    ///
    /// Fails with a not-found error, writing nothing, when the user does
    /// not exist.
    pub async fn add_image(&self, draft: NewImage, user_id: Uuid, path: &str) -> Result<Image> {
        self.add_image_inner(draft, user_id, path)
            .await
            .map_err(|err| err.surface("add_image"))
    }

    async fn add_image_inner(&self, draft: NewImage, user_id: Uuid, path: &str) -> Result<Image> {
        let author = UserRepo::new(&self.pool)
            .find(user_id)
            .await
            .map_err(ActionError::from)?
            .ok_or_else(|| ActionError::NotFound {
                resource: "user",
                id: user_id.to_string(),
            })?;

        let image = ImageRepo::new(&self.pool).create(&draft, author.id).await?;
        tracing::debug!(image_id = %image.id, author_id = %author.id, "image created");

        self.views.invalidate(path);
        Ok(image)
    }

    /// Apply an update on behalf of `user_id` and invalidate `path`.
    ///
    /// Fails with an authorization error when the record is absent or owned
    /// by someone else; the stored record is left untouched in both cases.
    pub async fn update_image(
        &self,
        update: UpdateImage,
        user_id: Uuid,
        path: &str,
    ) -> Result<Image> {
        self.update_image_inner(update, user_id, path)
            .await
            .map_err(|err| err.surface("update_image"))
    }

    async fn update_image_inner(
        &self,
        update: UpdateImage,
        user_id: Uuid,
        path: &str,
    ) -> Result<Image> {
        let repo = ImageRepo::new(&self.pool);

        let existing = repo.find(update.id).await.map_err(ActionError::from)?;
        let owned = existing
            .map(|image| image.author_id == user_id)
            .unwrap_or(false);
        if !owned {
            return Err(ActionError::Unauthorized(
                "image not found or not owned by this user".into(),
            ));
        }

        let image = repo.update(&update).await?;
        self.views.invalidate(path);
        Ok(image)
    }

    /// Delete an image if present. Absence is not an error, and the caller
    /// is redirected home regardless of the outcome.
    pub async fn delete_image(&self, image_id: Uuid) -> Result<()> {
        let outcome = self
            .delete_image_inner(image_id)
            .await
            .map_err(|err| err.surface("delete_image"));
        self.navigator.redirect(HOME_ROUTE);
        outcome
    }

    async fn delete_image_inner(&self, image_id: Uuid) -> Result<()> {
        let removed = ImageRepo::new(&self.pool).delete(image_id).await?;
        if removed {
            tracing::debug!(%image_id, "image deleted");
        }
        Ok(())
    }

    /// Fetch a single image with its owner expanded.
    pub async fn get_image_by_id(&self, image_id: Uuid) -> Result<ImageWithAuthor> {
        self.get_image_by_id_inner(image_id)
            .await
            .map_err(|err| err.surface("get_image_by_id"))
    }

    async fn get_image_by_id_inner(&self, image_id: Uuid) -> Result<ImageWithAuthor> {
        let image = ImageRepo::new(&self.pool).get_with_author(image_id).await?;
        Ok(image)
    }

    /// One page of the whole gallery, newest-updated first.
    ///
    /// The media index is consulted for the folder's assets; when `search`
    /// is given the local store is restricted to the matching asset ids,
    /// otherwise every stored image is eligible.
    pub async fn get_all_images(
        &self,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<GalleryPage> {
        self.get_all_images_inner(page, search)
            .await
            .map_err(|err| err.surface("get_all_images"))
    }

    async fn get_all_images_inner(
        &self,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<GalleryPage> {
        let mut expression = SearchExpression::in_folder(MEDIA_FOLDER);
        if let Some(term) = search {
            expression = expression.matching(term);
        }
        let asset_ids = self.media.search_asset_ids(&expression).await?;

        let repo = ImageRepo::new(&self.pool);
        let filter = search.map(|_| asset_ids.as_slice());
        let images = repo.list(filter, page).await?;
        let total_stored = repo.count_all().await?;

        Ok(GalleryPage {
            images,
            total_stored,
        })
    }

    /// One page of a single owner's images, newest-updated first.
    pub async fn get_user_images(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<Paginated<ImageWithAuthor>> {
        self.get_user_images_inner(user_id, page)
            .await
            .map_err(|err| err.surface("get_user_images"))
    }

    async fn get_user_images_inner(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<Paginated<ImageWithAuthor>> {
        let images = ImageRepo::new(&self.pool)
            .list_by_author(user_id, page)
            .await?;
        Ok(images)
    }
}
