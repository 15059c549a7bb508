//! Image repository
//!
//! All reads that feed the gallery expand the owner via JOIN. Dynamic
//! filters (the asset-id restriction from a media search) go through
//! `QueryBuilder` with bound parameters.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use lumera_core::models::{
    Author, Image, ImageWithAuthor, NewImage, Paginated, Pagination, UpdateImage,
};

use super::DbError;

/// Joined select list shared by every owner-expanded read.
const IMAGE_WITH_AUTHOR_COLUMNS: &str = "i.id, i.title, i.public_id, i.secure_url, i.width, \
     i.height, i.transformation_type, i.author_id, i.created_at, i.updated_at, \
     u.external_id AS author_external_id, u.first_name AS author_first_name, \
     u.last_name AS author_last_name";

/// Image repository
pub struct ImageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ImageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new image owned by `author_id`.
    pub async fn create(&self, draft: &NewImage, author_id: Uuid) -> Result<Image, DbError> {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            INSERT INTO images
                (title, public_id, secure_url, width, height, transformation_type, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, public_id, secure_url, width, height,
                      transformation_type, author_id, created_at, updated_at
            "#,
        )
        .bind(draft.title.as_str())
        .bind(draft.public_id.as_str())
        .bind(&draft.secure_url)
        .bind(draft.width)
        .bind(draft.height)
        .bind(&draft.transformation_type)
        .bind(author_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into_image())
    }

    /// Look up an image by id without owner expansion.
    pub async fn find(&self, id: Uuid) -> Result<Option<Image>, DbError> {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT id, title, public_id, secure_url, width, height,
                   transformation_type, author_id, created_at, updated_at
            FROM images
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ImageRow::into_image))
    }

    /// Fetch an image with its owner expanded.
    pub async fn get_with_author(&self, id: Uuid) -> Result<ImageWithAuthor, DbError> {
        let sql = format!(
            "SELECT {IMAGE_WITH_AUTHOR_COLUMNS} \
             FROM images i JOIN users u ON u.id = i.author_id \
             WHERE i.id = $1"
        );

        let row = sqlx::query_as::<_, ImageWithAuthorRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "image",
                id: id.to_string(),
            })?;

        Ok(row.into_record())
    }

    /// Apply an update. The owner column is never touched here.
    pub async fn update(&self, update: &UpdateImage) -> Result<Image, DbError> {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            UPDATE images
            SET title = $2,
                public_id = $3,
                secure_url = $4,
                width = $5,
                height = $6,
                transformation_type = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, public_id, secure_url, width, height,
                      transformation_type, author_id, created_at, updated_at
            "#,
        )
        .bind(update.id)
        .bind(update.title.as_str())
        .bind(update.public_id.as_str())
        .bind(&update.secure_url)
        .bind(update.width)
        .bind(update.height)
        .bind(&update.transformation_type)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "image",
            id: update.id.to_string(),
        })?;

        Ok(row.into_image())
    }

    /// Delete by id (idempotent). Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List images newest-updated first, optionally restricted to a set of
    /// media asset ids.
    pub async fn list(
        &self,
        public_ids: Option<&[String]>,
        page: Pagination,
    ) -> Result<Paginated<ImageWithAuthor>, DbError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {IMAGE_WITH_AUTHOR_COLUMNS} \
             FROM images i JOIN users u ON u.id = i.author_id"
        ));
        if let Some(ids) = public_ids {
            query.push(" WHERE i.public_id = ANY(");
            query.push_bind(ids.to_vec());
            query.push(")");
        }
        query.push(" ORDER BY i.updated_at DESC LIMIT ");
        query.push_bind(page.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(page.offset() as i64);

        let rows: Vec<ImageWithAuthorRow> =
            query.build_query_as().fetch_all(self.pool).await?;

        let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM images i");
        if let Some(ids) = public_ids {
            count.push(" WHERE i.public_id = ANY(");
            count.push_bind(ids.to_vec());
            count.push(")");
        }
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        Ok(Paginated {
            items: rows.into_iter().map(ImageWithAuthorRow::into_record).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// List one owner's images, newest-updated first.
    pub async fn list_by_author(
        &self,
        author_id: Uuid,
        page: Pagination,
    ) -> Result<Paginated<ImageWithAuthor>, DbError> {
        let sql = format!(
            "SELECT {IMAGE_WITH_AUTHOR_COLUMNS} \
             FROM images i JOIN users u ON u.id = i.author_id \
             WHERE i.author_id = $1 \
             ORDER BY i.updated_at DESC \
             LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query_as::<_, ImageWithAuthorRow>(&sql)
            .bind(author_id)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(self.pool)
            .await?;

        Ok(Paginated {
            items: rows.into_iter().map(ImageWithAuthorRow::into_record).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Overall count of stored images, independent of any filter.
    pub async fn count_all(&self) -> Result<i64, DbError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    title: String,
    public_id: String,
    secure_url: String,
    width: Option<i32>,
    height: Option<i32>,
    transformation_type: Option<String>,
    author_id: Uuid,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl ImageRow {
    fn into_image(self) -> Image {
        Image {
            id: self.id,
            title: self.title,
            public_id: self.public_id,
            secure_url: self.secure_url,
            width: self.width,
            height: self.height,
            transformation_type: self.transformation_type,
            author_id: self.author_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImageWithAuthorRow {
    id: Uuid,
    title: String,
    public_id: String,
    secure_url: String,
    width: Option<i32>,
    height: Option<i32>,
    transformation_type: Option<String>,
    author_id: Uuid,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    author_external_id: String,
    author_first_name: Option<String>,
    author_last_name: Option<String>,
}

impl ImageWithAuthorRow {
    fn into_record(self) -> ImageWithAuthor {
        ImageWithAuthor {
            image: Image {
                id: self.id,
                title: self.title,
                public_id: self.public_id,
                secure_url: self.secure_url,
                width: self.width,
                height: self.height,
                transformation_type: self.transformation_type,
                author_id: self.author_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author: Author {
                id: self.author_id,
                external_id: self.author_external_id,
                first_name: self.author_first_name,
                last_name: self.author_last_name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::UserRepo;
    use crate::db::MIGRATOR;
    use lumera_core::models::{AssetId, ImageTitle, NewUser};

    async fn seed_user(pool: &PgPool, external_id: &str) -> anyhow::Result<lumera_core::models::User> {
        Ok(UserRepo::new(pool)
            .create(&NewUser {
                external_id: external_id.into(),
                first_name: Some("Test".into()),
                last_name: Some("Owner".into()),
            })
            .await?)
    }

    fn draft(n: u32) -> NewImage {
        NewImage {
            title: ImageTitle::new(&format!("img-{n:02}")).unwrap(),
            public_id: AssetId::new(&format!("lumera/img-{n:02}")).unwrap(),
            secure_url: format!("https://media.example/lumera/img-{n:02}.png"),
            width: Some(1024),
            height: Some(768),
            transformation_type: None,
        }
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn create_then_get_expands_owner(pool: PgPool) -> anyhow::Result<()> {
        let owner = seed_user(&pool, "ext-owner").await?;
        let repo = ImageRepo::new(&pool);

        let image = repo.create(&draft(1), owner.id).await?;
        assert_eq!(image.author_id, owner.id);

        let fetched = repo.get_with_author(image.id).await?;
        assert_eq!(fetched.image.id, image.id);
        assert_eq!(fetched.author.id, owner.id);
        assert_eq!(fetched.author.external_id, "ext-owner");
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn delete_is_idempotent(pool: PgPool) -> anyhow::Result<()> {
        let owner = seed_user(&pool, "ext-del").await?;
        let repo = ImageRepo::new(&pool);

        let image = repo.create(&draft(1), owner.id).await?;
        assert!(repo.delete(image.id).await?);
        assert!(!repo.delete(image.id).await?);
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn list_filters_to_given_public_ids(pool: PgPool) -> anyhow::Result<()> {
        let owner = seed_user(&pool, "ext-filter").await?;
        let repo = ImageRepo::new(&pool);
        for n in 0..5 {
            repo.create(&draft(n), owner.id).await?;
        }

        let wanted = vec!["lumera/img-01".to_string(), "lumera/img-03".to_string()];
        let page = repo.list(Some(&wanted), Pagination::default()).await?;

        assert_eq!(page.total, 2);
        let mut ids: Vec<_> = page
            .items
            .iter()
            .map(|r| r.image.public_id.clone())
            .collect();
        ids.sort();
        assert_eq!(ids, wanted);
        Ok(())
    }
}
