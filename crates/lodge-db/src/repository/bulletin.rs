//! # Bulletin Repository
//!
//! Database operations for news posts and ads. Both lists come back newest
//! first with the author's name resolved through the posting account.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    pub news_id: i64,
    pub lodge_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_by: i64,
    pub author_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRecord {
    pub ad_id: i64,
    pub lodge_id: i64,
    pub title: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub created_by: i64,
    pub author_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewNews {
    pub lodge_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_by: i64,
}

#[derive(Debug, Clone)]
pub struct NewAd {
    pub lodge_id: i64,
    pub title: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub created_by: i64,
}

/// Repository for news and ad database operations.
#[derive(Debug, Clone)]
pub struct BulletinRepository {
    pool: SqlitePool,
}

impl BulletinRepository {
    /// Creates a new BulletinRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BulletinRepository { pool }
    }

    /// News posts, newest first.
    pub async fn list_news(&self, lodge_id: i64) -> DbResult<Vec<NewsRecord>> {
        let posts = sqlx::query_as::<_, NewsRecord>(
            r#"
            SELECT n.news_id, n.lodge_id, n.title, n.content, n.image_url,
                   n.created_by,
                   e.first_name || IFNULL(' ' || e.last_name, '') AS author_name,
                   n.created_at
            FROM news n
            INNER JOIN users u ON u.user_id = n.created_by
            INNER JOIN employees e ON e.employee_id = u.employee_id
            WHERE n.lodge_id = ?1
            ORDER BY n.created_at DESC, n.news_id DESC
            "#,
        )
        .bind(lodge_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    pub async fn create_news(&self, news: NewNews) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO news (lodge_id, title, content, image_url, created_by)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(news.lodge_id)
        .bind(&news.title)
        .bind(&news.content)
        .bind(&news.image_url)
        .bind(news.created_by)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn delete_news(&self, lodge_id: i64, news_id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM news WHERE lodge_id = ?1 AND news_id = ?2")
            .bind(lodge_id)
            .bind(news_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("news post", news_id));
        }
        Ok(())
    }

    /// Ads, newest first.
    pub async fn list_ads(&self, lodge_id: i64) -> DbResult<Vec<AdRecord>> {
        let ads = sqlx::query_as::<_, AdRecord>(
            r#"
            SELECT a.ad_id, a.lodge_id, a.title, a.link, a.image_url,
                   a.created_by,
                   e.first_name || IFNULL(' ' || e.last_name, '') AS author_name,
                   a.created_at
            FROM ads a
            INNER JOIN users u ON u.user_id = a.created_by
            INNER JOIN employees e ON e.employee_id = u.employee_id
            WHERE a.lodge_id = ?1
            ORDER BY a.created_at DESC, a.ad_id DESC
            "#,
        )
        .bind(lodge_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ads)
    }

    pub async fn create_ad(&self, ad: NewAd) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO ads (lodge_id, title, link, image_url, created_by)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(ad.lodge_id)
        .bind(&ad.title)
        .bind(&ad.link)
        .bind(&ad.image_url)
        .bind(ad.created_by)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn delete_ad(&self, lodge_id: i64, ad_id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM ads WHERE lodge_id = ?1 AND ad_id = ?2")
            .bind(lodge_id)
            .bind(ad_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ad", ad_id));
        }
        Ok(())
    }
}
