//! SQLite database operations
//!
//! All database access goes through this module.
//! Holds the four persisted relations: accounts, posts, follows, likes.

use sqlx::{Pool, Sqlite, SqlitePool};
use std::path::Path;

use super::models::*;
use crate::error::AppError;

/// Database connection pool wrapper.
///
/// One `Database` is owned by the process and passed by reference (via
/// `AppState`) into every component; there is no global connection state.
pub struct Database {
    pool: Pool<Sqlite>,
}

/// Escape `%`, `_` and the escape character itself so user-supplied
/// search text matches literally inside a LIKE pattern.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db_error)
            if db_error.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}

/// Edge inserts reference accounts and posts by foreign key; a violated
/// reference means the target row does not exist, a client error rather
/// than a storage failure.
fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db_error)
            if db_error.kind() == sqlx::error::ErrorKind::ForeignKeyViolation
    )
}

impl Database {
    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Arguments
    /// * `path` - Path to SQLite database file
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        // Create connection string
        let connection_string = format!("sqlite:{}?mode=rwc", path.display());

        // Create connection pool
        let pool = SqlitePool::connect(&connection_string).await?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!("Database connected and migrated successfully");

        Ok(Self { pool })
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Insert a new account
    ///
    /// A taken handle or email surfaces as a validation error, not a
    /// storage failure.
    pub async fn insert_account(&self, account: &Account) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (id, handle, email, password_hash, biography, avatar_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.handle)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.biography)
        .bind(&account.avatar_url)
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => Err(AppError::Validation(
                "handle or email is already taken".to_string(),
            )),
            Err(error) => Err(error.into()),
        }
    }

    pub async fn get_account_by_handle(&self, handle: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE handle = ?")
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    pub async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    /// Update the biography of an account (only ever the caller's own row)
    pub async fn update_biography(
        &self,
        account_id: &str,
        biography: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE accounts SET biography = ? WHERE id = ?")
            .bind(biography)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Update the avatar URL reference of an account
    pub async fn update_avatar_url(
        &self,
        account_id: &str,
        avatar_url: &str,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE accounts SET avatar_url = ? WHERE id = ?")
            .bind(avatar_url)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count_followers(&self, account_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE followed_id = ?")
            .bind(account_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_following(&self, account_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = ?")
            .bind(account_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Follow edges
    // =========================================================================

    /// Insert a follow edge if absent
    ///
    /// Returns true if the edge was created, false if it already existed.
    /// The composite primary key on (follower_id, followed_id) absorbs
    /// concurrent duplicate inserts.
    ///
    /// # Errors
    /// `NotFound` if the followed account does not exist. `OR IGNORE`
    /// only absorbs the duplicate-edge conflict, not the foreign key on
    /// followed_id.
    pub async fn insert_follow(
        &self,
        follower_id: &str,
        followed_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO follows (follower_id, followed_id, created_at)
            VALUES (?, ?, datetime('now'))
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(result) => Ok(result.rows_affected() == 1),
            Err(error) if is_foreign_key_violation(&error) => Err(AppError::NotFound),
            Err(error) => Err(error.into()),
        }
    }

    /// Delete a follow edge
    ///
    /// Returns true if an edge was removed, false if none existed.
    pub async fn delete_follow(
        &self,
        follower_id: &str,
        followed_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followed_id = ?")
            .bind(follower_id)
            .bind(followed_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn is_following(
        &self,
        follower_id: &str,
        followed_id: &str,
    ) -> Result<bool, AppError> {
        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM follows WHERE follower_id = ? AND followed_id = ? LIMIT 1",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exists.is_some())
    }

    /// Account ids followed by the given account
    pub async fn followed_ids(&self, follower_id: &str) -> Result<Vec<String>, AppError> {
        let ids =
            sqlx::query_scalar::<_, String>("SELECT followed_id FROM follows WHERE follower_id = ?")
                .bind(follower_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids)
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// Insert a new post
    ///
    /// When the post is a reply, the parent's reply_count is incremented
    /// in the same transaction as the insert; an unknown parent rolls the
    /// whole operation back with NotFound.
    pub async fn insert_post(&self, post: &Post) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        if let Some(parent_post_id) = &post.parent_post_id {
            let updated =
                sqlx::query("UPDATE posts SET reply_count = reply_count + 1 WHERE id = ?")
                    .bind(parent_post_id)
                    .execute(&mut *tx)
                    .await?;

            if updated.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(AppError::NotFound);
            }
        }

        sqlx::query(
            r#"
            INSERT INTO posts (
                id, content, author_id, is_reply, parent_post_id,
                like_count, reply_count, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&post.id)
        .bind(&post.content)
        .bind(&post.author_id)
        .bind(post.is_reply)
        .bind(&post.parent_post_id)
        .bind(post.like_count)
        .bind(post.reply_count)
        .bind(post.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    /// Viewer-annotated posts authored by any account in the audience set
    ///
    /// Single query: author metadata and the viewer's like edge are
    /// left-joined in, so annotation cost does not grow with page size.
    /// Ordered by created_at descending with id as deterministic
    /// tie-break. Offset pagination; deep offsets scan proportionally to
    /// the offset, a known limitation.
    pub async fn posts_by_authors(
        &self,
        viewer_id: &str,
        author_ids: &[String],
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ViewerPost>, AppError> {
        if author_ids.is_empty() {
            return Ok(vec![]);
        }

        let placeholders = author_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        let query = format!(
            r#"
            SELECT posts.*,
                accounts.handle AS author_handle,
                accounts.avatar_url AS author_avatar_url,
                CASE WHEN likes.liker_id IS NOT NULL THEN 1 ELSE 0 END AS liked
            FROM posts
            JOIN accounts ON accounts.id = posts.author_id
            LEFT JOIN likes
                ON likes.post_id = posts.id AND likes.liker_id = ?
            WHERE posts.author_id IN ({})
            ORDER BY posts.created_at DESC, posts.id DESC
            LIMIT ? OFFSET ?
            "#,
            placeholders
        );

        let mut query_builder = sqlx::query_as::<_, ViewerPost>(&query).bind(viewer_id);
        for author_id in author_ids {
            query_builder = query_builder.bind(author_id);
        }

        let posts = query_builder
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    /// Viewer-annotated posts by author handle
    ///
    /// An unknown handle matches no rows and yields an empty page.
    pub async fn posts_by_handle(
        &self,
        viewer_id: &str,
        handle: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ViewerPost>, AppError> {
        let posts = sqlx::query_as::<_, ViewerPost>(
            r#"
            SELECT posts.*,
                accounts.handle AS author_handle,
                accounts.avatar_url AS author_avatar_url,
                CASE WHEN likes.liker_id IS NOT NULL THEN 1 ELSE 0 END AS liked
            FROM posts
            JOIN accounts ON accounts.id = posts.author_id
            LEFT JOIN likes
                ON likes.post_id = posts.id AND likes.liker_id = ?
            WHERE accounts.handle = ?
            ORDER BY posts.created_at DESC, posts.id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(viewer_id)
        .bind(handle)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    // =========================================================================
    // Like edges
    // =========================================================================

    /// Like a post
    ///
    /// Edge insert and counter increment run in one transaction, so the
    /// counter can never diverge from the edge set, even if the caller
    /// disconnects mid-operation. The unique (liker_id, post_id) key is
    /// the dedup mechanism: of two concurrent likes only the one whose
    /// insert changed a row increments the counter.
    ///
    /// Returns true if the like was applied, false if it already existed.
    ///
    /// # Errors
    /// `NotFound` if the post does not exist.
    pub async fn insert_like(&self, liker_id: &str, post_id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        // `OR IGNORE` absorbs only the duplicate-edge conflict; an
        // unknown post id trips the foreign key on post_id instead.
        let inserted = sqlx::query(
            r#"
            INSERT OR IGNORE INTO likes (liker_id, post_id, created_at)
            VALUES (?, ?, datetime('now'))
            "#,
        )
        .bind(liker_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await;

        let inserted = match inserted {
            Ok(result) => result,
            Err(error) if is_foreign_key_violation(&error) => {
                tx.rollback().await?;
                return Err(AppError::NotFound);
            }
            Err(error) => return Err(error.into()),
        };

        if inserted.rows_affected() == 0 {
            // Already liked: idempotent no-op, nothing to commit.
            tx.rollback().await?;
            return Ok(false);
        }

        let updated = sqlx::query("UPDATE posts SET like_count = like_count + 1 WHERE id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound);
        }

        tx.commit().await?;

        Ok(true)
    }

    /// Unlike a post
    ///
    /// Mirror of [`Database::insert_like`]: edge delete plus counter
    /// decrement in one transaction. When no edge exists this is a no-op
    /// and the counter is left untouched, so it can never go negative.
    ///
    /// Returns true if a like was removed, false if none existed.
    pub async fn delete_like(&self, liker_id: &str, post_id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM likes WHERE liker_id = ? AND post_id = ?")
            .bind(liker_id)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE posts SET like_count = like_count - 1 WHERE id = ? AND like_count > 0",
        )
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(true)
    }

    /// Number of like edges referencing a post
    ///
    /// Invariant check helper: must always equal the post's like_count
    /// at quiescent points.
    pub async fn count_likes(&self, post_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Case-insensitive substring search over post content,
    /// viewer-annotated like the timeline queries.
    pub async fn search_posts(
        &self,
        viewer_id: &str,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ViewerPost>, AppError> {
        let pattern = format!("%{}%", escape_like(query));

        let posts = sqlx::query_as::<_, ViewerPost>(
            r#"
            SELECT posts.*,
                accounts.handle AS author_handle,
                accounts.avatar_url AS author_avatar_url,
                CASE WHEN likes.liker_id IS NOT NULL THEN 1 ELSE 0 END AS liked
            FROM posts
            JOIN accounts ON accounts.id = posts.author_id
            LEFT JOIN likes
                ON likes.post_id = posts.id AND likes.liker_id = ?
            WHERE posts.content LIKE ? ESCAPE '\'
            ORDER BY posts.created_at DESC, posts.id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(viewer_id)
        .bind(&pattern)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Case-insensitive substring search over account handles
    pub async fn search_accounts(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ViewerAccount>, AppError> {
        let pattern = format!("%{}%", escape_like(query));

        let accounts = sqlx::query_as::<_, ViewerAccount>(
            r#"
            SELECT id, handle, biography, avatar_url
            FROM accounts
            WHERE handle LIKE ? ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(&pattern)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
