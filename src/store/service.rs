use serde::Serialize;
use uuid::Uuid;

use super::Motivation;
use super::ServiceStore;
use super::Subscriber;
use crate::domain::AuthorName;
use crate::domain::MotivationStatus;
use crate::domain::MotivationText;
use crate::domain::Pagination;
use crate::domain::StatusFilter;

/// A partial update; `None` fields are left as they are.
#[derive(Debug, Default)]
pub struct MotivationChanges {
    pub status: Option<MotivationStatus>,
    pub text: Option<MotivationText>,
    /// `Some(None)` clears the author
    pub author: Option<Option<AuthorName>>,
}

/// Number of motivations in each status
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct MotivationStats {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl ServiceStore {
    /// One page of motivations (newest first), plus the number of rows
    /// matching `filter` across all pages.
    #[tracing::instrument(name = "SELECTing page of motivations", skip(self))]
    pub async fn list_motivations(
        &self,
        filter: StatusFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Motivation>, i64), sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM motivations
            WHERE ($1::motivation_status IS NULL OR status = $1)
            "#,
        )
        .bind(filter.status())
        .fetch_one(&self.0)
        .await
        .map_err(|e| {
            tracing::error!("bad query: {e:?}");
            e
        })?;

        let page = sqlx::query_as::<_, Motivation>(
            r#"
            SELECT id, text, author, is_anonymous, status, created_at, updated_at
            FROM motivations
            WHERE ($1::motivation_status IS NULL OR status = $1)
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.status())
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.0)
        .await
        .map_err(|e| {
            tracing::error!("bad query: {e:?}");
            e
        })?;

        Ok((page, total))
    }

    #[tracing::instrument(name = "Counting motivations by status", skip(self))]
    pub async fn count_by_status(&self) -> Result<MotivationStats, sqlx::Error> {
        let rows: Vec<(MotivationStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM motivations GROUP BY status")
                .fetch_all(&self.0)
                .await
                .map_err(|e| {
                    tracing::error!("bad query: {e:?}");
                    e
                })?;

        // statuses with no rows are simply absent from the result
        let mut stats = MotivationStats::default();
        for (status, count) in rows {
            match status {
                MotivationStatus::Pending => stats.pending = count,
                MotivationStatus::Approved => stats.approved = count,
                MotivationStatus::Rejected => stats.rejected = count,
            }
        }
        Ok(stats)
    }

    /// Apply `changes` to the motivation with `id`, returning the updated row,
    /// or `None` if no such motivation exists.
    #[tracing::instrument(name = "UPDATEing motivation", skip(self, changes))]
    pub async fn update_motivation(
        &self,
        id: Uuid,
        changes: MotivationChanges,
    ) -> Result<Option<Motivation>, sqlx::Error> {
        let text: Option<&str> = changes.text.as_ref().map(AsRef::as_ref);
        let (set_author, author): (bool, Option<&str>) = match &changes.author {
            None => (false, None),
            Some(author) => (true, author.as_ref().map(AsRef::as_ref)),
        };

        sqlx::query_as::<_, Motivation>(
            r#"
            UPDATE motivations
            SET
                status = COALESCE($2, status),
                text = COALESCE($3, text),
                author = CASE WHEN $4 THEN $5 ELSE author END,
                updated_at = now()
            WHERE id = $1
            RETURNING id, text, author, is_anonymous, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.status)
        .bind(text)
        .bind(set_author)
        .bind(author)
        .fetch_optional(&self.0)
        .await
        .map_err(|e| {
            tracing::error!("bad query: {e:?}");
            e
        })
    }

    /// Hard delete; returns the number of rows removed (0 or 1)
    #[tracing::instrument(name = "DELETEing motivation", skip(self))]
    pub async fn delete_motivation(
        &self,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM motivations WHERE id = $1")
            .bind(id)
            .execute(&self.0)
            .await
            .map_err(|e| {
                tracing::error!("bad query: {e:?}");
                e
            })?;
        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "SELECTing all subscribers", skip(self))]
    pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>, sqlx::Error> {
        sqlx::query_as::<_, Subscriber>(
            r#"
            SELECT id, email, is_active, confirmed, confirmation_token, created_at
            FROM subscribers
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.0)
        .await
        .map_err(|e| {
            tracing::error!("bad query: {e:?}");
            e
        })
    }
}
