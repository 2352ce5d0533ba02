use chrono::Utc;
use uuid::Uuid;

use super::PublicMotivation;
use super::PublicStore;
use crate::domain::NewMotivation;
use crate::domain::SubscriberEmail;

/// What `PublicStore::subscribe` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// No row existed for the address; one was inserted
    Created,
    /// A row existed and was already active; nothing changed
    AlreadySubscribed,
    /// A row existed but was inactive; it is active again
    Reactivated,
}

impl PublicStore {
    /// The status is not a parameter: new rows are always `pending`. The id is
    /// generated here rather than `RETURNING`ed, as the public role cannot read
    /// pending rows back.
    #[tracing::instrument(name = "INSERTing new motivation into db", skip(self, new))]
    pub async fn insert_motivation(
        &self,
        new: &NewMotivation,
    ) -> Result<Uuid, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let author: Option<&str> = new.author.as_ref().map(AsRef::as_ref);
        sqlx::query(
            r#"
            INSERT INTO motivations
                (id, text, author, is_anonymous, status, created_at, updated_at)
            VALUES
                ($1, $2, $3, $4, 'pending', $5, $5)
            "#,
        )
        .bind(id)
        .bind(new.text.as_ref())
        .bind(author)
        .bind(new.is_anonymous)
        .bind(now)
        .execute(&self.0)
        .await
        .map_err(|e| {
            tracing::error!("bad query: {e:?}");
            e
        })?;
        Ok(id)
    }

    /// Pick one approved motivation at random, in a single statement (no
    /// count-then-offset race). `None` if nothing has been approved yet.
    #[tracing::instrument(name = "SELECTing random approved motivation", skip(self))]
    pub async fn random_approved(&self) -> Result<Option<PublicMotivation>, sqlx::Error> {
        sqlx::query_as::<_, PublicMotivation>(
            r#"
            SELECT
                id,
                text,
                CASE WHEN is_anonymous THEN NULL ELSE author END AS author
            FROM motivations
            WHERE status = 'approved'
            ORDER BY random()
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.0)
        .await
        .map_err(|e| {
            tracing::error!("bad query: {e:?}");
            e
        })
    }

    /// Insert-or-reactivate in one upsert, relying on the UNIQUE constraint on
    /// `email` instead of a lookup followed by a write.
    ///
    /// The `WHERE` on the conflict branch means an already active row is left
    /// untouched and nothing is returned. `xmax = 0` holds only for a freshly
    /// inserted tuple.
    #[tracing::instrument(
        name = "Upserting subscriber",
        skip(self, email),
        fields(subscriber_email = %email.as_ref())
    )]
    pub async fn subscribe(
        &self,
        email: &SubscriberEmail,
    ) -> Result<SubscribeOutcome, sqlx::Error> {
        let row: Option<(bool,)> = sqlx::query_as(
            r#"
            INSERT INTO subscribers
                (id, email, is_active, confirmed, created_at)
            VALUES
                ($1, $2, true, true, $3)
            ON CONFLICT (email) DO UPDATE
                SET is_active = true
                WHERE subscribers.is_active = false
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email.as_ref())
        .bind(Utc::now())
        .fetch_optional(&self.0)
        .await
        .map_err(|e| {
            tracing::error!("bad query: {e:?}");
            e
        })?;

        let outcome = match row {
            None => SubscribeOutcome::AlreadySubscribed,
            Some((true,)) => SubscribeOutcome::Created,
            Some((false,)) => SubscribeOutcome::Reactivated,
        };
        Ok(outcome)
    }

    /// Returns the number of rows touched (0 or 1); callers should not disclose
    /// it.
    #[tracing::instrument(
        name = "Deactivating subscriber",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    pub async fn unsubscribe(
        &self,
        email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE subscribers SET is_active = false WHERE email = $1")
            .bind(email)
            .execute(&self.0)
            .await
            .map_err(|e| {
                tracing::error!("bad query: {e:?}");
                e
            })?;
        Ok(result.rows_affected())
    }
}
