use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::AppResult,
    application::use_cases::waitlist::{InsertedEntry, Pagination, WaitlistRepo},
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

const SELECT_COLUMNS: &str = r#"id, document_type, document_number, country_code, phone_number,
    first_name, last_name, email, city, referral, accepts_terms, registration_ip, created_at"#;

#[derive(sqlx::FromRow)]
struct InsertedRow {
    #[sqlx(flatten)]
    entry: WaitlistEntry,
    position: i64,
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<InsertedEntry> {
        // The subquery reads the snapshot taken before the insert, hence the + 1.
        let rec = sqlx::query_as::<_, InsertedRow>(&format!(
            r#"WITH inserted AS (
                   INSERT INTO waitlist (document_type, document_number, country_code, phone_number,
                       first_name, last_name, email, city, referral, accepts_terms, registration_ip)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                   RETURNING {SELECT_COLUMNS}
               )
               SELECT inserted.*,
                      (SELECT COUNT(*) FROM waitlist WHERE id < inserted.id) + 1 AS position
               FROM inserted"#
        ))
        .bind(entry.document_type)
        .bind(entry.document_number)
        .bind(entry.country_code)
        .bind(entry.phone_number)
        .bind(entry.first_name)
        .bind(entry.last_name)
        .bind(entry.email)
        .bind(entry.city)
        .bind(entry.referral)
        .bind(entry.accepts_terms)
        .bind(entry.registration_ip)
        .fetch_one(&self.pool)
        .await?;

        Ok(InsertedEntry {
            entry: rec.entry,
            position: rec.position,
        })
    }

    async fn list(&self, page: Pagination) -> AppResult<Vec<WaitlistEntry>> {
        let recs = sqlx::query_as::<_, WaitlistEntry>(&format!(
            r#"SELECT {SELECT_COLUMNS}
               FROM waitlist
               ORDER BY id ASC
               OFFSET $1 LIMIT $2"#
        ))
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(recs)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waitlist")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<WaitlistEntry>> {
        let rec = sqlx::query_as::<_, WaitlistEntry>(&format!(
            "SELECT {SELECT_COLUMNS} FROM waitlist WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM waitlist WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM waitlist WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
