//! Feedback repository: CRUD, filtered listing, and per-status counts.

use async_trait::async_trait;

use fb_core::entities::{FeedbackItem, NewFeedback};
use fb_core::enums::FeedbackStatus;
use fb_core::query::FeedbackQuery;
use fb_core::responses::StatusCount;

use crate::FeedbackDb;
use crate::error::DatabaseError;
use crate::helpers::{count_from_i64, format_datetime, now, parse_datetime, parse_enum};
use crate::store::FeedbackStore;

const SELECT_COLS: &str = "id, title, description, status, created_at, updated_at";

fn row_to_feedback(row: &libsql::Row) -> Result<FeedbackItem, DatabaseError> {
    Ok(FeedbackItem {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// WHERE clause and its positional parameters for a listing query.
fn filter_clause(query: &FeedbackQuery) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(status) = query.status {
        params.push(libsql::Value::Text(status.as_str().to_string()));
        conditions.push(format!("status = ?{}", params.len()));
    }
    if let Some(term) = query.search_term() {
        params.push(libsql::Value::Text(term.to_string()));
        let idx = params.len();
        conditions.push(format!(
            "(instr(lower(title), lower(?{idx})) > 0 OR instr(lower(description), lower(?{idx})) > 0)"
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, params)
}

fn to_sql_int<T>(n: T, what: &str) -> Result<i64, DatabaseError>
where
    i64: TryFrom<T>,
{
    i64::try_from(n).map_err(|_| DatabaseError::InvalidState(format!("{what} out of range")))
}

impl FeedbackDb {
    async fn get_feedback(&self, id: &str) -> Result<FeedbackItem, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM feedback WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_feedback(&row)
    }

    async fn insert_feedback(&self, input: &NewFeedback) -> Result<FeedbackItem, DatabaseError> {
        let now = now();
        let id = self.generate_id().await?;
        let stamp = format_datetime(&now);

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO feedback ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                ),
                libsql::params![
                    id.as_str(),
                    input.title(),
                    input.description(),
                    FeedbackStatus::Open.as_str(),
                    stamp.as_str(),
                    stamp.as_str()
                ],
            )
            .await?;

        Ok(FeedbackItem {
            id,
            title: input.title().to_string(),
            description: input.description().to_string(),
            status: FeedbackStatus::Open,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_feedback(&self, item: &FeedbackItem) -> Result<FeedbackItem, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE feedback SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![
                    item.status.as_str(),
                    format_datetime(&item.updated_at),
                    item.id.as_str()
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_feedback(&item.id).await
    }

    async fn remove_feedback(&self, id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .conn()
            .execute("DELETE FROM feedback WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    async fn list_feedback(
        &self,
        query: &FeedbackQuery,
    ) -> Result<(Vec<FeedbackItem>, u64), DatabaseError> {
        let (where_clause, params) = filter_clause(query);

        let mut rows = self
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM feedback {where_clause}"),
                libsql::params_from_iter(params.clone()),
            )
            .await?;
        let total = match rows.next().await? {
            Some(row) => count_from_i64(row.get::<i64>(0)?)?,
            None => 0,
        };

        let dir = query.sort_order.as_sql();
        let mut page_params = params;
        page_params.push(libsql::Value::Integer(to_sql_int(query.limit, "limit")?));
        let limit_idx = page_params.len();
        page_params.push(libsql::Value::Integer(to_sql_int(query.offset(), "offset")?));
        let offset_idx = page_params.len();

        let sql = format!(
            "SELECT {SELECT_COLS} FROM feedback {where_clause}
             ORDER BY {col} {dir}, id {dir}
             LIMIT ?{limit_idx} OFFSET ?{offset_idx}",
            col = query.sort_by.column(),
        );
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(page_params))
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_feedback(&row)?);
        }
        Ok((items, total))
    }

    async fn status_counts(&self) -> Result<Vec<StatusCount>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT status, COUNT(*) FROM feedback GROUP BY status",
                (),
            )
            .await?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next().await? {
            counts.push(StatusCount {
                status: parse_enum(&row.get::<String>(0)?)?,
                count: count_from_i64(row.get::<i64>(1)?)?,
            });
        }
        Ok(counts)
    }

    async fn select_one(&self) -> Result<(), DatabaseError> {
        let mut rows = self.conn().query("SELECT 1", ()).await?;
        rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for FeedbackDb {
    async fn find_by_id(&self, id: &str) -> Result<FeedbackItem, DatabaseError> {
        self.bounded(self.get_feedback(id)).await
    }

    async fn create(&self, input: &NewFeedback) -> Result<FeedbackItem, DatabaseError> {
        self.bounded(self.insert_feedback(input)).await
    }

    async fn save(&self, item: &FeedbackItem) -> Result<FeedbackItem, DatabaseError> {
        self.bounded(self.update_feedback(item)).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DatabaseError> {
        self.bounded(self.remove_feedback(id)).await
    }

    async fn list(
        &self,
        query: &FeedbackQuery,
    ) -> Result<(Vec<FeedbackItem>, u64), DatabaseError> {
        self.bounded(self.list_feedback(query)).await
    }

    async fn count_by_status(&self) -> Result<Vec<StatusCount>, DatabaseError> {
        self.bounded(self.status_counts()).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.bounded(self.select_one()).await
    }
}
