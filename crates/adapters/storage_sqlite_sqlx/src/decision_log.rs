//! `SQLite` implementation of [`DecisionLog`].
//!
//! A report is stored as one `invocations` row plus one `decisions` row per
//! rule, written in a single transaction. Rules, operations and dispatch
//! statuses are kept as JSON columns; outcome and reason are plain labels so
//! they can be queried directly.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use offhours_app::ports::DecisionLog;
use offhours_domain::decision::{Decision, DispatchStatus, Outcome, ReasonCode};
use offhours_domain::error::OffhoursError;
use offhours_domain::id::InvocationId;
use offhours_domain::report::InvocationReport;
use offhours_domain::rule::{Operation, Rule};

use crate::error::StorageError;

const INSERT_INVOCATION: &str = r"
    INSERT INTO invocations (id, evaluated_at, local_time, snapshot_taken_at, dry_run, fired, skipped)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const INSERT_DECISION: &str = r"
    INSERT INTO decisions (invocation_id, position, rule_name, rule, outcome, reason, detail, operation, dispatch)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM invocations WHERE id = ?";
const SELECT_RECENT: &str = "SELECT * FROM invocations ORDER BY seq DESC LIMIT ?";
const SELECT_DECISIONS: &str =
    "SELECT * FROM decisions WHERE invocation_id = ? ORDER BY position ASC";

fn decode_err(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

/// Fixed-width UTC rendering, so stored instants sort as text.
fn utc_text(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_utc(value: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(decode_err)?
        .to_utc())
}

/// Serialize a unit-like enum to its bare label (`fire`, `ready_to_act`, …).
fn label<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(label) => Ok(label),
        other => Ok(other.to_string()),
    }
}

fn from_label<T: serde::de::DeserializeOwned>(label: &str) -> Result<T, sqlx::Error> {
    serde_json::from_value(serde_json::Value::String(label.to_string())).map_err(decode_err)
}

/// Invocation header, before its decisions are attached.
struct InvocationRow(InvocationReport);

impl<'r> FromRow<'r, SqliteRow> for InvocationRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let evaluated_at: String = row.try_get("evaluated_at")?;
        let local_time: String = row.try_get("local_time")?;
        let snapshot_taken_at: String = row.try_get("snapshot_taken_at")?;
        let dry_run: bool = row.try_get("dry_run")?;

        Ok(Self(InvocationReport {
            id: InvocationId::from_uuid(id),
            evaluated_at: parse_utc(&evaluated_at)?,
            local_time: DateTime::parse_from_rfc3339(&local_time).map_err(decode_err)?,
            snapshot_taken_at: parse_utc(&snapshot_taken_at)?,
            dry_run,
            decisions: Vec::new(),
        }))
    }
}

struct DecisionRow(Decision);

impl<'r> FromRow<'r, SqliteRow> for DecisionRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let rule: String = row.try_get("rule")?;
        let outcome: String = row.try_get("outcome")?;
        let reason: String = row.try_get("reason")?;
        let detail: String = row.try_get("detail")?;
        let operation: Option<String> = row.try_get("operation")?;
        let dispatch: String = row.try_get("dispatch")?;

        let rule: Rule = serde_json::from_str(&rule).map_err(decode_err)?;
        let outcome: Outcome = from_label(&outcome)?;
        let reason: ReasonCode = from_label(&reason)?;
        let operation: Option<Operation> = operation
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(decode_err)?;
        let dispatch: DispatchStatus = serde_json::from_str(&dispatch).map_err(decode_err)?;

        Ok(Self(Decision {
            rule,
            outcome,
            reason,
            detail,
            operation,
            dispatch,
        }))
    }
}

/// `SQLite`-backed decision log.
pub struct SqliteDecisionLog {
    pool: SqlitePool,
}

impl SqliteDecisionLog {
    /// Create a new decision log using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert(&self, report: &InvocationReport) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(INSERT_INVOCATION)
            .bind(report.id.as_uuid())
            .bind(utc_text(report.evaluated_at))
            .bind(report.local_time.to_rfc3339_opts(SecondsFormat::Nanos, true))
            .bind(utc_text(report.snapshot_taken_at))
            .bind(report.dry_run)
            .bind(i64::try_from(report.fired()).unwrap_or(i64::MAX))
            .bind(i64::try_from(report.skipped()).unwrap_or(i64::MAX))
            .execute(&mut *tx)
            .await?;

        for (position, decision) in report.decisions.iter().enumerate() {
            let operation = decision
                .operation
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;
            sqlx::query(INSERT_DECISION)
                .bind(report.id.as_uuid())
                .bind(i64::try_from(position).unwrap_or(i64::MAX))
                .bind(&decision.rule.name)
                .bind(serde_json::to_string(&decision.rule)?)
                .bind(label(&decision.outcome)?)
                .bind(label(&decision.reason)?)
                .bind(&decision.detail)
                .bind(operation)
                .bind(serde_json::to_string(&decision.dispatch)?)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn attach_decisions(
        &self,
        InvocationRow(mut report): InvocationRow,
    ) -> Result<InvocationReport, StorageError> {
        let rows: Vec<DecisionRow> = sqlx::query_as(SELECT_DECISIONS)
            .bind(report.id.as_uuid())
            .fetch_all(&self.pool)
            .await?;
        report.decisions = rows.into_iter().map(|row| row.0).collect();
        Ok(report)
    }
}

impl DecisionLog for SqliteDecisionLog {
    async fn record(&self, report: &InvocationReport) -> Result<(), OffhoursError> {
        self.insert(report).await?;
        tracing::debug!(invocation = %report.id, decisions = report.decisions.len(), "invocation recorded");
        Ok(())
    }

    async fn get_by_id(&self, id: InvocationId) -> Result<Option<InvocationReport>, OffhoursError> {
        let row: Option<InvocationRow> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        match row {
            Some(row) => Ok(Some(self.attach_decisions(row).await?)),
            None => Ok(None),
        }
    }

    async fn recent(&self, limit: usize) -> Result<Vec<InvocationReport>, OffhoursError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<InvocationRow> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let mut reports = Vec::with_capacity(rows.len());
        for row in rows {
            reports.push(self.attach_decisions(row).await?);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use chrono::{FixedOffset, TimeZone};
    use offhours_domain::decision::Reason;
    use offhours_domain::resource::ResourceStatus;
    use offhours_domain::rule::{Declared, PowerAction, ResourceKind, WeekdaySet};

    async fn setup() -> SqliteDecisionLog {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDecisionLog::new(db.pool().clone())
    }

    fn rule(name: &str, kind: Declared<ResourceKind>) -> Rule {
        Rule::builder()
            .name(name)
            .kind(kind)
            .resource_id("i-office")
            .action(PowerAction::Start)
            .at(8, 0)
            .weekdays(WeekdaySet::WORKDAYS)
            .build()
            .unwrap()
    }

    fn report(minute: u32) -> InvocationReport {
        let local_time = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 21, 8, minute, 0)
            .unwrap();
        let evaluated_at = local_time.to_utc();

        let office = rule("office", ResourceKind::Ec2.into());
        let mut fired = Decision::new(
            &office,
            &Reason::ReadyToAct {
                operation: office.operation().unwrap(),
                status: ResourceStatus::Stopped,
            },
        );
        fired.dispatch = DispatchStatus::Failed {
            error: "dispatch to i-office failed: throttled".to_string(),
        };
        let unknown = rule("database", Declared::Unrecognized("rds".to_string()));
        let skipped = Decision::new(&unknown, &Reason::UnrecognizedConfiguration);

        InvocationReport {
            id: InvocationId::new(),
            evaluated_at,
            local_time,
            snapshot_taken_at: evaluated_at,
            dry_run: false,
            decisions: vec![fired, skipped],
        }
    }

    #[tokio::test]
    async fn should_record_and_retrieve_report_by_id() {
        let log = setup().await;
        let report = report(2);

        log.record(&report).await.unwrap();

        let fetched = log.get_by_id(report.id).await.unwrap().unwrap();
        assert_eq!(fetched, report);
        assert_eq!(fetched.local_time.offset().local_minus_utc(), 9 * 3600);
    }

    #[tokio::test]
    async fn should_keep_decision_order_when_reading_back() {
        let log = setup().await;
        let report = report(2);

        log.record(&report).await.unwrap();

        let fetched = log.get_by_id(report.id).await.unwrap().unwrap();
        let names: Vec<_> = fetched.decisions.iter().map(|d| d.rule.name.as_str()).collect();
        assert_eq!(names, vec!["office", "database"]);
        assert_eq!(fetched.decisions[1].reason, ReasonCode::UnrecognizedConfiguration);
        assert_eq!(
            fetched.decisions[1].rule.kind,
            Declared::Unrecognized("rds".to_string())
        );
    }

    #[tokio::test]
    async fn should_return_none_when_report_not_found() {
        let log = setup().await;
        let result = log.get_by_id(InvocationId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_recent_newest_first_when_limited() {
        let log = setup().await;
        let (first, second, third) = (report(0), report(5), report(10));
        for report in [&first, &second, &third] {
            log.record(report).await.unwrap();
        }

        let recent = log.recent(2).await.unwrap();

        let ids: Vec<_> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![third.id, second.id]);
    }

    #[tokio::test]
    async fn should_reject_duplicate_invocation_id() {
        let log = setup().await;
        let report = report(2);
        log.record(&report).await.unwrap();

        let err = log.record(&report).await.unwrap_err();

        assert!(matches!(err, OffhoursError::Storage(_)));
        let stored: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM decisions")
            .fetch_one(&log.pool)
            .await
            .unwrap();
        assert_eq!(stored.0, 2);
    }

    #[test]
    fn should_render_labels_without_quotes() {
        assert_eq!(label(&Outcome::Fire).unwrap(), "fire");
        assert_eq!(label(&ReasonCode::ReadyToAct).unwrap(), "ready_to_act");
        assert_eq!(from_label::<ReasonCode>("holiday_cancelled").unwrap(), ReasonCode::HolidayCancelled);
    }
}
