//! Scheduler: runs one invocation of the decision engine end to end.
//!
//! An invocation fetches its inputs concurrently (holiday calendar, EC2
//! listing, Lightsail listing), evaluates every rule against that single
//! snapshot, dispatches the fire decisions and records the report. An
//! upstream failure aborts the whole invocation before any decision is made.
//! Dispatch failures and decision-log failures never do.

use std::time::Duration;

use chrono::{Datelike, TimeZone};
use futures::future::join_all;
use offhours_domain::decision::{Decision, DispatchStatus, ReasonCode};
use offhours_domain::engine;
use offhours_domain::error::OffhoursError;
use offhours_domain::id::InvocationId;
use offhours_domain::report::InvocationReport;
use offhours_domain::resource::ResourceSnapshot;
use offhours_domain::rule::{Operation, PowerAction, ResourceKind, Rule};
use offhours_domain::time::{self, Timestamp};

use crate::ports::{DecisionLog, Ec2Provider, HolidaySource, LightsailProvider};

/// Default upper bound for a single start/stop command.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Knobs for how fire decisions are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub dispatch_timeout: Duration,
    /// Evaluate without dispatching when no explicit mode is requested.
    pub dry_run: bool,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
            dry_run: false,
        }
    }
}

/// Evaluates the rule set in the operating timezone and acts on the result.
pub struct Scheduler<H, E, L, D, Tz: TimeZone> {
    holidays: H,
    ec2: E,
    lightsail: L,
    log: D,
    timezone: Tz,
    rules: Vec<Rule>,
    settings: SchedulerSettings,
}

impl<H, E, L, D, Tz> Scheduler<H, E, L, D, Tz>
where
    H: HolidaySource + Send + Sync,
    E: Ec2Provider + Send + Sync,
    L: LightsailProvider + Send + Sync,
    D: DecisionLog + Send + Sync,
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    /// Create a scheduler with no rules and default settings.
    pub fn new(holidays: H, ec2: E, lightsail: L, log: D, timezone: Tz) -> Self {
        Self {
            holidays,
            ec2,
            lightsail,
            log,
            timezone,
            rules: Vec::new(),
            settings: SchedulerSettings::default(),
        }
    }

    /// Replace the rule set after validating every rule.
    ///
    /// # Errors
    ///
    /// Returns [`OffhoursError::Validation`] for the first invalid rule.
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Result<Self, OffhoursError> {
        for rule in &rules {
            rule.validate()?;
        }
        self.rules = rules;
        Ok(self)
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SchedulerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn settings(&self) -> SchedulerSettings {
        self.settings
    }

    /// Run an invocation for the current instant using the configured
    /// dry-run mode.
    ///
    /// # Errors
    ///
    /// See [`Scheduler::run_at`].
    pub async fn run_now(&self) -> Result<InvocationReport, OffhoursError> {
        self.run_at(time::now(), self.settings.dry_run).await
    }

    /// Run an invocation as if it were `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`OffhoursError::Upstream`] when the holiday calendar or a
    /// provider listing cannot be fetched. No decision is made in that case.
    #[tracing::instrument(skip(self), fields(rules = self.rules.len()))]
    pub async fn run_at(
        &self,
        instant: Timestamp,
        dry_run: bool,
    ) -> Result<InvocationReport, OffhoursError> {
        let id = InvocationId::new();
        let now = instant.with_timezone(&self.timezone);
        let year = now.year();

        let (calendar, ec2, lightsail) = tokio::try_join!(
            self.holidays.fetch(year),
            self.ec2.describe_instances(),
            self.lightsail.get_resources(),
        )
        .inspect_err(|err| {
            tracing::error!(invocation = %id, error = %err.with_sources(), "invocation aborted");
        })?;

        let outside = calendar.count_outside_year(year);
        if outside > 0 {
            tracing::warn!(year, outside, "holiday calendar has dates outside the requested year");
        }

        let snapshot = ResourceSnapshot::new(ec2.into(), lightsail.into(), time::now());
        let mut decisions = engine::evaluate(&now, &self.rules, &calendar, &snapshot);

        if dry_run {
            for decision in decisions.iter_mut().filter(|d| d.is_fire()) {
                decision.dispatch = DispatchStatus::DryRun;
            }
        } else {
            self.dispatch_all(&mut decisions).await;
        }

        for decision in &decisions {
            log_decision(decision);
        }

        let report = InvocationReport {
            id,
            evaluated_at: instant,
            local_time: now.fixed_offset(),
            snapshot_taken_at: snapshot.taken_at,
            dry_run,
            decisions,
        };
        tracing::info!(
            invocation = %report.id,
            local_time = %report.local_time,
            fired = report.fired(),
            skipped = report.skipped(),
            dispatch_failures = report.dispatch_failures(),
            dry_run,
            "invocation complete"
        );

        if let Err(err) = self.log.record(&report).await {
            tracing::warn!(invocation = %report.id, error = %err.with_sources(), "failed to record invocation");
        }

        Ok(report)
    }

    /// Dispatch every fire decision concurrently and store the outcome.
    async fn dispatch_all(&self, decisions: &mut [Decision]) {
        let statuses = join_all(decisions.iter().map(|decision| async move {
            match decision.operation {
                Some(operation) => Some(self.dispatch(operation, &decision.rule.resource_id).await),
                None => None,
            }
        }))
        .await;

        for (decision, status) in decisions.iter_mut().zip(statuses) {
            if let Some(status) = status {
                decision.dispatch = status;
            }
        }
    }

    async fn dispatch(&self, operation: Operation, resource_id: &str) -> DispatchStatus {
        let command = async {
            match (operation.kind, operation.action) {
                (ResourceKind::Ec2, PowerAction::Start) => self.ec2.start_instance(resource_id).await,
                (ResourceKind::Ec2, PowerAction::Stop) => self.ec2.stop_instance(resource_id).await,
                (ResourceKind::Lightsail, PowerAction::Start) => {
                    self.lightsail.start_instance(resource_id).await
                }
                (ResourceKind::Lightsail, PowerAction::Stop) => {
                    self.lightsail.stop_instance(resource_id).await
                }
            }
        };

        match tokio::time::timeout(self.settings.dispatch_timeout, command).await {
            Ok(Ok(())) => DispatchStatus::Acknowledged,
            Ok(Err(err)) => {
                let error = err.with_sources();
                tracing::warn!(%operation, resource_id, error = %error, "dispatch failed");
                DispatchStatus::Failed { error }
            }
            Err(_) => {
                tracing::warn!(
                    %operation,
                    resource_id,
                    timeout_ms = u64::try_from(self.settings.dispatch_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                    "dispatch timed out"
                );
                DispatchStatus::TimedOut
            }
        }
    }
}

fn log_decision(decision: &Decision) {
    let rule = decision.rule.name.as_str();
    match decision.reason {
        ReasonCode::ReadyToAct => tracing::info!(
            rule,
            outcome = %decision.outcome,
            reason = %decision.reason,
            detail = %decision.detail,
            dispatch = %decision.dispatch,
            "rule evaluated"
        ),
        ReasonCode::ResourceNotFound | ReasonCode::UnrecognizedConfiguration => tracing::warn!(
            rule,
            outcome = %decision.outcome,
            reason = %decision.reason,
            detail = %decision.detail,
            "rule evaluated"
        ),
        _ => tracing::debug!(
            rule,
            outcome = %decision.outcome,
            reason = %decision.reason,
            detail = %decision.detail,
            "rule evaluated"
        ),
    }
}
