//! # offhours-adapter-holidays-http
//!
//! Holiday source backed by a remote JSON document, one per year.
//!
//! The document maps ISO dates to holiday names:
//!
//! ```json
//! { "2026-01-01": "元日", "2026-01-12": "成人の日" }
//! ```
//!
//! The URL is a template whose `{year}` placeholder is replaced with the
//! requested year. The default points at the public Japanese holiday feed.
//!
//! ## Dependency rule
//!
//! Depends on `offhours-app` (port traits) and `offhours-domain` only.

mod error;

pub use error::HolidayError;

use std::time::Duration;

use offhours_app::ports::HolidaySource;
use offhours_domain::error::OffhoursError;
use offhours_domain::holiday::HolidayCalendar;

/// Placeholder substituted with the requested year.
pub const YEAR_PLACEHOLDER: &str = "{year}";
pub const DEFAULT_URL_TEMPLATE: &str = "https://holidays-jp.github.io/api/v1/{year}/date.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub url_template: String,
    /// Applies to the whole request, body included.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`HolidayError::MissingPlaceholder`] when the template has no
    /// `{year}`, or [`HolidayError::Http`] if the client cannot be built.
    pub fn build(self) -> Result<HttpHolidaySource, HolidayError> {
        if !self.url_template.contains(YEAR_PLACEHOLDER) {
            return Err(HolidayError::MissingPlaceholder(self.url_template));
        }
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(HttpHolidaySource {
            client,
            url_template: self.url_template,
        })
    }
}

/// [`HolidaySource`] fetching the yearly calendar over HTTP.
#[derive(Debug, Clone)]
pub struct HttpHolidaySource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpHolidaySource {
    /// Document URL for `year`.
    #[must_use]
    pub fn url_for(&self, year: i32) -> String {
        self.url_template
            .replace(YEAR_PLACEHOLDER, &year.to_string())
    }

    async fn fetch_calendar(&self, year: i32) -> Result<HolidayCalendar, HolidayError> {
        let url = self.url_for(year);
        tracing::debug!(%url, year, "fetching holiday calendar");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HolidayError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let calendar: HolidayCalendar = serde_json::from_str(&body)?;
        tracing::debug!(year, holidays = calendar.len(), "holiday calendar fetched");
        Ok(calendar)
    }
}

impl HolidaySource for HttpHolidaySource {
    async fn fetch(&self, year: i32) -> Result<HolidayCalendar, OffhoursError> {
        Ok(self.fetch_calendar(year).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use chrono::NaiveDate;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn source(base: &str, timeout: Duration) -> HttpHolidaySource {
        Config {
            url_template: format!("{base}/api/v1/{{year}}/date.json"),
            timeout,
        }
        .build()
        .unwrap()
    }

    async fn calendar(Path(year): Path<i32>) -> String {
        format!(r#"{{"{year}-01-01": "元日", "{year}-11-03": "文化の日"}}"#)
    }

    #[test]
    fn should_substitute_year_when_building_url() {
        let source = Config::default().build().unwrap();
        assert_eq!(
            source.url_for(2026),
            "https://holidays-jp.github.io/api/v1/2026/date.json"
        );
    }

    #[test]
    fn should_reject_template_when_placeholder_missing() {
        let result = Config {
            url_template: "https://example.com/holidays.json".to_string(),
            ..Config::default()
        }
        .build();
        assert!(matches!(result, Err(HolidayError::MissingPlaceholder(_))));
    }

    #[tokio::test]
    async fn should_fetch_calendar_for_requested_year() {
        let base = serve(Router::new().route("/api/v1/{year}/date.json", get(calendar))).await;
        let source = source(&base, Duration::from_secs(5));

        let calendar = source.fetch(2026).await.unwrap();

        assert_eq!(calendar.len(), 2);
        assert_eq!(
            calendar.holiday_on(NaiveDate::from_ymd_opt(2026, 11, 3).unwrap()),
            Some("文化の日")
        );
        assert_eq!(calendar.count_outside_year(2026), 0);
    }

    #[tokio::test]
    async fn should_return_upstream_error_when_status_is_not_success() {
        let base = serve(Router::new().route(
            "/api/v1/{year}/date.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        ))
        .await;
        let source = source(&base, Duration::from_secs(5));

        let err = source.fetch(2026).await.unwrap_err();

        match err {
            OffhoursError::Upstream {
                source_name,
                source,
            } => {
                assert_eq!(source_name, "holidays");
                assert!(source.to_string().contains("503"), "{source}");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_return_upstream_error_when_body_is_malformed() {
        let base = serve(Router::new().route(
            "/api/v1/{year}/date.json",
            get(|| async { r#"{"not-a-date": "x"}"# }),
        ))
        .await;
        let source = source(&base, Duration::from_secs(5));

        let err = source.fetch(2026).await.unwrap_err();

        assert!(matches!(err, OffhoursError::Upstream { .. }));
    }

    #[tokio::test]
    async fn should_report_decode_error_when_dates_are_invalid() {
        let base = serve(Router::new().route(
            "/api/v1/{year}/date.json",
            get(|| async { r#"{"2026-13-01": "nope"}"# }),
        ))
        .await;
        let source = source(&base, Duration::from_secs(5));

        let err = source.fetch_calendar(2026).await.unwrap_err();

        assert!(matches!(err, HolidayError::Decode(_)));
    }

    #[tokio::test]
    async fn should_return_upstream_error_when_server_is_too_slow() {
        let base = serve(Router::new().route(
            "/api/v1/{year}/date.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        ))
        .await;
        let source = source(&base, Duration::from_millis(100));

        let err = source.fetch(2026).await.unwrap_err();

        assert!(matches!(err, OffhoursError::Upstream { .. }));
    }
}
