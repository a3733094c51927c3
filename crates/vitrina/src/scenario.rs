//! Scenario orchestration: a bounded runner over a fresh driver handle.
//!
//! The runner wraps a flow in a scenario-level timeout (cancelling every
//! pending wait when it fires), attaches diagnostics to failures, and
//! leaves the remote session logged out on a best-effort basis. Retry
//! policy, if any, belongs to whoever invokes the runner, never to the
//! page components.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::driver::DriverHandle;
use crate::pages::auth::LOGOUT_LINK;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{PROBE_TIMEOUT, SCENARIO_TIMEOUT};

/// Diagnostics the runner attaches to a failed scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFailure {
    /// The failure, rendered
    pub error: String,
    /// URL of the tab when the failure surfaced
    pub last_url: Option<String>,
    /// Screenshot captured at failure time, if an artifacts dir was given
    pub screenshot: Option<PathBuf>,
}

/// Outcome of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Whether the flow returned `Ok`
    pub passed: bool,
    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
    /// Present iff the scenario failed
    pub failure: Option<ScenarioFailure>,
}

/// A named scenario with its time budget.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    timeout: std::time::Duration,
}

impl Scenario {
    /// Create a scenario with the default budget.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeout: SCENARIO_TIMEOUT,
        }
    }

    /// Override the time budget.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the flow against the given handle.
    ///
    /// The handle stays exclusive to this scenario. On failure the runner
    /// records the last URL and, when `artifacts` is given, a screenshot
    /// named after the scenario.
    pub async fn run<F, Fut>(
        &self,
        driver: DriverHandle,
        artifacts: Option<&Path>,
        flow: F,
    ) -> ScenarioReport
    where
        F: FnOnce(DriverHandle) -> Fut,
        Fut: Future<Output = VitrinaResult<()>>,
    {
        tracing::info!(scenario = %self.name, "starting");
        let started = Instant::now();

        let outcome = match tokio::time::timeout(self.timeout, flow(driver.clone())).await {
            Ok(result) => result,
            Err(_) => Err(VitrinaError::Timeout {
                waited_for: format!("scenario {:?}", self.name),
                ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let report = match outcome {
            Ok(()) => {
                tracing::info!(scenario = %self.name, elapsed_ms, "passed");
                ScenarioReport {
                    name: self.name.clone(),
                    passed: true,
                    elapsed_ms,
                    failure: None,
                }
            }
            Err(error) => {
                let failure = diagnose(&self.name, &driver, artifacts, &error).await;
                tracing::warn!(
                    scenario = %self.name,
                    elapsed_ms,
                    error = %failure.error,
                    "failed"
                );
                ScenarioReport {
                    name: self.name.clone(),
                    passed: false,
                    elapsed_ms,
                    failure: Some(failure),
                }
            }
        };

        leave_logged_out(&driver).await;
        report
    }
}

/// Capture failure context: last URL, and a screenshot when possible.
async fn diagnose(
    name: &str,
    driver: &DriverHandle,
    artifacts: Option<&Path>,
    error: &VitrinaError,
) -> ScenarioFailure {
    let last_url = driver.current_url().await.ok();

    let screenshot = if let Some(dir) = artifacts {
        let path = dir.join(format!("{}.png", artifact_stem(name)));
        match driver.screenshot(&path).await {
            Ok(()) => Some(path),
            Err(err) => {
                tracing::warn!(error = %err, "screenshot capture failed");
                None
            }
        }
    } else {
        None
    };

    ScenarioFailure {
        error: error.to_string(),
        last_url,
        screenshot,
    }
}

/// Best-effort teardown: the deployment is shared, so scenarios try to
/// finish logged out. Failure here is swallowed.
async fn leave_logged_out(driver: &DriverHandle) {
    if driver.probe_visible(LOGOUT_LINK, PROBE_TIMEOUT).await {
        if let Err(err) = driver.click(LOGOUT_LINK, PROBE_TIMEOUT).await {
            tracing::debug!(error = %err, "logout teardown skipped");
        }
    }
}

/// File stem safe for every filesystem the artifacts dir may sit on.
fn artifact_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn artifact_stem_replaces_awkward_characters() {
        assert_eq!(artifact_stem("guest checkout!"), "guest_checkout_");
        assert_eq!(artifact_stem("register_then_login"), "register_then_login");
    }

    #[test]
    fn scenario_builder_keeps_name_and_budget() {
        let scenario =
            Scenario::new("smoke").with_timeout(std::time::Duration::from_secs(30));
        assert_eq!(scenario.name(), "smoke");
        assert_eq!(scenario.timeout, std::time::Duration::from_secs(30));
    }

    #[test]
    fn report_serializes_for_the_json_output() {
        let report = ScenarioReport {
            name: "smoke".to_string(),
            passed: false,
            elapsed_ms: 1234,
            failure: Some(ScenarioFailure {
                error: "Assertion failed: cart should be empty".to_string(),
                last_url: Some("https://shop.example.com/cart.html".to_string()),
                screenshot: None,
            }),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"passed\":false"));
        assert!(json.contains("cart.html"));
    }
}
