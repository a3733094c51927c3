//! Authentication: registration, login, logout, session-state probes
//! (`AnonymousLoggedOut -> ModalOpen -> LoggedIn | RejectedWithDialog`).
//!
//! Registration and login both end in a native alert on the rejection
//! path, so both arm a one-shot observer before submitting. Rejections are
//! data, not errors: a duplicate username and a wrong password are valid
//! test subjects.

use crate::driver::DriverHandle;
use crate::fixture::messages;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{DIALOG_TIMEOUT, PROBE_TIMEOUT, STANDARD_TIMEOUT};

const LOGIN_MODAL: &str = "#logInModal";
const LOGIN_USERNAME: &str = "#loginusername";
const LOGIN_PASSWORD: &str = "#loginpassword";
const LOGIN_SUBMIT: &str = "button[onclick='logIn()']";

const SIGNUP_MODAL: &str = "#signInModal";
const SIGNUP_USERNAME: &str = "#sign-username";
const SIGNUP_PASSWORD: &str = "#sign-password";
const SIGNUP_SUBMIT: &str = "button[onclick='register()']";

const LOGIN_LINK: &str = "#login2";
const WELCOME_BANNER: &str = "#nameofuser";

pub(crate) const LOGOUT_LINK: &str = "#logout2";

/// How the remote application answered a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The success alert fired; text attached.
    Accepted(String),
    /// Any other alert (e.g. the username is taken); text attached.
    Rejected(String),
}

impl RegisterOutcome {
    /// Whether registration went through.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The alert text, either way.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Accepted(text) | Self::Rejected(text) => text,
        }
    }
}

/// Classify a registration alert by the fixed success substring.
pub(crate) fn classify_registration(message: String) -> RegisterOutcome {
    if message.contains(messages::SIGNUP_OK) {
        RegisterOutcome::Accepted(message)
    } else {
        RegisterOutcome::Rejected(message)
    }
}

/// How a login attempt ended.
///
/// Absence of the logged-in landmark is a state for the caller to assert
/// on, never an error at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Whether the logged-in landmark appeared
    pub logged_in: bool,
    /// Rejection alert text, if one fired (wrong password, unknown user)
    pub rejection: Option<String>,
}

/// The login/signup modals and session state.
#[derive(Debug, Clone)]
pub struct AuthPage {
    driver: DriverHandle,
}

impl AuthPage {
    /// Bind the page to a driver handle.
    #[must_use]
    pub fn new(driver: DriverHandle) -> Self {
        Self { driver }
    }

    /// Register an account through the already-open signup modal.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::PreconditionFailed`] if the modal is not
    /// open, or [`VitrinaError::DialogTimeout`] if no alert answers the
    /// submission. A rejected registration is an `Ok` outcome.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> VitrinaResult<RegisterOutcome> {
        if !self.driver.probe_visible(SIGNUP_MODAL, PROBE_TIMEOUT).await {
            return Err(VitrinaError::PreconditionFailed {
                message: "signup modal is not open".to_string(),
            });
        }

        self.driver
            .fill(SIGNUP_USERNAME, username, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(SIGNUP_PASSWORD, password, STANDARD_TIMEOUT)
            .await?;

        let observer = self.driver.expect_dialog().await?;
        self.driver.click(SIGNUP_SUBMIT, STANDARD_TIMEOUT).await?;
        let dialog = observer.accept(DIALOG_TIMEOUT).await?;

        let outcome = classify_registration(dialog.message);
        tracing::debug!(username, accepted = outcome.is_accepted(), "registration");
        Ok(outcome)
    }

    /// Sign in through the already-open login modal.
    ///
    /// An observer is armed before submitting because bad credentials raise
    /// a native alert that would otherwise wedge the page; its text comes
    /// back in the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::PreconditionFailed`] if the modal is not
    /// open. Failing to reach the logged-in state is an `Ok` outcome.
    pub async fn login(&self, username: &str, password: &str) -> VitrinaResult<LoginOutcome> {
        if !self.driver.probe_visible(LOGIN_MODAL, PROBE_TIMEOUT).await {
            return Err(VitrinaError::PreconditionFailed {
                message: "login modal is not open".to_string(),
            });
        }

        self.driver
            .fill(LOGIN_USERNAME, username, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(LOGIN_PASSWORD, password, STANDARD_TIMEOUT)
            .await?;

        let observer = self.driver.expect_dialog().await?;
        self.driver.click(LOGIN_SUBMIT, STANDARD_TIMEOUT).await?;

        if self
            .driver
            .probe_visible(WELCOME_BANNER, PROBE_TIMEOUT)
            .await
        {
            // Landmark reached; the unused observer deregisters on drop.
            return Ok(LoginOutcome {
                logged_in: true,
                rejection: None,
            });
        }

        match observer.accept(PROBE_TIMEOUT).await {
            Ok(dialog) => Ok(LoginOutcome {
                logged_in: false,
                rejection: Some(dialog.message),
            }),
            Err(VitrinaError::DialogTimeout { .. }) => Ok(LoginOutcome {
                logged_in: false,
                rejection: None,
            }),
            Err(err) => Err(err),
        }
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::PreconditionFailed`] when called without a
    /// logged-in session; logging out twice is a caller bug, not a no-op.
    pub async fn logout(&self) -> VitrinaResult<()> {
        if !self.is_logged_in().await {
            return Err(VitrinaError::PreconditionFailed {
                message: "logout requires a logged-in session".to_string(),
            });
        }
        self.driver.click(LOGOUT_LINK, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_visible(LOGIN_LINK, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Whether a session is signed in. Bounded probe; `false` on timeout.
    pub async fn is_logged_in(&self) -> bool {
        self.driver.probe_visible(LOGOUT_LINK, PROBE_TIMEOUT).await
    }

    /// The welcome banner text, if a session is signed in.
    pub async fn logged_in_user(&self) -> Option<String> {
        if self
            .driver
            .probe_visible(WELCOME_BANNER, PROBE_TIMEOUT)
            .await
        {
            self.driver.text(WELCOME_BANNER, PROBE_TIMEOUT).await.ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn success_alert_classifies_as_accepted() {
        let outcome = classify_registration("Sign up successful.".to_string());
        assert!(outcome.is_accepted());
        assert_eq!(outcome.text(), "Sign up successful.");
    }

    #[test]
    fn any_other_alert_classifies_as_rejected() {
        let outcome = classify_registration("This user already exist.".to_string());
        assert!(!outcome.is_accepted());
        assert!(outcome.text().contains(fixture::messages::USER_EXISTS));
    }

    #[test]
    fn rejection_alerts_match_the_fixture_pattern() {
        let pattern = fixture::login_rejection();
        let rejected = LoginOutcome {
            logged_in: false,
            rejection: Some("Wrong password.".to_string()),
        };
        assert!(pattern.is_match(rejected.rejection.as_deref().unwrap()));
    }
}
