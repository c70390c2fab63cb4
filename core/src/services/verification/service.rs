//! Verification session state machine

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use recovery_shared::{CooldownResetPolicy, GuardConfig, OtpConfig, RecoveryConfig};
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::entities::{AttemptState, FocusIntent, OtpDigits, CODE_LENGTH};
use crate::errors::{
    DigitError, ErrorNormalizer, NormalizedError, RawError, ResendError, SubmitError,
};
use crate::services::cooldown::{CooldownState, CooldownTicker};
use crate::services::submission_guard::SubmissionGuard;

use super::traits::VerificationTransport;
use super::types::{ContinuationToken, OtpSnapshot, ResendOutcome};

/// One verification challenge: `Entering -> Submitting -> Verified | Failed`.
///
/// `Failed` behaves like `Entering` for the next submit or resend. `Verified`
/// is terminal. Operations take `&mut self`, so at most one submit or resend
/// is outstanding per session. Submit and resend each sit behind their own
/// [`SubmissionGuard`]; a repeat inside the window is dropped.
pub struct OtpVerification<T: VerificationTransport> {
    session_id: Uuid,
    transport: Arc<T>,
    config: OtpConfig,
    normalizer: ErrorNormalizer,
    digits: OtpDigits,
    state: AttemptState,
    cooldown: CooldownTicker,
    submit_guard: SubmissionGuard,
    resend_guard: SubmissionGuard,
    last_error: Option<NormalizedError>,
    failed_attempts: u32,
    token: Option<ContinuationToken>,
}

impl<T: VerificationTransport> OtpVerification<T> {
    /// Open a session for a code that was just sent; the resend cooldown
    /// starts counting immediately. Must be called within a Tokio runtime.
    pub fn new(
        transport: Arc<T>,
        config: OtpConfig,
        guard: &GuardConfig,
        normalizer: ErrorNormalizer,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let cooldown = CooldownTicker::start(config.resend_cooldown_seconds);

        tracing::info!(
            session_id = %session_id,
            resend_cooldown_seconds = config.resend_cooldown_seconds,
            guard_interval_ms = guard.min_interval_ms,
            event = "otp_session_started",
            "Verification session started"
        );

        Self {
            session_id,
            transport,
            config,
            normalizer,
            digits: OtpDigits::new(),
            state: AttemptState::Entering,
            cooldown,
            submit_guard: SubmissionGuard::from_config(guard),
            resend_guard: SubmissionGuard::from_config(guard),
            last_error: None,
            failed_attempts: 0,
            token: None,
        }
    }

    pub fn from_config(transport: Arc<T>, config: &RecoveryConfig) -> Self {
        Self::new(
            transport,
            config.otp.clone(),
            &config.guard,
            ErrorNormalizer::from_config(config),
        )
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn cooldown(&self) -> CooldownState {
        self.cooldown.state()
    }

    /// Cooldown updates for rendering the countdown
    pub fn subscribe_cooldown(&self) -> watch::Receiver<CooldownState> {
        self.cooldown.subscribe()
    }

    pub fn token(&self) -> Option<&ContinuationToken> {
        self.token.as_ref()
    }

    pub fn last_error(&self) -> Option<&NormalizedError> {
        self.last_error.as_ref()
    }

    pub fn snapshot(&self) -> OtpSnapshot {
        OtpSnapshot {
            digits: self.digits.slots(),
            state: self.state,
            cooldown: self.cooldown.state(),
            last_error: self.last_error.clone(),
            failed_attempts: self.failed_attempts,
        }
    }

    /// Enter a character at `index`; see [`OtpDigits::set`]
    pub fn set_digit(&mut self, index: usize, input: &str) -> Result<FocusIntent, DigitError> {
        self.ensure_open()?;
        self.digits.set(index, input)
    }

    /// Empty the slot at `index`
    pub fn clear_digit(&mut self, index: usize) -> Result<FocusIntent, DigitError> {
        self.ensure_open()?;
        self.digits.clear_at(index)
    }

    /// Backspace pressed on slot `index`; only yields a focus intent
    pub fn handle_backspace(&self, index: usize) -> Result<FocusIntent, DigitError> {
        self.digits.backspace(index)
    }

    /// Fill every slot from a pasted code
    pub fn paste_code(&mut self, input: &str) -> Result<FocusIntent, DigitError> {
        self.ensure_open()?;
        self.digits.paste(input)
    }

    /// Send the entered code to the verifier.
    ///
    /// An incomplete entry fails without contacting the verifier. A complete
    /// entry arriving inside the guard window is dropped. A rejection leaves
    /// the session in `Failed` with the normalized error recorded.
    pub async fn submit(&mut self) -> Result<ContinuationToken, SubmitError> {
        if !self.state.accepts_requests() {
            return Err(if self.state.is_terminal() {
                SubmitError::AlreadyVerified
            } else {
                SubmitError::InFlight
            });
        }

        let Some(code) = self.digits.code() else {
            let filled = self.digits.filled();
            tracing::debug!(
                session_id = %self.session_id,
                filled = filled,
                event = "otp_submit_incomplete",
                "Submission blocked until every slot holds a digit"
            );
            return Err(SubmitError::ValidationFailed {
                filled,
                expected: CODE_LENGTH,
            });
        };

        if !self.submit_guard.try_accept() {
            return Err(SubmitError::Dropped);
        }

        tracing::info!(
            session_id = %self.session_id,
            code_length = code.len(),
            event = "otp_submitted",
            "Submitting verification code"
        );

        let deadline = self.request_timeout();
        let transport = Arc::clone(&self.transport);
        let in_flight = InFlight::begin(&mut self.state);
        let result = with_deadline(deadline, transport.verify(&code)).await;

        match result {
            Ok(token) => {
                in_flight.settle(AttemptState::Verified);
                self.cooldown.cancel();
                self.last_error = None;
                self.token = Some(token.clone());

                tracing::info!(
                    session_id = %self.session_id,
                    event = "otp_verified",
                    "Verification code accepted"
                );
                Ok(token)
            }
            Err(raw) => {
                in_flight.settle(AttemptState::Failed);
                let error = self.normalizer.normalize(&raw);
                self.failed_attempts += 1;
                self.last_error = Some(error.clone());

                tracing::warn!(
                    session_id = %self.session_id,
                    category = %error.category,
                    failed_attempts = self.failed_attempts,
                    event = "otp_verification_failed",
                    "Verification code rejected"
                );
                Err(SubmitError::Rejected(error))
            }
        }
    }

    /// Request a fresh code.
    ///
    /// Does nothing while the cooldown is counting or inside the guard
    /// window. Once the request completes every slot is cleared; the cooldown
    /// restarts according to [`CooldownResetPolicy`].
    pub async fn resend(&mut self) -> Result<ResendOutcome, ResendError> {
        if !self.state.accepts_requests() {
            return Err(if self.state.is_terminal() {
                ResendError::AlreadyVerified
            } else {
                ResendError::InFlight
            });
        }

        let cooldown = self.cooldown.state();
        if !cooldown.can_resend {
            tracing::debug!(
                session_id = %self.session_id,
                remaining_seconds = cooldown.remaining_seconds,
                event = "otp_resend_skipped",
                "Resend requested during cooldown"
            );
            return Ok(ResendOutcome::CoolingDown {
                remaining_seconds: cooldown.remaining_seconds,
            });
        }

        if !self.resend_guard.try_accept() {
            return Ok(ResendOutcome::Dropped);
        }

        let result = with_deadline(self.request_timeout(), self.transport.resend()).await;

        self.digits.clear();
        self.state = AttemptState::Entering;

        match result {
            Ok(()) => {
                self.cooldown.restart();
                self.last_error = None;

                tracing::info!(
                    session_id = %self.session_id,
                    event = "otp_resent",
                    "Verification code resent"
                );
                Ok(ResendOutcome::Sent)
            }
            Err(raw) => {
                let error = self.normalizer.normalize(&raw);
                if self.config.cooldown_reset_policy == CooldownResetPolicy::OnCompletion {
                    self.cooldown.restart();
                }
                self.last_error = Some(error.clone());

                tracing::warn!(
                    session_id = %self.session_id,
                    category = %error.category,
                    event = "otp_resend_failed",
                    "Failed to resend verification code"
                );
                Err(ResendError::Rejected(error))
            }
        }
    }

    /// Close the session and stop the cooldown task
    pub fn end(mut self) {
        self.cooldown.cancel();
        tracing::info!(
            session_id = %self.session_id,
            state = ?self.state,
            event = "otp_session_ended",
            "Verification session ended"
        );
    }

    fn ensure_open(&self) -> Result<(), DigitError> {
        if self.state.is_terminal() {
            Err(DigitError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.config.request_timeout_ms)
    }
}

/// Marks the session as `Submitting` while a verify call is outstanding.
/// If the submit future is dropped before settling, the session returns to
/// `Entering`.
struct InFlight<'a> {
    state: &'a mut AttemptState,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut AttemptState) -> Self {
        *state = AttemptState::Submitting;
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, next: AttemptState) {
        *self.state = next;
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.state = AttemptState::Entering;
        }
    }
}

async fn with_deadline<R, F>(deadline: Duration, call: F) -> Result<R, RawError>
where
    F: Future<Output = Result<R, RawError>>,
{
    Ok(tokio::time::timeout(deadline, call).await??)
}
