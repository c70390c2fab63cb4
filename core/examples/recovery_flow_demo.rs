//! Walk through a verification session against an in-memory backend.
//!
//! Run with: cargo run -p recovery_core --example recovery_flow_demo

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use recovery_core::validation::{mask_phone_number, sanitize_input, validate_password, validate_phone};
use recovery_core::{ContinuationToken, OtpVerification, RawError, SubmitError, VerificationTransport};
use recovery_shared::{init_tracing, RecoveryConfig};

struct DemoBackend {
    code: String,
}

#[async_trait]
impl VerificationTransport for DemoBackend {
    async fn verify(&self, code: &str) -> Result<ContinuationToken, RawError> {
        if code == self.code {
            Ok(ContinuationToken::new("demo-reset-token"))
        } else {
            Err(RawError::status(400).with_message("Incorrect verification code"))
        }
    }

    async fn resend(&self) -> Result<(), RawError> {
        Err(RawError::network("connection refused"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RecoveryConfig::from_env()?;
    init_tracing(&config.logging)?;

    let phone = "98765 43210";
    println!("Phone {} valid: {}", mask_phone_number(phone), validate_phone(phone));

    let password = validate_password("hunter2");
    println!("Password requirements still unmet: {:?}", password.messages());
    println!("Sanitized note: {}", sanitize_input("<b>Call me</b> after 6pm; thanks"));

    let backend = Arc::new(DemoBackend {
        code: "424242".to_string(),
    });
    let mut session = OtpVerification::from_config(backend, &config);

    session.paste_code("123456")?;
    match session.submit().await {
        Err(SubmitError::Rejected(error)) => println!("[{}] {}", error.code(), error.message),
        other => println!("Unexpected result: {:?}", other),
    }

    println!("Resend: {:?}", session.resend().await);

    // A retry inside the guard window would be dropped
    tokio::time::sleep(Duration::from_millis(config.guard.min_interval_ms)).await;
    session.paste_code("424242")?;
    let token = session.submit().await?;
    println!("Verified, continuation token received ({} chars)", token.as_str().len());
    println!("Final snapshot: {}", serde_json::to_string_pretty(&session.snapshot())?);

    session.end();
    Ok(())
}
