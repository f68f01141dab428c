//! Operator prompt collaborator.
//!
//! Calibration and structure placement need a number from the operator
//! before they can finish. The host application supplies an
//! [`OperatorPrompt`]; the calling operation blocks on `ask_number` and
//! does not continue until it returns.

/// Synchronous request/response channel to the operator.
pub trait OperatorPrompt {
    /// Asks for a number. Returns `None` on cancel, empty input or text
    /// that does not parse as a number.
    fn ask_number(&mut self, message: &str) -> Option<f64>;

    /// Shows an informational or error message.
    fn notify(&mut self, message: &str);
}

/// Prompt used when no operator is attached.
///
/// Every question is cancelled and notifications go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl OperatorPrompt for NoPrompt {
    fn ask_number(&mut self, message: &str) -> Option<f64> {
        tracing::debug!("No operator attached, cancelling prompt: {}", message);
        None
    }

    fn notify(&mut self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Parses raw prompt text the way every prompt implementation should.
///
/// Accepts an optional feet suffix; anything else non-numeric is `None`.
pub fn parse_prompt_number(input: &str) -> Option<f64> {
    siteplan_core::parse_feet(input)
}
