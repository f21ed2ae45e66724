//! CLI output: failures become error envelopes; envelopes become text.

use crate::classify::{classify, Failure};
use crate::envelope::ResponseEnvelope;
use crate::render::{render, OutputFormat, RenderOptions};
use tracing::warn;

/// What a successful command hands back for printing.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub envelope: ResponseEnvelope,
    pub options: RenderOptions,
}

impl CommandOutput {
    pub fn new(envelope: ResponseEnvelope, options: RenderOptions) -> Self {
        Self { envelope, options }
    }
}

/// Classify any failure into an error envelope.
pub fn map_error(failure: &Failure) -> ResponseEnvelope {
    ResponseEnvelope::from(classify(failure))
}

/// Final text for stdout and whether the command succeeded.
pub fn render_outcome(
    outcome: Result<CommandOutput, Failure>,
    format: OutputFormat,
) -> (String, bool) {
    let output = match outcome {
        Ok(output) => output,
        Err(failure) => CommandOutput::new(map_error(&failure), RenderOptions::default()),
    };
    let ok = output.envelope.is_success();
    let text = match render(&output.envelope, format, &output.options) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "failed to render envelope");
            let fallback = map_error(&Failure::from(e));
            fallback.to_pretty_json().unwrap_or_else(|_| {
                r#"{"success":false,"error":{"code":"UNKNOWN_ERROR","message":"An unexpected error occurred"}}"#
                    .to_string()
            })
        }
    };
    (text, ok)
}
