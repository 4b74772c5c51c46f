//! User-facing reply strings.
//!
//! Every reply the bot can send lives here so operators can reword or
//! translate them from the `[templates]` config section. `{text}` and `{kind}`
//! are the only placeholders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    /// Reply to a text message. `{text}` is the original text.
    pub echo: String,
    /// Reply to content the bot does not process. `{kind}` names the content.
    pub acknowledge: String,
    pub not_configured: String,
    pub unsupported: String,
    pub unreachable: String,
    pub timeout: String,
    pub server_error: String,
    pub unexpected: String,
    /// Used when the endpoint answers 200 without a `summary` field.
    pub missing_summary: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            echo: "📝 You wrote: {text}".to_string(),
            acknowledge: "🤖 I received your message of type: {kind}".to_string(),
            not_configured: "⚠️ Media processing service is not configured".to_string(),
            unsupported: "❌ This media type is not supported".to_string(),
            unreachable: "❌ Could not connect to the processing server".to_string(),
            timeout: "⏰ Processing took too long, try a shorter message".to_string(),
            server_error: "❌ Error while processing the file on the server".to_string(),
            unexpected: "❌ An unexpected error occurred while processing the file".to_string(),
            missing_summary: "Could not get a summary".to_string(),
        }
    }
}

impl Templates {
    pub fn render_echo(&self, text: &str) -> String {
        self.echo.replace("{text}", text)
    }

    pub fn render_acknowledge(&self, kind: &str) -> String {
        self.acknowledge.replace("{kind}", kind)
    }
}
