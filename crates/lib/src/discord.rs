//! Discord follow-up client: delivers deferred-reply content via the
//! interaction webhook (PATCH @original) using the bot credential.

use serde_json::json;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/babble-bot/babble, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Client for out-of-band interaction updates. The interaction's follow-up
/// token addresses the message; the bot token authorizes the call.
#[derive(Clone)]
pub struct DiscordClient {
    application_id: String,
    bot_token: Option<String>,
    client: reqwest::Client,
}

impl DiscordClient {
    pub fn new(application_id: String, bot_token: Option<String>) -> Self {
        Self {
            application_id,
            bot_token,
            client: reqwest::Client::new(),
        }
    }

    /// True when both credentials needed for follow-up delivery are present.
    pub fn can_follow_up(&self) -> bool {
        !self.application_id.is_empty() && self.bot_token.is_some()
    }

    /// Replace the deferred placeholder with the real content.
    /// PATCH {base}/webhooks/{application_id}/{interaction_token}/messages/@original
    pub async fn edit_original_response(
        &self,
        interaction_token: &str,
        content: &str,
    ) -> Result<(), String> {
        let token = self.bot_token.as_ref().ok_or("discord bot token not configured")?;
        let url = format!(
            "{}/webhooks/{}/{}/messages/@original",
            discord_api_base(),
            self.application_id,
            interaction_token
        );
        let body = json!({ "content": content });
        let res = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bot {}", token))
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("editOriginalResponse failed: {} {}", status, body));
        }
        Ok(())
    }
}

/// Resolve the Discord API base URL (for tests or custom endpoints).
pub fn discord_api_base() -> String {
    std::env::var("DISCORD_API_BASE").unwrap_or_else(|_| DISCORD_API_BASE.to_string())
}
