//! Interaction wire types. Discord tags events, command kinds, and option
//! kinds with small integers; each tag is modeled as a closed enum with an
//! `Unknown` catch-all so unrecognized platform additions are explicit values,
//! not parse failures.

use serde::{Deserialize, Serialize};

/// Message flag marking a reply visible only to the invoking user.
pub const EPHEMERAL: u64 = 64;

/// Top-level interaction type (wire: `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    /// Endpoint-validation handshake; answered with Pong.
    Ping,
    /// A user invoked a command.
    ApplicationCommand,
    /// Platform type we do not handle (components, autocomplete, modals, ...).
    Unknown(u8),
}

impl From<u8> for InteractionType {
    fn from(v: u8) -> Self {
        match v {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            other => InteractionType::Unknown(other),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(v: InteractionType) -> u8 {
        match v {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::Unknown(other) => other,
        }
    }
}

/// Command subtype (wire: `data.type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CommandKind {
    /// Slash command with typed options.
    ChatInput,
    Unknown(u8),
}

impl From<u8> for CommandKind {
    fn from(v: u8) -> Self {
        match v {
            1 => CommandKind::ChatInput,
            other => CommandKind::Unknown(other),
        }
    }
}

impl From<CommandKind> for u8 {
    fn from(v: CommandKind) -> u8 {
        match v {
            CommandKind::ChatInput => 1,
            CommandKind::Unknown(other) => other,
        }
    }
}

/// Declared kind of a command option value (wire: `data.options[].type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    Number,
    Unknown(u8),
}

impl From<u8> for OptionKind {
    fn from(v: u8) -> Self {
        match v {
            3 => OptionKind::String,
            4 => OptionKind::Integer,
            5 => OptionKind::Boolean,
            10 => OptionKind::Number,
            other => OptionKind::Unknown(other),
        }
    }
}

impl From<OptionKind> for u8 {
    fn from(v: OptionKind) -> u8 {
        match v {
            OptionKind::String => 3,
            OptionKind::Integer => 4,
            OptionKind::Boolean => 5,
            OptionKind::Number => 10,
            OptionKind::Unknown(other) => other,
        }
    }
}

/// Inbound interaction event. Constructed from the verified request body,
/// read-only, discarded when the handler returns.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub typ: InteractionType,
    /// Follow-up token authorizing out-of-band updates for this interaction.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub data: Option<CommandData>,
}

/// Command payload (wire: `data`).
#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    #[serde(rename = "type")]
    pub typ: CommandKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

/// One typed option value, in declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub typ: OptionKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl CommandOption {
    /// The option's value, but only when it is declared and encoded as a string.
    pub fn string_value(&self) -> Option<&str> {
        if self.typ == OptionKind::String {
            self.value.as_str()
        } else {
            None
        }
    }
}

/// Response envelope type (wire: `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ResponseType {
    Pong,
    ChannelMessage,
    DeferredChannelMessage,
    Unknown(u8),
}

impl From<u8> for ResponseType {
    fn from(v: u8) -> Self {
        match v {
            1 => ResponseType::Pong,
            4 => ResponseType::ChannelMessage,
            5 => ResponseType::DeferredChannelMessage,
            other => ResponseType::Unknown(other),
        }
    }
}

impl From<ResponseType> for u8 {
    fn from(v: ResponseType) -> u8 {
        match v {
            ResponseType::Pong => 1,
            ResponseType::ChannelMessage => 4,
            ResponseType::DeferredChannelMessage => 5,
            ResponseType::Unknown(other) => other,
        }
    }
}

/// Outbound response: `{ "type", "data"? }`, sent as the immediate HTTP body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub typ: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

/// Message content and flags for ChannelMessage responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseData {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl InteractionResponse {
    /// Handshake reply.
    pub fn pong() -> Self {
        Self {
            typ: ResponseType::Pong,
            data: None,
        }
    }

    /// Public channel message.
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            typ: ResponseType::ChannelMessage,
            data: Some(ResponseData {
                content: content.into(),
                flags: None,
            }),
        }
    }

    /// Message visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            typ: ResponseType::ChannelMessage,
            data: Some(ResponseData {
                content: content.into(),
                flags: Some(EPHEMERAL),
            }),
        }
    }

    /// Deferred acknowledgment; the content arrives via follow-up PATCH.
    pub fn deferred() -> Self {
        Self {
            typ: ResponseType::DeferredChannelMessage,
            data: None,
        }
    }
}
