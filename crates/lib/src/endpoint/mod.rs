//! Interaction endpoint: signed webhook for platform interaction events.
//!
//! Single POST route. Requests are signature-checked over the raw bytes,
//! dispatched by interaction type, and answered synchronously or with a
//! deferred ack plus an out-of-band follow-up.

mod protocol;
mod server;
mod verify;

pub use protocol::{
    CommandData, CommandKind, CommandOption, Interaction, InteractionResponse, InteractionType,
    OptionKind, ResponseData, ResponseType, EPHEMERAL,
};
pub use server::run_endpoint;
pub use verify::{parse_public_key, verify};
