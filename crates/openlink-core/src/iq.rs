//! Stanza-level enumerations.

use serde::{Deserialize, Serialize};

wire_enum!(
    /// The `type` attribute of an `iq` stanza.
    pub enum IqType {
        Get => "get",
        Set => "set",
        Result => "result",
        Error => "error",
    }
);

wire_enum!(
    /// The `status` attribute of an ad-hoc command result.
    pub enum CommandStatus {
        Executing => "executing",
        Completed => "completed",
        Canceled => "canceled",
    }
);

impl IqType {
    /// Returns true for request types (`get` and `set`).
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Get | Self::Set)
    }
}
