//! Scalar identifier types.
//!
//! Each type wraps a single string. Construction from raw wire input goes
//! through `from`, which maps an absent or empty value to `None` and keeps
//! anything else verbatim; these types perform no further validation.
//! [`Jid`] is the exception: it also checks the shape of an XMPP address.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

string_type!(
    /// Identifier of a call, unique within a telephony system.
    CallId
);
string_type!(
    /// Identifier assigned to a call by the underlying telephony switch.
    TelephonyCallId
);
string_type!(
    /// Identifier of a conference a call belongs to.
    ConferenceId
);
string_type!(
    /// Identifier of a user profile.
    ProfileId
);
string_type!(
    /// Identifier of a user.
    UserId
);
string_type!(
    /// Identifier of an interest (a monitored line or extension).
    InterestId
);
string_type!(
    /// The kind of an interest, e.g. `DirectoryNumber`.
    InterestType
);
string_type!(
    /// Identifier of a device feature.
    FeatureId
);
string_type!(
    /// The kind of a call recorder.
    RecorderType
);
string_type!(
    /// Identifier of the device a profile is bound to.
    DeviceId
);
string_type!(
    /// A dialable phone number, kept exactly as supplied.
    PhoneNumber
);

/// `[local@]domain[/resource]`, without whitespace.
static JID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([^@/\s]+)@)?([^@/\s]+)(?:/(\S+))?$").expect("Invalid JID regex")
});

/// An XMPP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Jid {
    local: Option<String>,
    domain: String,
    resource: Option<String>,
}

impl Jid {
    /// Parses raw input; `None`, `""` and malformed addresses yield `None`.
    pub fn from(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    /// Parses an address of the form `[local@]domain[/resource]`.
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = JID_REGEX.captures(raw)?;
        Some(Self {
            local: captures.get(1).map(|m| m.as_str().to_string()),
            domain: captures.get(2)?.as_str().to_string(),
            resource: captures.get(3).map(|m| m.as_str().to_string()),
        })
    }

    /// Returns the local part, if any.
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// Returns the domain part.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the resource part, if any.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns this address without its resource.
    pub fn bare(&self) -> Self {
        Self {
            local: self.local.clone(),
            domain: self.domain.clone(),
            resource: None,
        }
    }

    /// Returns true if this address carries a resource.
    pub fn is_full(&self) -> bool {
        self.resource.is_some()
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(local) = &self.local {
            write!(f, "{}@", local)?;
        }
        f.write_str(&self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{}", resource)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Jid {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid JID: {}", value))
    }
}

impl From<Jid> for String {
    fn from(jid: Jid) -> Self {
        jid.to_string()
    }
}
