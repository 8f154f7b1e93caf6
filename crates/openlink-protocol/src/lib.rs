//! OpenLink call-control stanzas and their XML codec.
//!
//! OpenLink commands travel as XMPP ad-hoc commands: an `iq` envelope around
//! a `command` whose `node` names the operation, with the payload in an
//! `iodata` section (`in` for requests, `out` for results).
//!
//! # Layers
//!
//! - Stanza builders ([`MakeCallRequest::builder`] and friends) validate in
//!   strict mode (`build`) or diagnostic mode (`build_with_diagnostics`).
//! - [`StanzaCodec`] maps stanzas to and from [`Element`] trees. Reading
//!   never fails on bad leaf values; each one becomes a diagnostic.
//! - [`parse_xml`] and [`to_xml`] turn trees into wire text via quick-xml.
//!
//! # Example
//!
//! ```rust
//! use openlink_core::{Build, Jid};
//! use openlink_protocol::{GetProfilesRequest, StanzaBuilder, StanzaCodec, XmlConfig};
//!
//! let mut builder = GetProfilesRequest::builder();
//! builder
//!     .set_to(Jid::parse("server@example.com").unwrap())
//!     .set_from(Jid::parse("user@example.com/desk").unwrap())
//!     .set_id("id1")
//!     .set_jid(Jid::parse("user@example.com").unwrap());
//! let request = builder.build().unwrap();
//!
//! let xml = request.to_xml(&XmlConfig::compact()).unwrap();
//! let mut diagnostics = Vec::new();
//! let parsed = GetProfilesRequest::from_xml(&xml, &XmlConfig::compact(), &mut diagnostics).unwrap();
//! assert_eq!(parsed, request);
//! assert!(diagnostics.is_empty());
//! ```

mod codec;
mod config;
mod element;
mod error;
mod stanza;
mod xml;

#[cfg(test)]
mod fixtures;

pub use codec::StanzaCodec;
pub use config::XmlConfig;
pub use element::Element;
pub use error::{ProtocolError, ProtocolResult};
pub use stanza::{
    Command, Envelope, EnvelopeBuilder, GetInterestRequest, GetInterestRequestBuilder,
    GetInterestResult, GetInterestResultBuilder, GetInterestsRequest, GetInterestsRequestBuilder,
    GetInterestsResult, GetInterestsResultBuilder, GetProfilesRequest, GetProfilesRequestBuilder,
    GetProfilesResult, GetProfilesResultBuilder, MakeCallRequest, MakeCallRequestBuilder,
    MakeCallResult, MakeCallResultBuilder, Stanza, StanzaBuilder, validate_stanza,
};
pub use xml::{parse_xml, to_xml};

/// Namespace of XMPP ad-hoc commands.
pub const COMMANDS_NS: &str = "http://jabber.org/protocol/commands";

/// Namespace of the `iodata` payload section.
pub const IO_DATA_NS: &str = "urn:xmpp:tmp:io-data";

/// Prefix of every OpenLink command node; the operation name follows the `#`.
pub const NODE_PREFIX: &str = "http://xmpp.org/protocol/openlink:01:00:00#";

pub const PROFILES_NS: &str = "http://xmpp.org/protocol/openlink:01:00:00/profiles";

pub const INTERESTS_NS: &str = "http://xmpp.org/protocol/openlink:01:00:00/interests";

pub const CALL_STATUS_NS: &str = "http://xmpp.org/protocol/openlink:01:00:00#call-status";
