//! Stanza values and their builders.
//!
//! Every stanza is an `iq` envelope (to, from, id, type) around one OpenLink
//! command payload. Builders share the envelope handling through
//! [`StanzaBuilder`]; each kind adds its own payload fields and checks.
//! Validation always runs the envelope checks first, then the payload.

mod interests;
mod make_call;
mod profiles;

use openlink_core::{ErrorSink, IqType, Jid, Requirement};

use crate::NODE_PREFIX;

pub use interests::{
    GetInterestRequest, GetInterestRequestBuilder, GetInterestResult, GetInterestResultBuilder,
    GetInterestsRequest, GetInterestsRequestBuilder, GetInterestsResult, GetInterestsResultBuilder,
};
pub use make_call::{
    MakeCallRequest, MakeCallRequestBuilder, MakeCallResult, MakeCallResultBuilder,
};
pub use profiles::{
    GetProfilesRequest, GetProfilesRequestBuilder, GetProfilesResult, GetProfilesResultBuilder,
};

const STANZA_TO: Requirement = Requirement::new(
    "The stanza 'to' has not been set",
    "Invalid stanza; missing 'to' attribute is mandatory",
);
const STANZA_FROM: Requirement = Requirement::new(
    "The stanza 'from' has not been set",
    "Invalid stanza; missing 'from' attribute is mandatory",
);
const STANZA_ID: Requirement = Requirement::new(
    "The stanza 'id' has not been set",
    "Invalid stanza; missing 'id' attribute is mandatory",
);
const STANZA_TYPE: Requirement = Requirement::new(
    "The stanza 'type' has not been set",
    "Invalid stanza; missing or incorrect 'type' attribute",
);

/// An OpenLink operation, identified on the wire by its command node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    GetProfiles,
    GetInterests,
    GetInterest,
    MakeCall,
}

impl Command {
    pub const ALL: &'static [Command] = &[
        Command::GetProfiles,
        Command::GetInterests,
        Command::GetInterest,
        Command::MakeCall,
    ];

    /// The operation name, e.g. `make-call`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetProfiles => "get-profiles",
            Self::GetInterests => "get-interests",
            Self::GetInterest => "get-interest",
            Self::MakeCall => "make-call",
        }
    }

    /// The full command node URI.
    pub fn node(&self) -> String {
        format!("{}{}", NODE_PREFIX, self.name())
    }

    pub fn from_node(node: &str) -> Option<Self> {
        let name = node.strip_prefix(NODE_PREFIX)?;
        Self::ALL.iter().copied().find(|command| command.name() == name)
    }
}

/// The addressing part of a built stanza.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    to: Option<Jid>,
    from: Option<Jid>,
    id: Option<String>,
    kind: Option<IqType>,
}

impl Envelope {
    pub fn to(&self) -> Option<&Jid> {
        self.to.as_ref()
    }

    pub fn from(&self) -> Option<&Jid> {
        self.from.as_ref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The `iq` type as set or as read from the wire.
    pub fn kind(&self) -> Option<IqType> {
        self.kind
    }
}

/// Envelope fields under construction.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeBuilder {
    pub(crate) to: Option<Jid>,
    pub(crate) from: Option<Jid>,
    pub(crate) id: Option<String>,
    pub(crate) kind: Option<IqType>,
}

impl EnvelopeBuilder {
    /// An empty envelope with its type preset.
    pub fn new(kind: IqType) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// A result envelope addressed back to the sender of `request`.
    pub fn reply_to(request: &Envelope) -> Self {
        Self {
            to: request.from.clone(),
            from: request.to.clone(),
            id: request.id.clone(),
            kind: Some(IqType::Result),
        }
    }

    pub fn to(&self) -> Option<&Jid> {
        self.to.as_ref()
    }

    pub fn from(&self) -> Option<&Jid> {
        self.from.as_ref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn kind(&self) -> Option<IqType> {
        self.kind
    }

    /// Checks to, from, id and type; the type must equal `expected`.
    pub fn validate<S: ErrorSink>(&self, expected: IqType, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.to.is_some(), &STANZA_TO)?;
        sink.check(self.from.is_some(), &STANZA_FROM)?;
        sink.check(self.id.is_some(), &STANZA_ID)?;
        sink.check(self.kind == Some(expected), &STANZA_TYPE)
    }

    pub fn assemble(&self) -> Envelope {
        Envelope {
            to: self.to.clone(),
            from: self.from.clone(),
            id: self.id.clone(),
            kind: self.kind,
        }
    }
}

/// Shared surface of every stanza builder.
///
/// Implementors validate as `envelope().validate(EXPECTED_TYPE, ..)` followed
/// by `validate_payload`, via [`validate_stanza`].
pub trait StanzaBuilder {
    /// The only `iq` type this stanza kind accepts.
    const EXPECTED_TYPE: IqType;

    fn envelope(&self) -> &EnvelopeBuilder;

    fn envelope_mut(&mut self) -> &mut EnvelopeBuilder;

    /// Checks the payload's mandatory fields, after the envelope.
    fn validate_payload<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error>;

    fn set_to(&mut self, to: Jid) -> &mut Self {
        self.envelope_mut().to = Some(to);
        self
    }

    fn set_from(&mut self, from: Jid) -> &mut Self {
        self.envelope_mut().from = Some(from);
        self
    }

    fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.envelope_mut().id = Some(id.into());
        self
    }

    fn set_type(&mut self, kind: IqType) -> &mut Self {
        self.envelope_mut().kind = Some(kind);
        self
    }
}

/// Envelope checks, then payload checks.
pub fn validate_stanza<B, S>(builder: &B, sink: &mut S) -> Result<(), S::Error>
where
    B: StanzaBuilder,
    S: ErrorSink,
{
    builder.envelope().validate(B::EXPECTED_TYPE, sink)?;
    builder.validate_payload(sink)
}

/// Any stanza the codec understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stanza {
    GetProfilesRequest(GetProfilesRequest),
    GetProfilesResult(GetProfilesResult),
    GetInterestsRequest(GetInterestsRequest),
    GetInterestsResult(GetInterestsResult),
    GetInterestRequest(GetInterestRequest),
    GetInterestResult(GetInterestResult),
    MakeCallRequest(MakeCallRequest),
    MakeCallResult(MakeCallResult),
}

impl Stanza {
    pub fn envelope(&self) -> &Envelope {
        match self {
            Self::GetProfilesRequest(stanza) => stanza.envelope(),
            Self::GetProfilesResult(stanza) => stanza.envelope(),
            Self::GetInterestsRequest(stanza) => stanza.envelope(),
            Self::GetInterestsResult(stanza) => stanza.envelope(),
            Self::GetInterestRequest(stanza) => stanza.envelope(),
            Self::GetInterestResult(stanza) => stanza.envelope(),
            Self::MakeCallRequest(stanza) => stanza.envelope(),
            Self::MakeCallResult(stanza) => stanza.envelope(),
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Self::GetProfilesRequest(_) | Self::GetProfilesResult(_) => Command::GetProfiles,
            Self::GetInterestsRequest(_) | Self::GetInterestsResult(_) => Command::GetInterests,
            Self::GetInterestRequest(_) | Self::GetInterestResult(_) => Command::GetInterest,
            Self::MakeCallRequest(_) | Self::MakeCallResult(_) => Command::MakeCall,
        }
    }

    pub fn is_result(&self) -> bool {
        matches!(
            self,
            Self::GetProfilesResult(_)
                | Self::GetInterestsResult(_)
                | Self::GetInterestResult(_)
                | Self::MakeCallResult(_)
        )
    }
}

macro_rules! stanza_from {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Stanza {
                fn from(stanza: $variant) -> Self {
                    Self::$variant(stanza)
                }
            }
        )+
    };
}

stanza_from!(
    GetProfilesRequest,
    GetProfilesResult,
    GetInterestsRequest,
    GetInterestsResult,
    GetInterestRequest,
    GetInterestResult,
    MakeCallRequest,
    MakeCallResult,
);

#[cfg(test)]
mod tests {
    use super::*;
    use openlink_core::{BuildError, FailFast};

    fn jid(raw: &str) -> Jid {
        Jid::parse(raw).unwrap()
    }

    mod command {
        use super::*;

        #[test]
        fn nodes_roundtrip() {
            for command in Command::ALL {
                assert_eq!(Command::from_node(&command.node()), Some(*command));
            }
            assert_eq!(
                Command::MakeCall.node(),
                "http://xmpp.org/protocol/openlink:01:00:00#make-call"
            );
        }

        #[test]
        fn unknown_nodes() {
            assert_eq!(Command::from_node("make-call"), None);
            assert_eq!(
                Command::from_node("http://xmpp.org/protocol/openlink:01:00:00#call-status"),
                None
            );
        }
    }

    mod envelope {
        use super::*;

        #[test]
        fn strict_order() {
            let mut envelope = EnvelopeBuilder::default();
            assert_eq!(
                envelope.validate(IqType::Get, &mut FailFast),
                Err(BuildError::NotSet("The stanza 'to' has not been set"))
            );
            envelope.to = Some(jid("server@example.com"));
            assert_eq!(
                envelope.validate(IqType::Get, &mut FailFast),
                Err(BuildError::NotSet("The stanza 'from' has not been set"))
            );
            envelope.from = Some(jid("user@example.com"));
            assert_eq!(
                envelope.validate(IqType::Get, &mut FailFast),
                Err(BuildError::NotSet("The stanza 'id' has not been set"))
            );
            envelope.id = Some("id1".to_string());
            assert_eq!(
                envelope.validate(IqType::Get, &mut FailFast),
                Err(BuildError::NotSet("The stanza 'type' has not been set"))
            );
            envelope.kind = Some(IqType::Get);
            assert_eq!(envelope.validate(IqType::Get, &mut FailFast), Ok(()));
        }

        #[test]
        fn wrong_type_is_reported_like_a_missing_one() {
            let mut diagnostics = Vec::new();
            let envelope = EnvelopeBuilder::new(IqType::Set);
            let Ok(()) = envelope.validate(IqType::Get, &mut diagnostics);
            assert_eq!(
                diagnostics,
                vec![
                    "Invalid stanza; missing 'to' attribute is mandatory",
                    "Invalid stanza; missing 'from' attribute is mandatory",
                    "Invalid stanza; missing 'id' attribute is mandatory",
                    "Invalid stanza; missing or incorrect 'type' attribute",
                ]
            );
        }

        #[test]
        fn reply_swaps_addresses() {
            let mut request = EnvelopeBuilder::new(IqType::Get);
            request.to = Some(jid("server@example.com"));
            request.from = Some(jid("user@example.com/desk"));
            request.id = Some("id1".to_string());

            let reply = EnvelopeBuilder::reply_to(&request.assemble()).assemble();
            assert_eq!(reply.to(), Some(&jid("user@example.com/desk")));
            assert_eq!(reply.from(), Some(&jid("server@example.com")));
            assert_eq!(reply.id(), Some("id1"));
            assert_eq!(reply.kind(), Some(IqType::Result));
        }
    }
}
