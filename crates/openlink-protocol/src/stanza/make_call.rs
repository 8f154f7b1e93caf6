//! make-call request and result.

use openlink_core::{
    Build, CallStatus, ErrorSink, InterestId, IqType, Jid, MakeCallFeature, OriginatorReference,
    PhoneNumber, ProfileId, Requirement,
};

use super::{Envelope, EnvelopeBuilder, StanzaBuilder, validate_stanza};

const REQUEST_JID: Requirement = Requirement::new(
    "The make-call request 'jid' has not been set",
    "Invalid make-call request stanza; missing or invalid 'jid'",
);
const RESULT_CALL_STATUS: Requirement = Requirement::new(
    "The make-call result 'callstatus' has not been set",
    "Invalid make-call result stanza; missing 'callstatus'",
);

/// Asks the server to place a call on behalf of `jid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeCallRequest {
    envelope: Envelope,
    jid: Option<Jid>,
    profile_id: Option<ProfileId>,
    interest_id: Option<InterestId>,
    destination: Option<PhoneNumber>,
    originator_references: Vec<OriginatorReference>,
    features: Vec<MakeCallFeature>,
}

impl MakeCallRequest {
    pub fn builder() -> MakeCallRequestBuilder {
        MakeCallRequestBuilder {
            envelope: EnvelopeBuilder::new(MakeCallRequestBuilder::EXPECTED_TYPE),
            jid: None,
            profile_id: None,
            interest_id: None,
            destination: None,
            originator_references: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// The user the call is placed for.
    pub fn jid(&self) -> Option<&Jid> {
        self.jid.as_ref()
    }

    pub fn profile_id(&self) -> Option<&ProfileId> {
        self.profile_id.as_ref()
    }

    pub fn interest_id(&self) -> Option<&InterestId> {
        self.interest_id.as_ref()
    }

    pub fn destination(&self) -> Option<&PhoneNumber> {
        self.destination.as_ref()
    }

    pub fn originator_references(&self) -> &[OriginatorReference] {
        &self.originator_references
    }

    pub fn features(&self) -> &[MakeCallFeature] {
        &self.features
    }
}

#[derive(Debug, Clone)]
pub struct MakeCallRequestBuilder {
    envelope: EnvelopeBuilder,
    jid: Option<Jid>,
    profile_id: Option<ProfileId>,
    interest_id: Option<InterestId>,
    destination: Option<PhoneNumber>,
    originator_references: Vec<OriginatorReference>,
    features: Vec<MakeCallFeature>,
}

impl MakeCallRequestBuilder {
    pub fn set_jid(&mut self, jid: Jid) -> &mut Self {
        self.jid = Some(jid);
        self
    }

    pub fn set_profile_id(&mut self, profile_id: ProfileId) -> &mut Self {
        self.profile_id = Some(profile_id);
        self
    }

    pub fn set_interest_id(&mut self, interest_id: InterestId) -> &mut Self {
        self.interest_id = Some(interest_id);
        self
    }

    pub fn set_destination(&mut self, destination: PhoneNumber) -> &mut Self {
        self.destination = Some(destination);
        self
    }

    pub fn add_originator_reference(&mut self, reference: OriginatorReference) -> &mut Self {
        self.originator_references.push(reference);
        self
    }

    pub fn add_originator_references(
        &mut self,
        references: impl IntoIterator<Item = OriginatorReference>,
    ) -> &mut Self {
        self.originator_references.extend(references);
        self
    }

    pub fn add_feature(&mut self, feature: MakeCallFeature) -> &mut Self {
        self.features.push(feature);
        self
    }

    pub fn add_features(&mut self, features: impl IntoIterator<Item = MakeCallFeature>) -> &mut Self {
        self.features.extend(features);
        self
    }
}

impl StanzaBuilder for MakeCallRequestBuilder {
    const EXPECTED_TYPE: IqType = IqType::Set;

    fn envelope(&self) -> &EnvelopeBuilder {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut EnvelopeBuilder {
        &mut self.envelope
    }

    fn validate_payload<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.jid.is_some(), &REQUEST_JID)
    }
}

impl Build for MakeCallRequestBuilder {
    type Output = MakeCallRequest;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        validate_stanza(self, sink)
    }

    fn assemble(&self) -> MakeCallRequest {
        MakeCallRequest {
            envelope: self.envelope.assemble(),
            jid: self.jid.clone(),
            profile_id: self.profile_id.clone(),
            interest_id: self.interest_id.clone(),
            destination: self.destination.clone(),
            originator_references: self.originator_references.clone(),
            features: self.features.clone(),
        }
    }
}

/// The call status produced by a make-call request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeCallResult {
    envelope: Envelope,
    call_status: Option<CallStatus>,
}

impl MakeCallResult {
    pub fn builder() -> MakeCallResultBuilder {
        MakeCallResultBuilder {
            envelope: EnvelopeBuilder::new(MakeCallResultBuilder::EXPECTED_TYPE),
            call_status: None,
        }
    }

    /// Starts a result addressed back to the sender of `request`.
    pub fn result_for(request: &MakeCallRequest) -> MakeCallResultBuilder {
        MakeCallResultBuilder {
            envelope: EnvelopeBuilder::reply_to(request.envelope()),
            call_status: None,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn call_status(&self) -> Option<&CallStatus> {
        self.call_status.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct MakeCallResultBuilder {
    envelope: EnvelopeBuilder,
    call_status: Option<CallStatus>,
}

impl MakeCallResultBuilder {
    pub fn set_call_status(&mut self, call_status: CallStatus) -> &mut Self {
        self.call_status = Some(call_status);
        self
    }
}

impl StanzaBuilder for MakeCallResultBuilder {
    const EXPECTED_TYPE: IqType = IqType::Result;

    fn envelope(&self) -> &EnvelopeBuilder {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut EnvelopeBuilder {
        &mut self.envelope
    }

    fn validate_payload<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.call_status.is_some(), &RESULT_CALL_STATUS)
    }
}

impl Build for MakeCallResultBuilder {
    type Output = MakeCallResult;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        validate_stanza(self, sink)
    }

    fn assemble(&self) -> MakeCallResult {
        MakeCallResult {
            envelope: self.envelope.assemble(),
            call_status: self.call_status.clone(),
        }
    }
}
