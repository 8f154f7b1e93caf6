//! get-interests and get-interest requests and results.

use openlink_core::{
    Build, BuildError, BuildResult, ErrorSink, Interest, InterestId, IqType, Jid, Requirement,
};

use super::{Envelope, EnvelopeBuilder, StanzaBuilder, validate_stanza};

const INTERESTS_REQUEST_JID: Requirement = Requirement::new(
    "The get-interests request 'jid' has not been set",
    "Invalid get-interests request stanza; missing or invalid 'jid'",
);
const INTEREST_REQUEST_INTEREST: Requirement = Requirement::new(
    "The get-interest request 'interest' has not been set",
    "Invalid get-interest request stanza; missing or invalid 'interest'",
);
const INTEREST_RESULT_INTEREST: Requirement = Requirement::new(
    "The get-interest result 'interest' has not been set",
    "Invalid get-interest result stanza; missing 'interest'",
);
const INTEREST_NOT_UNIQUE: BuildError = BuildError::NotUnique("The interest id must be unique");

/// Asks for the interests `jid` may monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInterestsRequest {
    envelope: Envelope,
    jid: Option<Jid>,
}

impl GetInterestsRequest {
    pub fn builder() -> GetInterestsRequestBuilder {
        GetInterestsRequestBuilder {
            envelope: EnvelopeBuilder::new(GetInterestsRequestBuilder::EXPECTED_TYPE),
            jid: None,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn jid(&self) -> Option<&Jid> {
        self.jid.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct GetInterestsRequestBuilder {
    envelope: EnvelopeBuilder,
    jid: Option<Jid>,
}

impl GetInterestsRequestBuilder {
    pub fn set_jid(&mut self, jid: Jid) -> &mut Self {
        self.jid = Some(jid);
        self
    }
}

impl StanzaBuilder for GetInterestsRequestBuilder {
    const EXPECTED_TYPE: IqType = IqType::Get;

    fn envelope(&self) -> &EnvelopeBuilder {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut EnvelopeBuilder {
        &mut self.envelope
    }

    fn validate_payload<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.jid.is_some(), &INTERESTS_REQUEST_JID)
    }
}

impl Build for GetInterestsRequestBuilder {
    type Output = GetInterestsRequest;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        validate_stanza(self, sink)
    }

    fn assemble(&self) -> GetInterestsRequest {
        GetInterestsRequest {
            envelope: self.envelope.assemble(),
            jid: self.jid.clone(),
        }
    }
}

/// The interests a user may monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInterestsResult {
    envelope: Envelope,
    interests: Vec<Interest>,
}

impl GetInterestsResult {
    pub fn builder() -> GetInterestsResultBuilder {
        GetInterestsResultBuilder {
            envelope: EnvelopeBuilder::new(GetInterestsResultBuilder::EXPECTED_TYPE),
            interests: Vec::new(),
        }
    }

    /// Starts a result addressed back to the sender of `request`.
    pub fn result_for(request: &GetInterestsRequest) -> GetInterestsResultBuilder {
        GetInterestsResultBuilder {
            envelope: EnvelopeBuilder::reply_to(request.envelope()),
            interests: Vec::new(),
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }
}

#[derive(Debug, Clone)]
pub struct GetInterestsResultBuilder {
    envelope: EnvelopeBuilder,
    interests: Vec<Interest>,
}

impl GetInterestsResultBuilder {
    /// Adds an interest; fails if one with the same id was already added.
    pub fn add_interest(&mut self, interest: Interest) -> BuildResult<&mut Self> {
        if let Some(id) = interest.id() {
            if self.interests.iter().any(|existing| existing.id() == Some(id)) {
                return Err(INTEREST_NOT_UNIQUE);
            }
        }
        self.interests.push(interest);
        Ok(self)
    }

    pub fn add_interests(
        &mut self,
        interests: impl IntoIterator<Item = Interest>,
    ) -> BuildResult<&mut Self> {
        for interest in interests {
            self.add_interest(interest)?;
        }
        Ok(self)
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }
}

impl StanzaBuilder for GetInterestsResultBuilder {
    const EXPECTED_TYPE: IqType = IqType::Result;

    fn envelope(&self) -> &EnvelopeBuilder {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut EnvelopeBuilder {
        &mut self.envelope
    }

    fn validate_payload<S: ErrorSink>(&self, _sink: &mut S) -> Result<(), S::Error> {
        Ok(())
    }
}

impl Build for GetInterestsResultBuilder {
    type Output = GetInterestsResult;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        validate_stanza(self, sink)
    }

    fn assemble(&self) -> GetInterestsResult {
        GetInterestsResult {
            envelope: self.envelope.assemble(),
            interests: self.interests.clone(),
        }
    }
}

/// Asks for the details of a single interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInterestRequest {
    envelope: Envelope,
    interest_id: Option<InterestId>,
}

impl GetInterestRequest {
    pub fn builder() -> GetInterestRequestBuilder {
        GetInterestRequestBuilder {
            envelope: EnvelopeBuilder::new(GetInterestRequestBuilder::EXPECTED_TYPE),
            interest_id: None,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn interest_id(&self) -> Option<&InterestId> {
        self.interest_id.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct GetInterestRequestBuilder {
    envelope: EnvelopeBuilder,
    interest_id: Option<InterestId>,
}

impl GetInterestRequestBuilder {
    pub fn set_interest_id(&mut self, interest_id: InterestId) -> &mut Self {
        self.interest_id = Some(interest_id);
        self
    }
}

impl StanzaBuilder for GetInterestRequestBuilder {
    const EXPECTED_TYPE: IqType = IqType::Get;

    fn envelope(&self) -> &EnvelopeBuilder {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut EnvelopeBuilder {
        &mut self.envelope
    }

    fn validate_payload<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.interest_id.is_some(), &INTEREST_REQUEST_INTEREST)
    }
}

impl Build for GetInterestRequestBuilder {
    type Output = GetInterestRequest;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        validate_stanza(self, sink)
    }

    fn assemble(&self) -> GetInterestRequest {
        GetInterestRequest {
            envelope: self.envelope.assemble(),
            interest_id: self.interest_id.clone(),
        }
    }
}

/// The details of a single interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInterestResult {
    envelope: Envelope,
    interest: Option<Interest>,
}

impl GetInterestResult {
    pub fn builder() -> GetInterestResultBuilder {
        GetInterestResultBuilder {
            envelope: EnvelopeBuilder::new(GetInterestResultBuilder::EXPECTED_TYPE),
            interest: None,
        }
    }

    /// Starts a result addressed back to the sender of `request`.
    pub fn result_for(request: &GetInterestRequest) -> GetInterestResultBuilder {
        GetInterestResultBuilder {
            envelope: EnvelopeBuilder::reply_to(request.envelope()),
            interest: None,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Absent only when built with diagnostics from incomplete input.
    pub fn interest(&self) -> Option<&Interest> {
        self.interest.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct GetInterestResultBuilder {
    envelope: EnvelopeBuilder,
    interest: Option<Interest>,
}

impl GetInterestResultBuilder {
    pub fn set_interest(&mut self, interest: Interest) -> &mut Self {
        self.interest = Some(interest);
        self
    }

    pub fn interest(&self) -> Option<&Interest> {
        self.interest.as_ref()
    }
}

impl StanzaBuilder for GetInterestResultBuilder {
    const EXPECTED_TYPE: IqType = IqType::Result;

    fn envelope(&self) -> &EnvelopeBuilder {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut EnvelopeBuilder {
        &mut self.envelope
    }

    fn validate_payload<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.interest.is_some(), &INTEREST_RESULT_INTEREST)
    }
}

impl Build for GetInterestResultBuilder {
    type Output = GetInterestResult;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        validate_stanza(self, sink)
    }

    fn assemble(&self) -> GetInterestResult {
        GetInterestResult {
            envelope: self.envelope.assemble(),
            interest: self.interest.clone(),
        }
    }
}
