//! get-profiles request and result.

use openlink_core::{Build, BuildError, BuildResult, ErrorSink, IqType, Jid, Profile, Requirement};

use super::{Envelope, EnvelopeBuilder, StanzaBuilder, validate_stanza};

const REQUEST_JID: Requirement = Requirement::new(
    "The get-profiles request 'jid' has not been set",
    "Invalid get-profiles request stanza; missing or invalid 'jid'",
);
const PROFILE_NOT_UNIQUE: BuildError = BuildError::NotUnique("The profile id must be unique");

/// Asks for the profiles available to `jid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetProfilesRequest {
    envelope: Envelope,
    jid: Option<Jid>,
}

impl GetProfilesRequest {
    pub fn builder() -> GetProfilesRequestBuilder {
        GetProfilesRequestBuilder {
            envelope: EnvelopeBuilder::new(GetProfilesRequestBuilder::EXPECTED_TYPE),
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
pub struct GetProfilesRequestBuilder {
    envelope: EnvelopeBuilder,
    jid: Option<Jid>,
}

impl GetProfilesRequestBuilder {
    pub fn set_jid(&mut self, jid: Jid) -> &mut Self {
        self.jid = Some(jid);
        self
    }
}

impl StanzaBuilder for GetProfilesRequestBuilder {
    const EXPECTED_TYPE: IqType = IqType::Get;

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

impl Build for GetProfilesRequestBuilder {
    type Output = GetProfilesRequest;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        validate_stanza(self, sink)
    }

    fn assemble(&self) -> GetProfilesRequest {
        GetProfilesRequest {
            envelope: self.envelope.assemble(),
            jid: self.jid.clone(),
        }
    }
}

/// The profiles available to a user, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetProfilesResult {
    envelope: Envelope,
    profiles: Vec<Profile>,
}

impl GetProfilesResult {
    pub fn builder() -> GetProfilesResultBuilder {
        GetProfilesResultBuilder {
            envelope: EnvelopeBuilder::new(GetProfilesResultBuilder::EXPECTED_TYPE),
            profiles: Vec::new(),
        }
    }

    /// Starts a result addressed back to the sender of `request`.
    pub fn result_for(request: &GetProfilesRequest) -> GetProfilesResultBuilder {
        GetProfilesResultBuilder {
            envelope: EnvelopeBuilder::reply_to(request.envelope()),
            profiles: Vec::new(),
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }
}

/// Builder for [`GetProfilesResult`].
///
/// Profile ids must be pairwise distinct; a duplicate is rejected when it is
/// added, whichever finalization mode is used later. An empty list is valid.
#[derive(Debug, Clone)]
pub struct GetProfilesResultBuilder {
    envelope: EnvelopeBuilder,
    profiles: Vec<Profile>,
}

impl GetProfilesResultBuilder {
    pub fn add_profile(&mut self, profile: Profile) -> BuildResult<&mut Self> {
        if let Some(id) = profile.id() {
            if self.profiles.iter().any(|existing| existing.id() == Some(id)) {
                return Err(PROFILE_NOT_UNIQUE);
            }
        }
        self.profiles.push(profile);
        Ok(self)
    }

    pub fn add_profiles(
        &mut self,
        profiles: impl IntoIterator<Item = Profile>,
    ) -> BuildResult<&mut Self> {
        for profile in profiles {
            self.add_profile(profile)?;
        }
        Ok(self)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }
}

impl StanzaBuilder for GetProfilesResultBuilder {
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

impl Build for GetProfilesResultBuilder {
    type Output = GetProfilesResult;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        validate_stanza(self, sink)
    }

    fn assemble(&self) -> GetProfilesResult {
        GetProfilesResult {
            envelope: self.envelope.assemble(),
            profiles: self.profiles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openlink_core::{ProfileId, Site, SiteType};

    fn jid(raw: &str) -> Jid {
        Jid::parse(raw).unwrap()
    }

    fn profile(id: &str) -> Profile {
        Profile::builder()
            .set_id(ProfileId::from(Some(id)).unwrap())
            .set_site(
                Site::builder()
                    .set_id(1)
                    .set_type(SiteType::Btsm)
                    .set_name("site")
                    .build()
                    .unwrap(),
            )
            .set_default(false)
            .set_label(id)
            .set_online(true)
            .build()
            .unwrap()
    }

    fn request() -> GetProfilesRequest {
        GetProfilesRequest::builder()
            .set_id("profiles-1")
            .set_to(jid("pubsub.example.com"))
            .set_from(jid("trader@example.com/desk"))
            .set_jid(jid("trader@example.com"))
            .build()
            .unwrap()
    }

    #[test]
    fn request_requires_a_jid() {
        let error = GetProfilesRequest::builder()
            .set_id("id")
            .set_to(jid("pubsub.example.com"))
            .set_from(jid("trader@example.com"))
            .build()
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "The get-profiles request 'jid' has not been set"
        );
        assert_eq!(request().jid(), Some(&jid("trader@example.com")));
    }

    #[test]
    fn result_keeps_profiles_in_order() {
        let mut builder = GetProfilesResult::result_for(&request());
        builder
            .add_profile(profile("p1"))
            .unwrap()
            .add_profiles([profile("p2"), profile("p3")])
            .unwrap();
        let result = builder.build().unwrap();

        let ids: Vec<&str> = result
            .profiles()
            .iter()
            .filter_map(Profile::id)
            .map(ProfileId::value)
            .collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
        assert_eq!(result.envelope().id(), Some("profiles-1"));
    }

    #[test]
    fn empty_result_is_valid() {
        let result = GetProfilesResult::result_for(&request()).build().unwrap();
        assert!(result.profiles().is_empty());
    }

    #[test]
    fn duplicate_profile_ids_are_rejected_on_add() {
        let mut builder = GetProfilesResult::builder();
        builder.add_profile(profile("p1")).unwrap();
        let error = builder.add_profile(profile("p1")).unwrap_err();
        assert_eq!(error.to_string(), "The profile id must be unique");
        assert_eq!(builder.profiles().len(), 1);

        let error = GetProfilesResult::builder()
            .add_profiles([profile("p2"), profile("p2")])
            .unwrap_err();
        assert_eq!(error, BuildError::NotUnique("The profile id must be unique"));
    }

    #[test]
    fn profiles_without_ids_are_not_compared() {
        let mut diagnostics = Vec::new();
        let partial = Profile::builder().build_with_diagnostics(&mut diagnostics);
        let mut builder = GetProfilesResult::builder();
        builder
            .add_profile(partial.clone())
            .unwrap()
            .add_profile(partial)
            .unwrap();
        assert_eq!(builder.profiles().len(), 2);
    }
}
