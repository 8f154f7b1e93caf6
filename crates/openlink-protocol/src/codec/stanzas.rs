//! [`StanzaCodec`] for every stanza kind and for the [`Stanza`] dispatcher.

use openlink_core::{InterestId, IqType, Jid, PhoneNumber, ProfileId};
use tracing::debug;

use super::entities::{
    decode_call_status, decode_interest, decode_make_call_feature, decode_originator_references,
    decode_profile, encode_call_status, encode_interest, encode_make_call_feature,
    encode_originator_references, encode_profile,
};
use super::{
    StanzaCodec, command_element, encode_request, encode_result, finalize,
    io_section, text_element,
};
use crate::element::Element;
use crate::error::{ProtocolError, ProtocolResult};
use crate::stanza::{
    Command, GetInterestRequest, GetInterestResult, GetInterestsRequest, GetInterestsResult,
    GetProfilesRequest, GetProfilesResult, MakeCallRequest, MakeCallResult, Stanza,
    StanzaBuilder,
};
use crate::{INTERESTS_NS, PROFILES_NS};

const MISSING_PROFILES: &str = "Invalid get-profiles result; missing 'profiles' element is mandatory";
const NO_PROFILES: &str = "Invalid get-profiles result; no 'profile' elements present";

fn jid_input(jid: Option<&Jid>) -> Vec<Element> {
    jid.map(|jid| text_element("jid", jid.to_string()))
        .into_iter()
        .collect()
}

impl StanzaCodec for GetProfilesRequest {
    fn to_element(&self) -> Element {
        encode_request(self.envelope(), Command::GetProfiles, jid_input(self.jid()))
    }

    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let input = io_section(element, Command::GetProfiles, "in")?;
        let mut builder = GetProfilesRequest::builder();
        if let Some(jid) = Jid::from(input.child_text("jid")) {
            builder.set_jid(jid);
        }
        Ok(finalize(&mut builder, element, Vec::new(), Vec::new(), diagnostics))
    }
}

impl StanzaCodec for GetProfilesResult {
    fn to_element(&self) -> Element {
        let profiles = Element::new("profiles")
            .with_attribute("xmlns", PROFILES_NS)
            .with_children(self.profiles().iter().map(encode_profile));
        encode_result(self.envelope(), Command::GetProfiles, vec![profiles])
    }

    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let output = io_section(element, Command::GetProfiles, "out")?;
        let mut builder = GetProfilesResult::builder();
        let mut read = Vec::new();
        let mut shape = Vec::new();
        match output.child("profiles") {
            Some(profiles) => {
                for profile in profiles.children_named("profile") {
                    builder.add_profile(decode_profile(profile, &mut read))?;
                }
                if builder.profiles().is_empty() {
                    shape.push(NO_PROFILES.to_string());
                }
            }
            None => shape.push(MISSING_PROFILES.to_string()),
        }
        Ok(finalize(&mut builder, element, read, shape, diagnostics))
    }
}

impl StanzaCodec for GetInterestsRequest {
    fn to_element(&self) -> Element {
        encode_request(self.envelope(), Command::GetInterests, jid_input(self.jid()))
    }

    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let input = io_section(element, Command::GetInterests, "in")?;
        let mut builder = GetInterestsRequest::builder();
        if let Some(jid) = Jid::from(input.child_text("jid")) {
            builder.set_jid(jid);
        }
        Ok(finalize(&mut builder, element, Vec::new(), Vec::new(), diagnostics))
    }
}

impl StanzaCodec for GetInterestsResult {
    fn to_element(&self) -> Element {
        let interests = Element::new("interests")
            .with_attribute("xmlns", INTERESTS_NS)
            .with_children(self.interests().iter().map(encode_interest));
        encode_result(self.envelope(), Command::GetInterests, vec![interests])
    }

    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let output = io_section(element, Command::GetInterests, "out")?;
        let mut builder = GetInterestsResult::builder();
        let mut read = Vec::new();
        if let Some(interests) = output.child("interests") {
            for interest in interests.children_named("interest") {
                builder.add_interest(decode_interest(interest, &mut read))?;
            }
        }
        Ok(finalize(&mut builder, element, read, Vec::new(), diagnostics))
    }
}

impl StanzaCodec for GetInterestRequest {
    fn to_element(&self) -> Element {
        let input = self
            .interest_id()
            .map(|id| text_element("interest", id.value()))
            .into_iter()
            .collect();
        encode_request(self.envelope(), Command::GetInterest, input)
    }

    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let input = io_section(element, Command::GetInterest, "in")?;
        let mut builder = GetInterestRequest::builder();
        if let Some(id) = InterestId::from(input.child_text("interest")) {
            builder.set_interest_id(id);
        }
        Ok(finalize(&mut builder, element, Vec::new(), Vec::new(), diagnostics))
    }
}

impl StanzaCodec for GetInterestResult {
    fn to_element(&self) -> Element {
        let interests = Element::new("interests")
            .with_attribute("xmlns", INTERESTS_NS)
            .with_children(self.interest().map(encode_interest));
        encode_result(self.envelope(), Command::GetInterest, vec![interests])
    }

    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let output = io_section(element, Command::GetInterest, "out")?;
        let mut builder = GetInterestResult::builder();
        let mut read = Vec::new();
        if let Some(interest) = output.descend(&["interests", "interest"]) {
            builder.set_interest(decode_interest(interest, &mut read));
        }
        Ok(finalize(&mut builder, element, read, Vec::new(), diagnostics))
    }
}

impl StanzaCodec for MakeCallRequest {
    fn to_element(&self) -> Element {
        let mut input = jid_input(self.jid());
        if let Some(profile) = self.profile_id() {
            input.push(text_element("profile", profile.value()));
        }
        if let Some(interest) = self.interest_id() {
            input.push(text_element("interest", interest.value()));
        }
        if let Some(destination) = self.destination() {
            input.push(text_element("destination", destination.value()));
        }
        input.extend(encode_originator_references(self.originator_references()));
        if !self.features().is_empty() {
            input.push(
                Element::new("features")
                    .with_children(self.features().iter().map(encode_make_call_feature)),
            );
        }
        encode_request(self.envelope(), Command::MakeCall, input)
    }

    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let input = io_section(element, Command::MakeCall, "in")?;
        let mut builder = MakeCallRequest::builder();
        let mut read = Vec::new();
        if let Some(jid) = Jid::from(input.child_text("jid")) {
            builder.set_jid(jid);
        }
        if let Some(profile) = ProfileId::from(input.child_text("profile")) {
            builder.set_profile_id(profile);
        }
        if let Some(interest) = InterestId::from(input.child_text("interest")) {
            builder.set_interest_id(interest);
        }
        if let Some(destination) = PhoneNumber::from(input.child_text("destination")) {
            builder.set_destination(destination);
        }
        builder.add_originator_references(decode_originator_references(
            input.child("originator-ref"),
            &mut read,
        ));
        if let Some(features) = input.child("features") {
            for feature in features.children_named("feature") {
                builder.add_feature(decode_make_call_feature(feature, &mut read));
            }
        }
        Ok(finalize(&mut builder, element, read, Vec::new(), diagnostics))
    }
}

impl StanzaCodec for MakeCallResult {
    fn to_element(&self) -> Element {
        let output = self.call_status().map(encode_call_status).into_iter().collect();
        encode_result(self.envelope(), Command::MakeCall, output)
    }

    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let output = io_section(element, Command::MakeCall, "out")?;
        let mut builder = MakeCallResult::builder();
        let mut read = Vec::new();
        if let Some(status) = output.child("callstatus") {
            builder.set_call_status(decode_call_status(status, &mut read));
        }
        Ok(finalize(&mut builder, element, read, Vec::new(), diagnostics))
    }
}

/// Whether an `iq` carries a command result rather than a request.
///
/// The `iq` type decides; without a usable type the `iodata` direction does.
fn carries_result(iq: &Element, command: &Element) -> bool {
    match iq.attribute("type").and_then(IqType::from_label) {
        Some(IqType::Result) => true,
        Some(IqType::Get | IqType::Set) => false,
        Some(IqType::Error) | None => {
            command
                .child("iodata")
                .and_then(|iodata| iodata.attribute("type"))
                == Some("output")
        }
    }
}

impl StanzaCodec for Stanza {
    fn to_element(&self) -> Element {
        debug!(
            command = self.command().name(),
            result = self.is_result(),
            "rendering stanza"
        );
        match self {
            Self::GetProfilesRequest(stanza) => stanza.to_element(),
            Self::GetProfilesResult(stanza) => stanza.to_element(),
            Self::GetInterestsRequest(stanza) => stanza.to_element(),
            Self::GetInterestsResult(stanza) => stanza.to_element(),
            Self::GetInterestRequest(stanza) => stanza.to_element(),
            Self::GetInterestResult(stanza) => stanza.to_element(),
            Self::MakeCallRequest(stanza) => stanza.to_element(),
            Self::MakeCallResult(stanza) => stanza.to_element(),
        }
    }

    /// Reads any known stanza, choosing the kind from the command node and
    /// whether the `iq` is a request or a result.
    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self> {
        let command_element = command_element(element)?;
        let node = command_element.attribute("node").unwrap_or_default();
        let command =
            Command::from_node(node).ok_or_else(|| ProtocolError::UnknownCommand(node.to_string()))?;
        let result = carries_result(element, command_element);

        let first = diagnostics.len();
        let stanza: Stanza = match (command, result) {
            (Command::GetProfiles, false) => {
                GetProfilesRequest::from_element(element, diagnostics)?.into()
            }
            (Command::GetProfiles, true) => {
                GetProfilesResult::from_element(element, diagnostics)?.into()
            }
            (Command::GetInterests, false) => {
                GetInterestsRequest::from_element(element, diagnostics)?.into()
            }
            (Command::GetInterests, true) => {
                GetInterestsResult::from_element(element, diagnostics)?.into()
            }
            (Command::GetInterest, false) => {
                GetInterestRequest::from_element(element, diagnostics)?.into()
            }
            (Command::GetInterest, true) => {
                GetInterestResult::from_element(element, diagnostics)?.into()
            }
            (Command::MakeCall, false) => MakeCallRequest::from_element(element, diagnostics)?.into(),
            (Command::MakeCall, true) => MakeCallResult::from_element(element, diagnostics)?.into(),
        };

        debug!(
            command = command.name(),
            result,
            diagnostics = diagnostics.len() - first,
            "parsed stanza"
        );
        Ok(stanza)
    }
}
