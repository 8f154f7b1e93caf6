//! Shared test data.

use chrono::{Duration, TimeZone, Utc};
use openlink_core::{
    BooleanFeature, Build, Call, CallDirection, CallId, CallState, ConferenceId, DeviceId,
    FeatureId, FeatureType, Interest, InterestId, InterestType, Jid, MakeCallFeature,
    OriginatorReference, Participant, ParticipantType, PhoneNumber, Profile, ProfileId,
    RequestAction, Site, SiteType, SpeakerChannelFeature, TelephonyCallId,
};

use crate::stanza::{
    GetInterestsRequest, GetProfilesResult, GetProfilesResultBuilder, MakeCallRequest,
    MakeCallRequestBuilder, StanzaBuilder,
};

/// A make-call request with a valid envelope and every input but the jid.
pub const MAKE_CALL_REQUEST_WITHOUT_JID: &str = concat!(
    r#"<iq type="set" id="id1" to="server@example.com" from="user@example.com/resource">"#,
    r#"<command xmlns="http://jabber.org/protocol/commands" action="execute" node="http://xmpp.org/protocol/openlink:01:00:00#make-call">"#,
    r#"<iodata xmlns="urn:xmpp:tmp:io-data" type="input"><in>"#,
    "<profile>UCSM-profile</profile>",
    "<interest>sip:6001@uta.example.com</interest>",
    "<destination>6002</destination>",
    r#"<originator-ref><property id="key1"><value>value1</value></property></originator-ref>"#,
    "<features><feature><id>hs_1</id><value1>true</value1></feature></features>",
    "</in></iodata></command></iq>",
);

/// A result `iq` for `command` with a valid envelope and `out` holding `output`.
pub fn result_xml(command: &str, output: &str) -> String {
    format!(
        concat!(
            r#"<iq type="result" id="id1" to="user@example.com/resource" from="server@example.com">"#,
            r#"<command xmlns="http://jabber.org/protocol/commands" node="http://xmpp.org/protocol/openlink:01:00:00#{}" status="completed">"#,
            r#"<iodata xmlns="urn:xmpp:tmp:io-data" type="output"><out>{}</out></iodata>"#,
            "</command></iq>",
        ),
        command, output
    )
}

pub fn jid(raw: &str) -> Jid {
    Jid::parse(raw).unwrap()
}

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 10, 9, 8, 7, 0).unwrap()
}

pub fn site() -> Site {
    Site::builder()
        .set_id(42)
        .set_default(true)
        .set_type(SiteType::Btsm)
        .set_name("itrader-dev-sm-5")
        .build()
        .unwrap()
}

pub fn profile(id: &str) -> Profile {
    Profile::builder()
        .set_id(ProfileId::from(Some(id)).unwrap())
        .set_site(site())
        .set_default(true)
        .set_device(DeviceId::from(Some("uta")).unwrap())
        .set_label("7001")
        .set_online(true)
        .add_actions([RequestAction::AnswerCall, RequestAction::ClearCall])
        .build()
        .unwrap()
}

pub fn interest(id: &str) -> Interest {
    Interest::builder()
        .set_id(InterestId::from(Some(id)).unwrap())
        .set_type(InterestType::from(Some("DirectoryNumber")).unwrap())
        .set_label("6001/1")
        .set_default(true)
        .build()
        .unwrap()
}

fn number(raw: &str) -> PhoneNumber {
    PhoneNumber::from(Some(raw)).unwrap()
}

pub fn call() -> Call {
    let participant = Participant::builder()
        .set_jid(jid("bob@example.com"))
        .set_type(ParticipantType::Active)
        .set_direction(CallDirection::Incoming)
        .set_start_time(start())
        .set_duration(Duration::milliseconds(60_000))
        .build()
        .unwrap();

    Call::builder()
        .set_id(CallId::from(Some("call-1")).unwrap())
        .set_telephony_call_id(TelephonyCallId::from(Some("tel-1")).unwrap())
        .set_conference_id(ConferenceId::from(Some("conf-1")).unwrap())
        .set_site(site())
        .set_profile_id(ProfileId::from(Some("UCSM-profile")).unwrap())
        .set_interest_id(InterestId::from(Some("sip:6001@uta.example.com")).unwrap())
        .set_state(CallState::CallEstablished)
        .set_direction(CallDirection::Outgoing)
        .set_caller_number(number("6001"))
        .set_caller_name("Alice")
        .add_caller_e164_number(number("+441234566001"))
        .set_called_number(number("6002"))
        .set_called_name("Bob")
        .set_called_destination(number("6002"))
        .add_called_e164_numbers([number("+441234566002"), number("+441234566003")])
        .add_originator_reference(OriginatorReference::new("key1", "value1"))
        .set_start_time(start())
        .set_duration(Duration::milliseconds(60_000))
        .add_actions([RequestAction::ClearCall, RequestAction::HoldCall])
        .add_feature(
            BooleanFeature::new()
                .with_id(FeatureId::from(Some("hs_1")).unwrap())
                .with_kind(FeatureType::Handset)
                .with_label("Handset 1")
                .with_enabled(true),
        )
        .add_feature(
            SpeakerChannelFeature::new()
                .with_id(FeatureId::from(Some("spk_1")).unwrap())
                .with_label("Speaker 1")
                .with_channel(3)
                .with_microphone(true)
                .with_mute(false),
        )
        .add_participant(participant)
        .build()
        .unwrap()
}

pub fn make_call_request() -> MakeCallRequestBuilder {
    let feature = MakeCallFeature::builder()
        .set_id(FeatureId::from(Some("hs_1")).unwrap())
        .set_value1("true")
        .build()
        .unwrap();

    let mut builder = MakeCallRequest::builder();
    builder
        .set_to(jid("server@example.com"))
        .set_from(jid("user@example.com/resource"))
        .set_id("id1")
        .set_jid(jid("user@example.com"))
        .set_profile_id(ProfileId::from(Some("UCSM-profile")).unwrap())
        .set_interest_id(InterestId::from(Some("sip:6001@uta.example.com")).unwrap())
        .set_destination(number("6002"))
        .add_originator_reference(OriginatorReference::new("key1", "value1"))
        .add_feature(feature);
    builder
}

pub fn profiles_result() -> GetProfilesResultBuilder {
    let mut builder = GetProfilesResult::builder();
    builder
        .set_to(jid("user@example.com/resource"))
        .set_from(jid("server@example.com"))
        .set_id("id1");
    builder
        .add_profiles([profile("UCSM-profile"), profile("UCSM-profile-2")])
        .unwrap();
    builder
}

pub fn interests_request() -> GetInterestsRequest {
    let mut builder = GetInterestsRequest::builder();
    builder
        .set_to(jid("server@example.com"))
        .set_from(jid("user@example.com/resource"))
        .set_id("id2")
        .set_jid(jid("user@example.com"));
    builder.build().unwrap()
}
