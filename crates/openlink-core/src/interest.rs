//! Interests: lines or extensions a user can monitor and control.

use crate::types::{InterestId, InterestType};
use crate::validate::{Build, ErrorSink, Requirement};

const INTEREST_ID: Requirement = Requirement::new(
    "The interest id has not been set",
    "Invalid interest; missing interest id is mandatory",
);
const INTEREST_TYPE: Requirement = Requirement::new(
    "The interest type has not been set",
    "Invalid interest; missing interest type is mandatory",
);
const INTEREST_LABEL: Requirement = Requirement::new(
    "The interest label has not been set",
    "Invalid interest; missing interest label is mandatory",
);
const INTEREST_DEFAULT: Requirement = Requirement::new(
    "The interest default indicator has not been set",
    "Invalid interest; missing interest default indicator is mandatory",
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    id: Option<InterestId>,
    interest_type: Option<InterestType>,
    label: Option<String>,
    default: Option<bool>,
}

impl Interest {
    pub fn builder() -> InterestBuilder {
        InterestBuilder::default()
    }

    pub fn id(&self) -> Option<&InterestId> {
        self.id.as_ref()
    }

    pub fn interest_type(&self) -> Option<&InterestType> {
        self.interest_type.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_default(&self) -> Option<bool> {
        self.default
    }
}

#[derive(Debug, Clone, Default)]
pub struct InterestBuilder {
    id: Option<InterestId>,
    interest_type: Option<InterestType>,
    label: Option<String>,
    default: Option<bool>,
}

impl InterestBuilder {
    pub fn set_id(&mut self, id: InterestId) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn set_type(&mut self, interest_type: InterestType) -> &mut Self {
        self.interest_type = Some(interest_type);
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_default(&mut self, default: bool) -> &mut Self {
        self.default = Some(default);
        self
    }
}

impl Build for InterestBuilder {
    type Output = Interest;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.id.is_some(), &INTEREST_ID)?;
        sink.check(self.interest_type.is_some(), &INTEREST_TYPE)?;
        sink.check(self.label.is_some(), &INTEREST_LABEL)?;
        sink.check(self.default.is_some(), &INTEREST_DEFAULT)
    }

    fn assemble(&self) -> Interest {
        Interest {
            id: self.id.clone(),
            interest_type: self.interest_type.clone(),
            label: self.label.clone(),
            default: self.default,
        }
    }
}
