//! Telephony sites.

use serde::{Deserialize, Serialize};

use crate::validate::{Build, ErrorSink, Requirement};

wire_enum!(
    /// The telephony platform behind a site.
    pub enum SiteType {
        Btsm => "BTSM",
        Cisco => "CISCO",
        Ipt => "IPT",
        Its => "ITS",
    }
);

const SITE_ID: Requirement = Requirement::new(
    "The site id has not been set",
    "Invalid site; missing site id is mandatory",
);
const SITE_TYPE: Requirement = Requirement::new(
    "The site type has not been set",
    "Invalid site; missing site type is mandatory",
);
const SITE_NAME: Requirement = Requirement::new(
    "The site name has not been set",
    "Invalid site; missing site name is mandatory",
);

/// A telephony site a profile or call lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    id: Option<i64>,
    default: Option<bool>,
    site_type: Option<SiteType>,
    name: Option<String>,
}

impl Site {
    /// Starts a new site builder.
    pub fn builder() -> SiteBuilder {
        SiteBuilder::default()
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_default(&self) -> Option<bool> {
        self.default
    }

    pub fn site_type(&self) -> Option<SiteType> {
        self.site_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Builder for [`Site`]; id, type and name are mandatory.
#[derive(Debug, Clone, Default)]
pub struct SiteBuilder {
    id: Option<i64>,
    default: Option<bool>,
    site_type: Option<SiteType>,
    name: Option<String>,
}

impl SiteBuilder {
    pub fn set_id(&mut self, id: i64) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn set_default(&mut self, default: bool) -> &mut Self {
        self.default = Some(default);
        self
    }

    pub fn set_type(&mut self, site_type: SiteType) -> &mut Self {
        self.site_type = Some(site_type);
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }
}

impl Build for SiteBuilder {
    type Output = Site;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.id.is_some(), &SITE_ID)?;
        sink.check(self.site_type.is_some(), &SITE_TYPE)?;
        sink.check(self.name.is_some(), &SITE_NAME)
    }

    fn assemble(&self) -> Site {
        Site {
            id: self.id,
            default: self.default,
            site_type: self.site_type,
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;

    #[test]
    fn builds_a_complete_site() {
        let site = Site::builder()
            .set_id(42)
            .set_default(true)
            .set_type(SiteType::Btsm)
            .set_name("itrader-dev-sm-5")
            .build()
            .unwrap();

        assert_eq!(site.id(), Some(42));
        assert_eq!(site.is_default(), Some(true));
        assert_eq!(site.site_type(), Some(SiteType::Btsm));
        assert_eq!(site.name(), Some("itrader-dev-sm-5"));
    }

    #[test]
    fn default_flag_is_optional() {
        let site = Site::builder()
            .set_id(1)
            .set_type(SiteType::Cisco)
            .set_name("cucm")
            .build()
            .unwrap();
        assert_eq!(site.is_default(), None);
    }

    #[test]
    fn strict_build_reports_first_missing_field() {
        let error = Site::builder().set_name("orphan").build().unwrap_err();
        assert_eq!(error, BuildError::NotSet("The site id has not been set"));

        let error = Site::builder().set_id(1).build().unwrap_err();
        assert_eq!(error.to_string(), "The site type has not been set");
    }

    #[test]
    fn diagnostic_build_reports_all_missing_fields() {
        let mut diagnostics = Vec::new();
        let site = Site::builder().build_with_diagnostics(&mut diagnostics);

        assert_eq!(
            diagnostics,
            vec![
                "Invalid site; missing site id is mandatory",
                "Invalid site; missing site type is mandatory",
                "Invalid site; missing site name is mandatory",
            ]
        );
        assert_eq!(site.id(), None);
    }

    #[test]
    fn site_type_labels() {
        assert_eq!(SiteType::from_label("ITS"), Some(SiteType::Its));
        assert_eq!(SiteType::from_label("its"), None);
        assert_eq!(SiteType::Ipt.label(), "IPT");
    }
}
