//! Catalogue of the matching-service operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A remote operation of the matching service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    CompanyMatch,
    IndividualNameMatch,
    AddressMatch,
    OrgStandard,
    BusinessInfo,
    ParentCompanyInfo,
    EmailTrustScore,
    CustomEnrichment,
}

pub const ALL_ENDPOINTS: [Endpoint; 8] = [
    Endpoint::CompanyMatch,
    Endpoint::IndividualNameMatch,
    Endpoint::AddressMatch,
    Endpoint::OrgStandard,
    Endpoint::BusinessInfo,
    Endpoint::ParentCompanyInfo,
    Endpoint::EmailTrustScore,
    Endpoint::CustomEnrichment,
];

impl Endpoint {
    /// URL path segment below the service base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CompanyMatch => "getcompanymatchadvanced",
            Endpoint::IndividualNameMatch => "getfullnamematch",
            Endpoint::AddressMatch => "getaddressmatchadvanced",
            Endpoint::OrgStandard => "getorgstandard",
            Endpoint::BusinessInfo => "getbusinessinfo",
            Endpoint::ParentCompanyInfo => "getparentcompanyinfo",
            Endpoint::EmailTrustScore => "emailtrustscore",
            Endpoint::CustomEnrichment => "getcustom",
        }
    }

    /// Query parameter carrying the looked-up value
    pub fn input_param(&self) -> &'static str {
        match self {
            Endpoint::CompanyMatch => "company",
            Endpoint::IndividualNameMatch => "fullname",
            Endpoint::AddressMatch => "address",
            Endpoint::OrgStandard => "org",
            Endpoint::BusinessInfo
            | Endpoint::ParentCompanyInfo
            | Endpoint::EmailTrustScore
            | Endpoint::CustomEnrichment => "lookup",
        }
    }

    /// Algorithm sent when the caller does not pick one. Only the advanced
    /// match endpoints accept an algorithm.
    pub fn default_algorithm(&self) -> Option<&'static str> {
        match self {
            Endpoint::CompanyMatch => Some("model-v4-wide"),
            Endpoint::AddressMatch => Some("model-v3-narrow"),
            _ => None,
        }
    }

    pub fn accepts_algorithm(&self) -> bool {
        self.default_algorithm().is_some()
    }

    /// JSON field holding the value used as a clustering key, if the endpoint
    /// produces one.
    pub fn key_field(&self) -> Option<&'static str> {
        match self {
            Endpoint::CompanyMatch | Endpoint::IndividualNameMatch | Endpoint::AddressMatch => {
                Some("SimKey")
            }
            Endpoint::OrgStandard => Some("Standard"),
            _ => None,
        }
    }

    /// Labelled response fields printed for a single lookup, in display order.
    /// `Code` and `Credits` are common to every endpoint and not listed here.
    /// Custom enrichment fields depend on the request and are empty.
    pub fn display_fields(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Endpoint::CompanyMatch => &[("SimKey", "Match Similarity Key")],
            Endpoint::IndividualNameMatch => &[("SimKey", "Similarity Key")],
            Endpoint::AddressMatch => &[("SimKey", "Address Similarity Key")],
            Endpoint::OrgStandard => &[("Standard", "Standardized Organization")],
            Endpoint::BusinessInfo => &[
                ("CompanyName", "Company Name"),
                ("CompanyURL", "Website"),
                ("CompanyLocation", "Location"),
                ("CompanyDescription", "Description"),
                ("Revenue", "Revenue"),
                ("NumberEmployees", "Employees"),
                ("NAICS", "NAICS"),
                ("TopExecutive", "Top Executive"),
                ("TopExecutiveTitle", "Top Executive Title"),
            ],
            Endpoint::ParentCompanyInfo => &[
                ("CompanyName", "Company Name"),
                ("CompanyURL", "Company URL"),
                ("ParentCompany", "Parent Company"),
                ("ParentCompanyLocation", "Parent Location"),
                ("ParentCompanyURL", "Parent Website"),
                ("ParentCompanyDescription", "Parent Description"),
                ("ParentCompanyReferenceURL", "Parent Reference URL"),
            ],
            Endpoint::EmailTrustScore => &[
                ("Email", "Email"),
                ("Score", "Trust Score"),
                ("Reasoning", "Reasoning"),
            ],
            Endpoint::CustomEnrichment => &[],
        }
    }

    /// Name used on the command line
    pub fn cli_name(&self) -> &'static str {
        match self {
            Endpoint::CompanyMatch => "company",
            Endpoint::IndividualNameMatch => "individual",
            Endpoint::AddressMatch => "address",
            Endpoint::OrgStandard => "org-standard",
            Endpoint::BusinessInfo => "business-info",
            Endpoint::ParentCompanyInfo => "parent-company",
            Endpoint::EmailTrustScore => "email-trust",
            Endpoint::CustomEnrichment => "custom",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cli_name())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_ENDPOINTS
            .iter()
            .find(|e| e.cli_name() == wanted || e.path() == wanted)
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> = ALL_ENDPOINTS.iter().map(|e| e.cli_name()).collect();
                format!("unknown endpoint '{}', expected one of: {}", s, names.join(", "))
            })
    }
}
