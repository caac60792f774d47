use serde::{Deserialize, Serialize};

/// UK income tax region. Scotland sets its own bands; England, Wales and
/// Northern Ireland share the rest-of-UK bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UkRegion {
    #[default]
    RestOfUk,
    Scotland,
}

impl UkRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RestOfUk => "RUK",
            Self::Scotland => "SCOTLAND",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ruk" | "rest-of-uk" | "england" | "wales" | "northern-ireland" | "ni" => {
                Some(Self::RestOfUk)
            }
            "scotland" | "scot" => Some(Self::Scotland),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RestOfUk => "England, Wales & Northern Ireland",
            Self::Scotland => "Scotland",
        }
    }
}
