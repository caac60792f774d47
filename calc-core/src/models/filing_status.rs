use serde::{Deserialize, Serialize};

/// US federal filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
    QualifyingSurvivingSpouse,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 5] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
        Self::HeadOfHousehold,
        Self::QualifyingSurvivingSpouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
            Self::QualifyingSurvivingSpouse => "QSS",
        }
    }

    /// Parses a status code. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" | "SINGLE" => Some(Self::Single),
            "MFJ" => Some(Self::MarriedFilingJointly),
            "MFS" => Some(Self::MarriedFilingSeparately),
            "HOH" => Some(Self::HeadOfHousehold),
            "QSS" => Some(Self::QualifyingSurvivingSpouse),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
            Self::QualifyingSurvivingSpouse => "Qualifying Surviving Spouse",
        }
    }

    /// The status whose rate schedule this status is taxed under.
    ///
    /// A qualifying surviving spouse uses the joint schedule.
    pub fn schedule_status(&self) -> Self {
        match self {
            Self::QualifyingSurvivingSpouse => Self::MarriedFilingJointly,
            other => *other,
        }
    }
}

impl Default for FilingStatus {
    fn default() -> Self {
        Self::Single
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for status in FilingStatus::ALL {
            assert_eq!(FilingStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            FilingStatus::parse(" mfj "),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(FilingStatus::parse("single"), Some(FilingStatus::Single));
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(FilingStatus::parse("XYZ"), None);
    }

    #[test]
    fn surviving_spouse_uses_joint_schedule() {
        assert_eq!(
            FilingStatus::QualifyingSurvivingSpouse.schedule_status(),
            FilingStatus::MarriedFilingJointly
        );
        assert_eq!(
            FilingStatus::HeadOfHousehold.schedule_status(),
            FilingStatus::HeadOfHousehold
        );
    }
}
