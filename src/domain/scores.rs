use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

/// Score for one subscale. Always within `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Band(u8);

impl Band {
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Band {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Band::new)
            .ok_or_else(|| format!("band {value} is outside 0..=5"))
    }
}

impl From<Band> for u8 {
    fn from(band: Band) -> Self {
        band.0
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four rubric dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Subscale {
    #[strum(to_string = "Content", serialize = "content")]
    Content,
    #[strum(
        to_string = "Communicative Achievement",
        serialize = "communicative",
        serialize = "communicative-achievement"
    )]
    Communicative,
    #[strum(to_string = "Organisation", serialize = "organisation", serialize = "organization")]
    Organisation,
    #[strum(to_string = "Language", serialize = "language")]
    Language,
}

impl Subscale {
    pub const ALL: [Subscale; 4] = [
        Subscale::Content,
        Subscale::Communicative,
        Subscale::Organisation,
        Subscale::Language,
    ];

    /// Field name used in stored records and provider payloads.
    pub fn key(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Communicative => "communicative",
            Self::Organisation => "organisation",
            Self::Language => "language",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub content: Band,
    pub communicative: Band,
    pub organisation: Band,
    pub language: Band,
}

impl ScoreState {
    pub fn get(&self, subscale: Subscale) -> Band {
        match subscale {
            Subscale::Content => self.content,
            Subscale::Communicative => self.communicative,
            Subscale::Organisation => self.organisation,
            Subscale::Language => self.language,
        }
    }

    pub fn with(mut self, subscale: Subscale, band: Band) -> Self {
        let slot = match subscale {
            Subscale::Content => &mut self.content,
            Subscale::Communicative => &mut self.communicative,
            Subscale::Organisation => &mut self.organisation,
            Subscale::Language => &mut self.language,
        };
        *slot = band;
        self
    }

    /// Sum of the four bands, out of 20.
    pub fn total(&self) -> u8 {
        Subscale::ALL.iter().map(|s| self.get(*s).value()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn band(v: u8) -> Band {
        Band::new(v).unwrap()
    }

    #[test]
    fn band_rejects_values_above_five() {
        assert!(Band::new(5).is_some());
        assert!(Band::new(6).is_none());
        assert!(Band::try_from(-1_i64).is_err());
    }

    #[test]
    fn score_state_rejects_out_of_range_json() {
        let bad = r#"{"content":7,"communicative":3,"organisation":5,"language":2}"#;
        assert!(serde_json::from_str::<ScoreState>(bad).is_err());
    }

    #[test]
    fn total_sums_all_subscales() {
        let scores = ScoreState::default()
            .with(Subscale::Content, band(4))
            .with(Subscale::Communicative, band(3))
            .with(Subscale::Organisation, band(5))
            .with(Subscale::Language, band(2));
        assert_eq!(scores.total(), 14);
        assert_eq!(scores.get(Subscale::Organisation), band(5));
    }

    #[test]
    fn subscale_parses_keys_and_names() {
        assert_eq!(Subscale::from_str("communicative").unwrap(), Subscale::Communicative);
        assert_eq!(
            Subscale::from_str("Communicative Achievement").unwrap(),
            Subscale::Communicative
        );
        assert_eq!(Subscale::from_str("organization").unwrap(), Subscale::Organisation);
        assert_eq!(Subscale::Language.to_string(), "Language");
    }

    #[test]
    fn scores_serialize_as_plain_integers() {
        let scores = ScoreState::default().with(Subscale::Language, band(3));
        let value = serde_json::to_value(scores).unwrap();
        assert_eq!(value["language"], 3);
        assert_eq!(value["content"], 0);
    }
}
