use std::fmt;
use std::str::FromStr;

use poise::ChoiceParameter;

use crate::error::AppError;

/// Regional routing values for the Riot API (Account-v1, Match-v5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ChoiceParameter)]
pub enum Region {
    #[name = "Americas"]
    Americas,
    #[name = "Asia"]
    Asia,
    #[name = "Europe"]
    Europe,
    #[name = "SEA"]
    Sea,
}

impl Region {
    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "americas" => Ok(Self::Americas),
            "asia" => Ok(Self::Asia),
            "europe" => Ok(Self::Europe),
            "sea" => Ok(Self::Sea),
            _ => Err(AppError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_uses_routing_host() {
        assert_eq!(
            Region::Americas.base_url(),
            "https://americas.api.riotgames.com"
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Europe".parse::<Region>().unwrap(), Region::Europe);
        assert_eq!("SEA".parse::<Region>().unwrap(), Region::Sea);
        assert!("euw".parse::<Region>().is_err());
    }
}
