use crate::core::error::SeriesError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Cities with a housing price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Sydney,
    Melbourne,
    Brisbane,
    Adelaide,
    Perth,
    Hobart,
    Canberra,
    Darwin,
}

impl City {
    pub const ALL: [City; 8] = [
        City::Sydney,
        City::Melbourne,
        City::Brisbane,
        City::Adelaide,
        City::Perth,
        City::Hobart,
        City::Canberra,
        City::Darwin,
    ];

    /// Identifier used in config files and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            City::Sydney => "sydney",
            City::Melbourne => "melbourne",
            City::Brisbane => "brisbane",
            City::Adelaide => "adelaide",
            City::Perth => "perth",
            City::Hobart => "hobart",
            City::Canberra => "canberra",
            City::Darwin => "darwin",
        }
    }

    pub fn display_name(&self) -> String {
        let slug = self.slug();
        let mut chars = slug.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for City {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.slug() == wanted)
            .ok_or_else(|| SeriesError::UnknownCity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_parsing() {
        assert_eq!("sydney".parse::<City>().unwrap(), City::Sydney);
        assert_eq!(" Hobart ".parse::<City>().unwrap(), City::Hobart);
        assert_eq!(
            "gotham".parse::<City>(),
            Err(SeriesError::UnknownCity("gotham".to_string()))
        );
        assert_eq!(City::Canberra.display_name(), "Canberra");
        assert_eq!(City::Darwin.to_string(), "darwin");
    }
}
