//! Location model for a single job search

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::JobMarketError;

/// One (city, region) pair to search jobs for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct LocationQuery {
    /// Human-readable place name
    pub city: String,
    /// Short administrative region code (province or state)
    pub region: String,
}

impl LocationQuery {
    /// Create a new location query, rejecting blank fields
    pub fn new(city: impl Into<String>, region: impl Into<String>) -> crate::Result<Self> {
        let city: String = city.into();
        let region: String = region.into();
        let query = Self {
            city: city.trim().to_string(),
            region: region.trim().to_string(),
        };
        query.validate()?;
        Ok(query)
    }

    /// Both fields must be non-empty for the search to mean anything
    pub fn validate(&self) -> crate::Result<()> {
        if self.city.trim().is_empty() {
            return Err(JobMarketError::validation(format!(
                "city cannot be empty (region '{}')",
                self.region
            )));
        }
        if self.region.trim().is_empty() {
            return Err(JobMarketError::validation(format!(
                "region cannot be empty (city '{}')",
                self.city
            )));
        }
        Ok(())
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.region)
    }
}

/// Parses `"City,REGION"` as given on the command line
impl FromStr for LocationQuery {
    type Err = JobMarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (city, region) = s.rsplit_once(',').ok_or_else(|| {
            JobMarketError::validation(format!("expected CITY,REGION but got '{s}'"))
        })?;
        Self::new(city, region)
    }
}
