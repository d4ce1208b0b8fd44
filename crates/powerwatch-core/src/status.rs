use serde::{Deserialize, Serialize};

/// Provider fields for the monitored housing unit.
///
/// Empty provider strings are normalised to `None` (and to `""` for
/// `sub_type`) at the fetch boundary, so consumers never see `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRecord {
    pub sub_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub outage_type: Option<String>,
}

impl HouseRecord {
    /// Builds a record from loosely-typed provider values.
    #[must_use]
    pub fn from_provider(
        sub_type: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        outage_type: Option<&str>,
    ) -> Self {
        Self {
            sub_type: sub_type.map(str::trim).unwrap_or_default().to_owned(),
            start_date: non_empty(start_date),
            end_date: non_empty(end_date),
            outage_type: non_empty(outage_type),
        }
    }
}

/// One sample of the provider's status for the monitored address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatus {
    /// `None` when the provider returned no record for the house at all.
    pub house: Option<HouseRecord>,
    /// Provider's "last updated" label. Display only.
    pub update_timestamp: Option<String>,
}

impl RawStatus {
    #[must_use]
    pub fn sub_type(&self) -> &str {
        self.house.as_ref().map_or("", |h| h.sub_type.as_str())
    }

    #[must_use]
    pub fn start_date(&self) -> Option<&str> {
        self.house.as_ref().and_then(|h| h.start_date.as_deref())
    }

    #[must_use]
    pub fn end_date(&self) -> Option<&str> {
        self.house.as_ref().and_then(|h| h.end_date.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
