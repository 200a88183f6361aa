//! The upstream JSON envelope and its conversion into domain records.

use serde::Deserialize;

use manse_tables::{CalendarRecord, LunarDate, SolarDate};

use crate::error::UpstreamError;

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub response: ApiResponse,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub header: ApiHeader,
    #[serde(default)]
    pub body: Option<ApiBody>,
}

#[derive(Debug, Deserialize)]
pub struct ApiHeader {
    #[serde(rename = "resultCode")]
    pub result_code: String,
    #[serde(rename = "resultMsg", default)]
    pub result_msg: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiBody {
    #[serde(default)]
    pub items: ApiItems,
    #[serde(rename = "totalCount", default)]
    pub total_count: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiItems {
    #[serde(default)]
    pub item: Vec<ApiItem>,
}

/// One calendar equivalence item. The service encodes every field as a
/// string ("2024", "01", "윤"/"평").
#[derive(Debug, Clone, Deserialize)]
pub struct ApiItem {
    #[serde(rename = "solYear")]
    pub sol_year: String,
    #[serde(rename = "solMonth")]
    pub sol_month: String,
    #[serde(rename = "solDay")]
    pub sol_day: String,
    #[serde(rename = "lunYear")]
    pub lun_year: String,
    #[serde(rename = "lunMonth")]
    pub lun_month: String,
    #[serde(rename = "lunDay")]
    pub lun_day: String,
    #[serde(rename = "lunLeapmonth", default)]
    pub lun_leap_month: String,
}

fn field<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, UpstreamError> {
    raw.trim().parse().map_err(|_| UpstreamError::Malformed(format!(
        "field {name} held {raw:?}"
    )))
}

impl ApiItem {
    /// Parses the string fields into a validated [`CalendarRecord`].
    pub fn to_record(&self) -> Result<CalendarRecord, UpstreamError> {
        let solar = SolarDate::new(
            field("solYear", &self.sol_year)?,
            field("solMonth", &self.sol_month)?,
            field("solDay", &self.sol_day)?,
        )
        .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        let lunar = LunarDate::new(
            field("lunYear", &self.lun_year)?,
            field("lunMonth", &self.lun_month)?,
            field("lunDay", &self.lun_day)?,
            self.lun_leap_month.trim() == "윤",
        )
        .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        Ok(CalendarRecord { solar, lunar })
    }
}

/// Applies the success contract to a parsed envelope: result code `"00"`
/// and at least one item, of which the first is taken.
pub fn parse_envelope(envelope: ApiEnvelope) -> Result<CalendarRecord, UpstreamError> {
    let header = &envelope.response.header;
    if header.result_code != "00" {
        return Err(UpstreamError::Rejected {
            code: header.result_code.clone(),
            message: header.result_msg.clone(),
        });
    }
    let first = envelope
        .response
        .body
        .and_then(|body| body.items.item.into_iter().next())
        .ok_or(UpstreamError::Empty)?;
    first.to_record()
}
