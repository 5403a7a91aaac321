//! Eager composition of a content record from an item and its enrichments.
//!
//! `HubContent` is an immutable snapshot: every derived property (URLs,
//! publication dates, update frequency) is computed once at construction
//! from the item, the formal metadata, and the enrichment results. Nothing
//! is recomputed on access.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::enrichments::Enrichments;
use crate::models::Item;
use crate::urls;

/// How much of a date string was actually specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Year,
    Month,
    Day,
    Time,
}

/// Maintenance frequency vocabulary from formal item metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateFrequency {
    Continual,
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    Biannually,
    Annually,
    AsNeeded,
    Irregular,
    NotPlanned,
    Unknown,
    Semimonthly,
}

impl UpdateFrequency {
    /// Maps an ISO 19115 maintenance frequency code onto the vocabulary.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "001" => Some(UpdateFrequency::Continual),
            "002" => Some(UpdateFrequency::Daily),
            "003" => Some(UpdateFrequency::Weekly),
            "004" => Some(UpdateFrequency::Fortnightly),
            "005" => Some(UpdateFrequency::Monthly),
            "006" => Some(UpdateFrequency::Quarterly),
            "007" => Some(UpdateFrequency::Biannually),
            "008" => Some(UpdateFrequency::Annually),
            "009" => Some(UpdateFrequency::AsNeeded),
            "010" => Some(UpdateFrequency::Irregular),
            "011" => Some(UpdateFrequency::NotPlanned),
            "012" => Some(UpdateFrequency::Unknown),
            "013" => Some(UpdateFrequency::Semimonthly),
            _ => None,
        }
    }
}

/// A date plus where it came from and how precise it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateInfo {
    pub date: DateTime<Utc>,
    /// Dotted path of the property the date was read from.
    pub source: String,
    pub precision: DatePrecision,
}

/// Parses a date string at whatever precision it carries.
///
/// Accepts `yyyy`, `yyyy-mm`, `yyyy-mm-dd`, or a full RFC 3339 timestamp;
/// anything else yields `None`.
pub fn parse_iso_date_string(value: &str) -> Option<(DateTime<Utc>, DatePrecision)> {
    let parts: Vec<&str> = value.split('-').collect();
    match parts.as_slice() {
        [year] => {
            let year: i32 = year.parse().ok()?;
            let date = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()?;
            Some((date, DatePrecision::Year))
        }
        [year, month] => {
            let year: i32 = year.parse().ok()?;
            let month: u32 = month.parse().ok()?;
            let date = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
            Some((date, DatePrecision::Month))
        }
        [year, month, day] if day.len() <= 2 => {
            let date = NaiveDate::from_ymd_opt(
                year.parse().ok()?,
                month.parse().ok()?,
                day.parse().ok()?,
            )?;
            let date = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
            Some((date, DatePrecision::Day))
        }
        _ => {
            let date = DateTime::parse_from_rfc3339(value).ok()?;
            Some((date.with_timezone(&Utc), DatePrecision::Time))
        }
    }
}

/// Dotted-path lookup into a JSON value, e.g. `"resMaint.maintFreq.code"`.
pub fn get_deep<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

// Paths into the formal metadata document, relative to its root. The
// `source` string reported alongside a derived date prefixes these with
// "metadata." to name the enrichment property they were read under.
const UPDATE_FREQUENCY_PATH: &str = "metadata.resMaint.maintFreq.MaintFreqCd.@_value";
const METADATA_UPDATE_FREQUENCY_PATH: &str = "metadata.mdMaint.maintFreq.MaintFreqCd.@_value";
const METADATA_UPDATED_DATE_PATH: &str = "metadata.mdDateSt";
const REVISE_DATE_PATH: &str = "metadata.dataIdInfo.idCitation.date.reviseDate";
const PUB_DATE_PATH: &str = "metadata.dataIdInfo.idCitation.date.pubDate";
const CREATE_DATE_PATH: &str = "metadata.dataIdInfo.idCitation.date.createDate";

fn metadata_string(metadata: Option<&Value>, path: &str) -> Option<String> {
    let value = get_deep(metadata?, path)?;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn date_info_from_metadata(metadata: Option<&Value>, path: &str) -> Option<DateInfo> {
    let raw = metadata_string(metadata, path)?;
    let (date, precision) = parse_iso_date_string(&raw)?;
    Some(DateInfo {
        date,
        source: format!("metadata.{}", path),
        precision,
    })
}

fn item_date_info(epoch_ms: i64, source: &str) -> DateInfo {
    DateInfo {
        date: Utc
            .timestamp_millis_opt(epoch_ms)
            .single()
            .unwrap_or_default(),
        source: format!("item.{}", source),
        precision: DatePrecision::Day,
    }
}

fn updated_date_info(item: &Item, metadata: Option<&Value>) -> DateInfo {
    date_info_from_metadata(metadata, REVISE_DATE_PATH)
        .unwrap_or_else(|| item_date_info(item.modified, "modified"))
}

fn published_date_info(item: &Item, metadata: Option<&Value>) -> DateInfo {
    date_info_from_metadata(metadata, PUB_DATE_PATH)
        .or_else(|| date_info_from_metadata(metadata, CREATE_DATE_PATH))
        .unwrap_or_else(|| item_date_info(item.created, "created"))
}

fn metadata_updated_date_info(item: &Item, metadata: Option<&Value>) -> DateInfo {
    date_info_from_metadata(metadata, METADATA_UPDATED_DATE_PATH)
        .unwrap_or_else(|| item_date_info(item.modified, "modified"))
}

fn update_frequency(metadata: Option<&Value>, path: &str) -> Option<UpdateFrequency> {
    metadata_string(metadata, path).and_then(|code| UpdateFrequency::from_code(&code))
}

/// An immutable content record with every derived property precomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubContent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Snippet when present, otherwise the description.
    pub summary: Option<String>,
    pub owner: Option<String>,
    pub org_id: Option<String>,
    pub access: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub url: Option<String>,
    pub portal_home_url: String,
    pub portal_api_url: String,
    pub portal_data_url: String,
    pub thumbnail_url: Option<String>,
    pub published_date: DateInfo,
    pub updated_date: DateInfo,
    pub metadata_updated_date: DateInfo,
    pub update_frequency: Option<UpdateFrequency>,
    pub metadata_update_frequency: Option<UpdateFrequency>,
    pub group_ids: Option<Vec<String>>,
    pub data: Option<Value>,
    pub metadata: Option<Value>,
    /// The item the record was composed from.
    pub item: Item,
}

/// Composes a [`HubContent`] record from an item plus its fetched
/// enrichments. All derivation happens here, once.
pub fn compose_content(
    item: Item,
    enrichments: &Enrichments,
    portal_base: &str,
    token: Option<&str>,
) -> HubContent {
    let metadata = enrichments.metadata.as_ref();
    HubContent {
        id: item.id.clone(),
        title: item.title.clone().unwrap_or_default(),
        content_type: item.item_type.clone(),
        summary: item.snippet.clone().or_else(|| item.description.clone()),
        owner: item.owner.clone(),
        org_id: item.org_id.clone().or_else(|| enrichments.org_id.clone()),
        access: item.access.clone(),
        tags: item.tags.clone(),
        categories: item.categories.clone(),
        url: item.url.clone(),
        portal_home_url: urls::item_home_url(portal_base, &item.id),
        portal_api_url: urls::item_api_url(portal_base, &item.id, token),
        portal_data_url: urls::item_data_url(portal_base, &item.id, token),
        thumbnail_url: urls::item_thumbnail_url(portal_base, &item, token),
        published_date: published_date_info(&item, metadata),
        updated_date: updated_date_info(&item, metadata),
        metadata_updated_date: metadata_updated_date_info(&item, metadata),
        update_frequency: update_frequency(metadata, UPDATE_FREQUENCY_PATH),
        metadata_update_frequency: update_frequency(metadata, METADATA_UPDATE_FREQUENCY_PATH),
        group_ids: enrichments.group_ids.clone(),
        data: enrichments.data.clone(),
        metadata: enrichments.metadata.clone(),
        item,
    }
}
