//! Concurrent enrichment fetching with per-request error isolation.
//!
//! An enrichment is an extra property of an item that lives behind its own
//! endpoint (item data, group membership, metadata, owning org). All
//! requested enrichments are fetched concurrently; a failed request never
//! aborts the batch — its error is collected into a side list and the
//! property stays unset.

use serde::Deserialize;
use serde_json::Value;

use crate::client::PortalClient;
use crate::error::Result;
use crate::models::Item;

/// Typekeywords that mark content as created by the hub platform.
const HUB_TYPE_KEYWORDS: [&str; 2] = ["Enterprise Sites", "ArcGIS Hub"];

/// The enrichments this SDK knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Enrichment {
    /// The item's data payload.
    Data,
    /// Ids of all groups the item is shared to.
    GroupIds,
    /// Formal item metadata.
    Metadata,
    /// The owning user's org id.
    OrgId,
}

impl Enrichment {
    /// Property name used in error reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Enrichment::Data => "data",
            Enrichment::GroupIds => "groupIds",
            Enrichment::Metadata => "metadata",
            Enrichment::OrgId => "orgId",
        }
    }
}

/// Error captured while fetching one enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentError {
    /// Which enrichment failed.
    pub enrichment: &'static str,
    /// The failure, stringified.
    pub message: String,
}

/// Fetched enrichment properties plus any per-request errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichments {
    pub data: Option<Value>,
    pub group_ids: Option<Vec<String>>,
    pub metadata: Option<Value>,
    pub org_id: Option<String>,
    pub errors: Vec<EnrichmentError>,
}

/// Decides which enrichments are worth fetching for an item.
///
/// Group ids and metadata are always missing on a bare item. The owning org
/// id is only needed for hub-created web maps; the data payload only for
/// types whose behavior depends on it.
pub fn missing_enrichments(item: &Item) -> Vec<Enrichment> {
    let mut missing = vec![Enrichment::GroupIds, Enrichment::Metadata];
    if item.org_id.is_none() && is_hub_created_content(item) {
        missing.push(Enrichment::OrgId);
    }
    if should_fetch_data(item) {
        missing.push(Enrichment::Data);
    }
    missing
}

fn is_hub_created_content(item: &Item) -> bool {
    item.item_type == "Web Map"
        && item
            .type_keywords
            .iter()
            .any(|keyword| HUB_TYPE_KEYWORDS.contains(&keyword.as_str()))
}

fn should_fetch_data(item: &Item) -> bool {
    matches!(item.item_type.as_str(), "Solution" | "Web Mapping Application")
        && item
            .type_keywords
            .iter()
            .any(|keyword| keyword == "Template" || keyword == "Solution")
}

/// Fetches the given enrichments for an item, all requests in flight at
/// once. Always resolves; failures land in [`Enrichments::errors`].
pub async fn fetch_enrichments(
    client: &PortalClient,
    item: &Item,
    enrichments: &[Enrichment],
) -> Enrichments {
    let mut handles = Vec::with_capacity(enrichments.len());
    for &enrichment in enrichments {
        let client = client.clone();
        let item = item.clone();
        handles.push((
            enrichment,
            tokio::spawn(async move { fetch_one(&client, &item, enrichment).await }),
        ));
    }

    let mut result = Enrichments::default();
    for (enrichment, handle) in handles {
        match handle.await {
            Ok(Ok(value)) => apply(&mut result, value),
            Ok(Err(error)) => {
                tracing::warn!(enrichment = enrichment.name(), %error, "enrichment fetch failed");
                result.errors.push(EnrichmentError {
                    enrichment: enrichment.name(),
                    message: error.to_string(),
                });
            }
            Err(join_error) => result.errors.push(EnrichmentError {
                enrichment: enrichment.name(),
                message: join_error.to_string(),
            }),
        }
    }
    result
}

enum FetchedValue {
    Data(Value),
    GroupIds(Vec<String>),
    Metadata(Value),
    OrgId(String),
}

fn apply(result: &mut Enrichments, value: FetchedValue) {
    match value {
        FetchedValue::Data(data) => result.data = Some(data),
        FetchedValue::GroupIds(ids) => result.group_ids = Some(ids),
        FetchedValue::Metadata(metadata) => result.metadata = Some(metadata),
        FetchedValue::OrgId(org_id) => result.org_id = Some(org_id),
    }
}

#[derive(Debug, Deserialize)]
struct ItemGroups {
    #[serde(default)]
    admin: Vec<GroupRef>,
    #[serde(default)]
    member: Vec<GroupRef>,
    #[serde(default)]
    other: Vec<GroupRef>,
}

#[derive(Debug, Deserialize)]
struct GroupRef {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRef {
    #[serde(default)]
    org_id: Option<String>,
}

async fn fetch_one(
    client: &PortalClient,
    item: &Item,
    enrichment: Enrichment,
) -> Result<FetchedValue> {
    match enrichment {
        Enrichment::Data => {
            let data: Value = client
                .get(&format!("/content/items/{}/data", item.id), &[])
                .await?;
            Ok(FetchedValue::Data(data))
        }
        Enrichment::GroupIds => {
            let groups: ItemGroups = client
                .get(&format!("/content/items/{}/groups", item.id), &[])
                .await?;
            let ids = groups
                .admin
                .into_iter()
                .chain(groups.member)
                .chain(groups.other)
                .map(|group| group.id)
                .collect();
            Ok(FetchedValue::GroupIds(ids))
        }
        Enrichment::Metadata => {
            let metadata: Value = client
                .get(
                    &format!("/content/items/{}/info/metadata/metadata.json", item.id),
                    &[],
                )
                .await?;
            Ok(FetchedValue::Metadata(metadata))
        }
        Enrichment::OrgId => {
            let owner = item.owner.clone().unwrap_or_default();
            let user: UserRef = client
                .get(&format!("/community/users/{}", owner), &[])
                .await?;
            Ok(FetchedValue::OrgId(user.org_id.unwrap_or_default()))
        }
    }
}
