//! Query builder for locating previously-exported copies of an item.
//!
//! Exports are stored as regular items tagged with typekeywords recording
//! the source item, source layer, and the spatial reference they were
//! projected to. The query produced here is portal dialect, but with a
//! fixed grammar pinned by long-standing fixtures, so it is built directly
//! rather than through the filter engine.

/// Spatial reference applied when none is requested, and always applied to
/// export formats that do not support projection.
const WGS84_WKID: &str = "4326";

struct ExportTypeDef {
    item_type: &'static str,
    supports_projection: bool,
}

/// Item types an export may be stored as, in default query order. KML and
/// GeoJSON are always WGS84; collections follow their base format.
const PORTAL_EXPORT_TYPES: [ExportTypeDef; 9] = [
    ExportTypeDef {
        item_type: "CSV",
        supports_projection: true,
    },
    ExportTypeDef {
        item_type: "CSV Collection",
        supports_projection: true,
    },
    ExportTypeDef {
        item_type: "KML",
        supports_projection: false,
    },
    ExportTypeDef {
        item_type: "KML Collection",
        supports_projection: false,
    },
    ExportTypeDef {
        item_type: "Shapefile",
        supports_projection: true,
    },
    ExportTypeDef {
        item_type: "File Geodatabase",
        supports_projection: true,
    },
    ExportTypeDef {
        item_type: "GeoJson",
        supports_projection: false,
    },
    ExportTypeDef {
        item_type: "Microsoft Excel",
        supports_projection: true,
    },
    ExportTypeDef {
        item_type: "Feature Collection",
        supports_projection: false,
    },
];

/// Options narrowing an existing-exports query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingExportsOptions {
    /// Layer the export was taken from; `None` targets whole-item exports.
    pub layer_id: Option<u32>,
    /// Restrict to these export item types; defaults to all supported.
    pub only_types: Option<Vec<String>>,
    /// Requested spatial reference; only honored by formats that support
    /// projection.
    pub spatial_ref_id: Option<String>,
}

/// Builds the portal query matching all existing exports of an item.
pub fn build_existing_exports_portal_query(
    item_id: &str,
    options: &ExistingExportsOptions,
) -> String {
    let layer_keyword = match options.layer_id {
        Some(layer_id) => format!("exportLayer:0{}", layer_id),
        None => "exportLayer:null".to_string(),
    };

    let type_names: Vec<String> = match &options.only_types {
        Some(only_types) => only_types.clone(),
        None => PORTAL_EXPORT_TYPES
            .iter()
            .map(|def| def.item_type.to_string())
            .collect(),
    };

    let type_clauses: Vec<String> = type_names
        .iter()
        .map(|type_name| {
            format!(
                " (type:\"{}\" AND typekeywords:\"spatialRefId:{}\")",
                type_name,
                spatial_ref_for(type_name, options.spatial_ref_id.as_deref())
            )
        })
        .collect();

    format!(
        "(typekeywords:\"exportItem:{}\" AND typekeywords:\"{}\") AND ({})",
        item_id,
        layer_keyword,
        type_clauses.join(" OR ")
    )
}

fn spatial_ref_for<'a>(type_name: &str, requested: Option<&'a str>) -> &'a str {
    let supports_projection = PORTAL_EXPORT_TYPES
        .iter()
        .find(|def| def.item_type == type_name)
        .map(|def| def.supports_projection)
        .unwrap_or(false);
    match requested {
        Some(spatial_ref_id) if supports_projection => spatial_ref_id,
        _ => WGS84_WKID,
    }
}
