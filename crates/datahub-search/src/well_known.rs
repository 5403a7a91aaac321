//! The closed table of well-known filter aliases.
//!
//! Aliases are short symbolic names (`"$storymap"`) standing in for
//! pre-defined compound filter fragments. The table is configuration data:
//! built once on first use, immutable afterwards, and safe to read from any
//! number of in-flight searches. It is not user-extensible.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::filter::ContentFilterDefinition;
use crate::match_options::{MatchOptions, MatchOptionsInput};

static EXPANSIONS: OnceLock<BTreeMap<&'static str, Vec<ContentFilterDefinition>>> =
    OnceLock::new();

/// Looks up the expansion fragments for an alias. `None` for unknown
/// aliases; an empty slice for known-but-placeholder aliases.
pub fn expansions_for(alias: &str) -> Option<&'static [ContentFilterDefinition]> {
    expansions().get(alias).map(|fragments| fragments.as_slice())
}

/// Returns true when the alias exists in the table.
pub fn is_well_known(alias: &str) -> bool {
    expansions().contains_key(alias)
}

/// All alias names in the table.
pub fn alias_names() -> impl Iterator<Item = &'static str> {
    expansions().keys().copied()
}

fn expansions() -> &'static BTreeMap<&'static str, Vec<ContentFilterDefinition>> {
    EXPANSIONS.get_or_init(build_expansions)
}

fn fragment(fields: &[(&str, MatchOptionsInput)]) -> ContentFilterDefinition {
    let mut definition = ContentFilterDefinition::default();
    for (name, value) in fields {
        definition.fields.insert((*name).to_string(), value.clone());
    }
    definition
}

fn one(value: &str) -> MatchOptionsInput {
    MatchOptionsInput::One(value.to_string())
}

fn many(values: &[&str]) -> MatchOptionsInput {
    MatchOptionsInput::Many(values.iter().map(|v| v.to_string()).collect())
}

fn options(value: MatchOptions) -> MatchOptionsInput {
    MatchOptionsInput::Options(value)
}

// TODO: fill in the $dataset expansion once the dataset family is defined
fn build_expansions() -> BTreeMap<&'static str, Vec<ContentFilterDefinition>> {
    let mut table: BTreeMap<&'static str, Vec<ContentFilterDefinition>> = BTreeMap::new();

    table.insert(
        "$apps",
        vec![fragment(&[
            (
                "type",
                options(
                    MatchOptions::from_any([
                        "Code Sample",
                        "Web Mapping Application",
                        "Mobile Application",
                        "Application",
                        "Desktop Application Template",
                        "Desktop Application",
                        "Operation View",
                        "Dashboard",
                        "Operations Dashboard Extension",
                        "Workforce Project",
                        "Insights Workbook",
                        "Insights Page",
                        "Insights Model",
                        "Hub Page",
                        "Hub Initiative",
                        "Hub Site Application",
                        "StoryMap",
                        "Web Experience",
                        "Web Experience Template",
                        "Form",
                    ])
                    .with_not([
                        "Code Attachment",
                        "Featured Items",
                        "Symbol Set",
                        "Color Set",
                        "Windows Viewer Add In",
                        "Windows Viewer Configuration",
                        "Map Area",
                        "Indoors Map Configuration",
                    ]),
                ),
            ),
            (
                "typekeywords",
                options(MatchOptions::default().with_not(["MapAreaPackage", "SMX"])),
            ),
        ])],
    );

    table.insert(
        "$storymap",
        vec![
            fragment(&[("type", one("StoryMap"))]),
            fragment(&[
                ("type", one("Web Mapping Application")),
                ("typekeywords", many(&["Story Map"])),
            ]),
        ],
    );

    table.insert(
        "$dashboard",
        vec![fragment(&[
            ("type", one("Dashboard")),
            (
                "typekeywords",
                options(MatchOptions::from_any(["Dashboard"]).with_not([
                    "ArcGIS Operation View",
                    "Add In",
                    "Extension",
                ])),
            ),
        ])],
    );

    // Placeholder: expands to nothing.
    table.insert("$dataset", Vec::new());

    table.insert(
        "$experience",
        vec![fragment(&[(
            "type",
            options(
                MatchOptions::from_any(["Web Experience"]).with_not(["Web Experience Template"]),
            ),
        )])],
    );

    table.insert(
        "$site",
        vec![
            fragment(&[("type", many(&["Hub Site Application", "Site Application"]))]),
            fragment(&[
                ("type", many(&["Web Mapping Application"])),
                ("typekeywords", many(&["hubSite"])),
            ]),
        ],
    );

    table.insert(
        "$initiative",
        vec![fragment(&[(
            "type",
            options(
                MatchOptions::from_any(["Hub Initiative"]).with_not(["Hub Initiative Template"]),
            ),
        )])],
    );

    table.insert(
        "$document",
        vec![fragment(&[
            (
                "type",
                options(
                    MatchOptions::from_any([
                        "Image",
                        "Layout",
                        "Desktop Style",
                        "Project Template",
                        "Report Template",
                        "Pro Report",
                        "Statistical Data Collection",
                        "360 VR Experience",
                        "netCDF",
                        "PDF",
                        "CSV",
                        "Administrative Report",
                        "Raster function template",
                    ])
                    .with_not([
                        "Image Service",
                        "Explorer Document",
                        "Explorer Map",
                        "Globe Document",
                        "Scene Document",
                        "Code Attachment",
                        "Featured Items",
                        "Symbol Set",
                        "ColorSet",
                        "Windows Viewer Add In",
                        "Windows Viewer Configuration",
                        "Map Area",
                        "Indoors Map Configuration",
                    ]),
                ),
            ),
            (
                "typekeywords",
                options(MatchOptions::from_any(["Document"]).with_not(["MapAreaPackage", "SMX"])),
            ),
        ])],
    );

    table
}
