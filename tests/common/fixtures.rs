//! Small catalogs with known answers.

use typeahead::Catalog;

/// The three-entry catalog from the `"gi"` scenario.
pub const GI_LABELS: &[&str] = &["Giraffe", "Gila monster", "Gorilla, western lowland"];

/// Labels exercising every tier for the query `"owl"`.
pub const OWL_LABELS: &[&str] = &[
    "Snowy owl",
    "Owl, burrowing",
    "Owl, great horned",
    "Burrowing owl",
    "Great owlet",
    "Bowl snake",
    "Howler monkey",
    "Ewe",
];

/// Labels for multi-token queries.
pub const DEER_LABELS: &[&str] = &[
    "Red deer",
    "Deer, red",
    "Swamp deer",
    "Deer, mule",
    "Red kangaroo",
    "Fox, north american red",
];

pub fn catalog_of(labels: &[&str]) -> Catalog {
    Catalog::from_lines(labels.iter().copied()).expect("fixture catalog must not be empty")
}

pub fn gi_catalog() -> Catalog {
    catalog_of(GI_LABELS)
}

pub fn owl_catalog() -> Catalog {
    catalog_of(OWL_LABELS)
}

pub fn deer_catalog() -> Catalog {
    catalog_of(DEER_LABELS)
}
