//! Serde shapes of copygen.toml before lowering.

use std::{collections::BTreeMap, path::PathBuf};

use serde::Deserialize;

use super::GeneratorConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RawManifest {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub packages: Vec<RawPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RawPackage {
    pub name: String,

    /// Output directory, relative to the manifest. Defaults to the manifest directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub markers: Vec<String>,

    #[serde(default)]
    pub imports: BTreeMap<String, String>,

    #[serde(default)]
    pub types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RawType {
    pub name: String,

    #[serde(default)]
    pub markers: Vec<String>,

    #[serde(default)]
    pub fields: Vec<RawField>,

    /// Underlying type of a named non-struct type.
    #[serde(default)]
    pub underlying: Option<String>,

    #[serde(default)]
    pub interface: bool,

    /// Hand-written methods.
    #[serde(default)]
    pub methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RawField {
    /// Field name; may be omitted for embedded fields.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub embedded: bool,
}
