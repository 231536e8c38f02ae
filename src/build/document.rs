use serde::{Deserialize, Serialize};

use crate::types::ObjectKind;

/// One extracted documentation page, as handed to the builder.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Source-relative name without suffix, e.g. `gen_modules/hydrobox.geostat.variogram`.
    pub docname: String,
    /// Source path. Defaults to `docname` + the manifest's `sourceSuffix`.
    #[serde(default)]
    pub filename: Option<String>,
    pub title: String,
    /// Extracted body text. May still contain HTML or reST markup.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub objects: Vec<DocumentedObject>,
}

/// An API symbol declared by a document.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DocumentedObject {
    /// Fully qualified name, e.g. `hydrobox.geostat.variogram`.
    pub name: String,
    pub kind: ObjectKind,
    /// Fragment on the owning page. Functions default to their full name;
    /// ignored for modules.
    #[serde(default)]
    pub anchor: Option<String>,
    /// Owning page when it isn't the declaring one (autosummary stubs).
    #[serde(default)]
    pub docname: Option<String>,
    /// One-line module description.
    #[serde(default)]
    pub synopsis: Option<String>,
}
