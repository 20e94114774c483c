use serde::{Deserialize, Serialize};
use tablecraft_core::{PlacedPiece, TableTemplate, Template};

/// A recorded round: the pieces the player drew and, optionally, the template.
///
/// ```json
/// {
///   "template": [{ "x": 100, "y": 100 }],
///   "pieces": [{ "left": 95, "top": 95, "right": 105, "bottom": 105 }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoundFile {
    /// Falls back to the default table when omitted.
    #[serde(default)]
    pub template: Option<Template>,
    #[serde(default)]
    pub pieces: Vec<PlacedPiece>,
}

impl RoundFile {
    pub fn template_or_default(&self) -> Template {
        self.template
            .clone()
            .unwrap_or_else(|| TableTemplate::default().build())
    }
}
