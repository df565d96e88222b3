use serde::{Deserialize, Serialize};

/// One selected domain object, normalized from whichever widget changed
/// selection last.
///
/// `id` is always `TYPE-NUMBER` (e.g. `image-257`). The remaining fields are
/// context tags that only some sources fill in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectedObject {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fileset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_suffix: Option<String>,
}

impl SelectedObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_rel(mut self, rel: Option<String>) -> Self {
        self.rel = rel;
        self
    }

    pub fn with_class(mut self, class: Option<String>) -> Self {
        self.class = class;
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Type half of the id (`image` for `image-257`).
    pub fn object_type(&self) -> &str {
        self.id.split_once('-').map(|(t, _)| t).unwrap_or(&self.id)
    }

    /// Numeric half of the id, if it parses.
    pub fn object_id(&self) -> Option<u64> {
        self.id
            .split_once('-')
            .and_then(|(_, n)| n.parse::<u64>().ok())
    }
}

/// Platform modifier that toggles a single row in multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiKey {
    Meta,
    Ctrl,
}

impl MultiKey {
    /// `Meta` on anything identifying itself as a Mac, `Ctrl` elsewhere.
    pub fn detect(app_version: &str) -> Self {
        if app_version.contains("Mac") {
            MultiKey::Meta
        } else {
            MultiKey::Ctrl
        }
    }

    pub fn for_current_platform() -> Self {
        if std::env::consts::OS == "macos" {
            Self::detect("Mac")
        } else {
            Self::detect(std::env::consts::OS)
        }
    }
}

/// Modifier state accompanying a table click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub shift: bool,
    pub meta: bool,
    pub ctrl: bool,
}

impl ClickModifiers {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn multi(key: MultiKey) -> Self {
        match key {
            MultiKey::Meta => Self {
                meta: true,
                ..Default::default()
            },
            MultiKey::Ctrl => Self {
                ctrl: true,
                ..Default::default()
            },
        }
    }

    pub fn is_multi(&self, key: MultiKey) -> bool {
        match key {
            MultiKey::Meta => self.meta,
            MultiKey::Ctrl => self.ctrl,
        }
    }
}

/// Which center-panel view a pagination control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationView {
    Icon,
    Table,
}

impl PaginationView {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "icon" => Some(PaginationView::Icon),
            "table" => Some(PaginationView::Table),
            _ => None,
        }
    }
}

/// `rel` of the center panel's icon and table containers, each
/// `TYPE-ID[-...]` naming the tree node whose children they show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CenterContainers {
    pub icon_rel: Option<String>,
    pub table_rel: Option<String>,
}

impl CenterContainers {
    /// Both views showing the children of tree node `id`.
    pub fn showing(id: &str) -> Self {
        Self {
            icon_rel: Some(format!("{id}-icon")),
            table_rel: Some(format!("{id}-table")),
        }
    }

    pub fn rel_for(&self, view: PaginationView) -> Option<&str> {
        match view {
            PaginationView::Icon => self.icon_rel.as_deref(),
            PaginationView::Table => self.table_rel.as_deref(),
        }
    }
}

/// A well element clicked in the plate grid. Its id uses `=` as the type
/// separator (`well=12`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellElement {
    pub id: Option<String>,
    pub rel: Option<String>,
}

impl WellElement {
    pub fn new(id: &str, rel: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            rel: Some(rel.to_string()),
        }
    }
}
