use anyhow::Result;
use serde_json::Value;

use super::{ActivityNotifier, Dialogs};
use crate::client::ActionTransport;
use crate::node_utils::NodeUtils;

/// One annotation (tag, file, comment) shown in the metadata panel. Its
/// element id is `ID-TYPE`, e.g. `461-comment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationItem {
    pub element_id: String,
    pub text: String,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationContainer {
    pub name: String,
    pub items: Vec<AnnotationItem>,
    pub visible: bool,
}

impl AnnotationContainer {
    pub fn new(name: &str, items: Vec<AnnotationItem>) -> Self {
        let mut container = Self {
            name: name.to_string(),
            items,
            visible: true,
        };
        container.hide_if_empty();
        container
    }

    pub fn hide_if_empty(&mut self) -> bool {
        self.visible = !self.items.is_empty();
        self.visible
    }
}

/// Annotation lists of the currently displayed object.
#[derive(Debug, Default)]
pub struct AnnotationPanel {
    pub containers: Vec<AnnotationContainer>,
    pub cursor: usize,
}

impl AnnotationPanel {
    pub fn new(containers: Vec<AnnotationContainer>) -> Self {
        Self {
            containers,
            cursor: 0,
        }
    }

    /// Visible items in display order.
    pub fn visible_items(&self) -> Vec<&AnnotationItem> {
        self.containers
            .iter()
            .filter(|c| c.visible)
            .flat_map(|c| c.items.iter())
            .collect()
    }

    pub fn focused(&self) -> Option<&AnnotationItem> {
        self.visible_items().get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_items().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    /// Drop the item and hide its container when it becomes empty.
    /// Returns whether the container was hidden, or `None` if not found.
    pub fn remove_item(&mut self, element_id: &str) -> Option<bool> {
        let container = self
            .containers
            .iter_mut()
            .find(|c| c.items.iter().any(|i| i.element_id == element_id))?;
        container.items.retain(|i| i.element_id != element_id);
        let hidden = !container.hide_if_empty();
        let len = self.visible_items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        Some(hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ItemActionKind {
    /// Unlink from `parent` (e.g. `image-257`), optionally at a field index.
    Remove {
        parent: String,
        index: Option<usize>,
    },
    /// Delete the annotation itself.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemActionOutcome {
    Done { container_hidden: bool },
    Rejected(String),
}

/// A remove or delete waiting for the user's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingItemAction {
    element_id: String,
    annotation_type: String,
    url: String,
    kind: ItemActionKind,
}

impl PendingItemAction {
    pub fn remove(element_id: &str, url: &str, parent: &str, index: Option<usize>) -> Option<Self> {
        Self::new(
            element_id,
            url,
            ItemActionKind::Remove {
                parent: parent.to_string(),
                index,
            },
        )
    }

    pub fn delete(element_id: &str, url: &str) -> Option<Self> {
        Self::new(element_id, url, ItemActionKind::Delete)
    }

    fn new(element_id: &str, url: &str, kind: ItemActionKind) -> Option<Self> {
        let Some(annotation_type) = NodeUtils::second_segment(element_id) else {
            log::debug!("items: element id '{element_id}' has no annotation type");
            return None;
        };
        Some(Self {
            element_id: element_id.to_string(),
            annotation_type: annotation_type.to_string(),
            url: url.to_string(),
            kind,
        })
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Object the annotation is unlinked from; `None` for deletes.
    pub fn parent(&self) -> Option<&str> {
        match &self.kind {
            ItemActionKind::Remove { parent, .. } => Some(parent.as_str()),
            ItemActionKind::Delete => None,
        }
    }

    pub fn is_delete(&self) -> bool {
        self.kind == ItemActionKind::Delete
    }

    /// Question to confirm before anything is sent.
    pub fn prompt(&self) -> String {
        match self.kind {
            ItemActionKind::Remove { .. } => format!("Remove {}?", self.annotation_type),
            ItemActionKind::Delete => format!("Delete {}?", self.annotation_type),
        }
    }

    /// Send the confirmed request. The panel is only touched once the server
    /// reports success.
    pub async fn execute<T, D, N>(
        self,
        transport: &T,
        dialogs: &D,
        notifier: &N,
        panel: &mut AnnotationPanel,
    ) -> Result<ItemActionOutcome>
    where
        T: ActionTransport,
        D: Dialogs + ?Sized,
        N: ActivityNotifier + ?Sized,
    {
        let fields: Vec<(&str, String)> = match &self.kind {
            ItemActionKind::Remove { parent, index } => vec![
                ("parent", parent.clone()),
                ("index", index.map(|i| i.to_string()).unwrap_or_default()),
            ],
            ItemActionKind::Delete => Vec::new(),
        };

        let reply = transport.post_form(&self.url, &fields).await?;
        if is_truthy(reply.get("bad").unwrap_or(&Value::Null)) {
            let message = reply
                .get("errs")
                .map(value_text)
                .unwrap_or_else(|| "Unknown error".to_string());
            log::warn!("items: {} of {} failed: {message}", self.verb(), self.element_id);
            dialogs.alert(&message);
            return Ok(ItemActionOutcome::Rejected(message));
        }

        let container_hidden = panel.remove_item(&self.element_id).unwrap_or(false);
        log::info!("items: {} {}", self.verb(), self.element_id);
        if self.is_delete() {
            notifier.refresh_activities();
        }
        Ok(ItemActionOutcome::Done { container_hidden })
    }

    fn verb(&self) -> &'static str {
        match self.kind {
            ItemActionKind::Remove { .. } => "removed",
            ItemActionKind::Delete => "deleted",
        }
    }
}

/// Truthiness of the `bad` flag, which servers send as a bool, a number or
/// the strings `"true"`/`"false"`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !matches!(
            s.trim(),
            "" | "false" | "0" | "null" | "undefined" | "False"
        ),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
