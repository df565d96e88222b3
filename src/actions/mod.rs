// Page actions triggered from the toolbar and annotation panels
pub mod basket;
pub mod items;
pub mod thumbnails;
pub mod toolbar;

pub use basket::{add_to_basket, BasketCounter, BasketOutcome};
pub use items::{AnnotationPanel, ItemActionOutcome, PendingItemAction};
pub use thumbnails::ThumbnailRegistry;
pub use toolbar::ToolbarDropdowns;

/// User-facing input errors. Server errors are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Please select at least one element.")]
    NothingSelected,
}

/// Blocking dialogs shown to the user.
pub trait Dialogs {
    fn alert(&self, message: &str);
}

/// Lets other windows know the activity list (deletes, scripts) changed.
pub trait ActivityNotifier {
    fn refresh_activities(&self);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::client::ActionTransport;
    use parking_lot::Mutex;
    use serde_json::Value;

    #[derive(Default)]
    pub struct RecordingDialogs {
        alerts: Mutex<Vec<String>>,
    }

    impl RecordingDialogs {
        pub fn alerts(&self) -> Vec<String> {
            self.alerts.lock().clone()
        }
    }

    impl Dialogs for RecordingDialogs {
        fn alert(&self, message: &str) {
            self.alerts.lock().push(message.to_string());
        }
    }

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub count: Mutex<usize>,
    }

    impl ActivityNotifier for RecordingNotifier {
        fn refresh_activities(&self) {
            *self.count.lock() += 1;
        }
    }

    /// Replies with a fixed text or JSON body and records what was sent.
    pub struct RecordingTransport {
        text: String,
        json: Value,
        requests: Mutex<Vec<(String, String)>>,
        forms: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl RecordingTransport {
        pub fn replying_text(text: &str) -> Self {
            Self {
                text: text.to_string(),
                json: Value::Null,
                requests: Mutex::new(Vec::new()),
                forms: Mutex::new(Vec::new()),
            }
        }

        pub fn replying_json(json: Value) -> Self {
            Self {
                text: String::new(),
                json,
                requests: Mutex::new(Vec::new()),
                forms: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<(String, String)> {
            self.requests.lock().clone()
        }

        pub fn forms(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.forms.lock().clone()
        }
    }

    impl ActionTransport for RecordingTransport {
        async fn post_text(&self, url: &str, body: String) -> anyhow::Result<String> {
            self.requests.lock().push((url.to_string(), body));
            Ok(self.text.clone())
        }

        async fn post_form(&self, url: &str, fields: &[(&str, String)]) -> anyhow::Result<Value> {
            self.forms.lock().push((
                url.to_string(),
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
            Ok(self.json.clone())
        }
    }

    #[test]
    fn nothing_selected_message() {
        assert_eq!(
            ActionError::NothingSelected.to_string(),
            "Please select at least one element."
        );
    }
}
