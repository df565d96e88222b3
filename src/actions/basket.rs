use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::{ActionError, Dialogs};
use crate::client::ActionTransport;
use crate::node_utils::NodeUtils;

static SERVER_ERROR: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"(Error: ([A-z]+))")
        .case_insensitive(true)
        .build()
        .expect("Invalid regex pattern")
});

/// What the server said about a basket update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasketOutcome {
    /// Response text to hand to the cart-total updater.
    Updated(String),
    /// Server-reported error, shown to the user verbatim.
    Rejected(String),
}

/// Form body for adding ids to the basket: `action=add&image=1&dataset=2`.
pub fn basket_request_body<S: AsRef<str>>(ids: &[S]) -> Result<String, ActionError> {
    if ids.is_empty() {
        return Err(ActionError::NothingSelected);
    }
    let mut parts = vec!["action=add".to_string()];
    parts.extend(ids.iter().map(|id| NodeUtils::to_query_pair(id.as_ref())));
    Ok(parts.join("&"))
}

pub fn triage_basket_response(response: &str) -> BasketOutcome {
    if SERVER_ERROR.is_match(response) {
        BasketOutcome::Rejected(response.to_string())
    } else {
        BasketOutcome::Updated(response.to_string())
    }
}

/// Running total shown next to the basket button.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BasketCounter {
    total: usize,
}

impl BasketCounter {
    pub fn total(&self) -> usize {
        self.total
    }

    /// The server replies with the new item count.
    pub fn update(&mut self, response: &str) {
        match response.trim().parse::<usize>() {
            Ok(total) => self.total = total,
            Err(_) => log::warn!("basket: unexpected total '{}'", response.trim()),
        }
    }
}

/// POST the selected ids to the basket and route the reply to the counter
/// or to an alert.
pub async fn add_to_basket<T, D, S>(
    transport: &T,
    dialogs: &D,
    counter: &mut BasketCounter,
    url: &str,
    selected: &[S],
) -> anyhow::Result<Option<BasketOutcome>>
where
    T: ActionTransport,
    D: Dialogs + ?Sized,
    S: AsRef<str>,
{
    let body = match basket_request_body(selected) {
        Ok(body) => body,
        Err(e) => {
            dialogs.alert(&e.to_string());
            return Ok(None);
        }
    };

    let response = transport.post_text(url, body).await?;
    let outcome = triage_basket_response(&response);
    match &outcome {
        BasketOutcome::Rejected(message) => {
            log::warn!("basket: server rejected update: {message}");
            dialogs.alert(message);
        }
        BasketOutcome::Updated(total) => {
            log::info!("basket: added {} item(s)", selected.len());
            counter.update(total);
        }
    }
    Ok(Some(outcome))
}
