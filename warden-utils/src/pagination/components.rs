//! Pagination UI component builders (previous/close/next and link buttons).

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::navigation::Navigation;
use super::token::build_custom_id;

/// Discord allows at most five buttons in one action row.
const MAX_BUTTONS_PER_ROW: usize = 5;

/// An external link rendered as a URL button under a paginated message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

impl LinkButton {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Build previous/close/next button components for a paginated message.
///
/// Single-page results get no navigation row at all.
pub fn build_nav_components(
    session_id: u64,
    current_index: usize,
    total_pages: usize,
    owner_id: u64,
) -> Vec<Component> {
    if total_pages <= 1 {
        return vec![];
    }

    let nav_button = |action: Navigation, label: &str, style: ButtonStyle, disabled: bool| {
        Component::Button(Button {
            custom_id: Some(build_custom_id(session_id, action, owner_id)),
            disabled,
            emoji: None,
            label: Some(label.to_owned()),
            style,
            url: None,
            sku_id: None,
        })
    };

    vec![Component::ActionRow(ActionRow {
        components: vec![
            nav_button(
                Navigation::Backward,
                "◀ Prev",
                ButtonStyle::Secondary,
                current_index == 0,
            ),
            nav_button(Navigation::Close, "✖ Close", ButtonStyle::Danger, false),
            nav_button(
                Navigation::Forward,
                "Next ▶",
                ButtonStyle::Secondary,
                current_index + 1 >= total_pages,
            ),
        ],
    })]
}

/// Build rows of URL buttons, five per row.
pub fn build_link_components(links: &[LinkButton]) -> Vec<Component> {
    links
        .chunks(MAX_BUTTONS_PER_ROW)
        .map(|chunk| {
            Component::ActionRow(ActionRow {
                components: chunk
                    .iter()
                    .map(|link| {
                        Component::Button(Button {
                            custom_id: None,
                            disabled: false,
                            emoji: None,
                            label: Some(link.label.clone()),
                            style: ButtonStyle::Link,
                            url: Some(link.url.clone()),
                            sku_id: None,
                        })
                    })
                    .collect(),
            })
        })
        .collect()
}
