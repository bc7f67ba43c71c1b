//! Renderers turning a page plus its view state into an embed and components.

use twilight_model::channel::message::{
    component::Component,
    embed::{Embed, EmbedField},
};

use crate::embed::build_paginated_embed;

use super::components::{LinkButton, build_link_components, build_nav_components};
use super::navigation::ViewState;
use super::page::Page;
use super::session::Renderer;

/// Everything a paginated message needs besides the page content.
#[derive(Clone, Debug)]
pub struct PageChrome {
    pub title: String,
    pub color: u32,
    pub owner_id: u64,
    /// `None` for single-page results, which carry no navigation buttons.
    pub session_id: Option<u64>,
    /// URL buttons shown under every page.
    pub links: Vec<LinkButton>,
}

impl PageChrome {
    pub fn new(title: impl Into<String>, color: u32, owner_id: u64) -> Self {
        Self {
            title: title.into(),
            color,
            owner_id,
            session_id: None,
            links: Vec::new(),
        }
    }

    pub fn with_links(mut self, links: Vec<LinkButton>) -> Self {
        self.links = links;
        self
    }

    pub fn with_session(mut self, session_id: Option<u64>) -> Self {
        self.session_id = session_id;
        self
    }

    /// Navigation row (when paginated) followed by link rows.
    fn components<T>(&self, view: &ViewState<T>) -> Vec<Component> {
        let mut components = match self.session_id {
            Some(session_id) => build_nav_components(
                session_id,
                view.current_index(),
                view.page_count(),
                self.owner_id,
            ),
            None => vec![],
        };
        components.extend(build_link_components(&self.links));
        components
    }

    /// Components left on the message after navigation is torn down.
    pub fn retained_components(&self) -> Vec<Component> {
        build_link_components(&self.links)
    }
}

/// A rendered page ready to be sent or edited in.
#[derive(Clone, Debug)]
pub struct PageMessage {
    pub embed: Embed,
    pub components: Vec<Component>,
}

/// Renders each page as a set of embed fields.
pub struct FieldPageRenderer {
    chrome: PageChrome,
}

impl FieldPageRenderer {
    pub fn new(chrome: PageChrome) -> Self {
        Self { chrome }
    }
}

impl Renderer<EmbedField> for FieldPageRenderer {
    type Message = PageMessage;

    fn render(
        &self,
        page: &Page<EmbedField>,
        view: &ViewState<EmbedField>,
    ) -> anyhow::Result<PageMessage> {
        let embed = build_paginated_embed(
            &self.chrome.title,
            self.chrome.color,
            None,
            page.items(),
            view.current_index() + 1,
            view.page_count(),
        )?;

        Ok(PageMessage {
            embed,
            components: self.chrome.components(view),
        })
    }
}

/// Renders each page as lines of the embed description.
pub struct ListPageRenderer {
    chrome: PageChrome,
    bullet: Option<&'static str>,
}

impl ListPageRenderer {
    pub fn new(chrome: PageChrome) -> Self {
        Self {
            chrome,
            bullet: None,
        }
    }

    /// Prefix every line with `bullet`.
    pub fn bulleted(mut self, bullet: &'static str) -> Self {
        self.bullet = Some(bullet);
        self
    }
}

impl Renderer<String> for ListPageRenderer {
    type Message = PageMessage;

    fn render(&self, page: &Page<String>, view: &ViewState<String>) -> anyhow::Result<PageMessage> {
        let description = page
            .items()
            .iter()
            .map(|line| match self.bullet {
                Some(bullet) => format!("{bullet}{line}"),
                None => line.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n");

        let embed = build_paginated_embed(
            &self.chrome.title,
            self.chrome.color,
            Some(&description),
            &[],
            view.current_index() + 1,
            view.page_count(),
        )?;

        Ok(PageMessage {
            embed,
            components: self.chrome.components(view),
        })
    }
}
