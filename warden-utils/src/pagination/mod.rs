//! Stable facade for the paginated result viewer used by command handlers.
//!
//! The pure core (`page`, `navigation`, `session`) knows nothing about Discord.
//! The remaining modules adapt it to twilight: buttons, renderers, the message
//! sink and the interaction router.

/// Default idle timeout for pagination sessions.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Default number of items shown on one page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

mod components;
mod error;
pub mod interaction;
mod navigation;
mod page;
pub mod registry;
pub mod respond;
mod session;
pub mod token;
mod view;

pub use components::{LinkButton, build_link_components, build_nav_components};
pub use error::PaginationError;
pub use interaction::{
    PressRoute, handle_pagination_interaction, is_pagination_custom_id, route_press,
};
pub use navigation::{Navigation, Transition, ViewState};
pub use page::{Page, build_pages, total_pages};
pub use registry::{DispatchOutcome, SessionHandle, SessionRegistry};
pub use respond::{DiscordSink, send_paginated};
pub use session::{
    ChannelSource, InteractionSource, Polled, Renderer, SessionSink, Teardown, run_session,
};
pub use view::{FieldPageRenderer, ListPageRenderer, PageChrome, PageMessage};
