//! Navigation state machine for a single pagination session.

use super::error::PaginationError;
use super::page::Page;

/// A discrete navigation action captured from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    Forward,
    Backward,
    Close,
}

impl Navigation {
    /// Action segment used in button custom IDs.
    pub fn as_action(self) -> &'static str {
        match self {
            Self::Forward => "next",
            Self::Backward => "prev",
            Self::Close => "close",
        }
    }

    /// Parse an action segment from a button custom ID.
    pub fn from_action(raw: &str) -> Option<Self> {
        match raw {
            "next" => Some(Self::Forward),
            "prev" => Some(Self::Backward),
            "close" => Some(Self::Close),
            _ => None,
        }
    }
}

/// Outcome of applying one navigation event to a [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The current page changed and must be rendered again.
    Moved,
    /// The event hit a boundary and left the state untouched.
    Unchanged,
    /// The session closed with this event.
    Closed,
    /// The session was already closed, so the event was dropped.
    Ignored,
}

/// Pages plus the current position of one interactive session.
///
/// Invariant: `current < pages.len()` and `pages` is never empty.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pages: Vec<Page<T>>,
    current: usize,
    closed: bool,
}

impl<T> ViewState<T> {
    /// Open a session on the first page.
    pub fn start(pages: Vec<Page<T>>) -> Result<Self, PaginationError> {
        if pages.is_empty() {
            return Err(PaginationError::InvalidArgument(
                "a session needs at least one page",
            ));
        }

        Ok(Self {
            pages,
            current: 0,
            closed: false,
        })
    }

    /// Apply a navigation event. Movement saturates at both ends and never wraps.
    pub fn handle(&mut self, event: Navigation) -> Transition {
        if self.closed {
            return Transition::Ignored;
        }

        match event {
            Navigation::Forward if !self.is_last() => {
                self.current += 1;
                Transition::Moved
            }
            Navigation::Backward if !self.is_first() => {
                self.current -= 1;
                Transition::Moved
            }
            Navigation::Forward | Navigation::Backward => Transition::Unchanged,
            Navigation::Close => {
                self.closed = true;
                Transition::Closed
            }
        }
    }

    /// Zero-based index of the page being shown.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &Page<T> {
        &self.pages[self.current]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.pages.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
