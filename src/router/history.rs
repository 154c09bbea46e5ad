//! Browser-history abstraction the router writes through.

use super::location::Location;

/// Options for a history update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Scroll to the top after the update.
    pub scroll: bool,
}

impl NavigateOptions {
    /// In-place update: keep scroll position and page state.
    pub const IN_PLACE: Self = Self { scroll: false };
    /// Regular navigation: scroll to top.
    pub const NAVIGATE: Self = Self { scroll: true };
}

/// Current URL plus the two ways to change it without a document reload.
pub trait History {
    fn location(&self) -> &Location;

    /// Adds an entry.
    fn push(&mut self, location: Location, options: NavigateOptions);

    /// Overwrites the current entry.
    fn replace(&mut self, location: Location, options: NavigateOptions);
}

/// In-process history, used by the protocol server and in tests.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    /// Entry on screen
    current: Location,
    /// Entries behind the current one
    past: Vec<Location>,
    /// Vertical scroll offset in pixels
    scroll_y: u32,
    /// Number of push and replace calls
    updates: usize,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self { current: initial, past: Vec::new(), scroll_y: 0, updates: 0 }
    }

    #[must_use]
    pub const fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub const fn set_scroll_y(&mut self, scroll_y: u32) {
        self.scroll_y = scroll_y;
    }

    /// Number of push/replace calls applied so far.
    #[must_use]
    pub const fn updates(&self) -> usize {
        self.updates
    }

    /// Number of entries, current included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.past.len() + 1
    }

    const fn apply_scroll(&mut self, options: NavigateOptions) {
        if options.scroll {
            self.scroll_y = 0;
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::parse("/"))
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &Location {
        &self.current
    }

    fn push(&mut self, location: Location, options: NavigateOptions) {
        let previous = std::mem::replace(&mut self.current, location);
        self.past.push(previous);
        self.apply_scroll(options);
        self.updates += 1;
    }

    fn replace(&mut self, location: Location, options: NavigateOptions) {
        self.current = location;
        self.apply_scroll(options);
        self.updates += 1;
    }
}
