//! Visibility state machine for the floating widget.
//!
//! Three states, one enum: expanded and minimized can never both hold.
//!
//! ```text
//!            Launcher                    Minimize / PointerDownOutside
//!   Closed ──────────▶ Expanded ─────────────────────────────▶ Minimized
//!      ▲                  ▲  ◀──────────── MinimizedBar / Launcher ─┘
//!      └──── Close ───────┴──────────────── Close ──────────────────┘
//! ```

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Closed,
    Expanded,
    Minimized,
}

/// User actions that move the widget between states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The floating launcher button.
    Launcher,
    /// Minimize button in the expanded header.
    Minimize,
    /// Click on the minimized bar.
    MinimizedBar,
    /// Pointer pressed outside the widget bounds.
    PointerDownOutside,
    /// Explicit close button.
    Close,
}

impl Visibility {
    /// Apply `event`, returning the next state. Events that do not apply to
    /// the current state leave it unchanged.
    #[must_use]
    pub fn next(self, event: VisibilityEvent) -> Self {
        use VisibilityEvent as E;
        match (self, event) {
            (Self::Closed, E::Launcher) | (Self::Minimized, E::Launcher | E::MinimizedBar) => Self::Expanded,
            (Self::Expanded, E::Launcher | E::Minimize | E::PointerDownOutside) => Self::Minimized,
            (Self::Expanded | Self::Minimized, E::Close) => Self::Closed,
            (state, _) => state,
        }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }

    #[must_use]
    pub fn is_minimized(self) -> bool {
        matches!(self, Self::Minimized)
    }

    /// The launcher button is hidden only while the chat is fully expanded.
    #[must_use]
    pub fn launcher_visible(self) -> bool {
        !self.is_expanded()
    }
}
