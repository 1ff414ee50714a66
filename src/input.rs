//! Per-tick input snapshot.
//!
//! The host samples its input device once per frame and hands the core an
//! [`InputIntent`]; the core never polls anything itself.

use serde::{Deserialize, Serialize};

/// Already-sampled player intent for one tick.
///
/// `left`/`right` are held states; `jump_pressed`/`jump_released` are edges
/// that are true only on the tick the key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputIntent {
    /// Left is held.
    pub left: bool,
    /// Right is held.
    pub right: bool,
    /// Jump went down this tick.
    pub jump_pressed: bool,
    /// Jump came up this tick.
    pub jump_released: bool,
}

impl InputIntent {
    /// No input at all.
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        jump_pressed: false,
        jump_released: false,
    };

    /// Only left held.
    #[must_use]
    pub const fn holding_left() -> Self {
        Self {
            left: true,
            ..Self::IDLE
        }
    }

    /// Only right held.
    #[must_use]
    pub const fn holding_right() -> Self {
        Self {
            right: true,
            ..Self::IDLE
        }
    }

    /// Adds a jump press to this intent.
    #[must_use]
    pub const fn with_jump_pressed(self) -> Self {
        Self {
            jump_pressed: true,
            ..self
        }
    }

    /// Adds a jump release to this intent.
    #[must_use]
    pub const fn with_jump_released(self) -> Self {
        Self {
            jump_released: true,
            ..self
        }
    }

    /// Horizontal axis in `{-1, 0, 1}`; holding both directions cancels.
    ///
    /// # Examples
    /// ```
    /// use flipside::InputIntent;
    /// assert_eq!(InputIntent::holding_left().horizontal_axis(), -1);
    /// let both = InputIntent { left: true, right: true, ..InputIntent::IDLE };
    /// assert_eq!(both.horizontal_axis(), 0);
    /// ```
    #[must_use]
    pub const fn horizontal_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}
