//! The percept delivered to the agent each step.
//!
//! A [`PerceptSet`] is the **only** information the agent receives about the
//! cave. Hazards are never observed directly; they are inferred from breezes
//! and stenches in neighboring rooms.

use serde::{Deserialize, Serialize};

/// The five sensor channels for one time step.
///
/// Breeze and stench are *location channels*: they are fixed by the room's
/// neighborhood and never change between visits. Glitter, bump and scream are
/// *event channels* that change as gold is taken, walls are hit, or the
/// Wumpus dies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerceptSet {
    /// A pit is in an adjacent room.
    pub breeze: bool,
    /// The Wumpus (dead or alive) is in this or an adjacent room.
    pub stench: bool,
    /// Gold lies in this room.
    pub glitter: bool,
    /// The last forward move walked into a wall.
    pub bump: bool,
    /// The Wumpus has been killed.
    pub scream: bool,
}

impl PerceptSet {
    /// A percept with every channel quiet.
    pub const fn none() -> Self {
        Self {
            breeze: false,
            stench: false,
            glitter: false,
            bump: false,
            scream: false,
        }
    }

    /// Set the breeze channel.
    #[must_use]
    pub const fn with_breeze(mut self) -> Self {
        self.breeze = true;
        self
    }

    /// Set the stench channel.
    #[must_use]
    pub const fn with_stench(mut self) -> Self {
        self.stench = true;
        self
    }

    /// Set the glitter channel.
    #[must_use]
    pub const fn with_glitter(mut self) -> Self {
        self.glitter = true;
        self
    }

    /// Set the bump channel.
    #[must_use]
    pub const fn with_bump(mut self) -> Self {
        self.bump = true;
        self
    }

    /// Set the scream channel.
    #[must_use]
    pub const fn with_scream(mut self) -> Self {
        self.scream = true;
        self
    }

    /// Whether `other` agrees with `self` on the location channels.
    ///
    /// Two percepts taken in the same room must always agree here.
    pub const fn same_location_channels(&self, other: &Self) -> bool {
        self.breeze == other.breeze && self.stench == other.stench
    }
}

impl core::fmt::Display for PerceptSet {
    /// Renders the channels as `[Stench, Breeze, Glitter, Bump, Scream]`,
    /// with `-` for quiet channels.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let channel = |on: bool, name: &'static str| if on { name } else { "-" };
        write!(
            f,
            "[{}, {}, {}, {}, {}]",
            channel(self.stench, "Stench"),
            channel(self.breeze, "Breeze"),
            channel(self.glitter, "Glitter"),
            channel(self.bump, "Bump"),
            channel(self.scream, "Scream"),
        )
    }
}
