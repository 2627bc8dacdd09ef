//! Hazard and gold placement for one cave.
//!
//! A layout is either the fixed classic demonstration cave or generated from
//! a seed. Generation is reproducible: the same bounds, probability and seed
//! always produce the same cave.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use wumpus_types::{Cell, GridBounds};

use crate::error::WorldError;

/// Where everything in the cave is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldLayout {
    /// Cave dimensions.
    pub bounds: GridBounds,
    /// The Wumpus's room.
    pub wumpus: Cell,
    /// The gold's room, if the cave has gold.
    #[serde(default)]
    pub gold: Option<Cell>,
    /// Rooms holding a pit.
    #[serde(default)]
    pub pits: BTreeSet<Cell>,
}

impl WorldLayout {
    /// The 4x4 demonstration cave: Wumpus at (1,3), gold at (2,3), pits at
    /// (3,1), (3,3) and (4,4).
    pub fn classic() -> Self {
        Self {
            bounds: GridBounds::default(),
            wumpus: Cell::new(1, 3),
            gold: Some(Cell::new(2, 3)),
            pits: [Cell::new(3, 1), Cell::new(3, 3), Cell::new(4, 4)]
                .into_iter()
                .collect(),
        }
    }

    /// Generate a cave from `seed`.
    ///
    /// The Wumpus and the gold are placed uniformly outside the entrance.
    /// Every room except the entrance holds a pit with probability
    /// `pit_probability`, the Wumpus's room included.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidPitProbability`] for a probability outside
    /// `[0, 1]`, [`WorldError::CaveTooSmall`] for a one-room cave.
    pub fn random(
        bounds: GridBounds,
        pit_probability: f64,
        seed: u64,
    ) -> Result<Self, WorldError> {
        if !(0.0..=1.0).contains(&pit_probability) {
            return Err(WorldError::InvalidPitProbability(pit_probability));
        }
        let rooms: Vec<Cell> = bounds.cells().filter(|&c| c != Cell::START).collect();
        let too_small = WorldError::CaveTooSmall {
            width: bounds.width,
            height: bounds.height,
        };
        if rooms.is_empty() {
            return Err(too_small);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let wumpus = rooms
            .get(rng.random_range(0..rooms.len()))
            .copied()
            .ok_or_else(|| too_small.clone())?;
        let gold = rooms.get(rng.random_range(0..rooms.len())).copied();
        let pits = rooms
            .iter()
            .copied()
            .filter(|_| rng.random_bool(pit_probability))
            .collect();

        Ok(Self {
            bounds,
            wumpus,
            gold,
            pits,
        })
    }

    /// Check that every entry is in bounds and the entrance is hazard-free.
    ///
    /// The Wumpus may share a room with a pit.
    pub fn validate(&self) -> Result<(), WorldError> {
        let placed = std::iter::once(("wumpus", self.wumpus))
            .chain(self.gold.map(|g| ("gold", g)))
            .chain(self.pits.iter().map(|&p| ("pit", p)));
        for (item, cell) in placed {
            if !self.bounds.contains(cell) {
                return Err(WorldError::OutOfBounds { item, cell });
            }
        }

        if self.wumpus == Cell::START {
            return Err(WorldError::HazardAtStart {
                item: "wumpus",
                cell: Cell::START,
            });
        }
        if self.pits.contains(&Cell::START) {
            return Err(WorldError::HazardAtStart {
                item: "pit",
                cell: Cell::START,
            });
        }
        Ok(())
    }

    /// Whether `cell` holds a pit.
    pub fn is_pit(&self, cell: Cell) -> bool {
        self.pits.contains(&cell)
    }

    /// Draw the cave, north row first: `W` Wumpus, `P` pit, `G` gold.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in (1..=self.bounds.height).rev() {
            for x in 1..=self.bounds.width {
                let cell = Cell::new(x, y);
                let glyph = if cell == self.wumpus {
                    'W'
                } else if self.is_pit(cell) {
                    'P'
                } else if self.gold == Some(cell) {
                    'G'
                } else {
                    '.'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn classic_layout_is_valid() {
        let layout = WorldLayout::classic();
        layout.validate().unwrap();
        assert_eq!(layout.pits.len(), 3);
        assert_eq!(layout.render(), "...P\nWGP.\n....\n..P.\n");
    }

    #[test]
    fn random_layout_is_reproducible() {
        let a = WorldLayout::random(GridBounds::default(), 0.2, 7).unwrap();
        let b = WorldLayout::random(GridBounds::default(), 0.2, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn random_layouts_are_always_valid() {
        for seed in 0..200 {
            let layout = WorldLayout::random(GridBounds::default(), 0.2, seed).unwrap();
            layout.validate().unwrap();
            assert_ne!(layout.gold, Some(Cell::START));
        }
    }

    #[test]
    fn probability_bounds_are_enforced() {
        let bounds = GridBounds::default();
        assert!(matches!(
            WorldLayout::random(bounds, 1.5, 0),
            Err(WorldError::InvalidPitProbability(_))
        ));
        assert!(WorldLayout::random(bounds, f64::NAN, 0).is_err());
        let all_pits = WorldLayout::random(bounds, 1.0, 3).unwrap();
        assert_eq!(all_pits.pits.len(), 15);
        assert!(all_pits.is_pit(all_pits.wumpus));
    }

    #[test]
    fn one_room_cave_is_rejected() {
        assert!(matches!(
            WorldLayout::random(GridBounds::new(1, 1), 0.2, 0),
            Err(WorldError::CaveTooSmall { .. })
        ));
    }

    #[test]
    fn invalid_layouts_are_rejected() {
        let mut layout = WorldLayout::classic();
        layout.wumpus = Cell::START;
        assert!(matches!(
            layout.validate(),
            Err(WorldError::HazardAtStart { item: "wumpus", .. })
        ));

        let mut layout = WorldLayout::classic();
        layout.gold = Some(Cell::new(5, 1));
        assert!(matches!(
            layout.validate(),
            Err(WorldError::OutOfBounds { item: "gold", .. })
        ));
    }

    #[test]
    fn wumpus_may_sit_in_a_pit() {
        let mut layout = WorldLayout::classic();
        layout.pits.insert(Cell::new(1, 3));
        layout.validate().unwrap();
        assert_eq!(layout.render(), "...P\nWGP.\n....\n..P.\n");
    }

    #[test]
    fn layout_deserializes_from_json() {
        let json = r#"{
            "bounds": {"width": 4, "height": 4},
            "wumpus": [1, 3],
            "gold": [2, 3],
            "pits": [[3, 1], [3, 3], [4, 4]]
        }"#;
        let layout: WorldLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout, WorldLayout::classic());
    }
}
