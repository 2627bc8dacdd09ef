//! Percept-driven knowledge base with local constraint propagation.
//!
//! The [`KnowledgeBase`] records one [`PerceptSet`] per visited cell and keeps
//! three-valued facts for every cell of the cave: pit present, Wumpus present,
//! and visited. Facts are derived by propagation after every `tell`:
//!
//! - A quiet channel (no breeze / no stench) clears every neighbor of that
//!   hazard.
//! - A breeze whose neighbors are all pit-free but one puts the pit there.
//! - There is exactly one Wumpus, so it lies in the intersection of all
//!   stench neighborhoods; everything outside that intersection is
//!   Wumpus-free, and a single remaining suspect is the Wumpus.
//!
//! Pit and Wumpus facts are independent: the Wumpus may sit in a pit room,
//! so locating one hazard says nothing about the other in the same room.
//!
//! Each pass handles pits before the Wumpus, and passes repeat until no fact
//! changes. Facts only ever strengthen, so the loop terminates.
//!
//! This is elimination, not a complete propositional solver: configurations
//! that need several cells reasoned about at once stay
//! [`CellBelief::Unknown`], which callers must treat as unsafe.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;
use wumpus_types::{Cell, CellBelief, GridBounds, PerceptSet};

use crate::error::KnowledgeError;

// ---------------------------------------------------------------------------
// Hazard
// ---------------------------------------------------------------------------

/// The two kinds of deadly room contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hazard {
    /// A bottomless pit.
    Pit,
    /// The Wumpus.
    Wumpus,
}

impl core::fmt::Display for Hazard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pit => write!(f, "pit"),
            Self::Wumpus => write!(f, "wumpus"),
        }
    }
}

// ---------------------------------------------------------------------------
// CellFacts
// ---------------------------------------------------------------------------

/// Raw facts about one cell. `None` means not yet known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFacts {
    /// Whether the cell holds a pit.
    pub pit: Option<bool>,
    /// Whether the cell holds the live Wumpus.
    pub wumpus: Option<bool>,
    /// Whether the agent has been in the cell.
    pub visited: bool,
}

// ---------------------------------------------------------------------------
// KnowledgeBase
// ---------------------------------------------------------------------------

/// The agent's knowledge about the cave.
///
/// Owned and mutated by exactly one agent for the length of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Dimensions of the cave.
    bounds: GridBounds,
    /// Facts for every in-bounds cell.
    facts: BTreeMap<Cell, CellFacts>,
    /// The percept recorded on the first visit to each cell.
    percepts: BTreeMap<Cell, PerceptSet>,
    /// Where glitter was perceived.
    gold: Option<Cell>,
    /// Cleared once a scream is heard.
    wumpus_alive: bool,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for a cave of the given size.
    pub fn new(bounds: GridBounds) -> Self {
        let facts = bounds
            .cells()
            .map(|cell| (cell, CellFacts::default()))
            .collect();
        Self {
            bounds,
            facts,
            percepts: BTreeMap::new(),
            gold: None,
            wumpus_alive: true,
        }
    }

    /// The cave dimensions this knowledge base reasons about.
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    // -------------------------------------------------------------------
    // Tell
    // -------------------------------------------------------------------

    /// Record the percept perceived in `cell` and propagate its consequences.
    ///
    /// The cell becomes visited and safe: the agent stood in it and lived.
    /// Telling an already visited cell again is a no-op as long as the
    /// breeze and stench channels match the recorded percept.
    ///
    /// # Errors
    ///
    /// - [`KnowledgeError::OutOfBounds`] if `cell` is outside the cave.
    /// - [`KnowledgeError::InconsistentPercept`] if a visited cell is told
    ///   different breeze or stench.
    /// - [`KnowledgeError::Contradiction`] if the percept conflicts with
    ///   facts derived earlier.
    pub fn tell(&mut self, cell: Cell, percept: PerceptSet) -> Result<(), KnowledgeError> {
        if !self.bounds.contains(cell) {
            return Err(KnowledgeError::OutOfBounds(cell));
        }

        if let Some(&recorded) = self.percepts.get(&cell) {
            if recorded.same_location_channels(&percept) {
                return Ok(());
            }
            return Err(KnowledgeError::InconsistentPercept {
                cell,
                recorded,
                received: percept,
            });
        }

        debug!(cell = %cell, percept = %percept, "Percept told");
        self.percepts.insert(cell, percept);
        if let Some(facts) = self.facts.get_mut(&cell) {
            facts.visited = true;
        }
        self.set_pit(cell, false)?;
        self.set_wumpus(cell, false)?;
        self.propagate()
    }

    /// Record that the Wumpus has been killed.
    ///
    /// Every cell becomes Wumpus-free, which clears beliefs that only the
    /// Wumpus explained, then propagation runs again. Repeated notifications
    /// are no-ops.
    pub fn notify_wumpus_killed(&mut self) -> Result<(), KnowledgeError> {
        if !self.wumpus_alive {
            return Ok(());
        }
        self.wumpus_alive = false;
        for facts in self.facts.values_mut() {
            facts.wumpus = Some(false);
        }
        debug!("Wumpus killed, stench evidence retired");
        self.propagate()
    }

    /// Record that glitter was perceived in `cell`.
    pub fn notify_glitter_at(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        if !self.bounds.contains(cell) {
            return Err(KnowledgeError::OutOfBounds(cell));
        }
        self.gold = Some(cell);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Ask
    // -------------------------------------------------------------------

    /// Whether the agent can enter `cell` without risk.
    pub fn ask_safe(&self, cell: Cell) -> bool {
        self.belief(cell).is_some_and(CellBelief::is_safe)
    }

    /// Whether a hazard may still be in `cell`.
    ///
    /// Out-of-bounds cells hold nothing and answer `false`.
    pub fn ask_hazard_possible(&self, cell: Cell) -> bool {
        self.belief(cell).is_some_and(CellBelief::is_hazard_possible)
    }

    /// Whether `cell` holds a pit, if known.
    pub fn ask_pit(&self, cell: Cell) -> Option<bool> {
        self.facts.get(&cell).and_then(|f| f.pit)
    }

    /// Whether `cell` holds the live Wumpus, if known.
    pub fn ask_wumpus(&self, cell: Cell) -> Option<bool> {
        self.facts.get(&cell).and_then(|f| f.wumpus)
    }

    /// Whether the agent has been in `cell`.
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.percepts.contains_key(&cell)
    }

    /// The derived status of `cell`, or `None` outside the cave.
    pub fn belief(&self, cell: Cell) -> Option<CellBelief> {
        let facts = self.facts.get(&cell)?;
        let belief = if facts.visited {
            CellBelief::Visited
        } else if facts.pit == Some(false) && facts.wumpus == Some(false) {
            CellBelief::Safe
        } else if facts.pit == Some(true) {
            CellBelief::Pit
        } else if facts.wumpus == Some(true) {
            CellBelief::Wumpus
        } else if self.is_suspect(cell, facts) {
            CellBelief::PitOrWumpus
        } else {
            CellBelief::Unknown
        };
        Some(belief)
    }

    /// Snapshot of the derived status of every cell.
    pub fn beliefs(&self) -> BTreeMap<Cell, CellBelief> {
        self.facts
            .keys()
            .filter_map(|&cell| self.belief(cell).map(|belief| (cell, belief)))
            .collect()
    }

    /// The raw facts recorded for `cell`.
    pub fn facts(&self, cell: Cell) -> Option<CellFacts> {
        self.facts.get(&cell).copied()
    }

    /// The percept recorded on the first visit to `cell`.
    pub fn percept_at(&self, cell: Cell) -> Option<PerceptSet> {
        self.percepts.get(&cell).copied()
    }

    /// Every visited cell, in cell order.
    pub fn visited_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.percepts.keys().copied()
    }

    /// Where glitter was perceived, if anywhere.
    pub const fn gold_location(&self) -> Option<Cell> {
        self.gold
    }

    /// Whether the Wumpus is still believed alive.
    pub const fn wumpus_alive(&self) -> bool {
        self.wumpus_alive
    }

    /// The cell proven to hold the live Wumpus, if located.
    pub fn wumpus_location(&self) -> Option<Cell> {
        self.facts
            .iter()
            .find(|(_, f)| f.wumpus == Some(true))
            .map(|(&cell, _)| cell)
    }

    /// Render the beliefs as a text map, north row first.
    ///
    /// `agent` is drawn as `A`; other glyphs come from
    /// [`CellBelief::glyph`].
    pub fn render(&self, agent: Option<Cell>) -> String {
        let mut out = String::new();
        for y in (1..=self.bounds.height).rev() {
            for x in 1..=self.bounds.width {
                let cell = Cell::new(x, y);
                let glyph = if agent == Some(cell) {
                    'A'
                } else {
                    self.belief(cell).map_or(' ', CellBelief::glyph)
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    // -------------------------------------------------------------------
    // Propagation
    // -------------------------------------------------------------------

    /// A cell is suspect when a told neighbor reports a hazard channel the
    /// cell has not been cleared of.
    fn is_suspect(&self, cell: Cell, facts: &CellFacts) -> bool {
        self.bounds
            .neighbors(cell)
            .into_iter()
            .filter_map(|n| self.percepts.get(&n))
            .any(|p| {
                (p.breeze && facts.pit.is_none())
                    || (p.stench && self.wumpus_alive && facts.wumpus.is_none())
            })
    }

    fn propagate(&mut self) -> Result<(), KnowledgeError> {
        let mut passes: u32 = 0;
        loop {
            passes = passes.saturating_add(1);
            let pits_changed = self.propagate_pits()?;
            let wumpus_changed = self.propagate_wumpus()?;
            if !pits_changed && !wumpus_changed {
                break;
            }
        }
        debug!(passes, "Propagation reached a fixed point");
        Ok(())
    }

    fn propagate_pits(&mut self) -> Result<bool, KnowledgeError> {
        let mut changed = false;
        let observations: Vec<(Cell, bool)> = self
            .percepts
            .iter()
            .map(|(&cell, p)| (cell, p.breeze))
            .collect();

        for (cell, breeze) in observations {
            let neighbors = self.bounds.neighbors(cell);
            if breeze {
                let candidates: Vec<Cell> = neighbors
                    .into_iter()
                    .filter(|&n| self.ask_pit(n) != Some(false))
                    .collect();
                match candidates.as_slice() {
                    [] => {
                        return Err(KnowledgeError::Contradiction {
                            cell,
                            hazard: Hazard::Pit,
                        });
                    }
                    [only] => changed |= self.set_pit(*only, true)?,
                    _ => {}
                }
            } else {
                for n in neighbors {
                    changed |= self.set_pit(n, false)?;
                }
            }
        }
        Ok(changed)
    }

    fn propagate_wumpus(&mut self) -> Result<bool, KnowledgeError> {
        if !self.wumpus_alive {
            return Ok(false);
        }

        let mut changed = false;
        let observations: Vec<(Cell, bool)> = self
            .percepts
            .iter()
            .map(|(&cell, p)| (cell, p.stench))
            .collect();

        let mut first_stench: Option<Cell> = None;
        let mut suspects: Option<BTreeSet<Cell>> = None;
        for (cell, stench) in observations {
            let neighbors = self.bounds.neighbors(cell);
            if stench {
                first_stench.get_or_insert(cell);
                let around: BTreeSet<Cell> = neighbors.into_iter().collect();
                suspects = Some(match suspects {
                    None => around,
                    Some(s) => s.intersection(&around).copied().collect(),
                });
            } else {
                for n in neighbors {
                    changed |= self.set_wumpus(n, false)?;
                }
            }
        }

        if let (Some(stench_cell), Some(suspects)) = (first_stench, suspects) {
            let outside: Vec<Cell> = self
                .facts
                .keys()
                .copied()
                .filter(|c| !suspects.contains(c))
                .collect();
            for cell in outside {
                changed |= self.set_wumpus(cell, false)?;
            }

            let candidates: Vec<Cell> = suspects
                .into_iter()
                .filter(|&c| self.ask_wumpus(c) != Some(false))
                .collect();
            match candidates.as_slice() {
                [] => {
                    return Err(KnowledgeError::Contradiction {
                        cell: stench_cell,
                        hazard: Hazard::Wumpus,
                    });
                }
                [only] => changed |= self.set_wumpus(*only, true)?,
                _ => {}
            }
        }

        if let Some(wumpus) = self.wumpus_location() {
            let others: Vec<Cell> = self
                .facts
                .keys()
                .copied()
                .filter(|&c| c != wumpus)
                .collect();
            for cell in others {
                changed |= self.set_wumpus(cell, false)?;
            }
        }

        Ok(changed)
    }

    /// Set the pit fact for `cell`. Returns whether anything changed.
    fn set_pit(&mut self, cell: Cell, present: bool) -> Result<bool, KnowledgeError> {
        let Some(facts) = self.facts.get_mut(&cell) else {
            return Err(KnowledgeError::OutOfBounds(cell));
        };
        match facts.pit {
            Some(known) if known == present => return Ok(false),
            Some(_) => {
                return Err(KnowledgeError::Contradiction {
                    cell,
                    hazard: Hazard::Pit,
                });
            }
            None => facts.pit = Some(present),
        }
        debug!(cell = %cell, present, "Pit fact derived");
        Ok(true)
    }

    /// Set the Wumpus fact for `cell`. Returns whether anything changed.
    fn set_wumpus(&mut self, cell: Cell, present: bool) -> Result<bool, KnowledgeError> {
        let Some(facts) = self.facts.get_mut(&cell) else {
            return Err(KnowledgeError::OutOfBounds(cell));
        };
        match facts.wumpus {
            Some(known) if known == present => return Ok(false),
            Some(_) => {
                return Err(KnowledgeError::Contradiction {
                    cell,
                    hazard: Hazard::Wumpus,
                });
            }
            None => facts.wumpus = Some(present),
        }
        debug!(cell = %cell, present, "Wumpus fact derived");
        Ok(true)
    }
}
