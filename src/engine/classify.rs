//! Cell classification: the contract a renderer consumes

use super::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy for bucketing generation counters into visual categories.
///
/// Both policies were observed in the wild; which one a renderer wants is a
/// styling decision, so it is configuration rather than a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClassificationPolicy {
    /// Numeric classes `gen-1` .. `gen-N`, saturating at `max_class`
    Capped { max_class: u32 },
    /// Three named growth stages, collapsing generations >= 3 into `tree`
    Staged,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self::Capped { max_class: 6 }
    }
}

impl ClassificationPolicy {
    /// Map a cell to its discrete visual category
    pub fn classify(&self, cell: Cell) -> CellClass {
        if !cell.alive {
            return CellClass::Dead;
        }

        match self {
            Self::Capped { max_class } => CellClass::Gen(cell.generation.min(*max_class)),
            Self::Staged => match cell.generation {
                1 => CellClass::Seedling,
                2 => CellClass::Leaves,
                _ => CellClass::Tree,
            },
        }
    }
}

/// Discrete visual category for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Dead,
    Gen(u32),
    Seedling,
    Leaves,
    Tree,
}

impl CellClass {
    pub fn is_alive(&self) -> bool {
        !matches!(self, CellClass::Dead)
    }

    /// CSS-style class name, the form a DOM renderer would attach
    pub fn css_class(&self) -> String {
        match self {
            CellClass::Dead => "dead".to_string(),
            CellClass::Gen(n) => format!("gen-{}", n),
            CellClass::Seedling => "seedling".to_string(),
            CellClass::Leaves => "leaves".to_string(),
            CellClass::Tree => "tree".to_string(),
        }
    }
}

impl fmt::Display for CellClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_cells_classify_as_dead() {
        let capped = ClassificationPolicy::default();
        let staged = ClassificationPolicy::Staged;

        assert_eq!(capped.classify(Cell::dead()), CellClass::Dead);
        assert_eq!(staged.classify(Cell::dead()), CellClass::Dead);
        assert!(!CellClass::Dead.is_alive());
    }

    #[test]
    fn test_capped_policy_saturates() {
        let policy = ClassificationPolicy::Capped { max_class: 6 };

        assert_eq!(policy.classify(Cell::born()), CellClass::Gen(1));
        assert_eq!(policy.classify(Cell::alive_for(4)), CellClass::Gen(4));
        assert_eq!(policy.classify(Cell::alive_for(6)), CellClass::Gen(6));
        assert_eq!(policy.classify(Cell::alive_for(17)), CellClass::Gen(6));
    }

    #[test]
    fn test_staged_policy_collapses_old_cells() {
        let policy = ClassificationPolicy::Staged;

        assert_eq!(policy.classify(Cell::born()), CellClass::Seedling);
        assert_eq!(policy.classify(Cell::alive_for(2)), CellClass::Leaves);
        assert_eq!(policy.classify(Cell::alive_for(3)), CellClass::Tree);
        assert_eq!(policy.classify(Cell::alive_for(40)), CellClass::Tree);
    }

    #[test]
    fn test_css_class_names() {
        assert_eq!(CellClass::Dead.css_class(), "dead");
        assert_eq!(CellClass::Gen(3).css_class(), "gen-3");
        assert_eq!(CellClass::Seedling.css_class(), "seedling");
        assert_eq!(CellClass::Leaves.to_string(), "leaves");
        assert_eq!(CellClass::Tree.to_string(), "tree");
    }
}
