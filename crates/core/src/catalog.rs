//! Built-in layouts and the layout catalog.

use tracing::warn;

use crate::board::Board;
use crate::layout::{Layout, LayoutError, LayoutGrid};
use crate::rules::has_legal_move;

/// Name of the layout dealt when nothing else is configured
pub const DEFAULT_LAYOUT: &str = "Classic Cross";

#[rustfmt::skip]
const CLASSIC_CROSS: LayoutGrid = [
    [-1, -1,  1,  1,  1, -1, -1],
    [-1, -1,  1,  1,  1, -1, -1],
    [ 1,  1,  1,  1,  1,  1,  1],
    [ 1,  1,  1,  0,  1,  1,  1],
    [ 1,  1,  1,  1,  1,  1,  1],
    [-1, -1,  1,  1,  1, -1, -1],
    [-1, -1,  1,  1,  1, -1, -1],
];

#[rustfmt::skip]
const EUROPEAN: LayoutGrid = [
    [-1, -1,  1,  1,  1, -1, -1],
    [-1,  1,  1,  1,  1,  1, -1],
    [ 1,  1,  1,  0,  1,  1,  1],
    [ 1,  1,  1,  1,  1,  1,  1],
    [ 1,  1,  1,  1,  1,  1,  1],
    [-1,  1,  1,  1,  1,  1, -1],
    [-1, -1,  1,  1,  1, -1, -1],
];

#[rustfmt::skip]
const DIAMOND: LayoutGrid = [
    [-1, -1, -1,  1, -1, -1, -1],
    [-1, -1,  1,  1,  1, -1, -1],
    [-1,  1,  1,  1,  1,  1, -1],
    [ 1,  1,  1,  0,  1,  1,  1],
    [-1,  1,  1,  1,  1,  1, -1],
    [-1, -1,  1,  1,  1, -1, -1],
    [-1, -1, -1,  1, -1, -1, -1],
];

#[rustfmt::skip]
const SQUARE: LayoutGrid = [
    [-1, -1, -1, -1, -1, -1, -1],
    [-1,  1,  1,  1,  1,  1, -1],
    [-1,  1,  1,  1,  1,  1, -1],
    [-1,  1,  1,  0,  1,  1, -1],
    [-1,  1,  1,  1,  1,  1, -1],
    [-1,  1,  1,  1,  1,  1, -1],
    [-1, -1, -1, -1, -1, -1, -1],
];

const BUILTIN: [(&str, &str, &LayoutGrid); 4] = [
    (
        DEFAULT_LAYOUT,
        "The English cross: 33 holes, centre hole empty.",
        &CLASSIC_CROSS,
    ),
    (
        "European",
        "The French board: the cross with its four inner corners filled, 37 holes.",
        &EUROPEAN,
    ),
    (
        "Diamond",
        "A 25-hole diamond, centre hole empty.",
        &DIAMOND,
    ),
    (
        "Square",
        "A 5x5 block of holes, centre hole empty.",
        &SQUARE,
    ),
];

/// The 33-hole English cross with the centre empty.
pub fn classic_cross() -> Layout {
    let (name, description, grid) = BUILTIN[0];
    Layout::from_static(name, description, *grid)
}

/// Ordered, name-unique collection of layouts.
#[derive(Debug, Clone)]
pub struct Catalog {
    layouts: Vec<Layout>,
}

impl Catalog {
    /// Validate and load the built-in layouts.
    pub fn builtin() -> Result<Self, LayoutError> {
        let mut catalog = Self {
            layouts: Vec::with_capacity(BUILTIN.len()),
        };
        for (name, description, grid) in BUILTIN {
            catalog.push(Layout::new(name, description, grid)?)?;
        }
        Ok(catalog)
    }

    /// Built-in layouts followed by `extra`, in order.
    pub fn with_layouts(extra: impl IntoIterator<Item = Layout>) -> Result<Self, LayoutError> {
        let mut catalog = Self::builtin()?;
        for layout in extra {
            catalog.push(layout)?;
        }
        Ok(catalog)
    }

    /// Append a layout, rejecting names already present (case-insensitive).
    pub fn push(&mut self, layout: Layout) -> Result<(), LayoutError> {
        if self.index_of(layout.name()).is_some() {
            return Err(LayoutError::DuplicateName(layout.name().to_string()));
        }
        if !has_legal_move(&Board::from_layout(&layout)) {
            warn!(layout = layout.name(), "layout has no opening jump");
        }
        self.layouts.push(layout);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layout> {
        self.layouts.iter()
    }

    /// Layout at `index`, if any.
    pub fn at(&self, index: usize) -> Option<&Layout> {
        self.layouts.get(index)
    }

    /// Case-insensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&Layout> {
        self.index_of(name).map(|i| &self.layouts[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.layouts
            .iter()
            .position(|l| l.name().eq_ignore_ascii_case(name))
    }

    /// Index after `index`, wrapping around.
    pub fn next_index(&self, index: usize) -> usize {
        if self.layouts.is_empty() {
            return 0;
        }
        (index + 1) % self.layouts.len()
    }

    /// Index before `index`, wrapping around.
    pub fn prev_index(&self, index: usize) -> usize {
        if self.layouts.is_empty() {
            return 0;
        }
        (index + self.layouts.len() - 1) % self.layouts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{classify, legal_moves};
    use crate::types::{GameStatus, Position};

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.at(0).unwrap().name(), DEFAULT_LAYOUT);
    }

    #[test]
    fn test_builtin_hole_counts() {
        let catalog = Catalog::builtin().unwrap();
        let holes: Vec<(&str, usize, usize)> = catalog
            .iter()
            .map(|l| (l.name(), l.hole_count(), l.peg_count()))
            .collect();
        assert_eq!(
            holes,
            vec![
                ("Classic Cross", 33, 32),
                ("European", 37, 36),
                ("Diamond", 25, 24),
                ("Square", 25, 24),
            ]
        );
    }

    #[test]
    fn test_every_builtin_deal_is_playable() {
        let catalog = Catalog::builtin().unwrap();
        for layout in catalog.iter() {
            let board = Board::from_layout(layout);
            assert_eq!(
                classify(&board),
                GameStatus::Playing,
                "{} must open with a jump",
                layout.name()
            );
            assert!(!legal_moves(&board).is_empty());
        }
    }

    #[test]
    fn test_every_builtin_has_one_gap() {
        let catalog = Catalog::builtin().unwrap();
        for layout in catalog.iter() {
            assert_eq!(layout.hole_count() - layout.peg_count(), 1, "{}", layout.name());
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.index_of("classic cross"), Some(0));
        assert_eq!(catalog.get("DIAMOND").unwrap().name(), "Diamond");
        assert!(catalog.get("Triangle").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut catalog = Catalog::builtin().unwrap();
        let dup = Layout::new("square", "", &SQUARE).unwrap();
        assert_eq!(
            catalog.push(dup).unwrap_err(),
            LayoutError::DuplicateName("square".into())
        );
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_custom_layouts_append() {
        let custom = Layout::new("Mine", "", &DIAMOND).unwrap();
        let catalog = Catalog::with_layouts([custom]).unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.index_of("mine"), Some(4));
    }

    #[test]
    fn test_padded_name_is_found_after_load() {
        let custom = Layout::new("Plus ", "", &DIAMOND).unwrap();
        assert_eq!(custom.name(), "Plus");
        let catalog = Catalog::with_layouts([custom]).unwrap();
        assert_eq!(catalog.index_of("Plus "), Some(4));
        assert_eq!(catalog.index_of("plus"), Some(4));

        // padding cannot sneak a duplicate past the name check
        let dup = Layout::new("  Diamond", "", &DIAMOND).unwrap();
        assert_eq!(
            Catalog::with_layouts([dup]).unwrap_err(),
            LayoutError::DuplicateName("Diamond".into())
        );
    }

    #[test]
    fn test_index_cycling() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.next_index(3), 0);
        assert_eq!(catalog.prev_index(0), 3);
        assert_eq!(catalog.next_index(1), 2);
    }

    #[test]
    fn test_european_gap_is_off_centre() {
        let catalog = Catalog::builtin().unwrap();
        let board = Board::from_layout(catalog.get("European").unwrap());
        assert!(board.is_empty(Position::new(2, 3)));
        assert!(board.is_occupied(Position::new(3, 3)));
    }
}
