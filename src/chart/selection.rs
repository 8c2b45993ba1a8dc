//! Which field is plotted on each axis, and the six selector labels.

use crate::data::{XField, YField};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    X,
    Y,
}

/// One cell of the 3x3 axis-choice matrix: a field bound to its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AxisChoice {
    X(XField),
    Y(YField),
}

impl AxisChoice {
    /// Selector labels in drawing order: three X options, then three Y options.
    pub const ALL: [AxisChoice; 6] = [
        AxisChoice::X(XField::Poverty),
        AxisChoice::X(XField::Age),
        AxisChoice::X(XField::Income),
        AxisChoice::Y(YField::Healthcare),
        AxisChoice::Y(YField::Smokes),
        AxisChoice::Y(YField::Obesity),
    ];

    pub fn axis(self) -> Axis {
        match self {
            AxisChoice::X(_) => Axis::X,
            AxisChoice::Y(_) => Axis::Y,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AxisChoice::X(field) => field.label(),
            AxisChoice::Y(field) => field.label(),
        }
    }

    /// Position of this label within its axis group (0, 1 or 2).
    pub fn slot(self) -> usize {
        match self {
            AxisChoice::X(XField::Poverty) | AxisChoice::Y(YField::Healthcare) => 0,
            AxisChoice::X(XField::Age) | AxisChoice::Y(YField::Smokes) => 1,
            AxisChoice::X(XField::Income) | AxisChoice::Y(YField::Obesity) => 2,
        }
    }
}

/// Currently plotted pair. Starts at poverty / healthcare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    pub x: XField,
    pub y: YField,
}

impl Selection {
    pub fn is_selected(&self, choice: AxisChoice) -> bool {
        match choice {
            AxisChoice::X(field) => self.x == field,
            AxisChoice::Y(field) => self.y == field,
        }
    }

    /// Apply a label click. Returns `false` when the field was already plotted.
    pub fn select(&mut self, choice: AxisChoice) -> bool {
        if self.is_selected(choice) {
            return false;
        }
        match choice {
            AxisChoice::X(field) => self.x = field,
            AxisChoice::Y(field) => self.y = field,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_poverty_healthcare() {
        let sel = Selection::default();
        assert_eq!(sel.x, XField::Poverty);
        assert_eq!(sel.y, YField::Healthcare);
    }

    #[test]
    fn selecting_active_field_is_noop() {
        let mut sel = Selection::default();
        assert!(!sel.select(AxisChoice::X(XField::Poverty)));
        assert_eq!(sel, Selection::default());
    }

    #[test]
    fn selecting_one_axis_leaves_other_alone() {
        let mut sel = Selection::default();
        assert!(sel.select(AxisChoice::Y(YField::Obesity)));
        assert_eq!(sel.x, XField::Poverty);
        assert_eq!(sel.y, YField::Obesity);
    }

    #[test]
    fn exactly_one_choice_per_axis_is_selected() {
        let sel = Selection {
            x: XField::Income,
            y: YField::Smokes,
        };
        for axis in [Axis::X, Axis::Y] {
            let active = AxisChoice::ALL
                .iter()
                .filter(|c| c.axis() == axis && sel.is_selected(**c))
                .count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn slots_are_distinct_within_group() {
        let x_slots: Vec<usize> = AxisChoice::ALL[..3].iter().map(|c| c.slot()).collect();
        let y_slots: Vec<usize> = AxisChoice::ALL[3..].iter().map(|c| c.slot()).collect();
        assert_eq!(x_slots, [0, 1, 2]);
        assert_eq!(y_slots, [0, 1, 2]);
    }
}
