//! Dice cost payment.

use crate::model::{Cost, CostElement, Element};

/// Outcome of matching a cost against a dice pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostCheck {
    pub can_pay: bool,
    /// Pool indices that would be consumed, in selection order, never repeated.
    pub paid_indices: Vec<usize>,
}

/// Greedily selects dice for `cost`.
///
/// First pass takes dice matching the required element (any non-Omni die for
/// an `Any` cost), second pass covers the shortfall with Omni dice. Energy is
/// not considered here.
pub fn check_cost(cost: &Cost, dice: &[Element]) -> CostCheck {
    if cost.count == 0 {
        return CostCheck { can_pay: true, paid_indices: Vec::new() };
    }

    let mut paid_indices: Vec<usize> = Vec::with_capacity(cost.count);
    let mut needed = cost.count;

    let matches = |die: Element| match cost.element {
        CostElement::Aligned(element) => die == element,
        CostElement::Any => die != Element::Omni,
    };

    for (i, &die) in dice.iter().enumerate() {
        if needed == 0 {
            break;
        }
        if matches(die) {
            paid_indices.push(i);
            needed -= 1;
        }
    }

    for (i, &die) in dice.iter().enumerate() {
        if needed == 0 {
            break;
        }
        if die == Element::Omni && !paid_indices.contains(&i) {
            paid_indices.push(i);
            needed -= 1;
        }
    }

    CostCheck { can_pay: needed == 0, paid_indices }
}

/// Picks the die paid for a switch: the first non-Omni die, else the first die.
pub fn switch_die_index(dice: &[Element]) -> Option<usize> {
    if dice.is_empty() {
        return None;
    }
    Some(dice.iter().position(|d| *d != Element::Omni).unwrap_or(0))
}

/// Removes the dice at `indices` from the pool, keeping the order of the rest.
pub fn remove_indices(dice: &[Element], indices: &[usize]) -> Vec<Element> {
    dice.iter()
        .enumerate()
        .filter(|(i, _)| !indices.contains(i))
        .map(|(_, d)| *d)
        .collect()
}
