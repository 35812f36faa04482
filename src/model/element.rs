//! Elements, die faces, and aura eligibility.

use serde::{Deserialize, Serialize};

/// An element tag carried by characters, dice, and incoming hits.
///
/// `Omni` only appears on dice and `Physical` only on normal attacks;
/// neither can ever be an aura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Pyro,
    Hydro,
    Electro,
    Cryo,
    Dendro,
    Geo,
    Anemo,
    Omni,
    Physical,
}

/// The eight faces of an elemental die, in roll-index order.
pub const DICE_FACES: [Element; 8] = [
    Element::Pyro,
    Element::Hydro,
    Element::Electro,
    Element::Cryo,
    Element::Dendro,
    Element::Geo,
    Element::Anemo,
    Element::Omni,
];

/// Elements that persist as an aura after an unreacted hit.
pub const STICKY_ELEMENTS: [Element; 5] = [
    Element::Pyro,
    Element::Hydro,
    Element::Electro,
    Element::Cryo,
    Element::Dendro,
];

impl Element {
    /// Returns true if a hit of this element leaves an aura on a bare target.
    pub const fn is_sticky(self) -> bool {
        matches!(
            self,
            Element::Pyro | Element::Hydro | Element::Electro | Element::Cryo | Element::Dendro
        )
    }

    /// Returns true for the four auras that Swirl and Crystallize can consume.
    pub const fn is_swirlable(self) -> bool {
        matches!(
            self,
            Element::Pyro | Element::Hydro | Element::Electro | Element::Cryo
        )
    }

    /// Lowercase name used by the text protocol.
    pub const fn name(self) -> &'static str {
        match self {
            Element::Pyro => "pyro",
            Element::Hydro => "hydro",
            Element::Electro => "electro",
            Element::Cryo => "cryo",
            Element::Dendro => "dendro",
            Element::Geo => "geo",
            Element::Anemo => "anemo",
            Element::Omni => "omni",
            Element::Physical => "physical",
        }
    }
}
