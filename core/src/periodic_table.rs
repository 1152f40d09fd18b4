//! Element symbols ordered by atomic number.
//!
//! Index 0 is the dummy atom `X`, so the position of a symbol in [`SYMBOLS`] is
//! its atomic number. Elements beyond copernicium use their placeholder names.

pub const NUM_ELEMENTS: usize = 119;

#[rustfmt::skip]
pub const SYMBOLS: [&str; NUM_ELEMENTS] = [
    "X",
    "H",  "He", "Li", "Be", "B",  "C",  "N",  "O",  "F",  "Ne",
    "Na", "Mg", "Al", "Si", "P",  "S",  "Cl", "Ar", "K",  "Ca",
    "Sc", "Ti", "V",  "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y",  "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I",  "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W",  "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U",  "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Uut", "Fl", "Uup", "Lv", "Uus", "Uuo",
];

/// Returns the atomic number of an element symbol. The lookup is case-sensitive.
pub fn atomic_number(symbol: &str) -> Option<u32> {
    SYMBOLS
        .iter()
        .position(|&candidate| candidate == symbol)
        .map(|index| index as u32)
}

/// Returns the symbol of the element with the given atomic number.
pub fn symbol(atomic_number: u32) -> Option<&'static str> {
    SYMBOLS.get(atomic_number as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_position_is_atomic_number() {
        assert_eq!(atomic_number("X"), Some(0));
        assert_eq!(atomic_number("H"), Some(1));
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("Cn"), Some(112));
        assert_eq!(atomic_number("Uuo"), Some(118));
        assert_eq!(symbol(8), Some("O"));
        assert_eq!(symbol(119), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(atomic_number("he"), None);
        assert_eq!(atomic_number("HE"), None);
        assert_eq!(atomic_number("He"), Some(2));
    }
}
