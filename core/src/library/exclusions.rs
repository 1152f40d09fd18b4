use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Library files that are known to be unreadable by this parser
const UNSUPPORTED: &[&str] = &[
    "aug-cc-pv5z-pp",
    "aug-cc-pvdz-pp",
    "aug-cc-pvqz-pp",
    "aug-cc-pvtz-pp",
    "cc-pv5z-pp",
    "cc-pvdz-pp",
    "cc-pvqz-pp",
    "cc-pvtz-pp",
    "cc-pwcv5z-pp",
    "cc-pwcvdz-pp",
    "cc-pwcvqz-pp",
    "cc-pwcvtz-pp",
    "crenbl_ecp",
    "crenbs_ecp",
    "def2-ecp",
    "dhf-ecp",
    "dhf-qzvp",
    "dhf-qzvpp",
    "dhf-svp",
    "dhf-tzvp",
    "dhf-tzvpp",
    "hay-wadt_mb_n+1_ecp",
    "hay_wadt_n-1_ecp",
    "hay-wadt_vdz_n+1_ecp",
    "lanl2dz_ecp",
    "sbkjc_ecp",
    "sdb_rlc_ecp",
    "stuttgart-koeln_mcdhf_rsc_ecp",
    "stuttgart_rlc_ecp",
    "stuttgart_rsc_1997_ecp",
    "stuttgart_rsc_ano_ecp",
    "stuttgart_rsc_ecp",
];

const VALENCE_POLARIZATION: &[&str] = &["ano-rcc", "sarc-dkh", "sarc-zora", "ugbs"];

const QMMM: &[&str] = &["qmmm_zhang_3-21g_ecp", "qmmm_zhang_6-31gs_ecp"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExclusionReason {
    Unsupported,
    ValencePolarization,
    QmMm,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unsupported => "uses effective core potentials or an unsupported layout",
            Self::ValencePolarization => "needs combined valence-polarization shells",
            Self::QmMm => "is specific to QM/MM calculations",
        })
    }
}

/// Basis set names that are refused before any file is read.
///
/// `Default` holds the built-in lists. Names are compared case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exclusions {
    pub unsupported: BTreeSet<String>,
    pub valence_polarization: BTreeSet<String>,
    pub qmmm: BTreeSet<String>,
}

impl Default for Exclusions {
    fn default() -> Self {
        let set = |names: &[&str]| -> BTreeSet<String> {
            names.iter().map(|name| name.to_string()).collect()
        };

        Self {
            unsupported: set(UNSUPPORTED),
            valence_polarization: set(VALENCE_POLARIZATION),
            qmmm: set(QMMM),
        }
    }
}

impl Exclusions {
    /// No exclusions at all
    pub fn none() -> Self {
        Self {
            unsupported: BTreeSet::new(),
            valence_polarization: BTreeSet::new(),
            qmmm: BTreeSet::new(),
        }
    }

    /// Returns why `name` is excluded, or `None` if it may be loaded
    pub fn reason(&self, name: &str) -> Option<ExclusionReason> {
        let name = name.to_ascii_lowercase();
        let contains = |set: &BTreeSet<String>| {
            set.iter().any(|entry| entry.to_ascii_lowercase() == name)
        };

        if contains(&self.unsupported) {
            Some(ExclusionReason::Unsupported)
        } else if contains(&self.valence_polarization) {
            Some(ExclusionReason::ValencePolarization)
        } else if contains(&self.qmmm) {
            Some(ExclusionReason::QmMm)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_lists() {
        let exclusions = Exclusions::default();

        assert_eq!(
            exclusions.reason("lanl2dz_ecp"),
            Some(ExclusionReason::Unsupported)
        );
        assert_eq!(
            exclusions.reason("SARC-ZORA"),
            Some(ExclusionReason::ValencePolarization)
        );
        assert_eq!(
            exclusions.reason("qmmm_zhang_3-21g_ecp"),
            Some(ExclusionReason::QmMm)
        );
        assert_eq!(exclusions.reason("sto-3g"), None);
    }

    #[test]
    fn missing_lists_deserialize_to_the_defaults() {
        let exclusions: Exclusions =
            serde_json::from_str(r#"{ "qmmm": ["my-qmmm-basis"] }"#).unwrap();

        assert_eq!(
            exclusions.reason("my-qmmm-basis"),
            Some(ExclusionReason::QmMm)
        );
        assert_eq!(exclusions.reason("qmmm_zhang_3-21g_ecp"), None);
        assert_eq!(
            exclusions.reason("def2-ecp"),
            Some(ExclusionReason::Unsupported)
        );
    }

    #[test]
    fn none_excludes_nothing() {
        assert_eq!(Exclusions::none().reason("lanl2dz_ecp"), None);
    }
}
