//! Binary label assignment.

use crate::constants::dataset::TARGET_ARTIST_KEY;
use crate::types::{Fragment, Label, LabeledFragment};

/// Normalize an artist display name into its key (the lyrics file stem).
pub fn artist_key(name: &str) -> String {
    name.replace(' ', "_")
}

/// Maps artist keys to labels by exact comparison with the target key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAssigner {
    target_key: String,
}

impl LabelAssigner {
    /// Create an assigner for the given target artist key.
    pub fn new(target_key: impl Into<String>) -> Self {
        Self { target_key: target_key.into() }
    }

    /// The key labelled as the target.
    pub fn target_key(&self) -> &str {
        &self.target_key
    }

    /// Label for an artist key.
    pub fn assign(&self, artist: &str) -> Label {
        if artist == self.target_key {
            Label::Target
        } else {
            Label::Other
        }
    }

    /// Tag a fragment with the label of its artist.
    pub fn label(&self, fragment: Fragment) -> LabeledFragment {
        let label = self.assign(&fragment.artist);
        LabeledFragment { fragment, label }
    }
}

impl Default for LabelAssigner {
    fn default() -> Self {
        Self::new(TARGET_ARTIST_KEY)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn target_key_is_exact_match() {
        let assigner = LabelAssigner::default();
        assert_eq!(assigner.assign("Bob_Marley_&_The_Wailers"), Label::Target);
        assert_eq!(assigner.assign("Bob Marley & The Wailers"), Label::Other);
        assert_eq!(assigner.assign("bob_marley_&_the_wailers"), Label::Other);
        assert_eq!(assigner.assign("Ed_Sheeran"), Label::Other);
        assert_eq!(assigner.assign(""), Label::Other);
    }

    #[test]
    fn assignment_is_deterministic() {
        let assigner = LabelAssigner::new("Katy_Perry");
        let first = assigner.assign("Katy_Perry");
        for _ in 0..10 {
            assert_eq!(assigner.assign("Katy_Perry"), first);
        }
    }

    #[test]
    fn display_names_become_keys() {
        assert_eq!(artist_key("Bob Marley & The Wailers"), "Bob_Marley_&_The_Wailers");
        assert_eq!(artist_key("The Beatles"), "The_Beatles");
        let assigner = LabelAssigner::default();
        assert_eq!(assigner.assign(&artist_key("Bob Marley & The Wailers")), Label::Target);
    }

    #[test]
    fn labels_fragments() {
        let fragment = Fragment {
            artist: "Ed_Sheeran".into(),
            title: "Perfect".into(),
            text: "I found a love for me".into(),
        };
        let labeled = LabelAssigner::default().label(fragment.clone());
        assert_eq!(labeled.label, Label::Other);
        assert_eq!(labeled.fragment, fragment);
    }
}
