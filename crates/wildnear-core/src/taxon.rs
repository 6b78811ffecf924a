//! Iconic taxon categories and their display metadata

use serde::{Deserialize, Serialize};

/// Coarse taxonomic grouping used for display color and icon, not scientific
/// classification. The set is closed; anything outside it is carried as
/// "no category" and rendered with [`DEFAULT_TAXON_META`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconicTaxon {
    Plantae,
    Aves,
    Mammalia,
    Insecta,
    Reptilia,
    Amphibia,
    Fungi,
    Arachnida,
    Actinopterygii,
    Mollusca,
    Chromista,
}

/// Display metadata for one iconic taxon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonMeta {
    pub color: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
}

/// Metadata for records with no iconic category
pub const DEFAULT_TAXON_META: TaxonMeta = TaxonMeta {
    color: "#6a6a6a",
    emoji: "🔬",
    label: "Other",
};

impl IconicTaxon {
    /// All categories, in display order
    pub const ALL: [IconicTaxon; 11] = [
        IconicTaxon::Plantae,
        IconicTaxon::Aves,
        IconicTaxon::Mammalia,
        IconicTaxon::Insecta,
        IconicTaxon::Reptilia,
        IconicTaxon::Amphibia,
        IconicTaxon::Fungi,
        IconicTaxon::Arachnida,
        IconicTaxon::Actinopterygii,
        IconicTaxon::Mollusca,
        IconicTaxon::Chromista,
    ];

    /// Parse an iNaturalist iconic taxon name. Exact match; unknown names
    /// (including iNaturalist's "Animalia" and "unknown") yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Plantae" => Some(Self::Plantae),
            "Aves" => Some(Self::Aves),
            "Mammalia" => Some(Self::Mammalia),
            "Insecta" => Some(Self::Insecta),
            "Reptilia" => Some(Self::Reptilia),
            "Amphibia" => Some(Self::Amphibia),
            "Fungi" => Some(Self::Fungi),
            "Arachnida" => Some(Self::Arachnida),
            "Actinopterygii" => Some(Self::Actinopterygii),
            "Mollusca" => Some(Self::Mollusca),
            "Chromista" => Some(Self::Chromista),
            _ => None,
        }
    }

    /// Canonical name as used on the wire by iNaturalist
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plantae => "Plantae",
            Self::Aves => "Aves",
            Self::Mammalia => "Mammalia",
            Self::Insecta => "Insecta",
            Self::Reptilia => "Reptilia",
            Self::Amphibia => "Amphibia",
            Self::Fungi => "Fungi",
            Self::Arachnida => "Arachnida",
            Self::Actinopterygii => "Actinopterygii",
            Self::Mollusca => "Mollusca",
            Self::Chromista => "Chromista",
        }
    }

    /// Display color, emoji, and plural label for this category
    pub fn meta(&self) -> TaxonMeta {
        match self {
            Self::Plantae => TaxonMeta { color: "#3d5a3e", emoji: "🌿", label: "Plants" },
            Self::Aves => TaxonMeta { color: "#4a6b8a", emoji: "🐦", label: "Birds" },
            Self::Mammalia => TaxonMeta { color: "#7a5c3a", emoji: "🦌", label: "Mammals" },
            Self::Insecta => TaxonMeta { color: "#8a6a2a", emoji: "🦋", label: "Insects" },
            Self::Reptilia => TaxonMeta { color: "#5a7a3a", emoji: "🦎", label: "Reptiles" },
            Self::Amphibia => TaxonMeta { color: "#3a7a6a", emoji: "🐸", label: "Amphibians" },
            Self::Fungi => TaxonMeta { color: "#7a4a6a", emoji: "🍄", label: "Fungi" },
            Self::Arachnida => TaxonMeta { color: "#8a3a3a", emoji: "🕷", label: "Arachnids" },
            Self::Actinopterygii => TaxonMeta { color: "#3a5a8a", emoji: "🐟", label: "Fish" },
            Self::Mollusca => TaxonMeta { color: "#6a5a8a", emoji: "🐚", label: "Mollusks" },
            Self::Chromista => TaxonMeta { color: "#4a7a6a", emoji: "🌊", label: "Chromista" },
        }
    }

    /// Metadata for an optional category, falling back to the "Other" default
    pub fn meta_or_default(taxon: Option<IconicTaxon>) -> TaxonMeta {
        taxon.map(|t| t.meta()).unwrap_or(DEFAULT_TAXON_META)
    }
}

impl std::fmt::Display for IconicTaxon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips() {
        for taxon in IconicTaxon::ALL {
            assert_eq!(IconicTaxon::from_name(taxon.name()), Some(taxon));
        }
    }

    #[test]
    fn test_from_name_is_exact_match() {
        assert_eq!(IconicTaxon::from_name("aves"), None);
        assert_eq!(IconicTaxon::from_name("Animalia"), None);
        assert_eq!(IconicTaxon::from_name(""), None);
    }

    #[test]
    fn test_meta_or_default_falls_back() {
        let meta = IconicTaxon::meta_or_default(None);
        assert_eq!(meta.label, "Other");
        assert_eq!(meta.color, "#6a6a6a");
    }

    #[test]
    fn test_meta_for_birds() {
        let meta = IconicTaxon::Aves.meta();
        assert_eq!(meta.label, "Birds");
        assert_eq!(meta.emoji, "🐦");
    }
}
