//! Platform family clustering.
//!
//! Raw catalog platform names ("PlayStation 5", "Xbox Series S/X", "PC", ...)
//! are bucketed into a small set of vendor families. Matching is a
//! case-insensitive substring test evaluated against [`FAMILY_TABLE`] in
//! order, so the table order is also the tie-break when a name contains more
//! than one family key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Vendor grouping used for platform badges.
///
/// Variant order matches [`FAMILY_TABLE`]; `Ord` follows it too, which keeps
/// [`PlatformGroups`] iteration in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    /// Microsoft consoles.
    Xbox,
    /// Sony consoles and handhelds.
    PlayStation,
    /// Nintendo consoles and handhelds.
    Nintendo,
    /// Apple desktop.
    MacOs,
    /// Steam-branded hardware and stores.
    Steam,
    /// Windows PC.
    Pc,
}

/// Ordered `(family, key)` rules. First match wins.
pub const FAMILY_TABLE: [(PlatformFamily, &str); 6] = [
    (PlatformFamily::Xbox, "xbox"),
    (PlatformFamily::PlayStation, "playstation"),
    (PlatformFamily::Nintendo, "nintendo"),
    (PlatformFamily::MacOs, "macos"),
    (PlatformFamily::Steam, "steam"),
    (PlatformFamily::Pc, "pc"),
];

impl PlatformFamily {
    /// Lowercase matching key.
    pub fn key(self) -> &'static str {
        FAMILY_TABLE
            .iter()
            .find(|(family, _)| *family == self)
            .map(|(_, key)| *key)
            .unwrap_or_default()
    }

    /// Label for badges.
    pub fn label(self) -> &'static str {
        match self {
            PlatformFamily::Xbox => "Xbox",
            PlatformFamily::PlayStation => "PlayStation",
            PlatformFamily::Nintendo => "Nintendo",
            PlatformFamily::MacOs => "macOS",
            PlatformFamily::Steam => "Steam",
            PlatformFamily::Pc => "PC",
        }
    }

    /// Brand colour as `#rrggbb`.
    pub fn brand_color(self) -> &'static str {
        match self {
            PlatformFamily::Xbox => "#107c10",
            PlatformFamily::PlayStation => "#00439C",
            PlatformFamily::Nintendo => "#e60012",
            PlatformFamily::MacOs => "#78C5EF",
            PlatformFamily::Steam => "#202c3c",
            PlatformFamily::Pc => "#ffffff",
        }
    }
}

/// Classify a single raw platform name.
pub fn family_for(raw_name: &str) -> Option<PlatformFamily> {
    let lowered = raw_name.to_lowercase();
    FAMILY_TABLE
        .iter()
        .find(|(_, key)| lowered.contains(key))
        .map(|(family, _)| *family)
}

/// Raw platform names bucketed by family. Empty families are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformGroups {
    groups: BTreeMap<PlatformFamily, Vec<String>>,
}

impl PlatformGroups {
    /// Names that matched `family`, in catalog order.
    pub fn get(&self, family: PlatformFamily) -> Option<&[String]> {
        self.groups.get(&family).map(Vec::as_slice)
    }

    /// Populated families in table order.
    pub fn iter(&self) -> impl Iterator<Item = (PlatformFamily, &[String])> {
        self.groups
            .iter()
            .map(|(family, names)| (*family, names.as_slice()))
    }

    /// Family keys of the populated groups.
    pub fn families(&self) -> Vec<PlatformFamily> {
        self.groups.keys().copied().collect()
    }

    /// Number of populated families.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no raw name matched any family.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group raw platform names by family, dropping names that match none.
///
/// Duplicates are kept.
pub fn group_platforms<I, S>(raw_names: I) -> PlatformGroups
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups: BTreeMap<PlatformFamily, Vec<String>> = BTreeMap::new();
    for name in raw_names {
        let name = name.as_ref();
        if let Some(family) = family_for(name) {
            groups.entry(family).or_default().push(name.to_string());
        }
    }
    PlatformGroups { groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_vendor() {
        let groups = group_platforms(["PlayStation 5", "Xbox Series S/X", "Steam"]);
        assert_eq!(groups.len(), 3);
        assert_eq!(
            groups.get(PlatformFamily::PlayStation),
            Some(&["PlayStation 5".to_string()][..])
        );
        assert_eq!(
            groups.get(PlatformFamily::Xbox),
            Some(&["Xbox Series S/X".to_string()][..])
        );
        assert_eq!(
            groups.get(PlatformFamily::Steam),
            Some(&["Steam".to_string()][..])
        );
        assert_eq!(groups.get(PlatformFamily::Pc), None);
    }

    #[test]
    fn unmatched_names_yield_no_groups() {
        let groups = group_platforms(["Commodore 64"]);
        assert!(groups.is_empty());
    }

    #[test]
    fn earlier_family_wins_tie() {
        assert_eq!(family_for("SteamPC"), Some(PlatformFamily::Steam));
        let groups = group_platforms(["SteamPC"]);
        assert_eq!(groups.families(), vec![PlatformFamily::Steam]);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(family_for("XBOX ONE"), Some(PlatformFamily::Xbox));
        assert_eq!(family_for("macOS"), Some(PlatformFamily::MacOs));
        assert_eq!(family_for("Nintendo Switch"), Some(PlatformFamily::Nintendo));
        assert_eq!(family_for("Linux"), None);
    }

    #[test]
    fn keeps_duplicates_and_catalog_order() {
        let groups = group_platforms(["PlayStation 4", "PC", "PlayStation 3", "PlayStation 4"]);
        assert_eq!(
            groups.get(PlatformFamily::PlayStation),
            Some(
                &[
                    "PlayStation 4".to_string(),
                    "PlayStation 3".to_string(),
                    "PlayStation 4".to_string()
                ][..]
            )
        );
        assert_eq!(
            groups.families(),
            vec![PlatformFamily::PlayStation, PlatformFamily::Pc]
        );
    }

    #[test]
    fn iteration_follows_table_order() {
        let groups = group_platforms(["PC", "Nintendo Switch", "Xbox One", "macOS"]);
        let order: Vec<_> = groups.iter().map(|(family, _)| family).collect();
        assert_eq!(
            order,
            vec![
                PlatformFamily::Xbox,
                PlatformFamily::Nintendo,
                PlatformFamily::MacOs,
                PlatformFamily::Pc
            ]
        );
    }

    #[test]
    fn keys_match_table() {
        for (family, key) in FAMILY_TABLE {
            assert_eq!(family.key(), key);
        }
    }
}
