/// Resolve a bilingual display field through its fallback chain:
/// generic slot first, then English, then Turkish. Whitespace-only
/// values count as empty.
pub fn resolve_localized<'a>(
    primary: Option<&'a str>,
    en: Option<&'a str>,
    tr: Option<&'a str>,
) -> Option<&'a str> {
    [primary, en, tr]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Fill every empty slot of a bilingual trio from the fallback chain so
/// that no slot is ever persisted empty. Returns `None` when no slot was
/// supplied at all.
pub fn backfill_trio(
    primary: Option<&str>,
    en: Option<&str>,
    tr: Option<&str>,
) -> Option<(String, String, String)> {
    let fallback = resolve_localized(primary, en, tr)?;

    let fill = |slot: Option<&str>| {
        slot.map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };

    Some((fill(primary), fill(en), fill(tr)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_slot_wins() {
        let resolved = resolve_localized(Some("Jacket"), Some("Jacket EN"), Some("Ceket"));
        assert_eq!(resolved, Some("Jacket"));
    }

    #[test]
    fn falls_through_empty_slots() {
        assert_eq!(resolve_localized(None, Some("Dress"), None), Some("Dress"));
        assert_eq!(resolve_localized(Some(""), None, Some("Elbise")), Some("Elbise"));
        assert_eq!(resolve_localized(Some("   "), Some(" "), Some("Mont")), Some("Mont"));
    }

    #[test]
    fn nothing_supplied_resolves_to_none() {
        assert_eq!(resolve_localized(None, None, None), None);
        assert_eq!(resolve_localized(Some(""), Some("  "), None), None);
        assert!(backfill_trio(None, Some(""), None).is_none());
    }

    #[test]
    fn single_variant_backfills_the_others() {
        let (name, name_en, name_tr) = backfill_trio(None, Some("Red Dress"), None).unwrap();
        assert_eq!(name, "Red Dress");
        assert_eq!(name_en, "Red Dress");
        assert_eq!(name_tr, "Red Dress");
    }

    #[test]
    fn supplied_variants_keep_their_values() {
        let (name, name_en, name_tr) =
            backfill_trio(None, Some("Red Dress"), Some("Kırmızı Elbise")).unwrap();
        assert_eq!(name, "Red Dress");
        assert_eq!(name_en, "Red Dress");
        assert_eq!(name_tr, "Kırmızı Elbise");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let (name, name_en, name_tr) = backfill_trio(Some("  Coat "), None, None).unwrap();
        assert_eq!((name.as_str(), name_en.as_str(), name_tr.as_str()), ("Coat", "Coat", "Coat"));
    }
}
