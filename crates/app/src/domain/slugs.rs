//! URL slug generation.

/// Derive a slug from a display name.
///
/// Lowercases, folds common Latin accents to ASCII, and collapses every run of
/// other characters into a single `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        let folded = fold(c);

        if folded.is_empty() {
            pending_dash = !slug.is_empty();
            continue;
        }

        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }

        slug.push_str(folded);
    }

    slug
}

/// Normalise a caller-provided slug, falling back to one derived from `name`.
#[must_use]
pub fn slug_or_derive(slug: Option<&str>, name: &str) -> String {
    match slug.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => slugify(value),
        None => slugify(name),
    }
}

fn fold(c: char) -> &'static str {
    match c {
        'a'..='z' | '0'..='9' => ascii_str(c),
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'œ' => "oe",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        _ => "",
    }
}

fn ascii_str(c: char) -> &'static str {
    const TABLE: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

    TABLE
        .find(c)
        .and_then(|index| TABLE.get(index..=index))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_joins_words() {
        assert_eq!(slugify("Pomme Golden"), "pomme-golden");
    }

    #[test]
    fn slugify_folds_accents() {
        assert_eq!(slugify("Légumes Bio"), "legumes-bio");
        assert_eq!(slugify("Crème brûlée"), "creme-brulee");
    }

    #[test]
    fn slugify_collapses_punctuation_and_trims() {
        assert_eq!(slugify("  Fruits & Légumes!! "), "fruits-legumes");
        assert_eq!(slugify("Œufs (x12)"), "oeufs-x12");
    }

    #[test]
    fn slugify_of_symbols_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slug_or_derive_prefers_explicit_slug() {
        assert_eq!(slug_or_derive(Some("Mon-Slug"), "ignored"), "mon-slug");
        assert_eq!(slug_or_derive(Some("  "), "Tomate Cerise"), "tomate-cerise");
        assert_eq!(slug_or_derive(None, "Tomate Cerise"), "tomate-cerise");
    }
}
