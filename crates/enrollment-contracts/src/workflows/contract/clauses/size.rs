use regex::Regex;
use std::sync::LazyLock;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static RE_NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid entity regex"));

const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&ordm;", "º"),
    ("&ordf;", "ª"),
    ("&sect;", "§"),
    ("&ndash;", "\u{2013}"),
    ("&mdash;", "\u{2014}"),
    ("&hellip;", "…"),
    ("&laquo;", "«"),
    ("&raquo;", "»"),
    ("&ldquo;", "“"),
    ("&rdquo;", "”"),
    ("&lsquo;", "‘"),
    ("&rsquo;", "’"),
    ("&deg;", "°"),
    ("&middot;", "·"),
    ("&aacute;", "á"),
    ("&Aacute;", "Á"),
    ("&agrave;", "à"),
    ("&acirc;", "â"),
    ("&Acirc;", "Â"),
    ("&atilde;", "ã"),
    ("&Atilde;", "Ã"),
    ("&eacute;", "é"),
    ("&Eacute;", "É"),
    ("&ecirc;", "ê"),
    ("&Ecirc;", "Ê"),
    ("&iacute;", "í"),
    ("&Iacute;", "Í"),
    ("&oacute;", "ó"),
    ("&Oacute;", "Ó"),
    ("&ocirc;", "ô"),
    ("&Ocirc;", "Ô"),
    ("&otilde;", "õ"),
    ("&Otilde;", "Õ"),
    ("&uacute;", "ú"),
    ("&Uacute;", "Ú"),
    ("&ccedil;", "ç"),
    ("&Ccedil;", "Ç"),
    // Last so `&amp;lt;` decodes to the literal `&lt;`.
    ("&amp;", "&"),
];

/// Visible text of a markup fragment: tags removed, numeric and common named entities
/// decoded. Named entities outside the table are left as written.
pub fn strip_markup(markup: &str) -> String {
    let without_tags = RE_TAG.replace_all(markup, "");
    let numeric = RE_NUMERIC_ENTITY.replace_all(&without_tags, |caps: &regex::Captures<'_>| {
        let code = &caps[1];
        let parsed = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        parsed
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    NAMED_ENTITIES
        .iter()
        .fold(numeric.into_owned(), |text, (entity, replacement)| {
            text.replace(entity, replacement)
        })
}

/// Printable-size estimate shared by segmentation and pagination: the number of
/// characters left once markup is stripped. An approximation of the printed length,
/// not a measurement.
pub fn estimate_size(markup: &str) -> usize {
    strip_markup(markup).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_counts_characters() {
        assert_eq!(estimate_size("<p><strong>Olá</strong> mundo</p>"), 9);
        assert_eq!(estimate_size(""), 0);
        assert_eq!(estimate_size("<br/><hr>"), 0);
    }

    #[test]
    fn decodes_entities_before_counting() {
        assert_eq!(strip_markup("Art.&nbsp;5&ordm; &amp; &#167;2"), "Art. 5º & §2");
        assert_eq!(estimate_size("&lt;b&gt;"), 3);
        assert_eq!(strip_markup("&amp;lt;"), "&lt;");
    }

    #[test]
    fn typographic_and_accented_entities_count_as_one_character() {
        assert_eq!(strip_markup("1 &ndash; Objeto &mdash; fim&hellip;"), "1 \u{2013} Objeto \u{2014} fim…");
        assert_eq!(strip_markup("CL&Aacute;USULA da presta&ccedil;&atilde;o"), "CLÁUSULA da prestação");
        assert_eq!(estimate_size("a&ndash;b"), 3);
    }

    #[test]
    fn unknown_named_entities_are_left_as_written() {
        assert_eq!(estimate_size("&zwnj;"), 6);
    }

    #[test]
    fn counts_unicode_scalars_not_bytes() {
        assert_eq!(estimate_size("CLÁUSULA"), 8);
    }
}
