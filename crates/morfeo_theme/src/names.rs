//! Style name camelization

/// Turn a style name such as `Primary/Light blue` into a theme key
/// (`primary.LightBlue`).
///
/// The first `/` becomes `.`, words are split on spaces and joined back
/// together. The first ASCII letter of the first word is lower-cased and the
/// first ASCII letter of every other word is upper-cased; everything else is
/// kept as is.
pub fn parse_name(raw: &str) -> String {
    let dotted = raw.replacen('/', ".", 1);
    dotted
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                recase_first_letter(word, char::to_ascii_lowercase)
            } else {
                recase_first_letter(word, char::to_ascii_uppercase)
            }
        })
        .collect()
}

fn recase_first_letter(word: &str, recase: fn(&char) -> char) -> String {
    let mut out = String::with_capacity(word.len());
    let mut done = false;
    for c in word.chars() {
        if !done && c.is_ascii_alphabetic() {
            out.push(recase(&c));
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camelizes_words() {
        assert_eq!(parse_name("Light blue"), "lightBlue");
        assert_eq!(parse_name("primary"), "primary");
        assert_eq!(parse_name("Very light gray"), "veryLightGray");
    }

    #[test]
    fn first_slash_becomes_a_dot() {
        assert_eq!(parse_name("Primary/Light blue"), "primary.LightBlue");
        assert_eq!(parse_name("a/b/c"), "a.b/c");
    }

    #[test]
    fn leading_symbols_are_skipped() {
        assert_eq!(parse_name("01 gray"), "01Gray");
        assert_eq!(parse_name("brand #main"), "brand#Main");
    }

    #[test]
    fn empty_words_collapse() {
        assert_eq!(parse_name("two  spaces"), "twoSpaces");
        assert_eq!(parse_name(""), "");
    }
}
