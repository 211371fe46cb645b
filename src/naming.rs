//! Display titles derived from post directory names.
//!
//! Post directories are slugs: lowercase words separated by dashes. The
//! homepage and post pages show them as capitalized words:
//! - `my-first-post/` → "My First Post"
//! - `gan-tricks/` → "Gan Tricks"
//! - `lstm/` → "Lstm"

/// Convert a dash-separated slug into a display title.
///
/// Only the first character of each word is uppercased; the rest of the word
/// is kept as written (`ssl-in-PyTorch` → "Ssl In PyTorch"). Empty words from
/// doubled, leading, or trailing dashes are dropped so the result never has
/// stray spaces.
pub fn slug_to_title(name: &str) -> String {
    name.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_slug() {
        assert_eq!(slug_to_title("my-first-post"), "My First Post");
    }

    #[test]
    fn single_word() {
        assert_eq!(slug_to_title("lstm"), "Lstm");
    }

    #[test]
    fn rest_of_word_untouched() {
        assert_eq!(slug_to_title("ssl-in-PyTorch"), "Ssl In PyTorch");
        assert_eq!(slug_to_title("MIXED-case"), "MIXED Case");
    }

    #[test]
    fn digits_stay_as_is() {
        assert_eq!(slug_to_title("2018-gan-review"), "2018 Gan Review");
    }

    #[test]
    fn doubled_dashes_collapse() {
        assert_eq!(slug_to_title("a--b"), "A B");
    }

    #[test]
    fn leading_and_trailing_dashes_dropped() {
        assert_eq!(slug_to_title("-draft-"), "Draft");
    }

    #[test]
    fn empty_input() {
        assert_eq!(slug_to_title(""), "");
        assert_eq!(slug_to_title("---"), "");
    }

    #[test]
    fn non_ascii_first_letter() {
        assert_eq!(slug_to_title("über-alles"), "Über Alles");
    }
}
