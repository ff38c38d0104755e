//! View-model helpers for avatar rendering.

/// Build a deterministic avatar URL for a user ID.
///
/// The ID's character codes are summed into a seed so the same user always
/// gets the same image. The URL is never validated against the network.
pub fn avatar_url(user_id: &str, size: u32) -> String {
    let seed: u32 = user_id.chars().map(|c| c as u32).sum();
    format!("https://picsum.photos/{size}/{size}?random={seed}")
}

/// Initials for a textual avatar fallback: the first character of each
/// whitespace-separated word, uppercased, at most 2 characters. Empty
/// tokens from repeated whitespace are skipped; an empty name yields "".
pub fn initials(name: &str) -> String {
    let upper: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    upper.chars().take(2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_url_is_deterministic() {
        assert_eq!(avatar_url("2244994945", 48), avatar_url("2244994945", 48));
    }

    #[test]
    fn avatar_url_uses_char_code_seed() {
        // '1' + '2' = 49 + 50
        assert_eq!(avatar_url("12", 48), "https://picsum.photos/48/48?random=99");
    }

    #[test]
    fn avatar_url_varies_by_size() {
        assert_eq!(avatar_url("12", 120), "https://picsum.photos/120/120?random=99");
    }

    #[test]
    fn initials_two_words() {
        assert_eq!(initials("X Developers"), "XD");
    }

    #[test]
    fn initials_single_word() {
        assert_eq!(initials("Cher"), "C");
    }

    #[test]
    fn initials_empty_name() {
        assert_eq!(initials(""), "");
    }

    #[test]
    fn initials_truncates_to_two() {
        assert_eq!(initials("Ada Lovelace King"), "AL");
    }

    #[test]
    fn initials_skips_empty_tokens() {
        assert_eq!(initials("  jane   doe  "), "JD");
    }

    #[test]
    fn initials_uppercases() {
        assert_eq!(initials("jack dorsey"), "JD");
    }
}
