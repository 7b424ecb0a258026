//! Casing and pluralization helpers shared by the generator and wiring.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// Convert a name to StudlyCase (e.g. `user_profile` → `UserProfile`)
pub fn studly(s: &str) -> String {
    s.to_upper_camel_case()
}

/// Convert a name to camelCase (e.g. `UserProfile` → `userProfile`)
pub fn camel(s: &str) -> String {
    s.to_lower_camel_case()
}

/// Convert a name to snake_case (e.g. `UserProfile` → `user_profile`)
pub fn snake(s: &str) -> String {
    s.to_snake_case()
}

/// Convert a name to kebab-case (e.g. `UserProfile` → `user-profile`)
pub fn kebab(s: &str) -> String {
    s.to_kebab_case()
}

/// Title-case a name with underscores treated as word separators
///
/// Used for field labels: `user_id` → `User Id`.
pub fn title(s: &str) -> String {
    s.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Naive English pluralization
///
/// Covers the common endings (`category` → `categories`, `box` → `boxes`);
/// anything else gets an `s` appended.
pub fn plural(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let lower = s.to_lowercase();
    if lower.ends_with('y') && !ends_with_vowel_y(&lower) {
        return format!("{}ies", &s[..s.len() - 1]);
    }
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{s}es");
    }
    format!("{s}s")
}

/// Pluralize the last word of a multi-word title (`User Profile` → `User Profiles`)
pub fn plural_title(s: &str) -> String {
    match s.rsplit_once(' ') {
        Some((head, last)) => format!("{} {}", head, plural(last)),
        None => plural(s),
    }
}

fn ends_with_vowel_y(lower: &str) -> bool {
    let mut rev = lower.chars().rev();
    let _y = rev.next();
    matches!(rev.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}
