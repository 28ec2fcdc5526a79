pub mod state;

use serde::{Deserialize, Serialize};

/// Simple template rendering: replaces {{key}} with value.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (key, value) in vars {
        output = output.replace(&format!("{{{{{}}}}}", key), value);
    }
    output
}

/// Split an identifier into words on separators and lower-to-upper transitions.
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert any identifier to kebab-case (`UserProfile` -> `user-profile`).
pub fn to_kebab_case(name: &str) -> String {
    words(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Convert any identifier to snake_case (`UserProfile` -> `user_profile`).
pub fn to_snake_case(name: &str) -> String {
    words(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert any identifier to PascalCase (`user-profile` -> `UserProfile`).
pub fn to_pascal_case(name: &str) -> String {
    words(name).iter().map(|w| capitalize(w)).collect()
}

/// Convert any identifier to camelCase (`user-profile` -> `userProfile`).
pub fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Language used for pluralizing generated identifiers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    /// Parse a language tag. Unknown tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "es" => Language::Es,
            _ => Language::En,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Compute the plural form of `word` using the suffix rules of `lang`.
pub fn pluralize(word: &str, lang: Language) -> String {
    match lang {
        Language::Es => pluralize_es(word),
        Language::En => pluralize_en(word),
    }
}

fn pluralize_es(word: &str) -> String {
    let Some(last) = word.chars().last() else {
        return String::new();
    };
    let last = last.to_ascii_lowercase();
    if VOWELS.contains(&last) {
        format!("{word}s")
    } else if last == 'z' {
        format!("{}ces", &word[..word.len() - 1])
    } else {
        format!("{word}es")
    }
}

fn pluralize_en(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    let mut rev = lower.chars().rev();
    let last = rev.next();
    let before = rev.next();
    if last == Some('y') && !before.is_some_and(|c| VOWELS.contains(&c)) {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|end| lower.ends_with(end))
    {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_on_case_and_separators() {
        assert_eq!(words("userProfile"), vec!["user", "Profile"]);
        assert_eq!(words("user-profile_item"), vec!["user", "profile", "item"]);
        assert_eq!(words("  order line "), vec!["order", "line"]);
        assert!(words("--").is_empty());
    }

    #[test]
    fn spanish_consonant_appends_es() {
        assert_eq!(pluralize("camion", Language::Es), "camiones");
    }

    #[test]
    fn english_vowel_y_appends_s() {
        assert_eq!(pluralize("day", Language::En), "days");
    }
}
