//! Languages offered by the reviewer

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Source language of the code under review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Python,
    JavaScript,
    Java,
    Cpp,
    CSharp,
    Go,
    Ruby,
    Php,
    Swift,
    Kotlin,
}

impl Language {
    /// All languages in the order they are offered
    pub const ALL: [Language; 10] = [
        Language::Python,
        Language::JavaScript,
        Language::Java,
        Language::Cpp,
        Language::CSharp,
        Language::Go,
        Language::Ruby,
        Language::Php,
        Language::Swift,
        Language::Kotlin,
    ];

    /// Human-readable name, as used in the prompt
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
        }
    }

    /// Info string for the fenced code block (lower-cased display name)
    pub fn fence_tag(&self) -> String {
        self.display_name().to_lowercase()
    }

    /// File extension accepted for uploads, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::JavaScript => "js",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::CSharp => "cs",
            Language::Go => "go",
            Language::Ruby => "rb",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Kotlin => "kt",
        }
    }

    /// Look up a language by file extension (case-insensitive, dot optional)
    pub fn from_extension(ext: &str) -> Option<Language> {
        let ext = ext.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|lang| lang.extension().eq_ignore_ascii_case(ext))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Accepts the display name or the file extension, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.display_name().eq_ignore_ascii_case(s))
            .or_else(|| Self::from_extension(s))
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_python() {
        assert_eq!(Language::default(), Language::Python);
    }

    #[test]
    fn test_offered_order() {
        let names: Vec<_> = Language::ALL.iter().map(|l| l.display_name()).collect();
        assert_eq!(
            names,
            vec![
                "Python",
                "JavaScript",
                "Java",
                "C++",
                "C#",
                "Go",
                "Ruby",
                "PHP",
                "Swift",
                "Kotlin"
            ]
        );
    }

    #[test]
    fn test_fence_tag_is_lowercase_name() {
        assert_eq!(Language::Cpp.fence_tag(), "c++");
        assert_eq!(Language::CSharp.fence_tag(), "c#");
        assert_eq!(Language::JavaScript.fence_tag(), "javascript");
        assert_eq!(Language::Php.fence_tag(), "php");
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("py"), Some(Language::Python));
        assert_eq!(Language::from_extension(".KT"), Some(Language::Kotlin));
        assert_eq!(Language::from_extension("cpp"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("rs"), None);
        assert_eq!(Language::from_extension(""), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("C++".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!(" c# ".parse::<Language>().unwrap(), Language::CSharp);
        assert_eq!("rb".parse::<Language>().unwrap(), Language::Ruby);
        assert!(matches!(
            "cobol".parse::<Language>(),
            Err(Error::UnsupportedLanguage(name)) if name == "cobol"
        ));
    }
}
