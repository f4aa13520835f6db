//! Throwaway values for request payloads.

use rand::Rng;

/// Generator for the names, keys and sentences scenarios put into payloads.
pub struct FakeData;

impl FakeData {
    /// A four-letter project key starting with `A`, e.g. `AUSD`.
    #[must_use]
    pub fn project_key() -> String {
        format!("A{}", Self::random_from_charset(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ", 3))
    }

    /// A project name with a nine digit suffix.
    #[must_use]
    pub fn project_name() -> String {
        format!("Project {}", Self::random_from_charset(b"0123456789", 9))
    }

    /// A company-like name.
    #[must_use]
    pub fn company() -> String {
        const NAMES: &[&str] = &[
            "Smith", "Johnson", "Garcia", "Miller", "Davis", "Lopez", "Wilson", "Anderson",
            "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
        ];
        const SUFFIXES: &[&str] = &["LLC", "Inc", "Group", "and Sons", "PLC", "Ltd"];
        let mut rng = rand::rng();
        let name = NAMES[rng.random_range(0..NAMES.len())];
        let suffix = SUFFIXES[rng.random_range(0..SUFFIXES.len())];
        format!("{name} {suffix}")
    }

    /// A short sentence ending in a period.
    #[must_use]
    pub fn sentence() -> String {
        const WORDS: &[&str] = &[
            "issue", "review", "release", "backlog", "sprint", "deploy", "check", "fix",
            "team", "board", "ticket", "update", "report", "build", "status", "notes",
        ];
        let mut rng = rand::rng();
        let count = rng.random_range(4..=8);
        let words: Vec<&str> = (0..count)
            .map(|_| WORDS[rng.random_range(0..WORDS.len())])
            .collect();
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    fn random_from_charset(charset: &[u8], len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| charset[rng.random_range(0..charset.len())] as char)
            .collect()
    }
}
