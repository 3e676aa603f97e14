/// Suffixes appended to a word to build its inflected forms.
pub const SUFFIXES: [&str; 3] = ["en", "at", "ur"];

/// Returns the word followed by its three inflected forms.
///
/// `conjugate("ta")` → `["ta", "taen", "taat", "taur"]`
pub fn conjugate(word: &str) -> [String; 4] {
	let form = |suffix: &str| format!("{word}{suffix}");
	[word.to_owned(), form(SUFFIXES[0]), form(SUFFIXES[1]), form(SUFFIXES[2])]
}

/// The four forms of [`conjugate`] joined by single spaces.
pub fn conjugation_line(word: &str) -> String {
	conjugate(word).join(" ")
}
