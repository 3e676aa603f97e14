/// Parameters of one generation run, shared by every front end.
///
/// The run always goes through the same steps, in this order:
/// 1. generate every word with `syllables` syllables
/// 2. shuffle the whole list if `random` is set
/// 3. keep the first `number` words if set
/// 4. expand each word into its conjugation line if `conjugate` is set
///
/// Truncating after shuffling draws a random sample instead of the first
/// generated words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInput {
	/// Number of syllables per word (must be >= 1).
	pub syllables: i64,

	/// Maximum number of output lines.
	pub number: Option<usize>,

	/// Whether to shuffle the full list before truncating.
	pub random: bool,

	/// Seed of the shuffle, for reproducible output. Ignored unless `random`.
	pub seed: Option<u64>,

	/// Whether to output the conjugated forms of each word.
	pub conjugate: bool,
}

impl GenerationInput {
	/// Creates an input that outputs every word, in generation order.
	pub fn new(syllables: i64) -> Self {
		Self { syllables, number: None, random: false, seed: None, conjugate: false }
	}
}
