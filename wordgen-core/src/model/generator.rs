use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::GenError;
use crate::model::combiner::{fork, fork_auto};
use crate::model::conjugator::conjugation_line;
use crate::model::inventory::Inventory;
use crate::model::request::GenerationInput;

/// Default maximum number of words [`WordGenerator::generate`] materializes.
pub const DEFAULT_WORD_LIMIT: usize = 10_000_000;

/// Default bound on the bytes of text [`WordGenerator::generate`] materializes,
/// and on the length of a single word.
pub const DEFAULT_BYTE_LIMIT: usize = 1 << 30;

/// Word generator over a phoneme [`Inventory`].
///
/// # Rules
/// - A word starts with a consonant-vowel syllable or a bare vowel,
///   never with a cluster
/// - Every following syllable is consonant-vowel or cluster-vowel
/// - A word ends with a vowel or with one final consonant
///
/// # Responsibilities
/// - Enumerate every word of a given syllable count, in a fixed order
/// - Compute the number of words without generating them
/// - Refuse generations above the word limit
#[derive(Debug, Clone)]
pub struct WordGenerator {
	inventory: Inventory,
	word_limit: Option<usize>,
	byte_limit: usize,
}

impl Default for WordGenerator {
	fn default() -> Self {
		Self::new(Inventory::default())
	}
}

impl WordGenerator {
	/// Creates a generator with the default word limit.
	pub fn new(inventory: Inventory) -> Self {
		Self { inventory, word_limit: Some(DEFAULT_WORD_LIMIT), byte_limit: DEFAULT_BYTE_LIMIT }
	}

	/// Replaces the word limit. `None` removes it.
	pub fn with_word_limit(mut self, word_limit: Option<usize>) -> Self {
		self.word_limit = word_limit;
		self
	}

	/// Replaces the byte limit.
	///
	/// Unlike the word limit it cannot be removed: a single-syllable middle
	/// inventory keeps the word count constant while words grow without bound.
	pub fn with_byte_limit(mut self, byte_limit: usize) -> Self {
		self.byte_limit = byte_limit;
		self
	}

	pub fn inventory(&self) -> &Inventory {
		&self.inventory
	}

	pub fn word_limit(&self) -> Option<usize> {
		self.word_limit
	}

	/// Number of syllables appended after the first one.
	///
	/// # Errors
	/// Returns `InvalidSyllables` if `syllables < 1`.
	pub fn rounds(syllables: i64) -> Result<usize, GenError> {
		if syllables < 1 {
			return Err(GenError::InvalidSyllables(syllables));
		}
		usize::try_from(syllables - 1).map_err(|_| GenError::CountOverflow { syllables })
	}

	/// Number of words [`WordGenerator::generate`] returns for `syllables`,
	/// duplicates included.
	///
	/// `first * middle^(syllables - 1) * (1 + finals)`
	///
	/// # Errors
	/// - `InvalidSyllables` if `syllables < 1`
	/// - `CountOverflow` if the count does not fit in `usize`
	pub fn count(&self, syllables: i64) -> Result<usize, GenError> {
		let rounds = Self::rounds(syllables)?;
		let overflow = || GenError::CountOverflow { syllables };
		let (first, middle) = self.syllable_counts().ok_or_else(overflow)?;

		let expansions = match (middle, rounds) {
			(_, 0) => 1,
			(0 | 1, _) => middle,
			_ => u32::try_from(rounds).ok().and_then(|r| middle.checked_pow(r)).ok_or_else(overflow)?,
		};
		let stems = first.checked_mul(expansions).ok_or_else(overflow)?;

		let endings = self.inventory.finals().len().checked_add(1).ok_or_else(overflow)?;
		stems.checked_mul(endings).ok_or_else(overflow)
	}

	/// Generates every word with `syllables` syllables.
	///
	/// The whole list is materialized. Order and multiplicity follow the
	/// combinatorial expansion: words without a final consonant first, then
	/// every word followed by each final consonant.
	///
	/// # Errors
	/// - `InvalidSyllables` if `syllables < 1`
	/// - `CountOverflow`, `TooManyWords` or `TooLarge` if the result is too large
	pub fn generate(&self, syllables: i64) -> Result<Vec<String>, GenError> {
		let rounds = Self::rounds(syllables)?;
		let count = self.count(syllables)?;
		if let Some(limit) = self.word_limit {
			if count > limit {
				return Err(GenError::TooManyWords { count, limit });
			}
		}
		let longest = self.longest_word(syllables, rounds)?;
		let bytes = count.checked_mul(longest).ok_or(GenError::CountOverflow { syllables })?;
		if bytes > self.byte_limit {
			return Err(GenError::TooLarge { bytes, limit: self.byte_limit });
		}

		let inventory = &self.inventory;
		let cv = fork(inventory.consonants(), inventory.vowels());
		let clv = fork(inventory.clusters(), inventory.vowels());

		// A word starts with a CV syllable or a vowel
		let mut words = cv.clone();
		words.extend_from_slice(inventory.vowels());

		// Middle syllables are either CV or CLV
		let middle: Vec<String> = cv.into_iter().chain(clv).collect();
		for round in 0..rounds {
			words = fork_auto(&words, &middle);
			debug!("round {}/{}: {} stems", round + 1, rounds, words.len());
		}

		// Keep every word with and without a final consonant
		let with_finals = fork_auto(&words, inventory.finals());
		words.extend(with_finals);

		debug!("generated {} words of {} syllables", words.len(), syllables);
		Ok(words)
	}

	/// Lazily yields the same words, in the same order, as [`WordGenerator::generate`].
	///
	/// The word limit does not apply: nothing beyond the syllable tables is
	/// kept in memory. A single word must still fit in the byte limit.
	///
	/// # Errors
	/// - `InvalidSyllables` if `syllables < 1`
	/// - `CountOverflow` if the count does not fit in `usize`
	/// - `TooLarge` if one word may exceed the byte limit
	pub fn words(&self, syllables: i64) -> Result<Words<'_>, GenError> {
		let rounds = Self::rounds(syllables)?;
		let total = self.count(syllables)?;
		let longest = self.longest_word(syllables, rounds)?;
		if longest > self.byte_limit {
			return Err(GenError::TooLarge { bytes: longest, limit: self.byte_limit });
		}
		let inventory = &self.inventory;

		let cv = fork(inventory.consonants(), inventory.vowels());
		let clv = fork(inventory.clusters(), inventory.vowels());
		let mut first = cv.clone();
		first.extend_from_slice(inventory.vowels());
		let middle: Vec<String> = cv.into_iter().chain(clv).collect();

		let stems = total / (inventory.finals().len() + 1);
		Ok(Words { first, middle, finals: inventory.finals(), rounds, stems, index: 0, total })
	}

	/// Runs the full output pipeline described by `input`.
	///
	/// # Behavior
	/// - Generates every word (subject to the word limit).
	/// - Shuffles the whole list if `input.random`, seeded by `input.seed` if given.
	/// - Keeps the first `input.number` words if given.
	/// - Replaces each word by its conjugation line if `input.conjugate`.
	///
	/// # Returns
	/// One output line per surviving word.
	pub fn produce(&self, input: &GenerationInput) -> Result<Vec<String>, GenError> {
		let mut words = self.generate(input.syllables)?;

		if input.random {
			match input.seed {
				Some(seed) => words.shuffle(&mut StdRng::seed_from_u64(seed)),
				None => words.shuffle(&mut rand::rng()),
			}
		}

		if let Some(number) = input.number {
			words.truncate(number);
		}

		if input.conjugate {
			words = words.iter().map(|word| conjugation_line(word)).collect();
		}

		Ok(words)
	}

	/// Upper bound on the byte length of one word after `rounds` rounds.
	fn longest_word(&self, syllables: i64, rounds: usize) -> Result<usize, GenError> {
		let inventory = &self.inventory;
		let overflow = || GenError::CountOverflow { syllables };
		let longest = |items: &[String]| items.iter().map(String::len).max().unwrap_or(0);

		let vowel = longest(inventory.vowels());
		let first = longest(inventory.consonants()).checked_add(vowel).ok_or_else(overflow)?;
		let middle = longest(inventory.consonants())
			.max(longest(inventory.clusters()))
			.checked_add(vowel)
			.ok_or_else(overflow)?;

		middle
			.checked_mul(rounds)
			.and_then(|m| m.checked_add(first))
			.and_then(|m| m.checked_add(longest(inventory.finals())))
			.ok_or_else(overflow)
	}

	/// Number of first syllables and of middle syllables.
	fn syllable_counts(&self) -> Option<(usize, usize)> {
		let inventory = &self.inventory;
		let vowels = inventory.vowels().len();
		let cv = inventory.consonants().len().checked_mul(vowels)?;
		let clv = inventory.clusters().len().checked_mul(vowels)?;
		Some((cv.checked_add(vowels)?, cv.checked_add(clv)?))
	}
}

/// Lazy word sequence created by [`WordGenerator::words`].
///
/// The n-th word is decoded from its index as a mixed-radix number: the
/// last syllable varies fastest, the final consonant (if any) faster still.
#[derive(Debug, Clone)]
pub struct Words<'a> {
	first: Vec<String>,
	middle: Vec<String>,
	finals: &'a [String],
	rounds: usize,
	/// Number of words without a final consonant.
	stems: usize,
	index: usize,
	total: usize,
}

impl Words<'_> {
	fn word_at(&self, index: usize) -> String {
		let (mut stem, last) = if index < self.stems {
			(index, None)
		} else {
			let index = index - self.stems;
			(index / self.finals.len(), Some(&self.finals[index % self.finals.len()]))
		};

		let mut parts: Vec<&str> = Vec::with_capacity(self.rounds + 2);
		if let Some(last) = last {
			parts.push(last);
		}
		for _ in 0..self.rounds {
			parts.push(&self.middle[stem % self.middle.len()]);
			stem /= self.middle.len();
		}
		parts.push(&self.first[stem]);

		parts.iter().rev().copied().collect()
	}
}

impl Iterator for Words<'_> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		if self.index >= self.total {
			return None;
		}
		let word = self.word_at(self.index);
		self.index += 1;
		Some(word)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.total - self.index;
		(remaining, Some(remaining))
	}

	fn nth(&mut self, n: usize) -> Option<String> {
		self.index = self.index.saturating_add(n).min(self.total);
		self.next()
	}
}

impl ExactSizeIterator for Words<'_> {}

#[cfg(test)]
mod tests {
	use super::*;

	fn inventory(consonants: &[&str], finals: &[&str], vowels: &[&str], clusters: &[&str]) -> Inventory {
		let owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect();
		Inventory::new("test", owned(consonants), owned(finals), owned(vowels), owned(clusters)).unwrap()
	}

	#[test]
	fn single_syllable_order() {
		let generator = WordGenerator::new(inventory(&["p", "t"], &["n"], &["a", "o"], &["pl"]));
		assert_eq!(
			generator.generate(1).unwrap(),
			vec!["pa", "po", "ta", "to", "a", "o", "pan", "pon", "tan", "ton", "an", "on"]
		);
	}

	#[test]
	fn second_syllable_may_be_a_cluster() {
		let generator = WordGenerator::new(inventory(&["p"], &[], &["a"], &["pl"]));
		assert_eq!(generator.generate(2).unwrap(), vec!["papa", "papla", "apa", "apla"]);
	}

	#[test]
	fn reference_counts() {
		let generator = WordGenerator::default();
		assert_eq!(generator.count(1).unwrap(), 260);
		assert_eq!(generator.count(2).unwrap(), 17_680);
		assert_eq!(generator.count(3).unwrap(), 1_202_240);
		assert_eq!(generator.generate(1).unwrap().len(), 260);
		assert_eq!(generator.generate(2).unwrap().len(), 17_680);
	}

	#[test]
	fn non_positive_syllables_are_rejected() {
		let generator = WordGenerator::default();
		assert!(matches!(generator.generate(0), Err(GenError::InvalidSyllables(0))));
		assert!(matches!(generator.generate(-3), Err(GenError::InvalidSyllables(-3))));
		assert!(matches!(generator.count(0), Err(GenError::InvalidSyllables(0))));
		assert!(generator.words(0).is_err());
	}

	#[test]
	fn word_limit_is_enforced() {
		let generator = WordGenerator::default().with_word_limit(Some(1000));
		match generator.generate(2) {
			Err(GenError::TooManyWords { count, limit }) => {
				assert_eq!(count, 17_680);
				assert_eq!(limit, 1000);
			}
			other => panic!("expected TooManyWords, got {other:?}"),
		}
		assert_eq!(generator.generate(1).unwrap().len(), 260);
		assert!(WordGenerator::default().with_word_limit(None).word_limit().is_none());
	}

	#[test]
	fn huge_counts_overflow_instead_of_allocating() {
		let generator = WordGenerator::default();
		assert!(matches!(generator.count(100), Err(GenError::CountOverflow { syllables: 100 })));
		assert!(matches!(generator.generate(100), Err(GenError::CountOverflow { .. })));
	}

	#[test]
	fn single_middle_syllable_is_bounded() {
		let generator = WordGenerator::new(inventory(&["p"], &["t"], &["a"], &[]));
		assert_eq!(generator.count(i64::MAX).unwrap(), 4);
		assert_eq!(generator.count(3).unwrap(), 4);
		assert_eq!(generator.generate(3).unwrap(), vec!["papapa", "apapa", "papapat", "apapat"]);

		let err = generator.generate(i64::MAX).unwrap_err();
		assert!(err.is_resource_limit(), "{err:?}");
		assert!(matches!(generator.generate(1_000_000_000), Err(GenError::TooLarge { .. })));
		assert!(matches!(generator.words(1_000_000_000), Err(GenError::TooLarge { .. })));
	}

	#[test]
	fn byte_limit_is_enforced() {
		let generator = WordGenerator::default().with_byte_limit(1000);
		match generator.generate(1) {
			Err(GenError::TooLarge { bytes, limit }) => {
				assert!(bytes > limit);
				assert_eq!(limit, 1000);
			}
			other => panic!("expected TooLarge, got {other:?}"),
		}
		assert_eq!(generator.words(1).unwrap().len(), 260);
	}

	#[test]
	fn empty_middle_stops_after_one_syllable() {
		let generator = WordGenerator::new(inventory(&[], &["t"], &["a"], &[]));
		assert_eq!(generator.count(1).unwrap(), 2);
		assert_eq!(generator.count(i64::MAX).unwrap(), 0);
		assert!(generator.generate(5).unwrap().is_empty());
	}

	#[test]
	fn empty_vowels_produce_nothing() {
		let generator = WordGenerator::new(inventory(&["p"], &["t"], &[], &["pl"]));
		assert_eq!(generator.count(3).unwrap(), 0);
		assert!(generator.generate(3).unwrap().is_empty());
		assert_eq!(generator.words(3).unwrap().count(), 0);
	}

	#[test]
	fn produce_without_options_is_generate() {
		let generator = WordGenerator::default();
		let input = GenerationInput::new(1);
		assert_eq!(generator.produce(&input).unwrap(), generator.generate(1).unwrap());
	}

	#[test]
	fn produce_truncates_then_conjugates() {
		let generator = WordGenerator::default();
		let input = GenerationInput { number: Some(2), conjugate: true, ..GenerationInput::new(1) };
		assert_eq!(generator.produce(&input).unwrap(), vec!["ta taen taat taur", "ti tien tiat tiur"]);
	}

	#[test]
	fn seeded_shuffle_is_reproducible() {
		let generator = WordGenerator::default();
		let input = GenerationInput { random: true, seed: Some(42), number: Some(20), ..GenerationInput::new(2) };
		let first = generator.produce(&input).unwrap();
		assert_eq!(first.len(), 20);
		assert_eq!(first, generator.produce(&input).unwrap());
	}

	#[test]
	fn shuffle_is_a_permutation() {
		let generator = WordGenerator::default();
		let input = GenerationInput { random: true, ..GenerationInput::new(1) };
		let mut shuffled = generator.produce(&input).unwrap();
		let mut words = generator.generate(1).unwrap();
		shuffled.sort();
		words.sort();
		assert_eq!(shuffled, words);
	}

	#[test]
	fn number_larger_than_the_list_keeps_everything() {
		let generator = WordGenerator::default();
		let input = GenerationInput { number: Some(10_000), ..GenerationInput::new(1) };
		assert_eq!(generator.produce(&input).unwrap().len(), 260);
		let input = GenerationInput { number: Some(0), ..GenerationInput::new(1) };
		assert!(generator.produce(&input).unwrap().is_empty());
	}

	#[test]
	fn lazy_words_match_eager_generation() {
		let generator = WordGenerator::default();
		for syllables in 1..=2 {
			let eager = generator.generate(syllables).unwrap();
			let lazy = generator.words(syllables).unwrap();
			assert_eq!(lazy.len(), eager.len());
			assert_eq!(lazy.collect::<Vec<_>>(), eager);
		}
	}

	#[test]
	fn lazy_words_without_finals() {
		let generator = WordGenerator::new(inventory(&["p"], &[], &["a"], &["pl"]));
		let words: Vec<String> = generator.words(2).unwrap().collect();
		assert_eq!(words, generator.generate(2).unwrap());
	}

	#[test]
	fn lazy_words_skip_ahead() {
		let generator = WordGenerator::default();
		let mut words = generator.words(3).unwrap();
		assert_eq!(words.len(), 1_202_240);
		let last = words.nth(1_202_239).unwrap();
		assert!(last.ends_with('n'));
		assert!(words.next().is_none());
	}
}
