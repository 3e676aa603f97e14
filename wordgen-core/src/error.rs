/// Errors raised while loading inventories or generating words.
///
/// The combiner and the conjugator are total functions and never fail;
/// everything here comes from caller input, resource limits or file I/O.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
	/// A word needs at least one syllable.
	#[error("syllable count must be at least 1, got {0}")]
	InvalidSyllables(i64),

	/// The requested generation would exceed the configured word limit.
	#[error("generation would produce {count} words, above the limit of {limit}")]
	TooManyWords { count: usize, limit: usize },

	/// The generated text would exceed the configured byte limit.
	#[error("generation would take up to {bytes} bytes, above the limit of {limit}")]
	TooLarge { bytes: usize, limit: usize },

	/// The number of words does not even fit in memory addressing.
	#[error("word count for {syllables} syllables overflows")]
	CountOverflow { syllables: i64 },

	#[error("invalid inventory: {0}")]
	InvalidInventory(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("inventory cache error: {0}")]
	Serialization(#[from] postcard::Error),
}

impl GenError {
	/// Returns `true` when the error is caused by a resource limit rather
	/// than by invalid input.
	pub fn is_resource_limit(&self) -> bool {
		matches!(
			self,
			GenError::TooManyWords { .. } | GenError::TooLarge { .. } | GenError::CountOverflow { .. }
		)
	}
}
