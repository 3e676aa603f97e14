use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::io::{build_output_path, get_filename, is_newer, read_file};

/// Phoneme inventories driving the word generator.
///
/// Each inventory is an ordered list of literal strings. Order matters
/// (it drives the output order) and duplicates are kept: a consonant
/// listed twice produces every word containing it twice.
///
/// # Invariants
/// - Every entry is non-empty and contains no whitespace
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
	/// Name of the inventory (file stem when loaded from disk).
	name: String,
	/// Syllable onsets.
	consonants: Vec<String>,
	/// Consonants allowed at the very end of a word.
	finals: Vec<String>,
	/// Syllable nuclei, also allowed alone as a first syllable.
	vowels: Vec<String>,
	/// Two-consonant onsets, only allowed after the first syllable.
	clusters: Vec<String>,
}

const KEYS: [&str; 4] = ["consonants", "finals", "vowels", "clusters"];

impl Default for Inventory {
	/// The reference inventory. `r` appears twice among the consonants.
	fn default() -> Self {
		let owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
		Self {
			name: "default".to_owned(),
			consonants: owned(&["t", "r", "s", "sh", "k", "n", "l", "m", "r", "b", "v", "d"]),
			finals: owned(&["t", "s", "k", "n"]),
			vowels: owned(&["a", "i", "u", "e"]),
			clusters: owned(&["tr", "kt", "st", "nt", "nd"]),
		}
	}
}

impl Inventory {
	/// Creates a named inventory from the four phoneme lists.
	///
	/// # Errors
	/// Returns `InvalidInventory` if an entry is empty or contains whitespace.
	pub fn new(
		name: &str,
		consonants: Vec<String>,
		finals: Vec<String>,
		vowels: Vec<String>,
		clusters: Vec<String>,
	) -> Result<Self, GenError> {
		let inventory = Self { name: name.to_owned(), consonants, finals, vowels, clusters };
		inventory.validate()?;
		Ok(inventory)
	}

	/// Loads an inventory from a text file, using a compiled binary cache
	/// when one exists and is newer than the text file.
	///
	/// - The cache sits next to the text file with the `bin` extension.
	/// - Uses `postcard` for compact serialization/deserialization.
	/// - A stale or unreadable cache is rebuilt from the text file.
	/// - Failing to write the cache only logs a warning.
	///
	/// # Errors
	/// Only the text file can fail the load (`Io` or `InvalidInventory`).
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, GenError> {
		let filepath = filepath.as_ref();
		let binary_data_path = build_output_path(filepath, "bin")?;

		if is_newer(&binary_data_path, filepath) {
			match Self::read_cache(&binary_data_path) {
				Some(inventory) => {
					debug!("inventory loaded from cache {}", binary_data_path.display());
					return Ok(inventory);
				}
				None => warn!("ignoring unreadable inventory cache {}", binary_data_path.display()),
			}
		}

		let lines = read_file(filepath)?;
		let inventory = Self::parse(&get_filename(filepath)?, &lines)?;

		let bytes = postcard::to_stdvec(&inventory)?;
		if let Err(e) = std::fs::write(&binary_data_path, bytes) {
			warn!("cannot write inventory cache {}: {}", binary_data_path.display(), e);
		}
		info!(
			"inventory '{}' compiled from {} ({} consonants, {} finals, {} vowels, {} clusters)",
			inventory.name,
			filepath.display(),
			inventory.consonants.len(),
			inventory.finals.len(),
			inventory.vowels.len(),
			inventory.clusters.len()
		);

		Ok(inventory)
	}

	/// Reads a compiled inventory, `None` if the cache is missing, unreadable or corrupt.
	fn read_cache(path: &Path) -> Option<Self> {
		let bytes = std::fs::read(path).ok()?;
		let inventory: Inventory = postcard::from_bytes(&bytes).ok()?;
		inventory.validate().ok()?;
		Some(inventory)
	}

	/// Parses the text format of an inventory.
	///
	/// ```text
	/// # comment
	/// consonants = t r s sh k n l m r b v d
	/// finals     = t s k n
	/// vowels     = a i u e
	/// clusters   = tr kt st nt nd
	/// ```
	///
	/// # Errors
	/// Returns `InvalidInventory` on unknown, missing or repeated keys and on
	/// lines without `=`.
	pub fn parse<S: AsRef<str>>(name: &str, lines: &[S]) -> Result<Self, GenError> {
		let mut sections: HashMap<&str, Vec<String>> = HashMap::new();

		for (number, line) in lines.iter().enumerate() {
			let line = line.as_ref();
			let line = match line.find('#') {
				Some(index) => &line[..index],
				None => line,
			}
			.trim();
			if line.is_empty() {
				continue;
			}

			let (key, values) = line.split_once('=').ok_or_else(|| {
				GenError::InvalidInventory(format!("line {}: expected 'key = values'", number + 1))
			})?;
			let key = key.trim();
			let key: &str = KEYS.iter().find(|k| **k == key).copied().ok_or_else(|| {
				GenError::InvalidInventory(format!("line {}: unknown key '{}'", number + 1, key))
			})?;

			let values = values.split_whitespace().map(str::to_owned).collect();
			if sections.insert(key, values).is_some() {
				return Err(GenError::InvalidInventory(format!(
					"line {}: key '{}' given twice",
					number + 1,
					key
				)));
			}
		}

		let mut take = |key: &str| {
			sections
				.remove(key)
				.ok_or_else(|| GenError::InvalidInventory(format!("missing key '{key}'")))
		};
		let consonants = take("consonants")?;
		let finals = take("finals")?;
		let vowels = take("vowels")?;
		let clusters = take("clusters")?;

		Self::new(name, consonants, finals, vowels, clusters)
	}

	/// Renders the inventory in the text format accepted by [`Inventory::parse`].
	pub fn to_text(&self) -> String {
		let mut text = String::new();
		for (key, values) in KEYS.iter().zip(self.sections()) {
			text.push_str(key);
			text.push_str(" = ");
			text.push_str(&values.join(" "));
			text.push('\n');
		}
		text
	}

	fn sections(&self) -> [&[String]; 4] {
		[&self.consonants, &self.finals, &self.vowels, &self.clusters]
	}

	fn validate(&self) -> Result<(), GenError> {
		for (key, values) in KEYS.iter().zip(self.sections()) {
			if let Some(bad) = values.iter().find(|v| v.is_empty() || v.chars().any(char::is_whitespace)) {
				return Err(GenError::InvalidInventory(format!(
					"{key}: entry {bad:?} must be non-empty and contain no whitespace"
				)));
			}
		}
		Ok(())
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn consonants(&self) -> &[String] {
		&self.consonants
	}

	pub fn finals(&self) -> &[String] {
		&self.finals
	}

	pub fn vowels(&self) -> &[String] {
		&self.vowels
	}

	pub fn clusters(&self) -> &[String] {
		&self.clusters
	}
}
