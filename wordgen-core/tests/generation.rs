use std::collections::HashMap;

use wordgen_core::model::combiner::fork;
use wordgen_core::{GenError, GenerationInput, Inventory, WordGenerator, conjugate};

fn multiplicities(words: &[String]) -> HashMap<&str, usize> {
	let mut counts = HashMap::new();
	for word in words {
		*counts.entry(word.as_str()).or_insert(0) += 1;
	}
	counts
}

#[test]
fn fork_example() {
	assert_eq!(fork(&["a", "b"], &["c", "d"]), vec!["ac", "ad", "bc", "bd"]);
}

#[test]
fn one_syllable_words() {
	let words = WordGenerator::default().generate(1).unwrap();
	assert_eq!(words.len(), 260);
	assert!(words.iter().any(|w| w == "a"));
	assert!(words.iter().any(|w| w == "at"));
	assert!(!words.iter().any(|w| w == "tra"));
	// `r` is listed twice among the consonants
	assert_eq!(words.iter().filter(|w| *w == "ra").count(), 2);
	assert_eq!(words.iter().filter(|w| *w == "ta").count(), 1);
}

#[test]
fn words_end_well_and_never_start_with_a_cluster() {
	let generator = WordGenerator::default();
	let inventory = generator.inventory();
	for syllables in 1..=2 {
		for word in generator.generate(syllables).unwrap() {
			assert!(
				inventory.vowels().iter().any(|v| word.ends_with(v.as_str()))
					|| inventory.finals().iter().any(|f| word.ends_with(f.as_str())),
				"{word} has a bad ending"
			);
			assert!(
				!inventory.clusters().iter().any(|c| word.starts_with(c.as_str())),
				"{word} starts with a cluster"
			);
		}
	}
}

#[test]
fn clusters_only_appear_after_the_first_syllable() {
	let words = WordGenerator::default().generate(2).unwrap();
	assert!(words.iter().any(|w| w == "tatra"));
	assert!(words.iter().any(|w| w == "andet"));
	assert!(!words.iter().any(|w| w == "trata"));
}

#[test]
fn count_matches_generation() {
	let generator = WordGenerator::default();
	for syllables in 1..=2 {
		assert_eq!(generator.count(syllables).unwrap(), generator.generate(syllables).unwrap().len());
	}
}

#[test]
fn random_sample_respects_multiplicity() {
	let generator = WordGenerator::default();
	let all = generator.generate(1).unwrap();
	let full = multiplicities(&all);

	let input = GenerationInput { random: true, number: Some(100), ..GenerationInput::new(1) };
	let sample = generator.produce(&input).unwrap();
	assert_eq!(sample.len(), 100);
	for (word, count) in multiplicities(&sample) {
		assert!(count <= full[word], "{word} drawn {count} times");
	}
}

#[test]
fn conjugate_example() {
	assert_eq!(conjugate("ta"), ["ta", "taen", "taat", "taur"]);
}

#[test]
fn degenerate_syllable_counts_are_rejected() {
	let generator = WordGenerator::default();
	assert!(matches!(generator.produce(&GenerationInput::new(0)), Err(GenError::InvalidSyllables(0))));
}

#[test]
fn alternate_inventory_drives_generation() {
	let lines = ["consonants = k", "finals = ", "vowels = o", "clusters = kl"];
	let generator = WordGenerator::new(Inventory::parse("tiny", &lines).unwrap());
	assert_eq!(generator.generate(2).unwrap(), vec!["koko", "koklo", "oko", "oklo"]);
	assert_eq!(generator.words(3).unwrap().count(), 8);
}
