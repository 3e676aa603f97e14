use std::sync::mpsc;
use std::thread;

/// Products smaller than this are always combined on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Creates new words by appending every ending to every stem.
///
/// Stems are the outer loop and endings the inner loop, so the order of
/// the result is observable:
/// `fork(["a", "b"], ["c", "d"])` → `["ac", "ad", "bc", "bd"]`.
///
/// An empty side yields an empty result.
pub fn fork<S, E>(stems: &[S], endings: &[E]) -> Vec<String>
where
	S: AsRef<str>,
	E: AsRef<str>,
{
	let mut words = Vec::with_capacity(stems.len() * endings.len());
	for stem in stems {
		let stem = stem.as_ref();
		for ending in endings {
			let ending = ending.as_ref();
			let mut word = String::with_capacity(stem.len() + ending.len());
			word.push_str(stem);
			word.push_str(ending);
			words.push(word);
		}
	}
	words
}

/// Same contract and same output order as [`fork`], computed on worker threads.
///
/// # Behavior
/// - Splits `stems` into chunks (based on CPU cores * factor).
/// - Forks each chunk against all `endings` on a scoped thread.
/// - Reassembles the partial results in chunk order.
///
/// # Notes
/// - Uses an MPSC channel to collect the partial results.
/// - Falls back to [`fork`] for tiny inputs.
pub fn fork_parallel<S, E>(stems: &[S], endings: &[E]) -> Vec<String>
where
	S: AsRef<str> + Sync,
	E: AsRef<str> + Sync,
{
	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	if stems.len() < 2 || endings.is_empty() || chunks < 2 {
		return fork(stems, endings);
	}
	let chunk_size = stems.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for (index, chunk) in stems.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			scope.spawn(move || {
				// The receiver outlives the scope, sending cannot fail
				let _ = tx.send((index, fork(chunk, endings)));
			});
		}
	});
	drop(tx);

	let mut parts: Vec<(usize, Vec<String>)> = rx.iter().collect();
	parts.sort_unstable_by_key(|(index, _)| *index);

	let mut words = Vec::with_capacity(stems.len() * endings.len());
	for (_, part) in parts {
		words.extend(part);
	}
	words
}

/// Dispatches to [`fork_parallel`] when the product is large enough to
/// amortize the thread fan-out.
pub(crate) fn fork_auto(stems: &[String], endings: &[String]) -> Vec<String> {
	if stems.len().saturating_mul(endings.len()) >= PARALLEL_THRESHOLD {
		fork_parallel(stems, endings)
	} else {
		fork(stems, endings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EMPTY: [&str; 0] = [];

	#[test]
	fn stems_are_the_outer_loop() {
		assert_eq!(fork(&["a", "b"], &["c", "d"]), vec!["ac", "ad", "bc", "bd"]);
	}

	#[test]
	fn empty_side_yields_nothing() {
		assert!(fork(&EMPTY, &["c", "d"]).is_empty());
		assert!(fork(&["a", "b"], &EMPTY).is_empty());
		assert!(fork_parallel(&EMPTY, &["c"]).is_empty());
		assert!(fork_parallel(&["a", "b"], &EMPTY).is_empty());
	}

	#[test]
	fn length_is_the_product() {
		let stems = ["t", "r", "s", "sh", "k"];
		let endings = ["a", "i", "u"];
		assert_eq!(fork(&stems, &endings).len(), 15);
	}

	#[test]
	fn duplicates_are_kept() {
		assert_eq!(fork(&["r", "r"], &["a"]), vec!["ra", "ra"]);
	}

	#[test]
	fn parallel_matches_sequential_order() {
		let stems: Vec<String> = (0..1000).map(|i| format!("w{i}-")).collect();
		let endings = ["a", "i", "u", "e"];
		assert_eq!(fork_parallel(&stems, &endings), fork(&stems, &endings));
	}

	#[test]
	fn auto_matches_sequential_above_threshold() {
		let stems: Vec<String> = (0..PARALLEL_THRESHOLD / 4 + 1).map(|i| i.to_string()).collect();
		let endings: Vec<String> = ["a", "i", "u", "e"].iter().map(|s| s.to_string()).collect();
		assert_eq!(fork_auto(&stems, &endings), fork(&stems, &endings));
	}
}
