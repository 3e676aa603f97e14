pub const USAGE: &str = "\
usage: wordgen [-h] [-n NUMBER] [-r] [-s SEED] [-c] [-i INVENTORY] [-l LIMIT] [--count] syllables

Generate possible words based on some internal rules.

positional arguments:
  syllables                   The number of syllables the words should contain.

options:
  -h, --help                  Show this help message and exit.
  -n, --number NUMBER         The number of generated words to output. If not specified, output all words.
  -r, --random                Randomize the order of the words.
  -s, --seed SEED             Seed of the random order, for reproducible output.
  -c, --conjugate             Generate conjugated forms for each word.
  -i, --inventory INVENTORY   Load the phoneme inventory from a file.
  -l, --limit LIMIT           Maximum number of words to generate (0 removes the limit).
      --count                 Only print how many words would be generated.";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
	pub syllables: i64,
	pub number: Option<usize>,
	pub random: bool,
	pub seed: Option<u64>,
	pub conjugate: bool,
	pub inventory: Option<String>,
	pub limit: Option<usize>,
	pub count: bool,
	pub help: bool,
}

/// Command line errors, reported with the usage text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
	#[error("the following arguments are required: syllables")]
	MissingSyllables,
	#[error("unrecognized argument: {0}")]
	UnexpectedArgument(String),
	#[error("unknown option: {0}")]
	UnknownOption(String),
	#[error("{0} requires a value")]
	MissingValue(String),
	#[error("{option}: invalid value '{value}'")]
	InvalidValue { option: String, value: String },
}

fn parse_value<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, ArgsError> {
	value.parse().map_err(|_| ArgsError::InvalidValue { option: option.to_owned(), value: value.to_owned() })
}

/// Parses the arguments following the program name.
///
/// Accepts `--option value`, `--option=value` and `-o value`.
/// `--help` short-circuits every other check.
pub fn parse(args: &[String]) -> Result<Args, ArgsError> {
	if args.iter().any(|a| a == "--help" || a == "-h") {
		return Ok(Args { help: true, ..Args::default() });
	}

	let mut parsed = Args::default();
	let mut syllables = None;
	let mut iter = args.iter();

	while let Some(arg) = iter.next() {
		let (option, inline) = match arg.split_once('=') {
			Some((option, value)) if option.starts_with("--") => (option, Some(value)),
			_ => (arg.as_str(), None),
		};

		let mut value = || {
			match inline {
				Some(value) => Ok(value),
				None => iter.next().map(String::as_str).ok_or_else(|| ArgsError::MissingValue(option.to_owned())),
			}
		};

		match option {
			"-r" | "--random" | "-c" | "--conjugate" | "--count" if inline.is_some() => {
				return Err(ArgsError::UnexpectedArgument(arg.clone()));
			}
			"-r" | "--random" => parsed.random = true,
			"-c" | "--conjugate" => parsed.conjugate = true,
			"--count" => parsed.count = true,
			"-n" | "--number" => parsed.number = Some(parse_value(option, value()?)?),
			"-s" | "--seed" => parsed.seed = Some(parse_value(option, value()?)?),
			"-i" | "--inventory" => parsed.inventory = Some(value()?.to_owned()),
			"-l" | "--limit" => parsed.limit = Some(parse_value(option, value()?)?),
			_ if option.starts_with('-') && option.parse::<i64>().is_err() => {
				return Err(ArgsError::UnknownOption(arg.clone()));
			}
			_ if syllables.is_none() => syllables = Some(parse_value::<i64>("syllables", arg)?),
			_ => return Err(ArgsError::UnexpectedArgument(arg.clone())),
		}
	}

	parsed.syllables = syllables.ok_or(ArgsError::MissingSyllables)?;
	Ok(parsed)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args(line: &str) -> Vec<String> {
		line.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn positional_and_flags() {
		let parsed = parse(&args("2 -n 10 -r -c")).unwrap();
		assert_eq!(parsed.syllables, 2);
		assert_eq!(parsed.number, Some(10));
		assert!(parsed.random);
		assert!(parsed.conjugate);
		assert!(!parsed.count);
	}

	#[test]
	fn long_options_with_equals() {
		let parsed = parse(&args("--number=5 --seed=7 --inventory=data/x.inv --limit=0 3")).unwrap();
		assert_eq!(parsed.syllables, 3);
		assert_eq!(parsed.number, Some(5));
		assert_eq!(parsed.seed, Some(7));
		assert_eq!(parsed.inventory.as_deref(), Some("data/x.inv"));
		assert_eq!(parsed.limit, Some(0));
	}

	#[test]
	fn negative_syllables_reach_the_generator() {
		assert_eq!(parse(&args("-1")).unwrap().syllables, -1);
	}

	#[test]
	fn malformed_arguments() {
		assert_eq!(parse(&args("-r")), Err(ArgsError::MissingSyllables));
		assert!(matches!(parse(&args("two")), Err(ArgsError::InvalidValue { .. })));
		assert!(matches!(parse(&args("1 -n -3")), Err(ArgsError::InvalidValue { .. })));
		assert_eq!(parse(&args("1 -x")), Err(ArgsError::UnknownOption("-x".to_owned())));
		assert_eq!(parse(&args("1 -n")), Err(ArgsError::MissingValue("-n".to_owned())));
		assert_eq!(parse(&args("1 2")), Err(ArgsError::UnexpectedArgument("2".to_owned())));
	}

	#[test]
	fn flags_take_no_value() {
		assert_eq!(
			parse(&args("1 --random=false")),
			Err(ArgsError::UnexpectedArgument("--random=false".to_owned()))
		);
		assert_eq!(parse(&args("--count=5 1")), Err(ArgsError::UnexpectedArgument("--count=5".to_owned())));
		assert!(matches!(parse(&args("1 --conjugate=")), Err(ArgsError::UnexpectedArgument(_))));
	}

	#[test]
	fn help_wins() {
		assert!(parse(&args("nonsense --help")).unwrap().help);
	}
}
