//! The `generate` command.
//!
//! `run_generate` validates a `GenerateRequest`, builds one
//! `NanoIdGenerator` for the whole invocation, opens the output once and
//! then writes `count` identifiers, one per line. The first failure stops
//! the loop and is returned to the dispatcher.
//!
//! `generate_many` is an in-memory variant used by tests and benchmarks.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::generator::{
    DEFAULT_ALPHABET, DEFAULT_LENGTH, GeneratorOptions, MAX_LENGTH, NanoIdGenerator,
};
use crate::output::Sink;

/// Raw flag values for one `generate` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub length: i64,
    pub alphabet: Option<String>,
    pub count: i64,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH as i64,
            alphabet: None,
            count: 1,
            output: None,
            verbose: false,
        }
    }
}

/// A request whose numeric fields have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub length: usize,
    pub alphabet: Option<String>,
    pub count: usize,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl GenerateRequest {
    /// Reject non-positive length or count, and lengths above `MAX_LENGTH`.
    pub fn validate(&self) -> Result<ValidRequest> {
        let length = positive(self.length, "id length")?;
        if length > MAX_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "id length must be at most {}, got {}",
                MAX_LENGTH, length
            )));
        }
        let count = positive(self.count, "count")?;
        Ok(ValidRequest {
            length,
            alphabet: self.alphabet.clone(),
            count,
            output: self.output.clone(),
            verbose: self.verbose,
        })
    }
}

fn positive(value: i64, what: &str) -> Result<usize> {
    if value <= 0 {
        return Err(Error::InvalidArgument(format!(
            "{} must be positive, got {}",
            what, value
        )));
    }
    usize::try_from(value)
        .map_err(|_| Error::InvalidArgument(format!("{} is too large: {}", what, value)))
}

impl ValidRequest {
    /// Generator options for this request. An alphabet equal to the default
    /// one is treated as no override.
    pub fn generator_options(&self) -> GeneratorOptions {
        let options = GeneratorOptions::default().with_length_hint(self.length);
        match self.alphabet.as_deref() {
            Some(a) if a != DEFAULT_ALPHABET => options.with_alphabet(a),
            _ => options,
        }
    }
}

/// Generate `count` identifiers of `length` characters into a vector.
pub fn generate_many(
    generator: &NanoIdGenerator,
    length: usize,
    count: usize,
) -> Result<Vec<String>> {
    (0..count).map(|_| generator.generate(length)).collect()
}

/// Write `request.count` identifiers to `out`, one per line.
///
/// When `request.verbose` is set and `progress` is given, one progress line
/// per identifier goes to `progress`. Returns the number of identifiers
/// written.
pub fn write_ids<W: Write, P: Write>(
    generator: &NanoIdGenerator,
    request: &ValidRequest,
    out: &mut W,
    mut progress: Option<&mut P>,
) -> Result<usize> {
    for i in 1..=request.count {
        let id = generator.generate(request.length)?;
        writeln!(out, "{}", id).map_err(|e| Error::io("writing identifier", e))?;

        if request.verbose
            && let Some(p) = progress.as_deref_mut()
        {
            writeln!(p, "Generated ID {}/{}: {}", i, request.count, id)
                .map_err(|e| Error::io("writing progress", e))?;
        }
    }
    Ok(request.count)
}

/// Run the `generate` command end to end, writing progress to stdout.
pub fn run_generate(request: &GenerateRequest) -> Result<()> {
    let request = request.validate()?;
    let generator = NanoIdGenerator::new(request.generator_options())?;
    let mut sink = Sink::open(request.output.as_deref())?;

    let mut progress = io::stdout();
    let written = write_ids(&generator, &request, &mut sink, Some(&mut progress))?;

    sink.flush()
        .map_err(|e| Error::io("flushing output", e))?;
    tracing::debug!(written, "generation finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(length: usize, count: usize, verbose: bool) -> ValidRequest {
        GenerateRequest {
            length: length as i64,
            count: count as i64,
            verbose,
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = GenerateRequest::default().validate().unwrap();
        assert_eq!(req.length, 21);
        assert_eq!(req.count, 1);
        assert!(req.output.is_none());
        assert!(!req.verbose);
    }

    #[test]
    fn test_non_positive_values_rejected() {
        for (length, count) in [(0, 1), (-3, 1), (21, 0), (21, -1)] {
            let req = GenerateRequest {
                length,
                count,
                ..Default::default()
            };
            assert!(
                matches!(req.validate(), Err(Error::InvalidArgument(_))),
                "length={} count={}",
                length,
                count
            );
        }
    }

    #[test]
    fn test_length_upper_bound() {
        let at_limit = GenerateRequest {
            length: MAX_LENGTH as i64,
            ..Default::default()
        };
        assert_eq!(at_limit.validate().unwrap().length, MAX_LENGTH);

        for length in [MAX_LENGTH as i64 + 1, i64::MAX] {
            let req = GenerateRequest {
                length,
                ..Default::default()
            };
            assert!(
                matches!(req.validate(), Err(Error::InvalidArgument(_))),
                "length={}",
                length
            );
        }
    }

    #[test]
    fn test_validation_is_repeatable() {
        let req = GenerateRequest {
            count: 0,
            ..Default::default()
        };
        let first = req.validate().unwrap_err().to_string();
        let second = req.validate().unwrap_err().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_alphabet_is_not_an_override() {
        let mut req = valid(10, 1, false);
        req.alphabet = Some(DEFAULT_ALPHABET.to_string());
        assert_eq!(req.generator_options().alphabet, None);

        req.alphabet = Some("01".to_string());
        assert_eq!(req.generator_options().alphabet, Some(vec!['0', '1']));
        assert_eq!(req.generator_options().length_hint, 10);
    }

    #[test]
    fn test_generate_many() {
        let generator = NanoIdGenerator::new(GeneratorOptions::default()).unwrap();
        let ids = generate_many(&generator, 12, 5).unwrap();
        assert_eq!(ids.len(), 5);
        assert!(ids.iter().all(|id| id.len() == 12));
    }

    #[test]
    fn test_write_ids_lines() {
        let req = valid(7, 4, false);
        let generator = NanoIdGenerator::new(req.generator_options()).unwrap();
        let mut out = Vec::new();
        let n = write_ids(&generator, &req, &mut out, None::<&mut Vec<u8>>).unwrap();
        assert_eq!(n, 4);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(text.ends_with('\n'));
        for line in lines {
            assert_eq!(line.len(), 7);
            assert!(line.chars().all(|c| DEFAULT_ALPHABET.contains(c)));
        }
    }

    #[test]
    fn test_verbose_progress_does_not_touch_output() {
        let req = valid(5, 3, true);
        let generator = NanoIdGenerator::new(req.generator_options()).unwrap();
        let mut out = Vec::new();
        let mut progress = Vec::new();
        write_ids(&generator, &req, &mut out, Some(&mut progress)).unwrap();

        let out = String::from_utf8(out).unwrap();
        let progress = String::from_utf8(progress).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert_eq!(progress.lines().count(), 3);
        for (i, (id, line)) in out.lines().zip(progress.lines()).enumerate() {
            assert_eq!(line, format!("Generated ID {}/3: {}", i + 1, id));
        }
    }

    #[test]
    fn test_quiet_ignores_progress_stream() {
        let req = valid(5, 2, false);
        let generator = NanoIdGenerator::new(req.generator_options()).unwrap();
        let mut out = Vec::new();
        let mut progress = Vec::new();
        write_ids(&generator, &req, &mut out, Some(&mut progress)).unwrap();
        assert!(progress.is_empty());
    }

    struct FailAfter(usize);

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.0 == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.0 -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_aborts() {
        let req = valid(5, 10, true);
        let generator = NanoIdGenerator::new(req.generator_options()).unwrap();
        let mut progress = Vec::new();
        let err = write_ids(&generator, &req, &mut FailAfter(2), Some(&mut progress)).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(String::from_utf8(progress).unwrap().lines().count() < 10);
    }

    #[test]
    fn test_invalid_request_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        let req = GenerateRequest {
            length: 0,
            output: Some(path.clone()),
            ..Default::default()
        };
        assert!(matches!(run_generate(&req), Err(Error::InvalidArgument(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_bad_alphabet_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        let req = GenerateRequest {
            alphabet: Some("aa".into()),
            output: Some(path.clone()),
            ..Default::default()
        };
        assert!(matches!(run_generate(&req), Err(Error::Config(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_run_generate_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        let req = GenerateRequest {
            length: 16,
            alphabet: Some("0123456789abcdef".into()),
            count: 25,
            output: Some(path.clone()),
            verbose: false,
        };
        run_generate(&req).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 25);
        assert!(
            text.lines()
                .all(|l| l.len() == 16 && l.chars().all(|c| c.is_ascii_hexdigit()))
        );
    }
}
