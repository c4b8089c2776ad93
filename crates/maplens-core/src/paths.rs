//! Matching recorded source ids against open filenames
//!
//! Bundlers record sources in their own spelling: `webpack:///src/a.ts`,
//! `./src/a.ts`, `../src/a.ts`. Open files are named however the host names
//! them. A source id is tried in three spellings, in order:
//!
//! 1. as recorded
//! 2. with a configured virtual-root prefix stripped
//! 3. with a leading `./` stripped
//!
//! Exact equality with any spelling wins over everything else. Failing that,
//! the first spelling that is a suffix of a filename (or has the filename as
//! a suffix) wins. Nothing fuzzier is attempted.

/// Resolves source ids to open files and back.
#[derive(Debug, Clone)]
pub struct SourceMatcher {
    prefixes: Vec<String>,
}

impl SourceMatcher {
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured virtual-root prefixes.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Spellings of `source` in the order they are tried, without duplicates.
    pub fn candidates<'a>(&self, source: &'a str) -> Vec<&'a str> {
        let mut out = vec![source];
        for prefix in &self.prefixes {
            if let Some(stripped) = source.strip_prefix(prefix.as_str()) {
                push_unique(&mut out, stripped);
            }
        }
        for i in 0..out.len() {
            let current = out[i];
            if let Some(stripped) = current.strip_prefix("./") {
                push_unique(&mut out, stripped);
            }
        }
        out.retain(|c| !c.is_empty());
        out
    }

    /// Index of the open file `source` refers to.
    pub fn resolve_open_file(&self, source: &str, open_files: &[String]) -> Option<usize> {
        let candidates = self.candidates(source);
        candidates
            .iter()
            .find_map(|c| open_files.iter().position(|f| f.as_str() == *c))
            .or_else(|| {
                candidates
                    .iter()
                    .find_map(|c| open_files.iter().position(|f| affix_match(c, f)))
            })
    }

    /// The recorded source id among `sources` that refers to `filename`.
    pub fn find_source_key<'s>(
        &self,
        filename: &str,
        sources: impl IntoIterator<Item = &'s str>,
    ) -> Option<&'s str> {
        let sources: Vec<&'s str> = sources.into_iter().collect();
        let spelled: Vec<(&'s str, Vec<&'s str>)> =
            sources.iter().map(|&s| (s, self.candidates(s))).collect();

        spelled
            .iter()
            .find(|(_, candidates)| candidates.iter().any(|c| *c == filename))
            .or_else(|| {
                spelled
                    .iter()
                    .find(|(_, candidates)| candidates.iter().any(|c| affix_match(c, filename)))
            })
            .map(|(source, _)| *source)
    }
}

impl Default for SourceMatcher {
    fn default() -> Self {
        Self::new(["webpack:///"])
    }
}

fn push_unique<'a>(out: &mut Vec<&'a str>, candidate: &'a str) {
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}

fn affix_match(candidate: &str, filename: &str) -> bool {
    if candidate.is_empty() || filename.is_empty() {
        return false;
    }
    candidate == filename || candidate.ends_with(filename) || filename.ends_with(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn candidates_in_order() {
        let matcher = SourceMatcher::default();
        assert_eq!(
            matcher.candidates("webpack:///./src/a.ts"),
            vec!["webpack:///./src/a.ts", "./src/a.ts", "src/a.ts"]
        );
        assert_eq!(matcher.candidates("./a.ts"), vec!["./a.ts", "a.ts"]);
        assert_eq!(matcher.candidates("a.ts"), vec!["a.ts"]);
    }

    #[test]
    fn exact_match_beats_suffix() {
        let matcher = SourceMatcher::default();
        let open = files(&["lib/index.ts", "index.ts"]);
        assert_eq!(matcher.resolve_open_file("index.ts", &open), Some(1));
        assert_eq!(matcher.resolve_open_file("webpack:///index.ts", &open), Some(1));
    }

    #[test]
    fn suffix_and_prefix_fallbacks() {
        let matcher = SourceMatcher::default();
        let open = files(&["main.ts", "utils.ts"]);
        assert_eq!(matcher.resolve_open_file("../src/utils.ts", &open), Some(1));
        // Open filename longer than the recorded source
        let open = files(&["project/src/main.ts"]);
        assert_eq!(matcher.resolve_open_file("src/main.ts", &open), Some(0));
    }

    #[test]
    fn unknown_source_does_not_guess() {
        let matcher = SourceMatcher::default();
        let open = files(&["main.ts"]);
        assert_eq!(matcher.resolve_open_file("other.ts", &open), None);
        assert_eq!(matcher.resolve_open_file("", &open), None);
        assert_eq!(matcher.resolve_open_file("main.ts", &[]), None);
    }

    #[test]
    fn find_source_key_prefers_exact() {
        let matcher = SourceMatcher::default();
        let sources = ["webpack:///lib/main.ts", "main.ts"];
        assert_eq!(matcher.find_source_key("main.ts", sources), Some("main.ts"));
        assert_eq!(
            matcher.find_source_key("lib/main.ts", sources),
            Some("webpack:///lib/main.ts")
        );
        assert_eq!(matcher.find_source_key("missing.ts", sources), None);
    }

    #[test]
    fn custom_prefixes() {
        let matcher = SourceMatcher::new(["rollup://", "vite:"]);
        assert_eq!(
            matcher.find_source_key("src/a.ts", ["vite:src/a.ts"]),
            Some("vite:src/a.ts")
        );
        assert_eq!(matcher.prefixes().len(), 2);
    }
}
