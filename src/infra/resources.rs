//! Lexicon and stopword resources.
//!
//! Lexicon lines are `word<TAB>score` (AFINN layout) or `word,score`. Blank
//! lines and `#` comments are skipped, as is a leading `word,score` /
//! `word,value` header. Stopword files hold one word per line.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use tracing::{debug, instrument};

use crate::core::lexicon::RawLexicon;
use crate::core::tokenize::StopWords;
use crate::infra::io::read_file_smart;

#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum ResourceError {
    #[error("cannot read {kind} file {path}")]
    #[diagnostic(code(revsent::resource::io))]
    Io {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{1} file {0} is not valid UTF-8")]
    #[diagnostic(code(revsent::resource::encoding))]
    Encoding(PathBuf, &'static str),

    #[error("malformed lexicon line {line} in {path}: {reason}")]
    #[diagnostic(
        code(revsent::resource::lexicon_line),
        help("expected `word<TAB>score` or `word,score`")
    )]
    LexiconLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("no lexicon configured")]
    #[diagnostic(
        code(revsent::resource::no_lexicon),
        help("pass --lexicon PATH or set resources.lexicon in revsent.toml")
    )]
    NoLexicon,
}

fn read_text(path: &Path, kind: &'static str) -> Result<String, ResourceError> {
    let content = read_file_smart(path).map_err(|source| ResourceError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    content
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ResourceError::Encoding(path.to_path_buf(), kind))
}

fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_lexicon(path: &Path) -> Result<RawLexicon, ResourceError> {
    let text = read_text(path, "lexicon")?;
    let lexicon = parse_lexicon(&text, path)?;
    debug!(entries = lexicon.len(), "loaded lexicon");
    Ok(lexicon)
}

/// Parse lexicon text. A repeated word keeps its last score.
pub fn parse_lexicon(text: &str, origin: &Path) -> Result<RawLexicon, ResourceError> {
    let mut out = RawLexicon::new();

    for (idx, (line_no, line)) in content_lines(text).enumerate() {
        let split = line.rsplit_once('\t').or_else(|| line.rsplit_once(','));
        let Some((word, score)) = split else {
            return Err(ResourceError::LexiconLine {
                path: origin.to_path_buf(),
                line: line_no,
                reason: "no tab or comma separator".to_string(),
            });
        };
        let (word, score) = (word.trim(), score.trim());

        if idx == 0 && word.eq_ignore_ascii_case("word") {
            continue;
        }
        if word.is_empty() {
            return Err(ResourceError::LexiconLine {
                path: origin.to_path_buf(),
                line: line_no,
                reason: "empty word".to_string(),
            });
        }

        let score: f64 = score.parse().map_err(|_| ResourceError::LexiconLine {
            path: origin.to_path_buf(),
            line: line_no,
            reason: format!("score `{score}` is not a number"),
        })?;

        out.insert(word.to_lowercase(), score);
    }

    Ok(out)
}

/// Stopwords from `path`, or the built-in English list when `None`.
#[instrument(skip_all)]
pub fn load_stopwords(path: Option<&Path>) -> Result<StopWords, ResourceError> {
    let Some(path) = path else {
        return Ok(StopWords::english());
    };
    let text = read_text(path, "stopword")?;
    let words = StopWords::from_words(content_lines(&text).map(|(_, l)| l));
    debug!(path = %path.display(), words = ?words.listed_len(), "loaded stopwords");
    Ok(words)
}
