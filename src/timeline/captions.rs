/// Longest caption line, in characters, before a chunk is closed.
pub const CAPTION_LINE_CHARS: usize = 40;

/// One timed caption line.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Caption {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

/// Time caption lines for `script` over `total_secs`.
///
/// Sentences end at `.`, `!` or `?` and share the duration evenly. A sentence is broken into
/// word chunks, closing a chunk once it grows past [`CAPTION_LINE_CHARS`], and the chunks
/// share the sentence's slot evenly. An empty script yields no captions.
pub fn captions_from_script(script: &str, total_secs: f64) -> Vec<Caption> {
    let sentences = split_sentences(script);
    if sentences.is_empty() {
        return Vec::new();
    }
    let per_sentence = total_secs / sentences.len() as f64;

    let mut captions = Vec::new();
    for (i, sentence) in sentences.iter().enumerate() {
        let chunks = chunk_words(sentence);
        let per_chunk = per_sentence / chunks.len() as f64;
        for (j, text) in chunks.into_iter().enumerate() {
            let start = i as f64 * per_sentence + j as f64 * per_chunk;
            captions.push(Caption {
                text,
                start,
                end: start + per_chunk,
            });
        }
    }
    captions
}

fn split_sentences(script: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut from = 0;
    for (i, c) in script.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = i + c.len_utf8();
            push_trimmed(&mut out, &script[from..end]);
            from = end;
        }
    }
    push_trimmed(&mut out, &script[from..]);
    out
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, s: &'a str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s);
    }
}

fn chunk_words(sentence: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut line = String::new();
    for word in sentence.split_whitespace() {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
        if line.chars().count() > CAPTION_LINE_CHARS {
            chunks.push(std::mem::take(&mut line));
        }
    }
    if !line.is_empty() {
        chunks.push(line);
    }
    chunks
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/captions.rs"]
mod tests;
