use crate::codec::Codec;

/// Split an encoded payload into lines of at most `width` characters.
///
/// Token codecs break only between tokens, so a token never straddles two
/// lines; a single token wider than `width` gets a line of its own. Base64
/// has no separators and is cut every `width` characters.
pub fn wrap(encoded: &str, codec: Codec, width: usize) -> Vec<String> {
    let width = width.max(1);
    if codec.is_tokenized() {
        wrap_tokens(encoded, width)
    } else {
        cut_positional(encoded, width)
    }
}

fn wrap_tokens(encoded: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut cur = String::with_capacity(width);
    for tok in encoded.split_ascii_whitespace() {
        if !cur.is_empty() && cur.len() + 1 + tok.len() > width {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(tok);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

fn cut_positional(encoded: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(encoded.len() / width + 1);
    let mut rest = encoded.trim();
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(width)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(cut);
        lines.push(head.to_string());
        rest = tail;
    }
    lines
}
