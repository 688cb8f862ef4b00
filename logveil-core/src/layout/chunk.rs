use super::stamp::EncodedLine;

/// One output file's worth of timestamped lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// 1-based position in emission order.
    pub index: usize,
    pub lines: Vec<EncodedLine>,
    /// UTF-8 size of the rendered content, newlines included.
    pub size_bytes: usize,
}

impl Chunk {
    fn new(index: usize) -> Self {
        Self {
            index,
            lines: Vec::new(),
            size_bytes: 0,
        }
    }

    /// Bytes counted against the threshold: every line without its `\n`.
    pub fn counted_bytes(&self) -> usize {
        self.size_bytes - self.lines.len()
    }

    pub fn file_name(&self, base: &str) -> String {
        chunk_file_name(base, self.index)
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size_bytes);
        for line in &self.lines {
            line.write_to(&mut out);
        }
        out
    }
}

pub fn chunk_file_name(base: &str, index: usize) -> String {
    format!("{base}_{index}.txt")
}

/// Packs lines into chunks, closing a chunk as soon as its counted size
/// reaches the threshold. Newlines are not counted. The line that crosses the
/// threshold stays in the chunk it crossed; the next line opens a new one.
pub struct Chunker {
    threshold: usize,
    current: Chunk,
    done: Vec<Chunk>,
}

impl Chunker {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
            current: Chunk::new(1),
            done: Vec::new(),
        }
    }

    pub fn push(&mut self, line: EncodedLine) {
        self.current.size_bytes += line.rendered_len();
        self.current.lines.push(line);
        if self.current.counted_bytes() >= self.threshold {
            let next = Chunk::new(self.current.index + 1);
            let full = std::mem::replace(&mut self.current, next);
            tracing::debug!(
                index = full.index,
                lines = full.lines.len(),
                bytes = full.size_bytes,
                counted = full.counted_bytes(),
                "chunk closed"
            );
            self.done.push(full);
        }
    }

    pub fn finish(mut self) -> Vec<Chunk> {
        if !self.current.lines.is_empty() {
            self.done.push(self.current);
        }
        self.done
    }
}

/// Convenience wrapper over [`Chunker`].
pub fn chunk_lines<I>(lines: I, threshold: usize) -> Vec<Chunk>
where
    I: IntoIterator<Item = EncodedLine>,
{
    let mut chunker = Chunker::new(threshold);
    for line in lines {
        chunker.push(line);
    }
    chunker.finish()
}
