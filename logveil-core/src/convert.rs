use rand::Rng;

use crate::codec::encode;
use crate::error::Result;
use crate::layout::chunk::{Chunk, chunk_lines};
use crate::layout::stamp::{EncodedLine, stamp_lines};
use crate::layout::wrap::wrap;
use crate::options::EncodeOptions;

/// A file the host should write: suggested name plus full text content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub content: String,
}

/// Encode, wrap and timestamp `data` without chunking.
pub fn encode_lines<R: Rng + ?Sized>(
    data: &[u8],
    opts: &EncodeOptions,
    rng: &mut R,
) -> Result<Vec<EncodedLine>> {
    opts.validate()?;
    let encoded = encode(opts.codec, data);
    let wrapped = wrap(&encoded, opts.codec, opts.max_line_width);
    Ok(stamp_lines(wrapped, opts.window_start, opts.window_end, rng)?)
}

pub fn convert_chunks<R: Rng + ?Sized>(
    data: &[u8],
    opts: &EncodeOptions,
    rng: &mut R,
) -> Result<Vec<Chunk>> {
    let lines = encode_lines(data, opts, rng)?;
    let line_count = lines.len();
    let chunks = chunk_lines(lines, opts.chunk_threshold());
    tracing::info!(
        codec = %opts.codec,
        input_bytes = data.len(),
        lines = line_count,
        chunks = chunks.len(),
        "conversion complete"
    );
    Ok(chunks)
}

pub fn convert_with_rng<R: Rng + ?Sized>(
    data: &[u8],
    opts: &EncodeOptions,
    rng: &mut R,
) -> Result<Vec<OutputFile>> {
    let chunks = convert_chunks(data, opts, rng)?;
    Ok(chunks
        .iter()
        .map(|c| OutputFile {
            name: c.file_name(&opts.output_base_name),
            content: c.render(),
        })
        .collect())
}

/// Turn `data` into timestamped chunk files using the thread RNG.
pub fn convert(data: &[u8], opts: &EncodeOptions) -> Result<Vec<OutputFile>> {
    convert_with_rng(data, opts, &mut rand::thread_rng())
}
