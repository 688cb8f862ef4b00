use std::fs;
use std::path::{Path, PathBuf};

use logveil_core::error::{LogveilError, Result};
use logveil_core::options::parse_window_time;
use logveil_core::restore::payload;
use logveil_core::{Codec, EncodeOptions, convert_with_rng, detect, restore, restore_as};
use rand::SeedableRng;
use rand::rngs::StdRng;
use walkdir::WalkDir;

/// Input types the conversion is meant for; anything else still converts.
const CONVERT_EXTENSIONS: [&str; 2] = ["zip", "txt"];

pub struct ConvertArgs {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub codec: Option<String>,
    pub line_width: Option<usize>,
    pub max_kb: Option<usize>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub name: Option<String>,
    pub options: Option<PathBuf>,
    pub seed: Option<u64>,
}

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn load_options(path: Option<&Path>) -> Result<EncodeOptions> {
    let Some(path) = path else {
        return Ok(EncodeOptions::default());
    };
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| LogveilError::Format(format!("options file {}: {e}", path.display())))
}

fn window_arg(s: &str) -> Result<time::PrimitiveDateTime> {
    parse_window_time(s).map_err(|e| LogveilError::Format(format!("invalid time {s:?}: {e}")))
}

fn build_options(args: &ConvertArgs) -> Result<EncodeOptions> {
    let mut opts = load_options(args.options.as_deref())?;
    if let Some(c) = &args.codec {
        opts.codec = c.parse::<Codec>()?;
    }
    if let Some(w) = args.line_width {
        opts.max_line_width = w;
    }
    if let Some(kb) = args.max_kb {
        opts.max_chunk_kb = kb;
    }
    if let Some(s) = &args.start {
        opts.window_start = window_arg(s)?;
    }
    if let Some(e) = &args.end {
        opts.window_end = window_arg(e)?;
    }
    if let Some(n) = &args.name {
        opts.output_base_name = n.clone();
    }
    opts.validate()?;
    Ok(opts)
}

pub fn handle_convert(args: ConvertArgs) -> Result<()> {
    let opts = build_options(&args)?;
    if !has_extension(&args.input, &CONVERT_EXTENSIONS) {
        tracing::warn!(input = %args.input.display(), "input is neither .zip nor .txt");
    }

    let data = fs::read(&args.input)?;
    tracing::info!(input = %args.input.display(), bytes = data.len(), "read input");

    let files = match args.seed {
        Some(seed) => convert_with_rng(&data, &opts, &mut StdRng::seed_from_u64(seed))?,
        None => convert_with_rng(&data, &opts, &mut rand::thread_rng())?,
    };

    fs::create_dir_all(&args.out_dir)?;
    for f in &files {
        let path = args.out_dir.join(&f.name);
        fs::write(&path, &f.content)?;
        tracing::info!(path = %path.display(), "saved chunk");
    }
    eprintln!("convert: OK ({} file(s), {})", files.len(), opts.codec);
    Ok(())
}

/// Parse `N` out of `{name}_{N}.txt`.
fn chunk_index(file_name: &str, name: &str) -> Option<usize> {
    file_name
        .strip_prefix(name)?
        .strip_prefix('_')?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}

/// Chunk files for `name` directly inside `dir`, ordered by chunk index.
pub fn collect_chunk_files(dir: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for e in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let e = e.map_err(std::io::Error::other)?;
        if !e.file_type().is_file() {
            continue;
        }
        let Some(file_name) = e.file_name().to_str() else {
            continue;
        };
        if let Some(idx) = chunk_index(file_name, name) {
            found.push((idx, e.into_path()));
        }
    }
    found.sort_by_key(|(idx, _)| *idx);
    Ok(found.into_iter().map(|(_, p)| p).collect())
}

fn gather_inputs(files: Vec<PathBuf>, dir: Option<&Path>, name: &str) -> Result<Vec<PathBuf>> {
    let mut inputs = match dir {
        Some(d) => collect_chunk_files(d, name)?,
        None => Vec::new(),
    };
    inputs.extend(files);
    if inputs.is_empty() {
        return Err(LogveilError::Format("no input files selected".into()));
    }
    if let Some(bad) = inputs.iter().find(|p| !has_extension(p, &["txt"])) {
        return Err(LogveilError::Format(format!(
            "{} is not a .txt chunk file",
            bad.display()
        )));
    }
    Ok(inputs)
}

fn read_blobs(inputs: &[PathBuf]) -> Result<Vec<String>> {
    inputs
        .iter()
        .map(|p| {
            let text = fs::read_to_string(p)?;
            tracing::debug!(path = %p.display(), bytes = text.len(), "read chunk");
            Ok(text)
        })
        .collect()
}

pub fn handle_restore(
    files: Vec<PathBuf>,
    dir: Option<PathBuf>,
    name: String,
    out: Option<PathBuf>,
    codec: Option<String>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(logveil_core::ConfigError::EmptyBaseName.into());
    }
    let codec = codec.map(|c| c.parse::<Codec>()).transpose()?;
    let inputs = gather_inputs(files, dir.as_deref(), &name)?;
    let blobs = read_blobs(&inputs)?;

    let bytes = match codec {
        Some(c) => restore_as(&blobs, c)?,
        None => restore(&blobs)?,
    };

    let out = out.unwrap_or_else(|| PathBuf::from(format!("{name}.zip")));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out, &bytes)?;
    eprintln!("restore: OK ({} bytes -> {})", bytes.len(), out.display());
    Ok(())
}

pub fn handle_detect(files: Vec<PathBuf>) -> Result<()> {
    if files.is_empty() {
        return Err(LogveilError::Format("no input files selected".into()));
    }
    let blobs = read_blobs(&files)?;
    let joined = payload(&blobs);
    let codec = detect(&joined);
    println!("Codec: {codec}");
    println!("Tokens: {}", joined.split_ascii_whitespace().count());
    Ok(())
}
