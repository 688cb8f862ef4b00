use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const ABOUT: &str = "\
Converts a (compressed) file into timestamped text so it can be sent as plain
text, for example by e-mail, and converts the text back into the file.
Hexadecimal mode is recommended.

Example sizes for one archive:
  1. Original logs:        174 MB
  2. Compressed archive:   9.24 MB
  3. Converted text per mode:
       Binary        104 MB
       Decimal       41.0 MB
       Hexadecimal   34.7 MB
       Base64        15.5 MB
  4. Restored archive: 9.24 MB (174 MB after decompression)";

#[derive(Parser)]
#[command(author, version, about = "logveil: bytes to timestamped log text and back", long_about = ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode one file into timestamped chunk files
    Convert {
        /// file to encode (normally a .zip or .txt)
        input: PathBuf,

        /// directory the chunk files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// binary, decimal, hexadecimal or base64
        #[arg(long)]
        codec: Option<String>,

        /// characters per line, timestamp excluded
        #[arg(long)]
        line_width: Option<usize>,

        /// chunk file size threshold in KB
        #[arg(long = "max-kb")]
        max_kb: Option<usize>,

        /// window start, "YYYY/MM/DD HH:MM[:SS]"
        #[arg(long)]
        start: Option<String>,

        /// window end (exclusive), "YYYY/MM/DD HH:MM[:SS]"
        #[arg(long)]
        end: Option<String>,

        /// base name of the chunk files ({name}_{N}.txt)
        #[arg(long)]
        name: Option<String>,

        /// JSON file with encode options; flags override it
        #[arg(long)]
        options: Option<PathBuf>,

        /// seed for the timestamp offsets (reproducible output)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Rebuild the original file from chunk files
    Restore {
        /// chunk files, in emission order
        files: Vec<PathBuf>,

        /// collect {name}_{N}.txt from this directory, ordered by N
        #[arg(long)]
        dir: Option<PathBuf>,

        /// base name used for --dir lookup and the default output name
        #[arg(long, default_value = "OutputFileName")]
        name: String,

        /// output path (defaults to {name}.zip)
        #[arg(long)]
        out: Option<PathBuf>,

        /// skip detection and decode with this codec
        #[arg(long)]
        codec: Option<String>,
    },

    /// Report which codec chunk files would be decoded with
    Detect {
        files: Vec<PathBuf>,
    },

    /// Print usage notes
    About,
}
