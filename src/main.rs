use clap::{Parser, Subcommand};
use std::io::{self, Read, Seek, Write};
use std::path::PathBuf;

use buffered_file_reader::delims::{parse_delims, WHITESPACE};
use buffered_file_reader::{BufferedFileReader, SimpleFileReader};

mod output_writer;
use output_writer::TokenWriter;

/// Read a file byte by byte or token by token through a buffered reader
#[derive(Parser)]
#[command(name = "bfr")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print each token on its own line
    Tokens {
        /// File to read
        input: PathBuf,

        /// Delimiter bytes; accepts \t \n \r \v \f \s \\ and \xHH escapes
        /// (default: whitespace)
        #[arg(short, long)]
        delims: Option<String>,

        /// Prefix each token with its starting offset
        #[arg(long)]
        offsets: bool,
    },

    /// Copy a file to stdout one byte at a time
    Dump {
        /// File to read
        input: PathBuf,

        /// Issue one read per byte instead of going through the buffer
        #[arg(long)]
        unbuffered: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let stdout = io::stdout();
    match args.command {
        Command::Tokens {
            input,
            delims,
            offsets,
        } => {
            let delims = match delims {
                Some(spec) => parse_delims(&spec)?,
                None => WHITESPACE.to_vec(),
            };
            let mut reader = BufferedFileReader::default();
            reader.try_open(&input)?;
            let mut writer = TokenWriter::new(stdout.lock(), offsets);
            tokens(&mut reader, &delims, &mut writer)?;
            writer.flush()?;
        }
        Command::Dump { input, unbuffered } => {
            let mut out = TokenWriter::new(stdout.lock(), false);
            if unbuffered {
                let mut reader = SimpleFileReader::default();
                reader.try_open(&input)?;
                while let Some(c) = reader.get_char() {
                    out.write_raw(&[c])?;
                }
            } else {
                let mut reader = BufferedFileReader::default();
                reader.try_open(&input)?;
                while let Some(c) = reader.get_char() {
                    out.write_raw(&[c])?;
                }
            }
            out.flush()?;
        }
    }
    Ok(())
}

fn tokens<R: Read + Seek, W: Write>(
    reader: &mut BufferedFileReader<R>,
    delims: &[u8],
    output: &mut TokenWriter<W>,
) -> io::Result<()> {
    loop {
        let start = reader.tell();
        match reader.get_token(delims) {
            Some(token) => output.write_token(start, &token)?,
            None => break,
        }
    }
    Ok(())
}
