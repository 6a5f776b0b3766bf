use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use threadpool::ThreadPool;

use chunked::encode_chunks;
use container::{ContainerReader, ContainerWriter};
use error::Error;
use huffman::{CodeTable, CodeTree, FrequencyTable, SymbolDecoder};

pub use cli::CLIParser;

pub mod binary_stream;
pub mod chunked;
mod cli;
pub mod container;
pub mod error;
pub mod huffman;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    decompress: bool,
    number_of_threads: usize,
    chunk_size: usize,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e))
}

/// Dispatches to compression or decompression depending on the parsed
/// command line.
pub fn run(arguments: &Arguments) -> Result<()> {
    if arguments.decompress {
        decompress_file(arguments)
    } else {
        compress_file(arguments)
    }
}

pub fn compress_file(arguments: &Arguments) -> Result<()> {
    let input_file = open_input_file(&arguments.input_file)?;
    let output_file = open_output_file(&arguments.output_file)?;
    let mut symbols = Vec::new();
    BufReader::new(&input_file)
        .read_to_end(&mut symbols)
        .map_err(|e| {
            Error::FailedToReadInputFile(arguments.input_file.display().to_string(), e)
        })?;
    let frequency_table = FrequencyTable::from_symbols(symbols.iter().copied());
    let tree = CodeTree::build(&frequency_table)?;
    let code_table = Arc::new(CodeTable::from_tree(&tree));
    let pool = ThreadPool::new(arguments.number_of_threads);
    let segments = encode_chunks(&symbols, &code_table, &pool, arguments.chunk_size)?;
    let mut output_file_writer = BufWriter::new(&output_file);
    ContainerWriter::new(&mut output_file_writer).write(&tree, &segments)?;
    output_file_writer
        .flush()
        .map_err(|e| {
            Error::FailedToWriteOutputFile(arguments.output_file.display().to_string(), e)
        })?;
    let encoded_bits: u64 = segments.iter().map(|segment| segment.bit_len()).sum();
    log::info!(
        "compressed {} symbols into {} segments holding {} bits",
        symbols.len(),
        segments.len(),
        encoded_bits
    );
    Ok(())
}

pub fn decompress_file(arguments: &Arguments) -> Result<()> {
    let input_file = open_input_file(&arguments.input_file)?;
    let output_file = open_output_file(&arguments.output_file)?;
    let mut input_file_reader = BufReader::new(&input_file);
    let (tree, segments) = ContainerReader::new(&mut input_file_reader).read::<u8>()?;
    let decoder = SymbolDecoder::new(&tree);
    let mut output_file_writer = BufWriter::new(&output_file);
    let mut symbol_count = 0usize;
    for segment in &segments {
        let symbols = decoder.decode(segment)?;
        symbol_count += symbols.len();
        output_file_writer.write_all(&symbols).map_err(|e| {
            Error::FailedToWriteOutputFile(arguments.output_file.display().to_string(), e)
        })?;
    }
    output_file_writer
        .flush()
        .map_err(|e| {
            Error::FailedToWriteOutputFile(arguments.output_file.display().to_string(), e)
        })?;
    log::info!(
        "decompressed {} segments into {} symbols",
        segments.len(),
        symbol_count
    );
    Ok(())
}
