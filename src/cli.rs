use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

/// Number of symbols every worker encodes per chunk if the user does not
/// override it.
pub const DEFAULT_CHUNK_SIZE: usize = 65536;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_decompress_argument(command);
        let command = Self::register_threads_argument(command);
        Self::register_chunk_size_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_decompress_argument(command: Command) -> Command {
        command.arg(Self::create_decompress_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_chunk_size_argument(command: Command) -> Command {
        command.arg(Self::create_chunk_size_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to the input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to the output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_decompress_argument() -> Arg {
        arg!(-d --decompress "Decompress the input file instead of compressing it")
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of worker threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(u64).range(1..))
    }

    fn create_chunk_size_argument() -> Arg {
        arg!(-c --chunk_size <SYMBOLS> "Number of symbols encoded per chunk")
            .default_value(DEFAULT_CHUNK_SIZE.to_string())
            .required(false)
            .value_parser(value_parser!(u64).range(1..))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            decompress: Self::extract_decompress_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            chunk_size: Self::extract_chunk_size_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_decompress_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("decompress")
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<u64>("threads")
            .expect("Required argument threads not provided")
            .to_owned() as usize
    }

    fn extract_chunk_size_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<u64>("chunk_size")
            .expect("Chunk size must be provided, but was unset.")
            .to_owned() as usize
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
