use std::env::args_os;
use std::process::exit;

use huffpack::{run, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match run(&arguments) {
        Ok(_) => println!("Operation successful"),
        Err(e) => {
            eprintln!("Operation failed because of: {}", e);
            exit(1);
        }
    }
}
