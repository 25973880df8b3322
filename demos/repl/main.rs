use adt::parser::{builder::Builder, parse_bool, parse_statement};
use clap::{App, Arg};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{multispace0, multispace1};
use nom::combinator::{map, opt};
use nom::sequence::{delimited, preceded, separated_pair};
use nom::IResult;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A repl command
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    Include(String),
    PrintBuilderState(bool),
    ShowParse(bool),
}

/// Parse a repl command
pub fn parse_command(input: &str) -> IResult<&str, Command> {
    delimited(
        delimited(multispace0, tag("#"), multispace0),
        alt((
            map(
                separated_pair(tag("show_parse"), multispace0, opt(parse_bool)),
                |(_, b)| Command::ShowParse(b.unwrap_or(true)),
            ),
            map(
                separated_pair(tag("builder_state"), multispace0, opt(parse_bool)),
                |(_, b)| Command::PrintBuilderState(b.unwrap_or(true)),
            ),
            map(
                separated_pair(
                    tag("include"),
                    multispace1,
                    delimited(tag("<"), take_until(">"), tag(">")),
                ),
                |(_, f)| Command::Include(String::from(f)),
            ),
        )),
        preceded(multispace0, tag(";")),
    )(input)
}

/// A very simple repl for sum type declarations
#[derive(Debug)]
pub struct Repl {
    builder: Builder,
    show_parse: bool,
    prompt: &'static str,
}

const DEFAULT_PROMPT: &str = ">>> ";

impl Repl {
    pub fn new() -> Repl {
        Repl {
            builder: Builder::new(),
            show_parse: false,
            prompt: DEFAULT_PROMPT,
        }
    }
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::ShowParse(b) => {
                self.show_parse = b;
            }
            Command::Include(f) => {
                let source = match fs::read_to_string(&f) {
                    Ok(source) => source,
                    Err(err) => {
                        eprintln!("Error opening file {:?}: {}", f, err);
                        return;
                    }
                };
                match self.builder.parse_all(&source) {
                    Ok(values) => debug!(file = %f, statements = values.len(), "included file"),
                    Err(err) => eprintln!("Error in {:?}: {}", f, err),
                }
            }
            Command::PrintBuilderState(pretty) => {
                for (name, value) in self.builder.symbols() {
                    if pretty {
                        println!("{} = {}", name, value)
                    } else {
                        println!("{} = {:?}", name, value)
                    }
                }
            }
        }
    }
    pub fn handle_input(&mut self, mut input: &str) {
        loop {
            input = input.trim_start();
            if input.is_empty() {
                return;
            }
            if let Ok((rest, command)) = parse_command(input) {
                self.handle_command(command);
                input = rest;
                continue;
            }
            if self.show_parse {
                match parse_statement(input) {
                    Ok((_, statement)) => println!("Parsed: {:?}", statement),
                    Err(err) => println!("Parse error: {:?}", err),
                }
            }
            match self.builder.parse_statement(input) {
                Ok((rest, value)) => {
                    println!("{}", value);
                    input = rest;
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    return;
                }
            }
        }
    }
}

fn main() {
    let matches = App::new("adt repl")
        .version("0.0")
        .about("repl for declaring and exercising sum types")
        .arg(
            Arg::with_name("history")
                .short("h")
                .long("history")
                .value_name("FILE")
                .help("Sets a file to save/load history")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log")
                .short("l")
                .long("log")
                .value_name("FILTER")
                .help("Sets a log filter, overriding RUST_LOG")
                .takes_value(true),
        )
        .get_matches();
    let filter = match matches.value_of("log") {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let history = matches.value_of("history");
    let mut rl = Editor::<()>::new();
    let mut repl = Repl::new();
    if let Some(history) = history {
        if rl.load_history(history).is_err() {
            println!("No previous history loaded from {:?}.", history);
        } else {
            println!("Loaded history from {:?}.", history)
        }
    } else {
        println!("No previous history loaded.")
    }
    loop {
        let line = rl.readline(repl.prompt);
        match line {
            Ok(line) => {
                repl.handle_input(line.as_str());
                rl.add_history_entry(line.as_str());
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }
    if let Some(history) = history {
        if let Err(err) = rl.save_history(history) {
            eprintln!("Error saving history to {:?}: {}", history, err);
        }
    }
}
