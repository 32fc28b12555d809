use std::{
    fs,
    io::{self, Read},
    process::ExitCode,
    thread,
};

use clap::Parser;
use gambl::{
    Environment,
    error::Error,
    interpreter::environment::DEFAULT_CALL_LIMIT,
    parse, run, run_script,
};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing_subscriber::{EnvFilter, fmt};

/// Stack size of the interpreter thread. Every nested call recurses through
/// the evaluator, so the default main-thread stack runs out long before the
/// call limit is reached.
const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// gambl is a small imperative scripting language.
///
/// Runs a script given inline or from a file. Without a script it reads from
/// stdin, or starts an interactive prompt when stdin is a terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells gambl to treat CONTENTS as a path to a script file.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the value of the last statement.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Print the parsed AST instead of running the program.
    #[arg(long)]
    print_ast: bool,

    /// Maximum nesting of user function calls.
    #[arg(long, default_value_t = DEFAULT_CALL_LIMIT)]
    max_call_depth: usize,

    /// The script to run, or its path with `--file`.
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // GAMBL_LOG, then RUST_LOG, then warn.
    let filter = EnvFilter::try_from_env("GAMBL_LOG").or_else(|_| EnvFilter::try_from_default_env())
                                                     .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(io::stderr)
         .with_target(false)
         .init();

    let interpreter = thread::Builder::new().name("gambl".to_string())
                                            .stack_size(INTERPRETER_STACK_SIZE)
                                            .spawn(move || execute(&args));

    match interpreter.map(thread::JoinHandle::join) {
        Ok(Ok(code)) => code,
        Ok(Err(_)) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Failed to start the interpreter: {e}");
            ExitCode::FAILURE
        },
    }
}

fn execute(args: &Args) -> ExitCode {
    let script = match &args.contents {
        Some(contents) if args.file => match fs::read_to_string(contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{contents}'. Perhaps this file does \
                           not exist?");
                return ExitCode::FAILURE;
            },
        },
        Some(contents) => contents.clone(),
        None if atty::is(atty::Stream::Stdin) => {
            repl(args);
            return ExitCode::SUCCESS;
        },
        None => {
            let mut script = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut script) {
                eprintln!("Error reading from stdin: {e}");
                return ExitCode::FAILURE;
            }
            script
        },
    };

    if args.print_ast {
        return print_ast(&script);
    }

    let env = base_environment(args);
    match run_script(&script, &env, args.pipe_mode) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        },
    }
}

fn base_environment(args: &Args) -> Environment {
    let env = Environment::with_call_limit(args.max_call_depth);
    env.install_builtins();
    env
}

fn print_ast(script: &str) -> ExitCode {
    match parse(script) {
        Ok(ast) => {
            println!("{ast:#?}");
            println!("{ast}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            report(&e.into());
            ExitCode::FAILURE
        },
    }
}

fn report(error: &Error) {
    eprintln!("Error: {error}");
}

/// Reads lines until `quit`, `exit`, Ctrl-C or Ctrl-D.
///
/// Each line is a whole program run against one environment that lives for
/// the session. Errors are printed and the loop continues.
fn repl(args: &Args) {
    let mut line_editor = Reedline::create();
    let prompt = DefaultPrompt::new(DefaultPromptSegment::Basic("gambl".to_string()),
                                    DefaultPromptSegment::Empty);
    let env = base_environment(args);

    println!("gambl REPL - type quit or exit to leave (Ctrl+D or Ctrl+C also work)");

    loop {
        let signal = match line_editor.read_line(&prompt) {
            Ok(signal) => signal,
            Err(e) => {
                eprintln!("Reedline error: {e}");
                return;
            },
        };

        match signal {
            Signal::Success(line) => {
                let line = line.trim();
                if line == "quit" || line == "exit" {
                    return;
                }
                if line.is_empty() {
                    continue;
                }
                if args.print_ast {
                    print_ast(line);
                    continue;
                }
                match run(line, &env) {
                    Ok(Some(value)) => println!("{value}"),
                    Ok(None) => {},
                    Err(e) => println!("Error: {e}"),
                }
            },
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nGoodbye!");
                return;
            },
        }
    }
}
