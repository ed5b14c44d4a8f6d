//! duel CLI

use std::io;

use duelc::commands::{eval_queries, run_repl, ReplOptions};

fn print_usage() {
    eprintln!("Usage: duel <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  eval <expr>...      Evaluate each query and print its results");
    eprintln!("  repl [--max=<n>]    Interactive session with tracked queries");
    eprintln!("  help                Show this message");
}

fn main() {
    duelc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return;
    };

    match command.as_str() {
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: duel eval <expr>...");
                std::process::exit(1);
            }
            let stdout = io::stdout();
            let stderr = io::stderr();
            let ok = eval_queries(&args[2..], &mut stdout.lock(), &mut stderr.lock());
            if !ok {
                std::process::exit(1);
            }
        }
        "repl" => {
            let mut options = ReplOptions::default();
            for arg in args.iter().skip(2) {
                if let Some(max) = arg.strip_prefix("--max=") {
                    match max.parse() {
                        Ok(max) => options.max_results = Some(max),
                        Err(_) => {
                            eprintln!("error: invalid --max value '{max}'");
                            std::process::exit(1);
                        }
                    }
                } else if arg == "--keep-bindings" {
                    options.fresh_bindings = false;
                } else {
                    eprintln!("error: unknown option '{arg}'");
                    std::process::exit(1);
                }
            }
            let stdin = io::stdin();
            let stdout = io::stdout();
            if let Err(err) = run_repl(&options, &mut stdin.lock(), &mut stdout.lock()) {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            std::process::exit(1);
        }
    }
}
