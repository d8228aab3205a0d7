//! Quill CLI
//!
//! Runs the static phase over a program and reports what it finds.

use quillc::commands::{check_file, classes_file, explain_error, parse_check_options};

fn main() {
    quillc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: quill check <file.quill> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --max-template-depth=<n>  Limit nested template instantiation");
                eprintln!("  -v, --verbose             List every class after checking");
                std::process::exit(1);
            }

            let options = match parse_check_options(&args[3..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(1);
                }
            };
            check_file(&args[2], &options);
        }
        "classes" => {
            if args.len() < 3 {
                eprintln!("Usage: quill classes <file.quill>");
                std::process::exit(1);
            }
            classes_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("Quill {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: quill explain <ERROR_CODE>");
                eprintln!("Example: quill explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Quill static checker");
    println!();
    println!("Usage: quill <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file.quill>     Load a program and run the static phase");
    println!("  classes <file.quill>   Load a program and list every built class");
    println!("  explain <code>         Explain an error code (e.g., E2001)");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Check options:");
    println!("  --max-template-depth=<n>  Limit nested template instantiation (default: 64)");
    println!("  --verbose, -v             List every class after checking");
    println!();
    println!("Environment:");
    println!("  QUILL_LOG=<filter>     Enable tracing (e.g. quill_sema=debug)");
    println!("  QUILL_LOG_TREE=1       Render tracing spans as a tree");
    println!();
    println!("Examples:");
    println!("  quill check list.quill");
    println!("  quill check nested.quill --max-template-depth=8");
    println!("  quill classes zoo.quill");
    println!("  quill explain E2005");
}
