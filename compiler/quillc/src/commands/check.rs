//! The `check` command: run the static phase over a source file.

use quill_sema::SemaConfig;

use super::{describe_classes, load_or_exit, read_file};

/// Options accepted after `quill check <file>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub max_template_depth: Option<usize>,
    pub verbose: bool,
}

impl CheckOptions {
    pub fn config(&self) -> SemaConfig {
        match self.max_template_depth {
            Some(depth) => SemaConfig::default().with_max_instantiation_depth(depth),
            None => SemaConfig::default(),
        }
    }
}

/// Parse the flags following the file path.
pub fn parse_check_options(args: &[String]) -> Result<CheckOptions, String> {
    let mut options = CheckOptions::default();

    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-template-depth=") {
            let depth = depth
                .parse()
                .map_err(|_| format!("invalid template depth '{depth}': expected a number"))?;
            options.max_template_depth = Some(depth);
        } else if arg == "--verbose" || arg == "-v" {
            options.verbose = true;
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }

    Ok(options)
}

/// Load the program at `path` and report the result.
pub fn check_file(path: &str, options: &CheckOptions) {
    let source = read_file(path);
    let env = load_or_exit(path, &source, options.config());

    if options.verbose {
        print!("{}", describe_classes(&env));
    }
    println!(
        "{path}: ok ({} classes, {} templates)",
        env.classes().len(),
        env.templates().len()
    );
}
