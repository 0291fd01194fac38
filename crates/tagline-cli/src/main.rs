use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::PathBuf;
use std::{env, process};
use tagline_config::Config;
use tagline_engine::RenderOptions;

struct Args {
    strict: bool,
    keep_comments: bool,
    output: Option<PathBuf>,
    inputs: Vec<PathBuf>,
}

fn parse_args(argv: &[String]) -> Result<Args> {
    let mut args = Args {
        strict: false,
        keep_comments: false,
        output: None,
        inputs: Vec::new(),
    };
    let mut iter = argv.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--strict" => args.strict = true,
            "--keep-comments" => args.keep_comments = true,
            "-o" | "--output" => {
                let path = iter.next().context("missing path after -o")?;
                args.output = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') && flag != "-" => {
                bail!("unknown flag '{flag}'");
            }
            path => args.inputs.push(PathBuf::from(path)),
        }
    }
    Ok(args)
}

/// Concatenates the input files in argument order; with no inputs, reads
/// stdin. Fragments merge into one document before rendering, so nesting
/// may continue across file boundaries.
fn read_sources(inputs: &[PathBuf]) -> Result<String> {
    if inputs.is_empty() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    let mut source = String::new();
    for path in inputs {
        let fragment = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        source.push_str(&fragment);
        if !source.ends_with('\n') {
            source.push('\n');
        }
    }
    Ok(source)
}

fn run(argv: &[String]) -> Result<()> {
    let args = parse_args(argv)?;

    let mut options = match Config::load() {
        Ok(Some(config)) => config.render,
        Ok(None) => RenderOptions::default(),
        Err(e) => {
            eprintln!("warning: ignoring config file: {e}");
            RenderOptions::default()
        }
    };
    // Flags only ever tighten the config; there is no negative flag form.
    options.strict |= args.strict;
    options.preserve_comments |= args.keep_comments;

    let source = read_sources(&args.inputs)?;
    let rendered = tagline_engine::render(&source, options)?;

    for diagnostic in &rendered.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    match &args.output {
        Some(path) => {
            let mut html = rendered.html;
            html.push('\n');
            std::fs::write(path, html)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        None => println!("{}", rendered.html),
    }
    Ok(())
}

fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&argv) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
