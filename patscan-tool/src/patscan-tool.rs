#![allow(clippy::uninlined_format_args)]

use patscan::{BufPos, Error, Options, Pattern, ScanDirection, WordTable};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "patscan-tool")]
struct Opt {
    /// The pattern, optionally carrying a ':letters' option suffix.
    pattern: String,

    /// Option letters applied instead of any suffix on the pattern.
    #[structopt(long, short, parse(try_from_str = Options::from_letters))]
    options: Option<Options>,

    /// Scan backward from the end instead of forward from the start.
    #[structopt(long, short)]
    backward: bool,

    /// Report the n-th occurrence when scanning a buffer.
    #[structopt(long, short, default_value = "1")]
    count: usize,

    /// Dump the compiled pattern to stdout.
    #[structopt(long)]
    dump: bool,

    /// Treat the file as a buffer of lines and scan with wrap-around.
    #[structopt(long, requires = "file")]
    buffer: bool,

    /// The input values to match against.
    #[structopt(conflicts_with_all = &["bench", "file"])]
    inputs: Vec<String>,

    /// Match against the contents of a specified file.
    #[structopt(long, conflicts_with_all = &["bench", "inputs"])]
    file: Option<PathBuf>,

    /// Benchmark the matches of the specified file.
    #[structopt(long, conflicts_with_all = &["file", "inputs"])]
    bench: Option<PathBuf>,
}

fn format_match(m: &patscan::Match, input: &str) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\"{}\" ({}..{})",
        &input[m.range()],
        m.range().start,
        m.range().end
    ));

    if !m.captures.is_empty() {
        result.push_str(", captures: [");
        for (i, cg) in m.captures.iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            if let Some(cg_range) = cg {
                result.push_str(&format!(
                    "\"{}\" ({}..{})",
                    &input[cg_range.clone()],
                    cg_range.start,
                    cg_range.end
                ));
            } else {
                result.push_str("None");
            }
        }
        result.push(']');
    }

    result
}

fn exec_pat_on_string(pat: &Pattern, input: &str, backward: bool) {
    if backward {
        match pat.find_from(input, input.len(), ScanDirection::Backward) {
            Some(m) => println!("Match: {}", format_match(&m, input)),
            None => println!("No match"),
        }
        return;
    }
    let mut matches = pat.find_iter(input);
    if let Some(res) = matches.next() {
        let count = 1 + matches.count();
        println!("Match: {}, total: {}", format_match(&res, input), count);
    } else {
        println!("No match");
    }
}

fn exec_pat_on_buffer(pat: &Pattern, contents: &str, backward: bool, count: usize) {
    let lines: Vec<&str> = contents.split('\n').collect();
    let word = WordTable::default();
    let (start, dir) = if backward {
        let last = lines.len() - 1;
        (
            BufPos::new(last, lines[last].len()),
            ScanDirection::Backward,
        )
    } else {
        (BufPos::new(0, 0), ScanDirection::Forward)
    };
    match pat.scan_buffer(&lines[..], start, dir, count, &word) {
        Some(m) => {
            let text = &lines[m.start.line][m.start.offset..];
            let shown = if m.start.line == m.end.line {
                &lines[m.start.line][m.start.offset..m.end.offset]
            } else {
                text
            };
            println!(
                "Match: \"{}\" ({}:{} .. {}:{})",
                shown, m.start.line, m.start.offset, m.end.line, m.end.offset
            );
        }
        None => println!("No match"),
    }
}

fn bench_pat_on_path(pat: &Pattern, path: &Path) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            println!("{}: {}", err, path.display());
            return;
        }
    };
    let input = contents.as_str();
    // Warmup
    pat.find_iter(input).count();
    let start = Instant::now();
    for _ in 0..25 {
        pat.find_iter(input).count();
    }
    let duration = start.elapsed();
    println!("{} ms", duration.as_millis());
}

fn main() -> Result<(), Error> {
    let args = Opt::from_args();

    let pat = match args.options {
        Some(options) => Pattern::with_options(&args.pattern, options)?,
        None => Pattern::new(&args.pattern)?,
    };
    if args.dump {
        println!("{:#?}", pat);
    }

    if let Some(ref path) = args.file {
        match fs::read_to_string(path) {
            Ok(contents) => {
                if args.buffer {
                    exec_pat_on_buffer(&pat, contents.as_str(), args.backward, args.count);
                } else {
                    exec_pat_on_string(&pat, contents.as_str(), args.backward);
                }
            }
            Err(err) => println!("{}: {}", err, path.display()),
        };
    } else if let Some(ref path) = args.bench {
        bench_pat_on_path(&pat, path);
    } else {
        for input in args.inputs {
            exec_pat_on_string(&pat, &input, args.backward);
        }
    }
    Ok(())
}
