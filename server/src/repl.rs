use crate::{normalize_term, QueryService};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::Instant;

pub const EXIT_SENTINEL: &str = "exit";
pub const TOP_N: usize = 5;

/// Interactive lookup loop: reads one term per line until `exit` or end of
/// input and prints up to [`TOP_N`] URLs with the measured lookup latency.
pub fn run_repl<R: BufRead, W: Write>(service: &QueryService, mut input: R, mut out: W) -> Result<()> {
    writeln!(out, "Ready! {} terms indexed. (Type '{EXIT_SENTINEL}' to stop)", service.num_terms())?;
    let mut line = String::new();
    loop {
        write!(out, "\nEnter search term: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let term = normalize_term(&line);
        if term == EXIT_SENTINEL {
            break;
        }

        let start = Instant::now();
        let hits = service.lookup(&term);
        let ms = start.elapsed().as_secs_f64() * 1000.0;

        if hits.is_empty() {
            writeln!(out, "No results found.")?;
            continue;
        }
        writeln!(out, "\nFound {} results for '{term}' in {ms:.4} ms:", hits.len())?;
        for (i, url) in hits.iter().take(TOP_N).enumerate() {
            writeln!(out, "{}. {url}", i + 1)?;
        }
    }
    Ok(())
}
