//! CLI driver: raw extraction JSON in, resolved record JSON out.
//! Run with: cargo run --bin resolve -- <input.json> [--out <path>] [--points-csv <path>]
//! Without --out the record is written to stdout. Logging via RUST_LOG
//! (default info).

use std::fs::File;
use std::io::Write;
use std::process::ExitCode;

use tennis_match_detail::{
    point_rows, resolve_and_assess, write_point_rows, RawMatchInput, ResolveOptions,
};

struct Args {
    input: String,
    out: Option<String>,
    points_csv: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut input = None;
    let mut out = None;
    let mut points_csv = None;
    let mut argv = std::env::args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--out" => out = Some(argv.next().ok_or("--out requires a path")?),
            "--points-csv" => {
                points_csv = Some(argv.next().ok_or("--points-csv requires a path")?)
            }
            _ if input.is_none() => input = Some(arg),
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }
    Ok(Args {
        input: input.ok_or("usage: resolve <input.json> [--out <path>] [--points-csv <path>]")?,
        out,
        points_csv,
    })
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&args.input)?;
    let input: RawMatchInput = serde_json::from_str(&raw)?;
    log::info!(
        "Resolving {} blocks ({} vs {})",
        input.blocks.len(),
        input.row_a.display_name,
        input.row_b.display_name
    );

    let record = resolve_and_assess(&input, &ResolveOptions::default())?;
    log::info!(
        "Resolved: {} sets, quality {} ({}), validation {}",
        record.semantic.sets.len(),
        record.quality.score,
        record
            .quality
            .tags
            .iter()
            .map(|t| format!("{t:?}"))
            .collect::<Vec<_>>()
            .join(", "),
        if record.validation.ok { "ok" } else { "NOT OK" }
    );
    for finding in &record.validation.errors {
        log::warn!("error [{:?}] at {}: {}", finding.code, finding.location, finding.message);
    }

    if let Some(path) = &args.points_csv {
        let rows = point_rows(&record.semantic);
        write_point_rows(File::create(path)?, &rows)?;
        log::info!("Wrote {} point rows to {path}", rows.len());
    }

    let json = serde_json::to_string_pretty(&record)?;
    match &args.out {
        Some(path) => std::fs::write(path, json)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = run(&args) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
