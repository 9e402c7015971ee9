// src/cli.rs
use std::path::PathBuf;

use crate::config::options::{AnalysisMode, RunOptions, Source};
use crate::progress::ConsoleProgress;
use crate::specs::team_roster::verify_team_link;

const TEAM_URL_HINT: &str = "It should start with 'https://www.espncricinfo.com/team/' or \
'https://www.espncricinfo.com/cricketers/team/' and be followed by the team name only (no extra slashes).";

pub enum Command {
    Run(RunOptions),
    Help,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let opts = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            eprintln!("{}", include_str!("cli_help.txt"));
            return Ok(());
        }
        Command::Run(opts) => opts,
    };

    let mut progress = ConsoleProgress;
    let summary = crate::runner::run(&opts, Some(&mut progress))?;

    println!("{}", summary.console);
    for p in &summary.files_written {
        println!("Saved: {}", p.display());
    }
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Command, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = RunOptions::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--match-file" => {
                let v = args.next().ok_or("Missing path for --match-file")?;
                set_source(&mut opts, Source::MatchFile(PathBuf::from(v)))?; }
            "--match-url" => {
                let v = args.next().ok_or("Missing URL for --match-url")?;
                set_source(&mut opts, Source::MatchUrl(v))?; }
            "--player-file" => {
                let v = args.next().ok_or("Missing path for --player-file")?;
                set_source(&mut opts, Source::PlayerFile(PathBuf::from(v)))?; }
            "--player-url" => {
                let v = args.next().ok_or("Missing URL or id for --player-url")?;
                set_source(&mut opts, Source::PlayerUrl(v))?; }
            "--team-file" => {
                let v = args.next().ok_or("Missing path for --team-file")?;
                set_source(&mut opts, Source::TeamFile(PathBuf::from(v)))?; }
            "--team-full" => {
                let v = args.next().ok_or("Missing roster path for --team-full")?;
                set_source(&mut opts, Source::TeamFull(PathBuf::from(v)))?; }
            "--team-url" => {
                let v = args.next().ok_or("Missing URL for --team-url")?;
                if !verify_team_link(&v) {
                    return Err(format!("Invalid team URL '{v}'. {TEAM_URL_HINT}").into());
                }
                opts.team_url = Some(v); }
            "--page" => {
                let v = args.next().ok_or("Missing URL for --page")?;
                set_source(&mut opts, Source::Page(v))?; }
            "--mode" => {
                let v = args.next().ok_or("Missing value for --mode")?;
                opts.mode = AnalysisMode::parse(&v).ok_or_else(|| {
                    format!(
                        "Invalid mode '{v}'. Valid options: comprehensive, summary, live, structured, timeline"
                    )
                })?; }
            "-o" | "--output" => {
                let v = args.next().ok_or("Missing output name")?;
                if v.trim().is_empty() { return Err("Output name cannot be empty".into()); }
                opts.output = v; }
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    let Some(source) = &opts.source else {
        return Err(
            "Specify one of --match-file, --match-url, --player-file, --player-url, --team-file, --team-full or --page"
                .into(),
        );
    };
    if opts.team_url.is_some() && !source.is_team() {
        return Err("--team-url only applies to --team-file and --team-full".into());
    }
    Ok(Command::Run(opts))
}

fn set_source(opts: &mut RunOptions, src: Source) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(prev) = &opts.source {
        return Err(format!(
            "Only one input allowed (already have {}, got {})",
            prev.describe(),
            src.describe()
        ).into());
    }
    opts.source = Some(src);
    Ok(())
}
