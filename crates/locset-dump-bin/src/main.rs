use clap::Parser;
use locset_core::{Locator, LocatorSet, parse_locator_set};
use locset_test::fixtures_dir;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "locset-dump")]
#[command(about = "Flatten a locator list into a minimal locator set and dump it")]
struct Args {
  /// Path to a locator list (one `/`-separated locator per line)
  #[arg(value_name = "LOCATORS")]
  locators: Option<PathBuf>,

  /// Use a bundled fixture name instead of a path (reads from repo fixtures/)
  #[arg(short, long, value_name = "NAME")]
  fixture: Option<String>,

  /// Report whether the set intersects this locator (repeatable)
  #[arg(short, long, value_name = "LOCATOR")]
  intersects: Vec<Locator>,

  /// Report whether the set covers this locator (repeatable)
  #[arg(short, long, value_name = "LOCATOR")]
  contains: Vec<Locator>,

  /// Print the set as JSON instead of one locator per line
  #[arg(long)]
  json: bool,

  /// Delimiter used between elements in text output
  #[arg(short, long, default_value = "/")]
  delimiter: String,
}

fn read_file(p: &Path) -> Result<String, String> {
  std::fs::read_to_string(p).map_err(|e| format!("failed to read {}: {e}", p.display()))
}

fn dump_text(set: &LocatorSet, delimiter: &str) {
  for locator in set {
    if locator.is_empty() {
      // the whole hierarchy
      println!("{delimiter}");
    } else {
      println!("{}", locator.to_delimited_string(delimiter));
    }
  }
}

fn main() -> ExitCode {
  let args = Args::parse();

  let contents = if let Some(fixture) = &args.fixture {
    read_file(&fixtures_dir().join(fixture))
  } else if let Some(path) = &args.locators {
    read_file(path)
  } else {
    eprintln!("Provide a locator list path or --fixture <name>");
    return ExitCode::from(2);
  };
  let contents = match contents {
    Ok(contents) => contents,
    Err(e) => {
      eprintln!("{e}");
      return ExitCode::FAILURE;
    }
  };

  let set = match parse_locator_set(&contents) {
    Ok(set) => set,
    Err(e) => {
      eprintln!("Parse error: {e}");
      return ExitCode::FAILURE;
    }
  };

  if args.json {
    match serde_json::to_string_pretty(&set) {
      Ok(json) => println!("{json}"),
      Err(e) => {
        eprintln!("Failed to serialize set: {e}");
        return ExitCode::FAILURE;
      }
    }
  } else {
    dump_text(&set, &args.delimiter);
  }

  for locator in &args.intersects {
    println!("intersects {locator}: {}", set.intersects(locator));
  }
  for locator in &args.contains {
    println!("contains {locator}: {}", set.contains(locator));
  }

  ExitCode::SUCCESS
}
