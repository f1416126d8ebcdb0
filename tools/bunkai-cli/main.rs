use bunkai::prelude::*;
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// What to print for a single decompiled file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmitCli {
    Xml,
    Code,
    Both,
}

/// A source-to-blocks decompiler CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the source file to decompile
    source_path: Option<PathBuf>,

    /// What to emit for the decompiled workspace
    #[arg(short, long, value_enum, default_value = "xml")]
    emit: EmitCli,

    /// Also print every top-level chain as an indented block tree
    #[arg(short, long)]
    tree: bool,

    /// Compare the produced XML against an expected .blocks file
    #[arg(short, long)]
    check: Option<PathBuf>,

    /// Run the fixture suite in the given directory (code/ and blocks/ subdirectories)
    #[arg(short, long)]
    fixtures: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(fixtures) = cli.fixtures {
        return run_fixtures(&fixtures);
    }

    let Some(source_path) = cli.source_path else {
        exit_with_error("A source path is required unless --fixtures is given.");
    };
    run_single(&source_path, cli.emit, cli.tree, cli.check.as_deref())
}

fn run_single(path: &Path, emit: EmitCli, tree: bool, check: Option<&Path>) -> ExitCode {
    let code = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
    });

    let mut workspace = Workspace::new();
    if let Err(e) = decompile(&mut workspace, &code) {
        exit_with_error(&format!("Decompilation of '{}' failed: {}", path.display(), e));
    }

    let xml = workspace_to_xml(&workspace);
    match emit {
        EmitCli::Xml => print!("{xml}"),
        EmitCli::Code => print!("{}", workspace_to_code(&workspace)),
        EmitCli::Both => {
            print!("{xml}");
            println!();
            print!("{}", workspace_to_code(&workspace));
        }
    }

    if tree {
        for id in workspace.top_blocks() {
            println!();
            print!("{}", DisplayBlock { workspace: &workspace, id });
        }
    }

    if let Some(expected_path) = check {
        let expected = fs::read_to_string(expected_path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read '{}': {}",
                expected_path.display(),
                e
            ))
        });
        if xml != expected {
            eprintln!("Mismatch against '{}'.", expected_path.display());
            return ExitCode::FAILURE;
        }
        println!("Output matches '{}'.", expected_path.display());
    }

    ExitCode::SUCCESS
}

/// Runs every `code/<name>.js` against `blocks/<name>.blocks`, checking the
/// serialized XML and the round trip through generated code. Any failure makes
/// the process exit non-zero.
fn run_fixtures(dir: &Path) -> ExitCode {
    let code_dir = dir.join("code");
    let entries = fs::read_dir(&code_dir).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read fixture directory '{}': {}",
            code_dir.display(),
            e
        ))
    });

    let mut total = 0usize;
    let mut failed: Vec<String> = Vec::new();

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "js"))
        .collect();
    paths.sort();

    for path in paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        total += 1;

        match check_fixture(dir, &path, &name) {
            Ok(()) => println!("PASS {name}"),
            Err(reason) => {
                println!("FAIL {name}: {reason}");
                failed.push(name);
            }
        }
    }

    println!("\n{} fixture(s), {} failed.", total, failed.len());
    if failed.is_empty() {
        ExitCode::SUCCESS
    } else {
        println!("Failed: {}", failed.iter().join(", "));
        ExitCode::FAILURE
    }
}

fn check_fixture(dir: &Path, code_path: &Path, name: &str) -> std::result::Result<(), String> {
    let code = fs::read_to_string(code_path).map_err(|e| e.to_string())?;
    let expected_path = dir.join("blocks").join(format!("{name}.blocks"));
    let expected = fs::read_to_string(&expected_path)
        .map_err(|e| format!("missing '{}': {}", expected_path.display(), e))?;

    let mut workspace = Workspace::new();
    decompile(&mut workspace, &code).map_err(|e| e.to_string())?;
    let xml = workspace_to_xml(&workspace);
    if xml != expected {
        return Err("serialized XML differs from expected".to_string());
    }

    // The generated code must decompile to the same workspace again.
    let generated = workspace_to_code(&workspace);
    let mut second = Workspace::new();
    decompile(&mut second, &generated).map_err(|e| e.to_string())?;
    if workspace_to_xml(&second) != xml {
        return Err("round trip through generated code diverges".to_string());
    }
    Ok(())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
