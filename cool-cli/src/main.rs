use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use cool_diagnostics::Diagnostic;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(name = "coolc", version, about = "A Cool language front-end and code generator")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lex, parse, and semantically check a source file without generating code.
    Check { file: PathBuf },
    /// Check a source file and, if it is well-formed, emit x86-64 assembly.
    Build {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Command::Check { file } => run_check(&file).map(|_| ()),
        Command::Build { file, output } => run_build(&file, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!("{}", diagnostic.render_canonical());
    }
}

/// Runs lexing, parsing, and semantic analysis; returns the analysis
/// result so `run_build` can reuse it without re-parsing. Returns an
/// error (and has already printed diagnostics) if any stage failed.
fn run_check(file: &PathBuf) -> Result<(cool_ast::Program, cool_sema::AnalysisResult)> {
    let source = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let filename = file.to_string_lossy().to_string();

    log::info!("parsing {filename}");
    let (program, parse_diagnostics) = cool_parser::parse(&source, Some(filename.clone()));
    if !parse_diagnostics.is_empty() {
        print_diagnostics(&parse_diagnostics);
    }

    log::info!("running semantic analysis");
    let analysis = cool_sema::analyze(&program, Some(filename))
        .map_err(|err| anyhow::anyhow!("{err}"))?;
    print_diagnostics(&analysis.diagnostics);

    let had_parse_errors = parse_diagnostics
        .iter()
        .any(|d| d.severity == cool_diagnostics::Severity::Error);
    if analysis.had_errors || had_parse_errors {
        bail!("Compilation halted due to errors.");
    }
    Ok((program, analysis))
}

fn run_build(file: &PathBuf, output: Option<PathBuf>) -> Result<()> {
    let (program, analysis) = run_check(file)?;

    log::info!("generating code");
    let assembly = cool_codegen::generate(&program, &analysis).map_err(|err| anyhow::anyhow!("{err}"))?;

    let out_path = output.unwrap_or_else(|| file.with_extension("s"));
    fs::write(&out_path, assembly).with_context(|| format!("writing {}", out_path.display()))?;
    println!("wrote {}", out_path.display());
    Ok(())
}
