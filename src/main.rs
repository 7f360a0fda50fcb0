//! CLI entry point for treedump

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use termcolor::{BufferedStandardStream, ColorChoice};
use treedump::matcher::to_slash;
use treedump::walk::read_children;
use treedump::{
    ConsoleDiagnostics, ContentRenderer, Diagnostic, Diagnostics, DumpProfile, Error,
    ExclusionRule, PathMatcher, Profile, Result, SortOrder, TreeConfig, TreeProfile, TreeRenderer,
    Walker, WalkerConfig,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to color `stream` based on mode and environment.
fn should_use_color(mode: ColorMode, stream: &impl IsTerminal) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
                return false;
            }
            stream.is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treedump")]
#[command(about = "Dump a source tree as labelled text blocks, or draw it as a tree")]
#[command(version)]
struct Cli {
    /// JSON profile supplying defaults for both commands
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every file under ROOT as a labelled, fenced block
    Dump(DumpArgs),
    /// Draw selected top-level entries and everything below them
    Tree(TreeArgs),
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Directory to dump (default: profile root, then ".")
    root: Option<PathBuf>,

    /// Exclude a path and everything beneath it (can be used multiple times)
    #[arg(short = 'x', long = "exclude", value_name = "PATH")]
    exclude: Vec<PathBuf>,

    /// Ignore entries whose name matches pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Write this file first, labelled as given (can be used multiple times)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Also walk DIR after ROOT, labels prefixed with DIR (can be used multiple times)
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    dirs: Vec<PathBuf>,

    /// Output file, or "-" for stdout (default: <root name>_context.txt)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Prefix every label with the root as given
    #[arg(long = "label-root")]
    label_root: bool,
}

#[derive(Args, Debug)]
struct TreeArgs {
    /// Top-level entries to draw (default: profile entries, then everything)
    names: Vec<String>,

    /// Directory the names are resolved against
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Ignore entries whose name matches pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Exclude a path relative to DIR and everything beneath it
    #[arg(short = 'x', long = "exclude", value_name = "PATH")]
    exclude: Vec<PathBuf>,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Do not apply the built-in ignore list (build, .git, *.iml, ...)
    #[arg(long = "no-default-ignores")]
    no_default_ignores: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.quiet, cli.verbose);
    log::debug!("CLI args parsed: {:?}", cli);

    if let Err(e) = run(cli) {
        log::debug!("fatal: {:?}", e);
        eprintln!("treedump: {}", e);
        process::exit(1);
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
    log::trace!("logger initialized with level {:?}", level);
}

fn run(cli: Cli) -> Result<()> {
    let profile = match &cli.config {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };
    let mut diagnostics =
        ConsoleDiagnostics::new(should_use_color(cli.color, &io::stderr()), cli.quiet);

    match cli.command {
        Command::Dump(args) => run_dump(args, profile.dump, &mut diagnostics),
        Command::Tree(args) => {
            let use_color = should_use_color(cli.color, &io::stdout());
            run_tree(args, profile.tree, use_color, &mut diagnostics)
        }
    }
}

fn run_dump<D: Diagnostics>(args: DumpArgs, profile: DumpProfile, diagnostics: &mut D) -> Result<()> {
    let root = args.root.or(profile.root).unwrap_or_else(|| PathBuf::from("."));
    let output = args
        .output
        .or(profile.output)
        .unwrap_or_else(|| default_output(&root));
    let to_stdout = output.as_os_str() == "-";
    let files: Vec<PathBuf> = profile.files.into_iter().chain(args.files).collect();
    let dirs: Vec<PathBuf> = profile.dirs.into_iter().chain(args.dirs).collect();

    let excludes = profile.exclude.iter().chain(&args.exclude);
    let ignores = profile.ignore.iter().chain(&args.ignore);
    let mut matcher = PathMatcher::from_parts(excludes, ignores)?;
    if !to_stdout {
        for walk_root in std::iter::once(&root).chain(&dirs) {
            if let Some(rule) = self_exclusion(walk_root, &output) {
                matcher = matcher.with_rule(ExclusionRule::ancestor(rule));
            }
        }
    }

    let walker = Walker::new(&root, &matcher, WalkerConfig::default());
    // Validate the root before the destination exists.
    walker.walk()?;

    let (out, destination): (Box<dyn Write>, String) = if to_stdout {
        (Box::new(io::stdout().lock()), "stdout".to_string())
    } else {
        let file = File::create(&output).map_err(Error::Write)?;
        (Box::new(BufWriter::new(file)), output.display().to_string())
    };

    let mut renderer = ContentRenderer::new(out).with_label_root(args.label_root || profile.label_root);
    for file in &files {
        if !file.is_file() {
            diagnostics.report(Diagnostic::MissingFile { path: file.clone() });
            continue;
        }
        renderer.render_file(file, &to_slash(file), diagnostics)?;
    }
    renderer.render_walker(&walker, diagnostics)?;
    for dir in &dirs {
        if !dir.is_dir() {
            diagnostics.report(Diagnostic::MissingDirectory { path: dir.clone() });
            continue;
        }
        let extra = Walker::new(dir, &matcher, WalkerConfig::default());
        renderer.render_extra_walker(&extra, diagnostics)?;
    }
    let summary = renderer.finish()?;

    diagnostics.report(Diagnostic::Wrote {
        destination,
        summary,
    });
    Ok(())
}

/// `<root name>_context.txt` in the working directory.
fn default_output(root: &Path) -> PathBuf {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "tree".to_string());
    PathBuf::from(format!("{}_context.txt", name))
}

/// Where the output file will appear in a walk of `root`, spelled the way
/// that walk spells its paths. `None` when the output lies outside `root`.
///
/// Both sides are resolved on disk, so `..` and symlinks in either spelling
/// still line up. The output itself may not exist yet; its parent must.
fn self_exclusion(root: &Path, output: &Path) -> Option<PathBuf> {
    let real_root = root.canonicalize().ok()?;
    let name = output.file_name()?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let real_output = parent.canonicalize().ok()?.join(name);
    let rest = real_output.strip_prefix(&real_root).ok()?;
    Some(root.join(rest))
}

fn run_tree<D: Diagnostics>(
    args: TreeArgs,
    profile: TreeProfile,
    use_color: bool,
    diagnostics: &mut D,
) -> Result<()> {
    let base = args.directory.unwrap_or_else(|| PathBuf::from("."));
    let profile = TreeProfile {
        default_ignores: profile.default_ignores && !args.no_default_ignores,
        ..profile
    };

    let excludes: Vec<PathBuf> = profile
        .exclude
        .iter()
        .chain(&args.exclude)
        .map(|path| base.join(path))
        .collect();
    let ignores = profile.effective_ignores().into_iter().chain(args.ignore);
    let matcher = PathMatcher::from_parts(&excludes, ignores)?;

    let mut names = profile.names();
    names.extend(args.names);
    if names.is_empty() && base.is_dir() {
        names = read_children(&base, &PathMatcher::default(), SortOrder::Name)
            .map_err(|source| Error::ReadDir {
                path: base.clone(),
                source,
            })?
            .into_iter()
            .map(|entry| entry.name().to_string())
            .collect();
    }

    let config = TreeConfig::default().with_max_depth(args.level.or(profile.max_depth));
    let renderer = TreeRenderer::new(&matcher, config);

    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout = BufferedStandardStream::stdout(choice);
    diagnostics.report(Diagnostic::Scanning {
        root: base.clone(),
        rules: matcher.rules().iter().map(ToString::to_string).collect(),
    });
    let summary = renderer.render(&base, &names, &mut stdout)?;
    stdout.flush().map_err(Error::Write)?;

    if summary.is_empty() {
        diagnostics.report(Diagnostic::NothingToShow);
    } else {
        diagnostics.report(Diagnostic::TreeDone { summary });
    }
    Ok(())
}
