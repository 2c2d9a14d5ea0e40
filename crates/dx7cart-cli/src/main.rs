use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dx7cart_core::diff::compare;
use dx7cart_core::generate::{Profile, random_cartridge};
use dx7cart_core::{
    Cartridge, CartridgeError, DecodeOptions, Framing, TOOL_NAME, TransportError, VOICE_COUNT,
    VoiceRecord, decode_cartridge, read_bytes, write_cartridge,
};
use glob::glob;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DX7CART_BUILD_COMMIT"),
    ", ",
    env!("DX7CART_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  dx7cart compare rom1a.syx edited.syx\n  dx7cart roundtrip rom1a.syx copy.syx\n  dx7cart print rom1a.syx --voice 1\n  dx7cart random bank.syx --profile bright --seed 7";

#[derive(Parser, Debug)]
#[command(name = "dx7cart")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Codec and tools for 32-voice FM synthesizer SysEx cartridges.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two files byte by byte.
    Compare {
        left: PathBuf,
        right: PathBuf,

        /// Exit with a non-zero code if the files differ
        #[arg(long)]
        strict: bool,
    },
    /// Decode a cartridge, write it back out and compare against the input.
    Roundtrip {
        input: PathBuf,
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = FramingArg::Sysex)]
        framing: FramingArg,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Print every parameter of a cartridge.
    Print {
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = FramingArg::Sysex)]
        framing: FramingArg,

        /// Print a single patch (1-32)
        #[arg(long)]
        voice: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Write a cartridge of randomly generated voices.
    Random {
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = ProfileArg::Uniform)]
        profile: ProfileArg,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FramingArg {
    /// Header, voice data, checksum and terminator (4104 bytes)
    Sysex,
    /// Voice data only (4096 bytes)
    Bare,
}

impl From<FramingArg> for Framing {
    fn from(arg: FramingArg) -> Self {
        match arg {
            FramingArg::Sysex => Framing::SysEx,
            FramingArg::Bare => Framing::Bare,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ProfileArg {
    Uniform,
    Bright,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Uniform => Profile::Uniform,
            ProfileArg::Bright => Profile::Bright,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compare {
            left,
            right,
            strict,
        } => cmd_compare(&left, &right, strict),
        Commands::Roundtrip {
            input,
            output,
            framing,
            quiet,
        } => cmd_roundtrip(&input, &output, framing.into(), quiet),
        Commands::Print {
            input,
            framing,
            voice,
            json,
            pretty,
        } => cmd_print(&input, framing.into(), voice, json, pretty),
        Commands::Random {
            output,
            profile,
            seed,
            quiet,
        } => cmd_random(&output, profile.into(), seed, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<TransportError> for CliError {
    fn from(err: TransportError) -> Self {
        let hint = match &err {
            TransportError::Io { .. } => Some("check the path and its permissions".to_string()),
            TransportError::Cartridge(inner) => cartridge_hint(inner),
        };
        CliError::new(err.to_string(), hint)
    }
}

fn cartridge_hint(err: &CartridgeError) -> Option<String> {
    match err {
        CartridgeError::LengthMismatch { .. } => Some(
            "use --framing sysex for 4104-byte dumps or --framing bare for 4096-byte voice data"
                .to_string(),
        ),
        CartridgeError::HeaderMismatch { .. } | CartridgeError::TerminatorMismatch { .. } => {
            Some("the file is not a 32-voice bulk dump; try --framing bare".to_string())
        }
        CartridgeError::DataByte { .. } => {
            Some("the dump is corrupt; SysEx data bytes never have the high bit set".to_string())
        }
        CartridgeError::ChecksumMismatch { .. } => {
            Some("the voice data was altered without updating the checksum".to_string())
        }
        CartridgeError::Voice { .. } => {
            Some("use `dx7cart print` to inspect the damaged voice".to_string())
        }
        CartridgeError::VoiceCount { .. } => None,
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
    commit: &'static str,
}

impl ToolInfo {
    fn current() -> Self {
        Self {
            name: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
            commit: env!("DX7CART_BUILD_COMMIT_FULL"),
        }
    }
}

#[derive(Serialize)]
struct SlotDump<'a> {
    slot: usize,
    voice: &'a VoiceRecord,
}

#[derive(Serialize)]
struct PrintReport<'a> {
    tool: ToolInfo,
    input: String,
    framing: Framing,
    voices: Vec<SlotDump<'a>>,
}

fn cmd_compare(left: &Path, right: &Path, strict: bool) -> Result<(), CliError> {
    let left = resolve_input_path(left)?;
    validate_input_file(&left)?;
    let right = resolve_input_path(right)?;
    validate_input_file(&right)?;

    let left_bytes = read_bytes(&left)?;
    let right_bytes = read_bytes(&right)?;
    let diff = compare(&left_bytes, &right_bytes);
    print!("{diff}");

    if strict && !diff.is_identical() {
        return Err(CliError::new(
            format!("{} and {} differ", left.display(), right.display()),
            None,
        ));
    }
    Ok(())
}

fn cmd_roundtrip(
    input: &Path,
    output: &Path,
    framing: Framing,
    quiet: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(input)?;
    validate_input_file(&input)?;
    ensure_distinct_output(&input, output)?;

    let original = read_bytes(&input)?;
    let cartridge = decode_cartridge(&original, framing, &DecodeOptions::strict())
        .map_err(TransportError::from)?;
    info!("decoded {} voices from {}", VOICE_COUNT, input.display());

    create_parent_dir(output)?;
    write_cartridge(output, &cartridge)?;

    // Bare inputs are compared against the voice data of the framed output.
    let reencoded = match framing {
        Framing::SysEx => read_bytes(output)?,
        Framing::Bare => cartridge.to_voice_data().map_err(TransportError::from)?,
    };
    print!("{}", compare(&original, &reencoded));

    if !quiet {
        eprintln!("OK: cartridge written -> {}", output.display());
    }
    Ok(())
}

fn cmd_print(
    input: &Path,
    framing: Framing,
    voice: Option<usize>,
    json: bool,
    pretty: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(input)?;
    validate_input_file(&input)?;
    if let Some(number) = voice {
        if !(1..=VOICE_COUNT).contains(&number) {
            return Err(CliError::new(
                format!("voice {number} is out of range"),
                Some(format!("choose a patch number between 1 and {VOICE_COUNT}")),
            ));
        }
    }

    let bytes = read_bytes(&input)?;
    let cartridge = decode_cartridge(&bytes, framing, &DecodeOptions::lenient())
        .map_err(TransportError::from)?;
    let slots = selected_slots(&cartridge, voice);
    debug!("printing {} of {} voices", slots.len(), VOICE_COUNT);

    if json {
        let report = PrintReport {
            tool: ToolInfo::current(),
            input: input.display().to_string(),
            framing: cartridge.framing(),
            voices: slots,
        };
        println!("{}", serialize_report(&report, pretty)?);
        return Ok(());
    }

    for dump in slots {
        println!("Patch {}", dump.slot + 1);
        println!("{}", dump.voice);
    }
    Ok(())
}

fn selected_slots(cartridge: &Cartridge, voice: Option<usize>) -> Vec<SlotDump<'_>> {
    cartridge
        .voices()
        .iter()
        .enumerate()
        .filter(|(slot, _)| voice.is_none_or(|number| number == slot + 1))
        .map(|(slot, voice)| SlotDump { slot, voice })
        .collect()
}

fn serialize_report(report: &PrintReport<'_>, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn cmd_random(
    output: &Path,
    profile: Profile,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), CliError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let cartridge = random_cartridge(&mut rng, profile).map_err(TransportError::from)?;

    create_parent_dir(output)?;
    write_cartridge(output, &cartridge)?;
    if !quiet {
        eprintln!("OK: cartridge written -> {}", output.display());
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A missing output directory cannot contain the input.
    let Ok(output_dir) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a .syx cartridge dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a .syx cartridge dump".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if input.exists() || !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!("multiple files match pattern '{pattern}' ({count} matches); matches: {listed}"),
                Some("pass a single cartridge file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
