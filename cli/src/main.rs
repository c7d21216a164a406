use std::{
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use log::{error, info};
use roxmltree::Document;
use svg2model::{print_svg, svg2model, ConversionOptions, Model};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The model as JSON
    Json,
    /// The model rendered back into an SVG document
    Svg,
}

/// Convert an SVG document into a flat list of styled paths
#[derive(Parser, Debug)]
#[command(name = "svg2model", version, author, about)]
struct Opt {
    /// Input SVG file, or `-` to read from stdin
    file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Replace quadratic curves with the equivalent cubic curves
    #[arg(long)]
    cubics: bool,

    /// Output file path (overrides stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn read_input(file: &PathBuf) -> io::Result<String> {
    let mut input = String::new();
    if file.as_os_str() == "-" {
        info!("Reading SVG from stdin");
        io::stdin().read_to_string(&mut input)?;
    } else {
        File::open(file)?.read_to_string(&mut input)?;
    }
    Ok(input)
}

fn render(model: &Model, opt: &Opt) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match opt.format {
        Format::Svg => print_svg(model)?,
        Format::Json if opt.compact => serde_json::to_string(model)?,
        Format::Json => serde_json::to_string_pretty(model)?,
    })
}

fn run(opt: &Opt) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(&opt.file)?;
    let document = Document::parse(&input)?;

    let options = ConversionOptions {
        convert_quadratics_to_cubics: opt.cubics,
    };
    let conversion = svg2model(&document, &options)?;
    if !conversion.warnings.is_empty() {
        info!("Converted with {} warning(s)", conversion.warnings.len());
    }

    let mut output = render(&conversion.model, opt)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    match &opt.out {
        Some(path) => File::create(path)?.write_all(output.as_bytes())?,
        None => io::stdout().lock().write_all(output.as_bytes())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let opt = Opt::parse();

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
