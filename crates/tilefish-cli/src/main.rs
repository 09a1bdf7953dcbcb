use std::io::Read;

use futures::executor::block_on;
use serde::Serialize;
use tilefish::RawNode;
use tilefish::render::{ChartError, ChartRenderer, SvgRenderOptions, render_svg};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Chart(ChartError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ChartError> for CliError {
    fn from(value: ChartError) -> Self {
        Self::Chart(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Datasets,
    Layout,
    #[default]
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    data: Option<String>,
    input: Option<String>,
    out: Option<String>,
    pretty: bool,
    width: f64,
    height: f64,
    legend_width: f64,
    padding: f64,
    chart_id: Option<String>,
}

fn usage() -> &'static str {
    "tilefish-cli\n\
\n\
USAGE:\n\
  tilefish-cli datasets\n\
  tilefish-cli layout [--data <key>] [--input <path>|-] [--pretty] [--width <w>] [--height <h>]\n\
  tilefish-cli [render] [--data <key>] [--input <path>|-] [--out <path>] [--width <w>] [--height <h>] [--legend-width <w>] [--padding <p>] [--id <chart-id>]\n\
\n\
NOTES:\n\
  - --data picks a dataset from the built-in catalog (videogames, movies,\n\
    kickstarter); an unknown or missing key falls back to kickstarter.\n\
  - --input reads a local JSON document (or stdin with '-') instead of\n\
    fetching the dataset's source URL.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - On a failed fetch or a malformed dataset, render still writes a visible\n\
    error placeholder page and exits non-zero.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Render,
        width: 960.0,
        height: 570.0,
        legend_width: 500.0,
        padding: 0.5,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "datasets" => args.command = Command::Datasets,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--data" => {
                let Some(key) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.data = Some(key.clone());
            }
            "--input" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.input = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = parse_dimension(w)?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = parse_dimension(h)?;
            }
            "--legend-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.legend_width = parse_dimension(w)?;
            }
            "--padding" => {
                let Some(p) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let p = p.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(p.is_finite() && p >= 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.padding = p;
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.chart_id = Some(id.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn parse_dimension(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn read_local_tree(input: &str) -> Result<RawNode, CliError> {
    let text = match input {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        path => std::fs::read_to_string(path)?,
    };
    Ok(RawNode::from_json_str(&text).map_err(ChartError::from)?)
}

fn load_tree(
    input: Option<&str>,
    dataset: &tilefish::DatasetDescriptor,
) -> Result<RawNode, CliError> {
    match input {
        Some(source) => read_local_tree(source),
        None => Ok(tilefish::fetch::fetch_dataset(dataset).map_err(ChartError::from)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_renderer(args: &Args) -> ChartRenderer {
    let mut renderer = ChartRenderer::new();
    renderer.layout.width = args.width;
    renderer.layout.height = args.height;
    renderer.layout.legend_width = args.legend_width;
    renderer.layout.padding_inner = args.padding;
    renderer.svg = SvgRenderOptions {
        chart_id: args.chart_id.clone(),
    };
    renderer
}

fn run(args: Args) -> Result<(), CliError> {
    let renderer = build_renderer(&args);

    match args.command {
        Command::Datasets => {
            for dataset in renderer.registry.iter() {
                println!("{}\t{}\t{}", dataset.key, dataset.title, dataset.source_url);
            }
            Ok(())
        }
        Command::Layout => {
            let dataset = renderer.select(args.data.as_deref()).clone();
            let root = load_tree(args.input.as_deref(), &dataset)?;
            let layout =
                block_on(tilefish::render::layout_chart(&dataset, &root, &renderer.layout))
                    .map_err(CliError::from)?;
            write_json(&layout, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let dataset = renderer.select(args.data.as_deref()).clone();
            let outcome = load_tree(args.input.as_deref(), &dataset).and_then(|root| {
                block_on(render_svg(&dataset, &root, &renderer.layout, &renderer.svg))
                    .map_err(CliError::from)
            });
            match outcome {
                Ok(svg) => write_text(&svg, args.out.as_deref()),
                Err(err) => {
                    // Failed state: never leave the output blank or partial.
                    let page = renderer.error_page(&dataset, &err.to_string());
                    write_text(&page, args.out.as_deref())?;
                    Err(err)
                }
            }
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
