use std::path::PathBuf;

use avsc2jsonschema::generate::GenerateJsonSchema;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(
    name = "avsc2jsonschema",
    about = "Order Avro schema files by dependency, merge them and convert to JSON Schema"
)]
struct Cli {
    /// Directory containing the Avro schema files
    #[arg(value_name = "SOURCE_DIR", default_value = "src/main/resources")]
    source_dir: PathBuf,

    /// Glob selecting schema files, relative to SOURCE_DIR
    #[arg(long, default_value = "**/*.avsc")]
    include: String,

    /// Directory the JSON Schema file is written to
    #[arg(long, default_value = "build/generated/resources")]
    out_dir: PathBuf,

    /// Path of the intermediate combined Avro document
    #[arg(long, default_value = "build/tmp/generateJsonSchema/combined.avsc")]
    combined: PathBuf,

    /// Fail when a schema references a type no input file defines
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else if cli.quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = GenerateJsonSchema::new()
        .from(cli.source_dir)
        .include(cli.include)
        .into(cli.out_dir)
        .combined_at(cli.combined)
        .strict(cli.strict);

    match options.run() {
        Ok(output) => println!("{}", output.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
