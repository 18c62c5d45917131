use mast_report::args::Args;
use mast_report::config::ReportConfig;
use mast_report::dataset::Dataset;
use mast_report::logging;
use mast_report::report::Answers;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args = Args::parse();
    logging::init(args.debug);

    let mut config = match &args.config_file {
        Some(path) => match ReportConfig::from_toml(Path::new(path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to load config: {}", err);
                process::exit(1);
            }
        },
        None => ReportConfig::default(),
    };
    args.apply(&mut config);

    if !args.questions.any() {
        tracing::debug!("No questions selected, nothing to report");
        return;
    }

    let dataset = match Dataset::try_from(PathBuf::from(&args.csv_file)) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("failed to process input file: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = dataset.require(config.required_fields(&args.questions)) {
        eprintln!("failed to process input file: {}", err);
        process::exit(1);
    }

    let answers = match Answers::compute(dataset.records(), &config, &args.questions) {
        Ok(answers) => answers,
        Err(err) => {
            eprintln!("failed to generate report: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = answers.write_to(&config, io::stdout().lock()) {
        eprintln!("failed to generate report: {}", err);
        process::exit(1);
    }
}
