// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use json2fc::{convert, Config, Document, Schema, SpatialReference, TransformMode};

fn cli() -> Command {
    Command::new("json2fc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Loads GeoJSON or TopoJSON features into one container per geometry family.")
        .arg(
            Arg::new("INPUT")
                .short('i')
                .long("in")
                .value_name("FILE")
                .help("input GeoJSON or TopoJSON file")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("OUTPUT")
                .short('o')
                .long("out")
                .value_name("DIR")
                .help("destination store; created if absent")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present("LIST"),
        )
        .arg(
            Arg::new("SRID")
                .long("srid")
                .value_name("CODE")
                .help("spatial reference of the containers, e.g. 4326 or EPSG:4326")
                .default_value("4326"),
        )
        .arg(
            Arg::new("FIELD_WIDTH")
                .long("field-width")
                .value_name("N")
                .help("width of the text fields created for properties")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new("APPLY_TRANSFORM")
                .long("apply-transform")
                .help("delta-decode and dequantize topology arcs with the declared transform")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("LIST")
                .short('l')
                .long("list")
                .help("list the geometry families and fields of the input, then exit")
                .action(ArgAction::SetTrue),
        )
}

fn config_from(matches: &ArgMatches) -> Result<Config, json2fc::Error> {
    let input = matches
        .get_one::<PathBuf>("INPUT")
        .cloned()
        .unwrap_or_default();
    let output = matches
        .get_one::<PathBuf>("OUTPUT")
        .cloned()
        .unwrap_or_default();
    let mut config = Config::new(input, output);
    if let Some(srid) = matches.get_one::<String>("SRID") {
        config.spatial_reference = srid.parse::<SpatialReference>()?;
    }
    if let Some(width) = matches.get_one::<usize>("FIELD_WIDTH") {
        config.field_width = *width;
    }
    if matches.get_flag("APPLY_TRANSFORM") {
        config.transform = TransformMode::Apply;
    }
    Ok(config)
}

fn list(config: &Config) -> Result<(), json2fc::Error> {
    let doc = Document::from_path(&config.input)?;
    let schema = Schema::from_document(&doc)?;
    println!("{}", doc.kind());
    for family in schema.families() {
        println!("\t{}", family);
    }
    for field in &schema.fields {
        println!("\t\t{}", field);
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<bool, json2fc::Error> {
    let config = config_from(matches)?;
    if matches.get_flag("LIST") {
        list(&config)?;
        return Ok(true);
    }
    let report = convert(&config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.is_complete())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli().get_matches()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            log::error!("Some containers could not be exported");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
