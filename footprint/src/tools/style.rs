use super::ConfigArgs;
use anyhow::{Context, Result};
use clap::Args;
use itertools::Itertools;

#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	/// key of the base map style; defaults to the first style of the catalog
	key: Option<String>,

	/// list the available styles instead
	#[arg(long, short, conflicts_with = "key")]
	list: bool,

	#[command(flatten)]
	config: ConfigArgs,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	println!("{}", execute(arguments)?);
	Ok(())
}

fn execute(arguments: &Subcommand) -> Result<String> {
	let config = arguments.config.load()?;

	if arguments.list {
		return Ok(config
			.styles
			.iter()
			.map(|style| format!("{}\t{}", style.key, style.title))
			.join("\n"));
	}

	let style = match &arguments.key {
		Some(key) => config.style(key).with_context(|| {
			format!(
				"unknown style '{key}', available: {}",
				config.styles.iter().map(|style| style.key.as_str()).join(", ")
			)
		})?,
		None => config.default_style().context("the style catalog is empty")?,
	};
	log::debug!("style '{}': {}", style.key, style.url);

	Ok(serde_json::to_string_pretty(&style.to_style_json(&config.glyphs))?)
}
