use super::ConfigArgs;
use anyhow::{Context, Result};
use clap::Args;
use footprint_core::GeoBBox;
use footprint_overlay::{BuildingOverlayController, MapEvent, MemoryMap, RebuildOutcome};
use std::{fmt::Write, sync::Arc};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// viewport as "west,south,east,north" in degrees
	#[arg(long, allow_hyphen_values = true)]
	bbox: GeoBBox,

	/// fractional map zoom of the viewport
	#[arg(long, short)]
	zoom: f64,

	/// click the first building and print its popup
	#[arg(long)]
	click: bool,

	#[command(flatten)]
	config: ConfigArgs,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	print!("{}", execute(arguments).await?);
	Ok(())
}

async fn execute(arguments: &Subcommand) -> Result<String> {
	let config = arguments.config.load()?;
	let map = Arc::new(MemoryMap::new(arguments.zoom, arguments.bbox));
	let mut controller = BuildingOverlayController::from_config(map.clone(), config.clone())?;
	let events = controller.events().record();

	let outcome = controller.activate().await;

	let mut output = String::new();
	writeln!(output, "{}", describe(&outcome))?;
	if let RebuildOutcome::Applied { .. } = outcome {
		writeln!(output, "sources: {}", map.source_ids().join(", "))?;
		writeln!(output, "layers: {}", map.layer_ids().join(", "))?;
	}

	if arguments.click {
		let feature = controller
			.collection()
			.into_iter()
			.next()
			.context("there is no building to click")?;
		let position = feature.centroid().unwrap_or_else(|_| arguments.bbox.center().into());
		map.click(&config.layers.buildings, position, vec![feature]);

		if let Some(event @ MapEvent::Click { .. }) = controller.next_event().await {
			controller.handle_event(event).await;
		}
		match map.popups().last() {
			Some(annotation) => writeln!(output, "{}", annotation.to_html())?,
			None => writeln!(output, "no popup")?,
		}
	}

	controller.deactivate();

	for event in events.lock().iter() {
		log::debug!("{event:?}");
	}
	Ok(output)
}

fn describe(outcome: &RebuildOutcome) -> String {
	match outcome {
		RebuildOutcome::Applied {
			generation,
			features,
			failed_tiles,
			..
		} => format!("rebuild #{generation}: {features} buildings, {failed_tiles} tiles failed"),
		RebuildOutcome::Skipped { zoom } => format!("zoom {zoom} is outside the overlay range"),
		RebuildOutcome::Superseded { generation } => format!("rebuild #{generation} was superseded"),
		RebuildOutcome::Inactive => "overlay is inactive".to_string(),
		RebuildOutcome::Failed { message } => format!("rebuild failed: {message}"),
	}
}
