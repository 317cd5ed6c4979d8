mod cli;
mod logging;

use std::collections::BTreeMap;

use clap::Parser;
use miette::{bail, Context, IntoDiagnostic, Result};
use tracing::{debug, info};
use yt_words::{concatenate, Client, Selection, Settings, TranscriptEntry, VideoId};

use crate::cli::{Args, Format};

fn main() -> Result<()> {
    // Initialize the environment & CLI
    let args = Args::parse();
    logging::init_logging(args.log_level)?;

    let settings = Settings::load(args.config.as_deref()).wrap_err("Could not load settings")?;
    debug!("Settings: {settings:?}");

    let mut options = settings.http_options();
    if args.proxy.is_some() {
        options.proxy = args.proxy.clone();
    }
    let selection = Selection::from_language(args.lang.clone().or(settings.language));

    let video_ids = args
        .inputs
        .iter()
        .map(|input| input.trim().parse::<VideoId>())
        .collect::<yt_words::Result<Vec<_>>>()?;

    let client = Client::with_options(&options)?;

    if args.list {
        return list_tracks(&client, &video_ids, args.format);
    }

    match video_ids.as_slice() {
        [video_id] => {
            info!("Fetching the transcript of video {video_id}");
            let entries = client.transcript_with(video_id, &selection)?;
            print_transcript(&entries, args.format)
        }
        _ => {
            info!("Fetching the transcripts of {} videos", video_ids.len());
            let report = client.fetch_all_with(&video_ids, &selection);
            let outcomes = report.into_outcomes();

            // Keep the input order in the output
            let mut transcripts = Vec::new();
            for video_id in &video_ids {
                if let Some(Ok(entries)) = outcomes.get(video_id) {
                    transcripts.push((video_id, entries));
                }
            }

            if transcripts.is_empty() {
                bail!("No transcript could be retrieved");
            }
            print_transcripts(&transcripts, args.format)
        }
    }
}

fn list_tracks(client: &Client, video_ids: &[VideoId], format: Format) -> Result<()> {
    let mut listing = BTreeMap::new();
    for video_id in video_ids {
        let tracks = client.list_transcripts(video_id)?;
        if format == Format::Text {
            println!("Caption tracks of video {video_id}:");
            for track in &tracks {
                println!("\t{track}");
            }
        }
        listing.insert(video_id, tracks);
    }

    if format == Format::Json {
        print_json(&listing)?;
    }
    Ok(())
}

fn print_transcript(entries: &[TranscriptEntry], format: Format) -> Result<()> {
    match format {
        Format::Text => println!("{}", concatenate(entries)),
        Format::Json => print_json(&entries)?,
    }
    Ok(())
}

fn print_transcripts(
    transcripts: &[(&VideoId, &Vec<TranscriptEntry>)],
    format: Format,
) -> Result<()> {
    match format {
        Format::Text => {
            for (video_id, entries) in transcripts {
                println!("Transcript for video {video_id}:\n{}\n", concatenate(entries));
            }
        }
        Format::Json => {
            let by_id: BTreeMap<_, _> = transcripts.iter().copied().collect();
            print_json(&by_id)?;
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .into_diagnostic()
        .wrap_err("Could not serialize the output")?;
    println!("{json}");
    Ok(())
}
