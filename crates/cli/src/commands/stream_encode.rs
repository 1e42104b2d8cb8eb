use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Result;
use console::style;
use genecoder_core::pipeline::PipelineConfig;
use genecoder_core::streaming::{self, StreamConfig};

use crate::create_progress_bar;

pub fn run(input: PathBuf, output: PathBuf, chunk_bytes: usize) -> Result<()> {
    let file = File::open(&input)?;
    let total_bytes = file.metadata()?.len();
    let writer = BufWriter::new(File::create(&output)?);

    let pb = create_progress_bar(total_bytes, "Stream-encoding...");
    let reader = pb.wrap_read(file);

    let cfg = PipelineConfig {
        original_filename: input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        ..Default::default()
    };
    let stream_cfg = StreamConfig { chunk_bytes };

    streaming::encode_stream(reader, writer, &cfg, &stream_cfg, None)?;
    pb.finish_and_clear();

    println!(
        "{} {} -> {}",
        style("stream-encoded").green().bold(),
        input.display(),
        output.display()
    );
    Ok(())
}
