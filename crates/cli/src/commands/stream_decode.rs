use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Result;
use console::style;
use genecoder_core::streaming;

use crate::create_progress_bar;

pub fn run(input: PathBuf, output: PathBuf) -> Result<()> {
    let file = File::open(&input)?;
    let total_bytes = file.metadata()?.len();
    let writer = BufWriter::new(File::create(&output)?);

    let pb = create_progress_bar(total_bytes, "Stream-decoding...");
    let reader = BufReader::new(pb.wrap_read(file));

    streaming::decode_stream(reader, writer, None)?;
    pb.finish_and_clear();

    println!(
        "{} {} -> {}",
        style("stream-decoded").green().bold(),
        input.display(),
        output.display()
    );
    Ok(())
}
