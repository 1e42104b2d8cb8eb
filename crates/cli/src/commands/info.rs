use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use genecoder_core::fasta;
use genecoder_core::pipeline;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct Row {
    field: String,
    value: String,
}

pub fn run(input: PathBuf) -> Result<()> {
    let contents = fs::read_to_string(&input)?;
    let (dna, descriptor) = fasta::from_fasta(&contents)?;

    let mut rows = vec![
        Row {
            field: "method".to_string(),
            value: format!("{:?}", descriptor.method),
        },
        Row {
            field: "fec".to_string(),
            value: format!("{:?}", descriptor.fec),
        },
        Row {
            field: "add_parity".to_string(),
            value: descriptor.add_parity.to_string(),
        },
    ];
    if let Some(name) = &descriptor.original_filename {
        rows.push(Row {
            field: "original_filename".to_string(),
            value: name.clone(),
        });
    }

    println!("{}", Table::new(rows));

    let (bytes, metrics) = pipeline::decode(&dna, &descriptor)?;

    let metric_rows = vec![
        Row {
            field: "original_bytes".to_string(),
            value: bytes.len().to_string(),
        },
        Row {
            field: "dna_length".to_string(),
            value: metrics.dna_length.to_string(),
        },
        Row {
            field: "compression_ratio".to_string(),
            value: format!("{:.3}", metrics.compression_ratio),
        },
        Row {
            field: "bits_per_nt".to_string(),
            value: format!("{:.3}", metrics.bits_per_nt),
        },
        Row {
            field: "gc_actual".to_string(),
            value: metrics
                .gc_actual
                .map(|v| format!("{v:.3}"))
                .unwrap_or_else(|| "n/a".to_string()),
        },
        Row {
            field: "triple_repeat_corrected".to_string(),
            value: metrics.triple_repeat_corrected.to_string(),
        },
        Row {
            field: "triple_repeat_uncorrectable".to_string(),
            value: metrics.triple_repeat_uncorrectable.to_string(),
        },
        Row {
            field: "hamming_corrected".to_string(),
            value: metrics.hamming_corrected.to_string(),
        },
        Row {
            field: "rs_corrected".to_string(),
            value: metrics.rs_corrected.to_string(),
        },
        Row {
            field: "parity_mismatch".to_string(),
            value: metrics.parity_mismatch.to_string(),
        },
    ];
    println!("{}", Table::new(metric_rows));

    Ok(())
}
