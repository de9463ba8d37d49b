//! Writing and reading YABE items one at a time.
//!
//! The long sequence form lets a producer start writing before it knows how
//! many items there will be.
//!
//! Run with: cargo run --example streaming

use std::error::Error;
use std::io::{BufReader, Cursor};
use yabe::{Decoder, Encoder, Framing};

fn main() -> Result<(), Box<dyn Error>> {
    let mut encoder = Encoder::new(Vec::new());
    encoder.write_header()?;
    encoder.begin_sequence(None)?;
    for i in 0..10i64 {
        encoder.begin_record(Some(2))?;
        encoder.write_str("seq")?;
        encoder.write_i64(i)?;
        encoder.write_str("reading")?;
        encoder.write_f64(20.0 + i as f64 * 0.5)?;
    }
    encoder.write_end()?;
    let bytes = encoder.into_inner();
    println!("Wrote {} bytes", bytes.len());

    let mut decoder = Decoder::from_reader(BufReader::new(Cursor::new(bytes)));
    decoder.read_header()?;
    let framing = decoder.read_sequence_start()?;
    assert_eq!(framing, Framing::Long);

    let mut total = 0.0;
    while !decoder.next_is_end()? {
        let Framing::Short(fields) = decoder.read_record_start()? else {
            return Err("expected a short record".into());
        };
        for _ in 0..fields {
            match decoder.read_field_name()?.as_str() {
                "reading" => total += decoder.read_f64()?,
                _ => decoder.skip_value()?,
            }
        }
    }
    decoder.end()?;

    println!("Sum of readings: {}", total);
    println!("✓ Read {} bytes", decoder.offset());

    Ok(())
}
