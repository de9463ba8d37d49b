//! Encoding a document to YABE and decoding it back.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use yabe::{decode, encode, yabe, Blob, Value};

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = yabe!({
        "id": 42,
        "name": "Alice Johnson",
        "email": "alice@example.com",
        "scores": [1.5, 2.25, 0.1],
        "manager": null
    });

    if let Value::Record(record) = &mut doc {
        record.push("avatar", Value::from(Blob::new("image/png", vec![0x89, b'P', b'N', b'G'])));
    }

    let bytes = encode(&doc)?;
    let json = serde_json::to_string(&doc)?;
    println!("YABE: {} bytes, JSON: {} bytes", bytes.len(), json.len());
    println!("{:02X?}\n", &bytes[..16]);

    let back = decode(&bytes)?;
    assert_eq!(doc, back);
    println!("{}", back);
    println!("✓ Round-trip successful");

    Ok(())
}
