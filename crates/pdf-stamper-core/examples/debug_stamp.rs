#![allow(clippy::expect_used, clippy::print_stdout)]

use std::path::PathBuf;
use pdf_stamper_core::{AppConfig, StampRequest, Stamper};

fn main() {
    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().expect("usage: debug_stamp <input.pdf> [text-a] [text-b]"));
    let text_a = args.next().unwrap_or_else(|| "A-123".to_string());
    let text_b = args.next().unwrap_or_else(|| "B-456".to_string());

    let output = std::env::temp_dir().join("debug_stamp_output.pdf");
    let request = StampRequest::new(&input, &output)
        .with_text_a(text_a)
        .with_text_b(text_b);

    let stamper = Stamper::new(AppConfig::default()).expect("Invalid config");
    let outcome = stamper.stamp(&request).expect("Failed to stamp");
    println!("Wrote output to: {}", outcome.output.display());
    println!("Slots written: {:?}, font embedded: {}", outcome.slots_written, outcome.font_embedded);

    // Now examine the output
    let doc = lopdf::Document::load(&output).expect("Failed to load output PDF");
    let pages = doc.get_pages();
    let first_page_id = *pages.get(&1).expect("No first page");

    println!("\nFonts on first page:");
    for (name, font) in doc.get_page_fonts(first_page_id).expect("Failed to read fonts") {
        let base = font.get(b"BaseFont").and_then(lopdf::Object::as_name).unwrap_or(b"?".as_slice());
        println!("  {} => {}", String::from_utf8_lossy(&name), String::from_utf8_lossy(base));
    }

    let contents = doc.get_page_contents(first_page_id);
    println!("\nContents array has {} entries", contents.len());

    // Last content stream is the stamp layer
    if let Some(last_ref) = contents.last()
        && let Ok(lopdf::Object::Stream(stream)) = doc.get_object(*last_ref)
    {
        let content = stream.decompressed_content().unwrap_or_else(|_| stream.content.clone());
        println!("\nStamp layer:");
        println!("{}", String::from_utf8_lossy(&content));
    }
}
