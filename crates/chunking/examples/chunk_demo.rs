use chunking::{preview, recursive_chunks, sentence_chunks, stitch, ChunkConfig, SlidingWindow};

fn main() {
    let document = "
    This is a long document that needs to be split into chunks.
    Fixed-size chunking splits the document into equal-sized pieces.
    This is simple but may split sentences or paragraphs in the middle.
    Overlap can be added to preserve context between chunks.
    ";

    let window = SlidingWindow::new(document, &ChunkConfig::chars(50, 10))
        .expect("50/10 is a valid window");
    println!("fixed-size: {} chunks", window.count_chunks());
    for chunk in &window {
        println!("  [{}] {}", chunk.index, preview(chunk.text, 50));
    }
    assert_eq!(stitch(window.iter(), 10), document);

    println!();
    let sentences = sentence_chunks(document, 2).expect("non-zero group size");
    println!("sentence-based: {} chunks", sentences.len());
    for chunk in &sentences {
        println!("  [{}] {}", chunk.index, preview(chunk.text, 80));
    }

    println!();
    let recursive = recursive_chunks(document, 70).expect("non-zero limit");
    println!("recursive (max 70 chars): {} chunks", recursive.len());
    for chunk in &recursive {
        println!("  [{}] {} chars", chunk.index, chunk.char_len());
    }
}
