use similarity::{
    cosine_similarity, reciprocal_rank_fusion, top_k, weighted_fusion, Document, SimilarityError,
    DEFAULT_RRF_K,
};

fn main() -> Result<(), SimilarityError> {
    let query = [0.8, 0.6, 0.4, 0.2];
    let docs = [
        ("Python is a programming language...", vec![0.7, 0.5, 0.5, 0.3]),
        ("Python syntax is simple...", vec![0.6, 0.4, 0.6, 0.2]),
        ("Cooking recipes are...", vec![-0.2, -0.3, 0.1, 0.8]),
    ];

    println!("query: {query:?}");
    for (text, emb) in &docs {
        println!("  {:.3}  {text}", cosine_similarity(&query, emb)?);
    }

    let corpus: Vec<Document> = docs
        .iter()
        .map(|(text, emb)| Document::new(*text, emb.clone()))
        .collect();
    println!("\ntop 2:");
    for hit in top_k(&query, &corpus, 2)? {
        println!("  #{} {:.3} {}", hit.rank, hit.score, hit.id);
    }

    let keyword = ["doc-b", "doc-a", "doc-d"];
    let dense = ["doc-a", "doc-c", "doc-b"];
    println!("\nreciprocal rank fusion (k={DEFAULT_RRF_K}):");
    for hit in reciprocal_rank_fusion(&[keyword, dense], DEFAULT_RRF_K)? {
        println!("  #{} {:.4} {}", hit.rank, hit.score, hit.id);
    }

    let bm25 = [("doc-a", 0.2), ("doc-b", 0.9)];
    let vector = [("doc-a", 0.95), ("doc-c", 0.6)];
    println!("\nweighted fusion (0.3 keyword / 0.7 vector):");
    for hit in weighted_fusion(&bm25, &vector, 0.3)? {
        println!("  #{} {:.3} {}", hit.rank, hit.score, hit.id);
    }
    Ok(())
}
