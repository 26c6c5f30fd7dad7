//! Built-in texts used by the walkthrough, the CLI defaults and the benches.

/// Fixed-size chunking example with leading indentation and newlines kept.
pub const FIXED_SIZE_DOCUMENT: &str = "
    This is a long document that needs to be split into chunks.
    Fixed-size chunking splits the document into equal-sized pieces.
    This is simple but may split sentences or paragraphs in the middle.
    Overlap can be added to preserve context between chunks.
    ";

/// Six short sentences for sentence-based chunking.
pub const SENTENCE_DOCUMENT: &str = "
    This is sentence one. This is sentence two. This is sentence three.
    This is sentence four. This is sentence five. This is sentence six.
    ";

/// A few paragraphs on different topics for retrieval.
pub const RETRIEVAL_DOCUMENT: &str = "\
Python is a programming language that lets you work quickly and integrate \
systems more effectively. Python syntax is simple and readable, which makes \
it popular for data science and machine learning.

Embeddings map text to dense vectors. Similar texts end up close together, \
so cosine similarity between a query vector and document vectors finds \
relevant passages without exact keyword matches.

Chunking splits long documents into smaller pieces before they are \
embedded. Fixed-size chunks are predictable, sentence chunks preserve \
meaning, and overlap keeps context across chunk boundaries.

Cooking recipes are best followed step by step. Simmer the tomato sauce \
slowly, season it with basil and garlic, and serve it over fresh pasta.
";
