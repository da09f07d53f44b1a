//! Text vectorization shared by the search index and the classifier.

pub mod count;
pub mod sparse;
pub mod terms;
pub mod tfidf;
pub mod vocabulary;

pub use count::CountVectorizer;
pub use sparse::SparseVector;
pub use terms::TermAnalyzer;
pub use tfidf::TfidfVectorizer;
pub use vocabulary::Vocabulary;
