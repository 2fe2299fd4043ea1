pub mod snippet_repo;

pub use snippet_repo::SnippetRepository;
