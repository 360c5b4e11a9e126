/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// Language identifier declared by the host at `didOpen`
    pub language_id: String,
}
