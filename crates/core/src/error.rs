/// Errors raised for caller misuse. Missing or oddly-shaped data is never
/// reported here; it resolves to absence instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FacadeError {
    /// A payload was built over a root that cannot hold named fields.
    #[error("payload root must be a JSON object, got {found}")]
    NonObjectRoot { found: &'static str },
}
