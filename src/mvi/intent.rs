/// An event a reducer folds into its state: a user action or a fetch
/// result. Intents are consumed by value.
pub trait Intent: Send + 'static {}
