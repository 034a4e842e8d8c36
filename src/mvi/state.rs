/// State owned by a reducer.
///
/// `Default` is the state before any intent arrived; [`Reducer::apply`]
/// also uses it as the placeholder while the old state is moved out.
///
/// [`Reducer::apply`]: super::Reducer::apply
pub trait UiState: Default + Send + 'static {}
