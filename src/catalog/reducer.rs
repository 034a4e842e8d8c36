use crate::catalog::intent::ProductListIntent;
use crate::catalog::state::ProductListState;
use crate::mvi::Reducer;

pub struct ProductListReducer;

impl Reducer for ProductListReducer {
    type State = ProductListState;
    type Intent = ProductListIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ProductListIntent::Refresh(products) => ProductListState { products },
            ProductListIntent::Append(product) => {
                let mut products = state.products;
                products.push(product);
                ProductListState { products }
            }
        }
    }
}
