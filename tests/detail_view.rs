//! Tests for the product detail view model.

mod common;

use std::time::Duration;

use catalog_view::{DetailView, DetailViewModel};
use common::{next_matching, server_error, sources, until_closed, StubBackend};

#[tokio::test(start_paused = true)]
async fn empty_until_a_product_is_selected() {
    let backend = StubBackend::new();
    let sources = sources(&backend);
    let view = DetailViewModel::new(&sources.products);

    let mut detail = view.view();
    let first = next_matching(&mut detail, |_| true).await;
    assert_eq!(
        first,
        DetailView {
            product: None,
            page_title: None,
            suppliers: Vec::new(),
        }
    );
    assert_eq!(backend.calls("supplier"), 0);
}

#[tokio::test(start_paused = true)]
async fn selected_product_with_title_and_suppliers() {
    let backend = StubBackend::new();
    let sources = sources(&backend);
    let view = DetailViewModel::new(&sources.products);
    let mut detail = view.view();
    next_matching(&mut detail, |_| true).await;

    sources.products.select_product(5);
    let shown = next_matching(&mut detail, |d| {
        d.product.as_ref().is_some_and(|p| p.id == 5)
            && d.page_title.is_some()
            && !d.suppliers.is_empty()
    })
    .await;

    assert_eq!(shown.page_title.as_deref(), Some("Product Detail for: Hammer"));
    assert_eq!(
        shown.suppliers.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![5, 6]
    );

    let mut title = view.page_title();
    assert_eq!(
        next_matching(&mut title, |_| true).await.as_deref(),
        Some("Product Detail for: Hammer")
    );
}

#[tokio::test(start_paused = true)]
async fn unknown_product_clears_the_view() {
    let backend = StubBackend::new();
    let sources = sources(&backend);
    let view = DetailViewModel::new(&sources.products);
    let mut detail = view.view();

    sources.products.select_product(8);
    next_matching(&mut detail, |d| d.suppliers.len() == 2).await;

    sources.products.select_product(999);
    let cleared = next_matching(&mut detail, |d| {
        d.product.is_none() && d.page_title.is_none() && d.suppliers.is_empty()
    })
    .await;
    assert_eq!(cleared.page_title, None);
}

#[tokio::test(start_paused = true)]
async fn supplier_failure_does_not_block_the_product() {
    let backend = StubBackend::new();
    backend.fail_supplier(6, server_error("api/suppliers/6"));
    let sources = sources(&backend);
    let view = DetailViewModel::new(&sources.products);
    let mut messages = view.errors().subscribe();
    let mut detail = view.view();
    next_matching(&mut detail, |_| true).await;

    sources.products.select_product(5);
    let shown = next_matching(&mut detail, |d| d.product.is_some() && d.page_title.is_some()).await;
    assert_eq!(shown.page_title.as_deref(), Some("Product Detail for: Hammer"));
    assert!(shown.suppliers.is_empty());

    let message = tokio::time::timeout(Duration::from_secs(1), messages.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        message,
        "Backend returned code 500: Http failure response for api/suppliers/6: 500 Internal Server Error"
    );

    // The product branch keeps following the selection.
    sources.products.select_product(1);
    let next = next_matching(&mut detail, |d| {
        d.product.as_ref().is_some_and(|p| p.id == 1)
            && d.page_title.as_deref() == Some("Product Detail for: Leaf Rake")
    })
    .await;
    assert_eq!(next.product.map(|p| p.product_code), Some("GDN-0011".to_string()));
}

#[tokio::test(start_paused = true)]
async fn failing_product_load_is_fetched_once() {
    let backend = StubBackend::new();
    backend.set_products(Err(server_error("api/products")));
    let sources = sources(&backend);
    let view = DetailViewModel::new(&sources.products);

    let mut product = view.product();
    until_closed(&mut product).await;
    let mut suppliers = view.suppliers();
    until_closed(&mut suppliers).await;

    assert_eq!(backend.calls("products"), 1);
    assert_eq!(
        view.errors().latest().as_deref(),
        Some("Backend returned code 500: Http failure response for api/products: 500 Internal Server Error")
    );
}
